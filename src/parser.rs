use crate::error::{CasError, Result};
use crate::expr::{Expr, Rational};
use nom::IResult;
use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::character::complete::{alpha1, alphanumeric0, char, digit0, digit1, multispace0};
use nom::combinator::{all_consuming, map, map_res, recognize};
use nom::error::VerboseError;
use nom::multi::fold_many0;
use nom::sequence::{delimited, pair, preceded};
use num_bigint::BigInt;
use num_traits::{Num, One};

type ParseResult<'a, O> = IResult<&'a str, O, VerboseError<&'a str>>;

/// Parse plain arithmetic text into an unsimplified [`Expr`].
///
/// Accepts integers, decimals, identifiers, parentheses, unary signs and the
/// binary operators `+ - * /` plus `^`/`**` for powers. Implicit
/// multiplication is not recognised here; see [`crate::preprocess::normalize`].
pub fn parse_expr(input: &str) -> Result<Expr> {
    match all_consuming(ws(parse_add_sub))(input) {
        Ok((_, expr)) => Ok(expr),
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => {
            let at = e.errors.first().map(|(rest, _)| *rest).unwrap_or(input);
            Err(CasError::Parse(describe_failure(input, at)))
        }
        Err(nom::Err::Incomplete(_)) => Err(CasError::Parse(format!(
            "incomplete input `{}`",
            input.trim()
        ))),
    }
}

fn describe_failure(input: &str, at: &str) -> String {
    let at = at.trim();
    if at.is_empty() {
        format!("unexpected end of input in `{}`", input.trim())
    } else {
        format!("unexpected `{at}` in `{}`", input.trim())
    }
}

fn parse_add_sub(input: &str) -> ParseResult<'_, Expr> {
    let (rest, init) = parse_mul_div(input)?;
    fold_many0(
        pair(ws(alt((char('+'), char('-')))), parse_mul_div),
        move || init.clone(),
        |acc, (op, rhs)| match op {
            '+' => Expr::Add(acc.boxed(), rhs.boxed()),
            _ => Expr::Sub(acc.boxed(), rhs.boxed()),
        },
    )(rest)
}

fn parse_mul_div(input: &str) -> ParseResult<'_, Expr> {
    let (rest, init) = parse_unary(input)?;
    fold_many0(
        pair(ws(alt((char('*'), char('/')))), parse_unary),
        move || init.clone(),
        |acc, (op, rhs)| match op {
            '*' => Expr::Mul(acc.boxed(), rhs.boxed()),
            _ => Expr::Div(acc.boxed(), rhs.boxed()),
        },
    )(rest)
}

// Unary signs bind looser than powers: `-x^2` is `-(x^2)`.
fn parse_unary(input: &str) -> ParseResult<'_, Expr> {
    if let Ok((rest, expr)) = preceded(ws(char('-')), parse_unary)(input) {
        return Ok((rest, Expr::Neg(expr.boxed())));
    }
    if let Ok((rest, expr)) = preceded(ws(char('+')), parse_unary)(input) {
        return Ok((rest, expr));
    }
    parse_pow(input)
}

fn parse_pow(input: &str) -> ParseResult<'_, Expr> {
    let (rest, base) = parse_primary(input)?;
    if let Ok((next, exp)) = preceded(ws(alt((tag("**"), tag("^")))), parse_unary)(rest) {
        Ok((next, Expr::Pow(base.boxed(), exp.boxed())))
    } else {
        Ok((rest, base))
    }
}

fn parse_primary(input: &str) -> ParseResult<'_, Expr> {
    alt((parse_parens, parse_number, parse_identifier))(input)
}

fn parse_parens(input: &str) -> ParseResult<'_, Expr> {
    delimited(ws(char('(')), parse_add_sub, ws(char(')')))(input)
}

fn parse_number(input: &str) -> ParseResult<'_, Expr> {
    map(ws(alt((parse_decimal, parse_int))), Expr::Constant)(input)
}

fn parse_identifier(input: &str) -> ParseResult<'_, Expr> {
    map(ws(recognize(pair(alpha1, alphanumeric0))), |s: &str| {
        Expr::Variable(s.to_string())
    })(input)
}

fn parse_int(input: &str) -> ParseResult<'_, Rational> {
    map_res(digit1, |s: &str| {
        BigInt::from_str_radix(s, 10).map(Rational::from_integer)
    })(input)
}

// `1.25`, `.5` and `3.` are all accepted, as the usual calculator notation.
fn parse_decimal(input: &str) -> ParseResult<'_, Rational> {
    map_res(
        recognize(pair(digit0, pair(char('.'), digit0))),
        |s: &str| decimal_to_rational(s).ok_or(()),
    )(input)
}

fn decimal_to_rational(text: &str) -> Option<Rational> {
    let (whole, frac) = text.split_once('.')?;
    if whole.is_empty() && frac.is_empty() {
        return None;
    }
    let digits = format!("{whole}{frac}");
    let numer = BigInt::from_str_radix(&digits, 10).ok()?;
    let mut denom = BigInt::one();
    for _ in 0..frac.len() {
        denom *= 10;
    }
    Some(Rational::new(numer, denom))
}

fn ws<'a, F, O>(inner: F) -> impl FnMut(&'a str) -> ParseResult<'a, O>
where
    F: FnMut(&'a str) -> ParseResult<'a, O>,
{
    delimited(multispace0, inner, multispace0)
}
