//! LaTeX typesetting of expressions.
//!
//! Output follows the usual computer-algebra conventions: `2 x^{2}`,
//! `\frac{x + 1}{2}`, `\sqrt{2}`, `\left(x + 1\right)^{2}`, and a spaced
//! leading minus (`- \frac{1}{2}`).

use crate::expr::{Expr, Rational};
use num_bigint::BigInt;
use num_traits::{One, Signed, Zero};

const SUM: u8 = 1;
const PRODUCT: u8 = 2;
const POWER: u8 = 3;
const ATOM: u8 = 4;

pub fn latex(expr: &Expr) -> String {
    tex(expr, 0)
}

fn tex(expr: &Expr, ctx: u8) -> String {
    match expr {
        Expr::Variable(name) => name.clone(),
        Expr::Constant(r) => {
            let prec = if r.is_negative() {
                SUM
            } else if r.is_integer() {
                ATOM
            } else {
                PRODUCT
            };
            bracket(ctx, prec, rational_tex(r))
        }
        Expr::Add(_, _) | Expr::Sub(_, _) => bracket(ctx, SUM, sum_tex(expr)),
        Expr::Neg(inner) => {
            let (negative, body) = split_neg(inner);
            if negative {
                tex(&body, ctx)
            } else {
                bracket(ctx, SUM, format!("- {}", tex(&body, PRODUCT)))
            }
        }
        Expr::Mul(_, _) | Expr::Div(_, _) => product_tex(expr, ctx),
        Expr::Pow(base, exp) => power_tex(base, exp, ctx),
    }
}

fn sum_tex(expr: &Expr) -> String {
    let mut terms = Vec::new();
    signed_terms(expr, false, &mut terms);
    let mut out = String::new();
    for (i, (negated, term)) in terms.into_iter().enumerate() {
        let (inner_neg, body) = split_neg(&term);
        let negative = negated ^ inner_neg;
        let text = tex(&body, PRODUCT);
        match (i, negative) {
            (0, false) => out.push_str(&text),
            (0, true) => out.push_str(&format!("- {text}")),
            (_, false) => out.push_str(&format!(" + {text}")),
            (_, true) => out.push_str(&format!(" - {text}")),
        }
    }
    out
}

fn signed_terms(expr: &Expr, negated: bool, out: &mut Vec<(bool, Expr)>) {
    match expr {
        Expr::Add(a, b) => {
            signed_terms(a, negated, out);
            signed_terms(b, negated, out);
        }
        Expr::Sub(a, b) => {
            signed_terms(a, negated, out);
            signed_terms(b, !negated, out);
        }
        other => out.push((negated, other.clone())),
    }
}

/// Numerator and denominator parts of a product, with the numeric
/// coefficient kept apart.
#[derive(Default)]
struct Fraction {
    negative: bool,
    coeff: Option<Rational>,
    numer: Vec<Expr>,
    denom: Vec<Expr>,
}

impl Fraction {
    fn collect(&mut self, expr: &Expr, inverted: bool) {
        match expr {
            Expr::Mul(a, b) => {
                self.collect(a, inverted);
                self.collect(b, inverted);
            }
            Expr::Div(a, b) => {
                self.collect(a, inverted);
                self.collect(b, !inverted);
            }
            Expr::Neg(inner) => {
                self.negative = !self.negative;
                self.collect(inner, inverted);
            }
            Expr::Constant(r) if !r.is_zero() => {
                if r.is_negative() {
                    self.negative = !self.negative;
                }
                let r = r.abs();
                let r = if inverted { r.recip() } else { r };
                let coeff = self.coeff.take().unwrap_or_else(Rational::one);
                self.coeff = Some(coeff * r);
            }
            Expr::Pow(base, exp) => match &**exp {
                Expr::Constant(e) if e.is_negative() => {
                    let flipped = if (-e).is_one() {
                        (**base).clone()
                    } else {
                        Expr::Pow(base.clone(), Expr::Constant(-e).boxed())
                    };
                    self.push(flipped, !inverted);
                }
                _ => self.push(expr.clone(), inverted),
            },
            other => self.push(other.clone(), inverted),
        }
    }

    fn push(&mut self, factor: Expr, inverted: bool) {
        if inverted {
            self.denom.push(factor);
        } else {
            self.numer.push(factor);
        }
    }
}

fn product_tex(expr: &Expr, ctx: u8) -> String {
    let mut fraction = Fraction::default();
    fraction.collect(expr, false);
    if fraction.coeff.is_none() && fraction.numer.is_empty() && fraction.denom.is_empty() {
        return "0".to_string();
    }
    let coeff = fraction.coeff.unwrap_or_else(Rational::one);

    let mut numer: Vec<Expr> = Vec::new();
    if !coeff.numer().is_one() {
        numer.push(Expr::integer(coeff.numer().clone()));
    }
    numer.extend(fraction.numer);
    let mut denom: Vec<Expr> = Vec::new();
    if !coeff.denom().is_one() {
        denom.push(Expr::integer(coeff.denom().clone()));
    }
    denom.extend(fraction.denom);

    let body = if denom.is_empty() {
        match numer.len() {
            0 => "1".to_string(),
            1 if !fraction.negative => return tex(&numer[0], ctx),
            1 => tex(&numer[0], PRODUCT),
            _ => join_factors(&numer),
        }
    } else {
        format!("\\frac{{{}}}{{{}}}", frac_part(&numer), frac_part(&denom))
    };

    if fraction.negative {
        bracket(ctx, SUM, format!("- {body}"))
    } else {
        bracket(ctx, PRODUCT, body)
    }
}

fn frac_part(parts: &[Expr]) -> String {
    match parts {
        [] => "1".to_string(),
        [single] => tex(single, 0),
        _ => join_factors(parts),
    }
}

fn join_factors(parts: &[Expr]) -> String {
    let mut out = String::new();
    for part in parts {
        let text = tex(part, PRODUCT);
        if !out.is_empty() {
            let digit_run = out.ends_with(|c: char| c.is_ascii_digit())
                && text.starts_with(|c: char| c.is_ascii_digit());
            out.push_str(if digit_run { " \\cdot " } else { " " });
        }
        out.push_str(&text);
    }
    out
}

fn power_tex(base: &Expr, exp: &Expr, ctx: u8) -> String {
    if let Expr::Constant(e) = exp {
        if e.is_negative() {
            let flipped = if (-e).is_one() {
                base.clone()
            } else {
                Expr::Pow(base.clone().boxed(), Expr::Constant(-e).boxed())
            };
            return bracket(ctx, PRODUCT, format!("\\frac{{1}}{{{}}}", tex(&flipped, 0)));
        }
        if e.numer().is_one() && !e.is_integer() {
            let radicand = tex(base, 0);
            return if *e.denom() == BigInt::from(2) {
                format!("\\sqrt{{{radicand}}}")
            } else {
                format!("\\sqrt[{}]{{{radicand}}}", e.denom())
            };
        }
    }
    let base_text = match base {
        Expr::Pow(_, _) => format!("\\left({}\\right)", tex(base, 0)),
        other => tex(other, ATOM),
    };
    bracket(ctx, POWER, format!("{base_text}^{{{}}}", tex(exp, 0)))
}

fn split_neg(expr: &Expr) -> (bool, Expr) {
    match expr {
        Expr::Neg(inner) => {
            let (negative, body) = split_neg(inner);
            (!negative, body)
        }
        Expr::Constant(r) if r.is_negative() => (true, Expr::Constant(-r)),
        Expr::Mul(a, b) => {
            let (negative, head) = split_neg(a);
            if !negative {
                return (false, expr.clone());
            }
            if head.is_one() {
                (true, (**b).clone())
            } else {
                (true, Expr::Mul(head.boxed(), b.clone()))
            }
        }
        other => (false, other.clone()),
    }
}

fn rational_tex(r: &Rational) -> String {
    if r.is_integer() {
        return r.numer().to_string();
    }
    let magnitude = format!("\\frac{{{}}}{{{}}}", r.numer().abs(), r.denom());
    if r.is_negative() {
        format!("- {magnitude}")
    } else {
        magnitude
    }
}

fn bracket(ctx: u8, prec: u8, body: String) -> String {
    if prec < ctx {
        format!("\\left({body}\\right)")
    } else {
        body
    }
}
