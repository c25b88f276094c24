use crate::error::{CasError, Result};
use crate::expr::{Expr, Rational, zero};
use crate::relation::RelationOp;
use crate::simplify::{
    ensure_defined, gather_factors, simplify_div, simplify_fully, simplify_neg, substitute, sum_of,
};
use num_traits::{One, Signed, Zero};

/// Result of the coefficient-based inequality method.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LinearOutcome {
    /// `var op boundary`, with `op` already flipped for a negative coefficient.
    Boundary { op: RelationOp, boundary: Expr },
    AllReals,
    NoSolution,
}

struct LinearDecomposition {
    coeff: Rational,
    rest: Vec<Expr>,
    nonlinear: Vec<Expr>,
}

/// Split `expr` into `coeff * var + rest` when it is affine in `var` with a
/// rational coefficient. `rest` is simplified and free of `var`.
pub fn linear_parts(expr: &Expr, var: &str) -> Option<(Rational, Expr)> {
    let decomposition = decompose_linear(expr, var);
    if !decomposition.nonlinear.is_empty() {
        return None;
    }
    Some((decomposition.coeff, simplify_fully(sum_of(decomposition.rest))))
}

/// Solve `expr op 0` from the degree-one coefficient of `var` and the value of
/// `expr` at `var = 0`.
///
/// Only sound for expressions affine in `var`: terms of any other degree in
/// `var` are not looked at. Fails when the coefficient is not a number, or
/// when it is zero and the constant part is not a number either.
pub fn solve_linear_inequality(expr: &Expr, op: RelationOp, var: &str) -> Result<LinearOutcome> {
    let decomposition = decompose_linear(expr, var);
    if let Some(term) = decomposition
        .nonlinear
        .iter()
        .find(|term| has_symbolic_coefficient(term, var))
    {
        return Err(CasError::Unsupported(format!(
            "coefficient of {var} in {term} is not a number"
        )));
    }

    let at_zero = substitute(expr, var, &zero());
    ensure_defined(&at_zero)?;
    let constant = simplify_fully(at_zero);
    let coeff = decomposition.coeff;

    if !coeff.is_zero() {
        let op = if coeff.is_negative() { op.flipped() } else { op };
        let boundary = simplify_fully(simplify_div(simplify_neg(constant), Expr::Constant(coeff)));
        return Ok(LinearOutcome::Boundary { op, boundary });
    }

    let value = constant.as_constant().ok_or_else(|| {
        CasError::Unsupported(format!("cannot decide whether {constant} {op} 0"))
    })?;
    if op.holds_against_zero(value) {
        Ok(LinearOutcome::AllReals)
    } else {
        Ok(LinearOutcome::NoSolution)
    }
}

fn decompose_linear(expr: &Expr, var: &str) -> LinearDecomposition {
    let mut decomposition = LinearDecomposition {
        coeff: Rational::zero(),
        rest: Vec::new(),
        nonlinear: Vec::new(),
    };
    collect_linear_terms(expr, Rational::one(), &mut decomposition, var);
    decomposition
}

fn collect_linear_terms(expr: &Expr, scale: Rational, out: &mut LinearDecomposition, var: &str) {
    match expr {
        Expr::Constant(c) => out.rest.push(Expr::Constant(scale * c)),
        Expr::Variable(name) if name == var => out.coeff += scale,
        Expr::Add(a, b) => {
            collect_linear_terms(a, scale.clone(), out, var);
            collect_linear_terms(b, scale, out, var);
        }
        Expr::Sub(a, b) => {
            collect_linear_terms(a, scale.clone(), out, var);
            collect_linear_terms(b, -scale, out, var);
        }
        Expr::Neg(a) => collect_linear_terms(a, -scale, out, var),
        Expr::Mul(a, b) => {
            if let Some(c) = a.as_constant() {
                collect_linear_terms(b, scale * c, out, var);
            } else if let Some(c) = b.as_constant() {
                collect_linear_terms(a, scale * c, out, var);
            } else {
                push_term(expr, scale, out, var);
            }
        }
        Expr::Div(a, b) => match b.as_constant() {
            Some(c) if !c.is_zero() => collect_linear_terms(a, scale / c, out, var),
            _ => push_term(expr, scale, out, var),
        },
        _ => push_term(expr, scale, out, var),
    }
}

fn push_term(expr: &Expr, scale: Rational, out: &mut LinearDecomposition, var: &str) {
    let term = if scale.is_one() {
        expr.clone()
    } else {
        Expr::Mul(Expr::Constant(scale).boxed(), expr.clone().boxed())
    };
    if expr.contains_var(var) {
        out.nonlinear.push(term);
    } else {
        out.rest.push(term);
    }
}

// `y * x`: degree one in `var`, but with a coefficient that is not a number.
fn has_symbolic_coefficient(term: &Expr, var: &str) -> bool {
    let mut coeff = Rational::one();
    let mut factors = Vec::new();
    gather_factors(term.clone(), &mut coeff, &mut factors);
    let (with_var, without_var): (Vec<&Expr>, Vec<&Expr>) =
        factors.iter().partition(|f| f.contains_var(var));
    matches!(with_var.as_slice(), [Expr::Variable(v)] if v == var) && !without_var.is_empty()
}
