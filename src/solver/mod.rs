//! Equation and inequality solving in a single variable.

mod inequality;
mod linear;

use std::fmt;

use tracing::trace;

use crate::error::{CasError, Result};
use crate::expr::Expr;
use crate::polynomial::{Poly, RationalFunction};
use crate::roots::{RealRoot, real_roots};
use crate::simplify::{simplify_div, simplify_fully, simplify_neg};
use num_traits::Zero;

pub use inequality::{Bound, Interval, SolutionSet, solve_univariate_inequality};
pub use linear::{LinearOutcome, linear_parts, solve_linear_inequality};

/// Shape of `expr = 0`, used to describe the equation in the step log.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EquationKind {
    Constant,
    Polynomial(usize),
    Rational,
}

impl fmt::Display for EquationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EquationKind::Constant => f.write_str("constant"),
            EquationKind::Polynomial(1) => f.write_str("linear"),
            EquationKind::Polynomial(2) => f.write_str("quadratic"),
            EquationKind::Polynomial(3) => f.write_str("cubic"),
            EquationKind::Polynomial(n) => write!(f, "polynomial of degree {n}"),
            EquationKind::Rational => f.write_str("rational"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Root {
    Real(RealRoot),
    /// Root of an equation linear in the variable whose other terms mention
    /// further symbols.
    Symbolic(Expr),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EquationSolution {
    pub kind: EquationKind,
    pub roots: Vec<Root>,
    /// `expr` is identically zero, so every value of the variable satisfies it.
    pub identity: bool,
}

/// Solve `expr = 0` for `var` over the reals.
///
/// Rational functions are solved exactly through their numerator; points
/// where the denominator vanishes are never reported. An expression that is
/// linear in `var` with rational coefficient is also accepted when its other
/// terms involve further symbols.
pub fn solve_equation(expr: &Expr, var: &str) -> Result<EquationSolution> {
    if !expr.contains_var(var) {
        return Ok(EquationSolution {
            kind: EquationKind::Constant,
            roots: Vec::new(),
            identity: expr.is_zero(),
        });
    }

    if let Some(rf) = RationalFunction::from_expr(expr, var) {
        return solve_rational(&rf);
    }

    if let Some((coeff, rest)) = linear_parts(expr, var) {
        if !coeff.is_zero() {
            let root = simplify_div(simplify_neg(rest), Expr::Constant(coeff));
            trace!(root = %root, "symbolic linear root");
            return Ok(EquationSolution {
                kind: EquationKind::Polynomial(1),
                roots: vec![Root::Symbolic(simplify_fully(root))],
                identity: false,
            });
        }
    }

    Err(CasError::Unsupported(format!(
        "cannot solve {expr} = 0 for {var}"
    )))
}

fn solve_rational(rf: &RationalFunction) -> Result<EquationSolution> {
    let kind = if rf.is_polynomial() {
        match rf.num.degree() {
            None | Some(0) => EquationKind::Constant,
            Some(n) => EquationKind::Polynomial(n),
        }
    } else {
        EquationKind::Rational
    };

    if rf.num.is_zero() {
        return Ok(EquationSolution {
            kind,
            roots: Vec::new(),
            identity: true,
        });
    }

    let excluded = if rf.is_polynomial() {
        Vec::new()
    } else {
        real_roots(&Poly::gcd(&rf.num, &rf.den))?
    };
    let roots = real_roots(&rf.num)?
        .into_iter()
        .filter(|root| !excluded.contains(root))
        .map(Root::Real)
        .collect();

    Ok(EquationSolution {
        kind,
        roots,
        identity: false,
    })
}
