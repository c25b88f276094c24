//! LaTeX for roots and solution sets.

use crate::expr::{Expr, Rational};
use crate::format::latex;
use crate::roots::RealRoot;
use crate::solver::{Bound, Interval, Root, SolutionSet};
use num_traits::{One, Signed, Zero};

/// `p + q \sqrt{d}` in the usual textbook shape, e.g. `1 - \sqrt{2}` or
/// `- \frac{1}{2} + \frac{\sqrt{5}}{2}`.
pub fn root_latex(root: &Root) -> String {
    match root {
        Root::Real(real) => real_root_latex(real),
        Root::Symbolic(expr) => latex(expr),
    }
}

/// `x = a, x = b` style listing, with `relation` between the variable and
/// each root.
pub fn roots_latex(var: &str, relation: &str, roots: &[Root]) -> String {
    roots
        .iter()
        .map(|root| format!("{var} {relation} {}", root_latex(root)))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn solution_set_latex(var: &str, set: &SolutionSet) -> String {
    if set.is_empty() {
        return "\\text{False}".to_string();
    }
    if set.is_everything() {
        return "\\text{True}".to_string();
    }
    let several = set.intervals.len() > 1;
    set.intervals
        .iter()
        .map(|interval| {
            let text = interval_latex(var, interval);
            if several && text.contains("\\wedge") {
                format!("\\left({text}\\right)")
            } else {
                text
            }
        })
        .collect::<Vec<_>>()
        .join(" \\vee ")
}

fn interval_latex(var: &str, interval: &Interval) -> String {
    if interval.is_point() {
        if let Bound::Closed(point) = &interval.lower {
            return format!("{var} = {}", real_root_latex(point));
        }
    }
    let lower = match &interval.lower {
        Bound::Unbounded => None,
        Bound::Open(a) => Some((a, "<", ">")),
        Bound::Closed(a) => Some((a, "\\leq", "\\geq")),
    };
    let upper = match &interval.upper {
        Bound::Unbounded => None,
        Bound::Open(b) => Some((b, "<")),
        Bound::Closed(b) => Some((b, "\\leq")),
    };
    match (lower, upper) {
        (None, None) => "\\text{True}".to_string(),
        (Some((a, _, rel)), None) => format!("{var} {rel} {}", real_root_latex(a)),
        (None, Some((b, rel))) => format!("{var} {rel} {}", real_root_latex(b)),
        (Some((a, lower_rel, _)), Some((b, upper_rel))) => format!(
            "{} {lower_rel} {var} \\wedge {var} {upper_rel} {}",
            real_root_latex(a),
            real_root_latex(b)
        ),
    }
}

fn real_root_latex(root: &RealRoot) -> String {
    let Some(surd) = &root.surd else {
        return latex(&Expr::Constant(root.rational.clone()));
    };

    let magnitude = surd_magnitude(&surd.coeff.abs(), &surd.radicand.to_string());
    let negative = surd.coeff.is_negative();
    if root.rational.is_zero() {
        return if negative {
            format!("- {magnitude}")
        } else {
            magnitude
        };
    }
    let rational = latex(&Expr::Constant(root.rational.clone()));
    let sign = if negative { "-" } else { "+" };
    format!("{rational} {sign} {magnitude}")
}

fn surd_magnitude(coeff: &Rational, radicand: &str) -> String {
    let sqrt = format!("\\sqrt{{{radicand}}}");
    let numer = if coeff.numer().is_one() {
        sqrt
    } else {
        format!("{} {sqrt}", coeff.numer())
    };
    if coeff.denom().is_one() {
        numer
    } else {
        format!("\\frac{{{numer}}}{{{}}}", coeff.denom())
    }
}
