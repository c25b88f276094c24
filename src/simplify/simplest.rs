use crate::expr::Expr;
use crate::factor::factor_expr;
use crate::polynomial::RationalFunction;
use crate::simplify::{expand, simplify_fully};

/// The smallest of several equivalent forms of `expr`: auto-simplified,
/// expanded, cancelled as a rational function, and factored. Ties keep the
/// earlier candidate.
pub fn simplest_form(expr: &Expr) -> Expr {
    let base = simplify_fully(expr.clone());
    let mut candidates = vec![expand(base.clone())];

    let vars = base.free_variables();
    if let (Some(var), 1) = (vars.iter().next(), vars.len()) {
        if let Some(rf) = RationalFunction::from_expr(&base, var) {
            candidates.push(rf.reduced().to_expr(var));
        }
        if let Some(factored) = factor_expr(&base, var) {
            candidates.push(factored);
        }
    }

    candidates
        .into_iter()
        .fold(base, |best, candidate| {
            if candidate.size() < best.size() {
                candidate
            } else {
                best
            }
        })
}
