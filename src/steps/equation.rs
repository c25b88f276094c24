use tracing::warn;

use super::{ALL_REAL_NUMBERS, NO_SOLUTION, Solution, StepLog, UNABLE_TO_SOLVE, math, sympify};
use crate::error::Result;
use crate::expr::VARIABLE;
use crate::factor::factor_expr;
use crate::format::{latex, roots_latex};
use crate::simplify::{expand, simplify_sub};
use crate::solver::solve_equation;

/// Rearrange `left = right` to `expr = 0`, expand, show a factored form, and
/// solve the expanded expression.
///
/// The solution is always wrapped in `$...$`, including `$Unable to solve$`
/// when the solver fails and `$No solution$` or `$All real numbers$` when no
/// root is found.
pub(super) fn solve(left: &str, right: &str) -> Result<Solution> {
    let mut steps = StepLog::new();
    let left = sympify(left)?;
    let right = sympify(right)?;
    steps.push(format!(
        "Original equation: {}",
        math(&format!("{} = {}", latex(&left), latex(&right)))
    ));

    let mut expr = simplify_sub(left, right);
    steps.push(format!(
        "Rearranging to standard form: {}",
        math(&format!("{} = 0", latex(&expr)))
    ));

    let expanded = expand(expr.clone());
    if expanded != expr {
        steps.push(format!(
            "Expanding: {}",
            math(&format!("{} = 0", latex(&expanded)))
        ));
        expr = expanded;
    }

    // Shown for the reader only; the expanded form is what gets solved.
    if let Some(factored) = factor_expr(&expr, VARIABLE) {
        if factored != expr {
            steps.push(format!(
                "Factoring: {}",
                math(&format!("{} = 0", latex(&factored)))
            ));
        }
    }

    let solved = match solve_equation(&expr, VARIABLE) {
        Ok(solved) => solved,
        Err(error) => {
            warn!(%error, "equation solver failed");
            steps.push(format!("Error in solving: {error}"));
            return Ok(Solution::new(math(UNABLE_TO_SOLVE), steps));
        }
    };

    steps.push(format!(
        "Equation type: {} equation in {}",
        solved.kind,
        math(VARIABLE)
    ));
    let solution = if solved.roots.is_empty() {
        let sentinel = if solved.identity {
            ALL_REAL_NUMBERS
        } else {
            NO_SOLUTION
        };
        math(sentinel)
    } else {
        math(&roots_latex(VARIABLE, "=", &solved.roots))
    };
    steps.push(format!("Solution: {solution}"));
    Ok(Solution::new(solution, steps))
}
