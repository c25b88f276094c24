use tracing::warn;

use super::{ALL_REAL_NUMBERS, NO_SOLUTION, Solution, StepLog, UNABLE_TO_SOLVE, math, sympify};
use crate::error::Result;
use crate::expr::{Expr, VARIABLE};
use crate::format::{latex, roots_latex, solution_set_latex};
use crate::relation::RelationOp;
use crate::simplify::simplify_sub;
use crate::solver::{
    LinearOutcome, solve_equation, solve_linear_inequality, solve_univariate_inequality,
};

pub(super) fn solve(left: &str, op: RelationOp, right: &str) -> Result<Solution> {
    let mut steps = StepLog::new();
    let left = sympify(left)?;
    let right = sympify(right)?;
    steps.push(format!(
        "Original inequality: {}",
        math(&format!("{} {} {}", latex(&left), op.latex(), latex(&right)))
    ));

    let expr = simplify_sub(left, right);
    steps.push(format!(
        "Rearranging to standard form: {}",
        math(&format!("{} {} 0", latex(&expr), op.latex()))
    ));

    if op == RelationOp::Ne {
        return not_equal(&expr, steps);
    }

    match solve_univariate_inequality(&expr, op, VARIABLE) {
        Ok(set) => {
            let solution = math(&solution_set_latex(VARIABLE, &set));
            steps.push(format!("Solution: {solution}"));
            Ok(Solution::new(solution, steps))
        }
        Err(error) => {
            warn!(%error, "inequality solver failed, trying the linear method");
            steps.push(format!("Error solving inequality: {error}"));
            Ok(manual(&expr, op, steps))
        }
    }
}

// `expr != 0` holds everywhere except at the roots of `expr`.
fn not_equal(expr: &Expr, mut steps: StepLog) -> Result<Solution> {
    let solved = solve_equation(expr, VARIABLE)?;
    let solution = if !solved.roots.is_empty() {
        math(&roots_latex(VARIABLE, RelationOp::Ne.latex(), &solved.roots))
    } else if solved.identity {
        NO_SOLUTION.to_string()
    } else {
        ALL_REAL_NUMBERS.to_string()
    };
    steps.push(format!("Solution: {solution}"));
    Ok(Solution::new(solution, steps))
}

fn manual(expr: &Expr, op: RelationOp, mut steps: StepLog) -> Solution {
    let solution = match solve_linear_inequality(expr, op, VARIABLE) {
        Ok(LinearOutcome::Boundary { op, boundary }) => {
            let text = math(&format!("{VARIABLE} {} {}", op.latex(), latex(&boundary)));
            steps.push(format!("Manual solution: {text}"));
            text
        }
        Ok(LinearOutcome::AllReals) => {
            steps.push(format!("Solution: {ALL_REAL_NUMBERS}"));
            ALL_REAL_NUMBERS.to_string()
        }
        Ok(LinearOutcome::NoSolution) => {
            steps.push(format!("Solution: {NO_SOLUTION}"));
            NO_SOLUTION.to_string()
        }
        Err(error) => {
            warn!(%error, "linear method failed");
            steps.push(format!("Manual method failed: {error}"));
            steps.push(format!("Solution: {UNABLE_TO_SOLVE}"));
            UNABLE_TO_SOLVE.to_string()
        }
    };
    Solution::new(solution, steps)
}
