use super::{Solution, StepLog, math, sympify};
use crate::error::Result;
use crate::format::latex;
use crate::simplify::simplest_form;

pub(super) fn simplify(text: &str) -> Result<Solution> {
    let expr = sympify(text)?;
    let simplest = simplest_form(&expr);
    let result = math(&latex(&simplest));

    let mut steps = StepLog::new();
    steps.push(format!(
        "Simplifying expression: {} gives {result}",
        math(&latex(&expr))
    ));
    Ok(Solution::new(result, steps))
}
