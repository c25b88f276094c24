//! Stepwise solving of free-text input.
//!
//! [`solve_with_steps`] normalizes the text, decides whether it is an
//! equation, an inequality or a bare expression, and hands it to the matching
//! solver. Every solver returns a [`Solution`] whose [`StepLog`] explains how
//! the answer was reached. Failures never escape: they end up as text in the
//! returned solution.

mod equation;
mod expression;
mod inequality;

use tracing::{debug, warn};

use crate::error::{CasError, Result};
use crate::expr::Expr;
use crate::parser::parse_expr;
use crate::preprocess::normalize;
use crate::relation::{Classified, classify};
use crate::simplify::{ensure_defined, simplify_fully};

pub const ALL_REAL_NUMBERS: &str = "All real numbers";
pub const NO_SOLUTION: &str = "No solution";
pub const UNABLE_TO_SOLVE: &str = "Unable to solve";

/// Ordered, append-only explanation of a derivation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StepLog {
    entries: Vec<String>,
}

impl StepLog {
    pub fn new() -> Self {
        StepLog::default()
    }

    pub fn push(&mut self, entry: impl Into<String>) {
        let entry = entry.into();
        debug!(step = self.entries.len() + 1, "{entry}");
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries joined with newlines, the form handed to transport layers.
    pub fn joined(&self) -> String {
        self.entries.join("\n")
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Solution {
    pub solution: String,
    pub steps: StepLog,
}

impl Solution {
    fn new(solution: impl Into<String>, steps: StepLog) -> Self {
        Solution {
            solution: solution.into(),
            steps,
        }
    }

    fn failure(error: &CasError) -> Self {
        let mut steps = StepLog::new();
        steps.push(format!("Error solving equation: {error}"));
        Solution::new(format!("Error: {error}"), steps)
    }

    /// Whether the solution is one of the sentinel phrases, bare or wrapped in
    /// `$...$` as the equation path returns them.
    pub fn is_sentinel(&self) -> bool {
        let text = self.solution.as_str();
        let bare = text
            .strip_prefix('$')
            .and_then(|t| t.strip_suffix('$'))
            .unwrap_or(text);
        [ALL_REAL_NUMBERS, NO_SOLUTION, UNABLE_TO_SOLVE].contains(&bare)
    }
}

/// Solve or simplify `text`, explaining each step.
///
/// Never fails: errors are reported inside the returned [`Solution`], with
/// `solution` starting with `Error:`.
pub fn solve_with_steps(text: &str) -> Solution {
    match dispatch(text) {
        Ok(solution) => solution,
        Err(error) => {
            warn!(input = text, %error, "could not solve input");
            Solution::failure(&error)
        }
    }
}

fn dispatch(text: &str) -> Result<Solution> {
    let normalized = normalize(text);
    let classified = classify(&normalized)?;
    debug!(kind = ?classified.kind(), input = %normalized, "classified input");
    match classified {
        Classified::Equation { left, right } => equation::solve(left, right),
        Classified::Inequality { left, op, right } => inequality::solve(left, op, right),
        Classified::Expression(text) => expression::simplify(text),
    }
}

/// Parse and auto-simplify one side of the input, rejecting zero
/// denominators.
pub fn sympify(text: &str) -> Result<Expr> {
    let expr = parse_expr(text)?;
    ensure_defined(&expr)?;
    Ok(simplify_fully(expr))
}

/// Wrap a LaTeX fragment in inline math delimiters.
pub fn math(latex: &str) -> String {
    format!("${latex}$")
}
