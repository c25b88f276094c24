//! Formatting helpers for rendering expressions and solver output.

pub mod expr;
pub mod latex;
pub mod solution;

pub use expr::pretty;
pub use latex::latex;
pub use solution::{root_latex, roots_latex, solution_set_latex};
