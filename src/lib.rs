//! Step-by-step solving of single-variable equations, inequalities and
//! expressions, with exact rational arithmetic and LaTeX output.

pub mod api;
pub mod config;
pub mod error;
pub mod expr;
pub mod factor;
pub mod format;
pub mod parser;
pub mod polynomial;
pub mod preprocess;
pub mod relation;
pub mod roots;
pub mod simplify;
pub mod solver;
pub mod steps;

pub use api::{Answer, Question, answer};
pub use config::Config;
pub use error::{CasError, Result};
pub use expr::{Expr, Rational, VARIABLE, add, div, mul, neg, one, pow, rational, sub, zero};
pub use factor::{Factor, Factorization, factor_expr, factor_polynomial};
pub use format::{latex, pretty};
pub use parser::parse_expr;
pub use polynomial::{Poly, RationalFunction};
pub use preprocess::normalize;
pub use relation::{Classified, RelationKind, RelationOp, classify};
pub use roots::{RealRoot, real_roots};
pub use simplify::{ensure_defined, expand, simplest_form, simplify, simplify_fully, substitute};
pub use solver::{
    EquationKind, EquationSolution, LinearOutcome, Root, SolutionSet, solve_equation,
    solve_linear_inequality, solve_univariate_inequality,
};
pub use steps::{Solution, StepLog, solve_with_steps};
