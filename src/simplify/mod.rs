//! Symbolic simplification, expansion, and substitution utilities.

mod expand;
mod rules;
mod simplest;
mod substitute;

pub use expand::expand;
pub use rules::{
    ensure_defined, simplify, simplify_add, simplify_div, simplify_fully, simplify_mul,
    simplify_neg, simplify_pow, simplify_sub, simplify_with_limit,
};
pub use simplest::simplest_form;
pub use substitute::substitute;

pub(crate) use rules::{gather_factors, sum_of};
