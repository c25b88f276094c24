//! Rewrites informal algebra text into something [`crate::parser`] accepts.

use once_cell::sync::Lazy;
use regex::Regex;

/// `2x`, `(x+1)y` and `x(y+1)`, applied in this order.
static IMPLICIT_PRODUCTS: Lazy<[Regex; 3]> = Lazy::new(|| {
    [
        r"([0-9])([a-zA-Z])",
        r"(\))([a-zA-Z0-9])",
        r"([a-zA-Z0-9])(\()",
    ]
    .map(|pattern| Regex::new(pattern).expect("implicit product pattern is valid"))
});

/// Make implicit multiplication explicit.
///
/// A `*` is inserted between a digit and a following letter (`2x`), between a
/// closing parenthesis and a following letter or digit (`(x+1)y`), and between
/// a letter or digit and a following opening parenthesis (`x(y+1)`). Nothing
/// else is touched, so the function is total and idempotent.
pub fn normalize(text: &str) -> String {
    IMPLICIT_PRODUCTS
        .iter()
        .fold(text.to_string(), |acc, pattern| {
            pattern.replace_all(&acc, "${1}*${2}").into_owned()
        })
}
