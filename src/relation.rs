//! Relational operators and the textual classification of solver input.

use std::cmp::Ordering;
use std::fmt;

use num_traits::Zero;

use crate::error::{CasError, Result};
use crate::expr::Rational;

/// Operators that turn the input into an inequality.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RelationOp {
    Gt,
    Ge,
    Lt,
    Le,
    Ne,
}

impl RelationOp {
    /// Order in which the operator literals are searched for. The first literal
    /// present anywhere in the text wins, regardless of where it occurs.
    pub const SCAN_ORDER: [RelationOp; 5] = [
        RelationOp::Ge,
        RelationOp::Le,
        RelationOp::Gt,
        RelationOp::Lt,
        RelationOp::Ne,
    ];

    pub fn symbol(self) -> &'static str {
        match self {
            RelationOp::Gt => ">",
            RelationOp::Ge => ">=",
            RelationOp::Lt => "<",
            RelationOp::Le => "<=",
            RelationOp::Ne => "!=",
        }
    }

    pub fn latex(self) -> &'static str {
        match self {
            RelationOp::Gt => ">",
            RelationOp::Ge => "\\geq",
            RelationOp::Lt => "<",
            RelationOp::Le => "\\leq",
            RelationOp::Ne => "\\neq",
        }
    }

    /// The operator obtained when both sides are divided by a negative number.
    pub fn flipped(self) -> RelationOp {
        match self {
            RelationOp::Gt => RelationOp::Lt,
            RelationOp::Ge => RelationOp::Le,
            RelationOp::Lt => RelationOp::Gt,
            RelationOp::Le => RelationOp::Ge,
            RelationOp::Ne => RelationOp::Ne,
        }
    }

    pub fn is_strict(self) -> bool {
        matches!(self, RelationOp::Gt | RelationOp::Lt | RelationOp::Ne)
    }

    /// Whether `lhs OP rhs` holds for concrete values.
    pub fn holds(self, lhs: &Rational, rhs: &Rational) -> bool {
        self.accepts(lhs.cmp(rhs))
    }

    /// Whether `value OP 0` holds.
    pub fn holds_against_zero(self, value: &Rational) -> bool {
        self.holds(value, &Rational::zero())
    }

    /// Whether the comparison outcome `lhs.cmp(rhs)` satisfies the operator.
    pub fn accepts(self, ordering: Ordering) -> bool {
        match self {
            RelationOp::Gt => ordering == Ordering::Greater,
            RelationOp::Ge => ordering != Ordering::Less,
            RelationOp::Lt => ordering == Ordering::Less,
            RelationOp::Le => ordering != Ordering::Greater,
            RelationOp::Ne => ordering != Ordering::Equal,
        }
    }
}

impl fmt::Display for RelationOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RelationKind {
    Equation,
    Inequality(RelationOp),
    Expression,
}

/// Normalized input split at its relational operator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Classified<'a> {
    Equation { left: &'a str, right: &'a str },
    Inequality { left: &'a str, op: RelationOp, right: &'a str },
    Expression(&'a str),
}

impl Classified<'_> {
    pub fn kind(&self) -> RelationKind {
        match self {
            Classified::Equation { .. } => RelationKind::Equation,
            Classified::Inequality { op, .. } => RelationKind::Inequality(*op),
            Classified::Expression(_) => RelationKind::Expression,
        }
    }
}

/// Decide which solver handles `text`.
///
/// Inequality literals are checked first, in [`RelationOp::SCAN_ORDER`], and
/// the text is split at the first occurrence of the winning literal. Otherwise
/// a `=` makes it an equation, which must have exactly two sides.
pub fn classify(text: &str) -> Result<Classified<'_>> {
    for op in RelationOp::SCAN_ORDER {
        if let Some((left, right)) = text.split_once(op.symbol()) {
            return Ok(Classified::Inequality { left, op, right });
        }
    }

    if text.contains('=') {
        let mut sides = text.split('=');
        return match (sides.next(), sides.next(), sides.next()) {
            (Some(left), Some(right), None) => Ok(Classified::Equation { left, right }),
            _ => Err(CasError::Parse(format!(
                "expected exactly one '=' in `{}`",
                text.trim()
            ))),
        };
    }

    Ok(Classified::Expression(text))
}
