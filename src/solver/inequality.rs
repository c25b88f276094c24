use tracing::trace;

use crate::error::{CasError, Result};
use crate::expr::{Expr, Rational};
use crate::polynomial::RationalFunction;
use crate::relation::RelationOp;
use crate::roots::{RealRoot, real_roots};
use num_traits::Zero;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Bound {
    Unbounded,
    Open(RealRoot),
    Closed(RealRoot),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Interval {
    pub lower: Bound,
    pub upper: Bound,
}

impl Interval {
    pub fn everything() -> Self {
        Interval {
            lower: Bound::Unbounded,
            upper: Bound::Unbounded,
        }
    }

    pub fn is_point(&self) -> bool {
        matches!((&self.lower, &self.upper), (Bound::Closed(a), Bound::Closed(b)) if a == b)
    }

    pub fn contains(&self, value: &RealRoot) -> bool {
        let above = match &self.lower {
            Bound::Unbounded => true,
            Bound::Open(a) => value > a,
            Bound::Closed(a) => value >= a,
        };
        let below = match &self.upper {
            Bound::Unbounded => true,
            Bound::Open(b) => value < b,
            Bound::Closed(b) => value <= b,
        };
        above && below
    }
}

/// Disjoint intervals in ascending order.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct SolutionSet {
    pub intervals: Vec<Interval>,
}

impl SolutionSet {
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    pub fn is_everything(&self) -> bool {
        matches!(self.intervals.as_slice(), [only] if *only == Interval::everything())
    }

    pub fn contains(&self, value: &Rational) -> bool {
        let value = RealRoot::rational(value.clone());
        self.intervals.iter().any(|interval| interval.contains(&value))
    }
}

struct CriticalPoint {
    root: RealRoot,
    pole: bool,
}

/// Solve `expr op 0` over the reals with a sign chart.
///
/// The real roots of numerator and denominator split the line into open
/// regions, each tested at one rational point. Numerator roots are included
/// for non-strict operators; denominator roots never are.
pub fn solve_univariate_inequality(expr: &Expr, op: RelationOp, var: &str) -> Result<SolutionSet> {
    if !expr.contains_var(var) {
        return Err(CasError::NoVariable(expr.to_string()));
    }
    let rf = RationalFunction::from_expr(expr, var).ok_or_else(|| {
        CasError::Unsupported(format!("{expr} is not a rational function of {var}"))
    })?;

    let points = critical_points(&rf)?;
    trace!(count = points.len(), "sign chart critical points");

    let sign_at = |t: &Rational| {
        let num = rf.num.evaluate(t);
        let den = rf.den.evaluate(t);
        (num * den).cmp(&Rational::zero())
    };

    let mut test_points = Vec::with_capacity(points.len() + 1);
    match (points.first(), points.last()) {
        (Some(first), Some(last)) => {
            test_points.push(first.root.rational_below());
            for pair in points.windows(2) {
                test_points.push(pair[0].root.rational_between(&pair[1].root));
            }
            test_points.push(last.root.rational_above());
        }
        _ => test_points.push(Rational::zero()),
    }
    let regions: Vec<bool> = test_points.iter().map(|t| op.accepts(sign_at(t))).collect();
    let at_points: Vec<bool> = points
        .iter()
        .map(|p| !p.pole && !op.is_strict())
        .collect();

    Ok(assemble(&points, &regions, &at_points))
}

fn critical_points(rf: &RationalFunction) -> Result<Vec<CriticalPoint>> {
    let mut points: Vec<CriticalPoint> = real_roots(&rf.den)?
        .into_iter()
        .map(|root| CriticalPoint { root, pole: true })
        .collect();
    for root in real_roots(&rf.num)? {
        if !points.iter().any(|p| p.root == root) {
            points.push(CriticalPoint { root, pole: false });
        }
    }
    points.sort_by(|a, b| a.root.cmp(&b.root));
    Ok(points)
}

// Walk region 0, point 0, region 1, ..., region n and merge included runs.
fn assemble(points: &[CriticalPoint], regions: &[bool], at_points: &[bool]) -> SolutionSet {
    let mut intervals = Vec::new();
    let mut start: Option<Bound> = None;

    for (i, &region_in) in regions.iter().enumerate() {
        if region_in {
            if start.is_none() {
                start = Some(match i {
                    0 => Bound::Unbounded,
                    _ => Bound::Open(points[i - 1].root.clone()),
                });
            }
        } else if let Some(lower) = start.take() {
            intervals.push(Interval {
                lower,
                upper: Bound::Closed(points[i - 1].root.clone()),
            });
        }

        let Some(point) = points.get(i) else {
            continue;
        };
        if at_points[i] {
            if start.is_none() {
                start = Some(Bound::Closed(point.root.clone()));
            }
        } else if let Some(lower) = start.take() {
            intervals.push(Interval {
                lower,
                upper: Bound::Open(point.root.clone()),
            });
        }
    }

    if let Some(lower) = start {
        intervals.push(Interval {
            lower,
            upper: Bound::Unbounded,
        });
    }

    SolutionSet { intervals }
}
