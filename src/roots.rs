//! Exact real roots of rational polynomials, limited to what can be written
//! with rationals and a single square root.

use std::cmp::Ordering;

use crate::error::{CasError, Result};
use crate::expr::{Expr, Rational};
use crate::factor::factor_polynomial;
use crate::polynomial::Poly;
use crate::simplify::simplify_fully;
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, ToPrimitive, Zero};

/// Trial division for square factors stops here.
const MAX_SQUARE_TRIAL: u32 = 10_000;

/// `coeff * sqrt(radicand)` with `radicand > 1` and free of small square
/// factors.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Surd {
    pub coeff: Rational,
    pub radicand: BigInt,
}

/// A real number `rational + surd`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RealRoot {
    pub rational: Rational,
    pub surd: Option<Surd>,
}

impl RealRoot {
    pub fn rational(value: Rational) -> Self {
        RealRoot {
            rational: value,
            surd: None,
        }
    }

    /// `rational + coeff * sqrt(value)`, pulling square factors out of `value`.
    pub fn with_sqrt(rational: Rational, coeff: Rational, value: &Rational) -> Option<Self> {
        let (outside, radicand) = sqrt_parts(value)?;
        let coeff = coeff * outside;
        if coeff.is_zero() || radicand.is_one() {
            return Some(RealRoot::rational(rational + coeff));
        }
        Some(RealRoot {
            rational,
            surd: Some(Surd { coeff, radicand }),
        })
    }

    pub fn as_rational(&self) -> Option<&Rational> {
        match self.surd {
            None => Some(&self.rational),
            Some(_) => None,
        }
    }

    pub fn approx(&self) -> f64 {
        let base = to_f64(&self.rational);
        match &self.surd {
            None => base,
            Some(surd) => {
                let radicand = surd.radicand.to_f64().unwrap_or(f64::INFINITY);
                base + to_f64(&surd.coeff) * radicand.sqrt()
            }
        }
    }

    pub fn to_expr(&self) -> Expr {
        let rational = Expr::Constant(self.rational.clone());
        let Some(surd) = &self.surd else {
            return rational;
        };
        let root = Expr::Pow(
            Expr::integer(surd.radicand.clone()).boxed(),
            Expr::constant(1, 2).boxed(),
        );
        let term = Expr::Mul(Expr::Constant(surd.coeff.clone()).boxed(), root.boxed());
        simplify_fully(Expr::Add(rational.boxed(), term.boxed()))
    }

    /// A rational number strictly between `self` and `other`, assuming
    /// `self < other`.
    pub fn rational_between(&self, other: &RealRoot) -> Rational {
        if let (Some(a), Some(b)) = (self.as_rational(), other.as_rational()) {
            return (a + b) / Rational::from_integer(2.into());
        }
        let (low, high) = (self.approx(), other.approx());
        let mid = low + (high - low) / 2.0;
        Rational::from_float(mid).unwrap_or_else(Rational::zero)
    }

    /// A rational number below `self`.
    pub fn rational_below(&self) -> Rational {
        floor_rational(self.approx()) - Rational::one()
    }

    /// A rational number above `self`.
    pub fn rational_above(&self) -> Rational {
        floor_rational(self.approx()) + Rational::from_integer(2.into())
    }
}

impl PartialOrd for RealRoot {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RealRoot {
    fn cmp(&self, other: &Self) -> Ordering {
        if self == other {
            return Ordering::Equal;
        }
        let diff = &self.rational - &other.rational;
        match (&self.surd, &other.surd) {
            (None, None) => diff.cmp(&Rational::zero()),
            (Some(s), None) => sign_with_surd(&diff, &s.coeff, &s.radicand),
            (None, Some(o)) => sign_with_surd(&diff, &-o.coeff.clone(), &o.radicand),
            (Some(s), Some(o)) if s.radicand == o.radicand => {
                sign_with_surd(&diff, &(&s.coeff - &o.coeff), &s.radicand)
            }
            _ => self
                .approx()
                .partial_cmp(&other.approx())
                .unwrap_or(Ordering::Equal),
        }
    }
}

/// Sign of `u + v * sqrt(m)` for `m > 0`, computed exactly.
fn sign_with_surd(u: &Rational, v: &Rational, m: &BigInt) -> Ordering {
    let zero = Rational::zero();
    let su = u.cmp(&zero);
    let sv = v.cmp(&zero);
    if sv == Ordering::Equal {
        return su;
    }
    if su == Ordering::Equal || su == sv {
        return sv;
    }
    // Opposite signs: the larger magnitude wins.
    let u_sq = u * u;
    let v_sq = v * v * Rational::from_integer(m.clone());
    match u_sq.cmp(&v_sq) {
        Ordering::Greater => su,
        Ordering::Less => sv,
        Ordering::Equal => Ordering::Equal,
    }
}

fn to_f64(r: &Rational) -> f64 {
    match (r.numer().to_f64(), r.denom().to_f64()) {
        (Some(n), Some(d)) => n / d,
        _ => f64::NAN,
    }
}

fn floor_rational(value: f64) -> Rational {
    Rational::from_float(value.floor()).unwrap_or_else(Rational::zero)
}

/// `sqrt(r) = outside * sqrt(radicand)` with integer `radicand`, for `r >= 0`.
pub fn sqrt_parts(r: &Rational) -> Option<(Rational, BigInt)> {
    if r.is_negative() {
        return None;
    }
    if r.is_zero() {
        return Some((Rational::zero(), BigInt::one()));
    }
    // sqrt(p/q) = sqrt(p q) / q
    let mut rest = r.numer() * r.denom();
    let mut outside = BigInt::one();
    let mut p = 2u32;
    while p <= MAX_SQUARE_TRIAL {
        let square = BigInt::from(p) * BigInt::from(p);
        if square > rest {
            break;
        }
        while rest.is_multiple_of(&square) {
            rest /= &square;
            outside *= p;
        }
        p += 1;
    }
    let root = rest.sqrt();
    if &root * &root == rest {
        outside *= root;
        rest = BigInt::one();
    }
    Some((Rational::new(outside, r.denom().clone()), rest))
}

/// Distinct real roots of `poly`, ascending.
///
/// Fails when a factor of degree three or more has no rational root, since
/// such roots cannot be written in closed form here. The zero polynomial has
/// no finite root list and yields an empty one.
pub fn real_roots(poly: &Poly) -> Result<Vec<RealRoot>> {
    let mut roots = Vec::new();
    for factor in factor_polynomial(poly).factors {
        let p = &factor.poly;
        match p.degree() {
            None | Some(0) => {}
            Some(1) => roots.extend(p.linear_root().map(RealRoot::rational)),
            Some(2) => roots.extend(quadratic_roots(p)),
            Some(n) => {
                return Err(CasError::Unsupported(format!(
                    "cannot solve irreducible factor of degree {n}"
                )));
            }
        }
    }
    roots.sort();
    roots.dedup();
    Ok(roots)
}

fn quadratic_roots(p: &Poly) -> Vec<RealRoot> {
    let (a, b, c) = (p.coeff(2), p.coeff(1), p.coeff(0));
    let four = Rational::from_integer(4.into());
    let discriminant = &b * &b - four * &a * &c;
    if discriminant.is_negative() {
        return Vec::new();
    }
    let two_a = Rational::from_integer(2.into()) * &a;
    let center = -&b / &two_a;
    let half_width = two_a.recip();
    let mut roots: Vec<RealRoot> = [-half_width.clone(), half_width]
        .into_iter()
        .filter_map(|sign| RealRoot::with_sqrt(center.clone(), sign, &discriminant))
        .collect();
    roots.sort();
    roots.dedup();
    roots
}
