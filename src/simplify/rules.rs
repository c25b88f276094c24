use std::cmp::Reverse;
use std::collections::HashMap;

use crate::error::{CasError, Result};
use crate::expr::{Expr, Rational, one, zero};
use crate::roots::sqrt_parts;
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, ToPrimitive, Zero};

/// Integer powers of constants beyond this stay unevaluated.
const MAX_CONSTANT_EXPONENT: u32 = 1024;

/// Largest root index tried when evaluating `c^(p/q)` exactly.
const MAX_ROOT_INDEX: u32 = 64;

#[derive(Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
struct CanonKey(Vec<Expr>);

/// One bottom-up evaluation pass: folds constants, collects like terms and
/// merges equal bases in products. Sums are only distributed over by a bare
/// numeric coefficient, so `2*(x+1)` becomes `2*x + 2` but `x*(x+1)` is kept.
pub fn simplify(expr: Expr) -> Expr {
    let mut cache = HashMap::new();
    simplify_cached(expr, &mut cache)
}

fn simplify_cached(expr: Expr, cache: &mut HashMap<Expr, Expr>) -> Expr {
    if let Some(hit) = cache.get(&expr) {
        return hit.clone();
    }

    let key = expr.clone();
    let result = match expr {
        Expr::Add(a, b) => simplify_add(simplify_cached(*a, cache), simplify_cached(*b, cache)),
        Expr::Sub(a, b) => simplify_sub(simplify_cached(*a, cache), simplify_cached(*b, cache)),
        Expr::Mul(a, b) => simplify_mul(simplify_cached(*a, cache), simplify_cached(*b, cache)),
        Expr::Div(a, b) => simplify_div(simplify_cached(*a, cache), simplify_cached(*b, cache)),
        Expr::Pow(a, b) => simplify_pow(simplify_cached(*a, cache), simplify_cached(*b, cache)),
        Expr::Neg(a) => simplify_neg(simplify_cached(*a, cache)),
        e => e,
    };

    cache.insert(key, result.clone());
    result
}

/// Apply simplification passes until the expression stops changing or we hit the iteration cap.
pub fn simplify_fully(expr: Expr) -> Expr {
    simplify_with_limit(expr, 16)
}

/// Apply simplification passes up to `max_iters`, returning the last value if convergence is not reached.
pub fn simplify_with_limit(expr: Expr, max_iters: usize) -> Expr {
    let mut cache = HashMap::new();
    let mut current = expr;
    for _ in 0..max_iters {
        let next = simplify_cached(current.clone(), &mut cache);
        if next == current {
            return current;
        }
        current = next;
    }
    current
}

/// Fail when some denominator of `expr` simplifies to zero, either as the
/// right side of a division or as a zero base under a negative exponent.
pub fn ensure_defined(expr: &Expr) -> Result<()> {
    match expr {
        Expr::Variable(_) | Expr::Constant(_) => Ok(()),
        Expr::Add(a, b) | Expr::Sub(a, b) | Expr::Mul(a, b) => {
            ensure_defined(a)?;
            ensure_defined(b)
        }
        Expr::Neg(a) => ensure_defined(a),
        Expr::Div(a, b) => {
            ensure_defined(a)?;
            ensure_defined(b)?;
            if is_zero(&simplify_fully((**b).clone())) {
                return Err(CasError::DivisionByZero(expr.to_string()));
            }
            Ok(())
        }
        Expr::Pow(a, b) => {
            ensure_defined(a)?;
            ensure_defined(b)?;
            let base = simplify_fully((**a).clone());
            let exp = simplify_fully((**b).clone());
            if is_zero(&base) && matches!(exp, Expr::Constant(e) if e.is_negative()) {
                return Err(CasError::DivisionByZero(expr.to_string()));
            }
            Ok(())
        }
    }
}

pub fn simplify_add(x: Expr, y: Expr) -> Expr {
    sum_of(flatten_sum(&x).into_iter().chain(flatten_sum(&y)))
}

pub fn simplify_sub(x: Expr, y: Expr) -> Expr {
    simplify_add(x, simplify_neg(y))
}

/// Canonical sum of already simplified terms.
pub(crate) fn sum_of<I>(terms: I) -> Expr
where
    I: IntoIterator<Item = Expr>,
{
    rebuild_sum(collect_sum(terms.into_iter().flat_map(|t| flatten_sum(&t))))
}

pub(crate) fn flatten_sum(expr: &Expr) -> Vec<Expr> {
    match expr {
        Expr::Add(a, b) => {
            let mut out = flatten_sum(a);
            out.extend(flatten_sum(b));
            out
        }
        Expr::Sub(a, b) => {
            let mut out = flatten_sum(a);
            out.extend(flatten_sum(b).into_iter().map(simplify_neg));
            out
        }
        Expr::Neg(a) if is_sum(a) => flatten_sum(a).into_iter().map(simplify_neg).collect(),
        other => vec![other.clone()],
    }
}

pub(crate) fn is_sum(expr: &Expr) -> bool {
    matches!(expr, Expr::Add(_, _) | Expr::Sub(_, _))
}

/// A term's numeric coefficient and its sorted non-constant factors.
fn split_term(expr: &Expr) -> (Rational, Vec<Expr>) {
    let mut coeff = Rational::one();
    let mut factors = Vec::new();
    gather_factors(expr.clone(), &mut coeff, &mut factors);
    factors.sort();
    (coeff, factors)
}

/// Non-constant factors of a product, with constants and negations folded into `coeff`.
pub(crate) fn gather_factors(expr: Expr, coeff: &mut Rational, factors: &mut Vec<Expr>) {
    match expr {
        Expr::Mul(a, b) => {
            gather_factors(*a, coeff, factors);
            gather_factors(*b, coeff, factors);
        }
        Expr::Neg(inner) => {
            *coeff = -coeff.clone();
            gather_factors(*inner, coeff, factors);
        }
        Expr::Constant(c) => *coeff *= c,
        other => factors.push(other),
    }
}

fn collect_sum<I>(terms: I) -> HashMap<CanonKey, Rational>
where
    I: IntoIterator<Item = Expr>,
{
    let mut map = HashMap::new();
    for term in terms {
        let (c, factors) = split_term(&term);
        if c.is_zero() {
            continue;
        }
        map.entry(CanonKey(factors))
            .and_modify(|acc| *acc += &c)
            .or_insert(c);
    }
    map
}

fn rebuild_sum(map: HashMap<CanonKey, Rational>) -> Expr {
    let mut map = map;
    let const_term = map
        .remove(&CanonKey(Vec::new()))
        .unwrap_or_else(Rational::zero);
    let mut items: Vec<(CanonKey, Rational)> = map
        .into_iter()
        .filter(|(_, coef)| !coef.is_zero())
        .collect();
    // Highest degree first, the way polynomials are usually written.
    items.sort_by(|(a, _), (b, _)| {
        Reverse(term_degree(&a.0))
            .cmp(&Reverse(term_degree(&b.0)))
            .then_with(|| a.cmp(b))
    });

    let mut terms: Vec<Expr> = items
        .into_iter()
        .map(|(CanonKey(factors), coef)| term_from(&coef, mk_mul_list(factors)))
        .collect();

    if !const_term.is_zero() {
        terms.push(Expr::Constant(const_term));
    }

    match terms.len() {
        0 => zero(),
        1 => terms.remove(0),
        _ => mk_add_list(terms),
    }
}

fn term_degree(factors: &[Expr]) -> Rational {
    factors
        .iter()
        .map(|factor| match factor {
            Expr::Variable(_) => Rational::one(),
            Expr::Pow(base, exp) => match (&**base, &**exp) {
                (Expr::Variable(_), Expr::Constant(e)) => e.clone(),
                _ => Rational::zero(),
            },
            _ => Rational::zero(),
        })
        .fold(Rational::zero(), |acc, d| acc + d)
}

fn term_from(coef: &Rational, base: Expr) -> Expr {
    if coef.is_zero() {
        return zero();
    }

    if is_one(&base) {
        return Expr::Constant(coef.clone());
    }

    if coef.is_one() {
        return base;
    }

    if coef == &-Rational::one() {
        return Expr::Neg(base.boxed());
    }

    Expr::Mul(Expr::Constant(coef.clone()).boxed(), base.boxed())
}

pub fn simplify_mul(x: Expr, y: Expr) -> Expr {
    let mut coeff = Rational::one();
    let mut raw = Vec::new();
    gather_factors(x, &mut coeff, &mut raw);
    gather_factors(y, &mut coeff, &mut raw);
    if coeff.is_zero() {
        return zero();
    }

    // Merge equal bases by adding their constant exponents.
    let mut powers: Vec<(Expr, Rational)> = Vec::new();
    for factor in raw {
        let (base, exp) = match factor {
            Expr::Pow(base, exp) => match *exp {
                Expr::Constant(e) => (*base, e),
                other => (Expr::Pow(base, other.boxed()), Rational::one()),
            },
            other => (other, Rational::one()),
        };
        match powers.iter_mut().find(|(b, _)| *b == base) {
            Some((_, acc)) => *acc += exp,
            None => powers.push((base, exp)),
        }
    }

    let mut factors = Vec::new();
    for (base, exp) in powers {
        if exp.is_zero() {
            continue;
        }
        let powered = if exp.is_one() {
            base
        } else {
            simplify_pow(base, Expr::Constant(exp))
        };
        gather_factors(powered, &mut coeff, &mut factors);
    }
    if coeff.is_zero() {
        return zero();
    }
    factors.sort();

    if factors.len() == 1 && is_sum(&factors[0]) && !coeff.is_one() {
        let scale = Expr::Constant(coeff);
        let distributed: Vec<Expr> = flatten_sum(&factors[0])
            .into_iter()
            .map(|term| simplify_mul(scale.clone(), term))
            .collect();
        return sum_of(distributed);
    }

    term_from(&coeff, mk_mul_list(factors))
}

pub fn simplify_div(x: Expr, y: Expr) -> Expr {
    match (x, y) {
        (Expr::Constant(n), Expr::Constant(d)) if !d.is_zero() => Expr::Constant(n / d),
        (x, _) if is_zero(&x) => zero(),
        (x, y) if is_one(&y) => x,
        (x, y) => simplify_mul(x, simplify_pow(y, Expr::Constant(-Rational::one()))),
    }
}

pub fn simplify_pow(x: Expr, y: Expr) -> Expr {
    match (x, y) {
        (_, Expr::Constant(e)) if e.is_zero() => one(),
        (base, Expr::Constant(e)) if e.is_one() => base,
        (Expr::Constant(b), Expr::Constant(e)) => pow_constant(b, e),
        (Expr::Pow(inner_base, inner_exp), Expr::Constant(e)) if e.is_integer() => {
            match *inner_exp {
                Expr::Constant(inner) => simplify_pow(*inner_base, Expr::Constant(inner * e)),
                other => Expr::Pow(
                    Expr::Pow(inner_base, other.boxed()).boxed(),
                    Expr::Constant(e).boxed(),
                ),
            }
        }
        (Expr::Neg(inner), Expr::Constant(e)) if e.is_integer() => {
            let powered = simplify_pow(*inner, Expr::Constant(e.clone()));
            if e.to_integer().is_even() {
                powered
            } else {
                simplify_neg(powered)
            }
        }
        (product @ Expr::Mul(_, _), Expr::Constant(e)) if e.is_integer() => {
            let mut coeff = Rational::one();
            let mut factors = Vec::new();
            gather_factors(product, &mut coeff, &mut factors);
            factors.into_iter().fold(
                pow_constant(coeff, e.clone()),
                |acc, factor| simplify_mul(acc, simplify_pow(factor, Expr::Constant(e.clone()))),
            )
        }
        (x, y) => Expr::Pow(x.boxed(), y.boxed()),
    }
}

fn pow_constant(b: Rational, e: Rational) -> Expr {
    let unevaluated = |b: Rational, e: Rational| {
        Expr::Pow(Expr::Constant(b).boxed(), Expr::Constant(e).boxed())
    };

    if e.is_integer() {
        let k: BigInt = e.to_integer();
        let power = match k.abs().to_u32() {
            Some(power) if power <= MAX_CONSTANT_EXPONENT => power,
            _ => return unevaluated(b, e),
        };
        if !k.is_negative() {
            return Expr::Constant(Rational::new(b.numer().pow(power), b.denom().pow(power)));
        }
        if b.is_zero() {
            return unevaluated(b, e);
        }
        return Expr::Constant(Rational::new(b.denom().pow(power), b.numer().pow(power)));
    }

    if b.is_zero() {
        return if e.is_positive() { zero() } else { unevaluated(b, e) };
    }
    if b.is_one() {
        return one();
    }
    if b.is_negative() {
        return unevaluated(b, e);
    }

    let index = match e.denom().to_u32() {
        Some(q) if q <= MAX_ROOT_INDEX => q,
        _ => return unevaluated(b, e),
    };
    if let (Some(n), Some(d)) = (exact_root(b.numer(), index), exact_root(b.denom(), index)) {
        return pow_constant(Rational::new(n, d), Rational::from_integer(e.numer().clone()));
    }

    if index == 2 && e.numer().is_one() {
        if let Some((outside, radicand)) = sqrt_parts(&b) {
            if !outside.is_one() {
                let surd = Expr::Pow(
                    Expr::Constant(Rational::from_integer(radicand)).boxed(),
                    Expr::Constant(e).boxed(),
                );
                return Expr::Mul(Expr::Constant(outside).boxed(), surd.boxed());
            }
        }
    }
    unevaluated(b, e)
}

fn exact_root(n: &BigInt, index: u32) -> Option<BigInt> {
    if n.is_negative() {
        return None;
    }
    let root = n.nth_root(index);
    if root.pow(index) == *n {
        Some(root)
    } else {
        None
    }
}

pub fn simplify_neg(expr: Expr) -> Expr {
    match expr {
        Expr::Constant(x) => Expr::Constant(-x),
        Expr::Neg(x) => *x,
        other => simplify_mul(Expr::Constant(-Rational::one()), other),
    }
}

fn is_zero(expr: &Expr) -> bool {
    matches!(expr, Expr::Constant(r) if r.is_zero())
}

fn is_one(expr: &Expr) -> bool {
    matches!(expr, Expr::Constant(r) if r.is_one())
}

fn mk_add_list(items: Vec<Expr>) -> Expr {
    let mut iter = items.into_iter();
    let Some(first) = iter.next() else {
        return zero();
    };
    iter.fold(first, |acc, item| Expr::Add(acc.boxed(), item.boxed()))
}

fn mk_mul_list(items: Vec<Expr>) -> Expr {
    let mut iter = items.into_iter();
    let Some(first) = iter.next() else {
        return one();
    };
    iter.fold(first, |acc, item| Expr::Mul(acc.boxed(), item.boxed()))
}
