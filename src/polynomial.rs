use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use crate::expr::{Expr, Rational};
use crate::simplify::{simplify_fully, sum_of};
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, ToPrimitive, Zero};

/// Highest power accepted when turning `p^k` into a polynomial.
pub const MAX_POLY_DEGREE: usize = 64;

/// Dense-by-exponent univariate polynomial with rational coefficients.
///
/// Zero coefficients are never stored, so structural equality is equality of
/// polynomials.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Poly {
    pub(crate) coeffs: BTreeMap<usize, Rational>,
}

impl Poly {
    pub fn zero() -> Self {
        Poly {
            coeffs: BTreeMap::new(),
        }
    }

    pub fn one() -> Self {
        Poly::from_constant(Rational::one())
    }

    pub fn from_constant(c: Rational) -> Self {
        if c.is_zero() {
            return Poly::zero();
        }
        let mut coeffs = BTreeMap::new();
        coeffs.insert(0, c);
        Poly { coeffs }
    }

    /// Build a polynomial from `(power, coefficient)` pairs, summing repeats.
    pub fn from_coeffs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (usize, Rational)>,
    {
        pairs.into_iter().fold(Poly::zero(), |acc, (power, coeff)| {
            acc + Poly::monomial(power, coeff)
        })
    }

    pub fn monomial(power: usize, coeff: Rational) -> Self {
        if coeff.is_zero() {
            return Poly::zero();
        }
        let mut coeffs = BTreeMap::new();
        coeffs.insert(power, coeff);
        Poly { coeffs }
    }

    /// Read `expr` as a polynomial in `var`.
    ///
    /// Returns `None` when another variable appears, when `var` sits under a
    /// non-integer or negative power, or when dividing by anything but a
    /// nonzero constant.
    pub fn from_expr(expr: &Expr, var: &str) -> Option<Self> {
        if !expr.contains_var(var) {
            return extract_rational(expr).map(Poly::from_constant);
        }
        match expr {
            Expr::Variable(v) if v == var => Some(Poly::monomial(1, Rational::one())),
            Expr::Add(a, b) => Some(Self::from_expr(a, var)? + Self::from_expr(b, var)?),
            Expr::Sub(a, b) => Some(Self::from_expr(a, var)? - Self::from_expr(b, var)?),
            Expr::Mul(a, b) => Some(Self::from_expr(a, var)? * Self::from_expr(b, var)?),
            Expr::Div(a, b) => {
                let divisor = Self::from_expr(b, var)?;
                if divisor.degree()? != 0 {
                    return None;
                }
                let numer = Self::from_expr(a, var)?;
                Some(numer.scale(&(Rational::one() / divisor.leading_coeff())))
            }
            Expr::Neg(inner) => Some(-Self::from_expr(inner, var)?),
            Expr::Pow(base, exp) => {
                let power = match extract_integer(exp) {
                    Some(k) if (0..=MAX_POLY_DEGREE as i64).contains(&k) => k as usize,
                    _ => return None,
                };
                Some(Self::from_expr(base, var)?.pow(power))
            }
            _ => None,
        }
    }

    pub fn degree(&self) -> Option<usize> {
        self.coeffs.keys().next_back().copied()
    }

    pub fn leading_coeff(&self) -> Rational {
        self.degree()
            .and_then(|d| self.coeffs.get(&d).cloned())
            .unwrap_or_else(Rational::zero)
    }

    pub fn is_zero(&self) -> bool {
        self.coeffs.is_empty()
    }

    pub fn is_one(&self) -> bool {
        self.coeffs.len() == 1 && self.coeffs.get(&0).is_some_and(|c| c.is_one())
    }

    pub fn is_constant(&self) -> bool {
        self.degree().unwrap_or(0) == 0
    }

    pub fn coeff(&self, power: usize) -> Rational {
        self.coeffs
            .get(&power)
            .cloned()
            .unwrap_or_else(Rational::zero)
    }

    pub fn coeff_entries(&self) -> impl Iterator<Item = (usize, &Rational)> + '_ {
        self.coeffs.iter().map(|(e, c)| (*e, c))
    }

    pub fn pow(&self, exp: usize) -> Self {
        let mut result = Poly::one();
        let mut base = self.clone();
        let mut n = exp;
        while n > 0 {
            if n % 2 == 1 {
                result = result * &base;
            }
            base = base.clone() * &base;
            n /= 2;
        }
        result
    }

    pub fn scale(&self, k: &Rational) -> Self {
        if k.is_zero() {
            return Poly::zero();
        }
        let coeffs = self
            .coeffs
            .iter()
            .map(|(exp, coeff)| (*exp, coeff * k))
            .collect();
        Poly { coeffs }
    }

    pub fn derivative(&self) -> Self {
        let coeffs = self
            .coeffs
            .iter()
            .filter(|(exp, _)| **exp > 0)
            .map(|(exp, coeff)| (exp - 1, coeff * Rational::from_integer(BigInt::from(*exp))))
            .collect();
        Poly { coeffs }
    }

    pub fn monic(&self) -> Self {
        let lc = self.leading_coeff();
        if lc.is_zero() {
            return self.clone();
        }
        self.scale(&lc.recip())
    }

    /// Horner evaluation at a rational point.
    pub fn evaluate(&self, x: &Rational) -> Rational {
        let Some(degree) = self.degree() else {
            return Rational::zero();
        };
        (0..=degree)
            .rev()
            .fold(Rational::zero(), |acc, exp| acc * x + self.coeff(exp))
    }

    pub fn div_rem(&self, divisor: &Self) -> (Self, Self) {
        let Some(divisor_degree) = divisor.degree() else {
            return (Poly::zero(), self.clone());
        };
        let divisor_lc = divisor.leading_coeff();
        let mut remainder = self.clone();
        let mut quotient = Poly::zero();

        while let Some(r_deg) = remainder.degree() {
            if r_deg < divisor_degree {
                break;
            }
            let term = Poly::monomial(r_deg - divisor_degree, remainder.leading_coeff() / &divisor_lc);
            remainder = remainder - &(term.clone() * divisor);
            quotient = quotient + term;
        }

        (quotient, remainder)
    }

    pub fn div_exact(&self, divisor: &Self) -> Option<Self> {
        let (q, r) = self.div_rem(divisor);
        if r.is_zero() {
            Some(q)
        } else {
            None
        }
    }

    pub fn linear_root(&self) -> Option<Rational> {
        if self.degree()? != 1 {
            return None;
        }
        Some(-self.coeff(0) / self.coeff(1))
    }

    /// Canonical expression, highest power first.
    pub fn to_expr(&self, var: &str) -> Expr {
        let terms = self.coeffs.iter().map(|(exp, coeff)| {
            let power = match exp {
                0 => return Expr::Constant(coeff.clone()),
                1 => Expr::var(var),
                _ => Expr::Pow(Expr::var(var).boxed(), Expr::integer(*exp).boxed()),
            };
            if coeff.is_one() {
                power
            } else {
                Expr::Mul(Expr::Constant(coeff.clone()).boxed(), power.boxed())
            }
        });
        sum_of(terms.collect::<Vec<_>>())
    }

    pub fn content(&self) -> Rational {
        self.content_and_primitive_part().0
    }

    pub fn primitive_part(&self) -> Self {
        self.content_and_primitive_part().1
    }

    /// Split into a rational content and a primitive integer polynomial with
    /// positive leading coefficient, so that `content * primitive == self`.
    pub fn content_and_primitive_part(&self) -> (Rational, Self) {
        if self.is_zero() {
            return (Rational::zero(), Poly::zero());
        }
        let lcm = self
            .coeffs
            .values()
            .fold(BigInt::one(), |acc, c| acc.lcm(c.denom()));

        let scaled: BTreeMap<usize, BigInt> = self
            .coeffs
            .iter()
            .map(|(exp, c)| (*exp, (c * Rational::from_integer(lcm.clone())).to_integer()))
            .collect();
        let gcd = scaled
            .values()
            .fold(BigInt::zero(), |acc, n| acc.gcd(n));

        let mut primitive = Poly {
            coeffs: scaled
                .into_iter()
                .map(|(exp, n)| (exp, Rational::from_integer(n / &gcd)))
                .collect(),
        };
        let mut content = Rational::new(gcd, lcm);
        if primitive.leading_coeff().is_negative() {
            primitive = -primitive;
            content = -content;
        }
        (content, primitive)
    }

    /// Monic greatest common divisor.
    pub fn gcd(a: &Poly, b: &Poly) -> Poly {
        let mut r0 = a.clone();
        let mut r1 = b.clone();
        while !r1.is_zero() {
            let (_, r) = r0.div_rem(&r1);
            r0 = r1;
            r1 = r;
        }
        r0.monic()
    }

    /// Yun's square-free decomposition: `(part, multiplicity)` pairs whose
    /// product, up to a constant, is `self`.
    pub fn square_free_decomposition(&self) -> Vec<(Poly, usize)> {
        if self.is_constant() {
            return Vec::new();
        }

        let mut result = Vec::new();
        let mut i = 1;
        let mut g = Poly::gcd(self, &self.derivative());
        let mut y = self.div_exact(&g).unwrap_or_else(Poly::zero);

        while !y.is_constant() {
            let z = Poly::gcd(&y, &g);
            let factor = y.div_exact(&z).unwrap_or_else(Poly::zero);
            if !factor.is_constant() {
                result.push((factor.monic(), i));
            }
            y = z;
            g = g.div_exact(&y).unwrap_or_else(Poly::zero);
            i += 1;
        }

        if !g.is_constant() {
            for (part, mult) in g.square_free_decomposition() {
                result.push((part, mult + i - 1));
            }
        }

        result
    }
}

impl std::ops::Add for Poly {
    type Output = Poly;
    fn add(self, rhs: Poly) -> Poly {
        self + &rhs
    }
}

impl std::ops::Add<&Poly> for Poly {
    type Output = Poly;
    fn add(self, rhs: &Poly) -> Poly {
        let mut coeffs = self.coeffs;
        for (exp, coeff) in &rhs.coeffs {
            accumulate(&mut coeffs, *exp, coeff.clone());
        }
        Poly { coeffs }
    }
}

impl std::ops::Sub for Poly {
    type Output = Poly;
    fn sub(self, rhs: Poly) -> Poly {
        self - &rhs
    }
}

impl std::ops::Sub<&Poly> for Poly {
    type Output = Poly;
    fn sub(self, rhs: &Poly) -> Poly {
        let mut coeffs = self.coeffs;
        for (exp, coeff) in &rhs.coeffs {
            accumulate(&mut coeffs, *exp, -coeff.clone());
        }
        Poly { coeffs }
    }
}

impl std::ops::Mul for Poly {
    type Output = Poly;
    fn mul(self, rhs: Poly) -> Poly {
        self * &rhs
    }
}

impl std::ops::Mul<&Poly> for Poly {
    type Output = Poly;
    fn mul(self, rhs: &Poly) -> Poly {
        let mut coeffs = BTreeMap::new();
        for (exp_a, coeff_a) in &self.coeffs {
            for (exp_b, coeff_b) in &rhs.coeffs {
                accumulate(&mut coeffs, exp_a + exp_b, coeff_a * coeff_b);
            }
        }
        Poly { coeffs }
    }
}

impl std::ops::Neg for Poly {
    type Output = Poly;
    fn neg(self) -> Poly {
        Poly {
            coeffs: self.coeffs.into_iter().map(|(e, c)| (e, -c)).collect(),
        }
    }
}

fn accumulate(coeffs: &mut BTreeMap<usize, Rational>, exp: usize, coeff: Rational) {
    if coeff.is_zero() {
        return;
    }
    match coeffs.entry(exp) {
        Entry::Vacant(entry) => {
            entry.insert(coeff);
        }
        Entry::Occupied(mut entry) => {
            let updated = entry.get() + coeff;
            if updated.is_zero() {
                entry.remove();
            } else {
                *entry.get_mut() = updated;
            }
        }
    }
}

/// Quotient of two polynomials in one variable, kept with a monic denominator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RationalFunction {
    pub num: Poly,
    pub den: Poly,
}

impl RationalFunction {
    pub fn from_poly(num: Poly) -> Self {
        RationalFunction {
            num,
            den: Poly::one(),
        }
    }

    /// Read `expr` as a rational function of `var`.
    ///
    /// Common factors are not cancelled, so every root of `den` is a point
    /// where `expr` itself is undefined. Division by an identically zero
    /// polynomial yields `None`.
    pub fn from_expr(expr: &Expr, var: &str) -> Option<Self> {
        if !expr.contains_var(var) {
            return extract_rational(expr).map(|c| Self::from_poly(Poly::from_constant(c)));
        }
        match expr {
            Expr::Variable(v) if v == var => Some(Self::from_poly(Poly::monomial(1, Rational::one()))),
            Expr::Add(a, b) => Some(Self::from_expr(a, var)?.add(&Self::from_expr(b, var)?)),
            Expr::Sub(a, b) => Some(Self::from_expr(a, var)?.add(&Self::from_expr(b, var)?.neg())),
            Expr::Mul(a, b) => Some(Self::from_expr(a, var)?.mul(&Self::from_expr(b, var)?)),
            Expr::Div(a, b) => Some(Self::from_expr(a, var)?.mul(&Self::from_expr(b, var)?.recip()?)),
            Expr::Neg(inner) => Some(Self::from_expr(inner, var)?.neg()),
            Expr::Pow(base, exp) => {
                let k = extract_integer(exp)?;
                let power = k.unsigned_abs().to_usize().filter(|p| *p <= MAX_POLY_DEGREE)?;
                let base = Self::from_expr(base, var)?;
                let powered = RationalFunction {
                    num: base.num.pow(power),
                    den: base.den.pow(power),
                };
                if k < 0 {
                    powered.recip()
                } else {
                    Some(powered)
                }
            }
            _ => None,
        }
    }

    pub fn is_polynomial(&self) -> bool {
        self.den.is_constant()
    }

    pub fn into_polynomial(self) -> Option<Poly> {
        if !self.is_polynomial() {
            return None;
        }
        let scale = self.den.leading_coeff().recip();
        Some(self.num.scale(&scale))
    }

    /// Cancel the common factor of numerator and denominator.
    pub fn reduced(&self) -> Self {
        if self.num.is_zero() {
            return Self::from_poly(Poly::zero());
        }
        let common = Poly::gcd(&self.num, &self.den);
        let num = self.num.div_exact(&common).unwrap_or_else(|| self.num.clone());
        let den = self.den.div_exact(&common).unwrap_or_else(|| self.den.clone());
        Self::normalized(num, den)
    }

    pub fn to_expr(&self, var: &str) -> Expr {
        if self.is_polynomial() {
            return self.num.scale(&self.den.leading_coeff().recip()).to_expr(var);
        }
        simplify_fully(Expr::Div(
            self.num.to_expr(var).boxed(),
            self.den.to_expr(var).boxed(),
        ))
    }

    fn normalized(num: Poly, den: Poly) -> Self {
        let lc = den.leading_coeff();
        RationalFunction {
            num: num.scale(&lc.recip()),
            den: den.monic(),
        }
    }

    fn add(&self, other: &Self) -> Self {
        if self.den == other.den {
            return RationalFunction {
                num: self.num.clone() + &other.num,
                den: self.den.clone(),
            };
        }
        let num = self.num.clone() * &other.den + other.num.clone() * &self.den;
        let den = self.den.clone() * &other.den;
        Self::normalized(num, den)
    }

    fn mul(&self, other: &Self) -> Self {
        let num = self.num.clone() * &other.num;
        let den = self.den.clone() * &other.den;
        Self::normalized(num, den)
    }

    fn neg(&self) -> Self {
        RationalFunction {
            num: -self.num.clone(),
            den: self.den.clone(),
        }
    }

    fn recip(&self) -> Option<Self> {
        if self.num.is_zero() {
            return None;
        }
        Some(Self::normalized(self.den.clone(), self.num.clone()))
    }
}

fn extract_integer(exp: &Expr) -> Option<i64> {
    extract_rational(exp)
        .filter(|c| c.is_integer())
        .and_then(|c| c.to_integer().to_i64())
}

fn extract_rational(expr: &Expr) -> Option<Rational> {
    match expr {
        Expr::Constant(n) => Some(n.clone()),
        Expr::Variable(_) => None,
        other => match simplify_fully(other.clone()) {
            Expr::Constant(n) => Some(n),
            _ => None,
        },
    }
}
