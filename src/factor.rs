use crate::expr::{Expr, Rational};
use crate::polynomial::{Poly, RationalFunction};
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, ToPrimitive, Zero};

/// Divisor search for rational roots stops past this trial divisor.
const MAX_TRIAL_DIVISOR: u64 = 100_000;

/// `constant * product(factor.poly ^ factor.multiplicity)`, with every factor a
/// primitive integer polynomial with positive leading coefficient.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Factorization {
    pub constant: Rational,
    pub factors: Vec<Factor>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Factor {
    pub poly: Poly,
    pub multiplicity: usize,
}

impl Factor {
    pub fn base_expr(&self, var: &str) -> Expr {
        self.poly.to_expr(var)
    }

    fn powered_expr(&self, var: &str, sign: i64) -> Expr {
        let exponent = sign * self.multiplicity as i64;
        if exponent == 1 {
            return self.base_expr(var);
        }
        Expr::Pow(self.base_expr(var).boxed(), Expr::integer(exponent).boxed())
    }
}

impl Factorization {
    /// Product form, left unsimplified so the factors survive.
    pub fn to_expr(&self, var: &str) -> Expr {
        if self.constant.is_zero() {
            return Expr::Constant(Rational::zero());
        }
        product_expr(
            &self.constant,
            self.factors.iter().map(|f| f.powered_expr(var, 1)).collect(),
        )
    }

    /// Sum of multiplicities of non-constant factors.
    pub fn degree(&self) -> usize {
        self.factors
            .iter()
            .map(|f| f.poly.degree().unwrap_or(0) * f.multiplicity)
            .sum()
    }
}

/// Factor a polynomial over the rationals.
///
/// Linear factors come from rational roots, and monic quartics with no
/// rational root are split into quadratic pairs when possible. Anything left
/// is kept as a single factor even when it might factor further.
pub fn factor_polynomial(poly: &Poly) -> Factorization {
    if poly.is_zero() {
        return Factorization {
            constant: Rational::zero(),
            factors: Vec::new(),
        };
    }

    let mut factors = Vec::new();
    for (part, multiplicity) in poly.primitive_part().square_free_decomposition() {
        let mut stack = vec![part.monic()];
        while let Some(current) = stack.pop() {
            if current.degree() == Some(1) {
                factors.push(Factor {
                    poly: current.primitive_part(),
                    multiplicity,
                });
                continue;
            }

            if let Some(root) = find_rational_root(&current) {
                let divider = Poly::from_coeffs([(1, Rational::one()), (0, -root)]);
                if let Some(next) = current.div_exact(&divider) {
                    factors.push(Factor {
                        poly: divider.primitive_part(),
                        multiplicity,
                    });
                    stack.push(next);
                    continue;
                }
            }

            if current.degree() == Some(4) {
                if let Some((a, b)) = split_quartic(&current) {
                    stack.push(a);
                    stack.push(b);
                    continue;
                }
            }

            factors.push(Factor {
                poly: current.primitive_part(),
                multiplicity,
            });
        }
    }

    let leading_product = factors.iter().fold(Rational::one(), |acc, f| {
        acc * pow_rational(&f.poly.leading_coeff(), f.multiplicity)
    });
    let constant = poly.leading_coeff() / leading_product;

    factors.sort_by(|a, b| {
        a.poly
            .degree()
            .cmp(&b.poly.degree())
            .then_with(|| a.poly.to_expr("x").cmp(&b.poly.to_expr("x")))
    });

    Factorization { constant, factors }
}

/// Factored form of `expr` as a rational function of `var`, after cancelling
/// common factors. Returns `None` when `expr` is not a rational function.
pub fn factor_expr(expr: &Expr, var: &str) -> Option<Expr> {
    let rf = RationalFunction::from_expr(expr, var)?.reduced();
    let num = factor_polynomial(&rf.num);
    if rf.is_polynomial() {
        return Some(num.to_expr(var));
    }
    if num.constant.is_zero() {
        return Some(Expr::Constant(Rational::zero()));
    }
    let den = factor_polynomial(&rf.den);
    let parts = num
        .factors
        .iter()
        .map(|f| f.powered_expr(var, 1))
        .chain(den.factors.iter().map(|f| f.powered_expr(var, -1)))
        .collect();
    Some(product_expr(&(num.constant / den.constant), parts))
}

fn product_expr(constant: &Rational, parts: Vec<Expr>) -> Expr {
    let mut parts = parts.into_iter();
    let Some(first) = parts.next() else {
        return Expr::Constant(constant.clone());
    };
    let product = parts.fold(first, |acc, part| Expr::Mul(acc.boxed(), part.boxed()));
    if constant.is_one() {
        product
    } else if *constant == -Rational::one() {
        Expr::Neg(product.boxed())
    } else {
        Expr::Mul(Expr::Constant(constant.clone()).boxed(), product.boxed())
    }
}

fn pow_rational(r: &Rational, exp: usize) -> Rational {
    (0..exp).fold(Rational::one(), |acc, _| acc * r)
}

fn find_rational_root(poly: &Poly) -> Option<Rational> {
    let degree = poly.degree()?;
    if degree == 0 {
        return None;
    }
    if degree == 1 {
        return poly.linear_root();
    }
    if poly.coeff(0).is_zero() {
        return Some(Rational::zero());
    }

    let (content, primitive) = poly.content_and_primitive_part();
    if content.is_zero() {
        return None;
    }
    let leading = primitive.leading_coeff().to_integer();
    let constant = primitive.coeff(0).to_integer();

    let p_candidates = divisors(&constant)?;
    let q_candidates = divisors(&leading)?;

    let mut candidates = Vec::new();
    for p in &p_candidates {
        for q in &q_candidates {
            let candidate = Rational::new(p.clone(), q.clone());
            candidates.push(candidate.clone());
            candidates.push(-candidate);
        }
    }
    candidates.sort_by(|a, b| a.abs().cmp(&b.abs()).then_with(|| a.cmp(b)));
    candidates.dedup();

    candidates
        .into_iter()
        .find(|candidate| poly.evaluate(candidate).is_zero())
}

/// Positive divisors of `n`, or `None` once the trial search gets too long.
fn divisors(n: &BigInt) -> Option<Vec<BigInt>> {
    let abs_n = n.abs();
    if abs_n.is_zero() {
        return None;
    }
    let mut result = Vec::new();
    let mut d = BigInt::one();
    while &d * &d <= abs_n {
        match d.to_u64() {
            Some(small) if small <= MAX_TRIAL_DIVISOR => {}
            _ => return None,
        }
        if abs_n.is_multiple_of(&d) {
            let other = &abs_n / &d;
            if other != d {
                result.push(other);
            }
            result.push(d.clone());
        }
        d += 1;
    }
    result.sort();
    Some(result)
}

fn rational_divisors(r: &Rational) -> Vec<Rational> {
    let (Some(p_divs), Some(q_divs)) = (divisors(r.numer()), divisors(r.denom())) else {
        return Vec::new();
    };
    let mut result = Vec::new();
    for p in &p_divs {
        for q in &q_divs {
            let frac = Rational::new(p.clone(), q.clone());
            result.push(frac.clone());
            result.push(-frac);
        }
    }
    result.sort();
    result.dedup();
    result
}

fn perfect_square_rational(r: &Rational) -> Option<Rational> {
    if r.is_negative() {
        return None;
    }
    let num_root = integer_sqrt_exact(r.numer())?;
    let den_root = integer_sqrt_exact(r.denom())?;
    Some(Rational::new(num_root, den_root))
}

fn integer_sqrt_exact(n: &BigInt) -> Option<BigInt> {
    let root = n.sqrt();
    if &root * &root == *n {
        Some(root)
    } else {
        None
    }
}

/// Try `x^4 + p3 x^3 + p2 x^2 + p1 x + p0 = (x^2 + a x + b)(x^2 + c x + d)`
/// with rational `a, b, c, d`, searching `b` over the divisors of `p0`.
fn split_quartic(poly: &Poly) -> Option<(Poly, Poly)> {
    if poly.degree()? != 4 || !poly.leading_coeff().is_one() {
        return None;
    }

    let p3 = poly.coeff(3);
    let p2 = poly.coeff(2);
    let p1 = poly.coeff(1);
    let p0 = poly.coeff(0);
    let two = Rational::from_integer(2.into());
    let four = Rational::from_integer(4.into());

    for b in rational_divisors(&p0) {
        let d = &p0 / &b;
        // a + c = p3 and a c = p2 - b - d, so a and c are roots of a quadratic.
        let ac = &p2 - &b - &d;
        let discriminant = &p3 * &p3 - &four * &ac;
        let Some(sqrt) = perfect_square_rational(&discriminant) else {
            continue;
        };
        for a in [(&p3 + &sqrt) / &two, (&p3 - &sqrt) / &two] {
            let c = &p3 - &a;
            if &a * &d + &b * &c == p1 {
                return Some((quadratic(&a, &b), quadratic(&c, &d)));
            }
        }
    }
    None
}

fn quadratic(linear: &Rational, constant: &Rational) -> Poly {
    Poly::from_coeffs([
        (2, Rational::one()),
        (1, linear.clone()),
        (0, constant.clone()),
    ])
}
