use num_traits::Zero;
use stepcas::{
    Expr, Poly, Rational, factor_expr, factor_polynomial, normalize, parse_expr, solve_with_steps,
};

fn poly(text: &str) -> Poly {
    let parsed = parse_expr(&normalize(text)).expect("parse polynomial");
    Poly::from_expr(&parsed, "x").expect("polynomial in x")
}

fn ratio(num: i64, den: i64) -> Rational {
    Rational::new(num.into(), den.into())
}

fn by_degree_then_expr(factors: &mut [(Poly, usize)]) {
    factors.sort_by(|(a, _), (b, _)| {
        a.degree()
            .cmp(&b.degree())
            .then_with(|| a.to_expr("x").cmp(&b.to_expr("x")))
    });
}

// Factors come back in degree order, ties broken by expression order.
fn check(input: &str, constant: Rational, expected: &[(&str, usize)]) {
    let original = poly(input);
    let factorization = factor_polynomial(&original);
    assert_eq!(factorization.constant, constant, "constant of {input}");

    let actual: Vec<(Poly, usize)> = factorization
        .factors
        .iter()
        .map(|f| (f.poly.clone(), f.multiplicity))
        .collect();
    let mut wanted: Vec<(Poly, usize)> = expected.iter().map(|(t, m)| (poly(t), *m)).collect();
    by_degree_then_expr(&mut wanted);
    assert_eq!(actual, wanted, "factors of {input}");

    let rebuilt = Poly::from_expr(&factorization.to_expr("x"), "x").expect("rebuilt polynomial");
    assert_eq!(rebuilt, original, "{input} rebuilt from its factors");
}

#[test]
fn factors_are_primitive_integer_polynomials() {
    let cases: [(&str, Rational, &[(&str, usize)]); 12] = [
        ("x^2 - 4", ratio(1, 1), &[("x - 2", 1), ("x + 2", 1)]),
        ("x^2/2 - 2", ratio(1, 2), &[("x - 2", 1), ("x + 2", 1)]),
        ("-2x^2 + 8", ratio(-2, 1), &[("x - 2", 1), ("x + 2", 1)]),
        ("2x^3 - 8x", ratio(2, 1), &[("x", 1), ("x - 2", 1), ("x + 2", 1)]),
        ("9x^2 - 6x + 1", ratio(1, 1), &[("3x - 1", 2)]),
        ("6x^2 - x - 1", ratio(1, 1), &[("2x - 1", 1), ("3x + 1", 1)]),
        ("x^2/4 - x/3", ratio(1, 12), &[("x", 1), ("3x - 4", 1)]),
        ("x^3 - 8", ratio(1, 1), &[("x - 2", 1), ("x^2 + 2x + 4", 1)]),
        ("x^4 - x^2", ratio(1, 1), &[("x", 2), ("x - 1", 1), ("x + 1", 1)]),
        ("x^3 - 2", ratio(1, 1), &[("x^3 - 2", 1)]),
        ("7", ratio(7, 1), &[]),
        ("0", Rational::zero(), &[]),
    ];
    for (input, constant, factors) in cases {
        check(input, constant, factors);
    }
}

#[test]
fn monic_quartic_splits_into_quadratic_pairs() {
    check("x^4 + 4", ratio(1, 1), &[("x^2 - 2x + 2", 1), ("x^2 + 2x + 2", 1)]);
}

#[test]
fn degree_counts_multiplicity() {
    assert_eq!(factor_polynomial(&poly("x^4 - x^2")).degree(), 4);
    assert_eq!(factor_polynomial(&poly("(x - 1)^3*(2x + 1)")).degree(), 4);
    assert_eq!(factor_polynomial(&poly("5")).degree(), 0);
}

#[test]
fn zero_polynomial_rebuilds_as_zero() {
    assert_eq!(
        factor_polynomial(&Poly::zero()).to_expr("x"),
        Expr::Constant(Rational::zero())
    );
}

#[test]
fn equation_log_shows_the_factored_form() {
    let cases = [
        ("x^2 - 4 = 0", "$\\left(x - 2\\right) \\left(x + 2\\right) = 0$"),
        ("x^2 + 2x + 1 = 0", "$\\left(x + 1\\right)^{2} = 0$"),
        ("2x^2 - 8 = 0", "$2 \\left(x - 2\\right) \\left(x + 2\\right) = 0$"),
        ("x^3 - x = 0", "$x \\left(x - 1\\right) \\left(x + 1\\right) = 0$"),
        ("4x^2 + 4x + 1 = 0", "$\\left(2 x + 1\\right)^{2} = 0$"),
        ("1 - x^2 = 0", "$- \\left(x - 1\\right) \\left(x + 1\\right) = 0$"),
    ];
    for (input, expected) in cases {
        let solved = solve_with_steps(input);
        let step = solved
            .steps
            .entries()
            .iter()
            .find_map(|s| s.strip_prefix("Factoring: "))
            .unwrap_or_else(|| panic!("{input} has no factoring step"));
        assert_eq!(step, expected, "factoring step of {input}");
    }
}

#[test]
fn irreducible_equation_has_no_factoring_step() {
    let solved = solve_with_steps("x^2 + 1 = 0");
    assert!(
        solved.steps.entries().iter().all(|s| !s.starts_with("Factoring: ")),
        "steps: {:?}",
        solved.steps.entries()
    );
}

fn poly_expr(text: &str) -> Expr {
    poly(text).to_expr("x")
}

#[test]
fn factor_expr_cancels_common_factors() {
    let expr = parse_expr("(x^2 - 1)/(x - 1)").expect("parse input");
    let factored = factor_expr(&expr, "x").expect("rational function");
    assert_eq!(factored, poly_expr("x + 1"));
}

#[test]
fn factor_expr_puts_denominator_factors_under_negative_powers() {
    let expr = parse_expr("(x^2 - 1)/(x^2 + 2*x + 1)").expect("parse input");
    let factored = factor_expr(&expr, "x").expect("rational function");
    let expected = Expr::Mul(
        poly_expr("x - 1").boxed(),
        Expr::Pow(poly_expr("x + 1").boxed(), Expr::integer(-1).boxed()).boxed(),
    );
    assert_eq!(factored, expected);
}

#[test]
fn factor_expr_rejects_non_rational_input() {
    let expr = parse_expr("x^(1/2) + 1").expect("parse input");
    assert!(factor_expr(&expr, "x").is_none());
}
