use stepcas::{Expr, ensure_defined, expand, parse_expr, simplest_form, simplify_fully, substitute};

fn simplified(input: &str) -> Expr {
    simplify_fully(parse_expr(input).expect("parse input"))
}

fn assert_simplifies_to(input: &str, expected: &str) {
    assert_eq!(
        simplified(input),
        simplified(expected),
        "simplify({input}) should equal simplify({expected})"
    );
}

#[test]
fn constants_fold() {
    let cases = [
        ("2 + 2", "4"),
        ("1/2 + 1/3", "5/6"),
        ("2^10", "1024"),
        ("4^(1/2)", "2"),
        ("(8/27)^(1/3)", "2/3"),
        ("2^-2", "1/4"),
        ("0.25 + 0.75", "1"),
    ];
    for (input, expected) in cases {
        assert_simplifies_to(input, expected);
    }
}

#[test]
fn like_terms_and_bases_merge() {
    let cases = [
        ("2*x*3", "6*x"),
        ("x/2", "1/2*x"),
        ("x*x", "x^2"),
        ("x/x", "1"),
        ("x + x + y", "2*x + y"),
        ("x - x", "0"),
        ("x^2*x^3", "x^5"),
        ("(x^2)^3", "x^6"),
        ("(2*x)^2", "4*x^2"),
        ("(-x)^2", "x^2"),
        ("(-x)^3", "-x^3"),
    ];
    for (input, expected) in cases {
        assert_simplifies_to(input, expected);
    }
}

#[test]
fn numeric_coefficients_distribute_over_single_sum() {
    assert_simplifies_to("-(x - 3)", "3 - x");
    assert_simplifies_to("2*(x + 1)", "2*x + 2");
    assert_simplifies_to("(x + 1)/2", "1/2*x + 1/2");
}

#[test]
fn products_of_sums_stay_factored() {
    let expr = simplified("x*(x + 1)");
    assert!(matches!(expr, Expr::Mul(_, _)), "got {expr}");
}

#[test]
fn square_roots_extract_perfect_squares() {
    assert_simplifies_to("8^(1/2)", "2*2^(1/2)");
    assert_simplifies_to("12^(1/2)", "2*3^(1/2)");
    assert_simplifies_to("(1/4)^(1/2)", "1/2");
}

#[test]
fn negative_base_roots_stay_unevaluated() {
    let expr = simplified("(-4)^(1/2)");
    assert!(matches!(expr, Expr::Pow(_, _)), "got {expr}");
}

#[test]
fn simplification_is_stable() {
    for input in ["x^2 + 2*x + 1", "(x + 1)*(x - 1)", "3*x/(x + 2)", "2^x*3"] {
        let once = simplified(input);
        assert_eq!(simplify_fully(once.clone()), once, "{input} changed on resimplify");
    }
}

fn expanded(input: &str) -> Expr {
    expand(parse_expr(input).expect("parse input"))
}

#[test]
fn expand_multiplies_out_sums() {
    let cases = [
        ("(x + 1)^2", "x^2 + 2*x + 1"),
        ("(x + 1)*(x - 1)", "x^2 - 1"),
        ("2*(x + 1)^2", "2*x^2 + 4*x + 2"),
        ("(x - 2)^3", "x^3 - 6*x^2 + 12*x - 8"),
        ("x*(x + y)", "x^2 + x*y"),
        ("-(x + 1)*(x + 2)", "-x^2 - 3*x - 2"),
    ];
    for (input, expected) in cases {
        assert_eq!(expanded(input), simplified(expected), "expand({input})");
    }
}

#[test]
fn expand_leaves_symbolic_powers_alone() {
    assert_eq!(expanded("(x + 1)^y"), simplified("(x + 1)^y"));
}

#[test]
fn simplest_form_prefers_factored_square() {
    let expr = parse_expr("x^2 + 2*x + 1").expect("parse input");
    let expected = Expr::Pow(
        Expr::Add(Expr::var("x").boxed(), Expr::integer(1).boxed()).boxed(),
        Expr::integer(2).boxed(),
    );
    assert_eq!(simplest_form(&expr), expected);
}

#[test]
fn simplest_form_cancels_rational_functions() {
    let expr = parse_expr("(x^2 - 1)/(x - 1)").expect("parse input");
    assert_eq!(simplest_form(&expr), simplified("x + 1"));
}

#[test]
fn simplest_form_of_constant_is_constant() {
    let expr = parse_expr("2 + 2").expect("parse input");
    assert_eq!(simplest_form(&expr), Expr::integer(4));
}

#[test]
fn substitute_replaces_every_occurrence() {
    let expr = parse_expr("x^2 + x*y").expect("parse input");
    let replaced = substitute(&expr, "x", &Expr::integer(2));
    assert_eq!(simplify_fully(replaced), simplified("4 + 2*y"));

    let untouched = substitute(&expr, "z", &Expr::integer(2));
    assert_eq!(untouched, expr);
}

#[test]
fn ensure_defined_finds_zero_denominators() {
    for input in ["1/0", "x/(x - x)", "0^(-1)", "(1 - 1)^(-1/2)", "2 + 3/(0*y)"] {
        let expr = parse_expr(input).expect("parse input");
        assert!(ensure_defined(&expr).is_err(), "{input} should be rejected");
    }
    for input in ["1/x", "0^2", "x^(-1)", "0/5"] {
        let expr = parse_expr(input).expect("parse input");
        assert!(ensure_defined(&expr).is_ok(), "{input} should be accepted");
    }
}
