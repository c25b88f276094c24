use stepcas::{
    LinearOutcome, Rational, RelationOp, parse_expr, solve_linear_inequality,
    solve_univariate_inequality, solve_with_steps,
};

fn solution_of(input: &str) -> String {
    solve_with_steps(input).solution
}

#[test]
fn linear_inequalities() {
    let cases = [
        ("2x < 4", "$x < 2$"),
        ("-2x < 4", "$x > -2$"),
        ("x + 1 >= 3", "$x \\geq 2$"),
        ("3 <= x", "$x \\geq 3$"),
    ];
    for (input, expected) in cases {
        assert_eq!(solution_of(input), expected, "solve({input})");
    }
}

#[test]
fn inequality_steps() {
    let solved = solve_with_steps("2x < 4");
    assert_eq!(
        solved.steps.entries(),
        [
            "Original inequality: $2 x < 4$",
            "Rearranging to standard form: $2 x - 4 < 0$",
            "Solution: $x < 2$",
        ]
    );
}

#[test]
fn quadratic_inequalities() {
    let cases = [
        ("x^2 - 4 > 0", "$x < -2 \\vee x > 2$"),
        ("x^2 <= 4", "$-2 \\leq x \\wedge x \\leq 2$"),
        ("x^2 - 2 < 0", "$- \\sqrt{2} < x \\wedge x < \\sqrt{2}$"),
        ("(x - 1)^2 <= 0", "$x = 1$"),
    ];
    for (input, expected) in cases {
        assert_eq!(solution_of(input), expected, "solve({input})");
    }
}

#[test]
fn sign_chart_truth_values() {
    assert_eq!(solution_of("x^2 + 1 > 0"), "$\\text{True}$");
    assert_eq!(solution_of("x^2 + 1 < 0"), "$\\text{False}$");
}

#[test]
fn poles_are_never_included() {
    assert_eq!(solution_of("(x-1)/(x+2) >= 0"), "$x < -2 \\vee x \\geq 1$");
}

#[test]
fn not_equal_excludes_roots() {
    assert_eq!(solution_of("x != 2"), "$x \\neq 2$");
    assert_eq!(solution_of("x^2 != 1"), "$x \\neq -1, x \\neq 1$");
    assert_eq!(solution_of("x != x"), "No solution");
    assert_eq!(solution_of("x^2 + 1 != 0"), "All real numbers");
}

#[test]
fn constant_inequalities_fall_back_to_manual_method() {
    let solved = solve_with_steps("0x > 1");
    assert_eq!(solved.solution, "No solution");
    assert!(
        solved.steps.entries()[2].starts_with("Error solving inequality: "),
        "steps: {:?}",
        solved.steps.entries()
    );

    assert_eq!(solution_of("0x < 1"), "All real numbers");
}

#[test]
fn other_symbols_use_manual_boundary() {
    let solved = solve_with_steps("x + y > 0");
    assert_eq!(solved.solution, "$x > - y$");
    assert_eq!(
        solved.steps.entries().last().map(String::as_str),
        Some("Manual solution: $x > - y$")
    );
}

#[test]
fn manual_method_gives_up_on_symbolic_constants() {
    let solved = solve_with_steps("x^2 + y > 0");
    assert_eq!(solved.solution, "Unable to solve");
    let steps = solved.steps.entries();
    assert!(steps.iter().any(|s| s.starts_with("Manual method failed: ")), "steps: {steps:?}");
    assert_eq!(steps.last().map(String::as_str), Some("Solution: Unable to solve"));
}

#[test]
fn solution_set_membership() {
    let expr = parse_expr("x^2 - 4").expect("parse input");
    let set = solve_univariate_inequality(&expr, RelationOp::Gt, "x").expect("solve");
    assert!(set.contains(&Rational::from_integer(3.into())));
    assert!(set.contains(&Rational::from_integer((-3).into())));
    assert!(!set.contains(&Rational::from_integer(0.into())));
    assert!(!set.contains(&Rational::from_integer(2.into())));
}

#[test]
fn sign_chart_rejects_constant_input() {
    let expr = parse_expr("5").expect("parse input");
    assert!(solve_univariate_inequality(&expr, RelationOp::Gt, "x").is_err());
}

#[test]
fn linear_method_flips_for_negative_coefficient() {
    let expr = parse_expr("4 - 2*x").expect("parse input");
    let outcome = solve_linear_inequality(&expr, RelationOp::Ge, "x").expect("solve");
    match outcome {
        LinearOutcome::Boundary { op, boundary } => {
            assert_eq!(op, RelationOp::Le);
            assert_eq!(boundary.as_constant(), Some(&Rational::from_integer(2.into())));
        }
        other => panic!("unexpected outcome {other:?}"),
    }
}

#[test]
fn manual_method_rejects_pole_at_zero() {
    let solved = solve_with_steps("x + 1/x + y > 0");
    assert_eq!(solved.solution, "Unable to solve");
    let steps = solved.steps.entries();
    assert!(
        steps.iter().any(|s| s.starts_with("Manual method failed: division by zero")),
        "steps: {steps:?}"
    );
}

#[test]
fn zero_denominator_in_inequality_is_an_error() {
    let solved = solve_with_steps("1/0 < x");
    assert!(solved.solution.starts_with("Error: division by zero"), "{}", solved.solution);
}
