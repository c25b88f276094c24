use stepcas::{EquationKind, Root, parse_expr, solve_equation, solve_with_steps};

fn solution_of(input: &str) -> String {
    solve_with_steps(input).solution
}

#[test]
fn linear_equation_steps() {
    let solved = solve_with_steps("x + 1 = 3");
    assert_eq!(solved.solution, "$x = 2$");
    assert_eq!(
        solved.steps.entries(),
        [
            "Original equation: $x + 1 = 3$",
            "Rearranging to standard form: $x - 2 = 0$",
            "Equation type: linear equation in $x$",
            "Solution: $x = 2$",
        ]
    );
}

#[test]
fn implicit_multiplication_is_accepted() {
    assert_eq!(solution_of("2x + 4 = 0"), "$x = -2$");
}

#[test]
fn quadratic_roots_are_sorted() {
    let solved = solve_with_steps("x^2 - 4 = 0");
    assert_eq!(solved.solution, "$x = -2, x = 2$");
    let steps = solved.steps.entries();
    assert!(
        steps.contains(&"Factoring: $\\left(x - 2\\right) \\left(x + 2\\right) = 0$".to_string()),
        "steps: {steps:?}"
    );
    assert!(steps.contains(&"Equation type: quadratic equation in $x$".to_string()));
}

#[test]
fn irrational_roots_are_exact() {
    assert_eq!(solution_of("x^2 = 2"), "$x = - \\sqrt{2}, x = \\sqrt{2}$");
    assert_eq!(
        solution_of("x^2 - 2x - 1 = 0"),
        "$x = 1 - \\sqrt{2}, x = 1 + \\sqrt{2}$"
    );
}

#[test]
fn repeated_roots_are_listed_once() {
    assert_eq!(solution_of("x^2 + 2x + 1 = 0"), "$x = -1$");
}

#[test]
fn no_real_roots_reports_wrapped_no_solution() {
    assert_eq!(solution_of("x^2 + 1 = 0"), "$No solution$");
    assert_eq!(solution_of("1 = 2"), "$No solution$");
}

#[test]
fn identities_report_wrapped_all_real_numbers() {
    assert_eq!(solution_of("0 = 0"), "$All real numbers$");
    assert_eq!(solution_of("x + 1 = 1 + x"), "$All real numbers$");
}

#[test]
fn removable_singularities_are_excluded() {
    let solved = solve_with_steps("(x^2 - 1)/(x - 1) = 0");
    assert_eq!(solved.solution, "$x = -1$");
    assert!(
        solved.steps.entries().iter().any(|s| s.starts_with("Expanding: ")),
        "steps: {:?}",
        solved.steps.entries()
    );
}

#[test]
fn irreducible_cubic_is_wrapped_unable_to_solve() {
    let solved = solve_with_steps("x^3 - x - 1 = 0");
    assert_eq!(solved.solution, "$Unable to solve$");
    assert!(solved.is_sentinel());
    assert!(
        solved
            .steps
            .entries()
            .iter()
            .any(|s| s.starts_with("Error in solving: ")),
        "steps: {:?}",
        solved.steps.entries()
    );
}

#[test]
fn other_symbols_give_symbolic_linear_roots() {
    assert_eq!(solution_of("x + y = 3"), "$x = - y + 3$");
}

#[test]
fn malformed_equations_report_errors() {
    let solved = solve_with_steps("x = 1 = 2");
    assert!(solved.solution.starts_with("Error:"), "{}", solved.solution);
    assert_eq!(solved.steps.len(), 1);
    assert!(solved.steps.entries()[0].starts_with("Error solving equation: "));

    let solved = solve_with_steps("2 +* 3 = x");
    assert!(solved.solution.starts_with("Error:"), "{}", solved.solution);
}

#[test]
fn solve_equation_classifies_by_degree() {
    let cases = [
        ("x - 1", EquationKind::Polynomial(1), 1),
        ("x^2 - 1", EquationKind::Polynomial(2), 2),
        ("x^3 - x", EquationKind::Polynomial(3), 3),
        ("1/x - 1", EquationKind::Rational, 1),
    ];
    for (input, kind, count) in cases {
        let expr = parse_expr(input).expect("parse input");
        let solved = solve_equation(&expr, "x").expect("solve");
        assert_eq!(solved.kind, kind, "kind of {input}");
        assert_eq!(solved.roots.len(), count, "root count of {input}");
        assert!(solved.roots.iter().all(|r| matches!(r, Root::Real(_))));
    }
}

#[test]
fn equation_kind_names() {
    assert_eq!(EquationKind::Constant.to_string(), "constant");
    assert_eq!(EquationKind::Polynomial(1).to_string(), "linear");
    assert_eq!(EquationKind::Polynomial(3).to_string(), "cubic");
    assert_eq!(EquationKind::Polynomial(5).to_string(), "polynomial of degree 5");
    assert_eq!(EquationKind::Rational.to_string(), "rational");
}

#[test]
fn equation_sentinels_are_wrapped_in_the_step_log_too() {
    let solved = solve_with_steps("x^2 + 1 = 0");
    assert_eq!(
        solved.steps.entries().last().map(String::as_str),
        Some("Solution: $No solution$")
    );

    let solved = solve_with_steps("x^3 - x - 1 = 0");
    let steps = solved.steps.entries();
    assert!(steps.last().is_some_and(|s| s.starts_with("Error in solving: ")), "steps: {steps:?}");
    assert!(!steps.iter().any(|s| s.starts_with("Solution: ")), "steps: {steps:?}");
}

#[test]
fn zero_denominators_are_errors() {
    for input in ["0^(-1/2) = x", "x = 1/0", "1/(x - x) = 2"] {
        let solved = solve_with_steps(input);
        assert!(
            solved.solution.starts_with("Error: division by zero"),
            "{input} gave {}",
            solved.solution
        );
        assert!(!solved.is_sentinel());
    }
}
