use stepcas::solve_with_steps;

#[test]
fn arithmetic_is_evaluated() {
    let solved = solve_with_steps("2 + 2");
    assert_eq!(solved.solution, "$4$");
    assert_eq!(solved.steps.entries(), ["Simplifying expression: $4$ gives $4$"]);
}

#[test]
fn polynomial_is_shown_factored_when_shorter() {
    let solved = solve_with_steps("x^2 + 2x + 1");
    assert_eq!(solved.solution, "$\\left(x + 1\\right)^{2}$");
    assert_eq!(solved.steps.len(), 1);
}

#[test]
fn rational_function_is_cancelled() {
    assert_eq!(solve_with_steps("(x^2 - 1)/(x - 1)").solution, "$x + 1$");
}

#[test]
fn other_variables_are_simplified() {
    assert_eq!(solve_with_steps("y + y").solution, "$2 y$");
}

#[test]
fn parse_errors_are_reported() {
    let solved = solve_with_steps("2 +* 3");
    assert!(solved.solution.starts_with("Error:"), "{}", solved.solution);
    assert!(!solved.is_sentinel());
    assert_eq!(solved.steps.len(), 1);
}

#[test]
fn empty_input_is_an_error() {
    assert!(solve_with_steps("").solution.starts_with("Error:"));
}

#[test]
fn zero_denominators_are_reported() {
    for input in ["1/0", "0^-1", "2/(3 - 3)", "0/0"] {
        let solved = solve_with_steps(input);
        assert!(
            solved.solution.starts_with("Error: division by zero"),
            "{input} gave {}",
            solved.solution
        );
        assert_eq!(solved.steps.len(), 1);
        assert!(solved.steps.entries()[0].contains("division by zero"));
    }
}
