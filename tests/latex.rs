use stepcas::{latex, parse_expr, pretty, simplify_fully};

fn latex_of(input: &str) -> String {
    latex(&simplify_fully(parse_expr(input).expect("parse input")))
}

#[test]
fn typesets_simplified_expressions() {
    let cases = [
        ("x^2 + 2*x + 1", "x^{2} + 2 x + 1"),
        ("x - 2", "x - 2"),
        ("x/2", "\\frac{x}{2}"),
        ("-x/2", "- \\frac{x}{2}"),
        ("-3/4", "- \\frac{3}{4}"),
        ("x*y", "x y"),
        ("3*2^x", "3 \\cdot 2^{x}"),
        ("x^(-1)", "\\frac{1}{x}"),
        ("8^(1/2)", "2 \\sqrt{2}"),
        ("(x + 1)^2", "\\left(x + 1\\right)^{2}"),
        ("(x + 1)/(x - 1)", "\\frac{x + 1}{x - 1}"),
    ];
    for (input, expected) in cases {
        assert_eq!(latex_of(input), expected, "latex({input})");
    }
}

#[test]
fn pretty_prints_plain_text() {
    let expr = simplify_fully(parse_expr("x^2 + 2*x + 1").expect("parse input"));
    assert_eq!(pretty(&expr), "x^2 + 2*x + 1");
    assert_eq!(expr.to_string(), "x^2 + 2*x + 1");
}
