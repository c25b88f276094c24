use stepcas::{Classified, RelationKind, RelationOp, classify};

#[test]
fn plain_text_is_an_expression() {
    assert_eq!(classify("x^2 + 1").expect("classify"), Classified::Expression("x^2 + 1"));
}

#[test]
fn single_equals_splits_into_sides() {
    let classified = classify("x + 1 = 3").expect("classify");
    assert_eq!(
        classified,
        Classified::Equation {
            left: "x + 1 ",
            right: " 3"
        }
    );
    assert_eq!(classified.kind(), RelationKind::Equation);
}

#[test]
fn each_inequality_operator_is_recognised() {
    let cases = [
        ("x >= 1", RelationOp::Ge),
        ("x <= 1", RelationOp::Le),
        ("x > 1", RelationOp::Gt),
        ("x < 1", RelationOp::Lt),
        ("x != 1", RelationOp::Ne),
    ];
    for (input, expected) in cases {
        let classified = classify(input).expect("classify");
        assert_eq!(classified.kind(), RelationKind::Inequality(expected), "{input}");
    }
}

#[test]
fn two_character_operators_are_not_split() {
    let classified = classify("2x >= 4").expect("classify");
    assert_eq!(
        classified,
        Classified::Inequality {
            left: "2x ",
            op: RelationOp::Ge,
            right: " 4"
        }
    );
}

#[test]
fn scan_order_beats_position() {
    // `>` is searched before `=`, wherever it appears.
    let classified = classify("x + 1 = 3 > 2").expect("classify");
    assert_eq!(classified.kind(), RelationKind::Inequality(RelationOp::Gt));

    // `>=` is searched before `<`.
    let classified = classify("x < 3 >= 1").expect("classify");
    assert_eq!(classified.kind(), RelationKind::Inequality(RelationOp::Ge));
}

#[test]
fn chained_equations_are_rejected() {
    assert!(classify("x = 1 = 2").is_err());
}

#[test]
fn operator_helpers() {
    assert_eq!(RelationOp::Lt.flipped(), RelationOp::Gt);
    assert_eq!(RelationOp::Ge.flipped(), RelationOp::Le);
    assert_eq!(RelationOp::Ne.flipped(), RelationOp::Ne);
    assert_eq!(RelationOp::Le.latex(), "\\leq");
    assert_eq!(RelationOp::Ne.to_string(), "!=");
    assert!(RelationOp::Lt.is_strict());
    assert!(!RelationOp::Ge.is_strict());
}
