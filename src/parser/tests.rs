use super::*;

fn parse(text: &str) -> Result<Vec<ParsedOperator>, SourceError> {
    parse_operators(text.as_bytes())
}

// ========== WELL-FORMED SOURCES ==========

#[test]
fn empty_source_yields_no_operators() {
    let ops = parse("end_operators\n").unwrap();
    assert!(ops.is_empty());
}

#[test]
fn single_block() {
    let ops = parse("goal\np1\np2\ncost\n5\n\nend_operators\n").unwrap();
    assert_eq!(
        ops,
        vec![ParsedOperator {
            effect: "goal".to_string(),
            preconditions: vec!["p1".to_string(), "p2".to_string()],
            cost: 5,
        }]
    );
}

#[test]
fn multiple_blocks_in_order() {
    let ops = parse("goal\np1\np2\ncost\n5\n\ngoal\np1\ncost\n1\n\nend_operators\n").unwrap();
    assert_eq!(ops.len(), 2);
    assert_eq!(ops[0].cost, 5);
    assert_eq!(ops[1].effect, "goal");
    assert_eq!(ops[1].preconditions, vec!["p1".to_string()]);
    assert_eq!(ops[1].cost, 1);
}

#[test]
fn zero_preconditions_is_representable() {
    // An always-applicable operator: cost line directly after the effect.
    let ops = parse("free\ncost\n0\n\nend_operators\n").unwrap();
    assert_eq!(ops.len(), 1);
    assert!(ops[0].preconditions.is_empty());
    assert_eq!(ops[0].cost, 0);
}

// ========== MALFORMED SOURCES ==========

#[test]
fn truncated_stream_is_malformed() {
    let err = parse("goal\np1\ncost\n").unwrap_err();
    assert!(matches!(
        err,
        SourceError::Malformed { block: 0, expected: "non-negative integer cost", .. }
    ));
}

#[test]
fn missing_terminator_is_malformed() {
    let err = parse("goal\np1\ncost\n3\n\n").unwrap_err();
    match err {
        SourceError::Malformed { block, found, .. } => {
            assert_eq!(block, 1);
            assert_eq!(found, "end of stream");
        }
        other => panic!("expected Malformed, got {:?}", other),
    }
}

#[test]
fn non_integer_cost_is_malformed() {
    let err = parse("goal\np1\ncost\nfive\n\nend_operators\n").unwrap_err();
    match err {
        SourceError::Malformed {
            block,
            expected,
            found,
        } => {
            assert_eq!(block, 0);
            assert_eq!(expected, "non-negative integer cost");
            assert_eq!(found, "five");
        }
        other => panic!("expected Malformed, got {:?}", other),
    }
}

#[test]
fn negative_cost_is_malformed() {
    let err = parse("goal\np1\ncost\n-2\n\nend_operators\n").unwrap_err();
    assert!(matches!(
        err,
        SourceError::Malformed { expected: "non-negative integer cost", .. }
    ));
}

#[test]
fn missing_separator_is_malformed() {
    let err = parse("goal\np1\ncost\n3\nend_operators\n").unwrap_err();
    assert!(matches!(
        err,
        SourceError::Malformed { expected: "blank separator line", .. }
    ));
}

// ========== UNAVAILABLE SOURCES ==========

#[test]
fn missing_file_is_unavailable_not_empty() {
    let err = parse_operators_from_path("no/such/operator_file.txt").unwrap_err();
    match err {
        SourceError::Unavailable { path, .. } => {
            assert!(path.ends_with("operator_file.txt"));
        }
        other => panic!("expected Unavailable, got {:?}", other),
    }
}
