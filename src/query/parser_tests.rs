use super::*;
use crate::query::{BinaryOp, UnaryOp};

#[test]
fn single_word() {
    assert_eq!(parse_query("cat").unwrap(), Expr::Value("cat".to_string()));
}

#[test]
fn and_has_higher_precedence_than_or() {
    // "a | b & c" should parse as Or(a, And(b, c))
    let expr = parse_query("a | b & c").unwrap();
    match expr {
        Expr::Binary(BinaryOp::Or, left, right) => {
            assert_eq!(*left, Expr::Value("a".into()));
            match *right {
                Expr::Binary(BinaryOp::And, l, r) => {
                    assert_eq!(*l, Expr::Value("b".into()));
                    assert_eq!(*r, Expr::Value("c".into()));
                }
                other => panic!("expected And, got {other:?}"),
            }
        }
        other => panic!("expected Or at root, got {other:?}"),
    }
}

#[test]
fn implicit_adjacency_is_and() {
    let expr = parse_query("cat dog").unwrap();
    assert_eq!(
        expr,
        Expr::Binary(
            BinaryOp::And,
            Box::new(Expr::Value("cat".into())),
            Box::new(Expr::Value("dog".into()))
        )
    );
}

#[test]
fn parentheses_override_precedence() {
    let expr = parse_query("(a | b) & c").unwrap();
    match expr {
        Expr::Binary(BinaryOp::And, left, _) => {
            assert!(matches!(*left, Expr::Binary(BinaryOp::Or, ..)));
        }
        other => panic!("expected And at root, got {other:?}"),
    }
}

#[test]
fn odd_number_of_nots_is_negation() {
    let expr = parse_query("!cat").unwrap();
    assert_eq!(expr, Expr::Unary(UnaryOp::Not, Box::new(Expr::Value("cat".into()))));

    let expr3 = parse_query("!!!cat").unwrap();
    assert_eq!(expr3, Expr::Unary(UnaryOp::Not, Box::new(Expr::Value("cat".into()))));
}

#[test]
fn even_number_of_nots_collapses_to_identity() {
    let expr = parse_query("!!cat").unwrap();
    assert_eq!(expr, Expr::Value("cat".into()));
}

#[test]
fn duplicate_operators_collapse_to_one() {
    let a = parse_query("cat && dog").unwrap();
    let b = parse_query("cat & dog").unwrap();
    assert_eq!(a, b);

    let c = parse_query("cat || dog").unwrap();
    let d = parse_query("cat | dog").unwrap();
    assert_eq!(c, d);
}

#[test]
fn phrase_with_implicit_contiguous_distances() {
    let expr = parse_query("\"cat is\"").unwrap();
    assert_eq!(
        expr,
        Expr::Phrase {
            words: vec!["cat".into(), "is".into()],
            distances: vec![1],
        }
    );
}

#[test]
fn phrase_with_explicit_distance_marker() {
    let expr = parse_query("\"cat \\d3 table\"").unwrap();
    assert_eq!(
        expr,
        Expr::Phrase {
            words: vec!["cat".into(), "table".into()],
            distances: vec![3],
        }
    );
}

#[test]
fn single_word_phrase_degrades_to_value() {
    let expr = parse_query("\"cat\"").unwrap();
    assert_eq!(expr, Expr::Value("cat".into()));
}

#[test]
fn non_increasing_explicit_distances_are_rejected() {
    let result = parse_query("\"a \\d3 b \\d2 c\"");
    assert!(result.is_err());
}

#[test]
fn wildcard_token_is_a_plain_value_leaf() {
    let expr = parse_query("ca*").unwrap();
    assert_eq!(expr, Expr::Value("ca*".into()));
}

#[test]
fn unbalanced_parentheses_error() {
    assert!(parse_query("(cat").is_err());
    assert!(parse_query("cat)").is_err());
}

#[test]
fn control_characters_are_stripped_silently() {
    let expr = parse_query("cat\u{0007}").unwrap();
    assert_eq!(expr, Expr::Value("cat".into()));
}

#[test]
fn empty_query_is_an_error() {
    assert!(parse_query("").is_err());
    assert!(parse_query("   ").is_err());
}
