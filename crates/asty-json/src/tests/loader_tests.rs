//! Tests for the JSON pattern loader.

use asty_core::{
    CompileErrorKind, Constraint, EngineConfig, MatchOperator, PatternRule, Scalar, find_all,
};
use rstest::rstest;

use crate::{JsonNode, LoadError, load_pattern, parse_pattern};

const CALL_PATTERN: &str = r#"{
    "NodeType": "MatchRule",
    "Rules": [{
        "NodeType": "MatchRule",
        "Name": "call",
        "Exact": true,
        "Rules": [{
            "NodeType": "CallExpr",
            "Fun": {"NodeType": "Ident", "Name": "print"},
            "Args": {
                "NodeType": "MatchRule",
                "Name": "constant",
                "Rules": [{"NodeType": "BasicLit", "Kind": "STRING"}]
            }
        }]
    }]
}"#;

#[test]
fn call_pattern_loads_root_first() {
    let pattern = load_pattern(CALL_PATTERN).expect("load");
    assert_eq!(pattern.len(), 6);

    let root = pattern.get(pattern.root()).expect("root");
    let PatternRule::Search(search) = root.rule() else {
        panic!("root should be a search rule");
    };
    assert_eq!(search.rules().len(), 1);
    assert!(!search.is_exact());
    assert_eq!(search.match_operator(), MatchOperator::AnyOf);
}

#[test]
fn literal_attributes_keep_document_order() {
    let raw = parse_pattern(CALL_PATTERN).expect("parse");
    let first_rule = |id| match raw.get(id).map(asty_core::PatternNode::rule) {
        Some(PatternRule::Search(search)) => search.rules().first().copied(),
        _ => None,
    };
    let call_id = first_rule(raw.root()).expect("call search");
    assert_eq!(raw.get(call_id).and_then(|call| call.name()), Some("call"));

    let literal_id = first_rule(call_id).expect("call literal");
    let literal_node = raw.get(literal_id).expect("literal");
    assert_eq!(literal_node.name(), None);
    let PatternRule::Literal(literal) = literal_node.rule() else {
        panic!("call should wrap a literal rule");
    };
    assert_eq!(literal.kind(), Some("CallExpr"));
    let names: Vec<&str> = literal
        .attributes()
        .iter()
        .map(|(name, _)| name.as_str())
        .collect();
    assert_eq!(names, ["Fun", "Args"]);
}

#[test]
fn name_on_a_literal_is_an_attribute_constraint() {
    let raw = parse_pattern(r#"{"NodeType": "Ident", "Name": "print"}"#).expect("parse");
    let root = raw.get(raw.root()).expect("root");
    assert_eq!(root.name(), None);
    let PatternRule::Literal(literal) = root.rule() else {
        panic!("expected a literal rule");
    };
    assert_eq!(
        literal.attributes(),
        [(String::from("Name"), Constraint::Scalar(Scalar::from("print")))]
    );
}

#[test]
fn name_on_a_search_labels_the_capture() {
    let raw = parse_pattern(r#"{"NodeType": "MatchRule", "Name": "id", "Rules": [{"NodeType": "Ident"}]}"#)
        .expect("parse");
    assert_eq!(raw.get(raw.root()).and_then(|root| root.name()), Some("id"));
}

#[test]
fn attributes_object_escapes_reserved_names() {
    let raw = parse_pattern(r#"{"NodeType": "Field", "Attributes": {"Rules": "x"}}"#)
        .expect("parse");
    let PatternRule::Literal(literal) = raw.get(raw.root()).expect("root").rule() else {
        panic!("expected a literal rule");
    };
    assert_eq!(
        literal.attributes(),
        [(String::from("Rules"), Constraint::Scalar(Scalar::from("x")))]
    );
}

#[rstest]
#[case::same_name("print", 1)]
#[case::longer_name("println", 0)]
#[case::other_name("printf", 0)]
fn identifier_names_in_patterns_match_exactly(#[case] fun: &str, #[case] expected: usize) {
    let pattern = load_pattern(CALL_PATTERN).expect("load");
    let tree = JsonNode::parse(&format!(
        r#"{{"NodeType": "CallExpr", "Fun": {{"NodeType": "Ident", "Name": "{fun}"}},
            "Args": [{{"NodeType": "BasicLit", "Kind": "STRING", "Value": "hi"}}]}}"#
    ))
    .expect("tree");
    let matches = find_all(&tree, &pattern, &EngineConfig::default()).expect("match");
    assert_eq!(matches.named("call").count(), expected);
}

#[test]
fn exact_wrappers_name_their_literal() {
    let pattern = load_pattern(CALL_PATTERN).expect("load");
    let tree = JsonNode::parse(
        r#"{"NodeType": "CallExpr", "Fun": {"NodeType": "Ident", "Name": "print"},
            "Args": [{"NodeType": "BasicLit", "Kind": "STRING", "Value": "hi"}]}"#,
    )
    .expect("tree");
    let matches = find_all(&tree, &pattern, &EngineConfig::default()).expect("match");
    let call = matches.iter().next().expect("one result");
    assert_eq!(call.name(), Some("call"));
    assert_eq!(call["constant"].len(), 1);
}

#[rstest]
#[case::string(r#""STRING""#, Scalar::from("STRING"))]
#[case::integer("3", Scalar::Int(3))]
#[case::float("1.5", Scalar::Float(1.5))]
#[case::boolean("true", Scalar::Bool(true))]
fn scalar_values_become_equality_constraints(#[case] json: &str, #[case] expected: Scalar) {
    let text = format!(r#"{{"NodeType": "BasicLit", "Kind": {json}}}"#);
    let raw = parse_pattern(&text).expect("parse");
    let PatternRule::Literal(literal) = raw.get(raw.root()).expect("root").rule() else {
        panic!("expected a literal rule");
    };
    assert_eq!(
        literal.attributes(),
        [(String::from("Kind"), Constraint::Scalar(expected))]
    );
}

#[test]
fn arrays_become_positional_sequences() {
    let raw = parse_pattern(
        r#"{"NodeType": "CallExpr", "Args": [{"NodeType": "Ident"}, {"NodeType": "BasicLit"}]}"#,
    )
    .expect("parse");
    let PatternRule::Literal(literal) = raw.get(raw.root()).expect("root").rule() else {
        panic!("expected a literal rule");
    };
    let (_, constraint) = literal.attributes().first().expect("Args");
    let Constraint::Sequence(items) = constraint else {
        panic!("expected a positional sequence");
    };
    assert_eq!(items.len(), 2);
}

#[rstest]
#[case::any_of("anyOf", MatchOperator::AnyOf)]
#[case::all_of("allOf", MatchOperator::AllOf)]
#[case::one_of("oneOf", MatchOperator::OneOf)]
#[case::not("not", MatchOperator::Not)]
fn search_options_are_read(#[case] name: &str, #[case] expected: MatchOperator) {
    let text = format!(
        r#"{{"NodeType": "MatchRule", "Exact": true, "Operator": "{name}",
            "Rules": [{{"NodeType": "Ident"}}]}}"#
    );
    let raw = parse_pattern(&text).expect("parse");
    let PatternRule::Search(search) = raw.get(raw.root()).expect("root").rule() else {
        panic!("expected a search rule");
    };
    assert!(search.is_exact());
    assert_eq!(search.match_operator(), expected);
}

#[rstest]
#[case::not_json("{", "invalid JSON")]
#[case::not_an_object("[]", "expected an object at $")]
#[case::missing_node_type(r#"{"Kind": "x"}"#, "missing NodeType at $")]
#[case::node_type_not_string(r#"{"NodeType": 1}"#, "field NodeType at $ must be a string")]
#[case::name_not_string(
    r#"{"NodeType": "MatchRule", "Name": 1, "Rules": [{"NodeType": "Ident"}]}"#,
    "field Name at $ must be a string"
)]
#[case::rules_not_array(
    r#"{"NodeType": "MatchRule", "Rules": {}}"#,
    "field Rules at $ must be an array"
)]
#[case::nested_missing_node_type(
    r#"{"NodeType": "MatchRule", "Rules": [{"NodeType": "CallExpr", "Fun": {}}]}"#,
    "missing NodeType at $.Rules[0].Fun"
)]
#[case::rules_on_literal(
    r#"{"NodeType": "Ident", "Rules": []}"#,
    "field Rules is not allowed on a literal rule at $"
)]
#[case::attribute_on_search(
    r#"{"NodeType": "MatchRule", "Rules": [{"NodeType": "Ident"}], "Kind": "x"}"#,
    "field Kind is not allowed on a search rule at $"
)]
#[case::unknown_operator(
    r#"{"NodeType": "MatchRule", "Operator": "someOf", "Rules": [{"NodeType": "Ident"}]}"#,
    r#"unknown operator "someOf" at $"#
)]
fn malformed_patterns_are_rejected(#[case] json: &str, #[case] message: &str) {
    let error = parse_pattern(json).expect_err("should fail");
    assert!(
        error.to_string().contains(message),
        "expected '{message}' in '{error}'"
    );
}

#[test]
fn empty_rule_set_fails_compilation() {
    let error = load_pattern(r#"{"NodeType": "MatchRule", "Rules": []}"#).expect_err("should fail");
    let LoadError::Compile(compile) = error else {
        panic!("expected a compile error, got {error}");
    };
    assert_eq!(compile.kind(), CompileErrorKind::EmptyRuleSet);
}

#[test]
fn missing_rules_fail_compilation() {
    let error = load_pattern(r#"{"NodeType": "MatchRule"}"#).expect_err("should fail");
    assert!(matches!(error, LoadError::Compile(_)));
}
