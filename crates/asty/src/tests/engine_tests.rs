//! Tests for the `Engine` type.

use asty_core::test_support::{TestNode, call_pattern};
use rstest::rstest;

use crate::{CompileErrorKind, Engine, EngineConfig, JsonNode, LoadError, MatchError};

#[test]
fn engine_new_with_default_config() {
    let engine = Engine::new(EngineConfig::default());
    assert_eq!(engine.config().max_search_nodes(), None);
}

#[test]
fn engine_new_with_custom_config() {
    let engine = Engine::new(EngineConfig::new(Some(100)));
    assert_eq!(engine.config().max_search_nodes(), Some(100));
}

#[test]
fn compiled_pattern_is_reused_across_trees() {
    let engine = Engine::default();
    let pattern = engine.compile(call_pattern()).expect("compile");

    let hit = TestNode::call("print", vec![TestNode::string_lit("a")]);
    let miss = TestNode::call("print", vec![TestNode::int_lit("1")]);
    assert_eq!(engine.execute(&hit, &pattern).expect("match").len(), 1);
    assert!(engine.execute(&miss, &pattern).expect("match").is_empty());
}

#[test]
fn compile_json_reports_compile_errors() {
    let engine = Engine::default();
    let error = engine
        .compile_json(r#"{"NodeType": "MatchRule", "Rules": []}"#)
        .expect_err("empty rule set");
    let LoadError::Compile(compile) = error else {
        panic!("expected a compile error, got {error}");
    };
    assert_eq!(compile.kind(), CompileErrorKind::EmptyRuleSet);
}

#[rstest]
#[case::within_budget(Some(100), true)]
#[case::over_budget(Some(1), false)]
fn execute_applies_the_configured_budget(#[case] limit: Option<usize>, #[case] succeeds: bool) {
    let engine = Engine::new(EngineConfig::new(limit));
    let pattern = engine
        .compile_json(r#"{"NodeType": "MatchRule", "Name": "id", "Rules": [{"NodeType": "Ident"}]}"#)
        .expect("compile");
    let tree = JsonNode::parse(
        r#"{"NodeType": "CallExpr", "Fun": {"NodeType": "Ident", "Name": "f"}, "Args": []}"#,
    )
    .expect("tree");

    let result = engine.execute(&tree, &pattern);
    if succeeds {
        assert_eq!(result.expect("match").named("id").count(), 1);
    } else {
        assert!(matches!(
            result,
            Err(MatchError::SearchLimitExceeded { limit: 1 })
        ));
    }
}
