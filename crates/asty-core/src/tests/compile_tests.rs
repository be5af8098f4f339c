//! Tests for pattern compilation.

use crate::test_support::call_pattern;
use crate::{
    CompileErrorKind, LiteralRule, PatternBuilder, PatternId, PatternNode, PatternRule,
    SearchRule, compile,
};

#[test]
fn call_pattern_compiles_with_root_first() {
    let pattern = compile(call_pattern()).expect("compile");
    assert_eq!(pattern.len(), 5);
    let root = pattern.get(pattern.root()).expect("root");
    assert!(matches!(root.rule(), PatternRule::Search(_)));
}

#[test]
fn empty_rule_set_is_rejected() {
    let mut builder = PatternBuilder::new();
    let empty = builder.add(PatternNode::from(SearchRule::new(Vec::new())).named("nothing"));
    let root = builder.add(PatternNode::from(
        LiteralRule::of_kind("CallExpr").with_pattern("Args", empty),
    ));

    let error = compile(builder.build(root)).expect_err("empty rule set");
    assert_eq!(error.kind(), CompileErrorKind::EmptyRuleSet);
    assert_eq!(error.pattern(), empty);
}

#[test]
fn self_reference_is_a_cycle() {
    let mut builder = PatternBuilder::new();
    let root = builder.reserve();
    builder.define(root, PatternNode::from(SearchRule::new(vec![root])));

    let error = compile(builder.build(root)).expect_err("cycle");
    assert_eq!(error.kind(), CompileErrorKind::CycleDetected);
    assert_eq!(error.pattern(), root);
}

#[test]
fn indirect_cycle_is_detected() {
    let mut builder = PatternBuilder::new();
    let call = builder.reserve();
    let args = builder.add(PatternNode::from(SearchRule::new(vec![call])));
    builder.define(
        call,
        PatternNode::from(LiteralRule::of_kind("CallExpr").with_pattern("Args", args)),
    );

    let error = compile(builder.build(call)).expect_err("cycle");
    assert_eq!(error.kind(), CompileErrorKind::CycleDetected);
}

#[test]
fn undefined_reservation_is_dangling() {
    let mut builder = PatternBuilder::new();
    let missing = builder.reserve();
    let root = builder.add(PatternNode::from(SearchRule::new(vec![missing])));

    let error = compile(builder.build(root)).expect_err("dangling");
    assert_eq!(error.kind(), CompileErrorKind::DanglingReference);
    assert_eq!(error.pattern(), missing);
}

#[test]
fn out_of_range_root_is_dangling() {
    let builder = PatternBuilder::new();
    let error = compile(builder.build(PatternId::new(3))).expect_err("dangling root");
    assert_eq!(error.kind(), CompileErrorKind::DanglingReference);
}

#[test]
fn shared_sub_pattern_is_not_a_cycle() {
    let mut builder = PatternBuilder::new();
    let ident = builder.add(PatternNode::from(LiteralRule::of_kind("Ident")).named("ident"));
    let root = builder.add(PatternNode::from(
        LiteralRule::of_kind("SelectorExpr")
            .with_pattern("X", ident)
            .with_pattern("Sel", ident),
    ));

    let pattern = compile(builder.build(root)).expect("shared child compiles");
    assert_eq!(pattern.len(), 2);
}

#[test]
fn unreachable_nodes_are_dropped_unchecked() {
    let mut builder = PatternBuilder::new();
    builder.add(PatternNode::from(SearchRule::new(Vec::new())));
    let root = builder.add(PatternNode::from(LiteralRule::of_kind("File")));

    let pattern = compile(builder.build(root)).expect("unreachable node ignored");
    assert_eq!(pattern.len(), 1);
    assert_eq!(pattern.root(), PatternId::new(0));
}

#[test]
fn unknown_attribute_names_compile() {
    let mut builder = PatternBuilder::new();
    let root = builder.add(PatternNode::from(
        LiteralRule::of_kind("CallExpr").with_scalar("NoSuchField", "x"),
    ));
    assert!(compile(builder.build(root)).is_ok());
}

#[test]
fn compile_error_display_names_node() {
    let mut builder = PatternBuilder::new();
    let root = builder.add(PatternNode::from(SearchRule::new(Vec::new())));
    let error = compile(builder.build(root)).expect_err("empty");
    assert_eq!(
        error.to_string(),
        "invalid pattern: search rule has an empty rule set at node #0"
    );
}
