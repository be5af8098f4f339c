//! In-memory syntax trees and sample patterns for tests.
//!
//! Enabled for this crate's own tests and, through the `test-support`
//! feature, for downstream crates.  [`TestNode`] is a minimal [`AstNode`]
//! whose attributes can also be made to fail on purpose.

use crate::error::AdapterError;
use crate::node::{AstNode, AttributeValue, Scalar};
use crate::pattern::{LiteralRule, PatternBuilder, PatternNode, RawPattern, SearchRule};

/// An attribute value stored on a [`TestNode`].
#[derive(Debug, Clone, PartialEq)]
pub enum TestValue {
    /// A scalar.
    Scalar(Scalar),
    /// A single child.
    Node(TestNode),
    /// An ordered list of children.
    Nodes(Vec<TestNode>),
    /// An attribute whose projection fails with the given message.
    Broken(String),
}

/// An owned syntax tree node with attributes in insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct TestNode {
    kind: String,
    fields: Vec<(String, TestValue)>,
}

impl TestNode {
    /// Creates a node with no attributes.
    #[must_use]
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            fields: Vec::new(),
        }
    }

    /// Adds a scalar attribute.
    #[must_use]
    pub fn with_scalar(mut self, name: impl Into<String>, value: impl Into<Scalar>) -> Self {
        self.fields
            .push((name.into(), TestValue::Scalar(value.into())));
        self
    }

    /// Adds a single-child attribute.
    #[must_use]
    pub fn with_node(mut self, name: impl Into<String>, node: Self) -> Self {
        self.fields.push((name.into(), TestValue::Node(node)));
        self
    }

    /// Adds a child-list attribute.
    #[must_use]
    pub fn with_nodes(mut self, name: impl Into<String>, nodes: Vec<Self>) -> Self {
        self.fields.push((name.into(), TestValue::Nodes(nodes)));
        self
    }

    /// Adds an attribute that fails when inspected.
    #[must_use]
    pub fn with_broken(mut self, name: impl Into<String>, message: impl Into<String>) -> Self {
        self.fields
            .push((name.into(), TestValue::Broken(message.into())));
        self
    }

    /// `Ident{Name: name}`.
    #[must_use]
    pub fn ident(name: &str) -> Self {
        Self::new("Ident").with_scalar("Name", name)
    }

    /// `BasicLit{Kind: "STRING", Value: value}`.
    #[must_use]
    pub fn string_lit(value: &str) -> Self {
        Self::new("BasicLit")
            .with_scalar("Kind", "STRING")
            .with_scalar("Value", value)
    }

    /// `BasicLit{Kind: "INT", Value: value}`.
    #[must_use]
    pub fn int_lit(value: &str) -> Self {
        Self::new("BasicLit")
            .with_scalar("Kind", "INT")
            .with_scalar("Value", value)
    }

    /// `CallExpr{Fun: Ident{Name: fun}, Args: args}`.
    #[must_use]
    pub fn call(fun: &str, args: Vec<Self>) -> Self {
        Self::new("CallExpr")
            .with_node("Fun", Self::ident(fun))
            .with_nodes("Args", args)
    }
}

fn project(value: &TestValue) -> Result<AttributeValue<'_, TestNode>, AdapterError> {
    match value {
        TestValue::Scalar(scalar) => Ok(AttributeValue::Scalar(scalar.clone())),
        TestValue::Node(node) => Ok(AttributeValue::Node(node)),
        TestValue::Nodes(nodes) => Ok(AttributeValue::Nodes(nodes.iter().collect())),
        TestValue::Broken(message) => Err(AdapterError::new(message.clone())),
    }
}

impl AstNode for TestNode {
    fn kind(&self) -> Result<&str, AdapterError> {
        Ok(&self.kind)
    }

    fn fields(&self) -> Result<Vec<(&str, AttributeValue<'_, Self>)>, AdapterError> {
        self.fields
            .iter()
            .map(|(name, value)| project(value).map(|projected| (name.as_str(), projected)))
            .collect()
    }

    fn attribute(&self, name: &str) -> Result<Option<AttributeValue<'_, Self>>, AdapterError> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| project(value))
            .transpose()
    }
}

/// The call-finding pattern used throughout the documentation:
///
/// ```text
/// MatchRule
///   CallExpr as "call"
///     Fun:  Ident{Name: "print"} as "fun"
///     Args: MatchRule
///             BasicLit{Kind: "STRING"} as "constant"
/// ```
#[must_use]
pub fn call_pattern() -> RawPattern {
    let mut builder = PatternBuilder::new();
    let fun = builder.add(
        PatternNode::from(LiteralRule::of_kind("Ident").with_scalar("Name", "print")).named("fun"),
    );
    let constant = builder.add(
        PatternNode::from(LiteralRule::of_kind("BasicLit").with_scalar("Kind", "STRING"))
            .named("constant"),
    );
    let args = builder.add(PatternNode::from(SearchRule::new(vec![constant])));
    let call = builder.add(
        PatternNode::from(
            LiteralRule::of_kind("CallExpr")
                .with_pattern("Fun", fun)
                .with_pattern("Args", args),
        )
        .named("call"),
    );
    let root = builder.add(PatternNode::from(SearchRule::new(vec![call])));
    builder.build(root)
}
