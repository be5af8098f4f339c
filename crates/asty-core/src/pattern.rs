//! Raw pattern trees and the builder that assembles them.
//!
//! Patterns live in an arena and refer to one another by [`PatternId`].  A
//! node is either a literal rule, which constrains the node it is tested
//! against, or a search rule, which looks for its sub-rules at or below the
//! current position.  Either flavour may carry a capture name.
//!
//! Arena links can express shapes a tree cannot, such as a node that lists
//! itself as a sub-rule.  [`compile`](crate::compile) rejects those.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::node::Scalar;

/// Index of a node inside a pattern arena.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PatternId(usize);

impl PatternId {
    /// Creates an id from a raw arena index.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the raw arena index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for PatternId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// How the sub-rule outcomes of a search rule combine at one visited node.
///
/// # Example
///
/// ```
/// use asty_core::MatchOperator;
///
/// assert_eq!(MatchOperator::default(), MatchOperator::AnyOf);
/// assert_eq!(format!("{}", MatchOperator::OneOf), "oneOf");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MatchOperator {
    /// Every satisfied sub-rule contributes its result.
    #[default]
    AnyOf,
    /// The node contributes only when every sub-rule is satisfied.
    AllOf,
    /// The node contributes only when exactly one sub-rule is satisfied.
    OneOf,
    /// The node itself contributes when no sub-rule is satisfied.
    Not,
}

impl fmt::Display for MatchOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AnyOf => f.write_str("anyOf"),
            Self::AllOf => f.write_str("allOf"),
            Self::OneOf => f.write_str("oneOf"),
            Self::Not => f.write_str("not"),
        }
    }
}

/// A constraint a literal rule places on one attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum Constraint {
    /// The attribute must be a scalar equal to this value.
    Scalar(Scalar),
    /// The attribute must satisfy a single sub-pattern.
    ///
    /// Against a node sequence this is existential: at least one element must
    /// match.
    Pattern(PatternId),
    /// The attribute must be a node sequence of the same length whose
    /// elements match these sub-patterns position by position.
    Sequence(Vec<PatternId>),
}

impl Constraint {
    /// Returns the sub-pattern ids referenced by this constraint.
    #[must_use]
    pub fn references(&self) -> &[PatternId] {
        match self {
            Self::Scalar(_) => &[],
            Self::Pattern(id) => std::slice::from_ref(id),
            Self::Sequence(ids) => ids,
        }
    }
}

/// A rule that constrains the node it is tested against.
///
/// Unspecified attributes are not checked, and an unset kind accepts any
/// node.
///
/// # Example
///
/// ```
/// use asty_core::{Constraint, LiteralRule, Scalar};
///
/// let rule = LiteralRule::of_kind("BasicLit").with_scalar("Kind", "STRING");
/// assert_eq!(rule.kind(), Some("BasicLit"));
/// assert_eq!(
///     rule.attributes().first().map(|(_, c)| c),
///     Some(&Constraint::Scalar(Scalar::from("STRING")))
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LiteralRule {
    kind: Option<String>,
    attributes: Vec<(String, Constraint)>,
}

impl LiteralRule {
    /// Creates a rule that accepts a node of any kind.
    #[must_use]
    pub const fn any() -> Self {
        Self {
            kind: None,
            attributes: Vec::new(),
        }
    }

    /// Creates a rule that requires the given node kind.
    #[must_use]
    pub fn of_kind(kind: impl Into<String>) -> Self {
        Self {
            kind: Some(kind.into()),
            attributes: Vec::new(),
        }
    }

    /// Adds an attribute constraint.
    ///
    /// Constraints are checked in the order they were added.
    #[must_use]
    pub fn with(mut self, attribute: impl Into<String>, constraint: Constraint) -> Self {
        self.attributes.push((attribute.into(), constraint));
        self
    }

    /// Adds a scalar equality constraint.
    #[must_use]
    pub fn with_scalar(self, attribute: impl Into<String>, value: impl Into<Scalar>) -> Self {
        self.with(attribute, Constraint::Scalar(value.into()))
    }

    /// Adds a single sub-pattern constraint.
    #[must_use]
    pub fn with_pattern(self, attribute: impl Into<String>, pattern: PatternId) -> Self {
        self.with(attribute, Constraint::Pattern(pattern))
    }

    /// Adds a positional sequence constraint.
    #[must_use]
    pub fn with_sequence(self, attribute: impl Into<String>, patterns: Vec<PatternId>) -> Self {
        self.with(attribute, Constraint::Sequence(patterns))
    }

    /// Returns the required node kind, if any.
    #[must_use]
    pub fn kind(&self) -> Option<&str> {
        self.kind.as_deref()
    }

    /// Returns the attribute constraints in declaration order.
    #[must_use]
    pub fn attributes(&self) -> &[(String, Constraint)] {
        &self.attributes
    }
}

/// A rule that searches at or below the current node for its sub-rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRule {
    rules: Vec<PatternId>,
    exact: bool,
    operator: MatchOperator,
}

impl SearchRule {
    /// Creates a subtree search over the given sub-rules.
    #[must_use]
    pub const fn new(rules: Vec<PatternId>) -> Self {
        Self {
            rules,
            exact: false,
            operator: MatchOperator::AnyOf,
        }
    }

    /// Restricts the search to the starting node(s) when `exact` is true.
    #[must_use]
    pub const fn exact(mut self, exact: bool) -> Self {
        self.exact = exact;
        self
    }

    /// Sets how sub-rule outcomes combine at each visited node.
    #[must_use]
    pub const fn operator(mut self, operator: MatchOperator) -> Self {
        self.operator = operator;
        self
    }

    /// Returns the sub-rules in declaration order.
    #[must_use]
    pub fn rules(&self) -> &[PatternId] {
        &self.rules
    }

    /// Returns whether only the starting node(s) are tested.
    #[must_use]
    pub const fn is_exact(&self) -> bool {
        self.exact
    }

    /// Returns the combination operator.
    #[must_use]
    pub const fn match_operator(&self) -> MatchOperator {
        self.operator
    }
}

/// The two pattern flavours.
#[derive(Debug, Clone, PartialEq)]
pub enum PatternRule {
    /// Constrain the current node.
    Literal(LiteralRule),
    /// Search at or below the current node.
    Search(SearchRule),
}

impl PatternRule {
    /// Returns the ids of every sub-pattern this rule refers to, in order.
    #[must_use]
    pub fn references(&self) -> Vec<PatternId> {
        match self {
            Self::Literal(rule) => rule
                .attributes
                .iter()
                .flat_map(|(_, constraint)| constraint.references().iter().copied())
                .collect(),
            Self::Search(rule) => rule.rules.clone(),
        }
    }
}

/// One node of a pattern: a rule plus an optional capture name.
#[derive(Debug, Clone, PartialEq)]
pub struct PatternNode {
    name: Option<String>,
    rule: PatternRule,
}

impl PatternNode {
    /// Creates an unnamed pattern node.
    #[must_use]
    pub const fn new(rule: PatternRule) -> Self {
        Self { name: None, rule }
    }

    /// Attaches a capture name.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Returns the capture name, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the rule.
    #[must_use]
    pub const fn rule(&self) -> &PatternRule {
        &self.rule
    }
}

impl From<LiteralRule> for PatternNode {
    fn from(rule: LiteralRule) -> Self {
        Self::new(PatternRule::Literal(rule))
    }
}

impl From<SearchRule> for PatternNode {
    fn from(rule: SearchRule) -> Self {
        Self::new(PatternRule::Search(rule))
    }
}

/// An unvalidated pattern arena with a designated root.
///
/// Slots reserved through [`PatternBuilder::reserve`] but never defined stay
/// empty and are reported by compilation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawPattern {
    nodes: Vec<Option<PatternNode>>,
    root: PatternId,
}

impl RawPattern {
    /// Returns the root id.
    #[must_use]
    pub const fn root(&self) -> PatternId {
        self.root
    }

    /// Returns the node stored under `id`, if it exists and is defined.
    #[must_use]
    pub fn get(&self, id: PatternId) -> Option<&PatternNode> {
        self.nodes.get(id.index()).and_then(Option::as_ref)
    }

    /// Returns the number of arena slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns whether the arena has no slots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub(crate) fn into_nodes(self) -> (Vec<Option<PatternNode>>, PatternId) {
        (self.nodes, self.root)
    }
}

/// Assembles a [`RawPattern`] bottom-up.
///
/// Children are added before their parents so the parent can name them by
/// id.  [`reserve`](Self::reserve) hands out an id before its node exists,
/// which is how forward and self references are written.
///
/// # Example
///
/// ```
/// use asty_core::{LiteralRule, PatternBuilder, PatternNode, SearchRule};
///
/// let mut builder = PatternBuilder::new();
/// let lit = builder.add(
///     PatternNode::from(LiteralRule::of_kind("BasicLit").with_scalar("Kind", "STRING"))
///         .named("constant"),
/// );
/// let root = builder.add(PatternNode::from(SearchRule::new(vec![lit])));
/// let raw = builder.build(root);
/// assert_eq!(raw.len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct PatternBuilder {
    nodes: Vec<Option<PatternNode>>,
}

impl PatternBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub const fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Adds a node and returns its id.
    pub fn add(&mut self, node: PatternNode) -> PatternId {
        let id = PatternId::new(self.nodes.len());
        self.nodes.push(Some(node));
        id
    }

    /// Reserves an id whose node is supplied later with
    /// [`define`](Self::define).
    pub fn reserve(&mut self) -> PatternId {
        let id = PatternId::new(self.nodes.len());
        self.nodes.push(None);
        id
    }

    /// Stores `node` under a previously reserved id.
    ///
    /// Defining an id that was never handed out grows the arena; the gap
    /// is reported by compilation if anything refers to it.
    pub fn define(&mut self, id: PatternId, node: PatternNode) {
        if id.index() >= self.nodes.len() {
            self.nodes.resize_with(id.index() + 1, || None);
        }
        if let Some(slot) = self.nodes.get_mut(id.index()) {
            *slot = Some(node);
        }
    }

    /// Finishes the arena with `root` as its entry point.
    #[must_use]
    pub fn build(self, root: PatternId) -> RawPattern {
        RawPattern {
            nodes: self.nodes,
            root,
        }
    }
}

impl PatternNode {
    /// Returns a copy with every sub-pattern id passed through `map`.
    pub(crate) fn remapped(&self, map: impl Fn(PatternId) -> PatternId) -> Self {
        let rule = match &self.rule {
            PatternRule::Literal(rule) => PatternRule::Literal(LiteralRule {
                kind: rule.kind.clone(),
                attributes: rule
                    .attributes
                    .iter()
                    .map(|(name, constraint)| {
                        let constraint = match constraint {
                            Constraint::Scalar(value) => Constraint::Scalar(value.clone()),
                            Constraint::Pattern(id) => Constraint::Pattern(map(*id)),
                            Constraint::Sequence(ids) => {
                                Constraint::Sequence(ids.iter().map(|id| map(*id)).collect())
                            }
                        };
                        (name.clone(), constraint)
                    })
                    .collect(),
            }),
            PatternRule::Search(rule) => PatternRule::Search(SearchRule {
                rules: rule.rules.iter().map(|id| map(*id)).collect(),
                exact: rule.exact,
                operator: rule.operator,
            }),
        };
        Self {
            name: self.name.clone(),
            rule,
        }
    }
}
