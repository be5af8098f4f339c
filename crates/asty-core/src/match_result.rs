//! Match results produced by the matcher.
//!
//! A [`MatchResult`] mirrors the named structure of the pattern: it wraps the
//! matched node and the rule that matched it, and holds the nested capture
//! groups found beneath it.  [`Matches`] is the flat, ordered list returned by
//! a top-level match call.

use std::fmt;
use std::ops::Index;

use crate::capture::Captures;
use crate::pattern::{PatternId, PatternNode, PatternRule};

/// One successful match.
///
/// Results borrow both the tree (`'a`) and the compiled pattern (`'p`).  They
/// are plain values: cloning one copies the capture structure, never the
/// tree.
pub struct MatchResult<'a, 'p, N> {
    node: &'a N,
    pattern: PatternId,
    rule: &'p PatternNode,
    name: Option<&'p str>,
    captures: Captures<'a, 'p, N>,
}

impl<'a, 'p, N> MatchResult<'a, 'p, N> {
    pub(crate) const fn new(
        node: &'a N,
        pattern: PatternId,
        rule: &'p PatternNode,
        name: Option<&'p str>,
        captures: Captures<'a, 'p, N>,
    ) -> Self {
        Self {
            node,
            pattern,
            rule,
            name,
            captures,
        }
    }

    /// Returns the matched node.
    #[must_use]
    pub const fn node(&self) -> &'a N {
        self.node
    }

    /// Returns the id of the pattern node that matched.
    #[must_use]
    pub const fn pattern_id(&self) -> PatternId {
        self.pattern
    }

    /// Returns the pattern node that matched, for provenance.
    #[must_use]
    pub const fn pattern(&self) -> &'p PatternNode {
        self.rule
    }

    /// Returns the rule that matched.
    #[must_use]
    pub const fn rule(&self) -> &'p PatternRule {
        self.rule.rule()
    }

    /// Returns the capture name this result was filed under.
    ///
    /// This is the matching node's own name or, for an unnamed sub-rule of a
    /// search, the search rule's name.
    #[must_use]
    pub const fn name(&self) -> Option<&'p str> {
        self.name
    }

    /// Returns the nested capture groups.
    #[must_use]
    pub const fn captures(&self) -> &Captures<'a, 'p, N> {
        &self.captures
    }

    /// Returns the nested results captured under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> &[Self] {
        self.captures.get(name)
    }

    /// Consumes the result, returning its nested groups.
    #[must_use]
    pub fn into_captures(self) -> Captures<'a, 'p, N> {
        self.captures
    }

    pub(crate) fn inherit_name(&mut self, name: Option<&'p str>) {
        if self.name.is_none() {
            self.name = name;
        }
    }
}

impl<N> Clone for MatchResult<'_, '_, N> {
    fn clone(&self) -> Self {
        Self {
            node: self.node,
            pattern: self.pattern,
            rule: self.rule,
            name: self.name,
            captures: self.captures.clone(),
        }
    }
}

/// Results are equal when they wrap the same node, matched by the same
/// pattern node under the same name, with equal nested groups.
impl<N> PartialEq for MatchResult<'_, '_, N> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.node, other.node)
            && self.pattern == other.pattern
            && self.name == other.name
            && self.captures == other.captures
    }
}

impl<N> fmt::Debug for MatchResult<'_, '_, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MatchResult")
            .field("node", &std::ptr::from_ref(self.node))
            .field("pattern", &self.pattern)
            .field("name", &self.name)
            .field("captures", &self.captures)
            .finish()
    }
}

impl<'a, 'p, N> Index<&str> for MatchResult<'a, 'p, N> {
    type Output = [Self];

    fn index(&self, name: &str) -> &Self::Output {
        self.get(name)
    }
}

/// The ordered results of one top-level match call.
///
/// A search at the root yields results in pre-order of the tree and, within
/// one node, in sub-rule declaration order.  A literal root yields at most
/// one result.
///
/// # Example
///
/// ```
/// use asty_core::{compile, find_all, EngineConfig};
/// use asty_core::test_support::{call_pattern, TestNode};
///
/// let pattern = compile(call_pattern())?;
/// let tree = TestNode::call("print", vec![TestNode::string_lit("hi")]);
/// let matches = find_all(&tree, &pattern, &EngineConfig::default())?;
///
/// for call in matches.named("call") {
///     assert_eq!(call["fun"].len(), 1);
///     assert_eq!(call["constant"].len(), 1);
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct Matches<'a, 'p, N> {
    results: Vec<MatchResult<'a, 'p, N>>,
}

impl<'a, 'p, N> Matches<'a, 'p, N> {
    pub(crate) const fn new(results: Vec<MatchResult<'a, 'p, N>>) -> Self {
        Self { results }
    }

    /// Returns the number of top-level results.
    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Returns whether nothing matched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Iterates over every top-level result in discovery order.
    pub fn iter(&self) -> std::slice::Iter<'_, MatchResult<'a, 'p, N>> {
        self.results.iter()
    }

    /// Iterates over the top-level results filed under `name`.
    pub fn named<'m>(
        &'m self,
        name: &'m str,
    ) -> impl Iterator<Item = &'m MatchResult<'a, 'p, N>> + 'm {
        self.results
            .iter()
            .filter(move |result| result.name() == Some(name))
    }

    /// Returns the results as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[MatchResult<'a, 'p, N>] {
        &self.results
    }

    /// Groups the results by capture name.
    ///
    /// Unnamed results dissolve into their nested groups, the same way they
    /// do below the top level.
    #[must_use]
    pub fn into_captures(self) -> Captures<'a, 'p, N> {
        let mut captures = Captures::new();
        for result in self.results {
            captures.record(result);
        }
        captures
    }
}

impl<N> Clone for Matches<'_, '_, N> {
    fn clone(&self) -> Self {
        Self {
            results: self.results.clone(),
        }
    }
}

impl<N> PartialEq for Matches<'_, '_, N> {
    fn eq(&self, other: &Self) -> bool {
        self.results == other.results
    }
}

impl<N> fmt::Debug for Matches<'_, '_, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.results).finish()
    }
}

impl<'a, 'p, N> IntoIterator for Matches<'a, 'p, N> {
    type Item = MatchResult<'a, 'p, N>;
    type IntoIter = std::vec::IntoIter<MatchResult<'a, 'p, N>>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.into_iter()
    }
}

impl<'m, 'a, 'p, N> IntoIterator for &'m Matches<'a, 'p, N> {
    type Item = &'m MatchResult<'a, 'p, N>;
    type IntoIter = std::slice::Iter<'m, MatchResult<'a, 'p, N>>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.iter()
    }
}
