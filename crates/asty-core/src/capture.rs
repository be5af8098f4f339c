//! Named, repeatable capture groups.
//!
//! A capture group maps a capture name to an ordered list of results.  Keys
//! keep first-seen order and entries keep discovery order, so a pattern that
//! matches many nodes under one name never loses any of them.

use std::fmt;
use std::ops::Index;

use crate::match_result::MatchResult;

/// An ordered multimap from capture name to results.
///
/// Groups are few per result, so lookups scan a small vector.
pub struct Captures<'a, 'p, N> {
    groups: Vec<(&'p str, Vec<MatchResult<'a, 'p, N>>)>,
}

impl<N> Default for Captures<'_, '_, N> {
    fn default() -> Self {
        Self { groups: Vec::new() }
    }
}

impl<N> Clone for Captures<'_, '_, N> {
    fn clone(&self) -> Self {
        Self {
            groups: self.groups.clone(),
        }
    }
}

impl<N> fmt::Debug for Captures<'_, '_, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.groups.iter().map(|(name, results)| (name, results)))
            .finish()
    }
}

impl<N> PartialEq for Captures<'_, '_, N> {
    fn eq(&self, other: &Self) -> bool {
        self.groups == other.groups
    }
}

impl<'a, 'p, N> Captures<'a, 'p, N> {
    /// Creates an empty set of groups.
    #[must_use]
    pub const fn new() -> Self {
        Self { groups: Vec::new() }
    }

    /// Returns the results captured under `name`, in discovery order.
    ///
    /// Unknown names yield an empty slice.
    #[must_use]
    pub fn get(&self, name: &str) -> &[MatchResult<'a, 'p, N>] {
        self.groups
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, results)| results.as_slice())
            .unwrap_or_default()
    }

    /// Returns whether any result was captured under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.groups.iter().any(|(key, _)| *key == name)
    }

    /// Returns the capture names in first-seen order.
    pub fn names(&self) -> impl Iterator<Item = &'p str> + '_ {
        self.groups.iter().map(|(key, _)| *key)
    }

    /// Iterates over the groups in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&'p str, &[MatchResult<'a, 'p, N>])> {
        self.groups
            .iter()
            .map(|(key, results)| (*key, results.as_slice()))
    }

    /// Returns the number of distinct capture names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Returns whether nothing was captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Appends a result under `name`.
    pub(crate) fn push(&mut self, name: &'p str, result: MatchResult<'a, 'p, N>) {
        if let Some((_, results)) = self.groups.iter_mut().find(|(key, _)| *key == name) {
            results.push(result);
        } else {
            self.groups.push((name, vec![result]));
        }
    }

    /// Appends every group of `other`, keeping its order.
    pub(crate) fn extend(&mut self, other: Self) {
        for (name, results) in other.groups {
            for result in results {
                self.push(name, result);
            }
        }
    }

    /// Files a sub-match: named results go under their name, unnamed ones
    /// dissolve into their nested groups.
    pub(crate) fn record(&mut self, result: MatchResult<'a, 'p, N>) {
        match result.name() {
            Some(name) => self.push(name, result),
            None => self.extend(result.into_captures()),
        }
    }
}

impl<'a, 'p, N> Index<&str> for Captures<'a, 'p, N> {
    type Output = [MatchResult<'a, 'p, N>];

    fn index(&self, name: &str) -> &Self::Output {
        self.get(name)
    }
}
