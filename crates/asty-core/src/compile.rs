//! Validation of raw patterns into reusable compiled patterns.

use std::collections::HashMap;

use tracing::debug;

use crate::error::CompileError;
use crate::pattern::{PatternId, PatternNode, PatternRule, RawPattern};

const COMPILE_TARGET: &str = "asty::compile";

/// A validated pattern, ready to be matched any number of times.
///
/// Only the nodes reachable from the root survive compilation.  They are
/// renumbered in depth-first discovery order, so the root is always id 0.
/// A compiled pattern is immutable and can be shared between threads.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledPattern {
    nodes: Vec<PatternNode>,
}

impl CompiledPattern {
    /// Returns the root id.
    #[must_use]
    pub const fn root(&self) -> PatternId {
        PatternId::new(0)
    }

    /// Returns the node stored under `id`.
    #[must_use]
    pub fn get(&self, id: PatternId) -> Option<&PatternNode> {
        self.nodes.get(id.index())
    }

    /// Returns the number of nodes in the pattern.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns whether the pattern has no nodes.
    ///
    /// Always false for a successfully compiled pattern.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterates over the nodes with their ids.
    pub fn iter(&self) -> impl Iterator<Item = (PatternId, &PatternNode)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (PatternId::new(index), node))
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    Active,
    Done,
}

/// Walk state for one node on the explicit depth-first stack.
struct Frame {
    id: PatternId,
    references: Vec<PatternId>,
    next: usize,
}

/// Validates `raw` and produces a [`CompiledPattern`].
///
/// Every node reachable from the root is checked once.  Unknown attribute
/// names are accepted; they simply never match a node lacking them.
///
/// # Errors
///
/// Returns a [`CompileError`] when a reachable node is part of a cycle, when
/// a reachable search rule has no sub-rules, or when a reference points at an
/// undefined arena slot.
///
/// # Example
///
/// ```
/// use asty_core::{compile, LiteralRule, PatternBuilder, PatternNode};
///
/// let mut builder = PatternBuilder::new();
/// let root = builder.add(PatternNode::from(LiteralRule::of_kind("File")));
/// let pattern = compile(builder.build(root))?;
/// assert_eq!(pattern.len(), 1);
/// # Ok::<(), asty_core::CompileError>(())
/// ```
pub fn compile(raw: RawPattern) -> Result<CompiledPattern, CompileError> {
    let arena_len = raw.len();
    let (slots, root) = raw.into_nodes();
    let order = discovery_order(&slots, root)?;

    let renumbered: HashMap<PatternId, PatternId> = order
        .iter()
        .enumerate()
        .map(|(index, id)| (*id, PatternId::new(index)))
        .collect();
    let remap = |id: PatternId| renumbered.get(&id).copied().unwrap_or(id);

    let nodes: Vec<PatternNode> = order
        .iter()
        .filter_map(|id| slot(&slots, *id))
        .map(|node| node.remapped(remap))
        .collect();

    debug!(
        target: COMPILE_TARGET,
        arena = arena_len,
        reachable = nodes.len(),
        "compiled pattern"
    );
    Ok(CompiledPattern { nodes })
}

fn slot(slots: &[Option<PatternNode>], id: PatternId) -> Option<&PatternNode> {
    slots.get(id.index()).and_then(Option::as_ref)
}

/// Validates one node and returns the ids it refers to.
fn enter(slots: &[Option<PatternNode>], id: PatternId) -> Result<Vec<PatternId>, CompileError> {
    let node = slot(slots, id).ok_or_else(|| CompileError::dangling(id))?;
    if let PatternRule::Search(search) = node.rule() {
        if search.rules().is_empty() {
            return Err(CompileError::empty_rule_set(id));
        }
    }
    Ok(node.rule().references())
}

/// Returns the reachable ids in depth-first pre-order, failing on the first
/// invalid node.
fn discovery_order(
    slots: &[Option<PatternNode>],
    root: PatternId,
) -> Result<Vec<PatternId>, CompileError> {
    let mut marks = vec![Mark::Unvisited; slots.len()];
    let mut order = Vec::new();
    let mut stack = vec![Frame {
        id: root,
        references: enter(slots, root)?,
        next: 0,
    }];
    set_mark(&mut marks, root, Mark::Active);
    order.push(root);

    while let Some(frame) = stack.last_mut() {
        let Some(child) = frame.references.get(frame.next).copied() else {
            let finished = frame.id;
            stack.pop();
            set_mark(&mut marks, finished, Mark::Done);
            continue;
        };
        frame.next += 1;

        match marks.get(child.index()).copied() {
            Some(Mark::Active) => return Err(CompileError::cycle(child)),
            Some(Mark::Done) => {}
            Some(Mark::Unvisited) => {
                let references = enter(slots, child)?;
                set_mark(&mut marks, child, Mark::Active);
                order.push(child);
                stack.push(Frame {
                    id: child,
                    references,
                    next: 0,
                });
            }
            None => return Err(CompileError::dangling(child)),
        }
    }

    Ok(order)
}

fn set_mark(marks: &mut [Mark], id: PatternId, mark: Mark) {
    if let Some(slot) = marks.get_mut(id.index()) {
        *slot = mark;
    }
}
