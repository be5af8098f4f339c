//! Matching algorithms for [`find_all`](super::find_all).

use tracing::trace;

use crate::capture::Captures;
use crate::error::MatchError;
use crate::match_result::MatchResult;
use crate::node::{AstNode, AttributeValue};
use crate::pattern::{
    Constraint, LiteralRule, MatchOperator, PatternId, PatternNode, PatternRule, SearchRule,
};

use super::MATCH_TARGET;
use super::context::MatchContext;

type Found<'a, 'p, N> = Vec<MatchResult<'a, 'p, N>>;

impl<'p> MatchContext<'p> {
    /// Runs the pattern root against `root`: a search rule walks the whole
    /// tree, a literal rule tests `root` alone.
    pub(super) fn match_root<'a, N: AstNode>(
        &mut self,
        root: &'a N,
    ) -> Result<Found<'a, 'p, N>, MatchError> {
        let pattern = self.pattern;
        let id = pattern.root();
        let Some(node) = pattern.get(id) else {
            return Ok(Vec::new());
        };

        match node.rule() {
            PatternRule::Search(search) => self.search(&[root], id, node, search),
            PatternRule::Literal(literal) => Ok(self
                .structural(root, id, node, literal)?
                .into_iter()
                .collect()),
        }
    }

    /// Tests `node` against a literal rule.
    ///
    /// The kind is compared first, then every attribute constraint in
    /// declaration order.  The first failing constraint rejects the node and
    /// discards whatever the earlier constraints captured.
    fn structural<'a, N: AstNode>(
        &mut self,
        node: &'a N,
        id: PatternId,
        pattern_node: &'p PatternNode,
        rule: &'p LiteralRule,
    ) -> Result<Option<MatchResult<'a, 'p, N>>, MatchError> {
        if let Some(kind) = rule.kind() {
            if node.kind()? != kind {
                return Ok(None);
            }
        }

        let mut captures = Captures::new();
        for (attribute, constraint) in rule.attributes() {
            let Some(value) = node.attribute(attribute)? else {
                trace!(target: MATCH_TARGET, pattern = %id, %attribute, "attribute absent");
                return Ok(None);
            };

            let satisfied = match constraint {
                Constraint::Scalar(expected) => {
                    matches!(&value, AttributeValue::Scalar(actual) if actual == expected)
                }
                Constraint::Pattern(sub) => self.constrain(&value, *sub, &mut captures)?,
                Constraint::Sequence(subs) => self.constrain_positional(&value, subs, &mut captures)?,
            };
            if !satisfied {
                trace!(target: MATCH_TARGET, pattern = %id, %attribute, "constraint failed");
                return Ok(None);
            }
        }

        Ok(Some(MatchResult::new(
            node,
            id,
            pattern_node,
            pattern_node.name(),
            captures,
        )))
    }

    /// Checks one attribute value against a single sub-pattern, filing any
    /// sub-matches into `captures`.
    ///
    /// A search sub-pattern searches from the value's node(s) and fails when
    /// it finds nothing.  A literal sub-pattern against a node sequence is
    /// existential: it holds when at least one element matches, and every
    /// matching element contributes.  An empty sequence never matches.
    fn constrain<'a, N: AstNode>(
        &mut self,
        value: &AttributeValue<'a, N>,
        sub_id: PatternId,
        captures: &mut Captures<'a, 'p, N>,
    ) -> Result<bool, MatchError> {
        let pattern = self.pattern;
        let Some(sub) = pattern.get(sub_id) else {
            return Ok(false);
        };

        match sub.rule() {
            PatternRule::Search(search) => {
                let roots = value.nodes();
                if roots.is_empty() {
                    return Ok(false);
                }
                let found = self.search(&roots, sub_id, sub, search)?;
                if found.is_empty() {
                    return Ok(false);
                }
                for result in found {
                    captures.record(result);
                }
                Ok(true)
            }
            PatternRule::Literal(literal) => match value {
                AttributeValue::Scalar(_) => Ok(false),
                AttributeValue::Node(child) => {
                    let Some(result) = self.structural(*child, sub_id, sub, literal)? else {
                        return Ok(false);
                    };
                    captures.record(result);
                    Ok(true)
                }
                AttributeValue::Nodes(children) => {
                    let mut matched = false;
                    for child in children {
                        if let Some(result) = self.structural(*child, sub_id, sub, literal)? {
                            captures.record(result);
                            matched = true;
                        }
                    }
                    Ok(matched)
                }
            },
        }
    }

    /// Checks a node sequence element-wise against a list of sub-patterns.
    ///
    /// Lengths must be equal and every position must match.  Captures are
    /// only filed once the whole sequence has matched.
    fn constrain_positional<'a, N: AstNode>(
        &mut self,
        value: &AttributeValue<'a, N>,
        subs: &'p [PatternId],
        captures: &mut Captures<'a, 'p, N>,
    ) -> Result<bool, MatchError> {
        let AttributeValue::Nodes(children) = value else {
            return Ok(false);
        };
        if children.len() != subs.len() {
            return Ok(false);
        }

        let mut local = Captures::new();
        for (child, sub_id) in children.iter().zip(subs) {
            if !self.constrain(&AttributeValue::Node(*child), *sub_id, &mut local)? {
                return Ok(false);
            }
        }
        captures.extend(local);
        Ok(true)
    }

    /// Searches from `roots` for nodes satisfying the search rule.
    ///
    /// Nodes are visited in pre-order with children in declaration order,
    /// and the walk continues below a node that matched, so nested
    /// occurrences are all reported.  An exact search visits only `roots`.
    fn search<'a, N: AstNode>(
        &mut self,
        roots: &[&'a N],
        id: PatternId,
        pattern_node: &'p PatternNode,
        rule: &'p SearchRule,
    ) -> Result<Found<'a, 'p, N>, MatchError> {
        let mut found = Vec::new();

        if rule.is_exact() {
            for root in roots {
                self.charge()?;
                self.visit(*root, id, pattern_node, rule, &mut found)?;
            }
            return Ok(found);
        }

        let mut stack: Vec<&'a N> = roots.iter().rev().copied().collect();
        while let Some(current) = stack.pop() {
            self.charge()?;
            self.visit(current, id, pattern_node, rule, &mut found)?;
            stack.extend(current.child_nodes()?.into_iter().rev());
        }

        Ok(found)
    }

    /// Tests one visited node against every sub-rule of a search and files
    /// the outcome according to the rule's operator.
    fn visit<'a, N: AstNode>(
        &mut self,
        node: &'a N,
        id: PatternId,
        pattern_node: &'p PatternNode,
        rule: &'p SearchRule,
        found: &mut Found<'a, 'p, N>,
    ) -> Result<(), MatchError> {
        let pattern = self.pattern;
        let mut hits = Vec::new();
        let mut satisfied = 0usize;

        for sub_id in rule.rules() {
            let Some(sub) = pattern.get(*sub_id) else {
                continue;
            };
            let sub_hits: Found<'a, 'p, N> = match sub.rule() {
                PatternRule::Literal(literal) => self
                    .structural(node, *sub_id, sub, literal)?
                    .into_iter()
                    .collect(),
                PatternRule::Search(search) => self.search(&[node], *sub_id, sub, search)?,
            };
            if !sub_hits.is_empty() {
                satisfied += 1;
            }
            hits.extend(sub_hits.into_iter().map(|mut hit| {
                hit.inherit_name(pattern_node.name());
                hit
            }));
        }

        let contributes = match rule.match_operator() {
            MatchOperator::AnyOf => satisfied > 0,
            MatchOperator::AllOf => satisfied == rule.rules().len(),
            MatchOperator::OneOf => satisfied == 1,
            MatchOperator::Not => {
                if satisfied == 0 {
                    found.push(MatchResult::new(
                        node,
                        id,
                        pattern_node,
                        pattern_node.name(),
                        Captures::new(),
                    ));
                }
                return Ok(());
            }
        };

        if contributes {
            trace!(target: MATCH_TARGET, pattern = %id, hits = hits.len(), "node matched");
            found.extend(hits);
        }
        Ok(())
    }
}
