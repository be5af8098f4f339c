//! Owned, serialisable views of match results.

use asty::{AdapterError, AstNode, AttributeValue, MatchResult, PatternRule};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Attributes shown next to a node in human output, in priority order.
const SUMMARY_ATTRIBUTES: &[&str] = &["Name", "Value"];

/// One rendered result and its nested capture groups.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct ResultRecord {
    pub(crate) capture: Option<String>,
    pub(crate) kind: String,
    pub(crate) rule: String,
    #[serde(skip)]
    pub(crate) summary: Option<String>,
    pub(crate) captures: CaptureGroups,
}

/// Capture groups in first-seen order, serialised as a JSON object.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct CaptureGroups(pub(crate) Vec<(String, Vec<ResultRecord>)>);

impl Serialize for CaptureGroups {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, results) in &self.0 {
            map.serialize_entry(name, results)?;
        }
        map.end()
    }
}

impl ResultRecord {
    /// Builds a record from a match result, inspecting the matched node.
    pub(crate) fn from_result<N: AstNode>(
        result: &MatchResult<'_, '_, N>,
    ) -> Result<Self, AdapterError> {
        let node = result.node();
        let groups = result
            .captures()
            .iter()
            .map(|(name, results)| {
                results
                    .iter()
                    .map(Self::from_result)
                    .collect::<Result<Vec<_>, _>>()
                    .map(|records| (name.to_owned(), records))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            capture: result.name().map(str::to_owned),
            kind: node.kind()?.to_owned(),
            rule: describe_rule(result.rule()),
            summary: summarise(node)?,
            captures: CaptureGroups(groups),
        })
    }
}

fn describe_rule(rule: &PatternRule) -> String {
    match rule {
        PatternRule::Literal(literal) => literal.kind().unwrap_or("*").to_owned(),
        PatternRule::Search(search) => format!("MatchRule[{}]", search.match_operator()),
    }
}

fn summarise<N: AstNode>(node: &N) -> Result<Option<String>, AdapterError> {
    for name in SUMMARY_ATTRIBUTES {
        if let Some(AttributeValue::Scalar(value)) = node.attribute(name)? {
            return Ok(Some(format!("{name}={value}")));
        }
    }
    Ok(None)
}
