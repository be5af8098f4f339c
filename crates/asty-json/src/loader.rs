//! Pattern loading from JSON.

use asty_core::{
    CompiledPattern, Constraint, LiteralRule, MatchOperator, PatternBuilder, PatternId,
    PatternNode, RawPattern, SearchRule, compile,
};
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::LoadError;
use crate::node::scalar_of;

const LOAD_TARGET: &str = "asty::json";

const NODE_TYPE: &str = "NodeType";
const NAME: &str = "Name";
const RULES: &str = "Rules";
const EXACT: &str = "Exact";
const OPERATOR: &str = "Operator";
const ATTRIBUTES: &str = "Attributes";

/// The `NodeType` that marks a search rule.
const MATCH_RULE: &str = "MatchRule";

/// Parses a JSON pattern into an uncompiled arena.
///
/// `Name` labels captures on `MatchRule` objects only.  On any other object
/// it is an ordinary attribute constraint, so `{"NodeType": "Ident", "Name":
/// "print"}` matches identifiers spelled `print`.  A literal is captured by
/// wrapping it in a named, exact `MatchRule`.
///
/// Patterns are hand-written and shallow, so serde_json's default nesting
/// limit stays in force here.
///
/// # Errors
///
/// Returns [`LoadError`] when the text is not JSON or the document does not
/// describe a pattern.  Structural problems such as empty rule sets are left
/// to [`compile`].
pub fn parse_pattern(json: &str) -> Result<RawPattern, LoadError> {
    let value: Value = serde_json::from_str(json)?;
    parse_pattern_value(&value)
}

/// Parses an already decoded JSON document into an uncompiled arena.
///
/// # Errors
///
/// Returns [`LoadError`] when the document does not describe a pattern.
pub fn parse_pattern_value(value: &Value) -> Result<RawPattern, LoadError> {
    let mut loader = Loader {
        builder: PatternBuilder::new(),
    };
    let root = loader.node(value, "$")?;
    let raw = loader.builder.build(root);
    debug!(target: LOAD_TARGET, nodes = raw.len(), "pattern parsed");
    Ok(raw)
}

/// Parses and compiles a JSON pattern.
///
/// # Errors
///
/// Returns [`LoadError`] when parsing fails or [`LoadError::Compile`] when
/// the pattern is structurally invalid.
pub fn load_pattern(json: &str) -> Result<CompiledPattern, LoadError> {
    Ok(compile(parse_pattern(json)?)?)
}

struct Loader {
    builder: PatternBuilder,
}

impl Loader {
    fn node(&mut self, value: &Value, path: &str) -> Result<PatternId, LoadError> {
        let Value::Object(object) = value else {
            return Err(LoadError::not_an_object(path));
        };
        let node_type = match object.get(NODE_TYPE) {
            None | Some(Value::Null) => return Err(LoadError::missing_node_type(path)),
            Some(Value::String(node_type)) => node_type,
            Some(_) => return Err(LoadError::invalid_field(path, NODE_TYPE, "a string")),
        };

        let pattern_node = if node_type == MATCH_RULE {
            let search = PatternNode::from(self.search(object, path)?);
            match object.get(NAME) {
                None | Some(Value::Null) => search,
                Some(Value::String(label)) => search.named(label.clone()),
                Some(_) => return Err(LoadError::invalid_field(path, NAME, "a string")),
            }
        } else {
            PatternNode::from(self.literal(node_type, object, path)?)
        };
        Ok(self.builder.add(pattern_node))
    }

    fn search(&mut self, object: &Map<String, Value>, path: &str) -> Result<SearchRule, LoadError> {
        let rules = match object.get(RULES) {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => self.node_list(items, &format!("{path}.{RULES}"))?,
            Some(_) => return Err(LoadError::invalid_field(path, RULES, "an array")),
        };
        let exact = match object.get(EXACT) {
            None | Some(Value::Null) => false,
            Some(Value::Bool(exact)) => *exact,
            Some(_) => return Err(LoadError::invalid_field(path, EXACT, "a boolean")),
        };
        let operator = match object.get(OPERATOR) {
            None | Some(Value::Null) => MatchOperator::default(),
            Some(Value::String(operator)) => parse_operator(operator, path)?,
            Some(_) => return Err(LoadError::invalid_field(path, OPERATOR, "a string")),
        };

        if let Some(key) = object
            .keys()
            .find(|key| ![NODE_TYPE, NAME, RULES, EXACT, OPERATOR].contains(&key.as_str()))
        {
            return Err(LoadError::unexpected_field(path, key, "search"));
        }

        Ok(SearchRule::new(rules).exact(exact).operator(operator))
    }

    fn literal(
        &mut self,
        kind: &str,
        object: &Map<String, Value>,
        path: &str,
    ) -> Result<LiteralRule, LoadError> {
        let mut rule = LiteralRule::of_kind(kind);
        for (key, value) in object {
            match key.as_str() {
                NODE_TYPE => {}
                RULES | EXACT | OPERATOR => {
                    return Err(LoadError::unexpected_field(path, key, "literal"));
                }
                ATTRIBUTES => {
                    let Value::Object(attributes) = value else {
                        return Err(LoadError::invalid_field(path, ATTRIBUTES, "an object"));
                    };
                    for (attribute, constraint) in attributes {
                        let at = format!("{path}.{ATTRIBUTES}.{attribute}");
                        rule = rule.with(attribute.clone(), self.constraint(constraint, &at)?);
                    }
                }
                attribute => {
                    let at = format!("{path}.{attribute}");
                    rule = rule.with(attribute, self.constraint(value, &at)?);
                }
            }
        }
        Ok(rule)
    }

    fn constraint(&mut self, value: &Value, path: &str) -> Result<Constraint, LoadError> {
        match value {
            Value::Object(_) => Ok(Constraint::Pattern(self.node(value, path)?)),
            Value::Array(items) => Ok(Constraint::Sequence(self.node_list(items, path)?)),
            scalar => scalar_of(scalar)
                .map(Constraint::Scalar)
                .ok_or_else(|| LoadError::not_an_object(path)),
        }
    }

    fn node_list(&mut self, items: &[Value], path: &str) -> Result<Vec<PatternId>, LoadError> {
        items
            .iter()
            .enumerate()
            .map(|(index, item)| self.node(item, &format!("{path}[{index}]")))
            .collect()
    }
}

fn parse_operator(operator: &str, path: &str) -> Result<MatchOperator, LoadError> {
    serde_json::from_value(Value::String(operator.to_owned())).map_err(|_| {
        LoadError::UnknownOperator {
            path: path.to_owned(),
            operator: operator.to_owned(),
        }
    })
}
