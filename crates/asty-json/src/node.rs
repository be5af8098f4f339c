//! A JSON-backed syntax tree.

use asty_core::{AdapterError, AstNode, AttributeValue, Scalar};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::LoadError;

const NODE_TYPE: &str = "NodeType";

/// A syntax tree node decoded from a `go2json`-style document.
///
/// Every JSON object carrying a string `NodeType` is a node; its remaining
/// keys are attributes in document order.  `null` attributes are dropped.
/// Attributes that cannot be represented (objects without `NodeType`, arrays
/// that are not all nodes) are kept and reported as adapter errors when a
/// pattern inspects them.  Searches walk past them.
///
/// Reading, walking and dropping a tree never recurse, so generated code
/// nested thousands of levels deep is accepted.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonNode {
    kind: String,
    fields: Vec<(String, Field)>,
}

#[derive(Debug, Clone, PartialEq)]
enum Field {
    Scalar(Scalar),
    Node(Box<JsonNode>),
    Nodes(Vec<JsonNode>),
    Malformed(String),
}

impl JsonNode {
    /// Parses a tree from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] when the text is not JSON or its root is not a
    /// node object.
    pub fn parse(json: &str) -> Result<Self, LoadError> {
        Self::from_value(read_unbounded(json)?)
    }

    /// Builds a tree from a decoded JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] when the root is not a node object.
    pub fn from_value(value: Value) -> Result<Self, LoadError> {
        let object = match value {
            Value::Object(object) => object,
            other => {
                discard(other);
                return Err(LoadError::not_an_object("$"));
            }
        };
        let error = match object.get(NODE_TYPE) {
            Some(Value::String(_)) => return build(object),
            Some(Value::Null) | None => LoadError::missing_node_type("$"),
            Some(_) => LoadError::invalid_field("$", NODE_TYPE, "a string"),
        };
        discard(Value::Object(object));
        Err(error)
    }

    /// Returns the node's `NodeType`.
    #[must_use]
    pub fn node_type(&self) -> &str {
        &self.kind
    }
}

impl TryFrom<Value> for JsonNode {
    type Error = LoadError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_value(value)
    }
}

impl Drop for JsonNode {
    fn drop(&mut self) {
        let mut doomed = Vec::new();
        detach(&mut self.fields, &mut doomed);
        while let Some(mut node) = doomed.pop() {
            detach(&mut node.fields, &mut doomed);
        }
    }
}

fn detach(fields: &mut Vec<(String, Field)>, into: &mut Vec<JsonNode>) {
    for (_, field) in fields.drain(..) {
        match field {
            Field::Node(node) => into.push(*node),
            Field::Nodes(nodes) => into.extend(nodes),
            Field::Scalar(_) | Field::Malformed(_) => {}
        }
    }
}

/// Decodes JSON text without serde_json's nesting limit, growing the stack
/// on demand instead.
fn read_unbounded(json: &str) -> Result<Value, serde_json::Error> {
    let mut reader = serde_json::Deserializer::from_str(json);
    reader.disable_recursion_limit();
    let value = Value::deserialize(serde_stacker::Deserializer::new(&mut reader))?;
    reader.end()?;
    Ok(value)
}

/// A node whose children are still being converted.  Child slots refer to
/// later entries of the conversion arena.
#[derive(Default)]
struct Pending {
    kind: String,
    fields: Vec<(String, Slot)>,
}

enum Slot {
    Ready(Field),
    Node(usize),
    Nodes(Vec<usize>),
}

/// Converts a node object in two passes: a pre-order pass that flattens
/// nodes into an arena, then a reverse pass that assembles every node after
/// its descendants.
fn build(root: Map<String, Value>) -> Result<JsonNode, LoadError> {
    let mut arena = vec![Pending::default()];
    let mut work = vec![(0_usize, root)];

    while let Some((index, object)) = work.pop() {
        let mut pending = Pending {
            kind: String::new(),
            fields: Vec::with_capacity(object.len().saturating_sub(1)),
        };
        for (key, value) in object {
            if key == NODE_TYPE {
                if let Value::String(node_type) = value {
                    pending.kind = node_type;
                }
                continue;
            }
            let slot = match value {
                Value::Null => continue,
                Value::Object(child) if is_node(&child) => {
                    let child_index = arena.len();
                    arena.push(Pending::default());
                    work.push((child_index, child));
                    Slot::Node(child_index)
                }
                Value::Array(items) if items.iter().all(is_node_value) => {
                    let mut indices = Vec::with_capacity(items.len());
                    for item in items {
                        if let Value::Object(child) = item {
                            let child_index = arena.len();
                            indices.push(child_index);
                            arena.push(Pending::default());
                            work.push((child_index, child));
                        }
                    }
                    Slot::Nodes(indices)
                }
                other => Slot::Ready(Field::leaf(&key, other)),
            };
            pending.fields.push((key, slot));
        }
        if let Some(entry) = arena.get_mut(index) {
            *entry = pending;
        }
    }

    let mut built: Vec<Option<JsonNode>> = Vec::with_capacity(arena.len());
    built.resize_with(arena.len(), || None);
    for (index, pending) in arena.into_iter().enumerate().rev() {
        let fields = pending
            .fields
            .into_iter()
            .filter_map(|(name, slot)| {
                let field = match slot {
                    Slot::Ready(field) => field,
                    Slot::Node(child) => Field::Node(Box::new(take(&mut built, child)?)),
                    Slot::Nodes(children) => Field::Nodes(
                        children
                            .into_iter()
                            .filter_map(|child| take(&mut built, child))
                            .collect(),
                    ),
                };
                Some((name, field))
            })
            .collect();
        if let Some(entry) = built.get_mut(index) {
            *entry = Some(JsonNode {
                kind: pending.kind,
                fields,
            });
        }
    }

    built
        .into_iter()
        .next()
        .flatten()
        .ok_or_else(|| LoadError::missing_node_type("$"))
}

fn take(built: &mut [Option<JsonNode>], index: usize) -> Option<JsonNode> {
    built.get_mut(index).and_then(Option::take)
}

impl Field {
    fn leaf(name: &str, value: Value) -> Self {
        if let Some(scalar) = scalar_of(&value) {
            return Self::Scalar(scalar);
        }
        let message = if value.is_object() {
            format!("attribute {name} is an object without a NodeType")
        } else {
            format!("attribute {name} is an array holding values that are not nodes")
        };
        discard(value);
        Self::Malformed(message)
    }
}

/// Drops a JSON value of any depth without recursing.
fn discard(value: Value) {
    let mut pending = vec![value];
    while let Some(current) = pending.pop() {
        match current {
            Value::Array(items) => pending.extend(items),
            Value::Object(object) => pending.extend(object.into_iter().map(|(_, item)| item)),
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {}
        }
    }
}

fn is_node(object: &Map<String, Value>) -> bool {
    matches!(object.get(NODE_TYPE), Some(Value::String(_)))
}

fn is_node_value(value: &Value) -> bool {
    matches!(value, Value::Object(object) if is_node(object))
}

/// Converts a JSON scalar.  Integers that fit `i64` become [`Scalar::Int`],
/// every other number becomes [`Scalar::Float`].
pub(crate) fn scalar_of(value: &Value) -> Option<Scalar> {
    match value {
        Value::Null => Some(Scalar::Null),
        Value::Bool(flag) => Some(Scalar::Bool(*flag)),
        Value::Number(number) => number
            .as_i64()
            .map(Scalar::Int)
            .or_else(|| number.as_f64().map(Scalar::Float)),
        Value::String(text) => Some(Scalar::Str(text.clone())),
        Value::Array(_) | Value::Object(_) => None,
    }
}

fn project(field: &Field) -> Result<AttributeValue<'_, JsonNode>, AdapterError> {
    match field {
        Field::Scalar(scalar) => Ok(AttributeValue::Scalar(scalar.clone())),
        Field::Node(node) => Ok(AttributeValue::Node(node)),
        Field::Nodes(nodes) => Ok(AttributeValue::Nodes(nodes.iter().collect())),
        Field::Malformed(message) => Err(AdapterError::new(message.clone())),
    }
}

impl AstNode for JsonNode {
    fn kind(&self) -> Result<&str, AdapterError> {
        Ok(&self.kind)
    }

    fn fields(&self) -> Result<Vec<(&str, AttributeValue<'_, Self>)>, AdapterError> {
        self.fields
            .iter()
            .map(|(name, field)| project(field).map(|value| (name.as_str(), value)))
            .collect()
    }

    fn attribute(&self, name: &str) -> Result<Option<AttributeValue<'_, Self>>, AdapterError> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, field)| project(field))
            .transpose()
    }

    /// Skips scalar and malformed attributes, so only a constraint that
    /// names a malformed attribute fails.
    fn child_nodes(&self) -> Result<Vec<&Self>, AdapterError> {
        let mut children = Vec::new();
        for (_, field) in &self.fields {
            match field {
                Field::Node(node) => children.push(&**node),
                Field::Nodes(nodes) => children.extend(nodes),
                Field::Scalar(_) | Field::Malformed(_) => {}
            }
        }
        Ok(children)
    }
}
