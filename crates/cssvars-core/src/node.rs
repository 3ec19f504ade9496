//! Variable map data model.
//!
//! A variable map is a tree: scalar leaves under ordered, string-keyed
//! mappings. Values that are neither are kept as [`VariableNode::Unsupported`]
//! so that malformed input survives conversion and is reported later
//! instead of failing deserialization outright.

use std::borrow::Cow;
use std::fmt;

use rustc_hash::FxHashMap;
use serde::Deserialize;
use serde_json::Value;

/// A leaf value in a variable map.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// Plain text, emitted verbatim.
    Text(String),
    /// Text that must be emitted as a quoted string literal.
    Quoted(String),
    /// A JSON number.
    Number(serde_json::Number),
    /// A boolean.
    Bool(bool),
}

impl Scalar {
    /// Textual form of this scalar.
    pub fn text(&self) -> Cow<'_, str> {
        match self {
            Scalar::Text(text) | Scalar::Quoted(text) => Cow::Borrowed(text),
            Scalar::Number(number) => Cow::Owned(number.to_string()),
            Scalar::Bool(value) => Cow::Borrowed(if *value { "true" } else { "false" }),
        }
    }

    /// Whether the caller asked for literal quoting.
    pub fn is_quoted(&self) -> bool {
        matches!(self, Scalar::Quoted(_))
    }
}

/// Kind of a value that is neither a scalar nor a mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Null,
    Array,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::Null => f.write_str("null"),
            ValueKind::Array => f.write_str("array"),
        }
    }
}

/// A node in a variable map.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub enum VariableNode {
    /// A leaf value.
    Scalar(Scalar),
    /// A nested mapping.
    Map(VariableMap),
    /// A value that cannot become a variable.
    Unsupported(ValueKind),
}

impl VariableNode {
    /// Create a leaf that renders as a quoted string literal.
    pub fn quoted(text: impl Into<String>) -> Self {
        VariableNode::Scalar(Scalar::Quoted(text.into()))
    }

    /// Returns the mapping if this node is one.
    pub fn as_map(&self) -> Option<&VariableMap> {
        match self {
            VariableNode::Map(map) => Some(map),
            _ => None,
        }
    }
}

impl From<Value> for VariableNode {
    fn from(value: Value) -> Self {
        match value {
            Value::String(text) => VariableNode::Scalar(Scalar::Text(text)),
            Value::Number(number) => VariableNode::Scalar(Scalar::Number(number)),
            Value::Bool(flag) => VariableNode::Scalar(Scalar::Bool(flag)),
            Value::Object(object) => VariableNode::Map(
                object
                    .into_iter()
                    .map(|(key, value)| (key, VariableNode::from(value)))
                    .collect(),
            ),
            Value::Array(_) => VariableNode::Unsupported(ValueKind::Array),
            Value::Null => VariableNode::Unsupported(ValueKind::Null),
        }
    }
}

impl From<&str> for VariableNode {
    fn from(text: &str) -> Self {
        VariableNode::Scalar(Scalar::Text(text.to_string()))
    }
}

impl From<String> for VariableNode {
    fn from(text: String) -> Self {
        VariableNode::Scalar(Scalar::Text(text))
    }
}

impl From<bool> for VariableNode {
    fn from(flag: bool) -> Self {
        VariableNode::Scalar(Scalar::Bool(flag))
    }
}

impl From<i64> for VariableNode {
    fn from(number: i64) -> Self {
        VariableNode::Scalar(Scalar::Number(number.into()))
    }
}

impl From<VariableMap> for VariableNode {
    fn from(map: VariableMap) -> Self {
        VariableNode::Map(map)
    }
}

/// An insertion-ordered mapping from key segments to nodes.
///
/// Keys are unique. Inserting an existing key replaces its node but keeps
/// the key's original position.
#[derive(Debug, Clone, Default)]
pub struct VariableMap {
    entries: Vec<(String, VariableNode)>,
    index: FxHashMap<String, usize>,
}

impl VariableMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node, returning the node it replaced.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        node: impl Into<VariableNode>,
    ) -> Option<VariableNode> {
        let key = key.into();
        let node = node.into();
        if let Some(&position) = self.index.get(&key) {
            return Some(std::mem::replace(&mut self.entries[position].1, node));
        }
        self.index.insert(key.clone(), self.entries.len());
        self.entries.push((key, node));
        None
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, node: impl Into<VariableNode>) -> Self {
        self.insert(key, node);
        self
    }

    pub fn get(&self, key: &str) -> Option<&VariableNode> {
        self.index.get(key).map(|&position| &self.entries[position].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &VariableNode)> {
        self.entries.iter().map(|(key, node)| (key.as_str(), node))
    }
}

impl PartialEq for VariableMap {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<K: Into<String>, V: Into<VariableNode>> FromIterator<(K, V)> for VariableMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = VariableMap::new();
        for (key, node) in iter {
            map.insert(key, node);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_preserves_key_order() {
        let node = VariableNode::from(json!({"zeta": "1", "alpha": "2", "mid": "3"}));
        let map = node.as_map().unwrap();
        let keys: Vec<&str> = map.iter().map(|(key, _)| key).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_from_json_tags_unsupported_values() {
        let node = VariableNode::from(json!({"list": [1, 2], "nothing": null}));
        let map = node.as_map().unwrap();
        assert_eq!(
            map.get("list"),
            Some(&VariableNode::Unsupported(ValueKind::Array))
        );
        assert_eq!(
            map.get("nothing"),
            Some(&VariableNode::Unsupported(ValueKind::Null))
        );
    }

    #[test]
    fn test_scalar_text() {
        assert_eq!(Scalar::Text("red".into()).text(), "red");
        assert_eq!(Scalar::Number(255.into()).text(), "255");
        assert_eq!(Scalar::Bool(true).text(), "true");
        assert!(Scalar::Quoted("a".into()).is_quoted());
        assert!(!Scalar::Text("a".into()).is_quoted());
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut map = VariableMap::new().with("sm", "1rem").with("md", "2rem");
        let previous = map.insert("sm", "0.5rem");

        assert_eq!(previous, Some(VariableNode::from("1rem")));
        let entries: Vec<(&str, &VariableNode)> = map.iter().collect();
        assert_eq!(entries[0], ("sm", &VariableNode::from("0.5rem")));
        assert_eq!(entries[1].0, "md");
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_deserialize_node() {
        let node: VariableNode = serde_json::from_str(r#"{"a": {"b": true}}"#).unwrap();
        let inner = node.as_map().unwrap().get("a").unwrap().as_map().unwrap();
        assert_eq!(inner.get("b"), Some(&VariableNode::from(true)));
    }
}
