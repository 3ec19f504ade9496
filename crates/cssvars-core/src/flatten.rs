//! Flattening of nested variable maps.
//!
//! Walks a [`VariableNode`] tree in insertion order and joins the key path of
//! every scalar leaf into a single variable name:
//!
//! ```text
//! { color: { blue: { default: "blue", 500: "#0000FF" } } }
//!        │
//!        ▼
//! color-blue      = blue
//! color-blue-500  = #0000FF
//! ```
//!
//! Leaves that cannot become variables are skipped and recorded as
//! [`Problem`]s; their siblings are still flattened.

use std::fmt;

use crate::node::{Scalar, ValueKind, VariableMap, VariableNode};

/// Default string placed between nested key segments.
pub const DEFAULT_SEPARATOR: &str = "-";

/// Default key that assigns a value to its parent's own name.
pub const DEFAULT_SELF_KEY: &str = "default";

/// Default maximum number of segments in a variable name.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// A variable value ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CssValue {
    pub text: String,
    /// Render as a quoted string literal.
    pub quoted: bool,
}

impl CssValue {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            quoted: false,
        }
    }

    pub fn quoted(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            quoted: true,
        }
    }

    /// Empty values are always quoted so the declaration stays valid.
    pub fn needs_quotes(&self) -> bool {
        self.quoted || self.text.is_empty()
    }
}

impl From<&Scalar> for CssValue {
    fn from(scalar: &Scalar) -> Self {
        Self {
            text: scalar.text().into_owned(),
            quoted: scalar.is_quoted(),
        }
    }
}

/// A single flattened variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatEntry {
    /// Joined variable name, without the leading `--`.
    pub name: String,
    pub value: CssValue,
}

impl FlatEntry {
    pub fn new(name: impl Into<String>, value: CssValue) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// What went wrong with part of a variable map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProblemKind {
    /// The tree root is not a mapping.
    RootNotMapping,
    /// A value is neither a scalar nor a mapping.
    UnsupportedValue(ValueKind),
    /// A branch nests deeper than the configured limit.
    TooDeep { limit: usize },
    /// The key path joins to an empty variable name.
    EmptyName,
}

/// A structural problem found while flattening.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem {
    /// Dotted key path of the offending value (empty for the root).
    pub path: String,
    pub kind: ProblemKind,
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = if self.path.is_empty() {
            "<root>"
        } else {
            self.path.as_str()
        };
        match &self.kind {
            ProblemKind::RootNotMapping => write!(f, "{}: root must be a mapping", path),
            ProblemKind::UnsupportedValue(kind) => {
                write!(f, "{}: unsupported {} value", path, kind)
            }
            ProblemKind::TooDeep { limit } => {
                write!(f, "{}: nesting deeper than {} levels", path, limit)
            }
            ProblemKind::EmptyName => write!(f, "{}: empty variable name", path),
        }
    }
}

/// Output of a flatten pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Flattened {
    pub entries: Vec<FlatEntry>,
    pub problems: Vec<Problem>,
}

/// Flattens variable trees into ordered name/value pairs.
#[derive(Debug, Clone)]
pub struct Flattener {
    separator: String,
    self_key: Option<String>,
    max_depth: usize,
}

impl Flattener {
    /// Create a flattener joining segments with `separator`.
    pub fn new(separator: impl Into<String>) -> Self {
        Self {
            separator: separator.into(),
            self_key: Some(DEFAULT_SELF_KEY.to_string()),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Set the key that names its parent's own value, or `None` to treat
    /// every key as a nested segment.
    pub fn with_self_key(mut self, self_key: Option<String>) -> Self {
        self.self_key = self_key;
        self
    }

    /// Set the maximum number of segments in a variable name.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth.max(1);
        self
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Flatten a single variable tree.
    ///
    /// An empty root mapping yields nothing and is not a problem.
    pub fn flatten(&self, node: &VariableNode) -> Flattened {
        let mut out = Flattened::default();
        match node {
            VariableNode::Map(map) => {
                let mut path = Vec::new();
                self.walk(map, &mut path, &mut out);
            }
            VariableNode::Scalar(_) | VariableNode::Unsupported(_) => {
                out.problems.push(Problem {
                    path: String::new(),
                    kind: ProblemKind::RootNotMapping,
                });
            }
        }
        out
    }

    fn walk<'a>(&self, map: &'a VariableMap, path: &mut Vec<&'a str>, out: &mut Flattened) {
        for (key, node) in map.iter() {
            match node {
                VariableNode::Scalar(scalar) => {
                    path.push(key);
                    let name = if self.is_self_key(key) && path.len() > 1 {
                        path[..path.len() - 1].join(self.separator.as_str())
                    } else {
                        path.join(self.separator.as_str())
                    };
                    if name.is_empty() {
                        out.problems.push(Problem {
                            path: path.join("."),
                            kind: ProblemKind::EmptyName,
                        });
                    } else {
                        out.entries.push(FlatEntry::new(name, CssValue::from(scalar)));
                    }
                    path.pop();
                }
                VariableNode::Map(inner) => {
                    path.push(key);
                    // Children of `inner` would carry one more segment than `path`.
                    if path.len() + 1 > self.max_depth {
                        out.problems.push(Problem {
                            path: path.join("."),
                            kind: ProblemKind::TooDeep {
                                limit: self.max_depth,
                            },
                        });
                    } else {
                        self.walk(inner, path, out);
                    }
                    path.pop();
                }
                VariableNode::Unsupported(kind) => {
                    path.push(key);
                    out.problems.push(Problem {
                        path: path.join("."),
                        kind: ProblemKind::UnsupportedValue(*kind),
                    });
                    path.pop();
                }
            }
        }
    }

    fn is_self_key(&self, key: &str) -> bool {
        self.self_key.as_deref() == Some(key)
    }
}

impl Default for Flattener {
    fn default() -> Self {
        Self::new(DEFAULT_SEPARATOR)
    }
}

/// Flatten `node` with the default self key and depth limit.
pub fn flatten(node: &VariableNode, separator: &str) -> Flattened {
    Flattener::new(separator).flatten(node)
}
