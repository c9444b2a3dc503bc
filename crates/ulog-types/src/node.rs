//! The note tree shared by every stage of a run.
//!
//! Fragments decode into a [`Node::Section`]; merging may turn colliding
//! leaves into [`Node::List`]s and, on a leaf/section conflict, park the
//! leaf inside the section under a [`SectionKey::Placeholder`].

use std::fmt;

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use serde_json::Value;

use crate::error::TypeError;

/// Key of a section entry.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum SectionKey {
    /// A key taken from a fragment.
    Named(String),
    /// A synthetic key for a value that was merged into a section without a
    /// name of its own. Displayed as `#<index>` so it cannot shadow a numeric
    /// fragment key.
    Placeholder(usize),
}

impl SectionKey {
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    /// The fragment key, if this is a named entry.
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Self::Named(name) => Some(name),
            Self::Placeholder(_) => None,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder(_))
    }
}

impl fmt::Display for SectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(name) => f.write_str(name),
            Self::Placeholder(index) => write!(f, "#{index}"),
        }
    }
}

/// A node in a note tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    /// A single note line.
    Leaf(String),
    /// An ordered mapping; entry order is insertion order.
    Section(Vec<(SectionKey, Node)>),
    /// Values collected under one key, in merge order.
    List(Vec<Node>),
}

impl Default for Node {
    fn default() -> Self {
        Self::empty_section()
    }
}

impl Node {
    pub fn empty_section() -> Self {
        Self::Section(Vec::new())
    }

    pub fn leaf(value: impl Into<String>) -> Self {
        Self::Leaf(value.into())
    }

    /// Convert any JSON value into a node.
    ///
    /// Strings become leaves, numbers and booleans become leaves holding their
    /// JSON text, and `null` becomes an empty leaf. Object key order is kept.
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Object(map) => Self::Section(
                map.into_iter()
                    .map(|(k, v)| (SectionKey::Named(k), Self::from_json(v)))
                    .collect(),
            ),
            Value::Array(items) => Self::List(items.into_iter().map(Self::from_json).collect()),
            Value::String(s) => Self::Leaf(s),
            Value::Null => Self::Leaf(String::new()),
            other => Self::Leaf(other.to_string()),
        }
    }

    /// Convert the root of a fragment, which must be a JSON object.
    pub fn from_fragment_json(value: Value) -> Result<Self, TypeError> {
        match value {
            Value::Object(_) => Ok(Self::from_json(value)),
            other => Err(TypeError::NotAnObject {
                found: json_kind(&other),
            }),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf(_))
    }

    pub fn is_section(&self) -> bool {
        matches!(self, Self::Section(_))
    }

    /// `true` for a section or list with no entries.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Leaf(_) => false,
            Self::Section(entries) => entries.is_empty(),
            Self::List(items) => items.is_empty(),
        }
    }

    /// Look up a named entry of a section.
    pub fn get(&self, name: &str) -> Option<&Node> {
        match self {
            Self::Section(entries) => entries
                .iter()
                .find(|(k, _)| k.as_name() == Some(name))
                .map(|(_, v)| v),
            _ => None,
        }
    }

    /// All leaf values, depth-first in tree order.
    pub fn leaves(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Self::Leaf(value) => out.push(value),
            Self::Section(entries) => {
                for (_, child) in entries {
                    child.collect_leaves(out);
                }
            }
            Self::List(items) => {
                for item in items {
                    item.collect_leaves(out);
                }
            }
        }
    }

    /// Rebuild the tree with every leaf passed through `f`.
    pub fn map_leaves<F>(self, f: &F) -> Self
    where
        F: Fn(String) -> String,
    {
        match self {
            Self::Leaf(value) => Self::Leaf(f(value)),
            Self::Section(entries) => Self::Section(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, v.map_leaves(f)))
                    .collect(),
            ),
            Self::List(items) => Self::List(items.into_iter().map(|n| n.map_leaves(f)).collect()),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Leaf(value) => serializer.serialize_str(value),
            Self::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Self::Section(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(&key.to_string(), value)?;
                }
                map.end()
            }
        }
    }
}
