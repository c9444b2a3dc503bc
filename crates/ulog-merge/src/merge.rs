//! Deep-union merge of note trees.
//!
//! Rules, applied recursively for every key present on both sides:
//!
//! | left \ right   | Section              | Leaf / List            |
//! |----------------|----------------------|------------------------|
//! | Section        | merge key by key     | right parked in left   |
//! | Leaf / List    | left parked in right | concatenated into List |
//!
//! "Parked" values go into the section under [`SectionKey::Placeholder`]
//! keys; a value parked from the left side precedes the section's own
//! entries. Placeholder entries never merge with anything, they only append.

use std::fmt;

use tracing::debug;
use ulog_types::{Fragment, Node, SectionKey};

use crate::order::order_fragments;

/// Which way round a leaf/section collision happened.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConflictKind {
    /// An earlier fragment had a section, a later one a value.
    ValueIntoSection,
    /// An earlier fragment had a value, a later one a section.
    SectionOverValue,
}

/// A key where fragments disagreed about leaf versus section.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MergeConflict {
    /// Named keys from the root down to the conflicting key.
    pub path: Vec<String>,
    pub kind: ConflictKind,
}

impl fmt::Display for MergeConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let what = match self.kind {
            ConflictKind::ValueIntoSection => "value merged into section",
            ConflictKind::SectionOverValue => "section merged over value",
        };
        write!(f, "{}: {what}", self.path.join("."))
    }
}

/// The merged tree plus any leaf/section conflicts met along the way.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MergeOutcome {
    pub tree: Node,
    pub conflicts: Vec<MergeConflict>,
}

impl MergeOutcome {
    /// `true` when there is nothing to render.
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }
}

/// Order fragments by ticket and merge their trees.
pub fn merge_fragments(fragments: Vec<Fragment>) -> MergeOutcome {
    merge_trees(order_fragments(fragments).into_iter().map(|f| f.tree))
}

/// Merge trees in the given order into one section.
pub fn merge_trees<I>(trees: I) -> MergeOutcome
where
    I: IntoIterator<Item = Node>,
{
    let mut merger = Merger::default();
    let mut tree = Node::empty_section();
    let mut count = 0usize;
    for next in trees {
        tree = merger.merge(tree, next);
        count += 1;
    }
    debug!(trees = count, conflicts = merger.conflicts.len(), "merged note trees");
    MergeOutcome {
        tree,
        conflicts: merger.conflicts,
    }
}

#[derive(Default)]
struct Merger {
    path: Vec<String>,
    conflicts: Vec<MergeConflict>,
}

impl Merger {
    fn merge(&mut self, left: Node, right: Node) -> Node {
        match (left, right) {
            (Node::Section(mut entries), Node::Section(other)) => {
                self.merge_entries(&mut entries, other);
                Node::Section(entries)
            }
            (Node::Section(mut entries), value) => {
                self.conflict(ConflictKind::ValueIntoSection);
                park(&mut entries, value);
                Node::Section(entries)
            }
            (value, Node::Section(other)) => {
                self.conflict(ConflictKind::SectionOverValue);
                let mut entries = Vec::with_capacity(other.len() + 1);
                park(&mut entries, value);
                self.merge_entries(&mut entries, other);
                Node::Section(entries)
            }
            (left, right) => {
                let mut items = into_items(left);
                items.extend(into_items(right));
                Node::List(items)
            }
        }
    }

    fn merge_entries(&mut self, entries: &mut Vec<(SectionKey, Node)>, other: Vec<(SectionKey, Node)>) {
        for (key, value) in other {
            match key {
                SectionKey::Named(name) => {
                    let existing = entries
                        .iter()
                        .position(|(k, _)| k.as_name() == Some(name.as_str()));
                    match existing {
                        Some(pos) => {
                            self.path.push(name);
                            let current = std::mem::take(&mut entries[pos].1);
                            entries[pos].1 = self.merge(current, value);
                            self.path.pop();
                        }
                        None => entries.push((SectionKey::Named(name), value)),
                    }
                }
                SectionKey::Placeholder(_) => {
                    let index = next_placeholder(entries);
                    entries.push((SectionKey::Placeholder(index), value));
                }
            }
        }
    }

    fn conflict(&mut self, kind: ConflictKind) {
        let conflict = MergeConflict {
            path: self.path.clone(),
            kind,
        };
        debug!(%conflict, "leaf/section conflict");
        self.conflicts.push(conflict);
    }
}

/// Append a value to a section under fresh placeholder keys. A list is
/// spread into one entry per item.
fn park(entries: &mut Vec<(SectionKey, Node)>, value: Node) {
    for item in into_items(value) {
        let index = next_placeholder(entries);
        entries.push((SectionKey::Placeholder(index), item));
    }
}

fn next_placeholder(entries: &[(SectionKey, Node)]) -> usize {
    entries
        .iter()
        .filter_map(|(k, _)| match k {
            SectionKey::Placeholder(i) => Some(*i + 1),
            SectionKey::Named(_) => None,
        })
        .max()
        .unwrap_or(0)
}

fn into_items(node: Node) -> Vec<Node> {
    match node {
        Node::List(items) => items,
        other => vec![other],
    }
}
