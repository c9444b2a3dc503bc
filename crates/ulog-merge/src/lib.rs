//! Merge engine for unreleased-log.
//!
//! Orders fragments by ticket number and deep-union merges their note trees
//! into a single tree. Nothing is ever overwritten: colliding leaves are
//! collected into lists, and a leaf that collides with a section is kept
//! inside that section under a placeholder key (reported as a
//! [`MergeConflict`]).

pub mod merge;
pub mod order;

pub use merge::{merge_fragments, merge_trees, ConflictKind, MergeConflict, MergeOutcome};
pub use order::order_fragments;
