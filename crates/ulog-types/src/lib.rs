//! Foundation types for unreleased-log.
//!
//! Every other `ulog-*` crate depends on `ulog-types`.
//!
//! # Key Types
//!
//! - [`Node`] -- Tagged note tree (leaf, section, list)
//! - [`SectionKey`] -- Named key or merge-conflict placeholder
//! - [`TicketId`] -- Tracker identifier of the form `sc-<digits>`
//! - [`SortKey`] -- Merge ordering key (ticketed before unticketed)
//! - [`Fragment`] -- One parsed note file

pub mod error;
pub mod fragment;
pub mod node;
pub mod ticket;

pub use error::TypeError;
pub use fragment::Fragment;
pub use node::{Node, SectionKey};
pub use ticket::{SortKey, TicketId, TicketNumber, TICKET_PREFIX};
