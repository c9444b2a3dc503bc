//! Fragment loading for unreleased-log.
//!
//! Discovers `*.json` note fragments in a directory, validates and decodes
//! them, extracts the ticket embedded in each file name, and annotates leaf
//! notes with a link back to the ticket tracker.
//!
//! # Key Items
//!
//! - [`load_dir`] -- All-or-nothing load of a fragment directory
//! - [`extract_ticket`] -- Pure file-name scan for `sc-<digits>`
//! - [`TrackerUrl`] / [`annotate`] -- Ticket reference suffixes on leaves

pub mod annotate;
pub mod error;
pub mod loader;
pub mod ticket;

pub use annotate::{annotate, annotate_fragment, TrackerUrl, DEFAULT_TRACKER_URL};
pub use error::{FragmentError, FragmentResult};
pub use loader::{discover, load_dir, load_fragment, MERGED_SNAPSHOT_NAME};
pub use ticket::{extract_ticket, ticket_for_path};
