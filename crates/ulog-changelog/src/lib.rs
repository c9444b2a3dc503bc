//! Output side of unreleased-log.
//!
//! Writes the standalone unreleased document, splices rendered notes into
//! the project changelog before its first release heading, previews those
//! writes as line diffs, and removes consumed fragments.
//!
//! # Key Items
//!
//! - [`write_unreleased`] -- Create or truncate the unreleased document
//! - [`splice`] / [`update_changelog`] -- Insert notes before the first `##` line
//! - [`preview`] / [`FilePreview`] -- Line diff of a pending write
//! - [`remove_fragments`] / [`CleanupReport`] -- Best-effort fragment deletion
//! - [`write_snapshot`] -- Merged tree as JSON

pub mod cleanup;
pub mod error;
pub mod preview;
pub mod snapshot;
pub mod splice;
pub mod unreleased;

pub use cleanup::{remove_fragments, CleanupReport};
pub use error::{ChangelogError, ChangelogResult};
pub use preview::{preview, FilePreview, PreviewHunk, PreviewLine};
pub use snapshot::write_snapshot;
pub use splice::{splice, update_changelog, Splice, SplicePosition, RELEASE_MARKER, SEPARATOR};
pub use unreleased::write_unreleased;
