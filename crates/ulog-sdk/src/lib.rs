//! High-level API for unreleased-log.
//!
//! [`UnreleasedLog`] runs the whole pipeline for one [`RunConfig`]: load the
//! fragments, annotate them with their tickets, merge, render, then write (or
//! preview) the outputs and remove the consumed fragments. This is the main
//! entry point for the CLI and for tools embedding the generator.

pub mod config;
pub mod error;
pub mod pipeline;
pub mod report;

pub use config::RunConfig;
pub use error::{SdkError, SdkResult};
pub use pipeline::UnreleasedLog;
pub use report::{RunOutcome, RunReport, RunStage, RunWarning};

// Re-export key types
pub use ulog_changelog::{CleanupReport, FilePreview, PreviewLine, SplicePosition};
pub use ulog_merge::MergeConflict;
pub use ulog_publish::{Committer, GitPublisher, PublishError, PublishOutcome, Publisher};
pub use ulog_render::RenderedDocument;
