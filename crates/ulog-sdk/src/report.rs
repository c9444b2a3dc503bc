use std::fmt;
use std::path::PathBuf;

use ulog_changelog::{ChangelogError, CleanupReport, FilePreview, SplicePosition};
use ulog_merge::MergeConflict;
use ulog_render::RenderedDocument;

/// How a run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    /// No fragments were found; nothing was written.
    NothingToDo,
    Completed,
}

/// The step a non-fatal failure happened in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunStage {
    Snapshot,
    Unreleased,
    Changelog,
}

impl fmt::Display for RunStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Snapshot => write!(f, "merged snapshot"),
            Self::Unreleased => write!(f, "unreleased document"),
            Self::Changelog => write!(f, "changelog"),
        }
    }
}

/// A failure that was reported but did not stop the run.
#[derive(Debug)]
pub struct RunWarning {
    pub stage: RunStage,
    pub error: ChangelogError,
}

impl fmt::Display for RunWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.stage, self.error)
    }
}

/// Everything a run did.
#[derive(Debug)]
pub struct RunReport {
    pub outcome: RunOutcome,
    /// Fragment files that were merged, in discovery order.
    pub fragments: Vec<PathBuf>,
    pub conflicts: Vec<MergeConflict>,
    pub document: RenderedDocument,
    /// Files written, in write order.
    pub written: Vec<PathBuf>,
    /// Where the notes went in the changelog, if it was updated or previewed.
    pub changelog: Option<SplicePosition>,
    /// Pending changes, filled only in dry-run mode.
    pub previews: Vec<FilePreview>,
    pub warnings: Vec<RunWarning>,
    pub cleanup: CleanupReport,
}

impl RunReport {
    pub(crate) fn new(outcome: RunOutcome, fragments: Vec<PathBuf>) -> Self {
        Self {
            outcome,
            fragments,
            conflicts: Vec::new(),
            document: RenderedDocument::default(),
            written: Vec::new(),
            changelog: None,
            previews: Vec::new(),
            warnings: Vec::new(),
            cleanup: CleanupReport::default(),
        }
    }

    pub(crate) fn warn(&mut self, stage: RunStage, error: ChangelogError) {
        self.warnings.push(RunWarning { stage, error });
    }

    /// `true` if nothing failed along the way, cleanup included.
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty() && self.cleanup.is_complete()
    }
}
