use std::fs;
use std::path::PathBuf;

use tracing::{debug, info, warn};
use ulog_changelog::{
    preview, remove_fragments, splice, update_changelog, write_snapshot, write_unreleased,
    ChangelogError, SplicePosition,
};
use ulog_fragment::{annotate_fragment, load_dir};
use ulog_merge::merge_fragments;
use ulog_render::{render, RenderedDocument};
use ulog_types::Node;

use crate::config::RunConfig;
use crate::error::SdkResult;
use crate::report::{RunOutcome, RunReport, RunStage};

/// One configured unreleased-log run.
pub struct UnreleasedLog {
    config: RunConfig,
}

impl UnreleasedLog {
    pub fn new(config: RunConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Load, annotate, merge, render and write.
    ///
    /// Only fragment loading can fail the run, and it happens before any file
    /// is touched. Write failures are collected in [`RunReport::warnings`].
    pub fn run(&self) -> SdkResult<RunReport> {
        let cfg = &self.config;
        let fragments = load_dir(&cfg.files_dir)?;
        if fragments.is_empty() {
            info!(dir = %cfg.files_dir.display(), "no fragments found");
            return Ok(RunReport::new(RunOutcome::NothingToDo, Vec::new()));
        }

        let paths: Vec<PathBuf> = fragments.iter().map(|f| f.source_path.clone()).collect();
        let tracker = cfg.tracker();
        let annotated = fragments
            .into_iter()
            .map(|f| annotate_fragment(f, &tracker))
            .collect();
        let merged = merge_fragments(annotated);
        for conflict in &merged.conflicts {
            warn!(%conflict, "fragments disagree on section and value");
        }

        let mut report = RunReport::new(RunOutcome::Completed, paths);
        report.conflicts = merged.conflicts.clone();

        if merged.is_empty() {
            info!(fragments = report.fragments.len(), "fragments contain no notes");
        } else {
            let doc = render(&merged.tree);
            if cfg.dry_run {
                self.preview_outputs(&merged.tree, &doc, &mut report);
            } else {
                self.write_outputs(&merged.tree, &doc, &mut report);
            }
            report.document = doc;
        }

        if cfg.dry_run || cfg.skip_cleanup {
            debug!(dry_run = cfg.dry_run, "keeping fragment files");
        } else {
            report.cleanup = remove_fragments(&report.fragments);
        }
        Ok(report)
    }

    fn write_outputs(&self, tree: &Node, doc: &RenderedDocument, report: &mut RunReport) {
        let cfg = &self.config;

        if cfg.write_merged_json {
            let path = cfg.snapshot_path();
            match write_snapshot(&path, tree) {
                Ok(()) => report.written.push(path),
                Err(e) => report.warn(RunStage::Snapshot, e),
            }
        }

        let path = cfg.unreleased_path();
        match write_unreleased(&path, doc) {
            Ok(_) => report.written.push(path),
            Err(e) => report.warn(RunStage::Unreleased, e),
        }

        if cfg.changelog_write {
            let path = cfg.changelog_path();
            match update_changelog(&path, doc) {
                Ok(spliced) => {
                    if matches!(spliced.position, SplicePosition::Before { .. }) {
                        report.written.push(path);
                    }
                    report.changelog = Some(spliced.position);
                }
                Err(e) => report.warn(RunStage::Changelog, e),
            }
        }
    }

    fn preview_outputs(&self, tree: &Node, doc: &RenderedDocument, report: &mut RunReport) {
        let cfg = &self.config;

        if cfg.write_merged_json {
            let path = cfg.snapshot_path();
            match serde_json::to_string(tree) {
                Ok(json) => {
                    let current = fs::read_to_string(&path).ok();
                    report.previews.push(preview(&path, current.as_deref(), &json));
                }
                Err(e) => report.warn(RunStage::Snapshot, e.into()),
            }
        }

        let path = cfg.unreleased_path();
        let current = fs::read_to_string(&path).ok();
        report
            .previews
            .push(preview(&path, current.as_deref(), doc.as_str()));

        if cfg.changelog_write {
            let path = cfg.changelog_path();
            match fs::read_to_string(&path) {
                Ok(existing) => {
                    let spliced = splice(&existing, doc);
                    report.changelog = Some(spliced.position);
                    report
                        .previews
                        .push(preview(&path, Some(&existing), &spliced.text));
                }
                Err(source) => report.warn(
                    RunStage::Changelog,
                    ChangelogError::Read { path, source },
                ),
            }
        }
    }
}
