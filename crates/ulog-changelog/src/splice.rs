//! Splicing rendered notes into an existing changelog.
//!
//! The changelog is treated as lines split on `\n`. The notes go immediately
//! before the first line starting with [`RELEASE_MARKER`], followed by a
//! blank line, [`SEPARATOR`], and another blank line. Everything else is kept
//! byte for byte. A changelog without such a line is left unchanged.
//! Splicing the same notes twice inserts them twice.

use std::fs;
use std::path::Path;

use tracing::{info, warn};
use ulog_render::RenderedDocument;

use crate::error::{ChangelogError, ChangelogResult};
use crate::unreleased::write_text;

/// Prefix of a release heading line.
pub const RELEASE_MARKER: &str = "##";

/// Horizontal rule closing an inserted block.
pub const SEPARATOR: &str = "---";

/// Where the notes ended up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SplicePosition {
    /// Inserted before this (0-based) line of the original changelog.
    Before { line: usize },
    /// No line starts with the release marker; the changelog is unchanged.
    NoMarker,
    /// The document was empty; nothing changed.
    Skipped,
}

/// Result of a splice: the new changelog text and where the notes went.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Splice {
    pub text: String,
    pub position: SplicePosition,
}

/// Splice `doc` into the changelog text `existing`.
pub fn splice(existing: &str, doc: &RenderedDocument) -> Splice {
    let unchanged = |position| Splice {
        text: existing.to_string(),
        position,
    };
    if doc.is_empty() {
        return unchanged(SplicePosition::Skipped);
    }

    let lines: Vec<&str> = existing.split('\n').collect();
    let Some(index) = lines.iter().position(|line| line.starts_with(RELEASE_MARKER)) else {
        return unchanged(SplicePosition::NoMarker);
    };

    let notes = doc.lines();
    let mut out: Vec<&str> = Vec::with_capacity(lines.len() + notes.len() + 3);
    out.extend_from_slice(&lines[..index]);
    out.extend_from_slice(&notes);
    out.extend_from_slice(&["", SEPARATOR, ""]);
    out.extend_from_slice(&lines[index..]);
    Splice {
        text: out.join("\n"),
        position: SplicePosition::Before { line: index },
    }
}

/// Splice `doc` into the changelog file at `path` and rewrite it in full.
///
/// The file must already exist. It is only rewritten when the notes were
/// inserted.
pub fn update_changelog(path: &Path, doc: &RenderedDocument) -> ChangelogResult<Splice> {
    let existing = fs::read_to_string(path).map_err(|source| ChangelogError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let spliced = splice(&existing, doc);
    match spliced.position {
        SplicePosition::Before { .. } => {
            write_text(path, &spliced.text)?;
            info!(path = %path.display(), position = ?spliced.position, "updated changelog");
        }
        SplicePosition::NoMarker => {
            warn!(
                path = %path.display(),
                marker = RELEASE_MARKER,
                "no release heading, changelog left unchanged"
            );
        }
        SplicePosition::Skipped => {}
    }
    Ok(spliced)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHANGELOG: &str = "# Changelog\n\nAll notable changes.\n\n## [1.2.0] - 2024-01-01\n\n- Old entry\n\n## [1.1.0]\n\n- Older\n";

    fn doc() -> RenderedDocument {
        RenderedDocument::new("## [Fixed]\n\n- New fix")
    }

    #[test]
    fn inserts_before_first_release_heading() {
        let spliced = splice(CHANGELOG, &doc());
        assert_eq!(spliced.position, SplicePosition::Before { line: 4 });
        assert_eq!(
            spliced.text,
            "# Changelog\n\nAll notable changes.\n\n## [Fixed]\n\n- New fix\n\n---\n\n## [1.2.0] - 2024-01-01\n\n- Old entry\n\n## [1.1.0]\n\n- Older\n"
        );
    }

    #[test]
    fn original_lines_are_preserved() {
        let spliced = splice(CHANGELOG, &doc());
        let new_lines: Vec<&str> = spliced.text.split('\n').collect();
        let inserted = doc().lines().len() + 3;
        let mut without_block = new_lines.clone();
        without_block.drain(4..4 + inserted);
        assert_eq!(without_block.join("\n"), CHANGELOG);
    }

    #[test]
    fn deeper_headings_also_match_the_marker() {
        let spliced = splice("# Title\n### Note\n## [1.0]\n", &doc());
        assert_eq!(spliced.position, SplicePosition::Before { line: 1 });
    }

    #[test]
    fn marker_must_start_the_line() {
        let spliced = splice("# Title\n  ## indented\n", &doc());
        assert_eq!(spliced.position, SplicePosition::NoMarker);
    }

    #[test]
    fn changelog_without_release_heading_is_unchanged() {
        let existing = "# Changelog\n\nNothing released yet.\n";
        let spliced = splice(existing, &doc());
        assert_eq!(spliced.position, SplicePosition::NoMarker);
        assert_eq!(spliced.text, existing);
    }

    #[test]
    fn empty_changelog_stays_empty() {
        let spliced = splice("", &doc());
        assert_eq!(spliced.position, SplicePosition::NoMarker);
        assert_eq!(spliced.text, "");
    }

    #[test]
    fn empty_document_changes_nothing() {
        let spliced = splice(CHANGELOG, &RenderedDocument::default());
        assert_eq!(spliced.position, SplicePosition::Skipped);
        assert_eq!(spliced.text, CHANGELOG);
    }

    #[test]
    fn crlf_lines_survive() {
        let spliced = splice("# T\r\n## [1.0]\r\n", &doc());
        assert_eq!(spliced.text, "# T\r\n## [Fixed]\n\n- New fix\n\n---\n\n## [1.0]\r\n");
    }

    #[test]
    fn second_splice_duplicates_the_block() {
        let once = splice(CHANGELOG, &doc());
        let twice = splice(&once.text, &doc());
        assert_eq!(twice.text.matches("- New fix").count(), 2);
    }

    #[test]
    fn update_changelog_rewrites_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("CHANGELOG.md");
        fs::write(&path, CHANGELOG).unwrap();

        let spliced = update_changelog(&path, &doc()).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), spliced.text);
    }

    #[test]
    fn update_changelog_leaves_file_without_marker_alone() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("CHANGELOG.md");
        fs::write(&path, "# Changelog\n").unwrap();

        let spliced = update_changelog(&path, &doc()).unwrap();
        assert_eq!(spliced.position, SplicePosition::NoMarker);
        assert_eq!(fs::read_to_string(&path).unwrap(), "# Changelog\n");
    }

    #[test]
    fn update_changelog_requires_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("CHANGELOG.md");
        let err = update_changelog(&path, &doc()).unwrap_err();
        assert!(matches!(err, ChangelogError::Read { .. }));
        assert!(!path.exists());
    }
}
