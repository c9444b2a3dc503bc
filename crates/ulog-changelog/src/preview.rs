//! Dry-run previews: the line diff a write would cause.
//!
//! Uses the `similar` crate (Myers diff) and groups changes into hunks with
//! three lines of context.

use std::fmt;
use std::path::{Path, PathBuf};

use similar::{ChangeTag, TextDiff};

/// The diff between a file's current and pending contents.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilePreview {
    pub path: PathBuf,
    /// `false` when the file does not exist yet.
    pub exists: bool,
    pub hunks: Vec<PreviewHunk>,
}

impl FilePreview {
    /// `true` if the write would not change the file.
    pub fn is_unchanged(&self) -> bool {
        self.exists && self.hunks.is_empty()
    }

    pub fn additions(&self) -> usize {
        self.hunks
            .iter()
            .flat_map(|h| &h.lines)
            .filter(|l| matches!(l, PreviewLine::Added(_)))
            .count()
    }

    pub fn deletions(&self) -> usize {
        self.hunks
            .iter()
            .flat_map(|h| &h.lines)
            .filter(|l| matches!(l, PreviewLine::Removed(_)))
            .count()
    }
}

/// A contiguous region of changes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreviewHunk {
    /// 1-based start line in the current file.
    pub old_start: usize,
    pub old_count: usize,
    /// 1-based start line in the pending file.
    pub new_start: usize,
    pub new_count: usize,
    pub lines: Vec<PreviewLine>,
}

impl PreviewHunk {
    /// The `@@ -a,b +c,d @@` line that opens the hunk.
    pub fn header(&self) -> String {
        format!(
            "@@ -{},{} +{},{} @@",
            self.old_start, self.old_count, self.new_start, self.new_count
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PreviewLine {
    Context(String),
    Added(String),
    Removed(String),
}

/// Unified-diff form: the text behind a ` `, `+` or `-` marker.
impl fmt::Display for PreviewLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Context(text) => write!(f, " {text}"),
            Self::Added(text) => write!(f, "+{text}"),
            Self::Removed(text) => write!(f, "-{text}"),
        }
    }
}

/// Diff `old` (the current contents, `None` if the file is missing) against
/// `new`.
pub fn preview(path: &Path, old: Option<&str>, new: &str) -> FilePreview {
    let exists = old.is_some();
    let old = old.unwrap_or("");
    if old == new {
        return FilePreview {
            path: path.to_path_buf(),
            exists,
            hunks: Vec::new(),
        };
    }

    let text_diff = TextDiff::from_lines(old, new);
    let mut hunks = Vec::new();

    for group in text_diff.grouped_ops(3) {
        let mut lines = Vec::new();
        let (mut old_count, mut new_count) = (0usize, 0usize);
        let (old_start, new_start) = match group.first() {
            Some(op) => (op.old_range().start + 1, op.new_range().start + 1),
            None => continue,
        };

        for op in &group {
            for change in text_diff.iter_changes(op) {
                let text = change.value().trim_end_matches('\n').to_string();
                match change.tag() {
                    ChangeTag::Equal => {
                        lines.push(PreviewLine::Context(text));
                        old_count += 1;
                        new_count += 1;
                    }
                    ChangeTag::Delete => {
                        lines.push(PreviewLine::Removed(text));
                        old_count += 1;
                    }
                    ChangeTag::Insert => {
                        lines.push(PreviewLine::Added(text));
                        new_count += 1;
                    }
                }
            }
        }

        hunks.push(PreviewHunk {
            old_start,
            old_count,
            new_start,
            new_count,
            lines,
        });
    }

    FilePreview {
        path: path.to_path_buf(),
        exists,
        hunks,
    }
}

impl fmt::Display for FilePreview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let old_label = if self.exists {
            self.path.display().to_string()
        } else {
            "/dev/null".to_string()
        };
        writeln!(f, "--- {old_label}")?;
        writeln!(f, "+++ {}", self.path.display())?;
        for hunk in &self.hunks {
            writeln!(f, "{}", hunk.header())?;
            for line in &hunk.lines {
                writeln!(f, "{line}")?;
            }
        }
        Ok(())
    }
}
