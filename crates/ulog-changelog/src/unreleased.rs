use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::info;
use ulog_render::RenderedDocument;

use crate::error::{ChangelogError, ChangelogResult};

/// Create or truncate `path` with the rendered document. Returns the number
/// of bytes written.
pub fn write_unreleased(path: &Path, doc: &RenderedDocument) -> ChangelogResult<usize> {
    write_text(path, doc.as_str())?;
    info!(path = %path.display(), bytes = doc.as_str().len(), "wrote unreleased document");
    Ok(doc.as_str().len())
}

/// Write `contents` to `path` in full, creating parent directories.
pub(crate) fn write_text(path: &Path, contents: &str) -> ChangelogResult<()> {
    let write_err = |source| ChangelogError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
    }

    let file = File::create(path).map_err(write_err)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(contents.as_bytes()).map_err(write_err)?;
    writer.flush().map_err(write_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_and_truncates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("UNRELEASED.md");
        fs::write(&path, "old content that is much longer than the new one").unwrap();

        let doc = RenderedDocument::new("## [Fixed]\n\n- a");
        let written = write_unreleased(&path, &doc).unwrap();
        assert_eq!(written, doc.as_str().len());
        assert_eq!(fs::read_to_string(&path).unwrap(), "## [Fixed]\n\n- a");
    }

    #[test]
    fn creates_missing_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("docs").join("UNRELEASED.md");
        write_unreleased(&path, &RenderedDocument::new("- a")).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "- a");
    }

    #[test]
    fn unwritable_target_is_a_write_error() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be opened as a file.
        let err = write_unreleased(dir.path(), &RenderedDocument::new("- a")).unwrap_err();
        assert!(matches!(err, ChangelogError::Write { .. }));
    }
}
