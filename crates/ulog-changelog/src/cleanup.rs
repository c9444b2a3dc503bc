//! Removal of consumed fragment files.

use std::fs;
use std::io;
use std::path::PathBuf;

use tracing::{debug, warn};

/// What a cleanup pass removed and what it could not.
#[derive(Debug, Default)]
pub struct CleanupReport {
    pub removed: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, io::Error)>,
}

impl CleanupReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Delete every given fragment file. Failures are logged and collected,
/// never returned as errors.
pub fn remove_fragments(paths: &[PathBuf]) -> CleanupReport {
    let mut report = CleanupReport::default();
    for path in paths {
        match fs::remove_file(path) {
            Ok(()) => {
                debug!(path = %path.display(), "removed fragment");
                report.removed.push(path.clone());
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to remove fragment");
                report.failed.push((path.clone(), e));
            }
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removes_listed_files_only() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("sc-1.json");
        let b = dir.path().join("sc-2.json");
        let keep = dir.path().join("README.md");
        for p in [&a, &b, &keep] {
            fs::write(p, "{}").unwrap();
        }

        let report = remove_fragments(&[a.clone(), b.clone()]);
        assert!(report.is_complete());
        assert_eq!(report.removed, vec![a.clone(), b.clone()]);
        assert!(!a.exists());
        assert!(!b.exists());
        assert!(keep.exists());
    }

    #[test]
    fn failures_are_collected_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let present = dir.path().join("sc-1.json");
        let missing = dir.path().join("sc-404.json");
        fs::write(&present, "{}").unwrap();

        let report = remove_fragments(&[missing.clone(), present.clone()]);
        assert!(!report.is_complete());
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, missing);
        assert_eq!(report.removed, vec![present.clone()]);
        assert!(!present.exists());
    }
}
