use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use ulog_fragment::{TrackerUrl, DEFAULT_TRACKER_URL, MERGED_SNAPSHOT_NAME};
use ulog_publish::Committer;

use crate::error::{SdkError, SdkResult};

/// Settings for one run. Built once, then only read.
///
/// Every field has a default, so a TOML file only needs the keys it changes.
/// Keys are kebab-case, matching the command-line flags.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct RunConfig {
    /// Splice the notes into the changelog as well.
    pub changelog_write: bool,
    /// Keep fragment files after a successful run.
    pub skip_cleanup: bool,
    /// Directory holding the changelog and the unreleased document.
    pub output_dir: PathBuf,
    /// Directory scanned for `*.json` fragments.
    pub files_dir: PathBuf,
    pub changelog_file: String,
    pub unreleased_file: String,
    /// Ticket tracker base URL.
    pub ticket_url: String,
    /// Also write the merged tree to `<files-dir>/merged-changes.json`.
    pub write_merged_json: bool,
    /// Compute everything but write and delete nothing.
    pub dry_run: bool,
    /// Commit and push the outputs from CI afterwards.
    pub publish: bool,
    pub committer_name: Option<String>,
    pub committer_email: Option<String>,
    pub verbose: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            changelog_write: false,
            skip_cleanup: false,
            output_dir: PathBuf::from("."),
            files_dir: PathBuf::from("."),
            changelog_file: "CHANGELOG.md".into(),
            unreleased_file: "UNRELEASED.md".into(),
            ticket_url: DEFAULT_TRACKER_URL.into(),
            write_merged_json: false,
            dry_run: false,
            publish: false,
            committer_name: None,
            committer_email: None,
            verbose: false,
        }
    }
}

impl RunConfig {
    pub fn from_toml_str(s: &str) -> SdkResult<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Read a TOML config file.
    pub fn load(path: &Path) -> SdkResult<Self> {
        let raw = fs::read_to_string(path).map_err(|source| SdkError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    pub fn unreleased_path(&self) -> PathBuf {
        self.output_dir.join(&self.unreleased_file)
    }

    pub fn changelog_path(&self) -> PathBuf {
        self.output_dir.join(&self.changelog_file)
    }

    pub fn snapshot_path(&self) -> PathBuf {
        self.files_dir.join(MERGED_SNAPSHOT_NAME)
    }

    pub fn tracker(&self) -> TrackerUrl {
        TrackerUrl::new(self.ticket_url.as_str())
    }

    /// The commit identity, if both name and email are set.
    pub fn committer(&self) -> Option<Committer> {
        match (&self.committer_name, &self.committer_email) {
            (Some(name), Some(email)) => Some(Committer {
                name: name.clone(),
                email: email.clone(),
            }),
            _ => None,
        }
    }
}
