use std::path::PathBuf;

use clap::Parser;
use ulog_sdk::{RunConfig, SdkResult};

#[derive(Debug, Parser)]
#[command(
    name = "unreleased-log",
    about = "Merge unreleased note fragments into Markdown release notes",
    version
)]
pub struct Cli {
    /// Also splice the notes into the changelog
    #[arg(long, overrides_with = "no_changelog_write")]
    pub changelog_write: bool,

    /// Do not touch the changelog
    #[arg(long, overrides_with = "changelog_write")]
    pub no_changelog_write: bool,

    /// Keep fragment files after the run
    #[arg(long, overrides_with = "no_skip_cleanup")]
    pub skip_cleanup: bool,

    /// Delete fragment files after the run
    #[arg(long, overrides_with = "skip_cleanup")]
    pub no_skip_cleanup: bool,

    /// Directory holding the changelog and unreleased document [default: .]
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Directory containing the *.json fragments [default: .]
    #[arg(long, value_name = "DIR")]
    pub files_dir: Option<PathBuf>,

    /// Changelog file name [default: CHANGELOG.md]
    #[arg(long, value_name = "NAME")]
    pub changelog_file: Option<String>,

    /// Unreleased document file name [default: UNRELEASED.md]
    #[arg(long, value_name = "NAME")]
    pub unreleased_file: Option<String>,

    /// Ticket tracker base URL
    #[arg(long, value_name = "URL")]
    pub ticket_url: Option<String>,

    /// Write the merged tree to merged-changes.json in the fragment directory
    #[arg(long, overrides_with = "no_write_merged_json")]
    pub write_merged_json: bool,

    /// Do not write merged-changes.json
    #[arg(long, overrides_with = "write_merged_json")]
    pub no_write_merged_json: bool,

    /// Show what would change without writing or deleting anything
    #[arg(long, overrides_with = "no_dry_run")]
    pub dry_run: bool,

    /// Write and clean up for real
    #[arg(long, overrides_with = "dry_run")]
    pub no_dry_run: bool,

    /// Commit and push the generated files from CI
    #[arg(long, overrides_with = "no_publish")]
    pub publish: bool,

    /// Do not commit or push
    #[arg(long, overrides_with = "publish")]
    pub no_publish: bool,

    #[arg(long, value_name = "NAME")]
    pub committer_name: Option<String>,

    #[arg(long, value_name = "EMAIL")]
    pub committer_email: Option<String>,

    /// TOML file with defaults for any of the options above
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[arg(short, long, overrides_with = "no_verbose")]
    pub verbose: bool,

    /// Keep logging at warning level
    #[arg(long, overrides_with = "verbose")]
    pub no_verbose: bool,
}

impl Cli {
    /// The config file (if any) with command-line flags layered on top.
    pub fn run_config(&self) -> SdkResult<RunConfig> {
        let mut config = match &self.config {
            Some(path) => RunConfig::load(path)?,
            None => RunConfig::default(),
        };
        self.apply(&mut config);
        Ok(config)
    }

    fn apply(&self, config: &mut RunConfig) {
        set_switch(&mut config.changelog_write, self.changelog_write, self.no_changelog_write);
        set_switch(&mut config.skip_cleanup, self.skip_cleanup, self.no_skip_cleanup);
        set_switch(&mut config.write_merged_json, self.write_merged_json, self.no_write_merged_json);
        set_switch(&mut config.dry_run, self.dry_run, self.no_dry_run);
        set_switch(&mut config.publish, self.publish, self.no_publish);
        set_switch(&mut config.verbose, self.verbose, self.no_verbose);

        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.clone();
        }
        if let Some(dir) = &self.files_dir {
            config.files_dir = dir.clone();
        }
        if let Some(name) = &self.changelog_file {
            config.changelog_file = name.clone();
        }
        if let Some(name) = &self.unreleased_file {
            config.unreleased_file = name.clone();
        }
        if let Some(url) = &self.ticket_url {
            config.ticket_url = url.clone();
        }
        if let Some(name) = &self.committer_name {
            config.committer_name = Some(name.clone());
        }
        if let Some(email) = &self.committer_email {
            config.committer_email = Some(email.clone());
        }
    }
}

/// Apply a `--x` / `--no-x` pair; with neither flag the value is kept.
fn set_switch(value: &mut bool, on: bool, off: bool) {
    if on {
        *value = true;
    } else if off {
        *value = false;
    }
}
