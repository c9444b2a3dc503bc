//! Git-based publishing.

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, info};

use crate::ci::{detect, CiContext, CiProvider};
use crate::error::{PublishError, PublishResult};

/// Commit message used for published notes.
pub const COMMIT_MESSAGE: &str = "ci: unreleased changelog published";

/// Result of a publish attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PublishOutcome {
    /// The working tree had no Markdown changes to commit.
    NoChanges,
    /// Changes were committed and pushed to `branch`.
    Pushed { branch: String },
}

/// Something that can publish the files a run produced.
pub trait Publisher {
    fn publish(&self) -> PublishResult<PublishOutcome>;
}

/// Identity used for the publishing commit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Committer {
    pub name: String,
    pub email: String,
}

/// One `git` invocation.
#[derive(Clone, PartialEq, Eq)]
pub struct GitCommand {
    pub args: Vec<String>,
}

impl GitCommand {
    fn new<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

/// Shows the command with credentials in URLs masked.
impl fmt::Display for GitCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("git")?;
        for arg in &self.args {
            write!(f, " {}", redact_url(arg))?;
        }
        Ok(())
    }
}

impl fmt::Debug for GitCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GitCommand({self})")
    }
}

fn redact_url(arg: &str) -> String {
    match (arg.split_once("://"), arg.rsplit_once('@')) {
        (Some((scheme, _)), Some((_, location))) => format!("{scheme}://***@{location}"),
        _ => arg.to_string(),
    }
}

/// The git commands that publish the generated notes, in order.
pub fn publish_plan(ctx: &CiContext, committer: Option<&Committer>) -> Vec<GitCommand> {
    let mut plan = Vec::new();
    if let Some(c) = committer {
        plan.push(GitCommand::new(["config", "user.name", c.name.as_str()]));
        plan.push(GitCommand::new(["config", "user.email", c.email.as_str()]));
    }
    plan.push(GitCommand::new(["remote", "set-url", "origin", ctx.remote_url.as_str()]));
    if ctx.provider == CiProvider::GitLab {
        plan.push(GitCommand::new(["checkout", ctx.branch.as_str()]));
    }
    plan.push(GitCommand::new(["add", "-u"]));
    plan.push(GitCommand::new(["commit", "-m", COMMIT_MESSAGE]));
    plan.push(GitCommand::new(["push", "-q", "origin", ctx.branch.as_str()]));
    plan
}

/// `true` if `git status --porcelain` output lists a changed `.md` file.
pub fn has_markdown_changes(porcelain: &str) -> bool {
    porcelain
        .lines()
        .filter(|line| line.len() > 3)
        .map(|line| line[3..].trim().trim_matches('"'))
        .map(|path| path.rsplit(" -> ").next().unwrap_or(path))
        .any(|path| path.ends_with(".md"))
}

/// Publishes by committing and pushing from a CI job.
pub struct GitPublisher {
    workdir: PathBuf,
    committer: Option<Committer>,
    ctx: CiContext,
}

impl GitPublisher {
    pub fn new(workdir: impl Into<PathBuf>, committer: Option<Committer>, ctx: CiContext) -> Self {
        Self {
            workdir: workdir.into(),
            committer,
            ctx,
        }
    }

    /// Build a publisher for the CI job described by the process environment.
    pub fn from_env(workdir: impl Into<PathBuf>, committer: Option<Committer>) -> PublishResult<Self> {
        let ctx = detect(|name| std::env::var(name).ok())?;
        info!(provider = %ctx.provider, branch = %ctx.branch, "detected CI environment");
        Ok(Self::new(workdir, committer, ctx))
    }

    pub fn context(&self) -> &CiContext {
        &self.ctx
    }

    fn run(&self, command: &GitCommand) -> PublishResult<String> {
        debug!(%command, "running git");
        let output = Command::new("git")
            .args(&command.args)
            .current_dir(&self.workdir)
            .output()?;
        if !output.status.success() {
            return Err(PublishError::CommandFailed {
                command: command.to_string(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn workdir(&self) -> &Path {
        &self.workdir
    }
}

impl Publisher for GitPublisher {
    fn publish(&self) -> PublishResult<PublishOutcome> {
        let status = self.run(&GitCommand::new(["status", "--porcelain"]))?;
        if !has_markdown_changes(&status) {
            info!(workdir = %self.workdir().display(), "no markdown changes to publish");
            return Ok(PublishOutcome::NoChanges);
        }

        for command in publish_plan(&self.ctx, self.committer.as_ref()) {
            self.run(&command)?;
        }
        info!(branch = %self.ctx.branch, "published notes");
        Ok(PublishOutcome::Pushed {
            branch: self.ctx.branch.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(provider: CiProvider) -> CiContext {
        CiContext {
            provider,
            branch: "main".into(),
            remote_url: "https://tok@github.com/acme/app/".into(),
        }
    }

    fn rendered(plan: &[GitCommand]) -> Vec<String> {
        plan.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn github_plan_without_committer() {
        let plan = publish_plan(&ctx(CiProvider::GitHubActions), None);
        assert_eq!(
            rendered(&plan),
            vec![
                "git remote set-url origin https://***@github.com/acme/app/",
                "git add -u",
                "git commit -m ci: unreleased changelog published",
                "git push -q origin main",
            ]
        );
        assert_eq!(plan[0].args[3], "https://tok@github.com/acme/app/");
    }

    #[test]
    fn committer_is_configured_first() {
        let committer = Committer {
            name: "Release Bot".into(),
            email: "bot@example.com".into(),
        };
        let plan = publish_plan(&ctx(CiProvider::CircleCi), Some(&committer));
        assert_eq!(plan[0].args, vec!["config", "user.name", "Release Bot"]);
        assert_eq!(plan[1].args, vec!["config", "user.email", "bot@example.com"]);
        assert_eq!(plan.len(), 6);
    }

    #[test]
    fn gitlab_checks_out_branch_before_commit() {
        let plan = publish_plan(&ctx(CiProvider::GitLab), None);
        assert_eq!(plan[1].args, vec!["checkout", "main"]);
        assert_eq!(plan.last().unwrap().args, vec!["push", "-q", "origin", "main"]);
    }

    #[test]
    fn markdown_change_detection() {
        assert!(has_markdown_changes(" M CHANGELOG.md\n"));
        assert!(has_markdown_changes("?? UNRELEASED.md\n M src/lib.rs\n"));
        assert!(has_markdown_changes("R  old.txt -> docs/NOTES.md\n"));
        assert!(has_markdown_changes(" M \"docs/my notes.md\"\n"));
        assert!(!has_markdown_changes(" M src/lib.rs\n D unreleased/sc-1.json\n"));
        assert!(!has_markdown_changes(""));
    }

    #[test]
    fn redaction_only_touches_credential_urls() {
        assert_eq!(redact_url("https://a:b@host/x"), "https://***@host/x");
        assert_eq!(redact_url("bot@example.com"), "bot@example.com");
        assert_eq!(redact_url("main"), "main");
    }
}
