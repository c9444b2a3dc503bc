//! CI provider detection.

use std::fmt;

use crate::error::{PublishError, PublishResult};

/// CI systems the publisher knows how to push from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CiProvider {
    GitHubActions,
    CircleCi,
    GitLab,
}

impl fmt::Display for CiProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GitHubActions => write!(f, "GitHub Actions"),
            Self::CircleCi => write!(f, "CircleCI"),
            Self::GitLab => write!(f, "GitLab CI"),
        }
    }
}

/// Everything needed to push from the detected CI job.
#[derive(Clone, PartialEq, Eq)]
pub struct CiContext {
    pub provider: CiProvider,
    /// Branch to push to.
    pub branch: String,
    /// Authenticated `origin` URL. Contains a token.
    pub remote_url: String,
}

impl fmt::Debug for CiContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CiContext")
            .field("provider", &self.provider)
            .field("branch", &self.branch)
            .field("remote_url", &"<redacted>")
            .finish()
    }
}

/// Detect the CI provider and its push credentials.
///
/// `env` looks up an environment variable; pass `|k| std::env::var(k).ok()`
/// in production. Providers are checked in the order GitHub Actions,
/// CircleCI, GitLab.
pub fn detect<F>(env: F) -> PublishResult<CiContext>
where
    F: Fn(&str) -> Option<String>,
{
    let flag = |name: &str| env(name).is_some_and(|v| !v.is_empty() && v != "false");
    let require = |name: &'static str| {
        env(name)
            .filter(|v| !v.is_empty())
            .ok_or(PublishError::MissingEnv(name))
    };

    if flag("GITHUB_ACTIONS") {
        let token = require("GITHUB_TOKEN")?;
        let repository = require("GITHUB_REPOSITORY")?;
        return Ok(CiContext {
            provider: CiProvider::GitHubActions,
            branch: require("GITHUB_REF_NAME")?,
            remote_url: format!("https://{token}@github.com/{repository}/"),
        });
    }

    if flag("CIRCLECI") {
        let token = require("GITHUB_ACCESS_TOKEN")?;
        let user = require("CIRCLE_PROJECT_USERNAME")?;
        let repository = require("CIRCLE_PROJECT_REPONAME")?;
        return Ok(CiContext {
            provider: CiProvider::CircleCi,
            branch: require("CIRCLE_BRANCH")?,
            remote_url: format!("https://{token}@github.com/{user}/{repository}/"),
        });
    }

    if flag("GITLAB_CI") {
        let token = require("GITLAB_API_PRIVATE_TOKEN")?;
        let repository_url = require("CI_REPOSITORY_URL")?;
        let (_, location) = repository_url
            .rsplit_once('@')
            .ok_or_else(|| PublishError::InvalidEnv {
                name: "CI_REPOSITORY_URL",
                reason: "expected https://gitlab-ci-token:<token>@<host>/<path>".into(),
            })?;
        return Ok(CiContext {
            provider: CiProvider::GitLab,
            branch: require("CI_COMMIT_REF_NAME")?,
            remote_url: format!("https://gitlab-ci-token:{token}@{location}"),
        });
    }

    Err(PublishError::NoCiProvider)
}
