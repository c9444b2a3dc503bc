//! Publishing for unreleased-log.
//!
//! After a run has written its files, a [`Publisher`] may commit and push
//! them. [`GitPublisher`] does this from CI: it detects the provider from the
//! environment, rewrites the `origin` URL with the provider's token, and
//! pushes to the current branch.
//!
//! The git invocations are planned by [`publish_plan`], a pure function of
//! the detected [`CiContext`], so they can be checked without running git.

pub mod ci;
pub mod error;
pub mod git;

pub use ci::{detect, CiContext, CiProvider};
pub use error::{PublishError, PublishResult};
pub use git::{
    has_markdown_changes, publish_plan, Committer, GitCommand, GitPublisher, PublishOutcome,
    Publisher, COMMIT_MESSAGE,
};
