use std::path::Path;

use tracing::info;
use ulog_types::Node;

use crate::error::ChangelogResult;
use crate::unreleased::write_text;

/// Write the merged tree as JSON. Placeholder keys are written as `#<index>`.
pub fn write_snapshot(path: &Path, tree: &Node) -> ChangelogResult<()> {
    let json = serde_json::to_string(tree)?;
    write_text(path, &json)?;
    info!(path = %path.display(), "wrote merged snapshot");
    Ok(())
}
