pub mod check;
pub mod init;
pub mod preview;

pub use check::{check, CheckArgs};
pub use init::{init, InitArgs};
pub use preview::{preview, PreviewArgs};

use std::path::Path;

use anyhow::{Context, Result};
use blockcraft_schema::Project;

/// Read and parse a project file
pub(crate) fn read_project(path: &Path) -> Result<Project> {
    let source = std::fs::read_to_string(path).with_context(|| format!("Cannot read {}", path.display()))?;
    Project::from_json(&source).with_context(|| format!("{} is not a valid project", path.display()))
}
