use std::path::{Path, PathBuf};

use log::info;
use tokio::fs;

use crate::core_command::error::CommandError;

/// Handles the `mkdir` command.
///
/// Creates the named subdirectory if it does not already exist — a
/// pre-existing directory is not an error — and returns it as the new
/// working directory. An existing non-directory of the same name surfaces
/// as a creation failure.
pub async fn handle_mkdir(current_dir: &Path, name: &str) -> Result<PathBuf, CommandError> {
    let target = current_dir.join(name);

    fs::create_dir_all(&target)
        .await
        .map_err(|source| CommandError::CreateFailed {
            path: target.clone(),
            source,
        })?;

    let resolved = fs::canonicalize(&target)
        .await
        .map_err(|source| CommandError::CreateFailed {
            path: target.clone(),
            source,
        })?;

    info!("created directory {}", resolved.display());
    Ok(resolved)
}
