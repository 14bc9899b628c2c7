use std::path::Path;

use log::info;
use tokio::fs;

use crate::core_command::error::CommandError;

/// Handles the `rm` command.
///
/// A file argument removes that single file; a directory argument removes
/// the directory and everything beneath it. The working directory itself
/// never changes, whatever the outcome.
pub async fn handle_rm(current_dir: &Path, name: &str) -> Result<String, CommandError> {
    let target = current_dir.join(name);

    let metadata = match fs::metadata(&target).await {
        Ok(meta) => meta,
        Err(_) => return Err(CommandError::NoSuchEntry { path: target }),
    };

    if metadata.is_dir() {
        fs::remove_dir_all(&target)
            .await
            .map_err(|source| CommandError::RemoveFailed {
                path: target.clone(),
                source,
            })?;
        info!("removed directory tree {}", target.display());
    } else {
        fs::remove_file(&target)
            .await
            .map_err(|source| CommandError::RemoveFailed {
                path: target.clone(),
                source,
            })?;
        info!("removed file {}", target.display());
    }

    Ok(format!("Removed {}", target.display()))
}
