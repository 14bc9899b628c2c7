use std::path::{Path, PathBuf};

use log::info;
use tokio::fs;

use crate::core_command::error::CommandError;

/// Handles the `cd` command.
///
/// Resolves `target` against the current working directory (`..` walks to
/// the parent) and returns the new absolute working directory. On failure
/// the caller keeps its previous working directory; the error names the
/// requested path and distinguishes "does not exist" from "not a
/// directory".
pub async fn handle_cd(current_dir: &Path, target: &str) -> Result<PathBuf, CommandError> {
    let requested = current_dir.join(target);

    let resolved = match fs::canonicalize(&requested).await {
        Ok(path) => path,
        Err(_) => return Err(CommandError::DirectoryNotFound { path: requested }),
    };

    match fs::metadata(&resolved).await {
        Ok(meta) if meta.is_dir() => {
            info!("changed directory to {}", resolved.display());
            Ok(resolved)
        }
        Ok(_) => Err(CommandError::NotADirectory { path: requested }),
        Err(_) => Err(CommandError::DirectoryNotFound { path: requested }),
    }
}
