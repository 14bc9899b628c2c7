use std::path::{Path, PathBuf};

use log::info;
use tokio::fs;

use crate::core_command::error::CommandError;

/// Writes an uploaded payload into the working directory under the given
/// file name, replacing any existing file. The payload is opaque bytes —
/// it arrived as one framed message and is stored verbatim.
pub async fn store_file(
    current_dir: &Path,
    file_name: &str,
    payload: &[u8],
) -> Result<PathBuf, CommandError> {
    let path = current_dir.join(file_name);
    fs::write(&path, payload)
        .await
        .map_err(|source| CommandError::UnwritableFile {
            path: path.clone(),
            source,
        })?;
    info!("stored {} bytes at {}", payload.len(), path.display());
    Ok(path)
}

/// Reads the named file for a download, returning its full contents. The
/// caller sends them to the client as one framed message.
pub async fn load_file(current_dir: &Path, file_name: &str) -> Result<Vec<u8>, CommandError> {
    let path = current_dir.join(file_name);
    fs::read(&path)
        .await
        .map_err(|source| CommandError::UnreadableFile { path, source })
}
