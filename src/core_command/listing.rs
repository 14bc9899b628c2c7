use std::path::Path;

use tokio::fs;

/// Renders the directory status message: the absolute working directory
/// followed by its immediate children, directories before files, one
/// `-- ` line each. Both groups are sorted by name so the output is
/// stable across runs.
///
/// Format:
///
/// ```text
/// Current Directory: /srv/data:
/// |
/// -- reports
/// -- archive.tar
/// ```
pub async fn directory_info(path: &Path) -> std::io::Result<String> {
    let mut dirs = Vec::new();
    let mut files = Vec::new();

    let mut entries = fs::read_dir(path).await?;
    while let Some(entry) = entries.next_entry().await? {
        let name = entry.file_name().to_string_lossy().into_owned();
        match entry.file_type().await {
            Ok(file_type) if file_type.is_dir() => dirs.push(name),
            Ok(_) => files.push(name),
            // Entry vanished between readdir and stat; leave it out.
            Err(_) => continue,
        }
    }
    dirs.sort();
    files.sort();

    let mut info = format!("Current Directory: {}:\n|", path.display());
    for name in dirs.iter().chain(files.iter()) {
        info.push_str("\n-- ");
        info.push_str(name);
    }
    Ok(info)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_directories_listed_before_files() {
        let root = tempdir().unwrap();
        std::fs::write(root.path().join("alpha.txt"), b"").unwrap();
        std::fs::create_dir(root.path().join("zulu")).unwrap();

        let info = directory_info(root.path()).await.unwrap();
        let expected = format!(
            "Current Directory: {}:\n|\n-- zulu\n-- alpha.txt",
            root.path().display()
        );
        assert_eq!(info, expected);
    }

    #[tokio::test]
    async fn test_groups_are_sorted_by_name() {
        let root = tempdir().unwrap();
        std::fs::create_dir(root.path().join("bbb")).unwrap();
        std::fs::create_dir(root.path().join("aaa")).unwrap();
        std::fs::write(root.path().join("2.txt"), b"").unwrap();
        std::fs::write(root.path().join("1.txt"), b"").unwrap();

        let info = directory_info(root.path()).await.unwrap();
        let expected = format!(
            "Current Directory: {}:\n|\n-- aaa\n-- bbb\n-- 1.txt\n-- 2.txt",
            root.path().display()
        );
        assert_eq!(info, expected);
    }

    #[tokio::test]
    async fn test_empty_directory_renders_header_only() {
        let root = tempdir().unwrap();
        let info = directory_info(root.path()).await.unwrap();
        assert_eq!(
            info,
            format!("Current Directory: {}:\n|", root.path().display())
        );
    }

    #[tokio::test]
    async fn test_missing_directory_is_an_error() {
        let root = tempdir().unwrap();
        assert!(directory_info(&root.path().join("void")).await.is_err());
    }
}
