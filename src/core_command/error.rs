use std::path::PathBuf;

use thiserror::Error;

use crate::constants::ERROR_MARKER;

/// Failures of a single command. All of these are recoverable: the session
/// reports them to the client and keeps serving; the working directory is
/// left as it was.
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Directory: {} does not exist", .path.display())]
    DirectoryNotFound { path: PathBuf },

    #[error("{} is not a directory", .path.display())]
    NotADirectory { path: PathBuf },

    #[error("Neither directory nor file found at: {}", .path.display())]
    NoSuchEntry { path: PathBuf },

    #[error("Directory: {} could not be created: {}", .path.display(), .source)]
    CreateFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Could not remove {}: {}", .path.display(), .source)]
    RemoveFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("File: {} could not be read: {}", .path.display(), .source)]
    UnreadableFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("File: {} could not be written: {}", .path.display(), .source)]
    UnwritableFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("unknown command: {0:?}")]
    UnknownVerb(String),

    #[error("missing argument for {0}")]
    MissingArgument(&'static str),
}

impl CommandError {
    /// Formats the error as the message sent to the client. The leading
    /// marker is what a client matches on to tell an error apart from the
    /// routine directory status.
    pub fn to_wire_message(&self) -> String {
        format!("{} {}", ERROR_MARKER, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_message_carries_marker_and_reason() {
        let err = CommandError::DirectoryNotFound {
            path: PathBuf::from("/srv/missing"),
        };
        let wire = err.to_wire_message();
        assert!(wire.starts_with(ERROR_MARKER));
        assert!(wire.contains("/srv/missing"));
        assert!(wire.contains("does not exist"));
    }

    #[test]
    fn test_not_a_directory_names_the_path() {
        let err = CommandError::NotADirectory {
            path: PathBuf::from("/srv/notes.txt"),
        };
        assert_eq!(
            err.to_wire_message(),
            "Error /srv/notes.txt is not a directory"
        );
    }
}
