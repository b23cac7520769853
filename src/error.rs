//! Error types for explorer.
//!
//! Only fatal conditions travel through [`ExplorerError`]. Per-operation failures
//! (a directory that cannot be read, a delete that fails, an editor that does not
//! start) are absorbed where they happen and only logged.

use std::path::PathBuf;

/// Unified error type for everything that ends the session with a non-zero status.
#[derive(Debug, thiserror::Error)]
pub enum ExplorerError {
    /// The start directory given on the command line cannot be entered.
    #[error("{}: {source}", path.display())]
    BadDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The directory holds more entries than a 32-bit index can address.
    #[error("too many files")]
    TooManyEntries,

    /// The command line could not be understood.
    #[error("{0}")]
    Usage(String),

    /// An I/O error on the terminal itself.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout explorer.
pub type Result<T> = std::result::Result<T, ExplorerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_directory_displays_path_and_cause() {
        let err = ExplorerError::BadDirectory {
            path: PathBuf::from("/missing"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "No such file or directory"),
        };
        assert_eq!(err.to_string(), "/missing: No such file or directory");
    }

    #[test]
    fn too_many_entries_message() {
        assert_eq!(ExplorerError::TooManyEntries.to_string(), "too many files");
    }

    #[test]
    fn io_error_converts() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "gone");
        let err: ExplorerError = io_err.into();
        assert!(matches!(err, ExplorerError::Io(_)));
        assert!(err.to_string().contains("gone"));
    }
}
