//! Error types for listing and configuration failures
//!
//! Per-entry and per-directory failures are reported and skipped by the
//! walker; only `NotFound` for a root, `Output` and the configuration
//! variants ever reach the caller as a hard failure.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Everything that can go wrong while listing.
#[derive(Debug, Error)]
pub enum ListError {
    /// A root path or glob pattern matched nothing.
    #[error("cannot access '{}': No such file or directory", .0.display())]
    NotFound(PathBuf),

    /// The entry was listed but disappeared before it could be read.
    #[error("cannot access '{}': No such file or directory (vanished during listing)", .0.display())]
    VanishedEntry(PathBuf),

    #[error("cannot open '{}': Permission denied", .0.display())]
    PermissionDenied(PathBuf),

    /// Any other I/O failure tied to a path.
    #[error("cannot access '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Writing to the output stream failed.
    #[error("error writing output: {0}")]
    Output(#[from] io::Error),

    #[error("invalid ignore pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("invalid config '{}': {message}", path.display())]
    Config { path: PathBuf, message: String },
}

impl ListError {
    /// Map an I/O error raised while reading `path` onto the taxonomy.
    pub fn from_io(path: &Path, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => ListError::VanishedEntry(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => ListError::PermissionDenied(path.to_path_buf()),
            _ => ListError::Io {
                path: path.to_path_buf(),
                source: err,
            },
        }
    }

    /// True for errors that abort the whole run rather than one entry.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ListError::Output(_) | ListError::InvalidPattern { .. } | ListError::Config { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_io_maps_not_found_to_vanished() {
        let err = ListError::from_io(
            Path::new("/tmp/gone"),
            io::Error::new(io::ErrorKind::NotFound, "gone"),
        );
        assert!(matches!(err, ListError::VanishedEntry(ref p) if p == Path::new("/tmp/gone")));
        assert!(!err.is_fatal());
    }

    #[test]
    fn test_from_io_maps_permission_denied() {
        let err = ListError::from_io(
            Path::new("/root/secret"),
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(matches!(err, ListError::PermissionDenied(_)));
        assert_eq!(err.to_string(), "cannot open '/root/secret': Permission denied");
    }

    #[test]
    fn test_output_errors_are_fatal() {
        let err = ListError::from(io::Error::new(io::ErrorKind::BrokenPipe, "pipe"));
        assert!(err.is_fatal());
        assert!(!ListError::NotFound(PathBuf::from("x")).is_fatal());
    }
}
