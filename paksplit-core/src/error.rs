use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SplitError {
    #[error("source not found or not a regular file: {}", .0.display())]
    NotFound(PathBuf),

    #[error(
        "not enough free space under {}: need {} bytes, {} available",
        .path.display(), .needed, .available
    )]
    InsufficientSpace {
        path: PathBuf,
        needed: u64,
        available: u64,
    },

    #[error("output directory already exists: {}", .0.display())]
    AlreadyExists(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The original no longer exists at its old path; there is no rollback.
    #[error(
        "in-place split consumed the original at {} ({} bytes already carved off) before failing: {}",
        .path.display(), .consumed, .source
    )]
    Destructive {
        path: PathBuf,
        consumed: u64,
        source: std::io::Error,
    },
}

// Convenient crate-wide result type
pub type Result<T> = std::result::Result<T, SplitError>;
