//! Source tree error types.

use std::path::PathBuf;

use platgen_pkgsort::PkgSortError;

/// Errors that can occur while walking a tree or emitting manifests.
#[derive(Debug, thiserror::Error)]
pub enum SrcTreeError {
    /// A tree root does not exist or is not a directory.
    #[error("source tree root not found: {}", .0.display())]
    RootNotFound(PathBuf),

    /// Directory traversal failed.
    #[error("walking source tree: {0}")]
    Walk(#[from] walkdir::Error),

    /// Package ordering failed; a cycle aborts the manifest being written.
    #[error(transparent)]
    PkgSort(#[from] PkgSortError),

    /// Writing a manifest failed.
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Result type alias for source tree operations.
pub type Result<T> = std::result::Result<T, SrcTreeError>;
