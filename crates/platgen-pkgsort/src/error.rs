//! Package sorting error types.

use std::path::PathBuf;

use crate::sort::Cycle;

/// Errors that can occur while resolving package order.
///
/// Unresolvable includes, undecodable files, self-dependence, and references
/// to unknown packages are absorbed inside the resolver and never appear
/// here.
#[derive(Debug, thiserror::Error)]
pub enum PkgSortError {
    /// Two candidate files derive the same package name.
    #[error(
        "package name '{name}' is derived from both {} and {}",
        .first.display(),
        .second.display()
    )]
    NameCollision {
        name: String,
        first: PathBuf,
        second: PathBuf,
    },

    /// A dependency cycle spanning two or more packages.
    #[error("circular package dependence:\n{0}")]
    CircularPkgDependence(Cycle),

    /// Scan configuration is unusable.
    #[error("invalid scan configuration: {detail}")]
    InvalidConfig { detail: String },

    /// A scan pattern failed to compile.
    #[error("invalid scan pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// Reading a package source failed.
    #[error("I/O error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl PkgSortError {
    /// The cycle carried by a `CircularPkgDependence` error, if any.
    pub fn cycle(&self) -> Option<&Cycle> {
        match self {
            PkgSortError::CircularPkgDependence(cycle) => Some(cycle),
            _ => None,
        }
    }
}

/// Result type alias for package sorting operations.
pub type Result<T> = std::result::Result<T, PkgSortError>;
