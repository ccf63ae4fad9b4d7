//! Source tree discovery and build manifest emission.
//!
//! Walks a generated platform interface tree, classifies what it finds
//! (packages, include directories, RTL, constraints, scripts), and writes
//! simulator and Quartus manifests. Packages are listed in dependence order
//! using [`platgen_pkgsort`].

pub mod config;
pub mod emit;
pub mod error;
pub mod tree;

// Re-exports for convenience.
pub use config::TreeConfig;
pub use emit::{relative_path, Emitter, ManifestNames};
pub use error::{Result, SrcTreeError};
pub use tree::{SourceDir, SourceKind, SourceTree};
