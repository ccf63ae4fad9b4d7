//! Dependency-order sorting of SystemVerilog packages.
//!
//! SystemVerilog requires a package to be compiled before any file that
//! refers to it. Build manifests generated by platgen therefore list
//! packages in dependence order, computed here by scanning each package's
//! text (and the headers it includes) for `name_pkg::` references.
//!
//! # Pipeline
//!
//! 1. [`strip`] — drop comments and marked ignore regions.
//! 2. [`scan`] — find package references and include directives.
//! 3. [`include`] — follow includes through the search path.
//! 4. [`graph`] — build package → dependency edges with provenance.
//! 5. [`sort`] — depth-first, dependency-first order; cycles are errors.
//!
//! ```no_run
//! use platgen_pkgsort::{sort_packages, ScanConfig};
//!
//! let sorted = sort_packages(
//!     &["rtl/a_pkg.sv", "rtl/b_pkg.sv"],
//!     &["rtl/include"],
//!     &ScanConfig::default(),
//! )?;
//! for path in sorted {
//!     println!("{}", path.display());
//! }
//! # Ok::<(), platgen_pkgsort::PkgSortError>(())
//! ```

pub mod config;
pub mod error;
pub mod graph;
pub mod include;
pub mod package;
pub mod report;
pub mod scan;
pub mod sort;
pub mod source;
pub mod strip;

use std::path::{Path, PathBuf};

// Re-exports for convenience.
pub use config::ScanConfig;
pub use error::{PkgSortError, Result};
pub use graph::{build_graph, DependencyGraph, Provenance};
pub use include::IncludeResolver;
pub use package::{Package, PackageSet};
pub use report::{format_graph, graph_json};
pub use scan::{ScanResult, Scanner};
pub use sort::{sort, Cycle, CycleEdge};

/// Scan `packages` and build their dependency graph.
pub fn resolve_graph<P, D>(
    packages: &[P],
    search_dirs: &[D],
    config: &ScanConfig,
) -> Result<(PackageSet, DependencyGraph)>
where
    P: AsRef<Path>,
    D: AsRef<Path>,
{
    let set = PackageSet::new(packages)?;
    let scanner = Scanner::new(config)?;
    let resolver = IncludeResolver::new(
        scanner,
        search_dirs.iter().map(|d| d.as_ref().to_path_buf()).collect(),
    );
    let graph = build_graph(&set, &resolver)?;
    Ok((set, graph))
}

/// Return `packages` in dependence order: every package after the packages
/// it references.
pub fn sort_packages<P, D>(packages: &[P], search_dirs: &[D], config: &ScanConfig) -> Result<Vec<PathBuf>>
where
    P: AsRef<Path>,
    D: AsRef<Path>,
{
    let (set, graph) = resolve_graph(packages, search_dirs, config)?;
    let order = sort(&set.names(), &graph)?;
    Ok(order
        .iter()
        .filter_map(|name| set.path_of(name))
        .map(Path::to_path_buf)
        .collect())
}
