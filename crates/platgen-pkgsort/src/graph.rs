//! Package dependency graph.
//!
//! Maps each candidate package to the packages it references, directly or
//! through includes. Edges to names outside the candidate set are kept here;
//! the sorter ignores them.

use std::fmt;
use std::path::Path;

use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;

use crate::error::Result;
use crate::include::IncludeResolver;
use crate::package::PackageSet;
use crate::source::read_source;

/// How a dependency edge was discovered: empty for a reference in the
/// package's own text, otherwise the include files traversed to reach it,
/// outermost first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Provenance(Vec<String>);

impl Provenance {
    pub fn direct() -> Self {
        Provenance(Vec::new())
    }

    pub fn through(chain: Vec<String>) -> Self {
        Provenance(chain)
    }

    pub fn is_direct(&self) -> bool {
        self.0.is_empty()
    }

    pub fn chain(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_direct() {
            write!(f, "direct")
        } else {
            write!(f, "{}", self.0.join(" -> "))
        }
    }
}

/// Dependencies of one package, in discovery order.
pub type Dependencies = IndexMap<String, Provenance>;

/// Package name → dependencies, in candidate order.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct DependencyGraph {
    deps: IndexMap<String, Dependencies>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the dependencies of `package`, replacing any earlier entry.
    pub fn insert(&mut self, package: impl Into<String>, deps: Dependencies) {
        self.deps.insert(package.into(), deps);
    }

    pub fn deps_of(&self, package: &str) -> Option<&Dependencies> {
        self.deps.get(package)
    }

    /// Package names in insertion order.
    pub fn packages(&self) -> impl Iterator<Item = &str> {
        self.deps.keys().map(String::as_str)
    }
}

/// Build the dependency graph for every package in `packages`.
pub fn build_graph(packages: &PackageSet, resolver: &IncludeResolver) -> Result<DependencyGraph> {
    debug!(packages = packages.len(), "building package dependency graph");
    let mut graph = DependencyGraph::new();
    for pkg in packages.iter() {
        let deps = package_deps(&pkg.path, resolver)?;
        debug!(package = %pkg.name, deps = deps.len(), "scanned package");
        graph.insert(pkg.name.clone(), deps);
    }
    Ok(graph)
}

/// Dependencies of a single package file: its own references first, then
/// anything reached through its includes that was not already referenced
/// directly.
pub fn package_deps(path: &Path, resolver: &IncludeResolver) -> Result<Dependencies> {
    let Some(text) = read_source(path)? else {
        return Ok(Dependencies::new());
    };

    let scanned = resolver.scanner().scan(&text);
    let mut deps: Dependencies = scanned
        .packages
        .into_iter()
        .map(|name| (name, Provenance::direct()))
        .collect();

    for (name, provenance) in resolver.resolve(&scanned.includes) {
        deps.entry(name).or_insert(provenance);
    }
    Ok(deps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScanConfig;
    use crate::scan::Scanner;

    fn resolver(dir: &Path) -> IncludeResolver {
        let scanner = Scanner::new(&ScanConfig::default()).unwrap();
        IncludeResolver::new(scanner, vec![dir.to_path_buf()])
    }

    #[test]
    fn provenance_display() {
        assert_eq!(Provenance::direct().to_string(), "direct");
        let p = Provenance::through(vec!["a.vh".to_string(), "b.vh".to_string()]);
        assert_eq!(p.to_string(), "a.vh -> b.vh");
        assert!(!p.is_direct());
    }

    #[test]
    fn direct_reference_beats_include() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("hdr.vh"), "b_pkg::X\nc_pkg::Y\n").unwrap();
        let a = dir.path().join("a_pkg.sv");
        std::fs::write(&a, "`include \"hdr.vh\"\nimport b_pkg::*;\n").unwrap();

        let deps = package_deps(&a, &resolver(dir.path())).unwrap();
        let names: Vec<&str> = deps.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["b_pkg", "c_pkg"]);
        assert!(deps["b_pkg"].is_direct());
        assert_eq!(deps["c_pkg"].chain(), ["hdr.vh"]);
    }

    #[test]
    fn builds_graph_in_candidate_order() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a_pkg.sv");
        let b = dir.path().join("b_pkg.sv");
        std::fs::write(&a, "b_pkg::T t; ext_pkg::U u;\n").unwrap();
        std::fs::write(&b, "package b_pkg; endpackage\n").unwrap();

        let set = PackageSet::new(&[&a, &b]).unwrap();
        let graph = build_graph(&set, &resolver(dir.path())).unwrap();
        assert_eq!(graph.packages().collect::<Vec<_>>(), vec!["a_pkg", "b_pkg"]);
        let a_deps = graph.deps_of("a_pkg").unwrap();
        assert!(a_deps.contains_key("b_pkg"));
        assert!(a_deps.contains_key("ext_pkg"));
        assert!(graph.deps_of("b_pkg").unwrap().is_empty());
    }

    #[test]
    fn undecodable_package_has_no_deps() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a_pkg.sv");
        std::fs::write(&a, [0xff, 0xff, 0xff]).unwrap();
        let deps = package_deps(&a, &resolver(dir.path())).unwrap();
        assert!(deps.is_empty());
    }

    #[test]
    fn serializes_provenance_as_list() {
        let mut graph = DependencyGraph::new();
        let mut deps = Dependencies::new();
        deps.insert("b_pkg".to_string(), Provenance::through(vec!["x.vh".to_string()]));
        graph.insert("a_pkg", deps);
        let json = serde_json::to_value(&graph).unwrap();
        assert_eq!(json["a_pkg"]["b_pkg"][0], "x.vh");
    }
}
