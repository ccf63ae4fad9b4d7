//! Transitive package references through `` `include `` chains.
//!
//! A package that includes a header which references `other_pkg::` depends
//! on `other_pkg` just as if it had referenced it directly. Each dependency
//! found this way records the chain of include file names that led to it,
//! so that a cycle report can point at the header responsible.

use std::collections::HashSet;
use std::path::PathBuf;

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::graph::Provenance;
use crate::scan::Scanner;
use crate::source::read_source;

/// Locates include files in search directories and collects the package
/// references they make.
#[derive(Debug, Clone)]
pub struct IncludeResolver {
    scanner: Scanner,
    search_dirs: Vec<PathBuf>,
}

impl IncludeResolver {
    pub fn new(scanner: Scanner, search_dirs: Vec<PathBuf>) -> Self {
        IncludeResolver {
            scanner,
            search_dirs,
        }
    }

    pub fn scanner(&self) -> &Scanner {
        &self.scanner
    }

    /// Find `name` in the search directories. The first directory holding a
    /// file by that name wins.
    pub fn locate(&self, name: &str) -> Option<PathBuf> {
        self.search_dirs
            .iter()
            .map(|dir| dir.join(name))
            .find(|candidate| candidate.is_file())
    }

    /// Collect every package referenced through `includes`, recursively.
    ///
    /// If a package is reachable through several chains, the first chain
    /// found (depth first, in directive order) is kept. Includes that cannot
    /// be found or read add nothing.
    pub fn resolve(&self, includes: &[String]) -> IndexMap<String, Provenance> {
        let mut found = IndexMap::new();
        let mut visited = HashSet::new();
        let mut chain = Vec::new();
        self.walk(includes, &mut chain, &mut visited, &mut found);
        found
    }

    fn walk(
        &self,
        includes: &[String],
        chain: &mut Vec<String>,
        visited: &mut HashSet<String>,
        found: &mut IndexMap<String, Provenance>,
    ) {
        for name in includes {
            if !visited.insert(name.clone()) {
                continue;
            }

            let Some(path) = self.locate(name) else {
                debug!(include = %name, "include not found in search path, skipping");
                continue;
            };

            let text = match read_source(&path) {
                Ok(Some(text)) => text,
                Ok(None) => continue,
                Err(e) => {
                    warn!("{e}");
                    continue;
                }
            };
            let scanned = self.scanner.scan(&text);

            chain.push(name.clone());
            for pkg in scanned.packages {
                found
                    .entry(pkg)
                    .or_insert_with(|| Provenance::through(chain.clone()));
            }
            self.walk(&scanned.includes, chain, visited, found);
            chain.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    use crate::config::ScanConfig;

    fn resolver(dirs: &[&Path]) -> IncludeResolver {
        let scanner = Scanner::new(&ScanConfig::default()).unwrap();
        IncludeResolver::new(scanner, dirs.iter().map(|d| d.to_path_buf()).collect())
    }

    fn includes(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn first_search_dir_wins() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        std::fs::write(first.path().join("cfg.vh"), "one_pkg::X\n").unwrap();
        std::fs::write(second.path().join("cfg.vh"), "two_pkg::X\n").unwrap();

        let r = resolver(&[first.path(), second.path()]);
        assert_eq!(r.locate("cfg.vh"), Some(first.path().join("cfg.vh")));

        let deps = r.resolve(&includes(&["cfg.vh"]));
        assert!(deps.contains_key("one_pkg"));
        assert!(!deps.contains_key("two_pkg"));
    }

    #[test]
    fn records_nested_chain() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("outer.vh"), "`include \"inner.vh\"\n").unwrap();
        std::fs::write(dir.path().join("inner.vh"), "deep_pkg::T t;\n").unwrap();

        let deps = resolver(&[dir.path()]).resolve(&includes(&["outer.vh"]));
        let provenance = deps.get("deep_pkg").unwrap();
        assert_eq!(provenance.chain(), ["outer.vh", "inner.vh"]);
    }

    #[test]
    fn first_discovery_wins() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("a.vh"),
            "`include \"b.vh\"\nshared_pkg::X\n",
        )
        .unwrap();
        std::fs::write(dir.path().join("b.vh"), "shared_pkg::Y\n").unwrap();

        let deps = resolver(&[dir.path()]).resolve(&includes(&["a.vh"]));
        assert_eq!(deps.get("shared_pkg").unwrap().chain(), ["a.vh"]);
    }

    #[test]
    fn mutual_includes_terminate() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("ping.vh"), "`include \"pong.vh\"\nping_pkg::A\n")
            .unwrap();
        std::fs::write(dir.path().join("pong.vh"), "`include \"ping.vh\"\npong_pkg::B\n")
            .unwrap();

        let deps = resolver(&[dir.path()]).resolve(&includes(&["ping.vh"]));
        assert_eq!(deps.get("ping_pkg").unwrap().chain(), ["ping.vh"]);
        assert_eq!(deps.get("pong_pkg").unwrap().chain(), ["ping.vh", "pong.vh"]);
    }

    #[test]
    fn missing_include_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("real.vh"), "real_pkg::X\n").unwrap();

        let deps = resolver(&[dir.path()]).resolve(&includes(&["uvm_macros.svh", "real.vh"]));
        assert_eq!(deps.len(), 1);
        assert!(deps.contains_key("real_pkg"));
    }

    #[test]
    fn binary_include_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("blob.vh"), [0xc3, 0x28, 0xa0, 0xa1]).unwrap();

        let deps = resolver(&[dir.path()]).resolve(&includes(&["blob.vh"]));
        assert!(deps.is_empty());
    }
}
