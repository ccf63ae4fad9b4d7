//! Dependency-first ordering with cycle diagnosis.
//!
//! A depth-first walk emits each package after everything it depends on.
//! The walk is started once per package in candidate order, so disconnected
//! packages are still covered and the result is deterministic for a given
//! input order and file content.
//!
//! A package that depends on itself is tolerated. A cycle through two or
//! more packages is an error.

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::error::{PkgSortError, Result};
use crate::graph::{DependencyGraph, Provenance};

/// One edge of a dependency cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CycleEdge {
    /// The package holding the reference.
    pub from: String,
    /// The package being referenced.
    pub to: String,
    /// How `from` came to reference `to`.
    pub provenance: Provenance,
}

/// A dependency cycle, as the ordered edges that close it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cycle {
    pub edges: Vec<CycleEdge>,
}

impl Cycle {
    /// Packages on the cycle, starting where the walk first entered it.
    pub fn packages(&self) -> Vec<&str> {
        self.edges.iter().map(|e| e.from.as_str()).collect()
    }
}

impl fmt::Display for Cycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, edge) in self.edges.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "    {} -> {}", edge.from, edge.to)?;
            if !edge.provenance.is_direct() {
                write!(f, " (via {})", edge.provenance)?;
            }
        }
        Ok(())
    }
}

/// A package on the active walk and the edge that reached it.
#[derive(Debug)]
struct WalkEntry {
    name: String,
    reached_by: Provenance,
}

/// State for one sort call.
#[derive(Debug, Default)]
struct SortContext {
    visited: HashSet<String>,
    walk: Vec<WalkEntry>,
    order: Vec<String>,
}

impl SortContext {
    fn visit(&mut self, target: &str, reached_by: &Provenance, graph: &DependencyGraph) -> Result<()> {
        if self.visited.contains(target) {
            return Ok(());
        }

        // Not a candidate: external reference.
        let Some(deps) = graph.deps_of(target) else {
            return Ok(());
        };

        if let Some(start) = self.walk.iter().position(|e| e.name == target) {
            // Only the current package itself: self-dependence.
            if start + 1 == self.walk.len() {
                return Ok(());
            }
            let cycle = self.cycle_from(start, reached_by);
            debug!(packages = ?cycle.packages(), "package dependence cycle");
            return Err(PkgSortError::CircularPkgDependence(cycle));
        }

        self.walk.push(WalkEntry {
            name: target.to_string(),
            reached_by: reached_by.clone(),
        });
        for (dep, provenance) in deps {
            self.visit(dep, provenance, graph)?;
        }
        self.walk.pop();

        if self.visited.insert(target.to_string()) {
            self.order.push(target.to_string());
        }
        Ok(())
    }

    /// Edges from `walk[start]` around to the closing edge back to it.
    fn cycle_from(&self, start: usize, closing: &Provenance) -> Cycle {
        let path = &self.walk[start..];
        let edges = path
            .iter()
            .enumerate()
            .map(|(i, entry)| match path.get(i + 1) {
                Some(next) => CycleEdge {
                    from: entry.name.clone(),
                    to: next.name.clone(),
                    provenance: next.reached_by.clone(),
                },
                None => CycleEdge {
                    from: entry.name.clone(),
                    to: path[0].name.clone(),
                    provenance: closing.clone(),
                },
            })
            .collect();
        Cycle { edges }
    }
}

/// Order `packages` so that each follows everything it depends on.
///
/// Names in `packages` that are absent from `graph` are skipped, as are
/// dependencies on such names.
pub fn sort(packages: &[&str], graph: &DependencyGraph) -> Result<Vec<String>> {
    let mut ctx = SortContext::default();
    for name in packages {
        ctx.visit(name, &Provenance::direct(), graph)?;
    }
    Ok(ctx.order)
}
