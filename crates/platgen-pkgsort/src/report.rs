//! Human- and machine-readable views of a resolved package graph.
//!
//! ```text
//! ofs_plat_host_chan_pkg
//! ├── ofs_plat_if_cfg_pkg
//! └── ofs_plat_log_pkg (via ofs_plat_if.vh)
//! ofs_plat_if_cfg_pkg
//! uvm_user_pkg
//! └── uvm_pkg (external)
//!
//! 3 packages, 2 internal edges, 1 external reference
//! ```

use serde_json::{json, Value};

use crate::graph::DependencyGraph;
use crate::package::PackageSet;

/// Format each package in `order` with the dependencies it declares.
pub fn format_graph(packages: &PackageSet, graph: &DependencyGraph, order: &[String]) -> String {
    let mut out = String::new();
    let mut internal = 0;
    let mut external = 0;

    for name in order {
        out.push_str(name);
        out.push('\n');

        let Some(deps) = graph.deps_of(name) else {
            continue;
        };
        let count = deps.len();
        for (i, (dep, provenance)) in deps.iter().enumerate() {
            let connector = if i == count - 1 { "└── " } else { "├── " };
            let mut note = String::new();
            if dep == name {
                note.push_str(" (self)");
            } else if !packages.contains(dep) {
                note.push_str(" (external)");
                external += 1;
            } else {
                internal += 1;
            }
            if !provenance.is_direct() {
                note.push_str(&format!(" (via {provenance})"));
            }
            out.push_str(&format!("{connector}{dep}{note}\n"));
        }
    }

    out.push_str(&format!(
        "\n{} {}, {} internal {}, {} external {}\n",
        order.len(),
        plural(order.len(), "package", "packages"),
        internal,
        plural(internal, "edge", "edges"),
        external,
        plural(external, "reference", "references"),
    ));
    out
}

fn plural<'a>(n: usize, one: &'a str, many: &'a str) -> &'a str {
    if n == 1 {
        one
    } else {
        many
    }
}

/// JSON view: the sorted paths plus every package's dependency edges.
pub fn graph_json(packages: &PackageSet, graph: &DependencyGraph, order: &[String]) -> Value {
    let sorted: Vec<Value> = order
        .iter()
        .filter_map(|name| packages.get(name))
        .map(|pkg| {
            json!({
                "name": pkg.name,
                "path": pkg.path.display().to_string(),
            })
        })
        .collect();

    json!({
        "order": sorted,
        "dependencies": graph,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Dependencies, Provenance};

    fn fixture() -> (PackageSet, DependencyGraph, Vec<String>) {
        let packages = PackageSet::new(&["rtl/a_pkg.sv", "rtl/b_pkg.sv"]).unwrap();
        let mut graph = DependencyGraph::new();
        let mut a = Dependencies::new();
        a.insert("b_pkg".to_string(), Provenance::through(vec!["hdr.vh".to_string()]));
        a.insert("uvm_pkg".to_string(), Provenance::direct());
        graph.insert("a_pkg", a);
        let mut b = Dependencies::new();
        b.insert("b_pkg".to_string(), Provenance::direct());
        graph.insert("b_pkg", b);
        (packages, graph, vec!["b_pkg".to_string(), "a_pkg".to_string()])
    }

    #[test]
    fn tree_marks_external_and_included_edges() {
        let (packages, graph, order) = fixture();
        let out = format_graph(&packages, &graph, &order);
        assert!(out.starts_with("b_pkg\n└── b_pkg (self)\na_pkg\n"));
        assert!(out.contains("├── b_pkg (via hdr.vh)"));
        assert!(out.contains("└── uvm_pkg (external)"));
        assert!(out.contains("2 packages, 1 internal edge, 1 external reference"));
    }

    #[test]
    fn json_lists_order_and_edges() {
        let (packages, graph, order) = fixture();
        let value = graph_json(&packages, &graph, &order);
        assert_eq!(value["order"][0]["name"], "b_pkg");
        assert_eq!(value["order"][1]["path"], "rtl/a_pkg.sv");
        assert_eq!(value["dependencies"]["a_pkg"]["b_pkg"][0], "hdr.vh");
        assert_eq!(
            value["dependencies"]["a_pkg"]["uvm_pkg"],
            Value::Array(Vec::new())
        );
    }

    #[test]
    fn empty_graph_summary() {
        let packages = PackageSet::default();
        let out = format_graph(&packages, &DependencyGraph::new(), &[]);
        assert_eq!(out, "\n0 packages, 0 internal edges, 0 external references\n");
    }
}
