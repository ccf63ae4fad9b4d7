//! `platgen deps` — show each package's dependencies and how they were
//! found.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use platgen_pkgsort::{format_graph, graph_json, resolve_graph, sort};

use crate::commands::sort::search_path;
use crate::config::PlatgenConfig;

/// Print the dependency report for `files`.
///
/// On a cycle the graph is still printed, in input order, before the error
/// is returned, so the offending edges can be inspected.
pub fn run(
    config: &PlatgenConfig,
    base: &Path,
    files: &[PathBuf],
    search: &[PathBuf],
    json: bool,
) -> Result<()> {
    print!("{}", render(config, base, files, search, json)?);
    Ok(())
}

fn render(
    config: &PlatgenConfig,
    base: &Path,
    files: &[PathBuf],
    search: &[PathBuf],
    json: bool,
) -> Result<String> {
    let search_dirs = search_path(config, base, search);
    let (packages, graph) =
        resolve_graph(files, &search_dirs, &config.scan).context("scanning packages")?;

    match sort(&packages.names(), &graph) {
        Ok(order) => {
            if json {
                let value = graph_json(&packages, &graph, &order);
                Ok(format!("{}\n", serde_json::to_string_pretty(&value)?))
            } else {
                Ok(format_graph(&packages, &graph, &order))
            }
        }
        Err(e) => {
            let input_order: Vec<String> =
                packages.names().into_iter().map(str::to_string).collect();
            print!("{}", format_graph(&packages, &graph, &input_order));
            Err(e).context("sorting packages")
        }
    }
}
