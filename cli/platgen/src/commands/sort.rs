//! `platgen sort` — print package files in dependence order.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use platgen_pkgsort::sort_packages;

use crate::config::PlatgenConfig;

/// Sort `files` and print one path per line.
pub fn run(
    config: &PlatgenConfig,
    base: &Path,
    files: &[PathBuf],
    search: &[PathBuf],
) -> Result<()> {
    for line in sorted(config, base, files, search)? {
        println!("{}", line.display());
    }
    Ok(())
}

/// Search directories from the command line come first, then those from
/// the configuration.
pub fn search_path(config: &PlatgenConfig, base: &Path, search: &[PathBuf]) -> Vec<PathBuf> {
    let mut dirs = search.to_vec();
    dirs.extend(config.search_dirs(base));
    dirs
}

fn sorted(
    config: &PlatgenConfig,
    base: &Path,
    files: &[PathBuf],
    search: &[PathBuf],
) -> Result<Vec<PathBuf>> {
    let search_dirs = search_path(config, base, search);
    sort_packages(files, &search_dirs, &config.scan).context("sorting packages")
}
