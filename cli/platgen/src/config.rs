//! `platgen.toml` project configuration.
//!
//! Every table is optional:
//!
//! ```toml
//! [sort]
//! search_dirs = ["rtl/include"]
//!
//! [scan]
//! package_suffixes = ["_pkg", "_def"]
//! ignore_begin = "pkgsort:ignore_begin"
//! ignore_end = "pkgsort:ignore_end"
//!
//! [tree]
//! package_suffixes = ["_pkg.sv", "_def.sv"]
//! header_extensions = ["vh", "h"]
//! sim_only_prefixes = ["ase_"]
//!
//! [emit]
//! sim_includes = "platform_if_includes.txt"
//! sim_sources = "platform_if_addenda.txt"
//! qsf_sources = "platform_if_addenda.qsf"
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use platgen_pkgsort::ScanConfig;
use platgen_srctree::{ManifestNames, TreeConfig};
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE: &str = "platgen.toml";

/// The top-level configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlatgenConfig {
    #[serde(default)]
    pub sort: SortConfig,
    #[serde(default)]
    pub scan: ScanConfig,
    #[serde(default)]
    pub tree: TreeConfig,
    #[serde(default)]
    pub emit: ManifestNames,
}

/// Settings for `platgen sort` and `platgen deps`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SortConfig {
    /// Include search directories, relative to the configuration file.
    #[serde(default)]
    pub search_dirs: Vec<PathBuf>,
}

impl PlatgenConfig {
    /// Search upward from `start_dir` for `platgen.toml`, parse and return it
    /// along with the directory it was found in.
    pub fn find_and_load(start_dir: &Path) -> Result<Option<(Self, PathBuf)>> {
        let mut dir = start_dir.to_path_buf();
        loop {
            let candidate = dir.join(CONFIG_FILE);
            if candidate.is_file() {
                let config = Self::load(&candidate)?;
                return Ok(Some((config, dir)));
            }
            if !dir.pop() {
                break;
            }
        }
        Ok(None)
    }

    /// Load a specific configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config: PlatgenConfig =
            toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))?;
        config
            .scan
            .validate()
            .with_context(|| format!("in {}", path.display()))?;
        Ok(config)
    }

    /// Configured search directories, anchored at `base`.
    pub fn search_dirs(&self, base: &Path) -> Vec<PathBuf> {
        self.sort
            .search_dirs
            .iter()
            .map(|d| base.join(d))
            .collect()
    }
}

/// Resolve the configuration for a run: an explicit `--config` file wins,
/// otherwise `platgen.toml` is searched for upward from `cwd`, otherwise
/// defaults apply. Returns the config and the directory its relative paths
/// are anchored at.
pub fn load_config(explicit: Option<&Path>, cwd: &Path) -> Result<(PlatgenConfig, PathBuf)> {
    if let Some(path) = explicit {
        let config = PlatgenConfig::load(path)?;
        let base = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| cwd.to_path_buf());
        return Ok((config, base));
    }
    match PlatgenConfig::find_and_load(cwd)? {
        Some((config, dir)) => Ok((config, dir)),
        None => Ok((PlatgenConfig::default(), cwd.to_path_buf())),
    }
}
