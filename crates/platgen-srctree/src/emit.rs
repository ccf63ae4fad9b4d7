//! Build and simulation manifest emission.
//!
//! Three manifests are written for a generated tree:
//! - simulator include file: `+incdir+` per include directory
//! - simulator sources file: packages in dependence order, then RTL
//! - Quartus sources file: search paths, packages, typed RTL, SDC and Tcl
//!
//! All paths are written relative to the directory holding the manifest.

use std::fmt::Write as _;
use std::path::{Component, Path, PathBuf};

use platgen_pkgsort::{sort_packages, ScanConfig};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::TreeConfig;
use crate::error::{Result, SrcTreeError};
use crate::tree::{SourceKind, SourceTree};

/// File names of the emitted manifests, from the `[emit]` table of
/// `platgen.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManifestNames {
    pub sim_includes: String,
    pub sim_sources: String,
    pub qsf_sources: String,
}

impl Default for ManifestNames {
    fn default() -> Self {
        Self {
            sim_includes: "platform_if_includes.txt".to_string(),
            sim_sources: "platform_if_addenda.txt".to_string(),
            qsf_sources: "platform_if_addenda.qsf".to_string(),
        }
    }
}

/// Writes manifests describing a [`SourceTree`].
#[derive(Debug, Clone)]
pub struct Emitter<'a> {
    tree: &'a SourceTree,
    tree_config: TreeConfig,
    scan_config: ScanConfig,
    names: ManifestNames,
}

impl<'a> Emitter<'a> {
    pub fn new(tree: &'a SourceTree, tree_config: TreeConfig, scan_config: ScanConfig) -> Self {
        Emitter {
            tree,
            tree_config,
            scan_config,
            names: ManifestNames::default(),
        }
    }

    pub fn with_names(mut self, names: ManifestNames) -> Self {
        self.names = names;
        self
    }

    /// Packages in the tree, dependencies first. Include directories of the
    /// tree form the include search path.
    pub fn sorted_packages(&self) -> Result<Vec<PathBuf>> {
        let packages = self.tree.packages(&self.tree_config);
        let search_dirs = self.tree.include_dirs(&self.tree_config);
        Ok(sort_packages(&packages, &search_dirs, &self.scan_config)?)
    }

    /// Write the simulator include file into `dir`.
    pub fn emit_sim_includes(&self, dir: &Path) -> Result<PathBuf> {
        let fname = &self.names.sim_includes;
        let mut out = sim_header("Add platform interface include paths.", fname);
        out.push_str("+define+PLATFORM_IF_AVAIL\n+define+RTL_SIMULATION\n\n");
        for inc in self.tree.include_dirs(&self.tree_config) {
            let _ = writeln!(out, "+incdir+{}", relative_path(&inc, dir).display());
        }
        write_manifest(dir, fname, &out)
    }

    /// Write the simulator sources file into `dir`.
    pub fn emit_sim_sources(&self, dir: &Path) -> Result<PathBuf> {
        let fname = &self.names.sim_sources;
        let packages = self.sorted_packages()?;

        let mut out = sim_header("Import platform interface sources.", fname);
        let _ = writeln!(out, "-F {}\n", self.names.sim_includes);
        for pkg in &packages {
            let _ = writeln!(out, "{}", relative_path(pkg, dir).display());
        }
        out.push('\n');
        for src in self.tree.rtl_sources(&self.tree_config) {
            let _ = writeln!(out, "{}", relative_path(&src, dir).display());
        }
        write_manifest(dir, fname, &out)
    }

    /// Write the Quartus sources file into `dir`. `plat_path` becomes the
    /// value of the `OFS_PLAT_IF` variable every path is rooted at.
    pub fn emit_qsf_sources(&self, dir: &Path, plat_path: &str) -> Result<PathBuf> {
        let fname = &self.names.qsf_sources;
        let packages = self.sorted_packages()?;

        let mut out = String::new();
        out.push_str("##\n## Import platform interface sources.\n##\n");
        out.push_str("## Generated by platgen.\n##\n\n");
        let _ = writeln!(out, "set OFS_PLAT_IF \"{plat_path}\"\n");
        out.push_str("# Platform interface is available.\n");
        out.push_str("set_global_assignment -name VERILOG_MACRO \"PLATFORM_IF_AVAIL=1\"\n");
        out.push_str(
            "set IS_OFS_AFU [info exists platform_cfg::PLATFORM_PROVIDES_OFS_PLAT_IF]\n\n",
        );

        for inc in self.tree.include_dirs(&self.tree_config) {
            let _ = writeln!(
                out,
                "set_global_assignment -name SEARCH_PATH $OFS_PLAT_IF/{}",
                unix_path(&relative_path(&inc, dir))
            );
        }
        out.push('\n');

        for pkg in &packages {
            let _ = writeln!(
                out,
                "set_global_assignment -name SYSTEMVERILOG_FILE $OFS_PLAT_IF/{}",
                unix_path(&relative_path(pkg, dir))
            );
        }
        out.push('\n');

        for src in self.tree.rtl_sources(&self.tree_config) {
            let Some(name) = src.file_name().map(|n| n.to_string_lossy()) else {
                continue;
            };
            if self.tree_config.is_sim_only(&name) {
                continue;
            }
            let Some(kind) = SourceKind::from_file_name(&name) else {
                continue;
            };
            let _ = writeln!(
                out,
                "set_global_assignment -name {:<18} $OFS_PLAT_IF/{}",
                kind.qsf_assignment(),
                unix_path(&relative_path(&src, dir))
            );
        }
        out.push('\n');

        for sdc in self.tree.files_with_extension("sdc") {
            let _ = writeln!(
                out,
                "set_global_assignment -name SDC_FILE $OFS_PLAT_IF/{}",
                unix_path(&relative_path(&sdc, dir))
            );
        }
        out.push('\n');

        for tcl in self.tree.files_with_extension("tcl") {
            let _ = writeln!(
                out,
                "set_global_assignment -name SOURCE_TCL_SCRIPT_FILE $OFS_PLAT_IF/{}",
                unix_path(&relative_path(&tcl, dir))
            );
        }
        write_manifest(dir, fname, &out)
    }
}

fn sim_header(title: &str, fname: &str) -> String {
    format!(
        "##\n## {title}\n##\n## Generated by platgen.\n##\n\
         ## Load from a simulator file list with:\n##\n\
         ##     -F <absolute path to this directory>/{fname}\n##\n\
         ## \"-F\" resolves paths relative to this directory; \"-f\" does not.\n##\n\n"
    )
}

fn write_manifest(dir: &Path, fname: &str, contents: &str) -> Result<PathBuf> {
    let path = dir.join(fname);
    info!(path = %path.display(), "emitting manifest");
    std::fs::write(&path, contents).map_err(|source| SrcTreeError::Write {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

/// Lexical path of `target` relative to `base`. Both are expected to be
/// absolute, or both relative to the same directory.
pub fn relative_path(target: &Path, base: &Path) -> PathBuf {
    let target: Vec<Component> = target.components().filter(|c| *c != Component::CurDir).collect();
    let base: Vec<Component> = base.components().filter(|c| *c != Component::CurDir).collect();

    let common = target
        .iter()
        .zip(base.iter())
        .take_while(|(t, b)| t == b)
        .count();

    let mut rel = PathBuf::new();
    for _ in common..base.len() {
        rel.push("..");
    }
    for part in &target[common..] {
        rel.push(part.as_os_str());
    }
    if rel.as_os_str().is_empty() {
        rel.push(".");
    }
    rel
}

/// `/`-separated rendering for Tcl, whatever the host separator.
fn unix_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
