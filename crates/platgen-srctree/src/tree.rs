//! Generated source tree discovery.
//!
//! Directories are listed deepest first, then by path, and file names are
//! sorted within each directory. Packages deeper in a generated tree are
//! usually the ones shallower code depends on, so this order is a sensible
//! starting point even before package sorting.

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::{extension_of, TreeConfig};
use crate::error::{Result, SrcTreeError};

/// HDL language of a source file, derived from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    SystemVerilog,
    Verilog,
    Vhdl,
}

impl SourceKind {
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        match extension_of(file_name)?.as_str() {
            "sv" | "vh" => Some(SourceKind::SystemVerilog),
            "v" => Some(SourceKind::Verilog),
            "vhd" | "vhdl" => Some(SourceKind::Vhdl),
            _ => None,
        }
    }

    /// Quartus assignment name for sources of this kind.
    pub fn qsf_assignment(self) -> &'static str {
        match self {
            SourceKind::SystemVerilog => "SYSTEMVERILOG_FILE",
            SourceKind::Verilog => "VERILOG_FILE",
            SourceKind::Vhdl => "VHDL_FILE",
        }
    }
}

/// One directory of the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDir {
    pub path: PathBuf,
    /// Sorted names of immediate subdirectories.
    pub subdirs: Vec<String>,
    /// Sorted names of files directly in this directory.
    pub files: Vec<String>,
}

/// A walked source tree.
#[derive(Debug, Clone, Default)]
pub struct SourceTree {
    dirs: Vec<SourceDir>,
}

impl SourceTree {
    /// Walk each root in turn. Roots keep their given order; directories
    /// within a root are ordered deepest first. A directory reached from
    /// more than one root is listed once, under the first.
    pub fn walk<P: AsRef<Path>>(roots: &[P]) -> Result<Self> {
        let mut seen = HashSet::new();
        let mut dirs = Vec::new();
        for root in roots {
            for dir in walk_root(root.as_ref())? {
                if seen.insert(dir.path.clone()) {
                    dirs.push(dir);
                }
            }
        }
        Ok(SourceTree { dirs })
    }

    pub fn dirs(&self) -> &[SourceDir] {
        &self.dirs
    }

    /// Every file, in tree order.
    pub fn all_files(&self) -> Vec<PathBuf> {
        self.dirs
            .iter()
            .flat_map(|d| d.files.iter().map(move |f| d.path.join(f)))
            .collect()
    }

    /// Directories holding at least one header file.
    pub fn include_dirs(&self, config: &TreeConfig) -> Vec<PathBuf> {
        self.dirs
            .iter()
            .filter(|d| d.files.iter().any(|f| config.is_header(f)))
            .map(|d| d.path.clone())
            .collect()
    }

    /// Package sources, in tree order.
    pub fn packages(&self, config: &TreeConfig) -> Vec<PathBuf> {
        self.select(|name| config.is_package(name))
    }

    /// HDL sources other than packages and `.vh` headers.
    pub fn rtl_sources(&self, config: &TreeConfig) -> Vec<PathBuf> {
        self.select(|name| {
            SourceKind::from_file_name(name).is_some()
                && !config.is_package(name)
                && extension_of(name).as_deref() != Some("vh")
        })
    }

    /// Files whose extension matches `ext` (without the dot, any case).
    pub fn files_with_extension(&self, ext: &str) -> Vec<PathBuf> {
        self.all_files()
            .into_iter()
            .filter(|path| {
                path.file_name()
                    .and_then(|name| extension_of(&name.to_string_lossy()))
                    .is_some_and(|e| e.eq_ignore_ascii_case(ext))
            })
            .collect()
    }

    /// Directory and file listing, one entry per line.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        for dir in &self.dirs {
            out.push_str(&format!("{}\n", dir.path.display()));
            for file in &dir.files {
                out.push_str(&format!("  {file}\n"));
            }
        }
        out
    }

    fn select(&self, keep: impl Fn(&str) -> bool) -> Vec<PathBuf> {
        let keep = &keep;
        self.dirs
            .iter()
            .flat_map(|d| {
                d.files
                    .iter()
                    .filter(move |f| keep(f))
                    .map(move |f| d.path.join(f))
            })
            .collect()
    }
}

fn walk_root(root: &Path) -> Result<Vec<SourceDir>> {
    if !root.is_dir() {
        return Err(SrcTreeError::RootNotFound(root.to_path_buf()));
    }

    let mut dirs: BTreeMap<PathBuf, SourceDir> = BTreeMap::new();
    for entry in WalkDir::new(root) {
        let entry = entry?;
        let path = entry.path();

        if entry.file_type().is_dir() {
            dirs.entry(path.to_path_buf()).or_insert_with(|| SourceDir {
                path: path.to_path_buf(),
                subdirs: Vec::new(),
                files: Vec::new(),
            });
        }
        if entry.depth() == 0 {
            continue;
        }

        let (Some(parent), Some(name)) = (path.parent(), path.file_name()) else {
            continue;
        };
        let name = name.to_string_lossy().into_owned();
        if let Some(dir) = dirs.get_mut(parent) {
            if entry.file_type().is_dir() {
                dir.subdirs.push(name);
            } else {
                dir.files.push(name);
            }
        }
    }

    let mut dirs: Vec<SourceDir> = dirs.into_values().collect();
    for dir in &mut dirs {
        dir.subdirs.sort();
        dir.files.sort();
    }
    dirs.sort_by(|a, b| {
        let depth = |d: &SourceDir| d.path.components().count();
        depth(b)
            .cmp(&depth(a))
            .then_with(|| a.path.cmp(&b.path))
    });
    Ok(dirs)
}
