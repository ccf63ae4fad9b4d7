//! Source classification settings, from the `[tree]` table of
//! `platgen.toml`.

use serde::{Deserialize, Serialize};

/// How files in a generated tree are classified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    /// File name endings (case-insensitive) that mark a package source.
    pub package_suffixes: Vec<String>,
    /// Extensions of header files; a directory holding one is an include
    /// directory.
    pub header_extensions: Vec<String>,
    /// File name prefixes of simulation-only sources left out of the
    /// Quartus manifest.
    pub sim_only_prefixes: Vec<String>,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            package_suffixes: vec!["_pkg.sv".to_string(), "_def.sv".to_string()],
            header_extensions: vec!["vh".to_string(), "h".to_string()],
            sim_only_prefixes: vec!["ase_".to_string()],
        }
    }
}

impl TreeConfig {
    pub fn is_package(&self, file_name: &str) -> bool {
        let lower = file_name.to_lowercase();
        self.package_suffixes
            .iter()
            .any(|s| lower.ends_with(&s.to_lowercase()))
    }

    pub fn is_header(&self, file_name: &str) -> bool {
        extension_of(file_name).is_some_and(|ext| {
            self.header_extensions
                .iter()
                .any(|h| h.eq_ignore_ascii_case(&ext))
        })
    }

    pub fn is_sim_only(&self, file_name: &str) -> bool {
        let lower = file_name.to_lowercase();
        self.sim_only_prefixes
            .iter()
            .any(|p| lower.starts_with(&p.to_lowercase()))
    }
}

/// Lower-cased extension after the final dot, if any.
pub(crate) fn extension_of(file_name: &str) -> Option<String> {
    let (stem, ext) = file_name.rsplit_once('.')?;
    if stem.is_empty() {
        return None;
    }
    Some(ext.to_lowercase())
}
