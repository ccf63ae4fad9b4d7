//! Textual dependency scanning.
//!
//! This is not a SystemVerilog parser. It looks for two shapes in
//! comment-stripped text:
//! - `<ident><suffix>::` — a reference to a package (`ofs_plat_pkg::T`).
//! - `` `include "<file>" `` — an include directive.
//!
//! Matched names are not validated; references to names outside the
//! candidate set are dropped later by the sorter.

use indexmap::IndexSet;
use regex::Regex;

use crate::config::ScanConfig;
use crate::error::Result;
use crate::strip::Stripper;

/// Package references and include targets found in one file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanResult {
    /// Distinct package names in order of first appearance.
    pub packages: Vec<String>,
    /// Include targets in order of appearance.
    pub includes: Vec<String>,
}

/// Compiled patterns for package references and include directives.
#[derive(Debug, Clone)]
pub struct Scanner {
    stripper: Stripper,
    package_ref: Regex,
    include: Regex,
}

impl Scanner {
    pub fn new(config: &ScanConfig) -> Result<Self> {
        let stripper = Stripper::new(config)?;

        let suffixes = config
            .package_suffixes
            .iter()
            .map(|s| regex::escape(s))
            .collect::<Vec<_>>()
            .join("|");
        let package_ref = Regex::new(&format!(r"(?i)\b(\w+(?:{suffixes}))::"))?;
        let include = Regex::new(r#"`include\s+"([^"]+)""#)?;

        Ok(Self {
            stripper,
            package_ref,
            include,
        })
    }

    /// Remove comments and ignore regions.
    pub fn strip(&self, text: &str) -> String {
        self.stripper.strip(text)
    }

    /// Package names referenced in already-stripped text.
    pub fn package_refs(&self, stripped: &str) -> Vec<String> {
        let found: IndexSet<&str> = self
            .package_ref
            .captures_iter(stripped)
            .filter_map(|c| c.get(1))
            .map(|m| m.as_str())
            .collect();
        found.into_iter().map(str::to_string).collect()
    }

    /// Include targets named in already-stripped text.
    pub fn includes(&self, stripped: &str) -> Vec<String> {
        self.include
            .captures_iter(stripped)
            .filter_map(|c| c.get(1))
            .map(|m| m.as_str().to_string())
            .collect()
    }

    /// Strip `text` once and collect both package references and includes.
    pub fn scan(&self, text: &str) -> ScanResult {
        let stripped = self.strip(text);
        ScanResult {
            packages: self.package_refs(&stripped),
            includes: self.includes(&stripped),
        }
    }
}
