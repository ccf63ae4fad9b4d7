//! Scanner configuration.
//!
//! Loaded from the `[scan]` table of a project's `platgen.toml`; every field
//! has a default so an empty table (or no table at all) is valid.

use serde::{Deserialize, Serialize};

use crate::error::{PkgSortError, Result};

/// Marker that opens a region excluded from dependency scanning.
pub const DEFAULT_IGNORE_BEGIN: &str = "pkgsort:ignore_begin";
/// Marker that closes a region excluded from dependency scanning.
pub const DEFAULT_IGNORE_END: &str = "pkgsort:ignore_end";

/// Controls what the scanner treats as a package reference and which
/// comment markers delimit ignored regions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Identifier suffixes that name a package (`foo_pkg::` matches `_pkg`).
    pub package_suffixes: Vec<String>,
    /// Text that, inside a `//` comment, starts an ignored region.
    pub ignore_begin: String,
    /// Text that, inside a `//` comment, ends an ignored region.
    pub ignore_end: String,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            package_suffixes: vec!["_pkg".to_string(), "_def".to_string()],
            ignore_begin: DEFAULT_IGNORE_BEGIN.to_string(),
            ignore_end: DEFAULT_IGNORE_END.to_string(),
        }
    }
}

impl ScanConfig {
    /// Reject configurations that would make every identifier a package or
    /// make ignore regions unterminable.
    pub fn validate(&self) -> Result<()> {
        if self.package_suffixes.is_empty() {
            return Err(PkgSortError::InvalidConfig {
                detail: "package_suffixes must not be empty".to_string(),
            });
        }
        if let Some(bad) = self
            .package_suffixes
            .iter()
            .find(|s| s.is_empty() || !s.chars().all(|c| c.is_alphanumeric() || c == '_'))
        {
            return Err(PkgSortError::InvalidConfig {
                detail: format!("package suffix '{bad}' must be a non-empty identifier fragment"),
            });
        }
        if self.ignore_begin.trim().is_empty() || self.ignore_end.trim().is_empty() {
            return Err(PkgSortError::InvalidConfig {
                detail: "ignore markers must not be blank".to_string(),
            });
        }
        if self.ignore_begin == self.ignore_end {
            return Err(PkgSortError::InvalidConfig {
                detail: format!(
                    "ignore_begin and ignore_end are both '{}'",
                    self.ignore_begin
                ),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = ScanConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.package_suffixes, vec!["_pkg", "_def"]);
    }

    #[test]
    fn empty_suffix_list_rejected() {
        let config = ScanConfig {
            package_suffixes: Vec::new(),
            ..ScanConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(PkgSortError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn punctuation_in_suffix_rejected() {
        let config = ScanConfig {
            package_suffixes: vec!["_pkg".to_string(), "::".to_string()],
            ..ScanConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn identical_markers_rejected() {
        let config = ScanConfig {
            ignore_begin: "skip".to_string(),
            ignore_end: "skip".to_string(),
            ..ScanConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
