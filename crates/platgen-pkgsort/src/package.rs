//! Mapping between package names and source paths.

use std::path::{Path, PathBuf};

use indexmap::map::Entry;
use indexmap::IndexMap;

use crate::error::{PkgSortError, Result};

/// A candidate package source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    /// File basename without its extension (`a_pkg` for `rtl/a_pkg.sv`).
    pub name: String,
    /// Location of the source file.
    pub path: PathBuf,
}

impl Package {
    /// Derive a package from its source path.
    pub fn from_path(path: &Path) -> Self {
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Package {
            name,
            path: path.to_path_buf(),
        }
    }
}

/// Candidate packages in input order, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct PackageSet {
    packages: IndexMap<String, Package>,
}

impl PackageSet {
    /// Build the set from candidate paths.
    ///
    /// A path given more than once is kept once, at its first position. Two
    /// distinct paths that derive the same name are rejected.
    pub fn new<P: AsRef<Path>>(paths: &[P]) -> Result<Self> {
        let mut packages = IndexMap::with_capacity(paths.len());
        for path in paths {
            let pkg = Package::from_path(path.as_ref());
            match packages.entry(pkg.name.clone()) {
                Entry::Occupied(existing) => {
                    let existing: &Package = existing.get();
                    if existing.path == pkg.path {
                        continue;
                    }
                    return Err(PkgSortError::NameCollision {
                        name: pkg.name,
                        first: existing.path.clone(),
                        second: pkg.path,
                    });
                }
                Entry::Vacant(slot) => {
                    slot.insert(pkg);
                }
            }
        }
        Ok(PackageSet { packages })
    }

    pub fn get(&self, name: &str) -> Option<&Package> {
        self.packages.get(name)
    }

    pub fn path_of(&self, name: &str) -> Option<&Path> {
        self.packages.get(name).map(|p| p.path.as_path())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.packages.contains_key(name)
    }

    /// Package names in input order.
    pub fn names(&self) -> Vec<&str> {
        self.packages.keys().map(String::as_str).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Package> {
        self.packages.values()
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_drops_directory_and_extension() {
        let pkg = Package::from_path(Path::new("rtl/base/ofs_plat_host_ccip_pkg.sv"));
        assert_eq!(pkg.name, "ofs_plat_host_ccip_pkg");
        assert_eq!(pkg.path, PathBuf::from("rtl/base/ofs_plat_host_ccip_pkg.sv"));
    }

    #[test]
    fn preserves_input_order() {
        let set = PackageSet::new(&["z/b_pkg.sv", "a/a_pkg.sv", "c_def.sv"]).unwrap();
        assert_eq!(set.names(), vec!["b_pkg", "a_pkg", "c_def"]);
        assert_eq!(set.path_of("a_pkg"), Some(Path::new("a/a_pkg.sv")));
        assert!(set.path_of("missing_pkg").is_none());
    }

    #[test]
    fn name_collision_rejected() {
        let err = PackageSet::new(&["one/x_pkg.sv", "two/x_pkg.sv"]).unwrap_err();
        match err {
            PkgSortError::NameCollision {
                name,
                first,
                second,
            } => {
                assert_eq!(name, "x_pkg");
                assert_eq!(first, PathBuf::from("one/x_pkg.sv"));
                assert_eq!(second, PathBuf::from("two/x_pkg.sv"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn repeated_path_kept_once() {
        let set = PackageSet::new(&["rtl/a_pkg.sv", "rtl/b_pkg.sv", "rtl/a_pkg.sv"]).unwrap();
        assert_eq!(set.names(), vec!["a_pkg", "b_pkg"]);
        assert_eq!(set.path_of("a_pkg"), Some(Path::new("rtl/a_pkg.sv")));
    }

    #[test]
    fn empty_set() {
        let set = PackageSet::new::<&str>(&[]).unwrap();
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
    }
}
