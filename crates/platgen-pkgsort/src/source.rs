//! Reading source text.

use std::path::Path;

use tracing::warn;

use crate::error::{PkgSortError, Result};

/// Read a source file as UTF-8 text.
///
/// Returns `Ok(None)` for files that are not valid UTF-8; those are logged
/// and treated as declaring no dependencies.
pub fn read_source(path: &Path) -> Result<Option<String>> {
    let bytes = std::fs::read(path).map_err(|source| PkgSortError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    match String::from_utf8(bytes) {
        Ok(text) => Ok(Some(text)),
        Err(e) => {
            warn!(
                path = %path.display(),
                "skipping undecodable file: {}",
                e.utf8_error()
            );
            Ok(None)
        }
    }
}
