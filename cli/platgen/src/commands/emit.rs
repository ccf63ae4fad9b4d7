//! `platgen emit` — write simulator and Quartus manifests for a generated
//! tree.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use platgen_srctree::{Emitter, SourceTree};

use crate::config::PlatgenConfig;

/// Which manifests to write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outputs {
    pub sim: bool,
    pub qsf: bool,
}

impl Outputs {
    /// With neither flag given, write everything.
    pub fn from_flags(sim: bool, qsf: bool) -> Self {
        if !sim && !qsf {
            Outputs {
                sim: true,
                qsf: true,
            }
        } else {
            Outputs { sim, qsf }
        }
    }
}

/// Walk `trees` and write the selected manifests into `out` (default: the
/// first tree root).
pub fn run(
    config: &PlatgenConfig,
    trees: &[PathBuf],
    out: Option<&Path>,
    outputs: Outputs,
    plat_path: Option<&str>,
    dump: bool,
) -> Result<Vec<PathBuf>> {
    if trees.is_empty() {
        bail!("at least one --tree directory is required");
    }

    let roots = trees
        .iter()
        .map(|t| fs::canonicalize(t).with_context(|| format!("resolving {}", t.display())))
        .collect::<Result<Vec<_>>>()?;

    let out_dir = match out {
        Some(dir) => {
            fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
            fs::canonicalize(dir).with_context(|| format!("resolving {}", dir.display()))?
        }
        None => roots[0].clone(),
    };

    let tree = SourceTree::walk(&roots).context("walking source tree")?;
    if dump {
        print!("{}", tree.dump());
    }

    let emitter = Emitter::new(&tree, config.tree.clone(), config.scan.clone())
        .with_names(config.emit.clone());

    let mut written = Vec::new();
    if outputs.sim {
        written.push(emitter.emit_sim_includes(&out_dir)?);
        written.push(emitter.emit_sim_sources(&out_dir)?);
    }
    if outputs.qsf {
        let default_plat_path = out_dir.display().to_string();
        let plat_path = plat_path.unwrap_or(&default_plat_path);
        written.push(emitter.emit_qsf_sources(&out_dir, plat_path)?);
    }

    for path in &written {
        println!("Wrote {}", path.display());
    }
    Ok(written)
}
