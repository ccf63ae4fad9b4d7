//! platgen CLI — package ordering and manifest emission for generated
//! platform interface trees.

mod commands;
mod config;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use commands::emit::Outputs;
use config::load_config;

#[derive(Parser)]
#[command(name = "platgen", version, about = "Platform interface source generator tools")]
struct Cli {
    /// Log each file scanned and each manifest written
    #[arg(short, long, global = true)]
    verbose: bool,
    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
    /// Configuration file (default: nearest platgen.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print package files in dependence order
    Sort {
        /// Include search directory (repeatable, searched in order)
        #[arg(short = 'I', long = "search")]
        search: Vec<PathBuf>,
        /// Package source files
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Show the dependencies found for each package
    Deps {
        /// Include search directory (repeatable, searched in order)
        #[arg(short = 'I', long = "search")]
        search: Vec<PathBuf>,
        /// Emit JSON instead of a text tree
        #[arg(long)]
        json: bool,
        /// Package source files
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Write simulator and Quartus manifests for a generated tree
    Emit {
        /// Root of a generated tree (repeatable)
        #[arg(long = "tree", required = true)]
        trees: Vec<PathBuf>,
        /// Directory to write manifests into (default: first tree root)
        #[arg(long)]
        out: Option<PathBuf>,
        /// Write the simulator manifests
        #[arg(long)]
        sim: bool,
        /// Write the Quartus manifest
        #[arg(long)]
        qsf: bool,
        /// Value of OFS_PLAT_IF in the Quartus manifest (default: output directory)
        #[arg(long)]
        plat_path: Option<String>,
        /// Print the walked tree before emitting
        #[arg(long)]
        dump: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else if cli.quiet {
        Level::ERROR
    } else {
        Level::WARN
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("failed to set tracing subscriber: {e}");
        process::exit(1);
    }

    let result = run(cli);
    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;
    let (config, base) = load_config(cli.config.as_deref(), &cwd)?;

    match cli.command {
        Commands::Sort { search, files } => commands::sort::run(&config, &base, &files, &search),

        Commands::Deps {
            search,
            json,
            files,
        } => commands::deps::run(&config, &base, &files, &search, json),

        Commands::Emit {
            trees,
            out,
            sim,
            qsf,
            plat_path,
            dump,
        } => commands::emit::run(
            &config,
            &trees,
            out.as_deref(),
            Outputs::from_flags(sim, qsf),
            plat_path.as_deref(),
            dump,
        )
        .map(|_| ()),
    }
}
