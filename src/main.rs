//! # Podpack CLI (`podpack`)
//!
//! The `podpack` binary turns a podcast episode CSV plus per-episode JSON
//! transcripts into static JavaScript data files, and patches the site's
//! HTML pages to load them.
//!
//! ## Usage
//!
//! ```bash
//! podpack --config ./podpack.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `podpack build` | Run the full pipeline: scan, join, emit, patch |
//! | `podpack build --dry-run` | Measure and report without writing anything |
//! | `podpack transcripts` | List discovered transcript files |
//! | `podpack init` | Scaffold a commented `podpack.toml` |
//!
//! Without a config file every setting falls back to its default, which
//! reproduces the original site build exactly.

mod config;
mod emit;
mod html;
mod models;
mod records;
mod transcripts;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

/// Podpack — static data builder for podcast archive sites.
#[derive(Parser)]
#[command(
    name = "podpack",
    about = "Podpack — static data builder for podcast archive sites",
    version,
    long_about = "Podpack converts a podcast episode CSV plus per-episode transcript files \
    into size-bounded JavaScript data files consumable by a static web page, and rewrites \
    the page HTML to reference the generated files."
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Defaults to `./podpack.toml`. A missing config file is fine — all
    /// settings have defaults.
    #[arg(long, global = true, default_value = "./podpack.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Run the full build pipeline.
    ///
    /// Scans for transcripts, joins them with the episode CSV, writes
    /// `data.js` (or `data_part<N>.js` chunks when the serialized data
    /// exceeds the configured threshold), and patches the HTML targets.
    Build {
        /// Scan, join, and measure without writing any file.
        #[arg(long)]
        dry_run: bool,
    },

    /// List discovered transcript files.
    ///
    /// Prints the episode id and path of every transcript the scan would
    /// use. Handy for verifying discovery before a build.
    Transcripts,

    /// Scaffold a `podpack.toml` with all defaults, commented.
    ///
    /// Fails if the file already exists.
    Init,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // init must not require a loadable config
    if let Commands::Init = cli.command {
        return scaffold_config(&cli.config);
    }

    let cfg = config::load_config(&cli.config)?;

    match cli.command {
        Commands::Build { dry_run } => run_build(&cfg, dry_run),
        Commands::Transcripts => run_transcripts(&cfg),
        Commands::Init => unreachable!(),
    }
}

fn run_build(cfg: &config::Config, dry_run: bool) -> Result<()> {
    println!("scanning for transcripts...");
    let index = transcripts::scan_transcripts(cfg)?;
    println!("found {} transcript files", index.len());

    let records = records::build_records(cfg, &index)?;
    println!("total episodes: {}", records.len());

    if dry_run {
        let (total_bytes, plan) = emit::plan(&records, cfg)?;
        println!("build (dry-run)");
        println!(
            "  total data size: {:.2} MB",
            total_bytes as f64 / (1024.0 * 1024.0)
        );
        match plan {
            emit::ChunkPlan::Single => println!("  would write data.js"),
            emit::ChunkPlan::Parts { chunks, .. } => {
                println!("  would write {chunks} chunk files")
            }
        }
        return Ok(());
    }

    let files = emit::write_data_files(&records, cfg)?;
    html::patch_html_targets(cfg, &files)?;
    println!("build complete");
    Ok(())
}

fn run_transcripts(cfg: &config::Config) -> Result<()> {
    let index = transcripts::scan_transcripts(cfg)?;

    let mut entries: Vec<_> = index.into_iter().collect();
    entries.sort_by_key(|(id, _)| *id);

    println!("{:<10} PATH", "EPISODE");
    for (id, path) in entries {
        println!("{:<10} {}", id, path.display());
    }
    Ok(())
}

fn scaffold_config(path: &Path) -> Result<()> {
    if path.exists() {
        bail!("config file already exists: {}", path.display());
    }
    std::fs::write(path, CONFIG_TEMPLATE)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    println!("created {}", path.display());
    Ok(())
}

const CONFIG_TEMPLATE: &str = r#"# Podpack configuration. Every key is optional; the values below are the
# defaults used when a key (or this whole file) is absent.

[input]
# Delimiter-separated episode metadata file.
csv_path = "episodes (1).csv"
# Field delimiter (single ASCII character, not a comma).
delimiter = "~"
# Root directory to walk for transcript files named <episode-id>.<ext>.
scan_root = "."
transcript_ext = "json"
# Extra glob patterns to skip while scanning (on top of .git, target,
# node_modules).
exclude_globs = []

[audio]
# Gateway prefix and content-addressed root used to build audio URLs for
# rows whose mp3_link is a bare filename.
gateway = "https://ipfs.io/ipfs"
ipfs_root = "QmYoi9yujdACiLyxXpVLGJJjR374KktXv4um798b1FZd6A"

[output]
# Where data files are written and where the HTML targets live.
dir = "."
# Split the data into parts when the serialized size reaches this many bytes.
chunk_size_bytes = 15728640
# Pages to patch with the generated <script> tags.
html_targets = ["index.html", "transcript.html"]
"#;
