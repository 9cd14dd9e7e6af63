//! CLI for the DSync dataset-archive sync.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use dsync_core::config;
use std::path::PathBuf;

use commands::{run_checksum, run_extract, run_probe, run_sync};

/// Top-level CLI for the DSync dataset-archive sync.
#[derive(Debug, Parser)]
#[command(name = "dsync")]
#[command(about = "DSync: conditional fetch-and-extract for a remote dataset archive", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Probe the remote, download when stale, extract, and locate the payload.
    Run {
        /// Override the configured dataset URL.
        #[arg(long)]
        url: Option<String>,

        /// Override the working directory downloads land in.
        #[arg(long, value_name = "DIR")]
        work_dir: Option<PathBuf>,

        /// Override the payload suffix (default ".shp").
        #[arg(long)]
        suffix: Option<String>,
    },

    /// HEAD-probe the remote and print its current metadata.
    Probe {
        /// Override the configured dataset URL.
        #[arg(long)]
        url: Option<String>,
    },

    /// Extract an already-downloaded archive and locate the payload.
    Extract {
        /// Path to the archive.
        archive: PathBuf,

        /// Destination directory (defaults to the configured working directory).
        #[arg(long, value_name = "DIR")]
        dest: Option<PathBuf>,

        /// Override the payload suffix (default ".shp").
        #[arg(long)]
        suffix: Option<String>,
    },

    /// Compute SHA-256 of a file (e.g. a downloaded archive).
    Checksum {
        /// Path to the file.
        path: PathBuf,
    },
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let mut cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Run {
                url,
                work_dir,
                suffix,
            } => {
                if let Some(url) = url {
                    cfg.url = url;
                }
                if let Some(dir) = work_dir {
                    cfg.work_dir = dir;
                }
                if let Some(suffix) = suffix {
                    cfg.payload_suffix = suffix;
                }
                cfg.validate()?;
                run_sync(&cfg)?;
            }
            CliCommand::Probe { url } => {
                if let Some(url) = url {
                    cfg.url = url;
                }
                cfg.validate()?;
                run_probe(&cfg)?;
            }
            CliCommand::Extract {
                archive,
                dest,
                suffix,
            } => {
                if let Some(dir) = dest {
                    cfg.work_dir = dir;
                }
                if let Some(suffix) = suffix {
                    cfg.payload_suffix = suffix;
                }
                run_extract(&cfg, &archive)?;
            }
            CliCommand::Checksum { path } => run_checksum(&path)?,
        }

        Ok(())
    }
}
