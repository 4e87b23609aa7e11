//! CLI argument structures

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

/// Compress document scans and publish the viewer site
#[derive(Parser)]
#[command(name = "docsite")]
#[command(about = "docsite - compress document scans and publish the viewer site", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose output (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Configuration file (defaults to docsite.toml in the site directory)
    #[arg(short = 'c', long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Re-encode PNG scans as progressive JPEGs
    #[command(name = "compress")]
    Compress {
        /// Site directory (defaults to current directory)
        #[arg(short = 'd', long, value_name = "DIR")]
        dir: Option<PathBuf>,

        /// Glob of scans to compress, relative to the site directory
        #[arg(short = 'p', long, value_name = "GLOB")]
        pattern: Option<String>,

        /// Directory receiving the JPEGs
        #[arg(short = 'o', long, value_name = "DIR")]
        output_dir: Option<PathBuf>,

        /// JPEG quality (1-100)
        #[arg(short = 'q', long, value_parser = clap::value_parser!(u8).range(1..=100))]
        quality: Option<u8>,

        /// Scale wider images down to this width
        #[arg(short = 'w', long, value_parser = clap::value_parser!(u32).range(1..))]
        max_width: Option<u32>,

        /// Leave the viewer script untouched
        #[arg(long)]
        no_patch: bool,
    },

    /// Compress the scans and push the site to a git host
    #[command(name = "deploy")]
    Deploy {
        /// Site directory (defaults to current directory)
        #[arg(short = 'd', long, value_name = "DIR")]
        dir: Option<PathBuf>,
    },
}

impl Commands {
    pub fn site_dir(&self) -> Option<&Path> {
        match self {
            Commands::Compress { dir, .. } | Commands::Deploy { dir } => dir.as_deref(),
        }
    }
}
