use anyhow::{Context, Result};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::compress::{display, BatchCompressor, BatchSummary, ReferencePatch};
use crate::config::{CompressConfig, DocsiteConfig};

/// Command-line overrides for the `[compress]` section.
#[derive(Debug, Clone, Default)]
pub struct CompressOverrides {
    pub pattern: Option<String>,
    pub output_dir: Option<PathBuf>,
    pub quality: Option<u8>,
    pub max_width: Option<u32>,
    pub no_patch: bool,
}

impl CompressOverrides {
    pub fn apply(&self, config: &mut CompressConfig) {
        if let Some(pattern) = &self.pattern {
            config.pattern = pattern.clone();
        }
        if let Some(output_dir) = &self.output_dir {
            config.output_dir = output_dir.clone();
        }
        if let Some(quality) = self.quality {
            config.quality = quality;
        }
        if let Some(max_width) = self.max_width {
            config.max_width = max_width;
        }
        if self.no_patch {
            config.patch.enabled = false;
        }
    }
}

pub async fn run_compress_command(
    overrides: CompressOverrides,
    site_dir: PathBuf,
    mut config: DocsiteConfig,
) -> Result<()> {
    overrides.apply(&mut config.compress);
    config.validate()?;

    let interactive = std::io::stdout().is_terminal();
    let compress = config.compress;

    // Image work is CPU-bound; keep it off the task watching for Ctrl-C.
    tokio::task::spawn_blocking(move || compress_site(&site_dir, &compress, interactive))
        .await
        .context("Compression task panicked")??;
    Ok(())
}

/// Compress the scans in `site_dir`, report the totals and patch the viewer script.
pub fn compress_site(
    site_dir: &Path,
    config: &CompressConfig,
    interactive: bool,
) -> Result<BatchSummary> {
    display::show_header();

    let compressor = BatchCompressor::new(site_dir, config).with_progress_bar(interactive);
    let summary = compressor.run()?;
    if summary.found == 0 {
        return Ok(summary);
    }

    display::show_summary(&summary);

    if config.patch.enabled {
        let patch = ReferencePatch::new(&config.patch, &config.output_dir);
        display::show_patch_header();
        match patch.apply(site_dir) {
            Ok(outcome) => {
                info!("Patched {:?}: {:?}", patch.file, outcome);
                display::show_patch_outcome(&patch.file, &outcome);
            }
            Err(e) => {
                warn!("Could not patch {:?}: {}", patch.file, e);
                display::show_patch_error(&patch.file, &e);
            }
        }
    }

    display::show_next_steps();
    Ok(summary)
}
