//! Command routing and execution

use crate::app::AppConfig;
use crate::cli::args::{Cli, Commands};
use crate::cli::commands::*;
use crate::config::DocsiteConfig;
use anyhow::Result;

/// Execute a CLI command in the site directory chosen by `app`.
pub async fn execute_command(cli: Cli, app: &AppConfig, config: DocsiteConfig) -> Result<()> {
    let site_dir = app.working_dir.clone();
    match cli.command {
        Commands::Compress {
            dir: _,
            pattern,
            output_dir,
            quality,
            max_width,
            no_patch,
        } => {
            let overrides = CompressOverrides {
                pattern,
                output_dir,
                quality,
                max_width,
                no_patch,
            };
            run_compress_command(overrides, site_dir, config).await
        }
        Commands::Deploy { dir: _ } => run_deploy_command(site_dir, config, cli.config).await,
    }
}
