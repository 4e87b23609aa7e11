use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

use crate::config::{CompressorCommand, DocsiteConfig};
use crate::deploy::{
    CompressorInvocation, ConsolePrompter, DeployOrchestrator, DeployOutcome,
};
use crate::subprocess::SubprocessManager;

/// Compressor command for this run.
///
/// When `docsite` re-invokes itself, an explicit `--config` is forwarded so
/// the child compresses with the same settings.
pub fn compressor_for(
    config: &CompressorCommand,
    current_exe: &Path,
    config_path: Option<&Path>,
) -> CompressorInvocation {
    let mut invocation = CompressorInvocation::resolve(config, current_exe);
    if let (None, Some(path)) = (&config.program, config_path) {
        let mut args = vec!["--config".to_string(), path.to_string_lossy().to_string()];
        args.append(&mut invocation.args);
        invocation.args = args;
    }
    invocation
}

pub async fn run_deploy_command(
    site_dir: PathBuf,
    config: DocsiteConfig,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let current_exe = std::env::current_exe().context("Failed to locate the docsite executable")?;
    let config_path = config_path.map(|path| absolute_path(&path));
    let compressor = compressor_for(
        &config.deploy.compressor,
        &current_exe,
        config_path.as_deref(),
    );
    debug!("Compressor command: {} {:?}", compressor.program, compressor.args);

    let orchestrator = DeployOrchestrator::new(
        SubprocessManager::production(),
        Arc::new(ConsolePrompter::new()),
        site_dir,
        config.deploy,
        compressor,
    );

    match orchestrator.run().await? {
        DeployOutcome::Completed(params) => {
            debug!("Deployed {}/{}", params.account, params.repository)
        }
        DeployOutcome::Cancelled => {}
    }
    Ok(())
}

/// The child runs inside the site directory, so relative paths must be made absolute.
fn absolute_path(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .unwrap_or_else(|_| path.to_path_buf())
}
