use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use super::compressor::{run_compressor, CompressorInvocation};
use super::display;
use super::error::DeployError;
use super::params::DeploymentParams;
use super::prompts::{collect_parameters, confirm_deployment, UserPrompter};
use super::publish::{commit_and_push, setup_repository};
use super::requirements::check_requirements;
use crate::config::DeployConfig;
use crate::subprocess::SubprocessManager;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployOutcome {
    Completed(DeploymentParams),
    /// The user declined at the confirmation prompt.
    Cancelled,
}

/// Runs the publishing steps in order, stopping at the first fatal error.
pub struct DeployOrchestrator {
    subprocess: SubprocessManager,
    prompter: Arc<dyn UserPrompter>,
    site_dir: PathBuf,
    config: DeployConfig,
    compressor: CompressorInvocation,
}

impl DeployOrchestrator {
    pub fn new(
        subprocess: SubprocessManager,
        prompter: Arc<dyn UserPrompter>,
        site_dir: impl Into<PathBuf>,
        config: DeployConfig,
        compressor: CompressorInvocation,
    ) -> Self {
        Self {
            subprocess,
            prompter,
            site_dir: site_dir.into(),
            config,
            compressor,
        }
    }

    pub async fn run(&self) -> Result<DeployOutcome, DeployError> {
        display::show_header();
        let git = self.subprocess.git();

        check_requirements(&self.subprocess, &self.compressor).await?;
        run_compressor(&self.subprocess.runner(), &self.site_dir, &self.compressor).await?;
        setup_repository(&git, &self.site_dir).await?;

        let params = collect_parameters(
            self.prompter.as_ref(),
            &self.config.git_host,
            &self.config.default_commit_message,
        )
        .await?;

        display::show_summary(&params, &self.config);
        if !confirm_deployment(self.prompter.as_ref()).await? {
            display::show_cancelled();
            info!("Deployment cancelled at confirmation");
            return Ok(DeployOutcome::Cancelled);
        }

        commit_and_push(&git, &self.site_dir, &params, &self.config).await?;
        display::show_final_instructions(&params, &self.config);

        Ok(DeployOutcome::Completed(params))
    }
}
