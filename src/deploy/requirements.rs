use tracing::{debug, warn};

use super::compressor::CompressorInvocation;
use super::error::DeployError;
use super::steps::run_step;
use crate::subprocess::{GitRunner, ProcessError, SubprocessManager};

pub const GIT_REMEDIATION: &str = "Please install Git first: https://git-scm.com/";

/// Verify git and the compressor can be launched.
///
/// A missing compressor is installed once with its configured package
/// manager command, if there is one.
pub async fn check_requirements(
    subprocess: &SubprocessManager,
    compressor: &CompressorInvocation,
) -> Result<(), DeployError> {
    println!("Checking requirements...");

    match subprocess.git().version().await {
        Ok(version) => debug!("Found git {}", version),
        Err(ProcessError::CommandNotFound(_)) => {
            println!("Git is not installed or not in PATH");
            println!("   {GIT_REMEDIATION}");
            return Err(DeployError::MissingTool {
                tool: "Git".to_string(),
                remediation: GIT_REMEDIATION.to_string(),
            });
        }
        Err(e) => return Err(e.into()),
    }

    check_compressor(subprocess, compressor).await
}

async fn check_compressor(
    subprocess: &SubprocessManager,
    compressor: &CompressorInvocation,
) -> Result<(), DeployError> {
    let runner = subprocess.runner();
    match runner.run(compressor.version_command()).await {
        Ok(output) => {
            if !output.status.success() {
                warn!(
                    "'{} --version' exited with {:?}; continuing",
                    compressor.program, output.status
                );
            }
            println!("Image compressor is available");
            Ok(())
        }
        Err(ProcessError::CommandNotFound(_)) => {
            let Some(install) = compressor.install_command() else {
                return Err(DeployError::MissingTool {
                    tool: compressor.program.clone(),
                    remediation: "Install it or set deploy.compressor.install".to_string(),
                });
            };

            println!("{} not found. Installing...", compressor.program);
            let description = format!("Installing {}", compressor.program);
            let result = run_step(&description, async {
                runner.run(install.clone()).await?.ensure_success(&install)
            })
            .await;

            result.map(|_| ()).map_err(|source| {
                println!("Failed to install {}", compressor.program);
                DeployError::InstallFailed {
                    program: compressor.program.clone(),
                    source,
                }
            })
        }
        Err(e) => Err(e.into()),
    }
}
