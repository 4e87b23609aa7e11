use std::path::Path;
use tracing::{info, warn};

use super::error::DeployError;
use super::params::DeploymentParams;
use super::steps::run_step;
use crate::config::DeployConfig;
use crate::subprocess::GitRunner;

/// Initialize a repository in `site_dir` unless one already exists.
pub async fn setup_repository(git: &dyn GitRunner, site_dir: &Path) -> Result<(), DeployError> {
    println!("\nSetting up Git repository...");

    if site_dir.join(".git").exists() {
        println!("Git repository already exists");
        return Ok(());
    }

    run_step("Initializing Git repository", git.init(site_dir))
        .await
        .map_err(DeployError::git_step("git init"))?;
    Ok(())
}

/// Stage, commit and push the site.
///
/// A failing `remote add` (usually because the remote already exists) is
/// retried as `remote set-url`. The push runs once; its failure is fatal.
pub async fn commit_and_push(
    git: &dyn GitRunner,
    site_dir: &Path,
    params: &DeploymentParams,
    config: &DeployConfig,
) -> Result<(), DeployError> {
    println!("\nDeploying to {}...", config.git_host);
    let url = params.remote_url(&config.git_host);

    run_step("Adding files to Git", git.add_all(site_dir))
        .await
        .map_err(DeployError::git_step("git add"))?;

    run_step(
        "Committing changes",
        git.commit(site_dir, &params.commit_message),
    )
    .await
    .map_err(DeployError::git_step("git commit"))?;

    run_step(
        &format!("Setting {} branch", config.branch),
        git.rename_branch(site_dir, &config.branch),
    )
    .await
    .map_err(DeployError::git_step("git branch"))?;

    let description = format!("Adding remote {}", config.remote);
    if let Err(e) = run_step(&description, git.remote_add(site_dir, &config.remote, &url)).await {
        warn!("remote add failed ({}), updating the existing remote", e);
        run_step(
            &format!("Updating remote {}", config.remote),
            git.remote_set_url(site_dir, &config.remote, &url),
        )
        .await
        .map_err(DeployError::git_step("git remote set-url"))?;
    }

    run_step(
        &format!("Pushing to {}", config.git_host),
        git.push(site_dir, &config.remote, &config.branch),
    )
    .await
    .map_err(DeployError::git_step("git push"))?;

    info!("Pushed {} to {}", config.branch, url);
    Ok(())
}
