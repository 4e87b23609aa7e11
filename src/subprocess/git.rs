use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;

use super::builder::ProcessCommandBuilder;
use super::error::ProcessError;
use super::runner::{ProcessCommand, ProcessOutput, ProcessRunner};

/// The fixed git invocations used to publish a site.
///
/// Every method runs one blocking `git` command in `path` and fails with
/// `ProcessError::ExitCode` (stderr attached) when git exits non-zero.
#[async_trait]
pub trait GitRunner: Send + Sync {
    /// `git --version`, returning the reported version line.
    async fn version(&self) -> Result<String, ProcessError>;
    async fn init(&self, path: &Path) -> Result<ProcessOutput, ProcessError>;
    async fn add_all(&self, path: &Path) -> Result<ProcessOutput, ProcessError>;
    async fn commit(&self, path: &Path, message: &str) -> Result<ProcessOutput, ProcessError>;
    async fn rename_branch(&self, path: &Path, branch: &str)
        -> Result<ProcessOutput, ProcessError>;
    async fn remote_add(
        &self,
        path: &Path,
        name: &str,
        url: &str,
    ) -> Result<ProcessOutput, ProcessError>;
    async fn remote_set_url(
        &self,
        path: &Path,
        name: &str,
        url: &str,
    ) -> Result<ProcessOutput, ProcessError>;
    async fn push(
        &self,
        path: &Path,
        remote: &str,
        branch: &str,
    ) -> Result<ProcessOutput, ProcessError>;
}

pub struct GitRunnerImpl {
    runner: Arc<dyn ProcessRunner>,
}

/// Build a git command running inside `path`.
#[inline]
fn git_command<'a>(path: &Path, args: impl IntoIterator<Item = &'a str>) -> ProcessCommand {
    ProcessCommandBuilder::new("git")
        .args(args)
        .current_dir(path)
        .build()
}

/// Parse `git version 2.43.0` into `2.43.0`.
#[inline]
fn parse_version_line(stdout: &str) -> String {
    let line = stdout.lines().next().unwrap_or_default().trim();
    line.strip_prefix("git version ").unwrap_or(line).to_string()
}

impl GitRunnerImpl {
    pub fn new(runner: Arc<dyn ProcessRunner>) -> Self {
        Self { runner }
    }

    async fn run_checked(&self, command: ProcessCommand) -> Result<ProcessOutput, ProcessError> {
        let output = self.runner.run(command.clone()).await?;
        output.ensure_success(&command)
    }
}

#[async_trait]
impl GitRunner for GitRunnerImpl {
    async fn version(&self) -> Result<String, ProcessError> {
        let output = self
            .run_checked(ProcessCommandBuilder::new("git").arg("--version").build())
            .await?;
        Ok(parse_version_line(&output.stdout))
    }

    async fn init(&self, path: &Path) -> Result<ProcessOutput, ProcessError> {
        self.run_checked(git_command(path, ["init"])).await
    }

    async fn add_all(&self, path: &Path) -> Result<ProcessOutput, ProcessError> {
        self.run_checked(git_command(path, ["add", "."])).await
    }

    async fn commit(&self, path: &Path, message: &str) -> Result<ProcessOutput, ProcessError> {
        self.run_checked(git_command(path, ["commit", "-m", message]))
            .await
    }

    async fn rename_branch(
        &self,
        path: &Path,
        branch: &str,
    ) -> Result<ProcessOutput, ProcessError> {
        self.run_checked(git_command(path, ["branch", "-M", branch]))
            .await
    }

    async fn remote_add(
        &self,
        path: &Path,
        name: &str,
        url: &str,
    ) -> Result<ProcessOutput, ProcessError> {
        self.run_checked(git_command(path, ["remote", "add", name, url]))
            .await
    }

    async fn remote_set_url(
        &self,
        path: &Path,
        name: &str,
        url: &str,
    ) -> Result<ProcessOutput, ProcessError> {
        self.run_checked(git_command(path, ["remote", "set-url", name, url]))
            .await
    }

    async fn push(
        &self,
        path: &Path,
        remote: &str,
        branch: &str,
    ) -> Result<ProcessOutput, ProcessError> {
        self.run_checked(git_command(path, ["push", "-u", remote, branch]))
            .await
    }
}
