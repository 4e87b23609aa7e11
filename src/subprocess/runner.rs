use async_trait::async_trait;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::{Duration, Instant};
use tracing::{debug, trace, warn};

use super::error::ProcessError;

/// One program invocation with its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessCommand {
    pub program: String,
    pub args: Vec<String>,
    pub working_dir: Option<PathBuf>,
}

impl ProcessCommand {
    /// Command line as a user would type it, for messages and logs.
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Error(i32),
    Signal(i32),
}

impl ExitStatus {
    pub fn success(&self) -> bool {
        *self == ExitStatus::Success
    }

    pub fn code(&self) -> Option<i32> {
        match *self {
            ExitStatus::Success => Some(0),
            ExitStatus::Error(code) => Some(code),
            ExitStatus::Signal(_) => None,
        }
    }
}

impl From<std::process::ExitStatus> for ExitStatus {
    fn from(status: std::process::ExitStatus) -> Self {
        if status.success() {
            return ExitStatus::Success;
        }
        if let Some(code) = status.code() {
            return ExitStatus::Error(code);
        }
        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt;
            if let Some(signal) = status.signal() {
                return ExitStatus::Signal(signal);
            }
        }
        ExitStatus::Error(1)
    }
}

/// Captured result of a finished process.
#[derive(Debug, Clone)]
pub struct ProcessOutput {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
    pub duration: Duration,
}

impl ProcessOutput {
    /// Turn a non-successful exit into a `ProcessError`, keeping stderr.
    pub fn ensure_success(self, command: &ProcessCommand) -> Result<ProcessOutput, ProcessError> {
        match self.status {
            ExitStatus::Success => Ok(self),
            ExitStatus::Error(code) => Err(ProcessError::ExitCode {
                command: command.display(),
                code,
                stderr: self.stderr,
            }),
            ExitStatus::Signal(signal) => Err(ProcessError::Signal {
                command: command.display(),
                signal,
            }),
        }
    }
}

/// Runs a command to completion.
///
/// A non-zero exit is not an error at this level; callers decide with
/// [`ProcessOutput::ensure_success`].
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    async fn run(&self, command: ProcessCommand) -> Result<ProcessOutput, ProcessError>;
}

/// Spawns real processes on the tokio runtime.
pub struct TokioProcessRunner;

impl TokioProcessRunner {
    fn command(command: &ProcessCommand) -> tokio::process::Command {
        let mut cmd = tokio::process::Command::new(&command.program);
        cmd.args(&command.args)
            // git may still ask for credentials on the controlling terminal
            .stdin(Stdio::inherit())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(dir) = &command.working_dir {
            cmd.current_dir(dir);
        }
        cmd
    }
}

#[async_trait]
impl ProcessRunner for TokioProcessRunner {
    async fn run(&self, command: ProcessCommand) -> Result<ProcessOutput, ProcessError> {
        debug!("Executing subprocess: {}", command.display());
        if let Some(dir) = &command.working_dir {
            trace!("Working directory: {:?}", dir);
        }

        let started = Instant::now();
        let output = Self::command(&command)
            .output()
            .await
            .map_err(|e| ProcessError::spawn(&command, e))?;

        let result = ProcessOutput {
            status: output.status.into(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            duration: started.elapsed(),
        };

        match result.status {
            ExitStatus::Signal(signal) => warn!(
                "'{}' terminated by signal {} after {:?}",
                command.display(),
                signal,
                result.duration
            ),
            status => debug!(
                "'{}' finished with {:?} after {:?}",
                command.display(),
                status,
                result.duration
            ),
        }
        if !result.stderr.is_empty() {
            trace!("stderr of '{}': {}", command.program, result.stderr.trim_end());
        }

        Ok(result)
    }
}
