use std::path::Path;
use std::sync::Arc;

use super::error::DeployError;
use super::steps::run_step;
use crate::config::CompressorCommand;
use crate::subprocess::{ProcessCommand, ProcessCommandBuilder, ProcessRunner};

/// The resolved command line of the compressor subprocess.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressorInvocation {
    pub program: String,
    pub args: Vec<String>,
    /// Package-manager command that installs `program`.
    pub install: Option<Vec<String>>,
}

impl CompressorInvocation {
    /// Use the configured program, or `current_exe` when none is set.
    pub fn resolve(config: &CompressorCommand, current_exe: &Path) -> Self {
        let program = config
            .program
            .clone()
            .unwrap_or_else(|| current_exe.to_string_lossy().to_string());
        Self {
            program,
            args: config.args.clone(),
            install: config.install.clone(),
        }
    }

    pub fn command(&self, site_dir: &Path) -> ProcessCommand {
        ProcessCommandBuilder::new(&self.program)
            .args(&self.args)
            .current_dir(site_dir)
            .build()
    }

    pub fn version_command(&self) -> ProcessCommand {
        ProcessCommandBuilder::new(&self.program)
            .arg("--version")
            .build()
    }

    pub fn install_command(&self) -> Option<ProcessCommand> {
        let (program, args) = self.install.as_deref()?.split_first()?;
        Some(ProcessCommandBuilder::new(program).args(args).build())
    }
}

/// Run the compressor in `site_dir`; a non-zero exit aborts the deployment.
pub async fn run_compressor(
    runner: &Arc<dyn ProcessRunner>,
    site_dir: &Path,
    compressor: &CompressorInvocation,
) -> Result<(), DeployError> {
    println!("\nCompressing images...");

    let command = compressor.command(site_dir);
    run_step("Running image compression", async {
        runner
            .run(command.clone())
            .await?
            .ensure_success(&command)
    })
    .await
    .map_err(DeployError::CompressionFailed)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subprocess::{MockProcessRunner, ProcessError};
    use std::path::PathBuf;

    fn invocation() -> CompressorInvocation {
        CompressorInvocation {
            program: "docsite".to_string(),
            args: vec!["compress".to_string()],
            install: Some(vec![
                "cargo".to_string(),
                "install".to_string(),
                "docsite".to_string(),
            ]),
        }
    }

    #[test]
    fn test_resolve_defaults_to_current_exe() {
        let resolved = CompressorInvocation::resolve(
            &CompressorCommand::default(),
            Path::new("/usr/local/bin/docsite"),
        );
        assert_eq!(resolved.program, "/usr/local/bin/docsite");
        assert_eq!(resolved.args, vec!["compress"]);
        assert_eq!(resolved.install, None);
    }

    #[test]
    fn test_resolve_prefers_configured_program() {
        let config = CompressorCommand {
            program: Some("shrink-scans".to_string()),
            args: vec!["--fast".to_string()],
            install: None,
        };
        let resolved = CompressorInvocation::resolve(&config, Path::new("/bin/docsite"));
        assert_eq!(resolved.program, "shrink-scans");
        assert_eq!(resolved.args, vec!["--fast"]);
    }

    #[test]
    fn test_install_command() {
        let command = invocation().install_command().unwrap();
        assert_eq!(command.program, "cargo");
        assert_eq!(command.args, vec!["install", "docsite"]);

        let mut without = invocation();
        without.install = Some(Vec::new());
        assert!(without.install_command().is_none());
    }

    #[tokio::test]
    async fn test_run_compressor_in_site_dir() {
        let mut mock = MockProcessRunner::new();
        mock.expect_command("docsite")
            .with_args(|args| args == ["compress"])
            .returns_stdout("Successfully compressed: 3/3 images\n")
            .finish();

        let runner: Arc<dyn ProcessRunner> = Arc::new(mock.clone());
        let site = PathBuf::from("/srv/site");
        run_compressor(&runner, &site, &invocation()).await.unwrap();

        let history = mock.get_call_history();
        assert_eq!(history[0].working_dir.as_deref(), Some(site.as_path()));
    }

    #[tokio::test]
    async fn test_run_compressor_failure_is_fatal() {
        let mut mock = MockProcessRunner::new();
        mock.expect_command("docsite")
            .returns_exit_code(1)
            .returns_stderr("Error: invalid pattern")
            .finish();

        let runner: Arc<dyn ProcessRunner> = Arc::new(mock);
        let err = run_compressor(&runner, Path::new("."), &invocation())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            DeployError::CompressionFailed(ProcessError::ExitCode { code: 1, .. })
        ));
        assert_eq!(err.to_string(), "Image compression failed");
    }
}
