use crate::subprocess::ProcessError;

#[derive(Debug, thiserror::Error)]
pub enum DeployError {
    #[error("{tool} is not installed or not in PATH. {remediation}")]
    MissingTool { tool: String, remediation: String },

    #[error("Failed to install {program}")]
    InstallFailed {
        program: String,
        #[source]
        source: ProcessError,
    },

    #[error("Image compression failed")]
    CompressionFailed(#[source] ProcessError),

    #[error("{step} failed")]
    GitStep {
        step: String,
        #[source]
        source: ProcessError,
    },

    #[error("Failed to read input: {0}")]
    Prompt(#[from] std::io::Error),

    #[error(transparent)]
    Process(#[from] ProcessError),
}

impl DeployError {
    pub(crate) fn git_step(step: &str) -> impl FnOnce(ProcessError) -> Self + '_ {
        move |source| DeployError::GitStep {
            step: step.to_string(),
            source,
        }
    }
}
