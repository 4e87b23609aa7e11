//! Publishing a site directory through git.
//!
//! [`DeployOrchestrator`] checks for git and the compressor, compresses the
//! scans, prepares the repository, asks the user where to publish and then
//! commits and pushes.

pub mod compressor;
pub mod display;
pub mod error;
pub mod orchestrator;
pub mod params;
pub mod prompts;
pub mod publish;
pub mod requirements;
pub mod steps;

pub use compressor::{run_compressor, CompressorInvocation};
pub use error::DeployError;
pub use orchestrator::{DeployOrchestrator, DeployOutcome};
pub use params::DeploymentParams;
pub use prompts::{collect_parameters, confirm_deployment, ConsolePrompter, UserPrompter};
pub use publish::{commit_and_push, setup_repository};
pub use requirements::check_requirements;
