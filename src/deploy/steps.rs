use std::future::Future;
use tracing::{info, warn};

use crate::subprocess::{ProcessError, ProcessOutput};

fn echo_indented(text: &str) {
    for line in text.trim().lines() {
        println!("   {line}");
    }
}

/// Announce and await one external step, echoing its output.
///
/// Stdout is echoed on success; the error and any captured stderr on
/// failure.
pub async fn run_step<F>(description: &str, step: F) -> Result<ProcessOutput, ProcessError>
where
    F: Future<Output = Result<ProcessOutput, ProcessError>>,
{
    println!("Running: {description}");
    match step.await {
        Ok(output) => {
            info!("{} succeeded in {:?}", description, output.duration);
            echo_indented(&output.stdout);
            Ok(output)
        }
        Err(e) => {
            warn!("{} failed: {}", description, e);
            println!("Error: {e}");
            if let Some(stderr) = e.stderr() {
                echo_indented(stderr);
            }
            Err(e)
        }
    }
}
