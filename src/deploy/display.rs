use super::params::DeploymentParams;
use crate::config::DeployConfig;

fn rule() -> String {
    "=".repeat(60)
}

pub fn show_header() {
    println!("Document Viewer - Deployment Tool");
    println!("{}", rule());
}

pub fn show_summary(params: &DeploymentParams, config: &DeployConfig) {
    println!("\nDeployment Summary:");
    println!("   Account: {}", params.account);
    println!("   Repository Name: {}", params.repository);
    println!("   Commit Message: {}", params.commit_message);
    println!("   Website URL: {}", params.pages_url(&config.pages_host));
}

pub fn show_cancelled() {
    println!("Deployment cancelled");
}

/// Only GitHub's Pages settings are known; other hosts get a generic hint.
fn pages_source_step(git_host: &str) -> String {
    if git_host.eq_ignore_ascii_case("github.com") {
        "Under 'Source', select 'GitHub Actions'".to_string()
    } else {
        format!("Enable static page publishing in the {git_host} settings")
    }
}

pub fn show_final_instructions(params: &DeploymentParams, config: &DeployConfig) {
    println!("\n{}", rule());
    println!("DEPLOYMENT COMPLETE!");
    println!("{}", rule());
    println!(
        "Your repository: {}",
        params.repository_url(&config.git_host)
    );
    println!("Your website: {}", params.pages_url(&config.pages_host));
    println!("\nNext Steps:");
    println!("1. Go to your repository on {}", config.git_host);
    println!("2. Click on 'Settings' tab");
    println!("3. Scroll down to 'Pages' section");
    println!("4. {}", pages_source_step(&config.git_host));
    println!("5. Wait a few minutes for deployment");
    println!(
        "6. Access your site at: {}",
        params.pages_url(&config.pages_host)
    );
    println!("\nYour document viewer is now live on the web!");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pages_source_step_names_github_actions_on_github() {
        assert_eq!(
            pages_source_step("github.com"),
            "Under 'Source', select 'GitHub Actions'"
        );
    }

    #[test]
    fn test_pages_source_step_uses_configured_host() {
        let step = pages_source_step("git.example.org");
        assert!(step.contains("git.example.org"));
        assert!(!step.contains("GitHub"));
    }
}
