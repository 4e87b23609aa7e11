//! Line-based console prompts.

use async_trait::async_trait;
use std::io::{self, BufRead, Write};

use super::error::DeployError;
use super::params::DeploymentParams;

/// Source of interactive answers.
#[async_trait]
pub trait UserPrompter: Send + Sync {
    /// Show `message` and return the next input line, trimmed.
    ///
    /// Fails with `UnexpectedEof` once input is exhausted.
    async fn prompt_text(&self, message: &str) -> io::Result<String>;
}

/// Prompts on stdout and reads answers from stdin.
pub struct ConsolePrompter;

impl Default for ConsolePrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsolePrompter {
    pub fn new() -> Self {
        Self
    }

    fn read_line() -> io::Result<String> {
        let mut input = String::new();
        let read = io::stdin().lock().read_line(&mut input)?;
        if read == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed before an answer was given",
            ));
        }
        Ok(input.trim().to_string())
    }
}

#[async_trait]
impl UserPrompter for ConsolePrompter {
    async fn prompt_text(&self, message: &str) -> io::Result<String> {
        print!("{message}");
        io::stdout().flush()?;

        // Reading stdin blocks; keep it off the runtime so Ctrl-C is still seen.
        tokio::task::spawn_blocking(Self::read_line)
            .await
            .map_err(io::Error::other)?
    }
}

/// `true` for `y` or `yes` in any case.
pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

async fn prompt_required(
    prompter: &dyn UserPrompter,
    message: &str,
    empty_message: &str,
) -> io::Result<String> {
    loop {
        let answer = prompter.prompt_text(message).await?;
        if !answer.is_empty() {
            return Ok(answer);
        }
        println!("{empty_message}");
    }
}

/// Ask for account, repository and commit message.
///
/// Account and repository are asked again until non-empty; a blank commit
/// message becomes `default_commit_message`.
pub async fn collect_parameters(
    prompter: &dyn UserPrompter,
    git_host: &str,
    default_commit_message: &str,
) -> Result<DeploymentParams, DeployError> {
    println!("\nRepository Setup");
    println!("{}", "=".repeat(40));

    let account = prompt_required(
        prompter,
        &format!("Enter your {git_host} username: "),
        "Username cannot be empty",
    )
    .await?;
    let repository = prompt_required(
        prompter,
        "Enter repository name: ",
        "Repository name cannot be empty",
    )
    .await?;

    let message = prompter
        .prompt_text("Enter commit message (or press Enter for default): ")
        .await?;
    let commit_message = if message.is_empty() {
        default_commit_message.to_string()
    } else {
        message
    };

    Ok(DeploymentParams {
        account,
        repository,
        commit_message,
    })
}

pub async fn confirm_deployment(prompter: &dyn UserPrompter) -> Result<bool, DeployError> {
    let answer = prompter
        .prompt_text("\nProceed with deployment? (y/N): ")
        .await?;
    Ok(is_affirmative(&answer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    pub struct MockPrompter {
        responses: Mutex<Vec<String>>,
        prompts: Mutex<Vec<String>>,
    }

    impl MockPrompter {
        pub fn new(responses: &[&str]) -> Self {
            let mut responses: Vec<String> = responses.iter().map(|s| s.to_string()).collect();
            responses.reverse();
            Self {
                responses: Mutex::new(responses),
                prompts: Mutex::new(Vec::new()),
            }
        }

        fn prompt_count(&self) -> usize {
            self.prompts.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl UserPrompter for MockPrompter {
        async fn prompt_text(&self, message: &str) -> io::Result<String> {
            self.prompts.lock().unwrap().push(message.to_string());
            self.responses
                .lock()
                .unwrap()
                .pop()
                .ok_or_else(|| io::Error::from(io::ErrorKind::UnexpectedEof))
        }
    }

    #[test]
    fn test_is_affirmative() {
        assert!(is_affirmative("y"));
        assert!(is_affirmative("YES"));
        assert!(is_affirmative(" Yes "));
        assert!(!is_affirmative(""));
        assert!(!is_affirmative("n"));
        assert!(!is_affirmative("yep"));
    }

    #[tokio::test]
    async fn test_blank_commit_message_uses_default() {
        let prompter = MockPrompter::new(&["alice", "scans", ""]);

        let params = collect_parameters(&prompter, "github.com", "Default message")
            .await
            .unwrap();

        assert_eq!(params.account, "alice");
        assert_eq!(params.repository, "scans");
        assert_eq!(params.commit_message, "Default message");
    }

    #[tokio::test]
    async fn test_empty_answers_are_asked_again() {
        let prompter = MockPrompter::new(&["", "", "alice", "", "scans", "Add pages"]);

        let params = collect_parameters(&prompter, "github.com", "Default message")
            .await
            .unwrap();

        assert_eq!(params.account, "alice");
        assert_eq!(params.repository, "scans");
        assert_eq!(params.commit_message, "Add pages");
        assert_eq!(prompter.prompt_count(), 6);
    }

    #[tokio::test]
    async fn test_closed_input_is_an_error() {
        let prompter = MockPrompter::new(&[""]);

        let err = collect_parameters(&prompter, "github.com", "Default message")
            .await
            .unwrap_err();

        assert!(matches!(err, DeployError::Prompt(ref e) if e.kind() == io::ErrorKind::UnexpectedEof));
    }

    #[tokio::test]
    async fn test_confirm_deployment() {
        assert!(confirm_deployment(&MockPrompter::new(&["Y"])).await.unwrap());
        assert!(!confirm_deployment(&MockPrompter::new(&[""])).await.unwrap());
        assert!(!confirm_deployment(&MockPrompter::new(&["no"])).await.unwrap());
    }
}
