use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::error::ProcessError;
use super::runner::{ExitStatus, ProcessCommand, ProcessOutput, ProcessRunner};

type ArgsMatcher = Box<dyn Fn(&[String]) -> bool + Send + Sync>;

/// Scripted `ProcessRunner` for tests.
///
/// Expectations are matched in registration order; the first one whose
/// program and argument matcher accept the command answers it. A program
/// missing from `PATH` is simulated with [`MockCommandConfig::not_found`].
#[derive(Clone, Default)]
pub struct MockProcessRunner {
    expectations: Arc<Mutex<Vec<Expectation>>>,
    calls: Arc<Mutex<Vec<ProcessCommand>>>,
}

enum Reply {
    Output(ProcessOutput),
    NotFound,
}

struct Expectation {
    program: String,
    matcher: Option<ArgsMatcher>,
    reply: Reply,
    calls: usize,
    limit: Option<usize>,
}

impl Expectation {
    fn accepts(&self, command: &ProcessCommand) -> bool {
        self.program == command.program
            && self.matcher.as_ref().map_or(true, |m| m(&command.args))
    }
}

/// Builder returned by [`MockProcessRunner::expect_command`]; registered on `finish`.
pub struct MockCommandConfig {
    runner: MockProcessRunner,
    expectation: Expectation,
}

fn args_start_with<S: AsRef<str>>(args: &[String], prefix: &[S]) -> bool {
    args.len() >= prefix.len() && args.iter().zip(prefix).all(|(a, b)| a == b.as_ref())
}

impl MockProcessRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn expect_command(&mut self, program: &str) -> MockCommandConfig {
        MockCommandConfig {
            runner: self.clone(),
            expectation: Expectation {
                program: program.to_string(),
                matcher: None,
                reply: Reply::Output(ProcessOutput {
                    status: ExitStatus::Success,
                    stdout: String::new(),
                    stderr: String::new(),
                    duration: Duration::ZERO,
                }),
                calls: 0,
                limit: None,
            },
        }
    }

    /// `true` when `program` was run exactly `times` times.
    pub fn verify_called(&self, program: &str, times: usize) -> bool {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|cmd| cmd.program == program)
            .count()
            == times
    }

    /// Number of recorded calls whose arguments start with `prefix`.
    pub fn count_calls_with_args(&self, program: &str, prefix: &[&str]) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|cmd| cmd.program == program && args_start_with(&cmd.args, prefix))
            .count()
    }

    pub fn get_call_history(&self) -> Vec<ProcessCommand> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProcessRunner for MockProcessRunner {
    async fn run(&self, command: ProcessCommand) -> Result<ProcessOutput, ProcessError> {
        self.calls.lock().unwrap().push(command.clone());

        let mut expectations = self.expectations.lock().unwrap();
        let Some(expectation) = expectations.iter_mut().find(|e| e.accepts(&command)) else {
            return Err(ProcessError::MockExpectationNotMet(format!(
                "unexpected command: {}",
                command.display()
            )));
        };

        expectation.calls += 1;
        if let Some(limit) = expectation.limit {
            if expectation.calls > limit {
                return Err(ProcessError::MockExpectationNotMet(format!(
                    "'{}' called {} times, expected at most {}",
                    command.display(),
                    expectation.calls,
                    limit
                )));
            }
        }

        match &expectation.reply {
            Reply::Output(output) => Ok(output.clone()),
            Reply::NotFound => Err(ProcessError::CommandNotFound(command.program)),
        }
    }
}

impl MockCommandConfig {
    fn output_mut(&mut self) -> Option<&mut ProcessOutput> {
        match &mut self.expectation.reply {
            Reply::Output(output) => Some(output),
            Reply::NotFound => None,
        }
    }

    pub fn with_args<F>(mut self, matcher: F) -> Self
    where
        F: Fn(&[String]) -> bool + Send + Sync + 'static,
    {
        self.expectation.matcher = Some(Box::new(matcher));
        self
    }

    /// Match only commands whose arguments start with `prefix`.
    pub fn with_args_prefix(self, prefix: &[&str]) -> Self {
        let prefix: Vec<String> = prefix.iter().map(|s| s.to_string()).collect();
        self.with_args(move |args| args_start_with(args, &prefix))
    }

    pub fn returns_stdout(mut self, stdout: &str) -> Self {
        if let Some(output) = self.output_mut() {
            output.stdout = stdout.to_string();
        }
        self
    }

    pub fn returns_stderr(mut self, stderr: &str) -> Self {
        if let Some(output) = self.output_mut() {
            output.stderr = stderr.to_string();
        }
        self
    }

    pub fn returns_exit_code(mut self, code: i32) -> Self {
        if let Some(output) = self.output_mut() {
            output.status = match code {
                0 => ExitStatus::Success,
                code => ExitStatus::Error(code),
            };
        }
        self
    }

    pub fn returns_success(self) -> Self {
        self.returns_exit_code(0)
    }

    /// Behave as if the program is not installed.
    pub fn not_found(mut self) -> Self {
        self.expectation.reply = Reply::NotFound;
        self
    }

    /// Fail calls beyond the `n`th.
    pub fn times(mut self, n: usize) -> Self {
        self.expectation.limit = Some(n);
        self
    }

    pub fn finish(self) {
        self.runner
            .expectations
            .lock()
            .unwrap()
            .push(self.expectation);
    }
}
