//! External process execution
//!
//! The dependency manager is the only external program the generator runs.
//! Output is streamed to the terminal while the process runs; there is no
//! timeout, a hanging process hangs the session.

use anyhow::{anyhow, Context, Result};
use colored::Colorize;
use std::cell::RefCell;
use std::fmt;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command as TokioCommand;

/// A program invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    /// Working directory
    pub cwd: PathBuf,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>, cwd: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: cwd.into(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// How a process ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessOutcome {
    /// `None` when the process was killed by a signal
    pub code: Option<i32>,
}

impl ProcessOutcome {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Runs external commands
///
/// `Err` means the process could not be started or awaited; a non-zero exit is
/// an `Ok` outcome.
#[allow(async_fn_in_trait)]
pub trait ProcessRunner {
    async fn run(&self, command: &CommandSpec) -> Result<ProcessOutcome>;
}

/// Runs commands on the tokio runtime and streams their output
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioProcessRunner;

impl ProcessRunner for TokioProcessRunner {
    async fn run(&self, command: &CommandSpec) -> Result<ProcessOutcome> {
        println!();
        println!("{} {}", "Running:".dimmed(), command.to_string().yellow());
        println!();

        let mut child = TokioCommand::new(&command.program)
            .args(&command.args)
            .current_dir(&command.cwd)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .with_context(|| format!("Failed to start {}", command.program))?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| anyhow!("Failed to capture stdout"))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| anyhow!("Failed to capture stderr"))?;

        let mut stdout_reader = BufReader::new(stdout).lines();
        let mut stderr_reader = BufReader::new(stderr).lines();
        let mut stdout_open = true;
        let mut stderr_open = true;

        while stdout_open || stderr_open {
            tokio::select! {
                line = stdout_reader.next_line(), if stdout_open => {
                    match line {
                        Ok(Some(line)) => println!("  {}", line),
                        Ok(None) => stdout_open = false,
                        Err(e) => {
                            eprintln!("{} {}", "Error reading stdout:".red(), e);
                            stdout_open = false;
                        }
                    }
                }
                line = stderr_reader.next_line(), if stderr_open => {
                    match line {
                        Ok(Some(line)) => eprintln!("  {}", line.yellow()),
                        Ok(None) => stderr_open = false,
                        Err(e) => {
                            eprintln!("{} {}", "Error reading stderr:".red(), e);
                            stderr_open = false;
                        }
                    }
                }
            }
        }

        let status = child
            .wait()
            .await
            .with_context(|| format!("Failed to wait for {}", command.program))?;
        println!();

        tracing::debug!(command = %command, code = ?status.code(), "process exited");

        Ok(ProcessOutcome {
            code: status.code(),
        })
    }
}

/// Records commands instead of running them
///
/// Every command exits with code 0 unless its program was registered with
/// [`RecordingRunner::exit_with`] or [`RecordingRunner::fail_to_start`].
#[derive(Debug, Default)]
pub struct RecordingRunner {
    commands: RefCell<Vec<CommandSpec>>,
    exit_codes: RefCell<Vec<(String, i32)>>,
    unstartable: RefCell<Vec<String>>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make runs whose first argument is `first_arg` exit with `code`
    pub fn exit_with(&self, first_arg: impl Into<String>, code: i32) {
        self.exit_codes.borrow_mut().push((first_arg.into(), code));
    }

    /// Make every run of `program` fail to start
    pub fn fail_to_start(&self, program: impl Into<String>) {
        self.unstartable.borrow_mut().push(program.into());
    }

    /// Commands seen so far, in order
    pub fn commands(&self) -> Vec<CommandSpec> {
        self.commands.borrow().clone()
    }
}

impl ProcessRunner for RecordingRunner {
    async fn run(&self, command: &CommandSpec) -> Result<ProcessOutcome> {
        self.commands.borrow_mut().push(command.clone());

        if self.unstartable.borrow().contains(&command.program) {
            anyhow::bail!("Failed to start {}: not found", command.program);
        }

        let first = command.args.first().map(String::as_str).unwrap_or("");
        let code = self
            .exit_codes
            .borrow()
            .iter()
            .find(|(arg, _)| arg == first)
            .map(|(_, code)| *code)
            .unwrap_or(0);

        Ok(ProcessOutcome { code: Some(code) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_display() {
        let command = CommandSpec::new("composer", ".")
            .arg("update")
            .arg("ambersive/demo");
        assert_eq!(command.to_string(), "composer update ambersive/demo");
    }

    #[tokio::test]
    async fn test_recording_runner_records_and_exits() {
        let runner = RecordingRunner::new();
        runner.exit_with("install", 2);

        let update = CommandSpec::new("composer", ".").arg("update");
        let install = CommandSpec::new("composer", "pkg").arg("install");

        assert!(runner.run(&update).await.unwrap().success());
        assert_eq!(runner.run(&install).await.unwrap().code, Some(2));
        assert_eq!(runner.commands(), vec![update, install]);
    }

    #[tokio::test]
    async fn test_recording_runner_unstartable() {
        let runner = RecordingRunner::new();
        runner.fail_to_start("composer");
        assert!(runner
            .run(&CommandSpec::new("composer", "."))
            .await
            .is_err());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_tokio_runner_reports_exit_code() {
        let dir = tempfile::tempdir().unwrap();
        let ok = CommandSpec::new("sh", dir.path()).arg("-c").arg("echo hi");
        let failing = CommandSpec::new("sh", dir.path()).arg("-c").arg("exit 3");

        assert!(TokioProcessRunner.run(&ok).await.unwrap().success());
        assert_eq!(TokioProcessRunner.run(&failing).await.unwrap().code, Some(3));
    }

    #[tokio::test]
    async fn test_tokio_runner_missing_program() {
        let command = CommandSpec::new("definitely-not-a-real-program-xyz", ".");
        assert!(TokioProcessRunner.run(&command).await.is_err());
    }
}
