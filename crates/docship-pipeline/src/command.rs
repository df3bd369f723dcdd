//! External command model and the runner that executes it.

use std::fmt;
use std::future::Future;
use std::io;
use std::process::{ExitStatus, Stdio};

/// A single invocation of an external tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    /// Program name or path
    pub program: String,

    /// Arguments in order
    pub args: Vec<String>,
}

impl ToolCommand {
    /// Create a command with no arguments.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Append one argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }
}

impl fmt::Display for ToolCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", quote(&self.program))?;
        for arg in &self.args {
            write!(f, " {}", quote(arg))?;
        }
        Ok(())
    }
}

/// Quote a word for display when it would not survive a shell as-is.
fn quote(word: &str) -> String {
    let needs_quotes = word.is_empty()
        || word
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '"' | '\'' | '$' | '`' | '\\'));

    if needs_quotes {
        format!("'{}'", word.replace('\'', r"'\''"))
    } else {
        word.to_string()
    }
}

/// Exit status of a finished command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandOutcome {
    /// Exit code, `None` when the process was terminated by a signal
    pub code: Option<i32>,
}

impl CommandOutcome {
    /// Outcome with the given exit code.
    pub fn exited(code: i32) -> Self {
        Self { code: Some(code) }
    }

    /// Whether the command exited with status 0.
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

impl From<ExitStatus> for CommandOutcome {
    fn from(status: ExitStatus) -> Self {
        Self {
            code: status.code(),
        }
    }
}

/// Executes tool commands.
///
/// The pipeline only talks to external programs through this trait, so tests can
/// substitute a runner that records invocations instead of spawning processes.
pub trait CommandRunner: Send + Sync {
    /// Run the command to completion.
    ///
    /// Returns `Err` only when the process could not be started.
    fn run(
        &self,
        command: &ToolCommand,
    ) -> impl Future<Output = io::Result<CommandOutcome>> + Send;
}

/// Runs commands as child processes sharing this process's stdio.
#[derive(Debug, Clone, Default)]
pub struct SystemRunner {
    stdout_to_stderr: bool,
}

impl SystemRunner {
    /// Runner whose children write their stdout to this process's stderr.
    pub fn stdout_to_stderr() -> Self {
        Self {
            stdout_to_stderr: true,
        }
    }
}

impl CommandRunner for SystemRunner {
    async fn run(&self, command: &ToolCommand) -> io::Result<CommandOutcome> {
        let mut child = tokio::process::Command::new(&command.program);
        child.args(&command.args).stdin(Stdio::null());
        if self.stdout_to_stderr {
            child.stdout(Stdio::from(io::stderr()));
        }

        let status = child.status().await?;

        Ok(status.into())
    }
}

/// Check that `program` can be started and reports a version.
pub async fn probe(program: &str) -> bool {
    let result = tokio::process::Command::new(program)
        .arg("--version")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await;

    match result {
        Ok(status) => status.success(),
        Err(e) => {
            tracing::debug!("{} could not be started: {}", program, e);
            false
        }
    }
}
