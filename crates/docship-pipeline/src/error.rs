//! Pipeline errors.

use std::fmt;
use std::path::PathBuf;

/// The pipeline step an external tool belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Generate,
    Publish,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Generate => f.write_str("generate"),
            Step::Publish => f.write_str("publish"),
        }
    }
}

/// Errors that can occur while building or publishing documentation.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Source module not found: {}", .0.display())]
    SourceMissing(PathBuf),

    #[error("Failed to start {step} tool '{program}': {source}")]
    ToolUnavailable {
        step: Step,
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{step} tool '{program}' failed with {}", describe_code(.code))]
    ToolFailed {
        step: Step,
        program: String,
        code: Option<i32>,
    },

    #[error("Generator did not produce its root page: {}", .path.display())]
    EntryPointMissing { path: PathBuf },

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl PipelineError {
    /// Process exit code to report for this error.
    ///
    /// A failing tool's own exit code is passed through.
    pub fn exit_code(&self) -> u8 {
        match self {
            PipelineError::ToolFailed {
                code: Some(code), ..
            } => u8::try_from(*code).ok().filter(|c| *c != 0).unwrap_or(1),
            _ => 1,
        }
    }

    pub(crate) fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        PipelineError::Io {
            context: context.into(),
            source,
        }
    }
}

fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "termination by signal".to_string(),
    }
}
