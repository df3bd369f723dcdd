//! Pipeline configuration.

use std::path::PathBuf;

/// How to invoke the documentation generator.
#[derive(Debug, Clone)]
pub struct GenerateConfig {
    /// Generator program
    pub program: String,

    /// Source module to document
    pub source: PathBuf,

    /// Directory the generator writes HTML into
    pub output_dir: PathBuf,

    /// Replace existing output instead of refusing to write
    pub overwrite: bool,

    /// Document nested modules too
    pub all_submodules: bool,

    /// Extra arguments passed before the source module
    pub extra_args: Vec<String>,

    /// Name of the generator's root page, `<stem>.m.html` when unset
    pub root_file: Option<String>,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            program: "pdoc".to_string(),
            source: PathBuf::from("billogram_api.py"),
            output_dir: PathBuf::from("docs"),
            overwrite: true,
            all_submodules: true,
            extra_args: vec![],
            root_file: None,
        }
    }
}

/// How to invoke the publishing tool.
#[derive(Debug, Clone)]
pub struct PublishConfig {
    /// Publisher program
    pub program: String,

    /// Commit message for the hosting branch
    pub message: String,

    /// Target branch, the publisher's default when unset
    pub branch: Option<String>,

    /// Push the branch after committing
    pub push: bool,

    /// Add a `.nojekyll` marker
    pub no_jekyll: bool,

    /// Extra arguments passed before the output directory
    pub extra_args: Vec<String>,
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            program: "ghp-import".to_string(),
            message: "Update documentation".to_string(),
            branch: None,
            push: false,
            no_jekyll: false,
            extra_args: vec![],
        }
    }
}

/// Full pipeline configuration.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub generate: GenerateConfig,

    pub publish: PublishConfig,

    /// Printed to stdout before anything runs
    pub reminder: Option<String>,

    /// Remove the output directory before generating
    pub clean: bool,

    /// Log commands without running them
    pub dry_run: bool,

    /// Stop after the entry point is in place
    pub skip_publish: bool,

    /// Keep stdout for a machine-readable report; the reminder goes to stderr
    pub reserve_stdout: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            generate: GenerateConfig::default(),
            publish: PublishConfig::default(),
            reminder: Some(DEFAULT_REMINDER.to_string()),
            clean: false,
            dry_run: false,
            skip_publish: false,
            reserve_stdout: false,
        }
    }
}

/// Reminder shown before publishing.
pub const DEFAULT_REMINDER: &str =
    "Remember to run `git push origin gh-pages` to make the new documentation live.";
