//! Configuration file (docship.toml).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use docship_pipeline::config::DEFAULT_REMINDER;
use docship_pipeline::{GenerateConfig, PipelineConfig, PublishConfig};
use serde::Deserialize;

/// Top-level file structure.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Printed before publishing, an empty string disables it
    #[serde(default = "default_reminder")]
    reminder: Option<String>,
    #[serde(default)]
    clean: bool,
    #[serde(default)]
    generate: GenerateSection,
    #[serde(default)]
    publish: PublishSection,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct GenerateSection {
    #[serde(default = "default_generator")]
    program: String,
    #[serde(default = "default_source")]
    source: String,
    #[serde(default = "default_output")]
    output: String,
    #[serde(default = "default_true")]
    overwrite: bool,
    #[serde(default = "default_true")]
    all_submodules: bool,
    #[serde(default)]
    extra_args: Vec<String>,
    root_file: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PublishSection {
    #[serde(default = "default_publisher")]
    program: String,
    #[serde(default = "default_message")]
    message: String,
    branch: Option<String>,
    #[serde(default)]
    push: bool,
    #[serde(default)]
    no_jekyll: bool,
    #[serde(default)]
    extra_args: Vec<String>,
}

fn default_reminder() -> Option<String> {
    Some(DEFAULT_REMINDER.to_string())
}
fn default_generator() -> String {
    "pdoc".to_string()
}
fn default_source() -> String {
    "billogram_api.py".to_string()
}
fn default_output() -> String {
    "docs".to_string()
}
fn default_publisher() -> String {
    "ghp-import".to_string()
}
fn default_message() -> String {
    "Update documentation".to_string()
}
fn default_true() -> bool {
    true
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            reminder: default_reminder(),
            clean: false,
            generate: GenerateSection::default(),
            publish: PublishSection::default(),
        }
    }
}

impl Default for GenerateSection {
    fn default() -> Self {
        Self {
            program: default_generator(),
            source: default_source(),
            output: default_output(),
            overwrite: true,
            all_submodules: true,
            extra_args: vec![],
            root_file: None,
        }
    }
}

impl Default for PublishSection {
    fn default() -> Self {
        Self {
            program: default_publisher(),
            message: default_message(),
            branch: None,
            push: false,
            no_jekyll: false,
            extra_args: vec![],
        }
    }
}

impl ConfigFile {
    /// Convert into the pipeline's configuration.
    pub fn into_pipeline_config(self) -> PipelineConfig {
        PipelineConfig {
            generate: GenerateConfig {
                program: self.generate.program,
                source: PathBuf::from(self.generate.source),
                output_dir: PathBuf::from(self.generate.output),
                overwrite: self.generate.overwrite,
                all_submodules: self.generate.all_submodules,
                extra_args: self.generate.extra_args,
                root_file: self.generate.root_file,
            },
            publish: PublishConfig {
                program: self.publish.program,
                message: self.publish.message,
                branch: self.publish.branch,
                push: self.publish.push,
                no_jekyll: self.publish.no_jekyll,
                extra_args: self.publish.extra_args,
            },
            reminder: self.reminder.filter(|r| !r.trim().is_empty()),
            clean: self.clean,
            dry_run: false,
            skip_publish: false,
            reserve_stdout: false,
        }
    }
}

/// Parse configuration from TOML text.
pub fn parse_config(content: &str) -> Result<ConfigFile> {
    toml::from_str(content).map_err(Into::into)
}

/// Load configuration from `path` if it exists.
/// Returns an error if the config file exists but is malformed.
pub fn load_config(path: &Path) -> Result<PipelineConfig> {
    if !path.exists() {
        tracing::debug!("{} not found, using defaults", path.display());
        return Ok(ConfigFile::default().into_pipeline_config());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let config =
        parse_config(&content).with_context(|| format!("Failed to parse {}", path.display()))?;

    tracing::info!("Loaded config from {}", path.display());
    Ok(config.into_pipeline_config())
}
