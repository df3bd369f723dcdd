//! Publish command: the full generate, rename and publish sequence.

use std::path::{Path, PathBuf};

use anyhow::Result;
use docship_pipeline::Pipeline;

use super::build::runner;
use crate::config::load_config;

/// Flags for `docship publish`.
#[derive(Debug, Default)]
pub struct Options {
    pub output: Option<PathBuf>,
    pub message: Option<String>,
    pub skip_publish: bool,
    pub clean: bool,
    pub dry_run: bool,
    pub json: bool,
}

/// Run the publish command.
pub async fn run(config_path: &Path, options: Options) -> Result<()> {
    let mut config = load_config(config_path)?;

    if let Some(output) = options.output {
        config.generate.output_dir = output;
    }
    if let Some(message) = options.message {
        config.publish.message = message;
    }
    config.clean |= options.clean;
    config.dry_run = options.dry_run;
    config.skip_publish = options.skip_publish;
    config.reserve_stdout = options.json;

    let report = Pipeline::new(config, runner(options.json)).publish().await?;

    if options.json {
        let json = serde_json::json!({
            "build": super::build::report_json(&report.build),
            "published": report.published,
            "duration_ms": report.duration_ms,
        });
        println!("{}", serde_json::to_string_pretty(&json)?);
    } else if report.published {
        tracing::info!(
            "Published {} pages from {} in {}ms",
            report.build.pages,
            report.build.output_dir.display(),
            report.duration_ms
        );
    } else {
        tracing::info!("Documentation ready in {}", report.build.output_dir.display());
    }

    Ok(())
}
