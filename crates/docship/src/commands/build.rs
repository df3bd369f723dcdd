//! Build command: generate and promote the root page.

use std::path::{Path, PathBuf};

use anyhow::Result;
use docship_pipeline::{BuildReport, Pipeline, SystemRunner};

use crate::config::load_config;

/// Flags for `docship build`.
#[derive(Debug, Default)]
pub struct Options {
    pub output: Option<PathBuf>,
    pub clean: bool,
    pub dry_run: bool,
    pub json: bool,
}

/// Run the build command.
pub async fn run(config_path: &Path, options: Options) -> Result<()> {
    let mut config = load_config(config_path)?;

    if let Some(output) = options.output {
        config.generate.output_dir = output;
    }
    config.clean |= options.clean;
    config.dry_run = options.dry_run;
    config.skip_publish = true;
    config.reserve_stdout = options.json;

    tracing::info!("Generating documentation for {}", config.generate.source.display());

    let report = Pipeline::new(config, runner(options.json)).build().await?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&report_json(&report))?);
    } else {
        tracing::info!("Built {} pages in {}ms", report.pages, report.duration_ms);
        tracing::info!("Entry point: {}", report.entry_point.display());
    }

    Ok(())
}

/// Runner for the external tools. With `--json` their stdout goes to stderr.
pub fn runner(json: bool) -> SystemRunner {
    if json {
        SystemRunner::stdout_to_stderr()
    } else {
        SystemRunner::default()
    }
}

/// JSON form of a build report.
pub fn report_json(report: &BuildReport) -> serde_json::Value {
    serde_json::json!({
        "output_dir": report.output_dir.display().to_string(),
        "entry_point": report.entry_point.display().to_string(),
        "pages": report.pages,
        "duration_ms": report.duration_ms,
    })
}
