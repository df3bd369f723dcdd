//! Documentation generator step.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::command::ToolCommand;
use crate::config::GenerateConfig;
use crate::error::PipelineError;

/// File name the root page is renamed to.
pub const ENTRY_POINT: &str = "index.html";

/// Build the generator invocation.
pub fn generator_command(config: &GenerateConfig) -> ToolCommand {
    let mut cmd = ToolCommand::new(&config.program)
        .arg("--html")
        .arg("--html-dir")
        .arg(config.output_dir.to_string_lossy());

    if config.overwrite {
        cmd = cmd.arg("--overwrite");
    }
    if config.all_submodules {
        cmd = cmd.arg("--all-submodules");
    }

    cmd.args(config.extra_args.iter().cloned())
        .arg(config.source.to_string_lossy())
}

/// Name of the page the generator writes for the source module.
///
/// `billogram_api.py` -> `billogram_api.m.html`
pub fn root_file_name(config: &GenerateConfig) -> String {
    if let Some(name) = &config.root_file {
        return name.clone();
    }

    let stem = config
        .source
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("index");

    format!("{}.m.html", stem)
}

/// Move the root page to `index.html`, replacing any previous entry point.
pub fn rename_entry_point(output_dir: &Path, root_file: &str) -> Result<PathBuf, PipelineError> {
    let from = output_dir.join(root_file);
    let to = output_dir.join(ENTRY_POINT);

    if !from.is_file() {
        return Err(PipelineError::EntryPointMissing { path: from });
    }
    if from == to {
        return Ok(to);
    }

    if to.exists() {
        fs::remove_file(&to)
            .map_err(|e| PipelineError::io(format!("Failed to remove {}", to.display()), e))?;
    }

    fs::rename(&from, &to).map_err(|e| {
        PipelineError::io(
            format!("Failed to rename {} to {}", from.display(), to.display()),
            e,
        )
    })?;

    tracing::info!("Renamed {} -> {}", from.display(), to.display());

    Ok(to)
}

/// Remove a previous build so no stale pages survive regeneration.
pub fn clean_output(output_dir: &Path) -> Result<(), PipelineError> {
    if !output_dir.exists() {
        return Ok(());
    }

    fs::remove_dir_all(output_dir)
        .map_err(|e| PipelineError::io(format!("Failed to clean {}", output_dir.display()), e))?;

    tracing::info!("Removed {}", output_dir.display());
    Ok(())
}

/// Count generated HTML pages.
pub fn count_pages(output_dir: &Path) -> usize {
    WalkDir::new(output_dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| e.path().extension().and_then(|ext| ext.to_str()) == Some("html"))
        .count()
}
