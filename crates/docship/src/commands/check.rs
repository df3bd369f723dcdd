//! Check that the external tools can be started.

use std::path::Path;

use anyhow::Result;
use docship_pipeline::probe;

use crate::config::load_config;

/// Run the check command.
pub async fn run(config_path: &Path) -> Result<()> {
    let config = load_config(config_path)?;

    let mut missing = Vec::new();
    for (role, program) in [
        ("generator", &config.generate.program),
        ("publisher", &config.publish.program),
    ] {
        if probe(program).await {
            tracing::info!("{} '{}': ok", role, program);
        } else {
            tracing::warn!("{} '{}': missing", role, program);
            missing.push(program.as_str());
        }
    }

    if !config.generate.source.exists() {
        tracing::warn!("Source module not found: {}", config.generate.source.display());
    }

    if !missing.is_empty() {
        anyhow::bail!("Missing tools: {}", missing.join(", "));
    }

    Ok(())
}
