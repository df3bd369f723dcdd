//! Write a default docship.toml.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Run the init command.
pub async fn run(config_path: &Path, yes: bool) -> Result<()> {
    if config_path.exists() && !yes {
        tracing::warn!(
            "{} already exists. Use --yes to overwrite.",
            config_path.display()
        );
        return Ok(());
    }

    if let Some(parent) = config_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    fs::write(config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    tracing::info!("Created {}", config_path.display());
    tracing::info!("Run 'docship check' to verify the generator and publisher are installed.");

    Ok(())
}

const DEFAULT_CONFIG: &str = r#"# docship configuration

# Printed before publishing. Set to "" to disable.
reminder = "Remember to run `git push origin gh-pages` to make the new documentation live."

# Remove the output directory before generating
clean = false

[generate]
# Documentation generator
program = "pdoc"

# Module to document
source = "billogram_api.py"

# Output directory for the generated HTML
output = "docs"

# Replace existing output
overwrite = true

# Include nested modules
all_submodules = true

# Name of the page renamed to index.html (defaults to "<module>.m.html")
# root_file = "billogram_api.m.html"

# Extra generator arguments, passed before the module
extra_args = []

[publish]
# Publishing tool
program = "ghp-import"

# Commit message for the pages branch
message = "Update documentation"

# Target branch (publisher default when unset)
# branch = "gh-pages"

# Push the branch after committing
push = false

# Add a .nojekyll file
no_jekyll = false

# Extra publisher arguments, passed before the output directory
extra_args = []
"#;
