//! Publishing step.

use std::path::Path;

use crate::command::ToolCommand;
use crate::config::PublishConfig;

/// Build the publisher invocation for `output_dir`.
pub fn publisher_command(config: &PublishConfig, output_dir: &Path) -> ToolCommand {
    let mut cmd = ToolCommand::new(&config.program)
        .arg("-m")
        .arg(&config.message);

    if let Some(branch) = &config.branch {
        cmd = cmd.arg("-b").arg(branch);
    }
    if config.push {
        cmd = cmd.arg("-p");
    }
    if config.no_jekyll {
        cmd = cmd.arg("-n");
    }

    cmd.args(config.extra_args.iter().cloned())
        .arg(output_dir.to_string_lossy())
}
