//! docship CLI - generate Python module documentation and publish it.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use docship_pipeline::PipelineError;
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "docship")]
#[command(about = "Generate Python module documentation and publish it to a pages branch")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to docship.toml config file
    #[arg(short, long, default_value = "docship.toml", global = true)]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print the run report as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate documentation, rename the root page and publish it
    Publish {
        /// Output directory (defaults to config or "docs")
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Commit message for the pages branch
        #[arg(short, long)]
        message: Option<String>,

        /// Stop after generating; do not run the publisher
        #[arg(long)]
        no_publish: bool,

        /// Remove the output directory before generating
        #[arg(long)]
        clean: bool,

        /// Show the commands without running them
        #[arg(long)]
        dry_run: bool,
    },

    /// Generate documentation and rename the root page to index.html
    Build {
        /// Output directory (defaults to config or "docs")
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Remove the output directory before generating
        #[arg(long)]
        clean: bool,

        /// Show the commands without running them
        #[arg(long)]
        dry_run: bool,
    },

    /// Write a default docship.toml
    Init {
        /// Overwrite an existing config file
        #[arg(short, long)]
        yes: bool,
    },

    /// Check that the generator and publisher are installed
    Check,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    // Keep stdout for the JSON report
    let subscriber = fmt().with_env_filter(filter).with_target(false);
    if cli.json {
        subscriber.with_writer(std::io::stderr).init();
    } else {
        subscriber.init();
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:#}", e);
            let code = e
                .downcast_ref::<PipelineError>()
                .map(PipelineError::exit_code)
                .unwrap_or(1);
            ExitCode::from(code)
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Publish {
            output,
            message,
            no_publish,
            clean,
            dry_run,
        } => {
            let options = commands::publish::Options {
                output,
                message,
                skip_publish: no_publish,
                clean,
                dry_run,
                json: cli.json,
            };
            commands::publish::run(&cli.config, options).await?;
        }
        Commands::Build {
            output,
            clean,
            dry_run,
        } => {
            let options = commands::build::Options {
                output,
                clean,
                dry_run,
                json: cli.json,
            };
            commands::build::run(&cli.config, options).await?;
        }
        Commands::Init { yes } => {
            commands::init::run(&cli.config, yes).await?;
        }
        Commands::Check => {
            commands::check::run(&cli.config).await?;
        }
    }

    Ok(())
}
