//! Documentation publishing pipeline for docship.
//!
//! Runs an external documentation generator over a source module, promotes its
//! root page to `index.html` and hands the output directory to a publishing tool.

pub mod command;
pub mod config;
pub mod error;
pub mod generate;
pub mod pipeline;
pub mod publish;

pub use command::{probe, CommandOutcome, CommandRunner, SystemRunner, ToolCommand};
pub use config::{GenerateConfig, PipelineConfig, PublishConfig};
pub use error::{PipelineError, Step};
pub use pipeline::{BuildReport, Pipeline, PublishReport};
