//! Generate -> rename -> publish orchestration.

use std::path::PathBuf;
use std::time::Instant;

use crate::command::{CommandRunner, ToolCommand};
use crate::config::PipelineConfig;
use crate::error::{PipelineError, Step};
use crate::generate::{
    clean_output, count_pages, generator_command, rename_entry_point, root_file_name, ENTRY_POINT,
};
use crate::publish::publisher_command;

/// Result of a build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    /// Output directory
    pub output_dir: PathBuf,

    /// Path of the renamed `index.html`
    pub entry_point: PathBuf,

    /// Number of HTML pages in the output directory
    pub pages: usize,

    /// Build time in milliseconds
    pub duration_ms: u64,
}

/// Result of a full publish run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishReport {
    pub build: BuildReport,

    /// Whether the publisher ran
    pub published: bool,

    /// Total time in milliseconds
    pub duration_ms: u64,
}

/// Runs the documentation steps in order, stopping at the first failure.
pub struct Pipeline<R> {
    config: PipelineConfig,
    runner: R,
}

impl<R: CommandRunner> Pipeline<R> {
    /// Create a pipeline that executes tools through `runner`.
    pub fn new(config: PipelineConfig, runner: R) -> Self {
        Self { config, runner }
    }

    /// Generate the documentation and put `index.html` in place.
    pub async fn build(&self) -> Result<BuildReport, PipelineError> {
        let start = Instant::now();
        let generate = &self.config.generate;
        let output_dir = generate.output_dir.clone();
        let entry_point = output_dir.join(ENTRY_POINT);
        let root_file = root_file_name(generate);

        if !generate.source.exists() {
            return Err(PipelineError::SourceMissing(generate.source.clone()));
        }

        if self.config.clean {
            if self.config.dry_run {
                tracing::info!("Would remove {}", output_dir.display());
            } else {
                clean_output(&output_dir)?;
            }
        }

        self.execute(Step::Generate, generator_command(generate)).await?;

        if self.config.dry_run {
            tracing::info!(
                "Would rename {} -> {}",
                output_dir.join(&root_file).display(),
                entry_point.display()
            );
            return Ok(BuildReport {
                output_dir,
                entry_point,
                pages: 0,
                duration_ms: start.elapsed().as_millis() as u64,
            });
        }

        let entry_point = rename_entry_point(&output_dir, &root_file)?;
        let pages = count_pages(&output_dir);

        Ok(BuildReport {
            output_dir,
            entry_point,
            pages,
            duration_ms: start.elapsed().as_millis() as u64,
        })
    }

    /// Print the reminder, build, then hand the output directory to the publisher.
    pub async fn publish(&self) -> Result<PublishReport, PipelineError> {
        let start = Instant::now();

        if let Some(reminder) = &self.config.reminder {
            if self.config.reserve_stdout {
                eprintln!("{}", reminder);
            } else {
                println!("{}", reminder);
            }
        }

        let build = self.build().await?;

        let published = if self.config.skip_publish {
            tracing::info!("Skipping publish step");
            false
        } else {
            let cmd = publisher_command(&self.config.publish, &build.output_dir);
            self.execute(Step::Publish, cmd).await?;
            !self.config.dry_run
        };

        Ok(PublishReport {
            build,
            published,
            duration_ms: start.elapsed().as_millis() as u64,
        })
    }

    /// Run one tool, mapping a start failure or non-zero exit to an error.
    async fn execute(&self, step: Step, cmd: ToolCommand) -> Result<(), PipelineError> {
        if self.config.dry_run {
            tracing::info!("Would run: {}", cmd);
            return Ok(());
        }

        tracing::info!("Running {} step: {}", step, cmd);

        let outcome = self
            .runner
            .run(&cmd)
            .await
            .map_err(|source| PipelineError::ToolUnavailable {
                step,
                program: cmd.program.clone(),
                source,
            })?;

        if !outcome.success() {
            return Err(PipelineError::ToolFailed {
                step,
                program: cmd.program,
                code: outcome.code,
            });
        }

        tracing::debug!("{} step finished", step);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io;
    use std::path::Path;
    use std::sync::Mutex;

    use pretty_assertions::assert_eq;
    use tempfile::{tempdir, TempDir};

    use crate::command::CommandOutcome;

    /// Records invocations. The generator writes its root page unless told to fail.
    #[derive(Default)]
    struct FakeRunner {
        calls: Mutex<Vec<ToolCommand>>,
        generator_code: i32,
        publisher_code: i32,
        skip_root_page: bool,
        missing_program: Option<String>,
    }

    impl FakeRunner {
        fn programs(&self) -> Vec<String> {
            self.calls
                .lock()
                .unwrap()
                .iter()
                .map(|c| c.program.clone())
                .collect()
        }
    }

    impl CommandRunner for FakeRunner {
        async fn run(&self, command: &ToolCommand) -> io::Result<CommandOutcome> {
            self.calls.lock().unwrap().push(command.clone());

            if self.missing_program.as_deref() == Some(command.program.as_str()) {
                return Err(io::Error::new(io::ErrorKind::NotFound, "not found"));
            }

            if command.program == "pdoc" {
                if self.generator_code == 0 && !self.skip_root_page {
                    let pos = command.args.iter().position(|a| a == "--html-dir").unwrap();
                    let dir = Path::new(&command.args[pos + 1]);
                    let source = Path::new(command.args.last().unwrap());
                    let stem = source.file_stem().unwrap().to_str().unwrap();
                    fs::create_dir_all(dir).unwrap();
                    fs::write(dir.join(format!("{}.m.html", stem)), "<html></html>").unwrap();
                }
                return Ok(CommandOutcome::exited(self.generator_code));
            }

            Ok(CommandOutcome::exited(self.publisher_code))
        }
    }

    fn project() -> (TempDir, PipelineConfig) {
        let temp = tempdir().unwrap();
        let source = temp.path().join("billing.py");
        fs::write(&source, "\"Billing client\"\n").unwrap();

        let mut config = PipelineConfig::default();
        config.generate.source = source;
        config.generate.output_dir = temp.path().join("docs");
        config.reminder = None;

        (temp, config)
    }

    #[tokio::test]
    async fn publishes_after_renaming_root_page() {
        let (_temp, config) = project();
        let out = config.generate.output_dir.clone();
        let pipeline = Pipeline::new(config, FakeRunner::default());

        let report = pipeline.publish().await.unwrap();

        assert!(report.published);
        assert_eq!(report.build.entry_point, out.join("index.html"));
        assert_eq!(report.build.pages, 1);
        assert!(out.join("index.html").exists());
        assert!(!out.join("billing.m.html").exists());
        assert_eq!(pipeline.runner.programs(), vec!["pdoc", "ghp-import"]);

        let calls = pipeline.runner.calls.lock().unwrap();
        assert_eq!(calls[1].args.last().unwrap(), &out.to_string_lossy());
    }

    #[tokio::test]
    async fn missing_source_runs_nothing() {
        let (_temp, mut config) = project();
        config.generate.source = PathBuf::from("does/not/exist.py");
        let out = config.generate.output_dir.clone();
        let pipeline = Pipeline::new(config, FakeRunner::default());

        let err = pipeline.publish().await.unwrap_err();

        assert!(matches!(err, PipelineError::SourceMissing(_)));
        assert!(pipeline.runner.programs().is_empty());
        assert!(!out.join("index.html").exists());
    }

    #[tokio::test]
    async fn generator_failure_prevents_rename_and_publish() {
        let (_temp, config) = project();
        let runner = FakeRunner {
            generator_code: 2,
            ..Default::default()
        };
        let pipeline = Pipeline::new(config, runner);

        let err = pipeline.publish().await.unwrap_err();

        match &err {
            PipelineError::ToolFailed { step, code, .. } => {
                assert_eq!(*step, Step::Generate);
                assert_eq!(*code, Some(2));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(err.exit_code(), 2);
        assert_eq!(pipeline.runner.programs(), vec!["pdoc"]);
    }

    #[tokio::test]
    async fn missing_root_page_prevents_publish() {
        let (_temp, config) = project();
        let runner = FakeRunner {
            skip_root_page: true,
            ..Default::default()
        };
        let pipeline = Pipeline::new(config, runner);

        let err = pipeline.publish().await.unwrap_err();

        assert!(matches!(err, PipelineError::EntryPointMissing { .. }));
        assert_eq!(pipeline.runner.programs(), vec!["pdoc"]);
    }

    #[tokio::test]
    async fn unavailable_generator_is_reported() {
        let (_temp, config) = project();
        let runner = FakeRunner {
            missing_program: Some("pdoc".to_string()),
            ..Default::default()
        };
        let pipeline = Pipeline::new(config, runner);

        let err = pipeline.build().await.unwrap_err();
        assert!(matches!(
            err,
            PipelineError::ToolUnavailable {
                step: Step::Generate,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn publisher_failure_is_reported_after_build() {
        let (_temp, config) = project();
        let out = config.generate.output_dir.clone();
        let runner = FakeRunner {
            publisher_code: 1,
            ..Default::default()
        };
        let pipeline = Pipeline::new(config, runner);

        let err = pipeline.publish().await.unwrap_err();

        assert!(matches!(
            err,
            PipelineError::ToolFailed {
                step: Step::Publish,
                ..
            }
        ));
        assert!(out.join("index.html").exists());
    }

    #[tokio::test]
    async fn clean_removes_stale_output_before_generating() {
        let (_temp, mut config) = project();
        let out = config.generate.output_dir.clone();
        fs::create_dir_all(&out).unwrap();
        fs::write(out.join("removed_module.m.html"), "").unwrap();
        config.clean = true;

        let pipeline = Pipeline::new(config, FakeRunner::default());
        let report = pipeline.build().await.unwrap();

        assert_eq!(report.pages, 1);
        assert!(!out.join("removed_module.m.html").exists());
    }

    #[tokio::test]
    async fn skip_publish_stops_after_build() {
        let (_temp, mut config) = project();
        config.skip_publish = true;
        let pipeline = Pipeline::new(config, FakeRunner::default());

        let report = pipeline.publish().await.unwrap();

        assert!(!report.published);
        assert_eq!(pipeline.runner.programs(), vec!["pdoc"]);
    }

    #[tokio::test]
    async fn dry_run_touches_nothing() {
        let (_temp, mut config) = project();
        let out = config.generate.output_dir.clone();
        fs::create_dir_all(&out).unwrap();
        fs::write(out.join("stale.html"), "").unwrap();
        config.dry_run = true;
        config.clean = true;

        let pipeline = Pipeline::new(config, FakeRunner::default());
        let report = pipeline.publish().await.unwrap();

        assert!(!report.published);
        assert_eq!(report.build.pages, 0);
        assert!(pipeline.runner.programs().is_empty());
        assert!(out.join("stale.html").exists());
        assert!(!out.join("index.html").exists());
    }
}
