//! Wordlist manager engine
//!
//! Ties ingestion, the stage pipeline and the console together for one run.

use std::path::PathBuf;

use crate::cli::ManagerArgs;
use crate::error::Result;
use crate::input::read_inputs;
use crate::pipeline::{ConsoleSink, Pipeline, PipelineRun, PipelineSink, Stage};
use crate::progress::{create_progress_bar, print_error, RunStats};

/// Processor configuration
#[derive(Debug, Clone)]
pub struct ProcessorConfig {
    pub inputs: Vec<PathBuf>,
    pub output: Option<PathBuf>,
    pub stages: Vec<Stage>,
    pub quiet: bool,
    pub verbose: bool,
    pub stats: bool,
}

impl ProcessorConfig {
    pub fn from_args(args: &ManagerArgs) -> Self {
        Self {
            inputs: args.input.clone(),
            output: args.output.clone(),
            stages: args.stages(),
            quiet: args.verbosity.quiet,
            verbose: args.verbosity.verbose,
            stats: args.stats,
        }
    }
}

/// Main processor
pub struct Processor {
    config: ProcessorConfig,
    pipeline: Pipeline,
}

impl Processor {
    pub fn new(config: ProcessorConfig) -> Result<Self> {
        let pipeline = Pipeline::new(&config.stages)?;
        Ok(Self { config, pipeline })
    }

    /// Run against the console
    pub fn process(&self) -> Result<RunStats> {
        self.process_with(&mut ConsoleSink::new())
    }

    /// Read every input, then run the pipeline with `sink` receiving reports
    pub fn process_with(&self, sink: &mut dyn PipelineSink) -> Result<RunStats> {
        let mut stats = RunStats::new();

        let pb = if self.config.quiet {
            indicatif::ProgressBar::hidden()
        } else {
            create_progress_bar(self.config.inputs.len() as u64, "Reading...")
        };

        let ingested = read_inputs(&self.config.inputs, |path, err| {
            if let Some(err) = err {
                pb.suspend(|| print_error(&format!("Error: {}", err)));
            } else if self.config.verbose {
                pb.set_message(format!("{}", path.display()));
            }
            pb.inc(1);
        });
        pb.finish_and_clear();

        stats.files_read = ingested.files_read;
        stats.files_skipped = ingested.skipped.len() as u64;
        stats.bytes_read = ingested.bytes_read;
        stats.lines_read = ingested.lines.len() as u64;

        if self.pipeline.is_empty() {
            log::warn!("No stage selected, nothing to do");
        } else {
            log::debug!("stages: {:?}", self.pipeline.stages());
        }

        let run: PipelineRun = self
            .pipeline
            .run(ingested.lines, self.config.output.as_deref(), sink)?;

        stats.stages_run = run.outcomes.len() as u64;
        stats.lines_written = run.lines_written();

        if self.config.stats {
            stats.print_summary();
        }

        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{MemorySink, MISSING_OUTPUT_WARNING};
    use std::fs;
    use tempfile::TempDir;

    fn config(inputs: Vec<PathBuf>, output: Option<PathBuf>, stages: Vec<Stage>) -> ProcessorConfig {
        ProcessorConfig {
            inputs,
            output,
            stages,
            quiet: true,
            verbose: false,
            stats: false,
        }
    }

    #[test]
    fn test_end_to_end_dedup() {
        let dir = TempDir::new().unwrap();
        let a = dir.path().join("a.txt");
        let b = dir.path().join("b.txt");
        let out = dir.path().join("out.txt");
        fs::write(&a, "x.txt\nx.txt\ny\n").unwrap();
        fs::write(&b, "z.exe\n").unwrap();

        let processor =
            Processor::new(config(vec![a, b], Some(out.clone()), vec![Stage::RemoveDuplicates])).unwrap();
        let stats = processor.process_with(&mut MemorySink::default()).unwrap();

        assert_eq!(fs::read_to_string(&out).unwrap(), "x.txt\ny\nz.exe\n");
        assert_eq!(stats.files_read, 2);
        assert_eq!(stats.lines_read, 4);
        assert_eq!(stats.lines_written, 3);
    }

    #[test]
    fn test_missing_input_does_not_stop_the_run() {
        let dir = TempDir::new().unwrap();
        let good = dir.path().join("good.txt");
        fs::write(&good, "b\na\nb\n").unwrap();

        let processor = Processor::new(config(
            vec![dir.path().join("missing.txt"), good],
            None,
            vec![Stage::ShowDuplicates],
        ))
        .unwrap();
        let mut sink = MemorySink::default();
        let stats = processor.process_with(&mut sink).unwrap();

        assert_eq!(stats.files_read, 1);
        assert_eq!(stats.files_skipped, 1);
        assert_eq!(sink.reports, vec!["b (Count: 2)"]);
    }

    #[test]
    fn test_filter_without_output_only_warns() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("in.txt");
        fs::write(&input, "a\n").unwrap();

        let processor =
            Processor::new(config(vec![input], None, vec![Stage::RemoveForeign, Stage::ShowUnique])).unwrap();
        let mut sink = MemorySink::default();
        let stats = processor.process_with(&mut sink).unwrap();

        assert_eq!(sink.warnings, vec![MISSING_OUTPUT_WARNING]);
        assert_eq!(sink.reports, vec!["a"]);
        assert_eq!(stats.lines_written, 0);
        assert_eq!(stats.stages_run, 2);
    }
}
