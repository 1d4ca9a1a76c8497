//! Wordlist stage pipeline
//!
//! The selected stages always run in one fixed order. A filtering stage
//! replaces the working set with its result (and persists it when an output
//! path is known); a reporting stage prints something derived from the
//! working set as it stands at that point.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::dedup::{format_duplicate, unique_sorted, LineCounter};
use crate::error::{Result, ToolError};
use crate::filter::{FilterKind, LineFilter};
use crate::line::Line;
use crate::output::write_lines;
use crate::progress::print_warning;

/// Shown when a filtering stage has nowhere to write
pub const MISSING_OUTPUT_WARNING: &str =
    "Output file not specified. Please use -o to specify an output file.";

/// A pipeline stage, selectable by a command-line flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    RemoveDuplicates,
    RemoveForeign,
    RemoveExtensions,
    RetainExtensions,
    ShowUnique,
    ShowDuplicates,
}

impl Stage {
    /// Evaluation order
    pub const ORDER: [Stage; 6] = [
        Stage::RemoveDuplicates,
        Stage::RemoveForeign,
        Stage::RemoveExtensions,
        Stage::RetainExtensions,
        Stage::ShowUnique,
        Stage::ShowDuplicates,
    ];

    /// The long flag that selects this stage
    pub fn flag(self) -> &'static str {
        match self {
            Self::RemoveDuplicates => "--remove-duplicates",
            Self::RemoveForeign => "--remove-foreign",
            Self::RemoveExtensions => "--remove-extensions",
            Self::RetainExtensions => "--retain-extensions",
            Self::ShowUnique => "--show-unique",
            Self::ShowDuplicates => "--show-duplicates",
        }
    }
}

/// Where reports and warnings go
pub trait PipelineSink {
    /// Emit one report line
    fn report(&mut self, line: &str) -> io::Result<()>;

    /// Emit a user-facing warning
    fn warn(&mut self, message: &str);
}

/// Reports on stdout, warnings through the console helpers
pub struct ConsoleSink {
    stdout: io::Stdout,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self { stdout: io::stdout() }
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineSink for ConsoleSink {
    fn report(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.stdout.lock(), "{}", line)
    }

    fn warn(&mut self, message: &str) {
        print_warning(message);
    }
}

/// Collects everything in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    pub reports: Vec<String>,
    pub warnings: Vec<String>,
}

impl PipelineSink for MemorySink {
    fn report(&mut self, line: &str) -> io::Result<()> {
        self.reports.push(line.to_string());
        Ok(())
    }

    fn warn(&mut self, message: &str) {
        self.warnings.push(message.to_string());
    }
}

/// Unique report: the deduplicated working set
pub fn report_unique(lines: &[Line]) -> Vec<String> {
    unique_sorted(lines).into_iter().map(Line::into_raw).collect()
}

/// Duplicate report: `<line> (Count: <n>)` for every line seen more than once
pub fn report_duplicates(lines: &[Line]) -> Vec<String> {
    let counter: LineCounter = lines.iter().collect();
    counter
        .duplicates()
        .into_iter()
        .map(|(line, count)| format_duplicate(line, count))
        .collect()
}

enum Action {
    Dedup,
    Filter(LineFilter),
    ShowUnique,
    ShowDuplicates,
}

impl Action {
    fn for_stage(stage: Stage) -> Result<Self> {
        Ok(match stage {
            Stage::RemoveDuplicates => Self::Dedup,
            Stage::RemoveForeign => Self::Filter(LineFilter::new(FilterKind::AsciiOnly)?),
            Stage::RemoveExtensions => Self::Filter(LineFilter::new(FilterKind::ExcludeExtensions)?),
            Stage::RetainExtensions => Self::Filter(LineFilter::new(FilterKind::RetainExtensions)?),
            Stage::ShowUnique => Self::ShowUnique,
            Stage::ShowDuplicates => Self::ShowDuplicates,
        })
    }
}

/// What a single stage did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageOutcome {
    /// Filter result written to the output file
    Written { path: PathBuf, lines: u64 },
    /// Filter ran but there was no output path
    NotPersisted { lines: u64 },
    /// Report printed this many lines
    Reported { lines: u64 },
}

/// Result of a pipeline run
#[derive(Debug, Default)]
pub struct PipelineRun {
    /// Working set after the last stage
    pub lines: Vec<Line>,
    pub outcomes: Vec<(Stage, StageOutcome)>,
}

impl PipelineRun {
    /// Lines written by the last filtering stage that persisted
    pub fn lines_written(&self) -> u64 {
        self.outcomes
            .iter()
            .rev()
            .find_map(|(_, outcome)| match outcome {
                StageOutcome::Written { lines, .. } => Some(*lines),
                _ => None,
            })
            .unwrap_or(0)
    }
}

/// Ordered list of stages applied to a working set
pub struct Pipeline {
    steps: Vec<(Stage, Action)>,
}

impl Pipeline {
    /// Build a pipeline; stages are put in evaluation order and repeats ignored
    pub fn new(stages: &[Stage]) -> Result<Self> {
        let steps = Stage::ORDER
            .iter()
            .filter(|stage| stages.contains(stage))
            .map(|&stage| Action::for_stage(stage).map(|action| (stage, action)))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { steps })
    }

    pub fn stages(&self) -> Vec<Stage> {
        self.steps.iter().map(|(stage, _)| *stage).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Run every stage over `lines`
    pub fn run(
        &self,
        mut lines: Vec<Line>,
        output: Option<&Path>,
        sink: &mut dyn PipelineSink,
    ) -> Result<PipelineRun> {
        let mut outcomes = Vec::with_capacity(self.steps.len());

        for (stage, action) in &self.steps {
            let outcome = match action {
                Action::Dedup => {
                    lines = unique_sorted(&lines);
                    persist(&lines, output, sink)?
                }
                Action::Filter(filter) => {
                    lines = filter.apply(&lines);
                    persist(&lines, output, sink)?
                }
                Action::ShowUnique => emit(report_unique(&lines), sink)?,
                Action::ShowDuplicates => emit(report_duplicates(&lines), sink)?,
            };

            log::debug!("{}: {:?}", stage.flag(), outcome);
            outcomes.push((*stage, outcome));
        }

        Ok(PipelineRun { lines, outcomes })
    }
}

fn persist(lines: &[Line], output: Option<&Path>, sink: &mut dyn PipelineSink) -> Result<StageOutcome> {
    match output {
        Some(path) => {
            let written = write_lines(path, lines)?;
            log::info!("Wrote {} lines to {}", written, path.display());
            Ok(StageOutcome::Written {
                path: path.to_path_buf(),
                lines: written,
            })
        }
        None => {
            sink.warn(MISSING_OUTPUT_WARNING);
            Ok(StageOutcome::NotPersisted {
                lines: lines.len() as u64,
            })
        }
    }
}

fn emit(report: Vec<String>, sink: &mut dyn PipelineSink) -> Result<StageOutcome> {
    for line in &report {
        sink.report(line).map_err(ToolError::Report)?;
    }
    Ok(StageOutcome::Reported {
        lines: report.len() as u64,
    })
}
