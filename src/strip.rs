//! Per-line strippers
//!
//! Two independent transformations: erasing the first matching literal prefix,
//! and removing every leading `/`. Both keep line order, line count and line
//! terminators intact.

use std::path::{Path, PathBuf};

use crate::encoding::read_text;
use crate::error::{Result, ToolError};
use crate::line::raw_lines;
use crate::output::write_bytes;

/// Prefixes erased by default, tried in this order
pub const DEFAULT_PREFIXES: &[&str] = &["/api/", "/api", "api/"];

/// Ordered list of literal prefixes; the first one that matches wins
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixSet {
    prefixes: Vec<String>,
}

impl PrefixSet {
    pub fn new<I, S>(prefixes: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let prefixes: Vec<String> = prefixes
            .into_iter()
            .map(Into::into)
            .filter(|p: &String| !p.is_empty())
            .collect();

        if prefixes.is_empty() {
            return Err(ToolError::NoPrefixes);
        }
        Ok(Self { prefixes })
    }

    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }

    /// Strip the first matching prefix, then any whitespace it leaves behind.
    /// Lines without a matching prefix come back unchanged.
    pub fn strip<'a>(&self, body: &'a str) -> &'a str {
        self.prefixes
            .iter()
            .find_map(|p| body.strip_prefix(p.as_str()))
            .map_or(body, str::trim_start)
    }
}

impl Default for PrefixSet {
    fn default() -> Self {
        Self {
            prefixes: DEFAULT_PREFIXES.iter().map(|p| p.to_string()).collect(),
        }
    }
}

/// Remove every leading `/` from a line
#[inline]
pub fn strip_leading_slashes(line: &str) -> &str {
    line.trim_start_matches('/')
}

/// The transformation a strip tool applies to each line body
#[derive(Debug, Clone)]
pub enum StripMode {
    Prefix(PrefixSet),
    LeadingSlashes,
}

impl StripMode {
    fn apply<'a>(&self, body: &'a str) -> &'a str {
        match self {
            Self::Prefix(set) => set.strip(body),
            Self::LeadingSlashes => strip_leading_slashes(body),
        }
    }
}

/// Apply `mode` to every line of `text`, keeping terminators
pub fn strip_text(text: &str, mode: &StripMode) -> (String, StripStats) {
    let mut out = String::with_capacity(text.len());
    let mut stats = StripStats::default();

    for line in raw_lines(text) {
        let stripped = mode.apply(line.body);
        stats.lines += 1;
        if stripped.len() != line.body.len() {
            stats.changed += 1;
        }
        out.push_str(stripped);
        out.push_str(line.terminator);
    }

    (out, stats)
}

/// Counters for one strip run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StripStats {
    pub lines: u64,
    pub changed: u64,
}

/// Settings for a strip run
#[derive(Debug, Clone)]
pub struct StripConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub mode: StripMode,
}

/// Read `config.input`, strip every line and write `config.output`
pub fn strip_file(config: &StripConfig) -> Result<StripStats> {
    let decoded = read_text(&config.input)?;
    let (stripped, stats) = strip_text(&decoded.text, &config.mode);

    write_bytes(&config.output, &decoded.encode(&stripped))?;
    log::debug!(
        "{} -> {}: {} lines, {} changed",
        config.input.display(),
        config.output.display(),
        stats.lines,
        stats.changed
    );

    Ok(stats)
}

/// Strip `prefixes` from every line of `input` into `output`
pub fn strip_prefixes(input: &Path, output: &Path, prefixes: PrefixSet) -> Result<StripStats> {
    strip_file(&StripConfig {
        input: input.to_path_buf(),
        output: output.to_path_buf(),
        mode: StripMode::Prefix(prefixes),
    })
}
