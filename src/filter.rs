//! Line filtering module
//!
//! Character-set and file-extension filters for the wordlist manager. Every
//! filter works on trimmed lines, drops blank ones and returns its result
//! sorted ascending.

use regex::Regex;

use crate::error::{Result, ToolError};
use crate::line::Line;

/// Patterns used by the built-in filters
pub mod patterns {
    /// Whole line inside the 7-bit ASCII range
    pub const ASCII_ONLY: &str = r"^[\x00-\x7F]+$";

    /// Ends in a dot followed by 2 to 5 word characters (`name.ext`)
    pub const FILE_EXTENSION: &str = r"\.\w{2,5}$";
}

/// Compiled regex filter
#[derive(Debug, Clone)]
pub struct PatternFilter {
    pattern: Regex,
}

impl PatternFilter {
    pub fn new(pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern).map_err(|source| ToolError::Pattern {
            pattern: pattern.to_string(),
            source,
        })?;

        Ok(Self { pattern: regex })
    }

    #[inline]
    pub fn matches(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }
}

/// The filters the wordlist manager knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    /// Keep lines made only of ASCII characters
    AsciiOnly,
    /// Drop lines that look like `name.ext`
    ExcludeExtensions,
    /// Keep only lines that look like `name.ext`
    RetainExtensions,
}

impl FilterKind {
    fn pattern(self) -> &'static str {
        match self {
            Self::AsciiOnly => patterns::ASCII_ONLY,
            Self::ExcludeExtensions | Self::RetainExtensions => patterns::FILE_EXTENSION,
        }
    }

    /// Whether a pattern match means the line is kept
    fn keep_on_match(self) -> bool {
        !matches!(self, Self::ExcludeExtensions)
    }
}

/// A filter ready to be applied to a working set
#[derive(Debug, Clone)]
pub struct LineFilter {
    kind: FilterKind,
    pattern: PatternFilter,
}

impl LineFilter {
    pub fn new(kind: FilterKind) -> Result<Self> {
        Ok(Self {
            kind,
            pattern: PatternFilter::new(kind.pattern())?,
        })
    }

    /// Check a trimmed, non-blank line against the filter
    #[inline]
    pub fn keeps(&self, trimmed: &str) -> bool {
        self.pattern.matches(trimmed) == self.kind.keep_on_match()
    }

    /// Filter `lines` into a sorted list of trimmed lines
    pub fn apply(&self, lines: &[Line]) -> Vec<Line> {
        let mut kept: Vec<Line> = lines
            .iter()
            .map(Line::trimmed)
            .filter(|t| !t.is_empty() && self.keeps(t))
            .map(Line::from)
            .collect();
        kept.sort_unstable();
        kept
    }
}
