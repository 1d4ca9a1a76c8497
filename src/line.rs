//! Line model
//!
//! A [`Line`] keeps the raw text read from a source file. Every comparison
//! made by the wordlist filters goes through [`Line::trimmed`].

use std::fmt;

/// A single line of text, without its terminator.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Line {
    raw: String,
}

impl Line {
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    /// The text as it was read
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The comparison key: leading and trailing whitespace removed
    #[inline]
    pub fn trimmed(&self) -> &str {
        self.raw.trim()
    }

    /// True when the line holds nothing but whitespace
    #[inline]
    pub fn is_blank(&self) -> bool {
        self.trimmed().is_empty()
    }

    pub fn into_raw(self) -> String {
        self.raw
    }
}

impl From<&str> for Line {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Line {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Build a list of lines from string slices (mostly handy in tests)
pub fn lines_from<I, S>(items: I) -> Vec<Line>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    items.into_iter().map(Line::new).collect()
}

/// A line split into its body and its original terminator.
///
/// The strip tools rewrite the body and put the terminator back untouched,
/// so the output keeps the input's line count and line endings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawLine<'a> {
    pub body: &'a str,
    pub terminator: &'a str,
}

impl<'a> RawLine<'a> {
    /// Split a line that may end in `\n` or `\r\n`
    pub fn split(line: &'a str) -> Self {
        let body_len = if let Some(rest) = line.strip_suffix("\r\n") {
            rest.len()
        } else if let Some(rest) = line.strip_suffix('\n') {
            rest.len()
        } else {
            line.len()
        };

        let (body, terminator) = line.split_at(body_len);
        Self { body, terminator }
    }
}

/// Iterate over the lines of `text`, terminators included
pub fn raw_lines(text: &str) -> impl Iterator<Item = RawLine<'_>> {
    text.split_inclusive('\n').map(RawLine::split)
}
