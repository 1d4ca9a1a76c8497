//! Wordlist ingestion
//!
//! Reads every input file into one ordered pool of lines. A file that cannot
//! be opened is reported and skipped; the rest of the batch carries on.

use std::path::{Path, PathBuf};

use crate::encoding::Utf8LineIterator;
use crate::error::{Result, ToolError};
use crate::line::Line;

/// Lines gathered from the input files, in file then line order
#[derive(Debug, Default)]
pub struct Ingested {
    pub lines: Vec<Line>,
    /// Files that could not be read, with the reason
    pub skipped: Vec<(PathBuf, ToolError)>,
    pub files_read: u64,
    pub bytes_read: u64,
}

/// Read a single UTF-8 file into memory
pub fn read_lines(path: &Path) -> Result<Vec<Line>> {
    if path.is_dir() {
        return Err(ToolError::MissingInput(path.to_path_buf()));
    }

    let mut iter = Utf8LineIterator::new(path)?;
    let lines = iter.by_ref().collect::<Result<Vec<_>>>()?;
    if iter.lossy_lines() > 0 {
        log::warn!(
            "{}: {} lines with invalid UTF-8, decoded lossily",
            path.display(),
            iter.lossy_lines()
        );
    }
    Ok(lines)
}

/// Read all `paths`, calling `on_file` after each attempt
pub fn read_inputs<F>(paths: &[PathBuf], mut on_file: F) -> Ingested
where
    F: FnMut(&Path, Option<&ToolError>),
{
    let mut ingested = Ingested::default();

    for path in paths {
        match read_lines(path) {
            Ok(lines) => {
                log::debug!("{}: {} lines", path.display(), lines.len());
                ingested.files_read += 1;
                ingested.bytes_read += std::fs::metadata(path).map(|m| m.len()).unwrap_or(0);
                ingested.lines.extend(lines);
                on_file(path, None);
            }
            Err(err) => {
                log::debug!("{}: skipped ({})", path.display(), err);
                on_file(path, Some(&err));
                ingested.skipped.push((path.clone(), err));
            }
        }
    }

    ingested
}
