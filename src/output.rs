//! Output management module
//!
//! Handles writing results to output files through a buffered writer.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{Result, ToolError};
use crate::line::Line;

/// Default buffer size for file writing (64KB)
const DEFAULT_BUFFER_SIZE: usize = 64 * 1024;

/// Output file writer with buffering
pub struct OutputWriter {
    writer: BufWriter<File>,
    path: PathBuf,
    lines_written: u64,
    bytes_written: u64,
}

impl OutputWriter {
    /// Create (or truncate) the output file
    pub fn new(path: &Path) -> Result<Self> {
        Self::with_capacity(path, DEFAULT_BUFFER_SIZE)
    }

    pub fn with_capacity(path: &Path, buffer_size: usize) -> Result<Self> {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
            .map_err(|e| ToolError::write(path, e))?;

        Ok(Self {
            writer: BufWriter::with_capacity(buffer_size, file),
            path: path.to_path_buf(),
            lines_written: 0,
            bytes_written: 0,
        })
    }

    /// Write a line followed by a single newline
    pub fn write_line(&mut self, line: &str) -> Result<()> {
        writeln!(self.writer, "{}", line).map_err(|e| ToolError::write(&self.path, e))?;
        self.lines_written += 1;
        self.bytes_written += line.len() as u64 + 1; // +1 for newline
        Ok(())
    }

    /// Write raw bytes as they are
    pub fn write_all(&mut self, data: &[u8]) -> Result<()> {
        self.writer
            .write_all(data)
            .map_err(|e| ToolError::write(&self.path, e))?;
        self.bytes_written += data.len() as u64;
        Ok(())
    }

    /// Flush the buffer to disk
    pub fn flush(&mut self) -> Result<()> {
        self.writer
            .flush()
            .map_err(|e| ToolError::write(&self.path, e))
    }

    /// Flush and close, surfacing any error the drop would swallow
    pub fn finish(mut self) -> Result<(u64, u64)> {
        self.flush()?;
        Ok((self.lines_written, self.bytes_written))
    }
}

impl Drop for OutputWriter {
    fn drop(&mut self) {
        let _ = self.writer.flush();
    }
}

/// Write `lines` to `path`, one per line, each ending in `\n`.
///
/// Returns the number of lines written.
pub fn write_lines(path: &Path, lines: &[Line]) -> Result<u64> {
    let mut writer = OutputWriter::new(path)?;
    for line in lines {
        writer.write_line(line.raw())?;
    }
    let (written, bytes) = writer.finish()?;
    log::debug!("{}: {} lines, {} bytes", path.display(), written, bytes);
    Ok(written)
}

/// Write a pre-encoded buffer to `path`
pub fn write_bytes(path: &Path, data: &[u8]) -> Result<u64> {
    let mut writer = OutputWriter::new(path)?;
    writer.write_all(data)?;
    let (_, bytes) = writer.finish()?;
    Ok(bytes)
}
