//! Console output module
//!
//! Styled status messages, the ingestion progress bar and the run summary.
//! Report lines (unique lines, duplicate counts) are printed plain by the
//! pipeline so they can be piped; everything here is decoration.

use bytesize::ByteSize;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::{Duration, Instant};

/// Print an info message
pub fn print_info(text: &str) {
    println!("  {} {}", "ℹ".cyan(), text);
}

/// Print a success message
pub fn print_success(text: &str) {
    println!("  {} {}", "✔".green(), text.green());
}

/// Print a warning message
pub fn print_warning(text: &str) {
    println!("  {} {}", "⚠".yellow(), text.yellow());
}

/// Print an error message
pub fn print_error(text: &str) {
    eprintln!("  {} {}", "✖".red(), text.red());
}

/// Print an error and every error in its source chain
pub fn print_error_chain(err: &anyhow::Error) {
    print_error(&err.to_string());
    for cause in err.chain().skip(1) {
        print_error(&format!("  Caused by: {}", cause));
    }
}

/// Create a styled progress bar counting input files
pub fn create_progress_bar(total: u64, msg: &str) -> ProgressBar {
    let pb = ProgressBar::new(total);

    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.green/dim}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▓░");
    pb.set_style(style);
    pb.set_message(msg.to_string());

    pb
}

/// Counters for one wordlist manager run
#[derive(Debug, Clone)]
pub struct RunStats {
    pub files_read: u64,
    pub files_skipped: u64,
    pub lines_read: u64,
    pub bytes_read: u64,
    pub lines_written: u64,
    pub stages_run: u64,
    start_time: Instant,
}

impl RunStats {
    pub fn new() -> Self {
        Self {
            files_read: 0,
            files_skipped: 0,
            lines_read: 0,
            bytes_read: 0,
            lines_written: 0,
            stages_run: 0,
            start_time: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Print final statistics to stderr
    pub fn print_summary(&self) {
        let rule = "═".repeat(60);

        eprintln!();
        eprintln!("{}", rule.green());
        eprintln!("{}", "                    PROCESSING COMPLETE".green().bold());
        eprintln!("{}", rule.green());
        eprintln!();
        eprintln!(
            "  {} {}/{}",
            "Files read:     ".green(),
            self.files_read,
            self.files_read + self.files_skipped
        );
        if self.files_skipped > 0 {
            eprintln!("  {} {}", "Files skipped:  ".yellow(), self.files_skipped);
        }
        eprintln!("  {} {}", "Data read:      ".green(), ByteSize(self.bytes_read));
        eprintln!("  {} {}", "Lines read:     ".green(), format_number(self.lines_read));
        eprintln!("  {} {}", "Stages run:     ".green(), self.stages_run);
        eprintln!(
            "  {} {}",
            "Lines written:  ".green().bold(),
            format_number(self.lines_written).green().bold()
        );
        eprintln!("  {} {}", "Duration:       ".green(), format_duration(self.elapsed()));
        eprintln!("{}", rule.green());
    }
}

impl Default for RunStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Format a number with thousand separators
fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    let chars: Vec<char> = s.chars().collect();

    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(*c);
    }

    result
}

/// Format duration as human-readable string
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();

    if secs < 60 {
        format!("{:.1}s", duration.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
    }
}
