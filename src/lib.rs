//! # Line Tools
//!
//! Small line-oriented text utilities.
//!
//! ## Tools
//!
//! - **prefix-strip**: erase a leading `/api/`-style prefix from every line
//! - **slash-strip**: remove all leading `/` characters from every line
//! - **wordlist-manager**: merge wordlists, then deduplicate, drop non-ASCII
//!   lines, drop or keep `name.ext` lines, and report unique or repeated lines
//!
//! ## Usage
//!
//! ```bash
//! prefix-strip endpoints.txt cleaned.txt
//! slash-strip paths.txt relative.txt
//! wordlist-manager -i a.txt b.txt -rd -rf -o merged.txt
//! wordlist-manager -i raw.txt -sd
//! ```
//!
//! ## Example
//!
//! ```rust
//! use line_tools::line::lines_from;
//! use line_tools::pipeline::{MemorySink, Pipeline, Stage};
//!
//! let pipeline = Pipeline::new(&[Stage::RemoveDuplicates, Stage::ShowUnique]).unwrap();
//! let mut sink = MemorySink::default();
//! let run = pipeline.run(lines_from(["b", "a", "b "]), None, &mut sink).unwrap();
//!
//! assert_eq!(sink.reports, vec!["a", "b"]);
//! assert_eq!(run.lines.len(), 2);
//! ```

pub mod cli;
pub mod dedup;
pub mod encoding;
pub mod error;
pub mod filter;
pub mod input;
pub mod line;
pub mod output;
pub mod pipeline;
pub mod processor;
pub mod progress;
pub mod strip;

pub use cli::ManagerArgs;
pub use error::{Result, ToolError};
pub use processor::{Processor, ProcessorConfig};
