//! Prefix stripper
//!
//! Erases the first matching prefix (`/api/`, `/api`, `api/` by default) from
//! every line of a file.

use anyhow::Context;
use clap::Parser;
use std::process;

use line_tools::cli::{init_logging, PrefixStripArgs};
use line_tools::progress::{print_error_chain, print_info, print_success};
use line_tools::strip::strip_prefixes;

fn main() {
    let args = PrefixStripArgs::parse();
    init_logging(&args.verbosity);

    if let Err(e) = run(&args) {
        print_error_chain(&e);
        process::exit(1);
    }
}

fn run(args: &PrefixStripArgs) -> anyhow::Result<()> {
    let stats = strip_prefixes(&args.input, &args.output, args.prefix_set()?)
        .with_context(|| format!("Could not strip prefixes from {}", args.input.display()))?;

    if !args.verbosity.quiet {
        print_info(&format!("{} lines, {} with a prefix removed", stats.lines, stats.changed));
        print_success(&format!(
            "Processed text has been saved to {}.",
            args.output.display()
        ));
    }
    Ok(())
}
