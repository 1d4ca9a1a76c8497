//! Leading-slash stripper

use anyhow::Context;
use clap::Parser;
use std::process;

use line_tools::cli::{init_logging, SlashStripArgs};
use line_tools::progress::{print_error_chain, print_info, print_success};
use line_tools::strip::{strip_file, StripConfig, StripMode};

fn main() {
    let args = SlashStripArgs::parse();
    init_logging(&args.verbosity);

    if let Err(e) = run(&args) {
        print_error_chain(&e);
        process::exit(1);
    }
}

fn run(args: &SlashStripArgs) -> anyhow::Result<()> {
    let config = StripConfig {
        input: args.input.clone(),
        output: args.output.clone(),
        mode: StripMode::LeadingSlashes,
    };

    let stats = strip_file(&config)
        .with_context(|| format!("Could not strip slashes from {}", args.input.display()))?;

    if !args.verbosity.quiet {
        print_info(&format!("{} lines, {} with leading slashes removed", stats.lines, stats.changed));
        print_success(&format!(
            "Processed '{}' and saved to '{}'.",
            args.input.display(),
            args.output.display()
        ));
    }
    Ok(())
}
