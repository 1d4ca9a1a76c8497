//! Wordlist manager
//!
//! Merges wordlists and runs the selected dedup/filter/report stages.

use std::process;

use line_tools::cli::{init_logging, ManagerArgs};
use line_tools::processor::{Processor, ProcessorConfig};
use line_tools::progress::print_error_chain;

fn main() {
    let args = ManagerArgs::parse_normalized();
    init_logging(&args.verbosity);

    if let Err(e) = run(&args) {
        print_error_chain(&e);
        process::exit(1);
    }
}

fn run(args: &ManagerArgs) -> anyhow::Result<()> {
    let config = ProcessorConfig::from_args(args);
    log::debug!("{:?}", config);

    let processor = Processor::new(config)?;
    processor.process()?;

    Ok(())
}
