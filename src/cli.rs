//! Command-line interface definitions for the line tools
//!
//! Provides argument parsing for the three binaries plus the logging setup
//! they share.

use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

use crate::pipeline::Stage;
use crate::strip::{PrefixSet, DEFAULT_PREFIXES};

/// Two-letter short flags of the wordlist manager and their long forms.
///
/// clap only knows single-character shorts, so these are rewritten before
/// parsing.
pub const SHORT_FLAG_ALIASES: &[(&str, &str)] = &[
    ("-rd", "--remove-duplicates"),
    ("-rf", "--remove-foreign"),
    ("-re", "--remove-extensions"),
    ("-rt", "--retain-extensions"),
    ("-su", "--show-unique"),
    ("-sd", "--show-duplicates"),
];

/// Rewrite two-letter short flags to their long forms; stops at `--`
pub fn normalize_short_flags<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut seen_terminator = false;

    args.into_iter()
        .map(Into::into)
        .map(|arg: OsString| {
            if seen_terminator {
                return arg;
            }
            if arg == "--" {
                seen_terminator = true;
                return arg;
            }
            SHORT_FLAG_ALIASES
                .iter()
                .find(|(short, _)| arg == *short)
                .map_or(arg, |(_, long)| OsString::from(*long))
        })
        .collect()
}

/// Logging verbosity flags shared by every tool
#[derive(clap::Args, Debug, Clone, Default)]
pub struct Verbosity {
    /// Quiet mode - errors and warnings only
    #[arg(short, long, default_value_t = false)]
    pub quiet: bool,

    /// Verbose mode - detailed logging
    #[arg(short, long, default_value_t = false, conflicts_with = "quiet")]
    pub verbose: bool,
}

impl Verbosity {
    /// Default log filter for these flags; `RUST_LOG` still takes precedence
    pub fn log_filter(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "warn"
        } else {
            "info"
        }
    }
}

/// Set up `env_logger` for a binary
pub fn init_logging(verbosity: &Verbosity) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(verbosity.log_filter()))
        .format_timestamp(None)
        .format_target(false)
        .init();
}

/// Clean up wordlists: deduplicate, filter by character set or file extension,
/// and report unique or duplicated lines
#[derive(Parser, Debug, Clone)]
#[command(
    name = "wordlist-manager",
    author = "m0h1nd4",
    version,
    about = "Deduplicate and filter wordlists",
    long_about = r#"
Read one or more wordlists into memory and run the selected stages over them.

Stages always run in this order, each filter seeing the previous one's result:
    -rd  --remove-duplicates    unique trimmed lines, blank lines dropped
    -rf  --remove-foreign       lines made only of ASCII characters
    -re  --remove-extensions    drop lines ending in .ext (2-5 word chars)
    -rt  --retain-extensions    keep only lines ending in .ext
    -su  --show-unique          print the unique lines
    -sd  --show-duplicates      print repeated lines with their counts

Filter results are written to the -o file. Without -o a warning is printed
and nothing is written.

EXAMPLES:
    wordlist-manager -i a.txt b.txt -rd -o merged.txt
    wordlist-manager -i dirs.txt -rd -rf -re -o clean.txt
    wordlist-manager -i raw.txt -sd
"#
)]
pub struct ManagerArgs {
    /// Input files
    #[arg(short, long, required = true, num_args = 1.., value_name = "FILE")]
    pub input: Vec<PathBuf>,

    /// Output file
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Remove duplicate and blank lines (-rd)
    #[arg(long, default_value_t = false)]
    pub remove_duplicates: bool,

    /// Remove lines containing non-ASCII characters (-rf)
    #[arg(long, default_value_t = false)]
    pub remove_foreign: bool,

    /// Remove lines ending in a file extension (-re)
    #[arg(long, default_value_t = false)]
    pub remove_extensions: bool,

    /// Retain only lines ending in a file extension (-rt)
    #[arg(long, default_value_t = false)]
    pub retain_extensions: bool,

    /// Show unique lines (-su)
    #[arg(long, default_value_t = false)]
    pub show_unique: bool,

    /// Show duplicate lines with their counts (-sd)
    #[arg(long, default_value_t = false)]
    pub show_duplicates: bool,

    /// Print a processing summary to stderr
    #[arg(long, default_value_t = false)]
    pub stats: bool,

    #[command(flatten)]
    pub verbosity: Verbosity,
}

impl ManagerArgs {
    /// Parse the process arguments, accepting the two-letter short flags
    pub fn parse_normalized() -> Self {
        Self::parse_from(normalize_short_flags(std::env::args_os()))
    }

    /// Selected stages in evaluation order
    pub fn stages(&self) -> Vec<Stage> {
        let selected = [
            self.remove_duplicates,
            self.remove_foreign,
            self.remove_extensions,
            self.retain_extensions,
            self.show_unique,
            self.show_duplicates,
        ];

        Stage::ORDER
            .iter()
            .zip(selected)
            .filter_map(|(&stage, on)| on.then_some(stage))
            .collect()
    }
}

/// Erase a leading API prefix from every line of a file
#[derive(Parser, Debug, Clone)]
#[command(name = "prefix-strip", author = "m0h1nd4", version)]
pub struct PrefixStripArgs {
    /// Input text file
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output text file
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Prefix to erase, tried in the order given (default: /api/, /api, api/)
    #[arg(short, long = "prefix", value_name = "PREFIX")]
    pub prefixes: Vec<String>,

    #[command(flatten)]
    pub verbosity: Verbosity,
}

impl PrefixStripArgs {
    pub fn prefix_set(&self) -> crate::error::Result<PrefixSet> {
        if self.prefixes.is_empty() {
            PrefixSet::new(DEFAULT_PREFIXES.iter().copied())
        } else {
            PrefixSet::new(self.prefixes.iter().cloned())
        }
    }
}

/// Remove every leading '/' from each line of a file
#[derive(Parser, Debug, Clone)]
#[command(name = "slash-strip", author = "m0h1nd4", version)]
pub struct SlashStripArgs {
    /// Input file
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output file
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    #[command(flatten)]
    pub verbosity: Verbosity,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager(args: &[&str]) -> ManagerArgs {
        ManagerArgs::try_parse_from(normalize_short_flags(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_normalize_short_flags() {
        let args = normalize_short_flags(["wordlist-manager", "-i", "a.txt", "-rd", "-sd", "--", "-rf"]);
        assert_eq!(
            args,
            vec!["wordlist-manager", "-i", "a.txt", "--remove-duplicates", "--show-duplicates", "--", "-rf"]
        );
    }

    #[test]
    fn test_parse_manager_args() {
        let args = manager(&["wordlist-manager", "-i", "a.txt", "b.txt", "-rd", "-o", "out.txt"]);

        assert_eq!(args.input, vec![PathBuf::from("a.txt"), PathBuf::from("b.txt")]);
        assert_eq!(args.output, Some(PathBuf::from("out.txt")));
        assert!(args.remove_duplicates);
        assert_eq!(args.stages(), vec![Stage::RemoveDuplicates]);
    }

    #[test]
    fn test_stages_follow_fixed_order() {
        let args = manager(&["wordlist-manager", "-sd", "-rt", "-i", "a.txt", "-rf", "-su"]);
        assert_eq!(
            args.stages(),
            vec![Stage::RemoveForeign, Stage::RetainExtensions, Stage::ShowUnique, Stage::ShowDuplicates]
        );
    }

    #[test]
    fn test_input_is_required() {
        let result = ManagerArgs::try_parse_from(normalize_short_flags(["wordlist-manager", "-rd"]));
        assert!(result.is_err());
    }

    #[test]
    fn test_long_flags_still_work() {
        let args = manager(&["wordlist-manager", "--input", "a.txt", "--remove-extensions", "--stats", "-v"]);
        assert_eq!(args.stages(), vec![Stage::RemoveExtensions]);
        assert!(args.stats);
        assert_eq!(args.verbosity.log_filter(), "debug");
    }

    #[test]
    fn test_prefix_args() {
        let args = PrefixStripArgs::try_parse_from(["prefix-strip", "in.txt", "out.txt"]).unwrap();
        assert_eq!(args.prefix_set().unwrap(), PrefixSet::default());

        let args = PrefixStripArgs::try_parse_from([
            "prefix-strip", "in.txt", "out.txt", "-p", "/v2/", "--prefix", "v2/",
        ])
        .unwrap();
        assert_eq!(args.prefix_set().unwrap().prefixes(), ["/v2/", "v2/"]);
    }

    #[test]
    fn test_slash_args_need_both_paths() {
        assert!(SlashStripArgs::try_parse_from(["slash-strip", "in.txt"]).is_err());
        let args = SlashStripArgs::try_parse_from(["slash-strip", "in.txt", "out.txt", "-q"]).unwrap();
        assert!(args.verbosity.quiet);
        assert_eq!(args.verbosity.log_filter(), "warn");
    }
}
