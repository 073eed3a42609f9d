use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "dnsfilter",
    about = "Filter, summarize and export dangling DNS scanner results",
    version,
    long_about = None
)]
pub struct Args {
    /// Enable verbose logging (must precede the subcommand)
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Count records by the trailing labels of a field
    Labels {
        /// Input JSON file (defaults to standard input)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file (defaults to standard output)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Number of trailing labels to group by
        #[arg(short, long, default_value_t = 1, allow_negative_numbers = true)]
        labels: i64,

        /// Record field holding the domain to summarize
        #[arg(short, long, default_value = "target")]
        field: String,

        /// Only count records of this check type
        #[arg(short, long, default_value = "cname")]
        check: String,
    },

    /// Keep records whose fields match regular expressions
    Grep {
        /// Input JSON file (defaults to standard input)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file (defaults to standard output)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pattern for the name field
        #[arg(short, long)]
        name: Option<String>,

        /// Pattern for the target field
        #[arg(short, long)]
        target: Option<String>,

        /// Pattern for the check field
        #[arg(short, long)]
        check: Option<String>,

        /// Pattern for the description field
        #[arg(short, long)]
        description: Option<String>,

        /// Keep the records that do not match instead
        #[arg(short = 'v', long)]
        invert_match: bool,
    },

    /// Export selected fields as CSV
    Csv {
        /// Field to export, in column order (repeatable)
        #[arg(short, long = "field")]
        fields: Vec<String>,

        /// Output file (defaults to standard output)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Input JSON files (defaults to standard input)
        inputs: Vec<PathBuf>,
    },

    /// Merge inputs, dropping duplicate name/check/target records
    Uniq {
        /// Input JSON file (repeatable, defaults to standard input)
        #[arg(short, long = "input")]
        inputs: Vec<PathBuf>,

        /// Output file (defaults to standard output)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}
