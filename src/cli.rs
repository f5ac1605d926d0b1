use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "replscope",
    version,
    about = "Analyze the current sandbox workspace: identity, file structure and environment, exported as JSON and CSV.",
    after_long_help = "Examples:\n  replscope\n  replscope --root ./app --out-dir reports\n  replscope --json-file report.json --csv-file report.csv --no-summary\n\n",
    after_help = "\n"
)]
pub(crate) struct Cli {
    /// Directory to analyze (default: current directory)
    #[arg(long, value_name = "DIR")]
    pub(crate) root: Option<PathBuf>,

    /// Directory the reports are written to (default: current directory)
    #[arg(long = "out-dir", value_name = "DIR", default_value = ".")]
    pub(crate) out_dir: PathBuf,

    /// Write the JSON report to this exact path instead of the generated name
    #[arg(long = "json-file", value_name = "PATH")]
    pub(crate) json_file: Option<PathBuf>,

    /// Write the CSV summary to this exact path instead of the generated name
    #[arg(long = "csv-file", value_name = "PATH")]
    pub(crate) csv_file: Option<PathBuf>,

    /// Skip the console summary
    #[arg(long = "no-summary")]
    pub(crate) no_summary: bool,

    /// Colorize output: auto|always|never
    #[arg(long = "color", value_enum)]
    pub(crate) color: Option<replscope::ColorMode>,

    /// Log progress at info level (overridden by REPLSCOPE_LOG / RUST_LOG)
    #[arg(long)]
    pub(crate) verbose: bool,

    /// Suppress startup banner output
    #[arg(long, short = 'q')]
    pub(crate) quiet: bool,
}
