mod banner;
mod cli;

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

use replscope::{IdentitySource, ProjectAnalyzer};

use crate::banner::print_startup_banner;
use crate::cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Some(mode) = cli.color {
        replscope::set_color_mode(mode);
    }
    replscope::init_tracing(cli.verbose);

    let root = cli
        .root
        .clone()
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."));

    if !cli.quiet {
        print_startup_banner(&root);
    }

    let use_err = replscope::color_enabled_stderr();
    let analyzer = ProjectAnalyzer::for_process(root);
    match analyzer.load_identity() {
        IdentitySource::Token => {
            replscope::log_info_stderr(use_err, "replscope: identity decoded from REPL_IDENTITY")
        }
        IdentitySource::Environment => {
            replscope::warn_print("REPL_IDENTITY unavailable; falling back to environment variables")
        }
    }

    if !cli.no_summary {
        let stats = analyzer.analyze_structure();
        replscope::print_summary(
            analyzer.identity(),
            &stats,
            replscope::color_enabled_stdout(),
        );
    }

    println!();
    replscope::log_info_stderr(use_err, "replscope: exporting reports");

    let mut written: Vec<PathBuf> = Vec::new();
    let mut failed = false;
    let exports = [
        analyzer.export_json(&cli.out_dir, cli.json_file.as_deref()),
        analyzer.export_csv(&cli.out_dir, cli.csv_file.as_deref()),
    ];
    for result in exports {
        match result {
            Ok(path) => written.push(path),
            Err(e) => {
                failed = true;
                replscope::log_error_stderr(
                    use_err,
                    &format!("replscope: {}", replscope::describe_export_error(&e)),
                );
            }
        }
    }

    if !written.is_empty() {
        println!("Generated files:");
        for path in &written {
            println!("  - {}", path.display());
        }
    }

    if failed {
        ExitCode::from(replscope::EXPORT_FAILURE_EXIT_CODE)
    } else {
        ExitCode::SUCCESS
    }
}
