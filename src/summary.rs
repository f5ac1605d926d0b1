//! Console summary of identity and structure (informational, not machine-parseable).

use std::fmt::Write as _;

use crate::color::{paint, BLUE_BOLD, CYAN_BOLD, RED_BOLD};
use crate::identity::IdentityRecord;
use crate::scan::DirectoryStats;

const RULE: &str = "============================================================";
const SUMMARY_MAIN_FILES: usize = 5;

fn yes_no(b: bool) -> &'static str {
    if b {
        "yes"
    } else {
        "no"
    }
}

fn files_word(n: u64) -> &'static str {
    if n == 1 {
        "file"
    } else {
        "files"
    }
}

/// Render the summary block. `identity` of `None` yields a single error line.
pub fn render_summary(
    identity: Option<&IdentityRecord>,
    stats: &DirectoryStats,
    use_color: bool,
) -> String {
    let Some(rec) = identity else {
        return format!(
            "{}\n",
            paint(use_color, RED_BOLD, "error: workspace identity could not be loaded")
        );
    };
    let head = |s: &str| paint(use_color, CYAN_BOLD, s);
    let val = |s: &str| paint(use_color, BLUE_BOLD, s);

    let mut out = String::new();
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "{}", head("WORKSPACE ANALYSIS"));
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "Name:      {}", val(&rec.name));
    let _ = writeln!(out, "URL:       {}", val(&rec.canonical_url));
    let _ = writeln!(out, "Language:  {}", val(&rec.language));
    let _ = writeln!(out, "Owner:     {}", val(&rec.owner_user_name));
    let _ = writeln!(out, "Public:    {}", yes_no(rec.is_public));
    let _ = writeln!(out, "Always On: {}", yes_no(rec.is_always_on));
    let _ = writeln!(out, "Boosted:   {}", yes_no(rec.is_boosted));
    out.push('\n');

    let _ = writeln!(out, "{}", head("STRUCTURE:"));
    let _ = writeln!(
        out,
        "  - {} {}",
        stats.total_files,
        files_word(stats.total_files)
    );
    let dirs_word = if stats.total_directories == 1 {
        "directory"
    } else {
        "directories"
    };
    let _ = writeln!(out, "  - {} {}", stats.total_directories, dirs_word);
    let _ = writeln!(
        out,
        "  - Estimated size: {:.1} KB",
        stats.estimated_size_kb()
    );
    out.push('\n');

    if !stats.extension_counts.is_empty() {
        let _ = writeln!(out, "{}", head("FILE TYPES:"));
        for (ext, count) in &stats.extension_counts {
            let _ = writeln!(out, "  - {}: {} {}", ext, count, files_word(*count));
        }
    }

    if !stats.main_files.is_empty() {
        out.push('\n');
        let _ = writeln!(out, "{}", head("MAIN FILES:"));
        for name in stats.main_files.iter().take(SUMMARY_MAIN_FILES) {
            let _ = writeln!(out, "  - {name}");
        }
    }

    let _ = writeln!(out, "{RULE}");
    out
}

pub fn print_summary(identity: Option<&IdentityRecord>, stats: &DirectoryStats, use_color: bool) {
    print!("{}", render_summary(identity, stats, use_color));
}
