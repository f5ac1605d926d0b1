#![allow(clippy::module_name_repetitions)]
//! Report files: JSON (full report) and CSV (one flattened row), plus filename rules.

mod csv;
mod json;

use time::macros::format_description;
use time::OffsetDateTime;

pub use self::csv::{render_csv, write_csv, CSV_COLUMNS};
pub use self::json::{render_json, write_json};

pub const JSON_PREFIX: &str = "repl_analysis";
pub const CSV_PREFIX: &str = "repl_summary";

/// Keep ASCII alphanumerics, space, '-' and '_'; trim trailing whitespace.
pub fn sanitize_name(name: &str) -> String {
    let kept: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, ' ' | '-' | '_'))
        .collect();
    kept.trim_end().to_string()
}

/// `YYYYMMDD_HHMMSS` in the timestamp's own offset.
pub fn file_stamp(t: OffsetDateTime) -> String {
    let fmt = format_description!("[year][month][day]_[hour][minute][second]");
    t.format(&fmt)
        .unwrap_or_else(|_| format!("unix{}", t.unix_timestamp()))
}

/// `<prefix>_<sanitized name>_<stamp>.<ext>`
pub fn report_file_name(prefix: &str, name: &str, t: OffsetDateTime, ext: &str) -> String {
    format!("{}_{}_{}.{}", prefix, sanitize_name(name), file_stamp(t), ext)
}
