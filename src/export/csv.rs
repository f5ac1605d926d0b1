//! One-row CSV summary: identity columns, aggregate structure columns, timestamp.

use anyhow::{Context, Result};
use std::path::Path;

use crate::identity::IdentityRecord;
use crate::report::Report;

pub const CSV_COLUMNS: &[&str] = &[
    "repl_id",
    "repl_name",
    "repl_slug",
    "language",
    "is_public",
    "user_name",
    "url",
    "total_files",
    "total_directories",
    "size_estimate_bytes",
    "size_estimate_kb",
    "main_files",
    "file_types",
    "analysis_date",
];

const CSV_LINE_END: &str = "\r\n";

/// Quote a field when it contains a delimiter, quote or line break.
fn csv_field(raw: &str) -> String {
    if raw.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", raw.replace('"', "\"\""))
    } else {
        raw.to_string()
    }
}

fn identity_text(
    identity: Option<&IdentityRecord>,
    field: impl Fn(&IdentityRecord) -> &str,
) -> String {
    identity.map(field).unwrap_or_default().to_string()
}

fn csv_bool(b: bool) -> &'static str {
    if b {
        "True"
    } else {
        "False"
    }
}

fn row_values(report: &Report) -> Vec<String> {
    let identity = report.identity.as_ref();
    let s = &report.structure;
    let file_types = s
        .extension_counts
        .iter()
        .map(|(ext, n)| format!("{ext}:{n}"))
        .collect::<Vec<_>>()
        .join("; ");
    vec![
        identity_text(identity, |r| r.id.as_str()),
        identity_text(identity, |r| r.name.as_str()),
        identity_text(identity, |r| r.slug.as_str()),
        identity_text(identity, |r| r.language.as_str()),
        csv_bool(identity.map(|r| r.is_public).unwrap_or(false)).to_string(),
        identity_text(identity, |r| r.owner_user_name.as_str()),
        identity_text(identity, |r| r.canonical_url.as_str()),
        s.total_files.to_string(),
        s.total_directories.to_string(),
        s.estimated_size_bytes.to_string(),
        format!("{:.2}", s.estimated_size_kb()),
        s.main_files.join("; "),
        file_types,
        report.metadata.analysis_date.clone(),
    ]
}

/// Header line plus one data line, each terminated by CRLF.
pub fn render_csv(report: &Report) -> String {
    let header = CSV_COLUMNS.join(",");
    let row = row_values(report)
        .iter()
        .map(|v| csv_field(v))
        .collect::<Vec<_>>()
        .join(",");
    format!("{header}{CSV_LINE_END}{row}{CSV_LINE_END}")
}

pub fn write_csv(report: &Report, path: &Path) -> Result<()> {
    crate::util::fs::ensure_parent_dir(path)
        .with_context(|| format!("failed to create directory for {}", path.display()))?;
    std::fs::write(path, render_csv(report))
        .with_context(|| format!("failed to write CSV report {}", path.display()))?;
    tracing::info!(path = %path.display(), "wrote CSV report");
    Ok(())
}
