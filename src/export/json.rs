use anyhow::{Context, Result};
use std::path::Path;

use crate::report::Report;

/// Pretty-printed report with two-space indentation and a trailing newline.
pub fn render_json(report: &Report) -> Result<String> {
    let mut out =
        serde_json::to_string_pretty(report).context("failed to serialize report to JSON")?;
    out.push('\n');
    Ok(out)
}

pub fn write_json(report: &Report, path: &Path) -> Result<()> {
    let body = render_json(report)?;
    crate::util::fs::ensure_parent_dir(path)
        .with_context(|| format!("failed to create directory for {}", path.display()))?;
    std::fs::write(path, body)
        .with_context(|| format!("failed to write JSON report {}", path.display()))?;
    tracing::info!(path = %path.display(), "wrote JSON report");
    Ok(())
}
