#![allow(clippy::module_name_repetitions)]
//! replscope: drop-in workspace analyzer for hosted development sandboxes.
//!
//! The library is organised bottom-up:
//! - `identity`: decode the opaque `REPL_IDENTITY` token and resolve a fully populated
//!   identity record (token, then named variables, then literal defaults).
//! - `scan`: tolerant recursive walk of the project tree producing aggregate stats.
//! - `report`: compose identity, stats and the allow-listed environment into a snapshot.
//! - `export` / `summary`: JSON and CSV report files, console summary.
//! - `analyzer`: the façade the binary drives.
//!
//! Public items are re-exported at the crate root so callers use `replscope::scan(..)`,
//! `replscope::ProjectAnalyzer`, etc.

pub mod analyzer;
mod color;
pub mod env;
mod errors;
pub mod export;
pub mod identity;
pub mod report;
pub mod scan;
mod summary;
mod telemetry;
mod util;

pub use analyzer::ProjectAnalyzer;
pub use color::*;
pub use env::{EnvSource, EnvironmentSnapshot, ProcessEnv, ENV_ALLOWLIST};
pub use errors::{describe_export_error, EXPORT_FAILURE_EXIT_CODE};
pub use export::{
    file_stamp, render_csv, render_json, report_file_name, sanitize_name, write_csv, write_json,
    CSV_PREFIX, JSON_PREFIX,
};
pub use identity::{
    decode, resolve, resolve_from_env, IdentityRecord, IdentitySource, TokenClaims,
};
pub use report::{assemble, assemble_at, now_local, Report, ReportMetadata};
pub use scan::{scan, DirectoryStats};
pub use summary::{print_summary, render_summary};
pub use telemetry::init_tracing;
pub use util::fs::ensure_parent_dir;
