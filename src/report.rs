//! Report assembly: identity + scan result + allow-listed environment, timestamped.

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::env::{EnvSource, EnvironmentSnapshot};
use crate::identity::IdentityRecord;
use crate::scan::DirectoryStats;

pub const ANALYSIS_TYPE: &str = "REPL_IDENTITY_PORTABLE";
pub const ANALYZER_VERSION: &str = "1.0_portable";
const UNKNOWN_DOMAIN: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportMetadata {
    pub analysis_date: String,
    pub analysis_type: String,
    pub repl_domain: String,
    pub analyzer_version: String,
}

/// One immutable report snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    #[serde(skip)]
    pub generated_at: OffsetDateTime,
    pub metadata: ReportMetadata,
    #[serde(rename = "repl_info", serialize_with = "identity_or_empty")]
    pub identity: Option<IdentityRecord>,
    #[serde(rename = "structure_analysis")]
    pub structure: DirectoryStats,
    pub environment: EnvironmentSnapshot,
}

fn identity_or_empty<S: Serializer>(
    identity: &Option<IdentityRecord>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match identity {
        Some(record) => record.serialize(serializer),
        None => serializer.serialize_map(Some(0))?.end(),
    }
}

/// Local wall-clock time, or UTC when the local offset cannot be determined.
pub fn now_local() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}

fn format_timestamp(t: OffsetDateTime) -> String {
    t.format(&Rfc3339)
        .unwrap_or_else(|_| format!("unix:{}", t.unix_timestamp()))
}

/// Compose a report stamped with the current time.
pub fn assemble<E: EnvSource + ?Sized>(
    identity: Option<&IdentityRecord>,
    structure: DirectoryStats,
    env: &E,
    allowlist: &[&str],
) -> Report {
    assemble_at(now_local(), identity, structure, env, allowlist)
}

/// Compose a report stamped with `generated_at`.
pub fn assemble_at<E: EnvSource + ?Sized>(
    generated_at: OffsetDateTime,
    identity: Option<&IdentityRecord>,
    structure: DirectoryStats,
    env: &E,
    allowlist: &[&str],
) -> Report {
    let repl_domain = identity
        .map(|r| r.name.clone())
        .unwrap_or_else(|| UNKNOWN_DOMAIN.to_string());
    Report {
        generated_at,
        metadata: ReportMetadata {
            analysis_date: format_timestamp(generated_at),
            analysis_type: ANALYSIS_TYPE.to_string(),
            repl_domain,
            analyzer_version: ANALYZER_VERSION.to_string(),
        },
        identity: identity.cloned(),
        structure,
        environment: EnvironmentSnapshot::capture(env, allowlist),
    }
}
