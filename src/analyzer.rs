//! `ProjectAnalyzer`: resolves identity once, rescans on every report, exports files.

use anyhow::Result;
use once_cell::unsync::OnceCell;
use std::path::{Path, PathBuf};
use tracing::instrument;

use crate::env::{EnvSource, ProcessEnv, ENV_ALLOWLIST};
use crate::export::{report_file_name, write_csv, write_json, CSV_PREFIX, JSON_PREFIX};
use crate::identity::{resolve_from_env, IdentityRecord, IdentitySource};
use crate::report::{assemble, Report};
use crate::scan::{scan, DirectoryStats};

const UNRESOLVED_FILE_NAME: &str = "unknown";

pub struct ProjectAnalyzer<E: EnvSource = ProcessEnv> {
    root: PathBuf,
    env: E,
    identity: OnceCell<(IdentityRecord, IdentitySource)>,
}

impl ProjectAnalyzer<ProcessEnv> {
    /// Analyzer over `root` reading the process environment.
    pub fn for_process(root: impl Into<PathBuf>) -> Self {
        Self::new(root, ProcessEnv)
    }
}

impl<E: EnvSource> ProjectAnalyzer<E> {
    pub fn new(root: impl Into<PathBuf>, env: E) -> Self {
        Self {
            root: root.into(),
            env,
            identity: OnceCell::new(),
        }
    }

    /// Resolve the identity on first call; later calls return the same source.
    pub fn load_identity(&self) -> IdentitySource {
        self.identity.get_or_init(|| resolve_from_env(&self.env)).1
    }

    /// `None` until [`load_identity`](Self::load_identity) ran.
    pub fn identity(&self) -> Option<&IdentityRecord> {
        self.identity.get().map(|(record, _)| record)
    }

    /// Fresh scan of the project root.
    pub fn analyze_structure(&self) -> DirectoryStats {
        scan(&self.root)
    }

    /// New report with a fresh scan and the current time.
    pub fn generate_report(&self) -> Report {
        assemble(
            self.identity(),
            self.analyze_structure(),
            &self.env,
            ENV_ALLOWLIST,
        )
    }

    fn file_label(&self) -> &str {
        self.identity()
            .map(|r| r.name.as_str())
            .unwrap_or(UNRESOLVED_FILE_NAME)
    }

    fn target_path(
        &self,
        out_dir: &Path,
        explicit: Option<&Path>,
        prefix: &str,
        ext: &str,
        report: &Report,
    ) -> PathBuf {
        match explicit {
            Some(p) => p.to_path_buf(),
            None => out_dir.join(report_file_name(
                prefix,
                self.file_label(),
                report.generated_at,
                ext,
            )),
        }
    }

    /// Generate a report and write it as JSON. Returns the written path.
    #[instrument(level = "debug", skip(self))]
    pub fn export_json(&self, out_dir: &Path, file_name: Option<&Path>) -> Result<PathBuf> {
        let report = self.generate_report();
        let path = self.target_path(out_dir, file_name, JSON_PREFIX, "json", &report);
        write_json(&report, &path)?;
        Ok(path)
    }

    /// Generate a report and write its one-row CSV summary. Returns the written path.
    #[instrument(level = "debug", skip(self))]
    pub fn export_csv(&self, out_dir: &Path, file_name: Option<&Path>) -> Result<PathBuf> {
        let report = self.generate_report();
        let path = self.target_path(out_dir, file_name, CSV_PREFIX, "csv", &report);
        write_csv(&report, &path)?;
        Ok(path)
    }
}
