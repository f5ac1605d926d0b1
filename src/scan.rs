#![allow(clippy::module_name_repetitions)]
//! Best-effort recursive project scan.
//!
//! Two failure boundaries:
//! - entry level: an unreadable size adds [`UNREADABLE_SIZE_BYTES`]; an unreadable
//!   sub-directory is skipped with a debug log; the walk continues.
//! - walk level: a failure on the root itself stops the walk with a warning and the
//!   counts accumulated so far are returned.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Component, Path};
use tracing::instrument;
use walkdir::WalkDir;

/// Bucket for files without an extension.
pub const NO_EXTENSION: &str = "no_extension";
/// Size credited for a file whose metadata cannot be read.
pub const UNREADABLE_SIZE_BYTES: u64 = 1024;
pub const MAIN_FILES_LIMIT: usize = 10;

/// Paths containing any of these are ignored (dependency and bytecode caches).
pub const CACHE_DIR_MARKERS: &[&str] = &["__pycache__", "node_modules"];

pub const MAIN_FILE_NAMES: &[&str] = &[
    "main.py",
    "index.html",
    "app.py",
    "server.js",
    "main.js",
    "README.md",
    "requirements.txt",
    "package.json",
];

pub const MAIN_EXTENSIONS: &[&str] = &[
    ".py", ".js", ".html", ".css", ".java", ".cpp", ".c", ".go", ".rs", ".php", ".rb",
];

/// Aggregate statistics of one scan.
///
/// `total_files` always equals the sum of `extension_counts`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DirectoryStats {
    pub total_files: u64,
    pub total_directories: u64,
    #[serde(rename = "file_types")]
    pub extension_counts: BTreeMap<String, u64>,
    #[serde(rename = "size_estimate")]
    pub estimated_size_bytes: u64,
    /// Deduplicated, sorted, at most [`MAIN_FILES_LIMIT`] names.
    pub main_files: Vec<String>,
}

impl DirectoryStats {
    pub fn estimated_size_kb(&self) -> f64 {
        self.estimated_size_bytes as f64 / 1024.0
    }
}

#[derive(Default)]
struct Tally {
    total_files: u64,
    total_directories: u64,
    extension_counts: BTreeMap<String, u64>,
    estimated_size_bytes: u64,
    main_candidates: BTreeSet<String>,
}

impl Tally {
    fn record_file(&mut self, path: &Path, size: Option<u64>) {
        self.total_files += 1;
        let ext = extension_key(path);
        let bucket = ext.clone().unwrap_or_else(|| NO_EXTENSION.to_string());
        *self.extension_counts.entry(bucket).or_insert(0) += 1;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        if is_main_file(&name, ext.as_deref()) {
            self.main_candidates.insert(name);
        }

        self.estimated_size_bytes = self
            .estimated_size_bytes
            .saturating_add(size.unwrap_or(UNREADABLE_SIZE_BYTES));
    }

    fn record_dir(&mut self) {
        self.total_directories += 1;
    }

    fn finish(self) -> DirectoryStats {
        DirectoryStats {
            total_files: self.total_files,
            total_directories: self.total_directories,
            extension_counts: self.extension_counts,
            estimated_size_bytes: self.estimated_size_bytes,
            main_files: self
                .main_candidates
                .into_iter()
                .take(MAIN_FILES_LIMIT)
                .collect(),
        }
    }
}

enum EntryKind {
    File(Option<u64>),
    Dir,
    Other,
}

/// Lower-cased extension with its leading dot; `None` for names without one.
fn extension_key(path: &Path) -> Option<String> {
    path.extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .filter(|e| !e.is_empty())
        .map(|e| format!(".{e}"))
}

fn is_main_file(name: &str, ext: Option<&str>) -> bool {
    MAIN_FILE_NAMES.contains(&name) || ext.map_or(false, |e| MAIN_EXTENSIONS.contains(&e))
}

/// Hidden (any component starting with '.') or cache paths, relative to the scan root.
fn is_excluded(root: &Path, path: &Path) -> bool {
    let rel = match path.strip_prefix(root) {
        Ok(r) => r,
        Err(_) => return false,
    };
    let hidden = rel.components().any(|c| match c {
        Component::Normal(part) => part.to_string_lossy().starts_with('.'),
        _ => false,
    });
    if hidden {
        return true;
    }
    let rel_str = rel.to_string_lossy();
    CACHE_DIR_MARKERS.iter().any(|m| rel_str.contains(m))
}

// Symlinks are classified by their target; dangling links are neither file nor directory.
fn classify(entry: &walkdir::DirEntry) -> EntryKind {
    let ft = entry.file_type();
    if ft.is_symlink() {
        return match std::fs::metadata(entry.path()) {
            Ok(meta) if meta.is_file() => EntryKind::File(Some(meta.len())),
            Ok(meta) if meta.is_dir() => EntryKind::Dir,
            _ => EntryKind::Other,
        };
    }
    if ft.is_file() {
        EntryKind::File(entry.metadata().ok().map(|m| m.len()))
    } else if ft.is_dir() {
        EntryKind::Dir
    } else {
        EntryKind::Other
    }
}

fn walk(root: &Path, tally: &mut Tally) -> Result<(), walkdir::Error> {
    let walker = WalkDir::new(root)
        .min_depth(1)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| !is_excluded(root, e.path()));

    for item in walker {
        let entry = match item {
            Ok(entry) => entry,
            Err(err) if err.depth() == 0 => return Err(err),
            Err(err) => {
                tracing::debug!(error = %err, "skipping unreadable entry");
                continue;
            }
        };
        match classify(&entry) {
            EntryKind::File(size) => tally.record_file(entry.path(), size),
            EntryKind::Dir => tally.record_dir(),
            EntryKind::Other => {}
        }
    }
    Ok(())
}

/// Scan `root` recursively. Never fails: problems degrade to partial or default counts.
#[instrument(level = "debug", skip_all, fields(root = %root.display()))]
pub fn scan(root: &Path) -> DirectoryStats {
    let mut tally = Tally::default();
    if let Err(err) = walk(root, &mut tally) {
        tracing::warn!(
            root = %root.display(),
            error = %err,
            "project scan failed; reporting partial counts"
        );
    }
    let stats = tally.finish();
    tracing::debug!(
        files = stats.total_files,
        directories = stats.total_directories,
        bytes = stats.estimated_size_bytes,
        "project scan finished"
    );
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_file(root: &Path, rel: &str, len: usize) {
        let p = root.join(rel);
        if let Some(parent) = p.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(p, vec![b'x'; len]).unwrap();
    }

    #[test]
    fn test_empty_directory() {
        let td = tempfile::tempdir().unwrap();
        let stats = scan(td.path());
        assert_eq!(stats, DirectoryStats::default());
        assert!(stats.main_files.is_empty());
    }

    #[test]
    fn test_hidden_and_cache_paths_are_skipped() {
        let td = tempfile::tempdir().unwrap();
        let root = td.path();
        write_file(root, "readme.md", 500);
        write_file(root, ".git/config", 77);
        write_file(root, "cache/node_modules/x.js", 10);
        write_file(root, "src/__pycache__/m.cpython-311.pyc", 10);
        let stats = scan(root);
        assert_eq!(stats.total_files, 1);
        assert_eq!(stats.estimated_size_bytes, 500);
        assert_eq!(stats.extension_counts.get(".md"), Some(&1));
        // cache/ and src/ survive; .git, node_modules, __pycache__ do not.
        assert_eq!(stats.total_directories, 2);
        assert!(stats.main_files.is_empty());
    }

    #[test]
    fn test_extension_histogram_matches_total() {
        let td = tempfile::tempdir().unwrap();
        let root = td.path();
        for i in 0..4 {
            write_file(root, &format!("pkg/mod{i}.py"), 1);
        }
        for i in 0..3 {
            write_file(root, &format!("notes/n{i}.txt"), 1);
        }
        let stats = scan(root);
        let expected: BTreeMap<String, u64> =
            [(".py".to_string(), 4), (".txt".to_string(), 3)].into_iter().collect();
        assert_eq!(stats.extension_counts, expected);
        assert_eq!(stats.total_files, 7);
        assert_eq!(stats.total_files, stats.extension_counts.values().sum::<u64>());
    }

    #[test]
    fn test_extension_case_folding_and_no_extension_bucket() {
        let td = tempfile::tempdir().unwrap();
        let root = td.path();
        write_file(root, "Main.PY", 3);
        write_file(root, "Makefile", 3);
        write_file(root, "LICENSE", 3);
        write_file(root, "archive.tar.GZ", 3);
        let stats = scan(root);
        assert_eq!(stats.extension_counts.get(".py"), Some(&1));
        assert_eq!(stats.extension_counts.get(".gz"), Some(&1));
        assert_eq!(stats.extension_counts.get(NO_EXTENSION), Some(&2));
        assert_eq!(stats.main_files, vec!["Main.PY".to_string()]);
        assert_eq!(stats.estimated_size_bytes, 12);
    }

    #[test]
    fn test_main_files_by_name_and_extension() {
        let td = tempfile::tempdir().unwrap();
        let root = td.path();
        write_file(root, "README.md", 1);
        write_file(root, "package.json", 1);
        write_file(root, "readme.md", 1);
        write_file(root, "styles/site.css", 1);
        write_file(root, "data.json", 1);
        let stats = scan(root);
        assert_eq!(
            stats.main_files,
            vec![
                "README.md".to_string(),
                "package.json".to_string(),
                "site.css".to_string()
            ]
        );
    }

    #[test]
    fn test_main_files_sorted_deduplicated_and_capped() {
        let td = tempfile::tempdir().unwrap();
        let root = td.path();
        for dir in ["a", "b", "c"] {
            write_file(root, &format!("{dir}/main.py"), 1);
        }
        for i in 0..15 {
            write_file(root, &format!("lib/m{i:02}.rs"), 1);
        }
        let stats = scan(root);
        assert_eq!(stats.main_files.len(), MAIN_FILES_LIMIT);
        let mut sorted = stats.main_files.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted, stats.main_files);
        assert_eq!(stats.main_files.first().map(String::as_str), Some("m00.rs"));
        assert!(!stats.main_files.contains(&"main.py".to_string()), "main.py sorts after m09.rs");
        assert_eq!(stats.total_files, 18);
    }

    #[test]
    fn test_repeated_scans_are_identical() {
        let td = tempfile::tempdir().unwrap();
        let root = td.path();
        write_file(root, "app.py", 120);
        write_file(root, "static/index.html", 64);
        write_file(root, "static/img/logo", 9);
        assert_eq!(scan(root), scan(root));
    }

    #[test]
    fn test_missing_root_returns_empty_stats() {
        let td = tempfile::tempdir().unwrap();
        let missing = td.path().join("does-not-exist");
        assert_eq!(scan(&missing), DirectoryStats::default());
    }

    #[test]
    fn test_hidden_rule_is_relative_to_root() {
        let td = tempfile::tempdir().unwrap();
        let root = td.path().join(".workspace").join("proj");
        write_file(&root, "main.js", 5);
        let stats = scan(&root);
        assert_eq!(stats.total_files, 1);
        assert_eq!(stats.main_files, vec!["main.js".to_string()]);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinks_follow_targets_and_dangling_links_are_ignored() {
        let td = tempfile::tempdir().unwrap();
        let root = td.path();
        write_file(root, "real.txt", 40);
        std::os::unix::fs::symlink(root.join("real.txt"), root.join("alias.txt")).unwrap();
        std::os::unix::fs::symlink(root.join("gone.txt"), root.join("dangling.txt")).unwrap();
        let stats = scan(root);
        assert_eq!(stats.total_files, 2);
        assert_eq!(stats.estimated_size_bytes, 80);
        assert_eq!(stats.extension_counts.get(".txt"), Some(&2));
    }

    #[test]
    fn test_unreadable_size_adds_default_increment() {
        let mut tally = Tally::default();
        tally.record_file(Path::new("x/a.py"), None);
        tally.record_file(Path::new("x/b.txt"), Some(10));
        let stats = tally.finish();
        assert_eq!(stats.total_files, 2);
        assert_eq!(stats.estimated_size_bytes, UNREADABLE_SIZE_BYTES + 10);
        assert_eq!(stats.main_files, vec!["a.py".to_string()]);
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_subdirectory_does_not_stop_the_walk() {
        use std::os::unix::fs::PermissionsExt;

        let td = tempfile::tempdir().unwrap();
        let root = td.path();
        write_file(root, "keep.txt", 12);
        write_file(root, "locked/hidden_from_walk.txt", 99);
        let locked = root.join("locked");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();
        if fs::read_dir(&locked).is_ok() {
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
            eprintln!("skipping: permissions are not enforced for this user");
            return;
        }

        let stats = scan(root);
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        assert_eq!(stats.total_files, 1);
        assert_eq!(stats.estimated_size_bytes, 12);
        assert_eq!(stats.total_directories, 1);
        assert_eq!(stats.extension_counts.get(".txt"), Some(&1));
    }

    #[test]
    fn test_is_excluded_rules() {
        let root = Path::new("/w");
        assert!(!is_excluded(root, Path::new("/w")));
        assert!(!is_excluded(root, Path::new("/w/src/lib.rs")));
        assert!(is_excluded(root, Path::new("/w/.env")));
        assert!(is_excluded(root, Path::new("/w/src/.cache/x")));
        assert!(is_excluded(root, Path::new("/w/web/node_modules")));
        assert!(is_excluded(root, Path::new("/w/my_node_modules_copy/a.js")));
    }

    #[test]
    fn test_size_in_kb() {
        let stats = DirectoryStats {
            estimated_size_bytes: 1536,
            ..DirectoryStats::default()
        };
        assert!((stats.estimated_size_kb() - 1.5).abs() < f64::EPSILON);
    }
}
