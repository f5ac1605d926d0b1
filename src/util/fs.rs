use std::path::Path;

/// Create the parent directory of `p` (and its ancestors) when it does not exist yet.
/// Bare file names and paths directly under the root need nothing.
pub fn ensure_parent_dir(p: &Path) -> std::io::Result<()> {
    match p.parent() {
        Some(parent) if !parent.as_os_str().is_empty() && !parent.exists() => {
            std::fs::create_dir_all(parent)
        }
        _ => Ok(()),
    }
}
