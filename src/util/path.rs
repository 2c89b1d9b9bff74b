use std::path::{Path, PathBuf};

/// Expands `~`, `$VAR` and `${VAR}` in a path argument.
///
/// Unknown variables leave the path as typed, with only `~` expanded.
pub fn expand_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    match shellexpand::full(&raw) {
        Ok(expanded) => PathBuf::from(expanded.as_ref()),
        Err(_) => PathBuf::from(shellexpand::tilde(&raw).as_ref()),
    }
}
