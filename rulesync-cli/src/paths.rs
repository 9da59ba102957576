use std::path::{Path, PathBuf};

/// Expand a leading `~` or `~/` against the user's home directory.
/// Paths without a tilde (and `~user` forms) pass through unchanged.
pub fn expand_tilde(path: &str) -> PathBuf {
    if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    } else if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

/// Resolve a config path for one run: tilde paths expand against the home
/// directory, absolute paths pass through, everything else joins onto the
/// base directory.
pub fn resolve(base_dir: &Path, path: &str) -> PathBuf {
    let expanded = expand_tilde(path);
    if expanded.is_absolute() {
        expanded
    } else {
        base_dir.join(expanded)
    }
}
