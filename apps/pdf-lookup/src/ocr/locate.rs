//! Tesseract executable discovery
//!
//! Search order:
//! 1. An explicit path (from `TESSERACT_CMD`)
//! 2. Well-known install locations
//! 3. Every directory on `PATH`

use std::ffi::OsString;
use std::path::{Path, PathBuf};

const DEFAULT_LOCATIONS: &[&str] = &[
    "/usr/bin/tesseract",
    "/usr/local/bin/tesseract",
    "/opt/homebrew/bin/tesseract",
    "/opt/local/bin/tesseract",
    r"C:\Program Files\Tesseract-OCR\tesseract.exe",
    r"C:\Program Files (x86)\Tesseract-OCR\tesseract.exe",
];

const EXECUTABLE_NAMES: &[&str] = &["tesseract", "tesseract.exe"];

/// Find the tesseract executable, or `None` if it is not installed
pub fn locate_tesseract(explicit: Option<&Path>) -> Option<PathBuf> {
    let defaults: Vec<PathBuf> = DEFAULT_LOCATIONS.iter().map(PathBuf::from).collect();
    locate_in(explicit, &defaults, std::env::var_os("PATH"))
}

fn locate_in(explicit: Option<&Path>, defaults: &[PathBuf], path_var: Option<OsString>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        if path.is_file() {
            return Some(path.to_path_buf());
        }
        tracing::warn!(path = %path.display(), "TESSERACT_CMD set but file not found");
    }

    if let Some(found) = defaults.iter().find(|p| p.is_file()) {
        return Some(found.clone());
    }

    let path_var = path_var?;
    std::env::split_paths(&path_var)
        .flat_map(|dir| EXECUTABLE_NAMES.iter().map(move |name| dir.join(name)))
        .find(|candidate| candidate.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, b"").unwrap();
        path
    }

    #[test]
    fn test_explicit_path_wins() {
        let dir = tempfile::tempdir().unwrap();
        let explicit = touch(dir.path(), "my-tesseract");
        let default = touch(dir.path(), "tesseract");

        let found = locate_in(Some(&explicit), &[default], None);
        assert_eq!(found, Some(explicit));
    }

    #[test]
    fn test_missing_explicit_falls_through_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let default = touch(dir.path(), "tesseract");

        let found = locate_in(Some(&dir.path().join("gone")), &[default.clone()], None);
        assert_eq!(found, Some(default));
    }

    #[test]
    fn test_path_lookup() {
        let empty = tempfile::tempdir().unwrap();
        let bin = tempfile::tempdir().unwrap();
        let exe = touch(bin.path(), "tesseract");

        let path_var = std::env::join_paths([empty.path(), bin.path()]).unwrap();
        let found = locate_in(None, &[empty.path().join("nope")], Some(path_var));
        assert_eq!(found, Some(exe));
    }

    #[test]
    fn test_not_found() {
        let empty = tempfile::tempdir().unwrap();
        let path_var = std::env::join_paths([empty.path()]).unwrap();
        assert_eq!(locate_in(None, &[], Some(path_var)), None);
        assert_eq!(locate_in(None, &[], None), None);
    }
}
