use crate::error::{InventoryError, Result};
use std::fs;
use std::path::Path;

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// Lists executable regular files directly inside `dir`.
///
/// Symlinks are followed, so a link to an executable counts and a dangling
/// link is skipped. Names come back in directory order unless `sort` is set.
///
/// # Errors
///
/// Returns [`InventoryError::PathUnavailable`] if `dir` cannot be listed.
pub fn scan_executables(dir: &Path, sort: bool) -> Result<Vec<String>> {
    let entries = fs::read_dir(dir).map_err(|source| InventoryError::PathUnavailable {
        dir: dir.to_path_buf(),
        source,
    })?;

    let mut binaries = Vec::new();

    for entry in entries.flatten() {
        let metadata = match fs::metadata(entry.path()) {
            Ok(m) => m,
            Err(_) => continue,
        };

        if !(metadata.is_file() && is_executable(&metadata, &entry.path())) {
            continue;
        }

        match entry.file_name().into_string() {
            Ok(name) => binaries.push(name),
            Err(_) => {
                tracing::warn!(path = %entry.path().display(), "skipping executable with non-UTF-8 name");
            }
        }
    }

    if sort {
        binaries.sort();
    }

    Ok(binaries)
}

/// Owner execute bit.
#[cfg(unix)]
fn is_executable(metadata: &fs::Metadata, _path: &Path) -> bool {
    metadata.permissions().mode() & 0o100 != 0
}

#[cfg(not(unix))]
fn is_executable(_metadata: &fs::Metadata, path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| matches!(e.to_ascii_lowercase().as_str(), "exe" | "bat" | "cmd" | "com"))
        .unwrap_or(false)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_file(dir: &Path, name: &str, mode: u32) {
        let path = dir.join(name);
        fs::write(&path, "#!/bin/sh\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(mode)).unwrap();
    }

    #[test]
    fn test_only_executables_are_listed() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "a", 0o755);
        write_file(tmp.path(), "b", 0o644);
        write_file(tmp.path(), "c", 0o700);

        let binaries = scan_executables(tmp.path(), true).unwrap();
        assert_eq!(binaries, vec!["a", "c"]);
    }

    #[test]
    fn test_unsorted_keeps_directory_order() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "a", 0o755);
        write_file(tmp.path(), "b", 0o644);
        write_file(tmp.path(), "c", 0o755);

        let expected: Vec<String> = fs::read_dir(tmp.path())
            .unwrap()
            .flatten()
            .map(|e| e.file_name().to_string_lossy().to_string())
            .filter(|n| n != "b")
            .collect();

        assert_eq!(scan_executables(tmp.path(), false).unwrap(), expected);
    }

    #[test]
    fn test_owner_bit_required() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "group-only", 0o654);
        write_file(tmp.path(), "owner-only", 0o744);

        assert_eq!(scan_executables(tmp.path(), true).unwrap(), vec!["owner-only"]);
    }

    #[test]
    fn test_directories_are_skipped() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("subdir")).unwrap();
        write_file(tmp.path(), "tool", 0o755);

        assert_eq!(scan_executables(tmp.path(), true).unwrap(), vec!["tool"]);
    }

    #[test]
    fn test_symlinks_follow_target() {
        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "real", 0o755);
        std::os::unix::fs::symlink(tmp.path().join("real"), tmp.path().join("alias")).unwrap();
        std::os::unix::fs::symlink(tmp.path().join("gone"), tmp.path().join("dangling")).unwrap();

        assert_eq!(scan_executables(tmp.path(), true).unwrap(), vec!["alias", "real"]);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_non_utf8_name_is_skipped() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let tmp = TempDir::new().unwrap();
        write_file(tmp.path(), "good", 0o755);
        let bad = tmp.path().join(OsStr::from_bytes(b"bad-\xff"));
        fs::write(&bad, "#!/bin/sh\n").unwrap();
        fs::set_permissions(&bad, fs::Permissions::from_mode(0o755)).unwrap();

        assert_eq!(scan_executables(tmp.path(), true).unwrap(), vec!["good"]);
    }

    #[test]
    fn test_missing_directory_is_path_unavailable() {
        let tmp = TempDir::new().unwrap();
        let err = scan_executables(&tmp.path().join("bin"), false).unwrap_err();
        assert!(matches!(err, InventoryError::PathUnavailable { .. }));
        assert!(!err.is_fatal());
    }
}
