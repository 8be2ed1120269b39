//! Atomic file replacement for configuration files.
//!
//! A rewrite of a user's configuration must never leave a truncated or
//! half-written file behind. Every write goes through the same steps:
//!
//! 1. Write the new content to `.{filename}.tmp` next to the target
//! 2. Copy the target's permissions onto it and `fsync` it
//! 3. `rename` it over the target and sync the parent directory
//!
//! `rename` is atomic when source and destination share a filesystem, which
//! holds because the temporary file lives in the target's directory. On
//! Windows `std::fs::rename` replaces an existing destination as well.
//!
//! If any step fails the temporary file is removed and the target keeps its
//! previous content.

use crate::error::{ConfsyncError, Result};
use std::ffi::OsString;
use std::fs::{self, File, Permissions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Atomically replace `path` with `content`, creating parent directories if needed.
///
/// # Example
///
/// ```no_run
/// use confsync::fs::atomic_write;
/// use std::path::Path;
///
/// atomic_write(Path::new("settings.yml"), "use debug: false\n")?;
/// # Ok::<(), confsync::error::ConfsyncError>(())
/// ```
pub fn atomic_write<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent)
            .map_err(|e| ConfsyncError::io("create directory", parent, e))?;
    }

    let temp_path = temp_path_for(path)?;
    // Keep the target's mode, e.g. 0600 on a file holding a password.
    let permissions = fs::metadata(path).ok().map(|m| m.permissions());
    write_and_sync(&temp_path, content.as_bytes(), permissions)?;
    replace(&temp_path, path)
}

/// Temporary sibling path used while writing `target`.
fn temp_path_for(target: &Path) -> Result<PathBuf> {
    let file_name = target.file_name().ok_or_else(|| {
        ConfsyncError::UserError(format!("invalid file path '{}'", target.display()))
    })?;

    let mut temp_name = OsString::from(".");
    temp_name.push(file_name);
    temp_name.push(".tmp");
    Ok(match target.parent() {
        Some(parent) => parent.join(temp_name),
        None => PathBuf::from(temp_name),
    })
}

fn write_and_sync(path: &Path, content: &[u8], permissions: Option<Permissions>) -> Result<()> {
    let mut file =
        File::create(path).map_err(|e| ConfsyncError::io("create temporary file", path, e))?;

    let written = file
        .write_all(content)
        .and_then(|()| match permissions {
            Some(permissions) => file.set_permissions(permissions),
            None => Ok(()),
        })
        .and_then(|()| file.sync_all());
    if let Err(e) = written {
        let _ = fs::remove_file(path);
        return Err(ConfsyncError::io("write temporary file", path, e));
    }

    Ok(())
}

fn replace(source: &Path, target: &Path) -> Result<()> {
    if let Err(e) = fs::rename(source, target) {
        let _ = fs::remove_file(source);
        return Err(ConfsyncError::io("replace", target, e));
    }

    // Persist the directory entry as well; failure here does not undo the rename.
    #[cfg(unix)]
    if let Some(parent) = target.parent()
        && let Ok(dir) = File::open(parent)
    {
        let _ = dir.sync_all();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_atomic_write_new_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("settings.yml");

        atomic_write(&file_path, "use debug: false\n").unwrap();

        let content = fs::read_to_string(&file_path).unwrap();
        assert_eq!(content, "use debug: false\n");
    }

    #[test]
    fn test_atomic_write_replace_existing() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("settings.yml");
        fs::write(&file_path, "interval check: 5\n").unwrap();

        atomic_write(&file_path, "interval check: 10\n").unwrap();

        let content = fs::read_to_string(&file_path).unwrap();
        assert_eq!(content, "interval check: 10\n");
    }

    #[test]
    fn test_atomic_write_creates_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("plugins").join("rank").join("settings.yml");

        atomic_write(&file_path, "a: 1\n").unwrap();

        assert_eq!(fs::read_to_string(&file_path).unwrap(), "a: 1\n");
    }

    #[test]
    fn test_atomic_write_leaves_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("settings.yml");

        atomic_write(&file_path, "a: 1\n").unwrap();

        assert!(!temp_dir.path().join(".settings.yml.tmp").exists());
    }

    #[test]
    fn test_failed_replace_keeps_target_and_cleans_temp() {
        let temp_dir = TempDir::new().unwrap();
        // A non-empty directory at the target path makes the rename fail.
        let target = temp_dir.path().join("settings.yml");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("keep"), "x").unwrap();

        let err = atomic_write(&target, "a: 1\n").unwrap_err();

        assert!(err.is_io());
        assert!(target.join("keep").exists());
        assert!(!temp_dir.path().join(".settings.yml.tmp").exists());
    }

    #[test]
    fn test_temp_path_is_hidden_sibling() {
        let temp = temp_path_for(Path::new("/srv/plugins/settings.yml")).unwrap();

        assert_eq!(temp.parent().unwrap(), Path::new("/srv/plugins"));
        assert_eq!(temp.file_name().unwrap(), ".settings.yml.tmp");
    }

    #[test]
    fn test_temp_path_rejects_bare_root() {
        assert!(temp_path_for(Path::new("/")).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_atomic_write_keeps_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("settings.yml");
        fs::write(&file_path, "sql:\n  password: hunter2\n").unwrap();
        fs::set_permissions(&file_path, Permissions::from_mode(0o600)).unwrap();

        atomic_write(&file_path, "sql:\n  password: hunter2\n  usessl: false\n").unwrap();

        let mode = fs::metadata(&file_path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[cfg(unix)]
    #[test]
    fn test_atomic_write_non_utf8_file_name() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir
            .path()
            .join(OsStr::from_bytes(b"Settings\xff.yml"));

        let temp = temp_path_for(&file_path).unwrap();
        assert_eq!(temp.file_name().unwrap().as_bytes(), b".Settings\xff.yml.tmp");

        atomic_write(&file_path, "a: 1\n").unwrap();
        assert_eq!(fs::read_to_string(&file_path).unwrap(), "a: 1\n");
    }
}
