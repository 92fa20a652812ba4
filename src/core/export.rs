//! Writing rendered tables to `passwords.txt` under the home directory.

use crate::constants;
use crate::error::{Result, VaultError};
use crate::util::{fs as vault_fs, path as vault_path};
use std::io;
use std::path::{Path, PathBuf};
use tracing::info;

/// Write `text` to `<home>/<fragment>/passwords.txt` and return the file path.
///
/// The directory must already exist and must stay inside `home`.
pub fn export_table(home: &Path, fragment: &str, text: &str) -> Result<PathBuf> {
    let Some(dir) = vault_path::resolve_under(home, fragment) else {
        return Err(VaultError::ExportIo {
            path: home.join(fragment.trim()).join(constants::EXPORT_FILE),
            source: io::Error::new(
                io::ErrorKind::PermissionDenied,
                "path leaves the home directory",
            ),
        });
    };
    let target = dir.join(constants::EXPORT_FILE);

    if !dir.is_dir() {
        return Err(VaultError::ExportIo {
            path: target,
            source: io::Error::new(io::ErrorKind::NotFound, "directory does not exist"),
        });
    }

    let mut content = text.to_string();
    if !content.ends_with('\n') {
        content.push('\n');
    }
    vault_fs::write_atomic(&target, content.as_bytes(), constants::EXPORT_FILE_MODE).map_err(
        |e| VaultError::ExportIo {
            path: target.clone(),
            source: io::Error::other(format!("{:#}", e)),
        },
    )?;

    info!(path = %target.display(), "exported credentials");
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_export_writes_file() {
        let home = TempDir::new().unwrap();
        fs::create_dir_all(home.path().join("Desktop/main")).unwrap();
        let table = "+--+\n|x|\n+--+";
        let path = export_table(home.path(), "Desktop/main", table).unwrap();
        assert_eq!(path, home.path().join("Desktop/main/passwords.txt"));
        assert!(fs::read_to_string(&path).unwrap().contains("|x|"));
    }

    #[test]
    fn test_export_missing_directory() {
        let home = TempDir::new().unwrap();
        let err = export_table(home.path(), "nope", "t").unwrap_err();
        match err {
            VaultError::ExportIo { source, .. } => {
                assert_eq!(source.kind(), io::ErrorKind::NotFound)
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_export_rejects_traversal() {
        let home = TempDir::new().unwrap();
        let err = export_table(home.path(), "../..", "t").unwrap_err();
        assert!(matches!(err, VaultError::ExportIo { .. }));
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_export_to_home_root() {
        let home = TempDir::new().unwrap();
        let path = export_table(home.path(), "", "t").unwrap();
        assert!(path.is_file());
    }

    #[cfg(unix)]
    #[test]
    fn test_export_file_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let home = TempDir::new().unwrap();
        let path = export_table(home.path(), "", "secret table").unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, constants::EXPORT_FILE_MODE);
    }

    #[test]
    fn test_export_replaces_previous_file() {
        let home = TempDir::new().unwrap();
        export_table(home.path(), "", "first").unwrap();
        let path = export_table(home.path(), "", "second").unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "second\n");
    }
}
