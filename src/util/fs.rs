use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::Path;

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// Create `path` with `mode` if it is missing. An existing directory keeps its permissions.
pub fn ensure_dir(path: &Path, mode: u32) -> Result<()> {
    if path.is_dir() {
        return Ok(());
    }
    fs::create_dir_all(path).with_context(|| format!("create directory {}", path.display()))?;
    set_permissions(path, mode)
}

pub fn set_permissions(path: &Path, mode: u32) -> Result<()> {
    #[cfg(unix)]
    {
        let perm = fs::Permissions::from_mode(mode);
        fs::set_permissions(path, perm)
            .with_context(|| format!("set permissions {:o} on {}", mode, path.display()))?;
    }
    Ok(())
}

/// Replace `path` with `content` via a temp file in the same directory.
///
/// Readers see either the old file or the new one, never a partial write.
pub fn write_atomic(path: &Path, content: &[u8], mode: u32) -> Result<()> {
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent).with_context(|| format!("create dir {}", parent.display()))?;

    let mut tmp = tempfile::NamedTempFile::new_in(parent)
        .with_context(|| format!("create temp file for {}", path.display()))?;
    tmp.write_all(content)
        .with_context(|| format!("write {}", path.display()))?;
    tmp.flush().ok();

    #[cfg(unix)]
    {
        let perm = fs::Permissions::from_mode(mode);
        tmp.as_file()
            .set_permissions(perm)
            .with_context(|| format!("set permissions on temp file for {}", path.display()))?;
    }
    #[cfg(not(unix))]
    let _ = mode;

    tmp.persist(path)
        .map_err(|err| anyhow::anyhow!("persist {}: {}", path.display(), err))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_ensure_dir_creates_nested() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a/b");
        ensure_dir(&nested, 0o700).unwrap();
        assert!(nested.is_dir());
    }

    #[cfg(unix)]
    #[test]
    fn test_ensure_dir_sets_mode_on_create_only() {
        let dir = TempDir::new().unwrap();
        let created = dir.path().join("vault");
        ensure_dir(&created, 0o700).unwrap();
        let mode = fs::metadata(&created).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o700);

        let existing = dir.path().join("shared");
        fs::create_dir(&existing).unwrap();
        fs::set_permissions(&existing, fs::Permissions::from_mode(0o755)).unwrap();
        ensure_dir(&existing, 0o700).unwrap();
        let mode = fs::metadata(&existing).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o755);
    }

    #[test]
    fn test_write_atomic_replaces_content() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("config.json");
        write_atomic(&target, b"first", 0o600).unwrap();
        write_atomic(&target, b"second", 0o600).unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), "second");
    }

    #[cfg(unix)]
    #[test]
    fn test_write_atomic_sets_mode() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("secret");
        write_atomic(&target, b"x", 0o600).unwrap();
        let mode = fs::metadata(&target).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o600);
    }
}
