use crate::error::Result;
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;

/// Atomically write `data` to `path` using a tempfile in the same directory.
pub fn atomic_write(path: &Path, data: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(data)?;
    tmp.persist(path).map_err(|e| e.error)?;
    debug!(path = %path.display(), bytes = data.len(), "wrote file");
    Ok(())
}

/// Create a directory and all parents. Returns true if it did not exist.
pub fn ensure_dir(path: &Path) -> Result<bool> {
    if path.is_dir() {
        return Ok(false);
    }
    std::fs::create_dir_all(path)?;
    Ok(true)
}

/// What [`install_file`] did with the destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InstallOutcome {
    Created,
    Overwritten,
    Skipped,
}

/// Write `data` to `path` unless it exists; `force` overwrites.
pub fn install_file(path: &Path, data: &[u8], force: bool) -> Result<InstallOutcome> {
    let exists = path.exists();
    if exists && !force {
        return Ok(InstallOutcome::Skipped);
    }
    atomic_write(path, data)?;
    Ok(if exists {
        InstallOutcome::Overwritten
    } else {
        InstallOutcome::Created
    })
}

/// Append text to a file, creating it if it doesn't exist.
pub fn append_text(path: &Path, text: &str) -> Result<()> {
    let mut f = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    f.write_all(text.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn atomic_write_creates_parents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a/b/c/issue.md");
        atomic_write(&path, b"data").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "data");
    }

    #[test]
    fn ensure_dir_reports_creation() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cspec/specs");
        assert!(ensure_dir(&path).unwrap());
        assert!(!ensure_dir(&path).unwrap());
    }

    #[test]
    fn install_file_respects_force() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("AGENTS.md");
        assert_eq!(
            install_file(&path, b"one", false).unwrap(),
            InstallOutcome::Created
        );
        assert_eq!(
            install_file(&path, b"two", false).unwrap(),
            InstallOutcome::Skipped
        );
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "one");
        assert_eq!(
            install_file(&path, b"three", true).unwrap(),
            InstallOutcome::Overwritten
        );
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "three");
    }

    #[test]
    fn append_text_creates_and_appends() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("CLAUDE.md");
        append_text(&path, "# Claude\n").unwrap();
        append_text(&path, "more\n").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# Claude\nmore\n");
    }
}
