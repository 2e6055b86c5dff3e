use std::path::{Path, PathBuf};

/// Walk upward from `start` to the first directory containing `marker/`.
fn find_upward(start: &Path, marker: &str) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(marker).is_dir())
        .map(Path::to_path_buf)
}

/// Resolve the project root.
///
/// Priority:
/// 1. `--root` flag / `CSPEC_ROOT` env var (passed in as `explicit`)
/// 2. Walk upward from `cwd` looking for `cspec/`
/// 3. Walk upward from `cwd` looking for `.git/`
/// 4. Fall back to `cwd`
pub fn resolve_root(explicit: Option<&Path>) -> PathBuf {
    if let Some(p) = explicit {
        return p.to_path_buf();
    }
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    resolve_from(&cwd)
}

fn resolve_from(cwd: &Path) -> PathBuf {
    find_upward(cwd, cspec_core::paths::CSPEC_DIR)
        .or_else(|| find_upward(cwd, ".git"))
        .unwrap_or_else(|| cwd.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn explicit_root_wins() {
        let dir = TempDir::new().unwrap();
        assert_eq!(resolve_root(Some(dir.path())), dir.path());
    }

    #[test]
    fn finds_cspec_dir_above_cwd() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("cspec")).unwrap();
        let deep = dir.path().join("src/deep");
        std::fs::create_dir_all(&deep).unwrap();
        assert_eq!(resolve_from(&deep), dir.path());
    }

    #[test]
    fn cspec_dir_beats_git_dir() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join(".git")).unwrap();
        let project = dir.path().join("project");
        std::fs::create_dir_all(project.join("cspec")).unwrap();
        assert_eq!(resolve_from(&project.join("src")), project);
    }

    #[test]
    fn falls_back_to_git_then_cwd() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join(".git")).unwrap();
        let deep = dir.path().join("a/b");
        std::fs::create_dir_all(&deep).unwrap();
        assert_eq!(resolve_from(&deep), dir.path());

        let bare = TempDir::new().unwrap();
        assert_eq!(resolve_from(bare.path()), bare.path());
    }
}
