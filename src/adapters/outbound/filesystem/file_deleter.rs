use crate::cleaning::domain::AssetId;
use crate::ports::outbound::DeletionExecutor;
use crate::shared::Result;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

/// FileSystemDeleter adapter removing asset files under a content root
///
/// This adapter implements the DeletionExecutor port against the real
/// filesystem. Each asset id maps to a file relative to the content root.
/// A file that cannot be removed (missing, locked, a symlink) is treated
/// as a refusal: it is simply left out of the confirmed set so the caller
/// can decide whether the overall run still makes progress.
pub struct FileSystemDeleter {
    root: PathBuf,
}

impl FileSystemDeleter {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    fn try_delete_one(&self, id: &AssetId) -> bool {
        let path = self.root.join(id.as_str());

        // never follow a symlink out of the content root
        match path.symlink_metadata() {
            Ok(metadata) if metadata.file_type().is_symlink() => return false,
            Ok(metadata) if !metadata.is_file() => return false,
            Err(_) => return false,
            Ok(_) => {}
        }

        fs::remove_file(&path).is_ok()
    }

    /// Removes directories left empty after deletion, deepest first.
    ///
    /// The content root itself is never removed. Returns the number of
    /// directories pruned.
    pub fn prune_empty_dirs(&self) -> Result<usize> {
        let mut dirs = Vec::new();
        collect_dirs(&self.root, &mut dirs)?;

        // deepest first so a parent emptied by pruning its children is
        // itself pruned in the same pass
        dirs.sort_by_key(|dir| std::cmp::Reverse(dir.components().count()));

        let mut pruned = 0;
        for dir in dirs {
            if dir == self.root {
                continue;
            }
            if fs::read_dir(&dir)?.next().is_none() && fs::remove_dir(&dir).is_ok() {
                pruned += 1;
            }
        }
        Ok(pruned)
    }
}

fn collect_dirs(dir: &Path, out: &mut Vec<PathBuf>) -> Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if entry.file_type()?.is_dir() && !path.symlink_metadata()?.file_type().is_symlink() {
            collect_dirs(&path, out)?;
            out.push(path);
        }
    }
    Ok(())
}

impl DeletionExecutor for FileSystemDeleter {
    fn delete(&self, ids: &BTreeSet<AssetId>) -> Result<BTreeSet<AssetId>> {
        Ok(ids
            .iter()
            .filter(|id| self.try_delete_one(id))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn asset(id: &str) -> AssetId {
        AssetId::new(id.to_string()).unwrap()
    }

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"data").unwrap();
    }

    #[test]
    fn test_delete_removes_existing_files() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "textures/rock.tex");
        touch(dir.path(), "materials/rock.mat");

        let deleter = FileSystemDeleter::new(dir.path().to_path_buf());
        let requested: BTreeSet<AssetId> =
            [asset("textures/rock.tex"), asset("materials/rock.mat")]
                .into_iter()
                .collect();
        let confirmed = deleter.delete(&requested).unwrap();

        assert_eq!(confirmed, requested);
        assert!(!dir.path().join("textures/rock.tex").exists());
        assert!(!dir.path().join("materials/rock.mat").exists());
    }

    #[test]
    fn test_missing_file_is_a_refusal_not_an_error() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "textures/rock.tex");

        let deleter = FileSystemDeleter::new(dir.path().to_path_buf());
        let requested: BTreeSet<AssetId> =
            [asset("textures/rock.tex"), asset("textures/gone.tex")]
                .into_iter()
                .collect();
        let confirmed = deleter.delete(&requested).unwrap();

        assert_eq!(confirmed.len(), 1);
        assert!(confirmed.contains(&asset("textures/rock.tex")));
    }

    #[test]
    fn test_directory_target_is_refused() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("textures")).unwrap();

        let deleter = FileSystemDeleter::new(dir.path().to_path_buf());
        let requested: BTreeSet<AssetId> = [asset("textures")].into_iter().collect();
        let confirmed = deleter.delete(&requested).unwrap();

        assert!(confirmed.is_empty());
        assert!(dir.path().join("textures").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_target_is_refused() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "real.tex");
        std::os::unix::fs::symlink(dir.path().join("real.tex"), dir.path().join("link.tex"))
            .unwrap();

        let deleter = FileSystemDeleter::new(dir.path().to_path_buf());
        let requested: BTreeSet<AssetId> = [asset("link.tex")].into_iter().collect();
        let confirmed = deleter.delete(&requested).unwrap();

        assert!(confirmed.is_empty());
        assert!(dir.path().join("real.tex").exists());
    }

    #[test]
    fn test_prune_empty_dirs_deepest_first() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("a/b/c")).unwrap();
        touch(dir.path(), "keep/file.tex");

        let deleter = FileSystemDeleter::new(dir.path().to_path_buf());
        let pruned = deleter.prune_empty_dirs().unwrap();

        assert_eq!(pruned, 3);
        assert!(!dir.path().join("a").exists());
        assert!(dir.path().join("keep/file.tex").exists());
        assert!(dir.path().exists());
    }

    #[test]
    fn test_prune_never_removes_root() {
        let dir = TempDir::new().unwrap();
        let deleter = FileSystemDeleter::new(dir.path().to_path_buf());
        assert_eq!(deleter.prune_empty_dirs().unwrap(), 0);
        assert!(dir.path().exists());
    }
}
