//! File-based model store with atomic replacement.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use log::{debug, info};
use tempfile::NamedTempFile;

use crate::error::{PeltaError, Result};
use crate::ml::artifact::ModelArtifact;
use crate::ml::store::{ModelStore, decode_artifact, encode_artifact};

/// Stores the artifact in a single file.
///
/// Saves write a temporary file in the same directory, flush it to disk and
/// rename it over the target, so readers see either the old or the new
/// artifact.
#[derive(Debug, Clone)]
pub struct FileModelStore {
    path: PathBuf,
}

impl FileModelStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        FileModelStore {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parent_dir(&self) -> PathBuf {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }
}

impl ModelStore for FileModelStore {
    fn save(&self, artifact: &ModelArtifact) -> Result<()> {
        let bytes = encode_artifact(artifact)?;
        let directory = self.parent_dir();

        fs::create_dir_all(&directory).map_err(|e| {
            PeltaError::storage(format!(
                "Failed to create directory {}: {e}",
                directory.display()
            ))
        })?;

        let mut temp = NamedTempFile::new_in(&directory)
            .map_err(|e| PeltaError::storage(format!("Failed to create temp file: {e}")))?;
        temp.write_all(&bytes)
            .map_err(|e| PeltaError::storage(format!("Failed to write artifact: {e}")))?;
        temp.as_file()
            .sync_all()
            .map_err(|e| PeltaError::storage(format!("Failed to sync artifact: {e}")))?;
        debug!("Wrote {} bytes to {}", bytes.len(), temp.path().display());

        temp.persist(&self.path).map_err(|e| {
            PeltaError::storage(format!(
                "Failed to move artifact into {}: {}",
                self.path.display(),
                e.error
            ))
        })?;

        info!(
            "Saved model {} to {}",
            artifact.metadata().artifact_id,
            self.path.display()
        );
        Ok(())
    }

    fn load(&self) -> Result<ModelArtifact> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(PeltaError::not_found(format!(
                    "No model artifact at {}",
                    self.path.display()
                )));
            }
            Err(e) => {
                return Err(PeltaError::storage(format!(
                    "Failed to read {}: {e}",
                    self.path.display()
                )));
            }
        };

        let artifact = decode_artifact(&bytes)?;
        info!(
            "Loaded model {} from {}",
            artifact.metadata().artifact_id,
            self.path.display()
        );
        Ok(artifact)
    }

    fn exists(&self) -> bool {
        self.path.is_file()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml::store::test_support::small_artifact;
    use tempfile::TempDir;

    #[test]
    fn test_load_without_save() {
        let dir = TempDir::new().unwrap();
        let store = FileModelStore::new(dir.path().join("model.bin"));

        assert!(!store.exists());
        assert!(matches!(store.load(), Err(PeltaError::NotFound(_))));
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let store = FileModelStore::new(dir.path().join("nested").join("model.bin"));
        let artifact = small_artifact();

        store.save(&artifact).unwrap();
        assert!(store.exists());
        assert_eq!(store.load().unwrap(), artifact);

        // Only the artifact remains; the temp file was renamed.
        let entries: Vec<_> = fs::read_dir(dir.path().join("nested")).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_second_save_replaces_first() {
        let dir = TempDir::new().unwrap();
        let store = FileModelStore::new(dir.path().join("model.bin"));
        let first = small_artifact();
        let second = small_artifact();

        store.save(&first).unwrap();
        store.save(&second).unwrap();
        assert_eq!(
            store.load().unwrap().metadata().artifact_id,
            second.metadata().artifact_id
        );
    }

    #[test]
    fn test_failed_save_keeps_previous_artifact() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("model.bin");
        let store = FileModelStore::new(&path);
        let artifact = small_artifact();
        store.save(&artifact).unwrap();

        // A store whose directory is a regular file cannot write.
        let broken = FileModelStore::new(path.join("model.bin"));
        assert!(matches!(broken.save(&artifact), Err(PeltaError::Storage(_))));

        assert_eq!(store.load().unwrap(), artifact);
    }

    #[test]
    fn test_corrupt_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("model.bin");
        fs::write(&path, b"definitely not a model").unwrap();

        let store = FileModelStore::new(&path);
        assert!(matches!(store.load(), Err(PeltaError::Storage(_))));
    }
}
