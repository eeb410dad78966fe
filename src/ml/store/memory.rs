//! In-memory model store for testing and embedding.

use log::debug;
use parking_lot::RwLock;

use crate::error::{PeltaError, Result};
use crate::ml::artifact::ModelArtifact;
use crate::ml::store::{ModelStore, decode_artifact, encode_artifact};

/// Keeps the encoded artifact in memory. Loads decode a fresh copy.
#[derive(Debug, Default)]
pub struct MemoryModelStore {
    bytes: RwLock<Option<Vec<u8>>>,
}

impl MemoryModelStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Size of the stored encoding, if any.
    pub fn size(&self) -> Option<usize> {
        self.bytes.read().as_ref().map(Vec::len)
    }

    /// Forget the stored artifact.
    pub fn clear(&self) {
        *self.bytes.write() = None;
    }
}

impl ModelStore for MemoryModelStore {
    fn save(&self, artifact: &ModelArtifact) -> Result<()> {
        let bytes = encode_artifact(artifact)?;
        debug!("Stored {} bytes in memory", bytes.len());
        *self.bytes.write() = Some(bytes);
        Ok(())
    }

    fn load(&self) -> Result<ModelArtifact> {
        match self.bytes.read().as_deref() {
            Some(bytes) => decode_artifact(bytes),
            None => Err(PeltaError::not_found("No model artifact in memory")),
        }
    }

    fn exists(&self) -> bool {
        self.bytes.read().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml::store::test_support::small_artifact;

    #[test]
    fn test_memory_store() {
        let store = MemoryModelStore::new();
        assert!(!store.exists());
        assert!(matches!(store.load(), Err(PeltaError::NotFound(_))));

        let artifact = small_artifact();
        store.save(&artifact).unwrap();
        assert!(store.exists());
        assert!(store.size().unwrap() > 0);
        assert_eq!(store.load().unwrap(), artifact);

        store.clear();
        assert!(matches!(store.load(), Err(PeltaError::NotFound(_))));
    }
}
