//! Persistence of model artifacts.
//!
//! Backends implement [`ModelStore`]. Both store the same binary encoding:
//!
//! ```text
//! magic "PELTA\0" | format version u32 | crc32 u32 | payload length u64 | payload
//! ```
//!
//! Integers are little-endian; the payload is the bincode-serialized
//! [`ModelArtifact`].

pub mod file;
pub mod memory;

use std::fmt::Debug;

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::error::{PeltaError, Result};
use crate::ml::artifact::{ARTIFACT_FORMAT_VERSION, ModelArtifact};

pub use file::FileModelStore;
pub use memory::MemoryModelStore;

const MAGIC: &[u8; 6] = b"PELTA\0";
const HEADER_LEN: usize = MAGIC.len() + 4 + 4 + 8;

/// Storage for a single current artifact.
pub trait ModelStore: Send + Sync + Debug {
    /// Persist an artifact, replacing any previous one as a whole.
    fn save(&self, artifact: &ModelArtifact) -> Result<()>;

    /// Load the persisted artifact. Fails with `NotFound` if nothing was saved.
    fn load(&self) -> Result<ModelArtifact>;

    /// Whether an artifact has been saved.
    fn exists(&self) -> bool;
}

/// Encode an artifact with header and checksum.
pub fn encode_artifact(artifact: &ModelArtifact) -> Result<Vec<u8>> {
    let payload = bincode::serialize(artifact)
        .map_err(|e| PeltaError::storage(format!("Failed to serialize artifact: {e}")))?;

    let mut bytes = Vec::with_capacity(HEADER_LEN + payload.len());
    bytes.extend_from_slice(MAGIC);
    bytes.write_u32::<LittleEndian>(ARTIFACT_FORMAT_VERSION)?;
    bytes.write_u32::<LittleEndian>(crc32fast::hash(&payload))?;
    bytes.write_u64::<LittleEndian>(payload.len() as u64)?;
    bytes.extend_from_slice(&payload);
    Ok(bytes)
}

/// Decode and verify bytes produced by [`encode_artifact`].
pub fn decode_artifact(bytes: &[u8]) -> Result<ModelArtifact> {
    if bytes.len() < HEADER_LEN {
        return Err(PeltaError::storage(format!(
            "Artifact is truncated: {} bytes, header needs {HEADER_LEN}",
            bytes.len()
        )));
    }
    if &bytes[..MAGIC.len()] != MAGIC {
        return Err(PeltaError::storage("Not a model artifact (bad magic)"));
    }

    let mut header = &bytes[MAGIC.len()..HEADER_LEN];
    let version = header.read_u32::<LittleEndian>()?;
    let checksum = header.read_u32::<LittleEndian>()?;
    let length = header.read_u64::<LittleEndian>()?;

    if version != ARTIFACT_FORMAT_VERSION {
        return Err(PeltaError::incompatible(format!(
            "Artifact format version {version}, expected {ARTIFACT_FORMAT_VERSION}"
        )));
    }

    let payload = &bytes[HEADER_LEN..];
    if payload.len() as u64 != length {
        return Err(PeltaError::storage(format!(
            "Artifact payload is {} bytes, header says {length}",
            payload.len()
        )));
    }
    if crc32fast::hash(payload) != checksum {
        return Err(PeltaError::storage("Artifact checksum mismatch"));
    }

    bincode::deserialize(payload)
        .map_err(|e| PeltaError::storage(format!("Failed to deserialize artifact: {e}")))
}
