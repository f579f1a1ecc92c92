//! Command buffer: the finished byte stream for one print job.

use std::fs;
use std::path::Path;

use crate::error::RasidError;

/// Append-only ESC/POS byte stream for exactly one print job.
///
/// Built by codegen, then handed whole to a spooler session which
/// treats it as an opaque blob.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandBuffer {
    bytes: Vec<u8>,
}

impl CommandBuffer {
    pub fn new() -> Self {
        Self {
            bytes: Vec::with_capacity(1024),
        }
    }

    pub fn extend(&mut self, bytes: impl IntoIterator<Item = u8>) {
        self.bytes.extend(bytes);
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.bytes
    }

    /// Persist the buffer as-is, replacing any existing file.
    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<(), RasidError> {
        let path = path.as_ref();
        fs::write(path, &self.bytes).map_err(|source| RasidError::Artifact {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl AsRef<[u8]> for CommandBuffer {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl From<Vec<u8>> for CommandBuffer {
    fn from(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }
}
