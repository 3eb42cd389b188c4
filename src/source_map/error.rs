//! Error types for source map construction.

use thiserror::Error;

use crate::base::{FileKey, LocationError, SourceHandle};

/// Errors raised while building or addressing a [`SourceMap`](super::SourceMap).
#[derive(Debug, Error)]
pub enum SourceMapError {
    /// No room left in the offset space for another entry.
    #[error("source map ran out of locations: need {needed} offsets past {next:#x}")]
    AddressSpaceExhausted { next: u32, needed: u64 },

    /// A buffer too large to address with 32-bit offsets.
    #[error("file '{name}' is too large ({len} bytes)")]
    FileTooLarge { name: String, len: usize },

    /// The key does not name a file entry of this map.
    #[error("unknown file {0}")]
    UnknownFile(FileKey),

    /// A byte position past the end of its file.
    #[error("position {pos} is past the end of {file} ({len} bytes)")]
    PositionOutOfBounds { file: FileKey, pos: u32, len: u32 },

    /// The handle is not a file location of this map.
    #[error("{0:?} is not a file location in this source map")]
    InvalidLocation(SourceHandle),

    /// Handle encoding failed.
    #[error(transparent)]
    Encoding(#[from] LocationError),
}

impl SourceMapError {
    pub(super) fn exhausted(next: u32, needed: impl Into<u64>) -> Self {
        Self::AddressSpaceExhausted {
            next,
            needed: needed.into(),
        }
    }
}
