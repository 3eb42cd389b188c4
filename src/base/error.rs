//! Error types for handle encoding and persistence.

use thiserror::Error;

/// Errors raised by the fallible handle APIs.
///
/// The panicking forms (`with_file_offset`, `HandleMint::file`) report the
/// same conditions as assertion failures.
#[derive(Debug, Error)]
pub enum LocationError {
    /// The offset would spill into the kind bit.
    #[error("offset {offset:#x} + {delta} overflows the handle offset space")]
    OffsetOverflow { offset: u32, delta: i64 },

    /// The offset would drop below zero.
    #[error("offset {offset:#x} + {delta} underflows the handle offset space")]
    OffsetUnderflow { offset: u32, delta: i64 },

    /// A file-only operation was applied to a macro handle.
    #[error("expected a file location, found raw encoding {raw:#x}")]
    NotFileKind { raw: u32 },

    /// Reading or writing the persisted form failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl LocationError {
    /// Create an overflow error for `offset + delta`.
    pub fn overflow(offset: u32, delta: impl Into<i64>) -> Self {
        Self::OffsetOverflow {
            offset,
            delta: delta.into(),
        }
    }

    /// Create an underflow error for `offset + delta`.
    pub fn underflow(offset: u32, delta: impl Into<i64>) -> Self {
        Self::OffsetUnderflow {
            offset,
            delta: delta.into(),
        }
    }
}
