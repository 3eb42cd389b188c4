//! Foundation types for source locations.
//!
//! This module provides the value types every other layer stores:
//! - [`FileKey`] - Identifier of one resolver table entry
//! - [`SourceHandle`] - Packed 32-bit position (file or macro kind)
//! - [`SourceSpan`] - Begin/end pair of handles
//! - [`SourceBuffer`], [`LineIndex`] - File text and line/column lookup
//! - [`PresumedPosition`] - Filename/line/column as shown to the user
//! - [`SentinelKey`] - Empty/tombstone keys for hash containers
//! - [`Persist`] - Lossless byte-stream form
//!
//! This module has NO dependencies on other sloc modules.

mod buffer;
mod error;
mod file_key;
mod handle;
mod key_info;
mod persist;
mod presumed;
mod span;

pub use buffer::{LineIndex, SourceBuffer};
pub use error::LocationError;
pub use file_key::FileKey;
pub use handle::{HandleKind, HandleMint, SourceHandle};
pub use key_info::{FileKeyMap, FileKeySet, HandleMap, HandleSet, SentinelKey};
pub use persist::Persist;
pub use presumed::PresumedPosition;
pub use span::SourceSpan;

// Re-export text-size types for convenience
pub use text_size::{self, TextSize};
