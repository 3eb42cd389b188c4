//! Using handles as hash-container keys.
//!
//! The std/Fx maps need nothing beyond `Eq + Hash`, but flat open-addressed
//! tables reserve two key values for bookkeeping. [`SentinelKey`] names them
//! so such a table can be built over [`FileKey`] or [`SourceHandle`]; a
//! resolver guarantees it never allocates either one as a real key.

use std::hash::Hash;

use rustc_hash::{FxHashMap, FxHashSet};

use super::file_key::FileKey;
use super::handle::SourceHandle;

/// A key type with reserved "empty" and "tombstone" values.
///
/// Empty, tombstone, and every legitimately allocated key are pairwise
/// distinct. `hash_value` agrees with `Eq`.
pub trait SentinelKey: Copy + Eq + Hash {
    /// The unoccupied-slot marker; also the type's invalid value.
    fn empty_key() -> Self;

    /// The removed-slot marker.
    fn tombstone_key() -> Self;

    fn hash_value(&self) -> u32;

    fn is_sentinel(&self) -> bool {
        *self == Self::empty_key() || *self == Self::tombstone_key()
    }
}

impl SentinelKey for FileKey {
    #[inline]
    fn empty_key() -> Self {
        FileKey::INVALID
    }

    #[inline]
    fn tombstone_key() -> Self {
        FileKey::sentinel()
    }

    #[inline]
    fn hash_value(&self) -> u32 {
        FileKey::hash_value(*self)
    }
}

impl SentinelKey for SourceHandle {
    #[inline]
    fn empty_key() -> Self {
        SourceHandle::INVALID
    }

    /// Macro kind with the topmost offset, which minting refuses.
    #[inline]
    fn tombstone_key() -> Self {
        SourceHandle::from_raw_encoding(u32::MAX)
    }

    #[inline]
    fn hash_value(&self) -> u32 {
        self.raw_encoding()
    }
}

/// Map keyed by [`FileKey`].
pub type FileKeyMap<V> = FxHashMap<FileKey, V>;

/// Set of [`FileKey`]s.
pub type FileKeySet = FxHashSet<FileKey>;

/// Map keyed by [`SourceHandle`].
pub type HandleMap<V> = FxHashMap<SourceHandle, V>;

/// Set of [`SourceHandle`]s.
pub type HandleSet = FxHashSet<SourceHandle>;
