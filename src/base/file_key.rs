//! Identifiers for entries in a resolver's position table.

use std::fmt;

/// An opaque handle for one entry in a resolver's position table.
///
/// An entry is either one physical inclusion of a file or one macro
/// expansion record. The key itself carries no payload; the resolver
/// that minted it owns everything it refers to.
///
/// - `0` is reserved as the invalid key (also the [`Default`]).
/// - `u32::MAX` is reserved as the tombstone [`sentinel`](Self::sentinel)
///   and is never handed out by a resolver.
///
/// Keys minted by different resolvers are not comparable in any meaningful
/// way. Nothing checks this; callers must not mix them.
#[derive(Copy, Clone, Default, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[repr(transparent)]
pub struct FileKey(u32);

impl FileKey {
    /// The invalid key.
    pub const INVALID: FileKey = FileKey(0);

    const SENTINEL: u32 = u32::MAX;

    #[cfg(test)]
    pub(crate) const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Mint the key for table index `index` (keys are `index + 1`).
    ///
    /// Returns `None` when the key would collide with the sentinel. Outside
    /// this crate keys come from [`HandleMint::file_key`](super::HandleMint::file_key).
    #[inline]
    pub(crate) fn from_index(index: usize) -> Option<Self> {
        let raw = u32::try_from(index).ok()?.checked_add(1)?;
        (raw != Self::SENTINEL).then_some(Self(raw))
    }

    /// The table index this key was minted from, if the key is a real one.
    #[inline]
    pub fn index(self) -> Option<usize> {
        if self.is_invalid() || self.0 == Self::SENTINEL {
            None
        } else {
            Some(self.0 as usize - 1)
        }
    }

    /// The reserved tombstone value. Never equal to an allocated key.
    #[inline]
    pub const fn sentinel() -> Self {
        Self(Self::SENTINEL)
    }

    #[inline]
    pub const fn is_invalid(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_valid(self) -> bool {
        self.0 != 0
    }

    /// Hash projection: the underlying integer.
    #[inline]
    pub const fn hash_value(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for FileKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FileKey({})", self.0)
    }
}

impl fmt::Display for FileKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "file#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_invalid() {
        let key = FileKey::default();
        assert!(key.is_invalid());
        assert!(!key.is_valid());
        assert_eq!(key, FileKey::INVALID);
    }

    #[test]
    fn test_ordering_follows_integer() {
        let a = FileKey::from_raw(1);
        let b = FileKey::from_raw(2);

        assert!(a < b);
        assert!(a <= b);
        assert!(b > a);
        assert!(b >= a);
        assert!(a <= a && a >= a);
        assert_ne!(a, b);
    }

    #[test]
    fn test_index_round_trip() {
        let key = FileKey::from_index(0).unwrap();
        assert_eq!(key.hash_value(), 1);
        assert_eq!(key.index(), Some(0));
        assert_eq!(FileKey::INVALID.index(), None);
        assert_eq!(FileKey::sentinel().index(), None);
    }

    #[test]
    fn test_index_never_mints_sentinel() {
        let last = (u32::MAX - 1) as usize;
        assert_eq!(FileKey::from_index(last), None);
        assert_eq!(
            FileKey::from_index(last - 1),
            Some(FileKey::from_raw(u32::MAX - 1))
        );
    }

    #[test]
    fn test_file_key_size() {
        assert_eq!(std::mem::size_of::<FileKey>(), 4);
    }

    #[test]
    fn test_formatting() {
        let key = FileKey::from_raw(7);
        assert_eq!(format!("{key:?}"), "FileKey(7)");
        assert_eq!(key.to_string(), "file#7");
    }
}
