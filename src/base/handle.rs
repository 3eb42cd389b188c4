//! The packed 32-bit source position handle.
//!
//! ```text
//!  31  30                                  0
//! +---+-------------------------------------+
//! | K |              offset                 |
//! +---+-------------------------------------+
//! K = 0: file position, K = 1: macro-expansion position
//! ```
//!
//! The offset is an address in the resolver's position table, not a byte
//! offset into a buffer. Raw value `0` is the invalid handle.

use std::fmt;

use super::error::LocationError;
use super::file_key::FileKey;

/// Which half of the address space a handle lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandleKind {
    /// A position physically present in a file buffer.
    File,
    /// A position inside a macro expansion.
    Macro,
}

/// A compact, comparable, hashable position identifier.
///
/// Equality and ordering are defined on the raw encoding. The order is total
/// and resolver-independent, which makes it usable for sorting and
/// deduplication, but it says nothing about textual order across files.
///
/// Handles are minted by a resolver through the [`HandleMint`] it owns.
/// Everyone else receives them as return values, or rebuilds them from
/// [`raw_encoding`](Self::raw_encoding) at a persistence boundary.
#[derive(Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct SourceHandle(u32);

impl SourceHandle {
    /// The discriminator bit. Set for macro-expansion positions.
    pub const KIND_BIT: u32 = 1 << 31;

    /// Largest offset that fits beside the kind bit.
    pub const MAX_OFFSET: u32 = Self::KIND_BIT - 1;

    /// The invalid handle.
    pub const INVALID: SourceHandle = SourceHandle(0);

    #[inline]
    pub const fn is_file_kind(self) -> bool {
        self.0 & Self::KIND_BIT == 0
    }

    #[inline]
    pub const fn is_macro_kind(self) -> bool {
        self.0 & Self::KIND_BIT != 0
    }

    /// Returns true if this handle refers to some position.
    ///
    /// Invalid handles are used when an event has no corresponding place in
    /// the source, e.g. a diagnostic about a command line option.
    #[inline]
    pub const fn is_valid(self) -> bool {
        self.0 != 0
    }

    #[inline]
    pub const fn is_invalid(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn kind(self) -> HandleKind {
        if self.is_macro_kind() {
            HandleKind::Macro
        } else {
            HandleKind::File
        }
    }

    /// Unpack into the tagged form. `None` for the invalid handle.
    #[inline]
    pub const fn decode(self) -> Option<(HandleKind, u32)> {
        if self.is_invalid() {
            None
        } else {
            Some((self.kind(), self.offset()))
        }
    }

    /// Table offset with the kind bit stripped. Only resolvers interpret it.
    #[inline]
    pub(crate) const fn offset(self) -> u32 {
        self.0 & !Self::KIND_BIT
    }

    /// A file handle `delta` positions away from this one.
    ///
    /// # Panics
    ///
    /// Panics if this is not a file handle or if the result would leave the
    /// offset space. See [`checked_with_file_offset`](Self::checked_with_file_offset).
    #[must_use]
    pub fn with_file_offset(self, delta: i32) -> SourceHandle {
        match self.checked_with_file_offset(delta) {
            Ok(loc) => loc,
            Err(err) => panic!("invalid location: {err}"),
        }
    }

    /// Fallible form of [`with_file_offset`](Self::with_file_offset).
    pub fn checked_with_file_offset(self, delta: i32) -> Result<SourceHandle, LocationError> {
        if self.is_macro_kind() {
            return Err(LocationError::NotFileKind { raw: self.0 });
        }
        let target = i64::from(self.offset()) + i64::from(delta);
        if target < 0 {
            return Err(LocationError::underflow(self.offset(), delta));
        }
        if target > i64::from(Self::MAX_OFFSET) {
            return Err(LocationError::overflow(self.offset(), delta));
        }
        Ok(SourceHandle(target as u32))
    }

    /// Opaque 32-bit encoding. Only meant to be fed back to
    /// [`from_raw_encoding`](Self::from_raw_encoding).
    #[inline]
    pub const fn raw_encoding(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn from_raw_encoding(raw: u32) -> SourceHandle {
        SourceHandle(raw)
    }
}

impl fmt::Debug for SourceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.decode() {
            None => write!(f, "SourceHandle(<invalid>)"),
            Some((HandleKind::File, offset)) => write!(f, "SourceHandle(File+{offset})"),
            Some((HandleKind::Macro, offset)) => write!(f, "SourceHandle(Macro+{offset})"),
        }
    }
}

/// The capability to mint handles and file keys.
///
/// Meant for resolvers only: a resolver creates one when it is built and
/// keeps it private, so every [`SourceHandle`] and [`FileKey`] outside a
/// deserialization boundary comes from the resolver that interprets it.
/// Both handle factories refuse an offset that already touches the kind bit
/// rather than truncating it.
#[derive(Debug)]
pub struct HandleMint {
    _private: (),
}

impl HandleMint {
    pub const fn new() -> Self {
        Self { _private: () }
    }

    /// The key for entry `index` of the resolver's table.
    ///
    /// Keys are `index + 1`. `None` once the key space is used up; the
    /// tombstone is never returned.
    pub fn file_key(&self, index: usize) -> Option<FileKey> {
        FileKey::from_index(index)
    }

    /// Mint a file handle.
    ///
    /// # Panics
    ///
    /// Panics if the resolver ran out of offsets.
    pub fn file(&self, offset: u32) -> SourceHandle {
        match self.try_file(offset) {
            Ok(loc) => loc,
            Err(err) => panic!("ran out of source locations: {err}"),
        }
    }

    /// Mint a macro-expansion handle.
    ///
    /// # Panics
    ///
    /// Panics if the resolver ran out of offsets.
    pub fn macro_(&self, offset: u32) -> SourceHandle {
        match self.try_macro(offset) {
            Ok(loc) => loc,
            Err(err) => panic!("ran out of source locations: {err}"),
        }
    }

    pub fn try_file(&self, offset: u32) -> Result<SourceHandle, LocationError> {
        if offset & SourceHandle::KIND_BIT != 0 {
            return Err(LocationError::overflow(offset, 0u32));
        }
        Ok(SourceHandle(offset))
    }

    /// The topmost macro offset is refused as well: with the kind bit set it
    /// would encode as `u32::MAX`, the tombstone.
    pub fn try_macro(&self, offset: u32) -> Result<SourceHandle, LocationError> {
        if offset >= SourceHandle::MAX_OFFSET {
            return Err(LocationError::overflow(offset, 0u32));
        }
        Ok(SourceHandle(SourceHandle::KIND_BIT | offset))
    }
}

impl Default for HandleMint {
    fn default() -> Self {
        Self::new()
    }
}
