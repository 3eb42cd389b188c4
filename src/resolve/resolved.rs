//! A handle bundled with the resolver that can interpret it.

use std::fmt;
use std::ops::Deref;

use crate::base::{FileKey, PresumedPosition, SourceBuffer, SourceHandle};

use super::SourceResolver;

/// A [`SourceHandle`] plus a borrowed resolver, for passing both around as
/// one value.
///
/// The borrow keeps the resolver alive for as long as the location exists.
/// All [`SourceHandle`] methods are available through `Deref`.
///
/// A location built with [`unresolved`](Self::unresolved) has no resolver.
/// It is only good as an invalid placeholder: every resolver-backed query
/// on it panics.
#[derive(Clone, Copy)]
pub struct ResolvedLocation<'a> {
    handle: SourceHandle,
    resolver: Option<&'a dyn SourceResolver>,
}

impl<'a> ResolvedLocation<'a> {
    pub fn new(handle: SourceHandle, resolver: &'a dyn SourceResolver) -> Self {
        Self {
            handle,
            resolver: Some(resolver),
        }
    }

    /// A placeholder with no resolver and an invalid handle.
    pub const fn unresolved() -> Self {
        Self {
            handle: SourceHandle::INVALID,
            resolver: None,
        }
    }

    pub const fn handle(&self) -> SourceHandle {
        self.handle
    }

    pub const fn has_resolver(&self) -> bool {
        self.resolver.is_some()
    }

    /// # Panics
    ///
    /// Panics if no resolver is bound.
    pub fn resolver(&self) -> &'a dyn SourceResolver {
        match self.resolver {
            Some(resolver) => resolver,
            None => panic!("ResolvedLocation has no resolver"),
        }
    }

    fn rebind(&self, handle: SourceHandle) -> Self {
        Self {
            handle,
            resolver: self.resolver,
        }
    }

    pub fn file_key(&self) -> FileKey {
        self.resolver().file_key(self.handle)
    }

    pub fn instantiation_loc(&self) -> ResolvedLocation<'a> {
        self.rebind(self.resolver().instantiation_loc(self.handle))
    }

    pub fn spelling_loc(&self) -> ResolvedLocation<'a> {
        self.rebind(self.resolver().spelling_loc(self.handle))
    }

    pub fn line_number(&self) -> u32 {
        self.resolver().line_number(self.handle)
    }

    pub fn column_number(&self) -> u32 {
        self.resolver().column_number(self.handle)
    }

    pub fn instantiation_line_number(&self) -> u32 {
        self.resolver().instantiation_line_number(self.handle)
    }

    pub fn instantiation_column_number(&self) -> u32 {
        self.resolver().instantiation_column_number(self.handle)
    }

    pub fn spelling_line_number(&self) -> u32 {
        self.resolver().spelling_line_number(self.handle)
    }

    pub fn spelling_column_number(&self) -> u32 {
        self.resolver().spelling_column_number(self.handle)
    }

    pub fn character_data(&self) -> &'a [u8] {
        self.resolver().character_data(self.handle)
    }

    pub fn buffer(&self) -> &'a SourceBuffer {
        self.resolver().buffer(self.handle)
    }

    pub fn buffer_data(&self) -> &'a [u8] {
        self.resolver().buffer_data(self.handle)
    }

    pub fn is_in_system_header(&self) -> bool {
        self.resolver().is_in_system_header(self.handle)
    }

    pub fn presumed_location(&self) -> PresumedPosition<'a> {
        self.resolver().presumed_location(self.handle)
    }

    /// Formats through the buffer only once the resolver has claimed the
    /// handle, since `buffer` is fatal on a handle it does not know.
    fn fmt_file_loc(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.handle.is_invalid() || self.file_key().is_invalid() {
            return write!(f, "<invalid loc>");
        }
        write!(
            f,
            "{}:{}:{}",
            self.buffer().name(),
            self.line_number(),
            self.column_number()
        )
    }
}

impl Default for ResolvedLocation<'_> {
    fn default() -> Self {
        Self::unresolved()
    }
}

impl Deref for ResolvedLocation<'_> {
    type Target = SourceHandle;

    fn deref(&self) -> &SourceHandle {
        &self.handle
    }
}

impl PartialEq for ResolvedLocation<'_> {
    /// Same raw handle and the same resolver instance.
    fn eq(&self, other: &Self) -> bool {
        let same_resolver = match (self.resolver, other.resolver) {
            (Some(a), Some(b)) => std::ptr::addr_eq(a, b),
            (None, None) => true,
            _ => false,
        };
        self.handle == other.handle && same_resolver
    }
}

impl Eq for ResolvedLocation<'_> {}

impl fmt::Debug for ResolvedLocation<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedLocation")
            .field("handle", &self.handle)
            .field(
                "resolver",
                &self.resolver.map(|r| std::ptr::from_ref(r).cast::<()>()),
            )
            .finish()
    }
}

impl fmt::Display for ResolvedLocation<'_> {
    /// `file:line:col`, with the spelling appended for macro locations.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.resolver.is_none() || self.handle.is_invalid() || self.file_key().is_invalid() {
            return write!(f, "<invalid loc>");
        }
        if self.handle.is_file_kind() {
            return self.fmt_file_loc(f);
        }
        self.instantiation_loc().fmt_file_loc(f)?;
        write!(f, " <Spelling=")?;
        self.spelling_loc().fmt_file_loc(f)?;
        write!(f, ">")
    }
}
