//! A begin/end pair of source handles.

use super::handle::SourceHandle;

/// A pair of handles marking the begin and end of some construct.
///
/// The pair is taken as given: `begin` need not precede `end`, and a single
/// point (`begin == end`) is fine. Merging, containment and ordering checks
/// belong to whoever builds the span.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SourceSpan {
    begin: SourceHandle,
    end: SourceHandle,
}

impl SourceSpan {
    pub const fn new(begin: SourceHandle, end: SourceHandle) -> Self {
        Self { begin, end }
    }

    /// A degenerate span covering one position.
    pub const fn point(loc: SourceHandle) -> Self {
        Self::new(loc, loc)
    }

    pub const fn begin(&self) -> SourceHandle {
        self.begin
    }

    pub const fn end(&self) -> SourceHandle {
        self.end
    }

    pub fn set_begin(&mut self, begin: SourceHandle) {
        self.begin = begin;
    }

    pub fn set_end(&mut self, end: SourceHandle) {
        self.end = end;
    }

    /// Both endpoints are valid.
    pub const fn is_valid(&self) -> bool {
        self.begin.is_valid() && self.end.is_valid()
    }
}

impl From<SourceHandle> for SourceSpan {
    fn from(loc: SourceHandle) -> Self {
        Self::point(loc)
    }
}
