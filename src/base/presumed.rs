//! The user-facing, unpacked form of a location.

use super::handle::SourceHandle;

/// A location as it should be shown to the user.
///
/// "Presumed" because `#line` and GNU line markers may have renamed the file
/// or renumbered its lines. The position is always the instantiation point
/// of whatever handle it was computed from. Only a resolver produces these;
/// the filename borrows from it.
///
/// An invalid value has no filename. It shows up when the source handle was
/// invalid, or when the resolver walked off the top of the include stack.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PresumedPosition<'a> {
    filename: Option<&'a str>,
    line: u32,
    column: u32,
    include_loc: SourceHandle,
}

impl<'a> PresumedPosition<'a> {
    pub const fn new(filename: &'a str, line: u32, column: u32, include_loc: SourceHandle) -> Self {
        Self {
            filename: Some(filename),
            line,
            column,
            include_loc,
        }
    }

    pub const fn invalid() -> Self {
        Self {
            filename: None,
            line: 0,
            column: 0,
            include_loc: SourceHandle::INVALID,
        }
    }

    pub const fn is_valid(&self) -> bool {
        self.filename.is_some()
    }

    pub const fn is_invalid(&self) -> bool {
        self.filename.is_none()
    }

    /// The presumed filename. Affected by `#line`.
    pub const fn filename(&self) -> Option<&'a str> {
        self.filename
    }

    /// The presumed line. Affected by `#line`. Meaningless when invalid.
    pub const fn line(&self) -> u32 {
        self.line
    }

    /// The column. Never remapped, carried here for convenience.
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Where this file was included from; invalid for the main file.
    pub const fn include_loc(&self) -> SourceHandle {
        self.include_loc
    }
}
