//! Turning handles into concrete positions.
//!
//! [`SourceResolver`] is the interface the core needs from whatever owns the
//! position table. [`ResolvedLocation`] pairs a handle with the resolver that
//! can interpret it.

mod resolved;

pub use resolved::ResolvedLocation;

use crate::base::{FileKey, PresumedPosition, SourceBuffer, SourceHandle};

/// Owner of the position table, file buffers, include stack and macro
/// expansion records.
///
/// Line and column numbers are 1-based. The plain `line_number` and
/// `column_number` describe the characters a handle physically points at,
/// which for a macro handle is its spelling.
///
/// Implementations are single-writer; concurrent use must be synchronized
/// by the caller.
pub trait SourceResolver {
    /// The table entry containing `loc`. Invalid key for an invalid handle.
    fn file_key(&self, loc: SourceHandle) -> FileKey;

    /// Where a macro handle was expanded; file handles map to themselves.
    fn instantiation_loc(&self, loc: SourceHandle) -> SourceHandle;

    /// Where the characters of a macro handle were written; file handles
    /// map to themselves.
    fn spelling_loc(&self, loc: SourceHandle) -> SourceHandle;

    fn line_number(&self, loc: SourceHandle) -> u32;

    fn column_number(&self, loc: SourceHandle) -> u32;

    fn instantiation_line_number(&self, loc: SourceHandle) -> u32 {
        self.line_number(self.instantiation_loc(loc))
    }

    fn instantiation_column_number(&self, loc: SourceHandle) -> u32 {
        self.column_number(self.instantiation_loc(loc))
    }

    fn spelling_line_number(&self, loc: SourceHandle) -> u32 {
        self.line_number(self.spelling_loc(loc))
    }

    fn spelling_column_number(&self, loc: SourceHandle) -> u32 {
        self.column_number(self.spelling_loc(loc))
    }

    /// The buffer tail starting at the character `loc` spells.
    fn character_data(&self, loc: SourceHandle) -> &[u8];

    /// The buffer holding the character `loc` spells.
    fn buffer(&self, loc: SourceHandle) -> &SourceBuffer;

    /// Start and end of that buffer, as one slice.
    fn buffer_data(&self, loc: SourceHandle) -> &[u8] {
        self.buffer(loc).bytes()
    }

    fn is_in_system_header(&self, loc: SourceHandle) -> bool;

    /// The location as the user should see it, after `#line` remapping.
    fn presumed_location(&self, loc: SourceHandle) -> PresumedPosition<'_>;
}
