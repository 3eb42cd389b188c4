//! Source map options

use crate::base::SourceHandle;

/// Address-space options for a [`SourceMap`](super::SourceMap)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceMapConfig {
    /// Highest offset the map may hand out. Anything above
    /// [`SourceHandle::MAX_OFFSET`] is treated as `MAX_OFFSET`.
    pub offset_limit: u32,
    /// Offset of the first entry. Clamped to at least 1, since offset 0 is
    /// the invalid handle.
    pub first_offset: u32,
}

impl Default for SourceMapConfig {
    fn default() -> Self {
        Self {
            offset_limit: SourceHandle::MAX_OFFSET,
            first_offset: 1,
        }
    }
}

impl SourceMapConfig {
    /// Limit the address space, e.g. to exercise exhaustion in tests
    pub fn with_offset_limit(mut self, limit: u32) -> Self {
        self.offset_limit = limit.min(SourceHandle::MAX_OFFSET);
        self
    }

    /// `offset_limit`, capped at what a handle can encode.
    pub(super) fn effective_limit(&self) -> u32 {
        self.offset_limit.min(SourceHandle::MAX_OFFSET)
    }

    pub(super) fn start_offset(&self) -> u32 {
        self.first_offset.max(1)
    }
}
