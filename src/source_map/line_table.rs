//! `#line` directives and GNU line markers.

use indexmap::IndexSet;
use smol_str::SmolStr;
use text_size::TextSize;

use crate::base::{FileKey, FileKeyMap};

/// Flags carried by a line marker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineDirectiveFlags {
    /// GNU flag `3`: the following text comes from a system header.
    pub system_header: bool,
}

/// One remapping, in effect from `pos` to the next entry of the same file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct LineEntry {
    /// Start of the first renumbered line.
    pub pos: TextSize,
    /// 0-indexed physical line at `pos`.
    pub physical_line: u32,
    /// Presumed line number at `pos`.
    pub line: u32,
    pub filename: Option<usize>,
    pub system_header: bool,
}

impl LineEntry {
    /// Presumed line for a 0-indexed physical line at or after this entry.
    pub fn presumed_line(&self, physical_line: u32) -> u32 {
        self.line
            .saturating_add(physical_line.saturating_sub(self.physical_line))
    }
}

#[derive(Debug, Default)]
pub(super) struct LineTable {
    filenames: IndexSet<SmolStr>,
    entries: FileKeyMap<Vec<LineEntry>>,
}

impl LineTable {
    /// Record a remapping. A `None` filename keeps the name in effect at
    /// `pos`. A second directive at the same position replaces the first.
    pub fn add(
        &mut self,
        file: FileKey,
        pos: TextSize,
        physical_line: u32,
        line: u32,
        filename: Option<&str>,
        flags: LineDirectiveFlags,
    ) {
        let list = self.entries.entry(file).or_default();
        let idx = list.partition_point(|e| e.pos <= pos);
        let replaces = idx > 0 && list[idx - 1].pos == pos;

        // The entry in effect before this one, not the one being replaced.
        let prev = idx.checked_sub(if replaces { 2 } else { 1 });
        let filename = match filename {
            Some(name) => Some(self.filenames.insert_full(SmolStr::new(name)).0),
            None => prev.and_then(|i| list[i].filename),
        };
        let entry = LineEntry {
            pos,
            physical_line,
            line,
            filename,
            system_header: flags.system_header,
        };

        if replaces {
            list[idx - 1] = entry;
        } else {
            list.insert(idx, entry);
        }
    }

    /// The entry governing `pos`, if any directive precedes it.
    pub fn find(&self, file: FileKey, pos: TextSize) -> Option<&LineEntry> {
        let list = self.entries.get(&file)?;
        let idx = list.partition_point(|e| e.pos <= pos);
        idx.checked_sub(1).map(|i| &list[i])
    }

    pub fn filename(&self, id: usize) -> Option<&str> {
        self.filenames.get_index(id).map(SmolStr::as_str)
    }

    #[cfg(test)]
    pub fn filename_count(&self) -> usize {
        self.filenames.len()
    }
}
