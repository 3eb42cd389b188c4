//! Reference resolver: an in-memory position table.
//!
//! Every entry of a [`SourceMap`] claims a contiguous run of offsets in one
//! global address space:
//!
//! ```text
//! offset 0    reserved (invalid handle)
//! [1, n+1]    main.c, n bytes plus an end-of-buffer slot
//! [n+2, ..]   header.h included from main.c
//! [.., ..]    a macro expansion, one offset per expanded token byte
//! ```
//!
//! A file handle's offset minus its entry's start is a byte position in the
//! buffer. A macro handle's offset minus its entry's start is a delta into
//! the spelling of the expanded token.

mod config;
mod error;
mod line_table;

pub use config::SourceMapConfig;
pub use error::SourceMapError;
pub use line_table::LineDirectiveFlags;

use std::sync::Arc;

use smol_str::SmolStr;
use text_size::TextSize;
use tracing::{debug, trace, warn};

use crate::base::{FileKey, HandleKind, HandleMint, PresumedPosition, SourceBuffer, SourceHandle};
use crate::resolve::{ResolvedLocation, SourceResolver};

use line_table::LineTable;

/// Whether a file is a user file or a system header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FileCharacteristic {
    #[default]
    User,
    System,
}

#[derive(Debug)]
struct FileEntry {
    buffer: Arc<SourceBuffer>,
    include_loc: SourceHandle,
    characteristic: FileCharacteristic,
}

#[derive(Debug)]
struct ExpansionEntry {
    /// Always a file handle: nested spellings are flattened on creation.
    spelling: SourceHandle,
    inst_start: SourceHandle,
    inst_end: SourceHandle,
}

#[derive(Debug)]
enum EntryKind {
    File(FileEntry),
    Expansion(ExpansionEntry),
}

#[derive(Debug)]
struct SlocEntry {
    start: u32,
    len: u32,
    kind: EntryKind,
}

impl SlocEntry {
    fn handle_kind(&self) -> HandleKind {
        match self.kind {
            EntryKind::File(_) => HandleKind::File,
            EntryKind::Expansion(_) => HandleKind::Macro,
        }
    }

    fn contains(&self, offset: u32) -> bool {
        offset >= self.start && offset - self.start < self.len
    }
}

/// Owns file buffers, include relationships, macro expansion records and
/// line directives, and resolves [`SourceHandle`]s against them.
///
/// Mutation takes `&mut self` and queries take `&self`; share a map across
/// threads only behind external synchronization.
#[derive(Debug)]
pub struct SourceMap {
    config: SourceMapConfig,
    mint: HandleMint,
    entries: Vec<SlocEntry>,
    next_offset: u32,
    main_file: Option<FileKey>,
    line_table: LineTable,
}

impl Default for SourceMap {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceMap {
    pub fn new() -> Self {
        Self::with_config(SourceMapConfig::default())
    }

    pub fn with_config(config: SourceMapConfig) -> Self {
        Self {
            next_offset: config.start_offset(),
            config,
            mint: HandleMint::new(),
            entries: Vec::new(),
            main_file: None,
            line_table: LineTable::default(),
        }
    }

    pub fn config(&self) -> &SourceMapConfig {
        &self.config
    }

    /// Number of table entries (files and expansions).
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// The first file created without an include location.
    pub fn main_file(&self) -> Option<FileKey> {
        self.main_file
    }

    /// Wrap a handle together with this map.
    pub fn resolve(&self, loc: SourceHandle) -> ResolvedLocation<'_> {
        ResolvedLocation::new(loc, self)
    }

    // ========================================================================
    // BUILDING
    // ========================================================================

    /// Create the top-level file of a translation unit.
    pub fn create_main_file(
        &mut self,
        name: impl Into<SmolStr>,
        text: impl Into<String>,
    ) -> Result<FileKey, SourceMapError> {
        self.create_file(name, text, SourceHandle::INVALID, FileCharacteristic::User)
    }

    /// Create an entry for one inclusion of a file.
    pub fn create_file(
        &mut self,
        name: impl Into<SmolStr>,
        text: impl Into<String>,
        include_loc: SourceHandle,
        characteristic: FileCharacteristic,
    ) -> Result<FileKey, SourceMapError> {
        let name = name.into();
        let text = text.into();
        if u32::try_from(text.len()).is_err() {
            return Err(SourceMapError::FileTooLarge {
                name: name.to_string(),
                len: text.len(),
            });
        }
        let buffer = Arc::new(SourceBuffer::new(name, text));
        self.create_file_for_buffer(buffer, include_loc, characteristic)
    }

    /// Create an entry for another inclusion of an existing buffer.
    pub fn create_file_for_buffer(
        &mut self,
        buffer: Arc<SourceBuffer>,
        include_loc: SourceHandle,
        characteristic: FileCharacteristic,
    ) -> Result<FileKey, SourceMapError> {
        let len = u32::try_from(buffer.bytes().len()).map_err(|_| SourceMapError::FileTooLarge {
            name: buffer.name().to_string(),
            len: buffer.bytes().len(),
        })?;
        let key = self.next_key()?;
        // One extra slot so the end of the buffer is addressable.
        let start = self.reserve(u64::from(len) + 1)?;

        trace!(
            "[SOURCE_MAP] file {} '{}' at {:#x}..={:#x}",
            key,
            buffer.name(),
            start,
            start + len
        );

        self.entries.push(SlocEntry {
            start,
            len: len + 1,
            kind: EntryKind::File(FileEntry {
                buffer,
                include_loc,
                characteristic,
            }),
        });
        if include_loc.is_invalid() && self.main_file.is_none() {
            self.main_file = Some(key);
        }
        Ok(key)
    }

    /// Record the expansion of one token of `token_len` bytes spelled at
    /// `spelling` and expanded at `inst_start..inst_end`.
    ///
    /// Returns the macro handle of the token's first byte; use
    /// [`expansion_loc`](Self::expansion_loc) for the rest.
    pub fn create_expansion(
        &mut self,
        spelling: SourceHandle,
        inst_start: SourceHandle,
        inst_end: SourceHandle,
        token_len: u32,
    ) -> Result<SourceHandle, SourceMapError> {
        let token_len = token_len.max(1);
        let spelling = self
            .try_spelling(spelling)
            .ok_or(SourceMapError::InvalidLocation(spelling))?;
        let (_, file, pos) = self
            .decomposed_file(spelling)
            .ok_or(SourceMapError::InvalidLocation(spelling))?;
        // Every byte of the token must lie within the file.
        let spelled_end = u64::from(u32::from(pos)) + u64::from(token_len);
        if spelled_end > u64::from(u32::from(file.buffer.len())) {
            return Err(SourceMapError::InvalidLocation(spelling));
        }
        if self.lookup(inst_start).is_none() {
            return Err(SourceMapError::InvalidLocation(inst_start));
        }

        let key = self.next_key()?;
        let start = self.next_offset;
        // The last offset of the run has to be mintable as well.
        self.mint.try_macro(start.saturating_add(token_len - 1))?;
        let start = self.reserve(u64::from(token_len))?;
        let loc = self.mint.try_macro(start)?;

        trace!(
            "[SOURCE_MAP] expansion {} of {:?} at {:?}",
            key, spelling, inst_start
        );

        self.entries.push(SlocEntry {
            start,
            len: token_len,
            kind: EntryKind::Expansion(ExpansionEntry {
                spelling,
                inst_start,
                inst_end,
            }),
        });
        Ok(loc)
    }

    /// The handle `index` bytes into the expansion starting at `expansion`.
    pub fn expansion_loc(
        &self,
        expansion: SourceHandle,
        index: u32,
    ) -> Result<SourceHandle, SourceMapError> {
        let (_, entry) = self
            .lookup(expansion)
            .filter(|(_, e)| matches!(e.kind, EntryKind::Expansion(_)))
            .ok_or(SourceMapError::InvalidLocation(expansion))?;
        let offset = expansion.offset().saturating_add(index);
        if !entry.contains(offset) {
            return Err(SourceMapError::InvalidLocation(expansion));
        }
        Ok(self.mint.try_macro(offset)?)
    }

    /// Apply a `#line` directive (or GNU line marker) found at `loc`.
    ///
    /// The line after the directive gets number `line`. A `None` filename
    /// keeps whatever name was in effect.
    pub fn add_line_directive(
        &mut self,
        loc: SourceHandle,
        line: u32,
        filename: Option<&str>,
        flags: LineDirectiveFlags,
    ) -> Result<(), SourceMapError> {
        let (key, file, pos) = self
            .decomposed_file(loc)
            .ok_or(SourceMapError::InvalidLocation(loc))?;
        let lines = file.buffer.lines();
        let physical_line = lines.line_of(pos) + 1;
        // A directive on the last line has nothing after it to renumber.
        let Some(anchor) = lines.line_start(physical_line) else {
            debug!(
                "[SOURCE_MAP] line directive in {} on its last line ignored",
                key
            );
            return Ok(());
        };

        debug!(
            "[SOURCE_MAP] line directive in {}: physical line {} is now {:?}:{}",
            key,
            physical_line + 1,
            filename,
            line
        );

        self.line_table.add(
            key,
            anchor,
            physical_line as u32,
            line,
            filename,
            flags,
        );
        Ok(())
    }

    fn next_key(&self) -> Result<FileKey, SourceMapError> {
        FileKey::from_index(self.entries.len())
            .ok_or_else(|| SourceMapError::exhausted(self.next_offset, 1u32))
    }

    /// Claim `needed` offsets and return the first one.
    fn reserve(&mut self, needed: u64) -> Result<u32, SourceMapError> {
        let start = self.next_offset;
        let last = u64::from(start) + needed.max(1) - 1;
        let next = u32::try_from(last + 1)
            .ok()
            .filter(|_| last <= u64::from(self.config.effective_limit()));
        let Some(next) = next else {
            warn!(
                "Source map ran out of locations: {} offsets requested at {:#x}",
                needed, start
            );
            return Err(SourceMapError::exhausted(start, needed));
        };
        self.next_offset = next;
        Ok(start)
    }

    // ========================================================================
    // ADDRESSING
    // ========================================================================

    /// The handle for byte `pos` of `file`. `pos` may equal the file length.
    pub fn location_for(&self, file: FileKey, pos: TextSize) -> Result<SourceHandle, SourceMapError> {
        let (entry, file_entry) = self.file_entry(file)?;
        let len = file_entry.buffer.len();
        if pos > len {
            return Err(SourceMapError::PositionOutOfBounds {
                file,
                pos: pos.into(),
                len: len.into(),
            });
        }
        Ok(self.mint.try_file(entry.start + u32::from(pos))?)
    }

    /// The handle for the first byte of `file`.
    pub fn file_start(&self, file: FileKey) -> Result<SourceHandle, SourceMapError> {
        self.location_for(file, TextSize::from(0))
    }

    /// Split a handle into its entry and the position within it.
    ///
    /// For file handles the position is a byte offset into the buffer; for
    /// macro handles it is the delta into the expanded token.
    pub fn decomposed_loc(&self, loc: SourceHandle) -> Option<(FileKey, TextSize)> {
        let (key, entry) = self.lookup(loc)?;
        Some((key, TextSize::from(loc.offset() - entry.start)))
    }

    pub fn file_name(&self, file: FileKey) -> Option<&str> {
        self.file_entry(file).ok().map(|(_, f)| f.buffer.name())
    }

    pub fn file_buffer(&self, file: FileKey) -> Option<&Arc<SourceBuffer>> {
        self.file_entry(file).ok().map(|(_, f)| &f.buffer)
    }

    /// Where `file` was included from; invalid for a main file.
    pub fn include_loc(&self, file: FileKey) -> Option<SourceHandle> {
        self.file_entry(file).ok().map(|(_, f)| f.include_loc)
    }

    /// The instantiation range recorded for an expansion entry.
    pub fn expansion_range(&self, loc: SourceHandle) -> Option<(SourceHandle, SourceHandle)> {
        match self.lookup(loc)?.1.kind {
            EntryKind::Expansion(ref e) => Some((e.inst_start, e.inst_end)),
            EntryKind::File(_) => None,
        }
    }

    fn file_entry(&self, file: FileKey) -> Result<(&SlocEntry, &FileEntry), SourceMapError> {
        let entry = file
            .index()
            .and_then(|i| self.entries.get(i))
            .ok_or(SourceMapError::UnknownFile(file))?;
        match entry.kind {
            EntryKind::File(ref f) => Ok((entry, f)),
            EntryKind::Expansion(_) => Err(SourceMapError::UnknownFile(file)),
        }
    }

    /// The entry containing `loc`, if its kind matches the handle's.
    fn lookup(&self, loc: SourceHandle) -> Option<(FileKey, &SlocEntry)> {
        let (kind, offset) = loc.decode()?;
        let idx = self
            .entries
            .partition_point(|e| e.start <= offset)
            .checked_sub(1)?;
        let entry = &self.entries[idx];
        if !entry.contains(offset) || entry.handle_kind() != kind {
            return None;
        }
        Some((FileKey::from_index(idx)?, entry))
    }

    fn decomposed_file(&self, loc: SourceHandle) -> Option<(FileKey, &FileEntry, TextSize)> {
        let (key, entry) = self.lookup(loc)?;
        match entry.kind {
            EntryKind::File(ref f) => Some((key, f, TextSize::from(loc.offset() - entry.start))),
            EntryKind::Expansion(_) => None,
        }
    }

    fn try_instantiation(&self, loc: SourceHandle) -> Option<SourceHandle> {
        let mut current = loc;
        while current.is_macro_kind() {
            match self.lookup(current)?.1.kind {
                EntryKind::Expansion(ref e) => current = e.inst_start,
                EntryKind::File(_) => return None,
            }
        }
        Some(current)
    }

    fn try_spelling(&self, loc: SourceHandle) -> Option<SourceHandle> {
        if loc.is_file_kind() {
            return Some(loc);
        }
        let (_, entry) = self.lookup(loc)?;
        match entry.kind {
            EntryKind::Expansion(ref e) => {
                let delta = loc.offset() - entry.start;
                e.spelling.checked_with_file_offset(delta as i32).ok()
            }
            EntryKind::File(_) => None,
        }
    }

    /// The file and byte a handle spells, or a fatal error.
    fn expect_spelled(&self, loc: SourceHandle) -> (&FileEntry, TextSize) {
        match self.try_spelling(loc).and_then(|l| self.decomposed_file(l)) {
            Some((_, file, pos)) => (file, pos),
            None => panic!("{loc:?} does not resolve to a file in this source map"),
        }
    }

    /// 0-indexed line and column of the spelled character.
    fn spelled_line_col(&self, loc: SourceHandle) -> Option<(u32, u32)> {
        let spelled = self.try_spelling(loc)?;
        let (_, file, pos) = self.decomposed_file(spelled)?;
        Some(file.buffer.lines().line_col(pos))
    }
}

impl SourceResolver for SourceMap {
    fn file_key(&self, loc: SourceHandle) -> FileKey {
        self.lookup(loc).map(|(key, _)| key).unwrap_or_default()
    }

    fn instantiation_loc(&self, loc: SourceHandle) -> SourceHandle {
        self.try_instantiation(loc).unwrap_or_default()
    }

    fn spelling_loc(&self, loc: SourceHandle) -> SourceHandle {
        self.try_spelling(loc).unwrap_or_default()
    }

    fn line_number(&self, loc: SourceHandle) -> u32 {
        self.spelled_line_col(loc).map_or(0, |(line, _)| line + 1)
    }

    fn column_number(&self, loc: SourceHandle) -> u32 {
        self.spelled_line_col(loc).map_or(0, |(_, col)| col + 1)
    }

    fn character_data(&self, loc: SourceHandle) -> &[u8] {
        let (file, pos) = self.expect_spelled(loc);
        file.buffer.data_from(pos)
    }

    fn buffer(&self, loc: SourceHandle) -> &SourceBuffer {
        &self.expect_spelled(loc).0.buffer
    }

    fn is_in_system_header(&self, loc: SourceHandle) -> bool {
        let Some((key, file, pos)) = self
            .try_instantiation(loc)
            .and_then(|l| self.decomposed_file(l))
        else {
            return false;
        };
        file.characteristic == FileCharacteristic::System
            || self
                .line_table
                .find(key, pos)
                .is_some_and(|entry| entry.system_header)
    }

    fn presumed_location(&self, loc: SourceHandle) -> PresumedPosition<'_> {
        let Some((key, file, pos)) = self
            .try_instantiation(loc)
            .and_then(|l| self.decomposed_file(l))
        else {
            return PresumedPosition::invalid();
        };

        let (physical_line, col) = file.buffer.lines().line_col(pos);
        let mut filename = file.buffer.name();
        let mut line = physical_line + 1;

        if let Some(entry) = self.line_table.find(key, pos) {
            line = entry.presumed_line(physical_line);
            if let Some(name) = entry.filename.and_then(|id| self.line_table.filename(id)) {
                filename = name;
            }
        }

        PresumedPosition::new(filename, line, col + 1, file.include_loc)
    }
}
