//! # syster-sloc
//!
//! Compact, comparable, hashable source locations for a compiler front end.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! source_map → Reference resolver: offset table, buffers, expansions, #line
//!   ↓
//! resolve    → SourceResolver trait, ResolvedLocation
//!   ↓
//! base       → Primitives (FileKey, SourceHandle, SourceSpan, PresumedPosition)
//! ```
//!
//! ## Example
//!
//! ```
//! use sloc::{SourceMap, SourceResolver, TextSize};
//!
//! let mut map = SourceMap::new();
//! let file = map.create_main_file("a.c", "int x;\nint y;\n").unwrap();
//! let loc = map.location_for(file, TextSize::from(11)).unwrap();
//!
//! assert!(loc.is_file_kind());
//! assert_eq!(map.line_number(loc), 2);
//! assert_eq!(map.resolve(loc).to_string(), "a.c:2:5");
//! ```

// ============================================================================
// MODULES (dependency order: base → resolve → source_map)
// ============================================================================

/// Foundation types: FileKey, SourceHandle, SourceSpan, PresumedPosition
pub mod base;

/// Resolver interface and handle/resolver pairing
pub mod resolve;

/// Reference resolver
pub mod source_map;

// Re-export foundation types
pub use base::{
    FileKey, HandleKind, HandleMint, LineIndex, LocationError, Persist, PresumedPosition, SentinelKey,
    SourceBuffer, SourceHandle, SourceSpan, TextSize,
};
pub use resolve::{ResolvedLocation, SourceResolver};
pub use source_map::{
    FileCharacteristic, LineDirectiveFlags, SourceMap, SourceMapConfig, SourceMapError,
};
