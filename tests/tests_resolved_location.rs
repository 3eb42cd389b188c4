//! ResolvedLocation bound to the reference source map.

use sloc::{FileKey, ResolvedLocation, SourceHandle, SourceMap, TextSize};

const SOURCE: &str = "#define ONE 1\nint one = ONE;\n";

fn build() -> (SourceMap, FileKey) {
    let mut map = SourceMap::new();
    let file = map.create_main_file("one.c", SOURCE).unwrap();
    (map, file)
}

fn at(map: &SourceMap, file: FileKey, pos: u32) -> SourceHandle {
    map.location_for(file, TextSize::from(pos)).unwrap()
}

#[test]
fn test_file_location_queries() {
    let (map, file) = build();
    let full = map.resolve(at(&map, file, 18));

    assert!(full.has_resolver());
    assert!(full.is_file_kind());
    assert_eq!(full.file_key(), file);
    assert_eq!(full.line_number(), 2);
    assert_eq!(full.column_number(), 5);
    assert_eq!(full.instantiation_loc(), full);
    assert_eq!(full.spelling_loc(), full);
    assert_eq!(full.buffer().name(), "one.c");
    assert_eq!(full.buffer_data(), SOURCE.as_bytes());
    assert!(full.character_data().starts_with(b"one = ONE;"));
    assert!(!full.is_in_system_header());
    assert_eq!(full.to_string(), "one.c:2:5");
}

#[test]
fn test_macro_location_queries() {
    let (mut map, file) = build();
    let spelling = at(&map, file, 12);
    let use_site = at(&map, file, 24);
    let expanded = map.create_expansion(spelling, use_site, use_site, 1).unwrap();
    let full = map.resolve(expanded);

    assert!(full.is_macro_kind());
    assert_eq!(*full.instantiation_loc(), use_site);
    assert_eq!(*full.spelling_loc(), spelling);
    assert_eq!(full.instantiation_line_number(), 2);
    assert_eq!(full.instantiation_column_number(), 11);
    assert_eq!(full.spelling_line_number(), 1);
    assert_eq!(full.spelling_column_number(), 13);
    assert_eq!(full.character_data()[0], b'1');

    let presumed = full.presumed_location();
    assert_eq!(presumed.filename(), Some("one.c"));
    assert_eq!((presumed.line(), presumed.column()), (2, 11));

    assert_eq!(full.to_string(), "one.c:2:11 <Spelling=one.c:1:13>");
}

#[test]
fn test_equal_handles_from_different_maps_differ() {
    let (first, first_file) = build();
    let (second, second_file) = build();

    let a = at(&first, first_file, 3);
    let b = at(&second, second_file, 3);
    assert_eq!(a, b, "identical maps hand out identical raw handles");

    assert_ne!(first.resolve(a), second.resolve(b));
    assert_eq!(first.resolve(a), first.resolve(a));
    assert_eq!(
        ResolvedLocation::new(a, &first),
        first.resolve(b),
        "resolver identity, not handle origin, decides"
    );
}

#[test]
fn test_invalid_handle_with_resolver() {
    let (map, _) = build();
    let full = map.resolve(SourceHandle::INVALID);
    assert!(full.has_resolver());
    assert!(full.is_invalid());
    assert!(full.file_key().is_invalid());
    assert!(full.presumed_location().is_invalid());
    assert_eq!(full.to_string(), "<invalid loc>");
    assert_ne!(full, ResolvedLocation::unresolved());
}

#[test]
fn test_display_of_handle_from_another_map() {
    let (small, _) = build();
    let mut large = SourceMap::new();
    let big = large.create_main_file("big.c", "x".repeat(64)).unwrap();
    let foreign_file = at(&large, big, 50);
    let foreign_macro = large
        .create_expansion(foreign_file, foreign_file, foreign_file, 1)
        .unwrap();

    assert!(small.resolve(foreign_file).file_key().is_invalid());
    assert_eq!(small.resolve(foreign_file).to_string(), "<invalid loc>");
    assert_eq!(small.resolve(foreign_macro).to_string(), "<invalid loc>");
}

#[test]
#[should_panic(expected = "has no resolver")]
fn test_unresolved_buffer_query_panics() {
    let _ = ResolvedLocation::unresolved().buffer_data();
}
