//! Value semantics of handles, keys and spans.

use std::io::Cursor;

use rstest::rstest;
use sloc::base::FileKeySet;
use sloc::{
    FileCharacteristic, FileKey, Persist, SentinelKey, SourceHandle, SourceMap, SourceSpan,
};

fn loc(raw: u32) -> SourceHandle {
    SourceHandle::from_raw_encoding(raw)
}

// =============================================================================
// Raw encoding
// =============================================================================

#[rstest]
#[case(0)]
#[case(1)]
#[case(15)]
#[case(SourceHandle::MAX_OFFSET)]
#[case(SourceHandle::KIND_BIT)]
#[case(SourceHandle::KIND_BIT | 42)]
#[case(u32::MAX - 1)]
#[case(u32::MAX)]
fn test_raw_encoding_round_trip(#[case] raw: u32) {
    let handle = loc(raw);
    assert_eq!(handle.raw_encoding(), raw);
    assert_eq!(SourceHandle::from_raw_encoding(handle.raw_encoding()), handle);
}

#[rstest]
#[case(0)]
#[case(7)]
#[case(SourceHandle::KIND_BIT | 7)]
#[case(u32::MAX)]
fn test_persist_round_trip(#[case] raw: u32) {
    let handle = loc(raw);
    let mut buf = Vec::new();
    handle.write(&mut buf).unwrap();
    assert_eq!(buf.len(), 4);

    let back = SourceHandle::read(&mut Cursor::new(buf)).unwrap();
    assert_eq!(back, handle);
}

#[test]
fn test_default_handle_is_invalid() {
    let handle = SourceHandle::default();
    assert!(handle.is_invalid());
    assert!(!handle.is_valid());
    assert_eq!(handle.raw_encoding(), 0);
}

// =============================================================================
// Kind discrimination
// =============================================================================

#[rstest]
#[case(1, true)]
#[case(SourceHandle::MAX_OFFSET, true)]
#[case(SourceHandle::KIND_BIT, false)]
#[case(SourceHandle::KIND_BIT | 1, false)]
#[case(u32::MAX, false)]
fn test_exactly_one_kind(#[case] raw: u32, #[case] is_file: bool) {
    let handle = loc(raw);
    assert!(handle.is_valid());
    assert_eq!(handle.is_file_kind(), is_file);
    assert_eq!(handle.is_macro_kind(), !is_file);
    assert_ne!(handle.is_file_kind(), handle.is_macro_kind());
}

// =============================================================================
// Offset arithmetic
// =============================================================================

#[test]
fn test_with_file_offset_stays_file_kind() {
    let handle = loc(5).with_file_offset(10);
    assert_eq!(handle.raw_encoding(), 15);
    assert!(handle.is_file_kind());
}

#[test]
fn test_checked_offset_refuses_to_reach_kind_bit() {
    let top = loc(SourceHandle::MAX_OFFSET);
    assert!(top.checked_with_file_offset(1).is_err());
    assert!(loc(0).checked_with_file_offset(i32::MAX).is_ok());
    assert!(loc(1).checked_with_file_offset(i32::MAX).is_err());
}

#[test]
#[should_panic(expected = "invalid location")]
fn test_with_file_offset_panics_instead_of_turning_macro() {
    let _ = loc(SourceHandle::MAX_OFFSET).with_file_offset(1);
}

// =============================================================================
// Ordering
// =============================================================================

#[rstest]
#[case(0, 1)]
#[case(1, 2)]
#[case(15, SourceHandle::KIND_BIT)]
#[case(SourceHandle::KIND_BIT, u32::MAX)]
#[case(9, 9)]
fn test_handle_order_is_raw_order(#[case] a: u32, #[case] b: u32) {
    let (x, y) = (loc(a), loc(b));
    assert_eq!(x.cmp(&y), a.cmp(&b));
    assert!(!(x < y && y < x));

    let relations = [x < y, x == y, x > y];
    assert_eq!(relations.iter().filter(|&&r| r).count(), 1);
}

#[test]
fn test_sorting_and_dedup() {
    let mut handles = vec![loc(30), loc(SourceHandle::KIND_BIT | 1), loc(2), loc(30)];
    handles.sort();
    handles.dedup();
    assert_eq!(
        handles,
        vec![loc(2), loc(30), loc(SourceHandle::KIND_BIT | 1)]
    );
}

#[test]
fn test_file_key_order() {
    let mut map = SourceMap::new();
    let a = map.create_main_file("a.c", "").unwrap();
    let b = map
        .create_file("b.h", "", SourceHandle::INVALID, FileCharacteristic::User)
        .unwrap();

    assert!(a < b);
    assert!(a <= b && b >= a);
    assert!(b > a);
    assert_eq!(a.cmp(&b), a.hash_value().cmp(&b.hash_value()));
    assert!(FileKey::default().is_invalid());
}

// =============================================================================
// Sentinels
// =============================================================================

#[test]
fn test_sentinels_distinct_from_allocated_keys() {
    let mut map = SourceMap::new();
    let main = map.create_main_file("main.c", "x").unwrap();
    let include = map.file_start(main).unwrap();
    let mut keys = FileKeySet::from_iter([main]);
    for i in 0..256 {
        let key = map
            .create_file(format!("f{i}.h"), "x", include, FileCharacteristic::User)
            .unwrap();
        assert_ne!(key, FileKey::empty_key());
        assert_ne!(key, FileKey::tombstone_key());
        assert!(keys.insert(key), "{key:?} allocated twice");
    }
    assert_ne!(FileKey::empty_key(), FileKey::tombstone_key());
    assert_eq!(FileKey::tombstone_key(), FileKey::sentinel());
}

// =============================================================================
// Spans
// =============================================================================

#[rstest]
#[case(0, 0, false)]
#[case(5, 0, false)]
#[case(0, 5, false)]
#[case(5, 9, true)]
#[case(9, 5, true)]
#[case(5, 5, true)]
fn test_span_validity(#[case] begin: u32, #[case] end: u32, #[case] valid: bool) {
    let span = SourceSpan::new(loc(begin), loc(end));
    assert_eq!(span.is_valid(), valid);
    assert_eq!(span.is_valid(), loc(begin).is_valid() && loc(end).is_valid());
}

#[test]
fn test_span_persist_round_trip() {
    let span = SourceSpan::new(loc(40), loc(SourceHandle::KIND_BIT | 3));
    let mut buf = Vec::new();
    span.write(&mut buf).unwrap();
    assert_eq!(buf.len(), 8);
    assert_eq!(SourceSpan::read(&mut Cursor::new(buf)).unwrap(), span);
}
