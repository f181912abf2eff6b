//! Integration tests exercising the codec end to end over a real
//! `std::io::Cursor` transport, rather than unit-testing individual wire
//! helpers in isolation.

use std::io::Cursor;

use compact_codec::protocol::CompactProtocol;
use compact_codec::types::{MessageType, TypeKind};
use compact_codec::{Config, Error};

fn roundtrip() -> CompactProtocol<Cursor<Vec<u8>>> {
    CompactProtocol::new(Cursor::new(Vec::new()))
}

#[test]
fn full_message_roundtrip_with_mixed_field_types() {
    let mut p = roundtrip();
    p.write_message_begin("fetch", MessageType::Call, 7).unwrap();
    p.write_struct_begin("FetchArgs").unwrap();

    p.write_field_begin("id", TypeKind::I64, 1).unwrap();
    p.write_i64(-42).unwrap();
    p.write_field_end().unwrap();

    p.write_field_begin("name", TypeKind::STRING, 2).unwrap();
    p.write_string(b"widget").unwrap();
    p.write_field_end().unwrap();

    p.write_field_begin("active", TypeKind::BOOL, 3).unwrap();
    p.write_bool(false).unwrap();
    p.write_field_end().unwrap();

    p.write_field_begin("tags", TypeKind::LIST, 4).unwrap();
    p.write_list_begin(TypeKind::STRING, 2).unwrap();
    p.write_string(b"a").unwrap();
    p.write_string(b"b").unwrap();
    p.write_list_end().unwrap();
    p.write_field_end().unwrap();

    p.write_field_stop().unwrap();
    p.write_struct_end().unwrap();
    p.write_message_end().unwrap();

    let bytes = p.into_inner().into_inner();
    let mut r = CompactProtocol::new(Cursor::new(bytes));

    let (name, message_type, seqid) = r.read_message_begin().unwrap();
    assert_eq!(name, "fetch");
    assert_eq!(message_type, MessageType::Call);
    assert_eq!(seqid, 7);

    r.read_struct_begin().unwrap();

    let (kind, fid) = r.read_field_begin().unwrap().unwrap();
    assert_eq!((kind, fid), (TypeKind::I64, 1));
    assert_eq!(r.read_i64().unwrap(), -42);
    r.read_field_end().unwrap();

    let (kind, fid) = r.read_field_begin().unwrap().unwrap();
    assert_eq!((kind, fid), (TypeKind::STRING, 2));
    assert_eq!(r.read_string().unwrap(), b"widget");
    r.read_field_end().unwrap();

    let (kind, fid) = r.read_field_begin().unwrap().unwrap();
    assert_eq!((kind, fid), (TypeKind::BOOL, 3));
    assert!(!r.read_bool().unwrap());
    r.read_field_end().unwrap();

    let (kind, fid) = r.read_field_begin().unwrap().unwrap();
    assert_eq!((kind, fid), (TypeKind::LIST, 4));
    let (etype, size) = r.read_list_begin().unwrap();
    assert_eq!(etype, TypeKind::STRING);
    assert_eq!(size, 2);
    assert_eq!(r.read_string().unwrap(), b"a");
    assert_eq!(r.read_string().unwrap(), b"b");
    r.read_list_end().unwrap();
    r.read_field_end().unwrap();

    assert!(r.read_field_begin().unwrap().is_none());
    r.read_struct_end().unwrap();
    r.read_message_end().unwrap();
}

#[test]
fn map_roundtrip_i32_to_string() {
    let mut p = roundtrip();
    p.write_struct_begin("M").unwrap();
    p.write_field_begin("m", TypeKind::MAP, 1).unwrap();
    p.write_map_begin(TypeKind::I32, TypeKind::STRING, 2).unwrap();
    p.write_i32(1).unwrap();
    p.write_string(b"one").unwrap();
    p.write_i32(2).unwrap();
    p.write_string(b"two").unwrap();
    p.write_map_end().unwrap();
    p.write_field_stop().unwrap();
    p.write_struct_end().unwrap();

    let bytes = p.into_inner().into_inner();
    let mut r = CompactProtocol::new(Cursor::new(bytes));
    r.read_struct_begin().unwrap();
    let (kind, fid) = r.read_field_begin().unwrap().unwrap();
    assert_eq!((kind, fid), (TypeKind::MAP, 1));
    let (key, value, size) = r.read_map_begin().unwrap();
    assert_eq!((key, value, size), (TypeKind::I32, TypeKind::STRING, 2));
    assert_eq!(r.read_i32().unwrap(), 1);
    assert_eq!(r.read_string().unwrap(), b"one");
    assert_eq!(r.read_i32().unwrap(), 2);
    assert_eq!(r.read_string().unwrap(), b"two");
    r.read_map_end().unwrap();
    assert!(r.read_field_begin().unwrap().is_none());
    r.read_struct_end().unwrap();
}

#[test]
fn empty_map_roundtrip_never_reads_a_type_byte() {
    let mut w = roundtrip();
    w.write_struct_begin("S").unwrap();
    w.write_field_begin("m", TypeKind::MAP, 1).unwrap();
    w.write_map_begin(TypeKind::STRING, TypeKind::I32, 0).unwrap();
    w.write_map_end().unwrap();
    w.write_field_stop().unwrap();
    w.write_struct_end().unwrap();
    let bytes = w.into_inner().into_inner();

    let mut r = CompactProtocol::new(Cursor::new(bytes));
    r.read_struct_begin().unwrap();
    let (kind, fid) = r.read_field_begin().unwrap().unwrap();
    assert_eq!((kind, fid), (TypeKind::MAP, 1));
    let (_, _, size) = r.read_map_begin().unwrap();
    assert_eq!(size, 0);
    r.read_map_end().unwrap();
    assert!(r.read_field_begin().unwrap().is_none());
    r.read_struct_end().unwrap();
}

#[test]
fn bad_protocol_id_surfaces_as_bad_version() {
    let mut r = CompactProtocol::new(Cursor::new(vec![0x00, 0x21, 0x00, 0x00]));
    let err = r.read_message_begin().unwrap_err();
    assert!(matches!(err, Error::BadVersion(_)));
}

#[test]
fn oversized_string_rejected_by_configured_ceiling() {
    let small = Config { max_size: 4 };
    let mut w = CompactProtocol::new(Cursor::new(Vec::new()));
    w.write_struct_begin("S").unwrap();
    w.write_field_begin("s", TypeKind::STRING, 1).unwrap();
    w.write_string(b"this string is too long").unwrap();
    w.write_field_stop().unwrap();
    w.write_struct_end().unwrap();
    let bytes = w.into_inner().into_inner();

    let mut r = CompactProtocol::with_config(Cursor::new(bytes), small);
    r.read_struct_begin().unwrap();
    let (_, _) = r.read_field_begin().unwrap().unwrap();
    let err = r.read_string().unwrap_err();
    assert!(matches!(err, Error::SizeLimit { .. }));
}

#[test]
fn calling_write_field_begin_before_struct_begin_is_rejected() {
    let mut p = roundtrip();
    let err = p.write_field_begin("x", TypeKind::I32, 1).unwrap_err();
    assert!(matches!(err, Error::StateViolation { op: "write_field_begin", .. }));
}

#[test]
fn transport_underrun_surfaces_as_transport_error() {
    // A header claiming a field follows, but the stream ends before the
    // long-form fid varint.
    let mut r = CompactProtocol::new(Cursor::new(vec![0x05]));
    r.read_struct_begin().unwrap();
    let err = r.read_field_begin().unwrap_err();
    assert!(matches!(err, Error::Transport(_)));
}

#[test]
fn randomized_struct_fields_roundtrip() {
    use rand::Rng;

    let mut rng = rand::thread_rng();
    let values: Vec<i32> = (0..50).map(|_| rng.gen()).collect();

    let mut p = roundtrip();
    p.write_struct_begin("Bag").unwrap();
    for (i, v) in values.iter().enumerate() {
        let fid = (i as i16) * 3 + 1;
        p.write_field_begin("v", TypeKind::I32, fid).unwrap();
        p.write_i32(*v).unwrap();
        p.write_field_end().unwrap();
    }
    p.write_field_stop().unwrap();
    p.write_struct_end().unwrap();

    let bytes = p.into_inner().into_inner();
    let mut r = CompactProtocol::new(Cursor::new(bytes));
    r.read_struct_begin().unwrap();
    for v in &values {
        let (kind, _fid) = r.read_field_begin().unwrap().unwrap();
        assert_eq!(kind, TypeKind::I32);
        assert_eq!(r.read_i32().unwrap(), *v);
        r.read_field_end().unwrap();
    }
    assert!(r.read_field_begin().unwrap().is_none());
    r.read_struct_end().unwrap();
}
