//! Encodes a small struct to a byte buffer and decodes it back, printing
//! each field as it is read. Run with `--hex` to dump the encoded bytes
//! instead.

use clap::Parser;
use std::io::Cursor;

use compact_codec::protocol::CompactProtocol;
use compact_codec::types::{MessageType, TypeKind};

#[derive(Parser)]
#[command(about = "Compact Protocol encode/decode demo")]
struct Args {
    /// Print the encoded message as hex instead of decoding it.
    #[arg(long)]
    hex: bool,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let mut p = CompactProtocol::new(Cursor::new(Vec::new()));
    p.write_message_begin("describe", MessageType::Call, 1).unwrap();
    p.write_struct_begin("DescribeArgs").unwrap();

    p.write_field_begin("id", TypeKind::I32, 1).unwrap();
    p.write_i32(150).unwrap();
    p.write_field_end().unwrap();

    p.write_field_begin("verbose", TypeKind::BOOL, 2).unwrap();
    p.write_bool(true).unwrap();
    p.write_field_end().unwrap();

    p.write_field_begin("tags", TypeKind::LIST, 3).unwrap();
    p.write_list_begin(TypeKind::STRING, 2).unwrap();
    p.write_string(b"alpha").unwrap();
    p.write_string(b"beta").unwrap();
    p.write_list_end().unwrap();
    p.write_field_end().unwrap();

    p.write_field_stop().unwrap();
    p.write_struct_end().unwrap();
    p.write_message_end().unwrap();

    let bytes = p.into_inner().into_inner();

    if args.hex {
        println!("{}", bytes.iter().map(|b| format!("{b:02x}")).collect::<Vec<_>>().join(" "));
        return;
    }

    let mut r = CompactProtocol::new(Cursor::new(bytes));
    let (name, message_type, seqid) = r.read_message_begin().unwrap();
    println!("message {name} ({message_type:?}) seqid={seqid}");

    r.read_struct_begin().unwrap();
    while let Some((kind, fid)) = r.read_field_begin().unwrap() {
        match kind {
            TypeKind::I32 => println!("  field {fid}: i32 = {}", r.read_i32().unwrap()),
            TypeKind::BOOL => println!("  field {fid}: bool = {}", r.read_bool().unwrap()),
            TypeKind::LIST => {
                let (etype, size) = r.read_list_begin().unwrap();
                let mut items = Vec::new();
                for _ in 0..size {
                    if etype == TypeKind::STRING {
                        items.push(String::from_utf8(r.read_string().unwrap()).unwrap());
                    }
                }
                r.read_list_end().unwrap();
                println!("  field {fid}: list<string> = {items:?}");
            }
            other => log::warn!("unhandled field type {other:?} at fid {fid}"),
        }
        r.read_field_end().unwrap();
    }
    r.read_struct_end().unwrap();
    r.read_message_end().unwrap();
}
