//! Message framing: protocol id, version, message type, seqid, name.

use core::convert::TryFrom;

use crate::error::{BadVersion, Error, Result};
use crate::io::{read_ubyte, write_ubyte};
use crate::transport::Transport;
use crate::types::MessageType;
use crate::varint::{read_varint, write_varint};

/// Leading byte of every message.
pub const PROTOCOL_ID: u8 = 0x82;
/// Low 5 bits of the version/type byte.
pub const VERSION: u8 = 1;
const VERSION_MASK: u8 = 0x1f;
const TYPE_SHIFT: u32 = 5;

/// Writes the message header: `0x82`, `version | (type << 5)`,
/// `varint(seqid)`, `string(name)`.
pub fn write_message_begin<T: Transport>(
    transport: &mut T,
    name: &str,
    message_type: MessageType,
    seqid: u32,
) -> Result<()> {
    write_ubyte(transport, PROTOCOL_ID)?;
    write_ubyte(transport, VERSION | ((message_type as u8) << TYPE_SHIFT))?;
    write_varint(transport, u64::from(seqid))?;
    crate::io::write_binary(transport, name.as_bytes())
}

/// Reads and validates the message header, returning `(name, type, seqid)`.
pub fn read_message_begin<T: Transport>(
    transport: &mut T,
    max_size: i32,
) -> Result<(String, MessageType, u32)> {
    let proto_id = read_ubyte(transport)?;
    if proto_id != PROTOCOL_ID {
        log::error!("read_message_begin: bad protocol id {proto_id:#04x}");
        return Err(Error::BadVersion(BadVersion::ProtocolId(proto_id)));
    }
    let ver_type = read_ubyte(transport)?;
    let version = ver_type & VERSION_MASK;
    if version != VERSION {
        log::error!("read_message_begin: bad version {version}");
        return Err(Error::BadVersion(BadVersion::Version(version)));
    }
    let message_type = MessageType::try_from(ver_type >> TYPE_SHIFT)
        .map_err(|e| Error::Encoding(e.to_string()))?;
    let seqid = read_varint(transport)? as u32;
    let name_bytes = crate::io::read_binary(transport, max_size)?;
    let name = String::from_utf8(name_bytes).map_err(|e| Error::Encoding(e.to_string()))?;
    Ok((name, message_type, seqid))
}

/// Writes the field STOP marker: one zero byte.
pub fn write_field_stop<T: Transport>(transport: &mut T) -> Result<()> {
    write_ubyte(transport, 0)
}
