//! List/Set/Map header codec.

use core::convert::TryFrom;

use crate::error::Result;
use crate::io::{read_ubyte, write_ubyte};
use crate::transport::Transport;
use crate::types::CType;
use crate::varint::{read_varint, require_non_negative_i32, write_varint};

/// Largest size still encodable in a list/set header's 4-bit nibble.
const MAX_SHORT_SIZE: i32 = 14;

/// Writes a list/set header (the two share an identical wire format):
/// `size <= 14` uses `(size << 4) | ctype`; otherwise `0xF0 | ctype`
/// followed by `size` as an unsigned varint.
pub fn write_collection_header<T: Transport>(
    transport: &mut T,
    element: CType,
    size: i32,
) -> Result<()> {
    if size <= MAX_SHORT_SIZE {
        write_ubyte(transport, ((size as u8) << 4) | (element as u8))
    } else {
        write_ubyte(transport, 0xF0 | (element as u8))?;
        write_varint(transport, size as u64)
    }
}

/// Reads a list/set header, rejecting a decoded size over `max_size`.
pub fn read_collection_header<T: Transport>(
    transport: &mut T,
    max_size: i32,
) -> Result<(CType, i32)> {
    let byte = read_ubyte(transport)?;
    let ctype =
        CType::try_from(byte & 0x0f).map_err(|e| crate::error::Error::Encoding(e.to_string()))?;
    let nibble = byte >> 4;
    let size = if nibble == 0x0f {
        require_non_negative_i32(read_varint(transport)?, max_size)?
    } else {
        i32::from(nibble)
    };
    Ok((ctype, size))
}

/// Writes a map header: `0x00` if empty, else `varint(size)` followed by
/// `(key_ctype << 4) | value_ctype`.
pub fn write_map_header<T: Transport>(
    transport: &mut T,
    key: CType,
    value: CType,
    size: i32,
) -> Result<()> {
    if size == 0 {
        write_ubyte(transport, 0)
    } else {
        write_varint(transport, size as u64)?;
        write_ubyte(transport, ((key as u8) << 4) | (value as u8))
    }
}

/// Reads a map header. An empty map has no key/value type byte at all, so
/// `None` is returned for both when `size == 0` rather than inventing a
/// type that was never on the wire.
pub fn read_map_header<T: Transport>(
    transport: &mut T,
    max_size: i32,
) -> Result<(Option<CType>, Option<CType>, i32)> {
    let size = require_non_negative_i32(read_varint(transport)?, max_size)?;
    if size == 0 {
        return Ok((None, None, 0));
    }
    let types = read_ubyte(transport)?;
    let key = CType::try_from(types >> 4).map_err(|e| crate::error::Error::Encoding(e.to_string()))?;
    let value =
        CType::try_from(types & 0x0f).map_err(|e| crate::error::Error::Encoding(e.to_string()))?;
    Ok((Some(key), Some(value), size))
}
