//! Field header codec: short-form (delta+type) vs. long-form (type+int16).

use core::convert::TryFrom;

use crate::error::Result;
use crate::io::{read_ubyte, write_ubyte};
use crate::transport::Transport;
use crate::types::CType;
use crate::varint::{read_zigzag, write_zigzag};

/// Largest delta still encodable in the short form's 4-bit nibble.
const MAX_SHORT_DELTA: i32 = 15;

/// Writes a field header for `fid`, given the last field id written in this
/// struct frame. Returns the new `last_fid`.
///
/// `1 <= delta <= 15` uses the one-byte short form `(delta << 4) | ctype`;
/// anything else (including zero and negative deltas, which a short form
/// cannot represent at all) uses the long form: a byte with `ctype` in the
/// low nibble and a zeroed high nibble, followed by `fid` as a
/// zigzag-varint int16.
pub fn write_field_header<T: Transport>(
    transport: &mut T,
    ctype: CType,
    fid: i16,
    last_fid: i16,
) -> Result<()> {
    let delta = i32::from(fid) - i32::from(last_fid);
    if delta > 0 && delta <= MAX_SHORT_DELTA {
        write_ubyte(transport, ((delta as u8) << 4) | (ctype as u8))
    } else {
        write_ubyte(transport, ctype as u8)?;
        write_zigzag(transport, i64::from(fid), 16)
    }
}

/// The result of reading one field header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldHeader {
    /// End-of-struct STOP marker.
    Stop,
    /// A field follows, tagged with its `CType` and absolute id.
    Field { ctype: CType, fid: i16 },
}

/// Reads one field header byte (and, in the long form, the trailing
/// zigzag-varint id). A `0x00` byte (STOP, `ctype` nibble zero) ends the
/// struct's field sequence.
pub fn read_field_header<T: Transport>(
    transport: &mut T,
    last_fid: i16,
) -> Result<FieldHeader> {
    let byte = read_ubyte(transport)?;
    if byte & 0x0f == 0 {
        return Ok(FieldHeader::Stop);
    }
    let delta = byte >> 4;
    let fid = if delta == 0 {
        read_zigzag(transport)? as i16
    } else {
        last_fid + i16::from(delta)
    };
    let ctype = CType::try_from(byte & 0x0f)
        .map_err(|e| crate::error::Error::Encoding(e.to_string()))?;
    Ok(FieldHeader::Field { ctype, fid })
}
