//! Fixed-width byte and double I/O over a [`Transport`].

use crate::error::Result;
use crate::transport::Transport;

/// Writes a single unsigned byte.
pub fn write_ubyte<T: Transport>(transport: &mut T, byte: u8) -> Result<()> {
    transport.write(&[byte])
}

/// Writes a single signed byte.
pub fn write_byte<T: Transport>(transport: &mut T, byte: i8) -> Result<()> {
    transport.write(&[byte as u8])
}

/// Reads a single unsigned byte.
pub fn read_ubyte<T: Transport>(transport: &mut T) -> Result<u8> {
    transport.read_byte()
}

/// Reads a single signed byte.
pub fn read_byte<T: Transport>(transport: &mut T) -> Result<i8> {
    Ok(transport.read_byte()? as i8)
}

/// Writes an IEEE-754 binary64 in big-endian byte order.
pub fn write_double<T: Transport>(transport: &mut T, value: f64) -> Result<()> {
    transport.write(&value.to_be_bytes())
}

/// Reads an IEEE-754 binary64 in big-endian byte order.
pub fn read_double<T: Transport>(transport: &mut T) -> Result<f64> {
    let buf = transport.read_exact(8)?;
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&buf);
    Ok(f64::from_be_bytes(bytes))
}

/// Writes a compact string/binary value: varint length, then raw bytes.
pub fn write_binary<T: Transport>(transport: &mut T, bytes: &[u8]) -> Result<()> {
    crate::varint::write_varint(transport, bytes.len() as u64)?;
    transport.write(bytes)
}

/// Reads a compact string/binary value, enforcing `max_size` on the decoded
/// length exactly as container sizes are enforced (the reference
/// implementation's `__readSize` helper is shared between the two).
pub fn read_binary<T: Transport>(transport: &mut T, max_size: i32) -> Result<Vec<u8>> {
    let len = crate::varint::read_varint(transport)?;
    let len = crate::varint::require_non_negative_i32(len, max_size)?;
    transport.read_exact(len as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn double_is_big_endian() {
        let mut buf = Vec::new();
        write_double(&mut buf, 1.0).unwrap();
        assert_eq!(buf, 1.0f64.to_be_bytes().to_vec());
        let mut cur = Cursor::new(buf);
        assert_eq!(read_double(&mut cur).unwrap(), 1.0);
    }

    #[test]
    fn binary_roundtrip() {
        let mut buf = Vec::new();
        write_binary(&mut buf, b"hello").unwrap();
        let mut cur = Cursor::new(buf);
        assert_eq!(read_binary(&mut cur, 0x7FFF).unwrap(), b"hello".to_vec());
    }

    #[test]
    fn binary_over_limit_rejected() {
        let mut buf = Vec::new();
        crate::varint::write_varint(&mut buf, 0x8000).unwrap();
        let mut cur = Cursor::new(buf);
        assert!(read_binary(&mut cur, 0x7FFF).is_err());
    }

    #[test]
    fn signed_byte_round_trips_negative() {
        let mut buf = Vec::new();
        write_byte(&mut buf, -1).unwrap();
        let mut cur = Cursor::new(buf);
        assert_eq!(read_byte(&mut cur).unwrap(), -1);
    }
}
