//! Unsigned varint and ZigZag primitives.
//!
//! Every multi-byte integer on the wire (field ids, container sizes,
//! string lengths, and zigzagged scalars) bottoms out in [`write_varint`]
//! and [`read_varint`]; callers never see a byte-width-specific varint path.

use tinyvec::ArrayVec;

use crate::error::{Error, Result};
use crate::transport::Transport;

/// Mask for the seven data bits of a varint byte. The reference
/// implementation's live decode path uses this mask; a dead branch in that
/// same source masked with `0xf7` instead, which is a bug and is not
/// reproduced here.
const LOW_SEVEN: u8 = 0x7f;
const CONTINUATION: u8 = 0x80;

/// Writes `n` as an unsigned LEB128 varint: 7-bit groups, little end first,
/// continuation bit set on every byte but the last.
pub fn write_varint<T: Transport>(transport: &mut T, mut n: u64) -> Result<()> {
    let mut buf: ArrayVec<[u8; 10]> = ArrayVec::new();
    loop {
        if n & !(LOW_SEVEN as u64) == 0 {
            buf.push(n as u8);
            break;
        }
        buf.push((n as u8 & LOW_SEVEN) | CONTINUATION);
        n >>= 7;
    }
    transport.write(&buf)
}

/// Largest number of continuation-bearing bytes a well-formed u64 varint
/// can use: `ceil(64 / 7) = 10`.
const MAX_VARINT_BYTES: u32 = 10;

/// Reads an unsigned LEB128 varint, accumulating 7-bit groups until a byte
/// with a clear high bit. A stream that never terminates within
/// `MAX_VARINT_BYTES` is malformed and rejected with `Error::Encoding`
/// rather than shifting past the width of `u64`.
pub fn read_varint<T: Transport>(transport: &mut T) -> Result<u64> {
    let mut result: u64 = 0;
    let mut shift: u32 = 0;
    for _ in 0..MAX_VARINT_BYTES {
        let byte = transport.read_byte()?;
        result |= u64::from(byte & LOW_SEVEN) << shift;
        if byte & CONTINUATION == 0 {
            return Ok(result);
        }
        shift += 7;
    }
    log::error!("varint exceeded {MAX_VARINT_BYTES} bytes without terminating");
    Err(Error::Encoding("varint too long".to_string()))
}

/// ZigZag-encodes a signed `w`-bit integer so small-magnitude values stay
/// short under varint encoding: non-negative `n` maps to `2n`, negative `n`
/// maps to `-2n-1`.
pub fn to_zigzag(n: i64, bits: u32) -> u64 {
    ((n << 1) ^ (n >> (bits - 1))) as u64
}

/// Inverse of [`to_zigzag`].
pub fn from_zigzag(u: u64) -> i64 {
    ((u >> 1) as i64) ^ -((u & 1) as i64)
}

pub fn write_zigzag<T: Transport>(transport: &mut T, n: i64, bits: u32) -> Result<()> {
    write_varint(transport, to_zigzag(n, bits))
}

pub fn read_zigzag<T: Transport>(transport: &mut T) -> Result<i64> {
    Ok(from_zigzag(read_varint(transport)?))
}

/// Checked narrowing used when a varint-decoded value must fit an `i32`
/// size/length (see [`crate::config::Config`]).
pub fn require_non_negative_i32(value: u64, limit: i32) -> Result<i32> {
    let value = i64::try_from(value).unwrap_or(i64::MAX);
    if value < 0 || value > i64::from(limit) {
        log::error!("decoded size {value} exceeds limit {limit}");
        return Err(Error::SizeLimit {
            size: value,
            limit,
        });
    }
    Ok(value as i32)
}
