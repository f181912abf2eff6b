//! The transport contract this codec is driven over.
//!
//! A transport is an opaque byte sink/source with its own buffering and
//! framing; the codec never constructs or owns one beyond the generic `T`
//! it is instantiated with (see [`crate::protocol::CompactProtocol`]).

use crate::error::Result;

/// `write`/`read_exact` over a byte stream.
///
/// A blanket impl below covers any `std::io::Read + std::io::Write`, so
/// callers can hand in a `TcpStream`, a `Cursor<Vec<u8>>`, or any other
/// standard transport directly.
pub trait Transport {
    /// Appends exactly the given bytes.
    fn write(&mut self, buf: &[u8]) -> Result<()>;

    /// Returns exactly `n` bytes, failing if the stream ends first.
    fn read_exact(&mut self, n: usize) -> Result<Vec<u8>>;

    /// Reads exactly one byte. A default built on [`Transport::read_exact`];
    /// transports that can do better are free to override it.
    fn read_byte(&mut self) -> Result<u8> {
        let buf = self.read_exact(1)?;
        Ok(buf[0])
    }
}

impl<T> Transport for T
where
    T: std::io::Read + std::io::Write,
{
    fn write(&mut self, buf: &[u8]) -> Result<()> {
        std::io::Write::write_all(self, buf)?;
        Ok(())
    }

    fn read_exact(&mut self, n: usize) -> Result<Vec<u8>> {
        let mut buf = vec![0u8; n];
        std::io::Read::read_exact(self, &mut buf)?;
        Ok(buf)
    }
}
