//! The codec object: `CompactProtocol` and its factory.
//!
//! This is the component that glues the state machine, the field/container
//! header codecs, and message framing into the public push/pull surface
//! callers actually drive.

use crate::config::Config;
use crate::container::{read_collection_header, read_map_header, write_collection_header, write_map_header};
use crate::error::{Error, Result};
use crate::field::{read_field_header, write_field_header, FieldHeader};
use crate::io::{read_byte, read_double, read_ubyte, write_byte, write_double, write_ubyte};
use crate::message::{read_message_begin, write_field_stop, write_message_begin};
use crate::state::{Machine, State};
use crate::transport::Transport;
use crate::types::{CType, MessageType, TypeKind};
use crate::varint::{read_zigzag, write_zigzag};

/// A field read from the wire: `None` marks the struct's STOP.
pub type FieldBegin = Option<(TypeKind, i16)>;

/// Builds [`CompactProtocol`] instances. The factory itself holds no
/// per-instance state; it only remembers the `Config` new codecs should use.
#[derive(Clone, Copy, Debug, Default)]
pub struct CompactProtocolFactory {
    config: Config,
}

impl CompactProtocolFactory {
    /// A factory producing codecs with [`Config::default`].
    pub fn new() -> Self {
        CompactProtocolFactory {
            config: Config::default(),
        }
    }

    /// A factory producing codecs with a caller-supplied `Config`.
    pub fn with_config(config: Config) -> Self {
        CompactProtocolFactory { config }
    }

    /// Binds a codec to `transport`, starting in `State::Clear`.
    pub fn get_protocol<T: Transport>(&self, transport: T) -> CompactProtocol<T> {
        CompactProtocol::with_config(transport, self.config)
    }
}

/// A Compact Protocol codec bound to one transport.
///
/// Single-threaded and stateful: see the crate-level docs for the
/// concurrency model. After `write_message_end`/`read_message_end` the
/// codec is back in `State::Clear` and fully reusable.
pub struct CompactProtocol<T> {
    transport: T,
    machine: Machine,
    config: Config,
}

impl<T: Transport> CompactProtocol<T> {
    /// Binds a codec to `transport` with `Config::default()`.
    pub fn new(transport: T) -> Self {
        Self::with_config(transport, Config::default())
    }

    /// Binds a codec to `transport` with an explicit `Config`.
    pub fn with_config(transport: T, config: Config) -> Self {
        CompactProtocol {
            transport,
            machine: Machine::new(),
            config,
        }
    }

    /// The state the codec is currently in. Exposed for diagnostics and
    /// tests; callers driving the codec correctly never need to inspect it.
    pub fn state(&self) -> State {
        self.machine.state()
    }

    /// Unwraps the codec, returning the transport it was bound to.
    pub fn into_inner(self) -> T {
        self.transport
    }

    // ---- message ----------------------------------------------------

    pub fn write_message_begin(
        &mut self,
        name: &str,
        message_type: MessageType,
        seqid: u32,
    ) -> Result<()> {
        self.machine.expect("write_message_begin", State::Clear)?;
        write_message_begin(&mut self.transport, name, message_type, seqid)?;
        self.machine.set_state(State::Write);
        log::trace!("write_message_begin: {name} seqid={seqid}");
        Ok(())
    }

    pub fn write_message_end(&mut self) -> Result<()> {
        self.machine.expect("write_message_end", State::Write)?;
        self.machine.set_state(State::Clear);
        Ok(())
    }

    pub fn read_message_begin(&mut self) -> Result<(String, MessageType, u32)> {
        self.machine.expect("read_message_begin", State::Clear)?;
        let result = read_message_begin(&mut self.transport, self.config.max_size)?;
        self.machine.set_state(State::Read);
        log::trace!("read_message_begin: {} seqid={}", result.0, result.2);
        Ok(result)
    }

    pub fn read_message_end(&mut self) -> Result<()> {
        self.machine.expect("read_message_end", State::Read)?;
        debug_assert_eq!(self.machine.frame_depth(), 0);
        self.machine.set_state(State::Clear);
        Ok(())
    }

    // ---- struct -------------------------------------------------------

    pub fn write_struct_begin(&mut self, name: &str) -> Result<()> {
        self.machine.expect_one_of(
            "write_struct_begin",
            &[
                State::Clear,
                State::Write,
                State::ContainerWrite,
                State::ValueWrite,
            ],
        )?;
        log::trace!("write_struct_begin: {name}");
        self.machine.push_frame(State::Write);
        Ok(())
    }

    pub fn write_struct_end(&mut self) -> Result<()> {
        self.machine.expect("write_struct_end", State::Write)?;
        self.machine.pop_frame(State::ValueWrite, State::Write)
    }

    pub fn read_struct_begin(&mut self) -> Result<()> {
        self.machine.expect_one_of(
            "read_struct_begin",
            &[
                State::Clear,
                State::Read,
                State::ContainerRead,
                State::ValueRead,
            ],
        )?;
        log::trace!("read_struct_begin");
        self.machine.push_frame(State::Read);
        Ok(())
    }

    pub fn read_struct_end(&mut self) -> Result<()> {
        self.machine.expect("read_struct_end", State::Read)?;
        self.machine.pop_frame(State::ValueRead, State::Read)
    }

    // ---- fields ---------------------------------------------------------

    /// `name` is accepted for API parity with richer protocol variants but
    /// never reaches the wire: the compact format addresses fields by id.
    pub fn write_field_begin(&mut self, _name: &str, kind: TypeKind, fid: i16) -> Result<()> {
        self.machine.expect("write_field_begin", State::Write)?;
        if kind == TypeKind::BOOL {
            self.machine.set_state(State::BoolWrite { fid });
            Ok(())
        } else {
            let last_fid = self.machine.last_fid();
            write_field_header(&mut self.transport, CType::from_kind(kind), fid, last_fid)?;
            self.machine.set_last_fid(fid);
            self.machine.set_state(State::ValueWrite);
            Ok(())
        }
    }

    /// No-op: the compact format has nothing to close per field.
    pub fn write_field_end(&mut self) -> Result<()> {
        Ok(())
    }

    pub fn write_field_stop(&mut self) -> Result<()> {
        write_field_stop(&mut self.transport)
    }

    pub fn read_field_begin(&mut self) -> Result<FieldBegin> {
        self.machine.expect("read_field_begin", State::Read)?;
        let last_fid = self.machine.last_fid();
        match read_field_header(&mut self.transport, last_fid)? {
            FieldHeader::Stop => Ok(None),
            FieldHeader::Field { ctype, fid } => {
                self.machine.set_last_fid(fid);
                self.machine.set_state(match ctype {
                    CType::TRUE => State::TrueRead,
                    CType::FALSE => State::FalseRead,
                    _ => State::ValueRead,
                });
                Ok(Some((ctype.to_kind(), fid)))
            }
        }
    }

    pub fn read_field_end(&mut self) -> Result<()> {
        Ok(())
    }

    // ---- containers -------------------------------------------------

    pub fn write_list_begin(&mut self, element: TypeKind, size: i32) -> Result<()> {
        self.write_collection_begin(element, size)
    }

    pub fn write_set_begin(&mut self, element: TypeKind, size: i32) -> Result<()> {
        self.write_collection_begin(element, size)
    }

    fn write_collection_begin(&mut self, element: TypeKind, size: i32) -> Result<()> {
        self.machine.expect("write_collection_begin", State::ValueWrite)?;
        write_collection_header(&mut self.transport, CType::from_kind(element), size)?;
        self.machine.set_state(State::ContainerWrite);
        Ok(())
    }

    pub fn write_list_end(&mut self) -> Result<()> {
        self.write_collection_end()
    }

    pub fn write_set_end(&mut self) -> Result<()> {
        self.write_collection_end()
    }

    fn write_collection_end(&mut self) -> Result<()> {
        self.machine.expect("write_collection_end", State::ContainerWrite)?;
        self.machine.set_state(State::Write);
        Ok(())
    }

    pub fn write_map_begin(&mut self, key: TypeKind, value: TypeKind, size: i32) -> Result<()> {
        self.machine.expect("write_map_begin", State::ValueWrite)?;
        write_map_header(
            &mut self.transport,
            CType::from_kind(key),
            CType::from_kind(value),
            size,
        )?;
        self.machine.set_state(State::ContainerWrite);
        Ok(())
    }

    pub fn write_map_end(&mut self) -> Result<()> {
        self.write_collection_end()
    }

    pub fn read_list_begin(&mut self) -> Result<(TypeKind, i32)> {
        self.read_collection_begin()
    }

    pub fn read_set_begin(&mut self) -> Result<(TypeKind, i32)> {
        self.read_collection_begin()
    }

    fn read_collection_begin(&mut self) -> Result<(TypeKind, i32)> {
        self.machine.expect("read_collection_begin", State::ValueRead)?;
        self.machine.set_state(State::ContainerRead);
        let (ctype, size) = read_collection_header(&mut self.transport, self.config.max_size)?;
        Ok((ctype.to_kind(), size))
    }

    pub fn read_list_end(&mut self) -> Result<()> {
        self.read_collection_end()
    }

    pub fn read_set_end(&mut self) -> Result<()> {
        self.read_collection_end()
    }

    pub fn read_map_end(&mut self) -> Result<()> {
        self.read_collection_end()
    }

    fn read_collection_end(&mut self) -> Result<()> {
        self.machine.expect("read_collection_end", State::ContainerRead)?;
        self.machine.set_state(State::Read);
        Ok(())
    }

    pub fn read_map_begin(&mut self) -> Result<(TypeKind, TypeKind, i32)> {
        self.machine.expect("read_map_begin", State::ValueRead)?;
        self.machine.set_state(State::ContainerRead);
        let (key, value, size) = read_map_header(&mut self.transport, self.config.max_size)?;
        // An empty map carries no key/value type codes on the wire; any
        // type serves as a placeholder since callers must not read elements.
        let key = key.map(CType::to_kind).unwrap_or(TypeKind::STOP);
        let value = value.map(CType::to_kind).unwrap_or(TypeKind::STOP);
        Ok((key, value, size))
    }

    // ---- scalars ----------------------------------------------------

    /// Writes a boolean. Inside `BoolWrite` this folds into the pending
    /// field header (no value byte at all); inside `ContainerWrite` (a
    /// list/set/map element) it writes a plain 0/1 byte.
    pub fn write_bool(&mut self, value: bool) -> Result<()> {
        match self.machine.state() {
            State::BoolWrite { fid } => {
                let last_fid = self.machine.last_fid();
                write_field_header(&mut self.transport, CType::from_bool(value), fid, last_fid)?;
                self.machine.set_last_fid(fid);
                self.machine.set_state(State::Write);
                Ok(())
            }
            State::ContainerWrite => {
                write_ubyte(&mut self.transport, value as u8)?;
                Ok(())
            }
            other => Err(Error::StateViolation {
                op: "write_bool",
                state: other,
            }),
        }
    }

    pub fn write_byte(&mut self, value: i8) -> Result<()> {
        self.write_scalar("write_byte", |t| write_byte(t, value))
    }

    pub fn write_i16(&mut self, value: i16) -> Result<()> {
        self.write_scalar("write_i16", |t| write_zigzag(t, i64::from(value), 16))
    }

    pub fn write_i32(&mut self, value: i32) -> Result<()> {
        self.write_scalar("write_i32", |t| write_zigzag(t, i64::from(value), 32))
    }

    pub fn write_i64(&mut self, value: i64) -> Result<()> {
        self.write_scalar("write_i64", |t| write_zigzag(t, value, 64))
    }

    pub fn write_double(&mut self, value: f64) -> Result<()> {
        self.write_scalar("write_double", |t| write_double(t, value))
    }

    pub fn write_string(&mut self, bytes: &[u8]) -> Result<()> {
        self.write_scalar("write_string", |t| crate::io::write_binary(t, bytes))
    }

    /// Every non-bool scalar write shares the same state discipline:
    /// legal from `VALUE_WRITE` (a field's value) or `CONTAINER_WRITE` (a
    /// collection element), and only `VALUE_WRITE` transitions back to
    /// `WRITE` afterwards.
    fn write_scalar(
        &mut self,
        op: &'static str,
        f: impl FnOnce(&mut T) -> Result<()>,
    ) -> Result<()> {
        self.machine
            .expect_one_of(op, &[State::ValueWrite, State::ContainerWrite])?;
        let was_value = self.machine.state() == State::ValueWrite;
        f(&mut self.transport)?;
        if was_value {
            self.machine.set_state(State::Write);
        }
        Ok(())
    }

    pub fn read_bool(&mut self) -> Result<bool> {
        match self.machine.state() {
            State::TrueRead => {
                self.machine.set_state(State::Read);
                Ok(true)
            }
            State::FalseRead => {
                self.machine.set_state(State::Read);
                Ok(false)
            }
            State::ContainerRead => Ok(read_ubyte(&mut self.transport)? != 0),
            other => Err(Error::StateViolation {
                op: "read_bool",
                state: other,
            }),
        }
    }

    pub fn read_byte(&mut self) -> Result<i8> {
        self.read_scalar("read_byte", |t| read_byte(t))
    }

    pub fn read_i16(&mut self) -> Result<i16> {
        self.read_scalar("read_i16", |t| Ok(read_zigzag(t)? as i16))
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        self.read_scalar("read_i32", |t| Ok(read_zigzag(t)? as i32))
    }

    pub fn read_i64(&mut self) -> Result<i64> {
        self.read_scalar("read_i64", read_zigzag)
    }

    pub fn read_double(&mut self) -> Result<f64> {
        self.read_scalar("read_double", |t| read_double(t))
    }

    pub fn read_string(&mut self) -> Result<Vec<u8>> {
        let max_size = self.config.max_size;
        self.read_scalar("read_string", |t| crate::io::read_binary(t, max_size))
    }

    fn read_scalar<R>(&mut self, op: &'static str, f: impl FnOnce(&mut T) -> Result<R>) -> Result<R> {
        self.machine
            .expect_one_of(op, &[State::ValueRead, State::ContainerRead])?;
        let was_value = self.machine.state() == State::ValueRead;
        let value = f(&mut self.transport)?;
        if was_value {
            self.machine.set_state(State::Read);
        }
        Ok(value)
    }
}
