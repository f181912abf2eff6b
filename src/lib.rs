// SPDX-License-Identifier: MIT OR Apache-2.0
//! A binary serialization codec implementing the Compact Protocol used by
//! a cross-language RPC framework.
//!
//! The wire format favors small messages over raw speed: integers are
//! ZigZag-varint encoded, field ids are delta-encoded against the previous
//! field in the same struct, and booleans fold their value into the field
//! header byte instead of costing a value byte of their own.
//!
//! The codec is a push/pull state machine (see [`state`]) bound to one
//! [`transport::Transport`] at a time via [`protocol::CompactProtocol`].
//! Callers drive it with a fixed calling convention — `write_message_begin`,
//! `write_struct_begin`, repeated `write_field_begin`/value/`write_field_end`,
//! `write_field_stop`, `write_struct_end`, `write_message_end` — and the
//! mirrored `read_*` sequence on the other side. Calling an operation the
//! state machine does not expect returns [`error::Error::StateViolation`]
//! rather than silently producing malformed bytes.
//!
//! ```
//! use compact_codec::protocol::CompactProtocol;
//! use compact_codec::types::{MessageType, TypeKind};
//! use std::io::Cursor;
//!
//! let mut p = CompactProtocol::new(Cursor::new(Vec::new()));
//! p.write_message_begin("ping", MessageType::Call, 1).unwrap();
//! p.write_struct_begin("PingArgs").unwrap();
//! p.write_field_begin("ok", TypeKind::BOOL, 1).unwrap();
//! p.write_bool(true).unwrap();
//! p.write_field_end().unwrap();
//! p.write_field_stop().unwrap();
//! p.write_struct_end().unwrap();
//! p.write_message_end().unwrap();
//! ```

pub mod config;
pub mod container;
pub mod error;
pub mod field;
pub mod io;
pub mod message;
pub mod protocol;
pub mod state;
pub mod transport;
pub mod types;
pub mod varint;

pub use config::Config;
pub use error::{Error, Result};
pub use protocol::{CompactProtocol, CompactProtocolFactory};
pub use transport::Transport;
pub use types::{CType, MessageType, TypeKind};
