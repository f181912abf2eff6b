//! Crate-wide error type.

use std::fmt;

use crate::state::State;

/// Errors produced by the Compact Protocol codec.
///
/// No variant here is recoverable locally: once returned, the codec that
/// produced it must be discarded (see the crate-level docs on lifecycle).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// `readMessageBegin` saw a protocol id or version it does not support.
    #[error("bad protocol version: {0}")]
    BadVersion(BadVersion),

    /// A decoded list/set/map/string length exceeded the configured ceiling.
    #[error("decoded size {size} exceeds limit {limit}")]
    SizeLimit {
        /// The size the wire actually declared.
        size: i64,
        /// The ceiling it was checked against.
        limit: i32,
    },

    /// The caller invoked an operation the state machine does not allow from
    /// its current state.
    #[error("operation {op} is illegal in state {state:?}")]
    StateViolation {
        /// Name of the attempted operation, for diagnostics.
        op: &'static str,
        /// The state the codec was actually in.
        state: State,
    },

    /// The transport returned an error or closed early.
    #[error("transport error: {0}")]
    Transport(#[from] std::io::Error),

    /// Caller-supplied data was not well-formed for the operation requested
    /// (e.g. a non-UTF-8 string, or `writeBool` outside a field/container
    /// context).
    #[error("encoding error: {0}")]
    Encoding(String),
}

/// Detail for [`Error::BadVersion`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadVersion {
    /// The leading protocol-id byte did not match `0x82`.
    ProtocolId(u8),
    /// The low 5 bits of the version/type byte were not `1`.
    Version(u8),
}

impl fmt::Display for BadVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BadVersion::ProtocolId(got) => write!(f, "protocol id {got:#04x}, expected 0x82"),
            BadVersion::Version(got) => write!(f, "version {got}, expected 1"),
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = core::result::Result<T, Error>;
