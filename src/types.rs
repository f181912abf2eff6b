//! Abstract [`TypeKind`]s and their compact wire [`CType`] codes.

use core::convert::TryFrom;
use std::fmt;

/// The domain types callers see (IDL-level).
#[repr(u8)]
#[allow(clippy::upper_case_acronyms)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypeKind {
    STOP = 0,
    BOOL,
    BYTE,
    I16,
    I32,
    I64,
    DOUBLE,
    STRING,
    STRUCT,
    LIST,
    SET,
    MAP,
}

/// 4-bit wire code identifying a value's on-wire type.
#[repr(u8)]
#[allow(clippy::upper_case_acronyms)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CType {
    TRUE = 1,
    FALSE = 2,
    BYTE = 3,
    I16 = 4,
    I32 = 5,
    I64 = 6,
    DOUBLE = 7,
    BINARY = 8,
    LIST = 9,
    SET = 10,
    MAP = 11,
    STRUCT = 12,
}

const CTYPES: &[CType] = &[
    CType::TRUE,
    CType::FALSE,
    CType::BYTE,
    CType::I16,
    CType::I32,
    CType::I64,
    CType::DOUBLE,
    CType::BINARY,
    CType::LIST,
    CType::SET,
    CType::MAP,
    CType::STRUCT,
];

/// A wire byte's low nibble did not match any known `CType`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InvalidCType(pub u8);

impl fmt::Display for InvalidCType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown compact type code {:#x}", self.0)
    }
}

impl TryFrom<u8> for CType {
    type Error = InvalidCType;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        CTYPES
            .iter()
            .find(|c| value == **c as u8)
            .copied()
            .ok_or(InvalidCType(value))
    }
}

impl CType {
    /// `TypeKind → CType`, folding `BOOL` to the generic `TRUE` code (used
    /// for booleans inside containers and as the declared element/key/value
    /// type of a collection header).
    pub const fn from_kind(kind: TypeKind) -> CType {
        match kind {
            TypeKind::STOP => CType::STRUCT, // unreachable on any real write path
            TypeKind::BOOL => CType::TRUE,
            TypeKind::BYTE => CType::BYTE,
            TypeKind::I16 => CType::I16,
            TypeKind::I32 => CType::I32,
            TypeKind::I64 => CType::I64,
            TypeKind::DOUBLE => CType::DOUBLE,
            TypeKind::STRING => CType::BINARY,
            TypeKind::STRUCT => CType::STRUCT,
            TypeKind::LIST => CType::LIST,
            TypeKind::SET => CType::SET,
            TypeKind::MAP => CType::MAP,
        }
    }

    /// `CType → TypeKind`, folding both `TRUE` and `FALSE` back to `BOOL`.
    pub const fn to_kind(self) -> TypeKind {
        match self {
            CType::TRUE | CType::FALSE => TypeKind::BOOL,
            CType::BYTE => TypeKind::BYTE,
            CType::I16 => TypeKind::I16,
            CType::I32 => TypeKind::I32,
            CType::I64 => TypeKind::I64,
            CType::DOUBLE => TypeKind::DOUBLE,
            CType::BINARY => TypeKind::STRING,
            CType::LIST => TypeKind::LIST,
            CType::SET => TypeKind::SET,
            CType::MAP => TypeKind::MAP,
            CType::STRUCT => TypeKind::STRUCT,
        }
    }

    /// The code a latched boolean field header resolves to once its value
    /// is known. This is the explicit mapping the reference implementation
    /// left to an undefined `types[bool]` lookup.
    pub const fn from_bool(value: bool) -> CType {
        if value {
            CType::TRUE
        } else {
            CType::FALSE
        }
    }
}

impl fmt::Display for CType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#04x}", *self as u8)
    }
}

/// Message type carried in the top 3 bits of the version byte.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageType {
    Call = 1,
    Reply = 2,
    Exception = 3,
    Oneway = 4,
}

/// A version byte's top 3 bits did not match any known `MessageType`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InvalidMessageType(pub u8);

impl fmt::Display for InvalidMessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown message type {}", self.0)
    }
}

impl TryFrom<u8> for MessageType {
    type Error = InvalidMessageType;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(MessageType::Call),
            2 => Ok(MessageType::Reply),
            3 => Ok(MessageType::Exception),
            4 => Ok(MessageType::Oneway),
            other => Err(InvalidMessageType(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[rstest::rstest]
    #[case(TypeKind::BOOL, CType::TRUE)]
    #[case(TypeKind::BYTE, CType::BYTE)]
    #[case(TypeKind::STRING, CType::BINARY)]
    #[case(TypeKind::STRUCT, CType::STRUCT)]
    fn kind_to_ctype(#[case] kind: TypeKind, #[case] expected: CType) {
        assert_eq!(CType::from_kind(kind), expected);
    }

    #[rstest::rstest]
    #[case(CType::TRUE, TypeKind::BOOL)]
    #[case(CType::FALSE, TypeKind::BOOL)]
    #[case(CType::MAP, TypeKind::MAP)]
    fn ctype_to_kind(#[case] ctype: CType, #[case] expected: TypeKind) {
        assert_eq!(ctype.to_kind(), expected);
    }

    #[test]
    fn bool_ctype_mapping() {
        assert_eq!(CType::from_bool(true), CType::TRUE);
        assert_eq!(CType::from_bool(false), CType::FALSE);
    }

    #[test]
    fn ctype_try_from_roundtrips_all_codes() {
        for code in 1u8..=12 {
            let ctype = CType::try_from(code).unwrap();
            assert_eq!(ctype as u8, code);
        }
        assert!(CType::try_from(0).is_err());
        assert!(CType::try_from(13).is_err());
    }
}
