// CLASSIFICATION: COMMUNITY
// Filename: error.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-19

//! SNMP status codes surfaced by proxied node operations.
//!
//! Success is `Ok(..)`; every other status the agent understands is a
//! variant of [`SnmpErr`]. The numeric codes match the SNMPv2 error-status
//! field, with the varbind exceptions placed at `0xF0`.

use thiserror::Error;

/// Offset of the varbind exception codes (`noSuchObject` and friends).
pub const VARBIND_EXCEPTION_OFFSET: u8 = 0xF0;

/// Status returned by a failed node or instance operation.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum SnmpErr {
    #[error("tooBig")]
    TooBig = 1,
    #[error("noSuchName")]
    NoSuchName = 2,
    #[error("badValue")]
    BadValue = 3,
    #[error("readOnly")]
    ReadOnly = 4,
    #[error("genErr")]
    GenError = 5,
    #[error("noAccess")]
    NoAccess = 6,
    #[error("wrongType")]
    WrongType = 7,
    #[error("wrongLength")]
    WrongLength = 8,
    #[error("wrongEncoding")]
    WrongEncoding = 9,
    #[error("wrongValue")]
    WrongValue = 10,
    #[error("noCreation")]
    NoCreation = 11,
    #[error("inconsistentValue")]
    InconsistentValue = 12,
    #[error("resourceUnavailable")]
    ResourceUnavailable = 13,
    #[error("commitFailed")]
    CommitFailed = 14,
    #[error("undoFailed")]
    UndoFailed = 15,
    #[error("authorizationError")]
    AuthorizationError = 16,
    #[error("notWritable")]
    NotWritable = 17,
    #[error("inconsistentName")]
    InconsistentName = 18,
    /// The object named by the identifier does not exist.
    #[error("noSuchObject")]
    NoSuchObject = VARBIND_EXCEPTION_OFFSET,
    /// The object exists but the requested instance does not.
    #[error("noSuchInstance")]
    NoSuchInstance = VARBIND_EXCEPTION_OFFSET + 1,
    /// A get-next walked past the last object of the view.
    #[error("endOfMibView")]
    EndOfMibView = VARBIND_EXCEPTION_OFFSET + 2,
}

/// Result of a node or instance operation.
pub type SnmpResult<T> = Result<T, SnmpErr>;

impl SnmpErr {
    /// Numeric status code.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Look up a failure status by numeric code. `0` (noError) and unknown
    /// codes return `None`.
    pub fn from_code(code: u8) -> Option<Self> {
        let err = match code {
            1 => Self::TooBig,
            2 => Self::NoSuchName,
            3 => Self::BadValue,
            4 => Self::ReadOnly,
            5 => Self::GenError,
            6 => Self::NoAccess,
            7 => Self::WrongType,
            8 => Self::WrongLength,
            9 => Self::WrongEncoding,
            10 => Self::WrongValue,
            11 => Self::NoCreation,
            12 => Self::InconsistentValue,
            13 => Self::ResourceUnavailable,
            14 => Self::CommitFailed,
            15 => Self::UndoFailed,
            16 => Self::AuthorizationError,
            17 => Self::NotWritable,
            18 => Self::InconsistentName,
            0xF0 => Self::NoSuchObject,
            0xF1 => Self::NoSuchInstance,
            0xF2 => Self::EndOfMibView,
            _ => return None,
        };
        Some(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exception_codes_sit_above_offset() {
        assert_eq!(SnmpErr::NoSuchObject.code(), 0xF0);
        assert_eq!(SnmpErr::NoSuchInstance.code(), 0xF1);
        assert_eq!(SnmpErr::EndOfMibView.code(), 0xF2);
    }

    #[test]
    fn codes_map_back() {
        for code in (1..=18).chain(0xF0..=0xF2) {
            let err = SnmpErr::from_code(code).expect("known code");
            assert_eq!(err.code(), code);
        }
        assert_eq!(SnmpErr::from_code(0), None);
        assert_eq!(SnmpErr::from_code(19), None);
    }
}
