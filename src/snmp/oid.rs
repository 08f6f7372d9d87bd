// CLASSIFICATION: COMMUNITY
// Filename: oid.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-19

//! Bounded object identifier storage.

use std::fmt;
use std::ops::Deref;

use crate::error::{SnmpErr, SnmpResult};

/// Maximum number of sub-identifiers in an [`ObjectId`].
pub const MAX_OID_LEN: usize = 50;

/// Object identifier (path identifier) of at most [`MAX_OID_LEN`]
/// sub-identifiers.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct ObjectId {
    ids: Vec<u32>,
}

impl ObjectId {
    /// Empty identifier.
    pub const fn empty() -> Self {
        Self { ids: Vec::new() }
    }

    /// Copy `ids` into a new identifier.
    ///
    /// Fails with `WrongLength` when `ids` exceeds [`MAX_OID_LEN`] and with
    /// `ResourceUnavailable` when the storage cannot be allocated.
    pub fn from_slice(ids: &[u32]) -> SnmpResult<Self> {
        let mut oid = Self::empty();
        oid.assign(ids)?;
        Ok(oid)
    }

    /// Overwrite this identifier with `ids`. Leaves `self` untouched on
    /// failure.
    pub fn assign(&mut self, ids: &[u32]) -> SnmpResult<()> {
        if ids.len() > MAX_OID_LEN {
            return Err(SnmpErr::WrongLength);
        }
        let mut buf = Vec::new();
        buf.try_reserve_exact(ids.len())
            .map_err(|_| SnmpErr::ResourceUnavailable)?;
        buf.extend_from_slice(ids);
        self.ids = buf;
        Ok(())
    }

    /// Sub-identifiers as a slice.
    pub fn as_slice(&self) -> &[u32] {
        &self.ids
    }
}

impl Deref for ObjectId {
    type Target = [u32];

    fn deref(&self) -> &[u32] {
        &self.ids
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for id in &self.ids {
            if !first {
                f.write_str(".")?;
            }
            write!(f, "{id}")?;
            first = false;
        }
        Ok(())
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectId({self})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_dotted() {
        let oid = ObjectId::from_slice(&[1, 3, 6, 1, 2]).unwrap();
        assert_eq!(oid.to_string(), "1.3.6.1.2");
        assert_eq!(oid.len(), 5);
        assert_eq!(ObjectId::empty().to_string(), "");
    }

    #[test]
    fn rejects_overlong_identifier() {
        let long = [1u32; MAX_OID_LEN + 1];
        assert_eq!(ObjectId::from_slice(&long), Err(SnmpErr::WrongLength));

        let mut oid = ObjectId::from_slice(&[1, 3]).unwrap();
        assert_eq!(oid.assign(&long), Err(SnmpErr::WrongLength));
        assert_eq!(oid.as_slice(), &[1, 3]);
    }
}
