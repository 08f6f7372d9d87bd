// CLASSIFICATION: COMMUNITY
// Filename: mod.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-19

//! SNMP node model consumed by the thread-sync proxy.

pub mod node;
pub mod oid;

pub use node::{
    Access, Asn1Type, GetValueFn, InstanceOps, LeafNode, NodeInstance, ReleaseFn, SetTestFn,
    SetValueFn,
};
pub use oid::{ObjectId, MAX_OID_LEN};
