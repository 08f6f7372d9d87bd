// CLASSIFICATION: COMMUNITY
// Filename: node.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-19

//! Leaf node and node instance model.
//!
//! A [`LeafNode`] resolves identifiers into [`NodeInstance`] descriptors.
//! The descriptor carries the instance metadata plus the value operations
//! the instance supports; unset operations are `None`.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use bitflags::bitflags;

use super::oid::ObjectId;
use crate::error::SnmpResult;

bitflags! {
    /// Access rights of a node instance.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Access: u8 {
        const READ = 0b01;
        const WRITE = 0b10;
    }
}

impl Access {
    pub const NOT_ACCESSIBLE: Self = Self::empty();
    pub const READ_ONLY: Self = Self::READ;
    pub const WRITE_ONLY: Self = Self::WRITE;
    pub const READ_WRITE: Self = Self::READ.union(Self::WRITE);
}

bitflags! {
    /// Operations bound on an instance.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct InstanceOps: u8 {
        const GET_VALUE = 0b0001;
        const SET_TEST = 0b0010;
        const SET_VALUE = 0b0100;
        const RELEASE = 0b1000;
    }
}

/// ASN.1 type tag of an instance value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Asn1Type(pub u8);

impl Asn1Type {
    pub const INTEGER: Self = Self(0x02);
    pub const OCTET_STRING: Self = Self(0x04);
    pub const NULL: Self = Self(0x05);
    pub const OBJECT_ID: Self = Self(0x06);
    pub const IP_ADDRESS: Self = Self(0x40);
    pub const COUNTER32: Self = Self(0x41);
    pub const GAUGE32: Self = Self(0x42);
    pub const TIMETICKS: Self = Self(0x43);
    pub const OPAQUE: Self = Self(0x44);
    pub const COUNTER64: Self = Self(0x46);
}

/// Reads the instance value into the buffer and returns its length; `0`
/// signals failure.
pub type GetValueFn = Arc<dyn Fn(&mut NodeInstance, &mut [u8]) -> u16 + Send + Sync>;
/// Checks whether a value may be written.
pub type SetTestFn = Arc<dyn Fn(&mut NodeInstance, &[u8]) -> SnmpResult<()> + Send + Sync>;
/// Writes a value.
pub type SetValueFn = Arc<dyn Fn(&mut NodeInstance, &[u8]) -> SnmpResult<()> + Send + Sync>;
/// Releases per-instance resources.
pub type ReleaseFn = Arc<dyn Fn(&mut NodeInstance) + Send + Sync>;

/// A node that resolves identifiers into instances.
pub trait LeafNode: Send + Sync {
    /// Sub-identifier of this node within its parent.
    fn oid(&self) -> u32;

    /// Resolve the exact instance named by `instance.instance_oid`.
    fn get_instance(&self, root_oid: &[u32], instance: &mut NodeInstance) -> SnmpResult<()>;

    /// Resolve the first instance after `instance.instance_oid`, storing its
    /// identifier back into `instance.instance_oid`.
    fn get_next_instance(&self, root_oid: &[u32], instance: &mut NodeInstance)
        -> SnmpResult<()>;
}

/// Descriptor of one resolved instance.
#[derive(Default)]
pub struct NodeInstance {
    /// Node that produced this instance.
    pub node: Option<Arc<dyn LeafNode>>,
    pub instance_oid: ObjectId,
    pub access: Access,
    pub asn1_type: Asn1Type,
    pub get_value: Option<GetValueFn>,
    pub set_test: Option<SetTestFn>,
    pub set_value: Option<SetValueFn>,
    pub release_instance: Option<ReleaseFn>,
    /// Opaque per-instance state owned by the node implementation.
    pub reference: Option<Box<dyn Any + Send>>,
}

impl NodeInstance {
    /// Zeroed descriptor for `instance_oid`, bound to `node`.
    pub fn new(node: Arc<dyn LeafNode>, instance_oid: ObjectId) -> Self {
        Self {
            node: Some(node),
            instance_oid,
            ..Self::default()
        }
    }

    /// Operations currently bound.
    pub fn ops(&self) -> InstanceOps {
        let mut ops = InstanceOps::empty();
        ops.set(InstanceOps::GET_VALUE, self.get_value.is_some());
        ops.set(InstanceOps::SET_TEST, self.set_test.is_some());
        ops.set(InstanceOps::SET_VALUE, self.set_value.is_some());
        ops.set(InstanceOps::RELEASE, self.release_instance.is_some());
        ops
    }

    pub fn bind_get_value<F>(&mut self, f: F)
    where
        F: Fn(&mut NodeInstance, &mut [u8]) -> u16 + Send + Sync + 'static,
    {
        self.get_value = Some(Arc::new(f));
    }

    pub fn bind_set_test<F>(&mut self, f: F)
    where
        F: Fn(&mut NodeInstance, &[u8]) -> SnmpResult<()> + Send + Sync + 'static,
    {
        self.set_test = Some(Arc::new(f));
    }

    pub fn bind_set_value<F>(&mut self, f: F)
    where
        F: Fn(&mut NodeInstance, &[u8]) -> SnmpResult<()> + Send + Sync + 'static,
    {
        self.set_value = Some(Arc::new(f));
    }

    pub fn bind_release<F>(&mut self, f: F)
    where
        F: Fn(&mut NodeInstance) + Send + Sync + 'static,
    {
        self.release_instance = Some(Arc::new(f));
    }

    /// Borrow the opaque reference as `T`.
    pub fn reference_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.reference.as_mut()?.downcast_mut::<T>()
    }
}

impl fmt::Debug for NodeInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeInstance")
            .field("node", &self.node.as_ref().map(|n| n.oid()))
            .field("instance_oid", &self.instance_oid)
            .field("access", &self.access)
            .field("asn1_type", &self.asn1_type)
            .field("ops", &self.ops())
            .finish()
    }
}
