// CLASSIFICATION: COMMUNITY
// Filename: proxy.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-19

//! Proxy node and the instance handles it produces.
//!
//! A [`ProxyNode`] stands in for a [`LeafNode`] living on another thread.
//! Resolving through it yields a [`ProxyInstance`] whose value operations are
//! marshalled over the node's [`SyncChannel`].

use std::cmp;
use std::fmt;
use std::mem;
use std::sync::Arc;

use log::debug;

use super::call::{CallArgs, CallContext, CallReturn, Operation};
use super::channel::SyncChannel;
use crate::error::{SnmpErr, SnmpResult};
use crate::snmp::{Access, Asn1Type, InstanceOps, LeafNode, ObjectId};

/// Proxy for a target node reached through a sync channel.
#[derive(Clone)]
pub struct ProxyNode {
    oid: u32,
    target: Arc<dyn LeafNode>,
    channel: Arc<SyncChannel>,
}

impl ProxyNode {
    /// Proxy registered under `oid` for `target`. Resolves fail with
    /// `NoSuchInstance` unless `oid` equals the target's identifier.
    pub fn new(oid: u32, target: Arc<dyn LeafNode>, channel: Arc<SyncChannel>) -> Self {
        Self {
            oid,
            target,
            channel,
        }
    }

    /// Proxy registered under the target's own identifier.
    pub fn for_target(target: Arc<dyn LeafNode>, channel: Arc<SyncChannel>) -> Self {
        let oid = target.oid();
        Self::new(oid, target, channel)
    }

    pub fn oid(&self) -> u32 {
        self.oid
    }

    pub fn target(&self) -> &Arc<dyn LeafNode> {
        &self.target
    }

    pub fn channel(&self) -> &Arc<SyncChannel> {
        &self.channel
    }

    /// Resolve the exact instance `instance_oid` below `root_oid`.
    pub fn get_instance(
        &self,
        root_oid: &[u32],
        instance_oid: &ObjectId,
    ) -> SnmpResult<ProxyInstance> {
        self.resolve(Operation::GetInstance, root_oid, instance_oid)
    }

    /// Resolve the first instance after `instance_oid` below `root_oid`.
    pub fn get_next_instance(
        &self,
        root_oid: &[u32],
        instance_oid: &ObjectId,
    ) -> SnmpResult<ProxyInstance> {
        self.resolve(Operation::GetNextInstance, root_oid, instance_oid)
    }

    fn resolve(
        &self,
        op: Operation,
        root_oid: &[u32],
        instance_oid: &ObjectId,
    ) -> SnmpResult<ProxyInstance> {
        let target_oid = self.target.oid();
        if self.oid != target_oid {
            debug!(
                "[{}] sync node OID {} does not match target node OID {}",
                self.channel.label(),
                self.oid,
                target_oid
            );
            return Err(SnmpErr::NoSuchInstance);
        }

        let context = match CallContext::for_resolve(self, root_oid, instance_oid) {
            Ok(context) => context,
            Err(SnmpErr::ResourceUnavailable) => {
                debug!(
                    "[{}] cannot allocate call context for {:?}",
                    self.channel.label(),
                    root_oid
                );
                return Err(SnmpErr::NoSuchInstance);
            }
            Err(e) => {
                debug!(
                    "[{}] rejected root OID of {} sub-identifiers: {}",
                    self.channel.label(),
                    root_oid.len(),
                    e
                );
                return Err(SnmpErr::NoSuchInstance);
            }
        };
        self.channel.context_allocated();

        let done = self.channel.call(op, context);
        let status = match (done.executed, done.context.retval) {
            (true, CallReturn::Status(status)) => status,
            _ => Err(SnmpErr::NoSuchInstance),
        };
        match status {
            Ok(()) => Ok(ProxyInstance::bind(done.context)),
            Err(e) => {
                // Failed resolves own nothing on the target side.
                drop(done.context);
                self.channel.context_freed();
                Err(e)
            }
        }
    }
}

impl fmt::Debug for ProxyNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProxyNode")
            .field("oid", &self.oid)
            .field("target_oid", &self.target.oid())
            .field("channel", &self.channel.label())
            .finish()
    }
}

/// Caller-side handle of one resolved instance.
///
/// Owns the call context for its whole life. Value operations that the real
/// instance does not support return `None`. [`ProxyInstance::release`]
/// consumes the handle; dropping it has the same effect.
pub struct ProxyInstance {
    access: Access,
    asn1_type: Asn1Type,
    instance_oid: ObjectId,
    ops: InstanceOps,
    context: Option<Box<CallContext>>,
}

impl ProxyInstance {
    fn bind(context: Box<CallContext>) -> Self {
        let mirror = &context.mirror;
        let mut ops = InstanceOps::RELEASE;
        ops.set(InstanceOps::GET_VALUE, mirror.get_value.is_some());
        ops.set(InstanceOps::SET_VALUE, mirror.set_value.is_some());
        ops.set(InstanceOps::SET_TEST, mirror.set_test.is_some());
        Self {
            access: mirror.access,
            asn1_type: mirror.asn1_type,
            instance_oid: mirror.instance_oid.clone(),
            ops,
            context: Some(context),
        }
    }

    pub fn access(&self) -> Access {
        self.access
    }

    pub fn asn1_type(&self) -> Asn1Type {
        self.asn1_type
    }

    /// Identifier of the resolved instance.
    pub fn instance_oid(&self) -> &ObjectId {
        &self.instance_oid
    }

    /// Operations bound on this handle. `RELEASE` is always present.
    pub fn ops(&self) -> InstanceOps {
        self.ops
    }

    /// Read the value into `value` and return the length reported by the
    /// real instance.
    pub fn get_value(&mut self, value: &mut [u8]) -> Option<u16> {
        if !self.ops.contains(InstanceOps::GET_VALUE) {
            return None;
        }
        let mut buf = Vec::new();
        if buf.try_reserve_exact(value.len()).is_err() {
            debug!("cannot allocate {} byte value buffer", value.len());
            return Some(0);
        }
        buf.resize(value.len(), 0);

        let (executed, retval, args) = self.dispatch(Operation::GetValue, CallArgs::Fetch { buf })?;
        let len = match (executed, retval) {
            (true, CallReturn::Length(len)) => len,
            _ => return Some(0),
        };
        if let CallArgs::Fetch { buf } = args {
            let n = cmp::min(usize::from(len), buf.len());
            value[..n].copy_from_slice(&buf[..n]);
        }
        Some(len)
    }

    /// Ask the real instance whether `value` may be written.
    pub fn set_test(&mut self, value: &[u8]) -> Option<SnmpResult<()>> {
        if !self.ops.contains(InstanceOps::SET_TEST) {
            return None;
        }
        Some(self.store(Operation::SetTest, value))
    }

    /// Write `value` to the real instance.
    pub fn set_value(&mut self, value: &[u8]) -> Option<SnmpResult<()>> {
        if !self.ops.contains(InstanceOps::SET_VALUE) {
            return None;
        }
        Some(self.store(Operation::SetValue, value))
    }

    /// Run the real instance's release on the target thread, then free the
    /// call context.
    pub fn release(mut self) {
        self.release_context();
    }

    fn store(&mut self, op: Operation, value: &[u8]) -> SnmpResult<()> {
        let mut copy = Vec::new();
        if copy.try_reserve_exact(value.len()).is_err() {
            debug!("cannot allocate {} byte value buffer", value.len());
            return Err(SnmpErr::ResourceUnavailable);
        }
        copy.extend_from_slice(value);
        match self.dispatch(op, CallArgs::Store { value: copy }) {
            Some((true, CallReturn::Status(status), _)) => status,
            _ => Err(SnmpErr::GenError),
        }
    }

    /// Marshal `op` with `args` and take back the result slot and arguments.
    fn dispatch(
        &mut self,
        op: Operation,
        args: CallArgs,
    ) -> Option<(bool, CallReturn, CallArgs)> {
        let mut context = self.context.take()?;
        context.args = args;
        context.retval = CallReturn::Pending;
        let channel = Arc::clone(context.node.channel());

        let mut done = channel.call(op, context);
        let retval = mem::take(&mut done.context.retval);
        let args = mem::take(&mut done.context.args);
        self.context = Some(done.context);
        Some((done.executed, retval, args))
    }

    fn release_context(&mut self) {
        let Some(context) = self.context.take() else {
            return;
        };
        let channel = Arc::clone(context.node.channel());
        let context = if context.mirror.release_instance.is_some() {
            channel.call(Operation::Release, context).context
        } else {
            context
        };
        drop(context);
        channel.context_freed();
    }
}

impl Drop for ProxyInstance {
    fn drop(&mut self) {
        self.release_context();
    }
}

impl fmt::Debug for ProxyInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProxyInstance")
            .field("instance_oid", &self.instance_oid)
            .field("access", &self.access)
            .field("asn1_type", &self.asn1_type)
            .field("ops", &self.ops)
            .finish()
    }
}
