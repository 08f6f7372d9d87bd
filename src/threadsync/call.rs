// CLASSIFICATION: COMMUNITY
// Filename: call.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-19

//! Per-instance call context and the unit of work shipped to the target
//! thread.

use std::sync::mpsc::SyncSender;
use std::sync::Arc;

use log::warn;

use super::proxy::ProxyNode;
use crate::error::{SnmpErr, SnmpResult};
use crate::snmp::{NodeInstance, ObjectId};

/// Operation carried by a [`SyncCall`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    GetInstance,
    GetNextInstance,
    GetValue,
    SetTest,
    SetValue,
    Release,
}

/// Arguments of the call in flight.
#[derive(Debug, Default)]
pub(crate) enum CallArgs {
    #[default]
    Empty,
    /// Resolve arguments.
    Path { root_oid: ObjectId },
    /// Output buffer for get-value.
    Fetch { buf: Vec<u8> },
    /// Input value for set-test and set-value.
    Store { value: Vec<u8> },
}

/// Result slot written on the target thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum CallReturn {
    #[default]
    Pending,
    Status(SnmpResult<()>),
    Length(u16),
}

/// State carried between the caller and the target thread for one
/// instance. Owned by exactly one [`super::ProxyInstance`].
pub(crate) struct CallContext {
    pub(crate) args: CallArgs,
    pub(crate) retval: CallReturn,
    pub(crate) node: ProxyNode,
    /// Mirror of the real instance, filled by the target node.
    pub(crate) mirror: NodeInstance,
}

impl CallContext {
    /// Context for a resolve of `instance_oid` below `root_oid`.
    pub(crate) fn for_resolve(
        node: &ProxyNode,
        root_oid: &[u32],
        instance_oid: &ObjectId,
    ) -> SnmpResult<Box<Self>> {
        let root_oid = ObjectId::from_slice(root_oid)?;
        let mut oid = ObjectId::empty();
        oid.assign(instance_oid)?;
        Ok(Box::new(Self {
            args: CallArgs::Path { root_oid },
            retval: CallReturn::Pending,
            node: node.clone(),
            mirror: NodeInstance::new(Arc::clone(node.target()), oid),
        }))
    }

    /// Run `op` against the real node or mirror instance. Called on the
    /// target thread.
    fn execute(&mut self, op: Operation) {
        self.retval = match op {
            Operation::GetInstance | Operation::GetNextInstance => {
                let CallArgs::Path { root_oid } = &self.args else {
                    return self.mismatched(op);
                };
                let target = Arc::clone(self.node.target());
                let status = if op == Operation::GetInstance {
                    target.get_instance(root_oid.as_slice(), &mut self.mirror)
                } else {
                    target.get_next_instance(root_oid.as_slice(), &mut self.mirror)
                };
                CallReturn::Status(status)
            }
            Operation::GetValue => {
                let Some(get) = self.mirror.get_value.clone() else {
                    return self.mismatched(op);
                };
                let CallArgs::Fetch { buf } = &mut self.args else {
                    return self.mismatched(op);
                };
                CallReturn::Length(get(&mut self.mirror, buf.as_mut_slice()))
            }
            Operation::SetTest | Operation::SetValue => {
                let f = if op == Operation::SetTest {
                    self.mirror.set_test.clone()
                } else {
                    self.mirror.set_value.clone()
                };
                let Some(f) = f else {
                    return self.mismatched(op);
                };
                let CallArgs::Store { value } = &self.args else {
                    return self.mismatched(op);
                };
                CallReturn::Status(f(&mut self.mirror, value.as_slice()))
            }
            Operation::Release => {
                if let Some(release) = self.mirror.release_instance.clone() {
                    release(&mut self.mirror);
                }
                CallReturn::Pending
            }
        };
    }

    fn mismatched(&mut self, op: Operation) {
        warn!(
            "[{}] {:?} dispatched without matching arguments or binding",
            self.node.channel().label(),
            op
        );
        self.retval = match op {
            Operation::GetValue => CallReturn::Length(0),
            _ => CallReturn::Status(Err(SnmpErr::GenError)),
        };
    }
}

/// Context handed back to the caller once a call finishes.
pub(crate) struct Completion {
    pub(crate) context: Box<CallContext>,
    /// `false` when the call was dropped before running to the end.
    pub(crate) executed: bool,
}

/// One operation bound to its context, waiting to run on the target thread.
///
/// The dispatch function passed to [`super::SyncChannel::new`] receives a
/// `SyncCall` and must arrange for [`SyncCall::run`] to execute on the target
/// thread. Dropping a call without running it releases the waiting caller
/// with the call marked as abandoned.
pub struct SyncCall {
    operation: Operation,
    context: Option<Box<CallContext>>,
    reply: SyncSender<Completion>,
}

impl SyncCall {
    pub(crate) fn new(
        operation: Operation,
        context: Box<CallContext>,
        reply: SyncSender<Completion>,
    ) -> Self {
        Self {
            operation,
            context: Some(context),
            reply,
        }
    }

    /// Operation this call will perform.
    pub fn operation(&self) -> Operation {
        self.operation
    }

    /// Execute the operation on the current thread and signal the caller.
    pub fn run(mut self) {
        if let Some(context) = self.context.as_mut() {
            context.execute(self.operation);
        }
        self.complete(true);
    }

    fn complete(&mut self, executed: bool) {
        if let Some(context) = self.context.take() {
            // Capacity 1 and one completion per call: never blocks.
            let _ = self.reply.send(Completion { context, executed });
        }
    }
}

impl Drop for SyncCall {
    fn drop(&mut self) {
        self.complete(false);
    }
}

impl std::fmt::Debug for SyncCall {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncCall")
            .field("operation", &self.operation)
            .field("pending", &self.context.is_some())
            .finish()
    }
}
