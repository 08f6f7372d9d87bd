// CLASSIFICATION: COMMUNITY
// Filename: mod.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-19

//! Target-side stubs shared by the thread-sync tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, ThreadId};

use snmp_threadsync::snmp::{Access, Asn1Type, InstanceOps, LeafNode, NodeInstance, ObjectId};
use snmp_threadsync::{SnmpErr, SnmpResult};

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn oid(ids: &[u32]) -> ObjectId {
    ObjectId::from_slice(ids).unwrap()
}

/// Shared record of what happened on the target side.
#[derive(Default)]
pub struct Journal {
    pub events: Mutex<Vec<&'static str>>,
    pub threads: Mutex<Vec<ThreadId>>,
    pub resolves: AtomicUsize,
    pub releases: AtomicUsize,
    pub use_after_release: AtomicUsize,
}

impl Journal {
    pub fn record(&self, event: &'static str) {
        self.events.lock().unwrap().push(event);
        self.threads.lock().unwrap().push(thread::current().id());
    }

    pub fn events(&self) -> Vec<&'static str> {
        self.events.lock().unwrap().clone()
    }
}

/// Stored in the instance reference slot; logs when the context is freed.
pub struct FreeMarker {
    journal: Arc<Journal>,
    released: AtomicBool,
}

impl FreeMarker {
    fn check_live(&self) {
        if self.released.load(Ordering::SeqCst) {
            self.journal.use_after_release.fetch_add(1, Ordering::SeqCst);
        }
    }
}

impl Drop for FreeMarker {
    fn drop(&mut self) {
        self.journal.record("freed");
    }
}

/// Scalar leaf with a single instance `.0` backed by a byte store.
pub struct StubNode {
    pub oid: u32,
    pub ops: InstanceOps,
    pub access: Access,
    pub asn1_type: Asn1Type,
    /// Status returned by every resolve instead of success.
    pub fail_with: Option<SnmpErr>,
    /// Largest value accepted by set-test.
    pub max_len: usize,
    pub store: Arc<Mutex<Vec<u8>>>,
    pub journal: Arc<Journal>,
}

impl StubNode {
    pub fn new(oid: u32, ops: InstanceOps) -> Self {
        Self {
            oid,
            ops,
            access: Access::READ_WRITE,
            asn1_type: Asn1Type::OCTET_STRING,
            fail_with: None,
            max_len: 32,
            store: Arc::new(Mutex::new(b"initial".to_vec())),
            journal: Arc::new(Journal::default()),
        }
    }

    pub fn all_ops(oid: u32) -> Self {
        Self::new(
            oid,
            InstanceOps::GET_VALUE | InstanceOps::SET_TEST | InstanceOps::SET_VALUE | InstanceOps::RELEASE,
        )
    }

    fn fill(&self, instance: &mut NodeInstance) {
        instance.access = self.access;
        instance.asn1_type = self.asn1_type;
        instance.reference = Some(Box::new(FreeMarker {
            journal: Arc::clone(&self.journal),
            released: AtomicBool::new(false),
        }));

        if self.ops.contains(InstanceOps::GET_VALUE) {
            let store = Arc::clone(&self.store);
            let journal = Arc::clone(&self.journal);
            instance.bind_get_value(move |inst, buf| {
                journal.record("get");
                if let Some(marker) = inst.reference_mut::<FreeMarker>() {
                    marker.check_live();
                }
                let data = store.lock().unwrap();
                let n = data.len().min(buf.len());
                buf[..n].copy_from_slice(&data[..n]);
                data.len() as u16
            });
        }
        if self.ops.contains(InstanceOps::SET_TEST) {
            let max_len = self.max_len;
            let journal = Arc::clone(&self.journal);
            instance.bind_set_test(move |_, value| {
                journal.record("test");
                if value.len() > max_len {
                    Err(SnmpErr::WrongLength)
                } else {
                    Ok(())
                }
            });
        }
        if self.ops.contains(InstanceOps::SET_VALUE) {
            let store = Arc::clone(&self.store);
            let journal = Arc::clone(&self.journal);
            instance.bind_set_value(move |inst, value| {
                journal.record("set");
                if let Some(marker) = inst.reference_mut::<FreeMarker>() {
                    marker.check_live();
                }
                *store.lock().unwrap() = value.to_vec();
                Ok(())
            });
        }
        if self.ops.contains(InstanceOps::RELEASE) {
            let journal = Arc::clone(&self.journal);
            instance.bind_release(move |inst| {
                if let Some(marker) = inst.reference_mut::<FreeMarker>() {
                    marker.check_live();
                    marker.released.store(true, Ordering::SeqCst);
                }
                journal.releases.fetch_add(1, Ordering::SeqCst);
                journal.record("released");
            });
        }
    }
}

impl LeafNode for StubNode {
    fn oid(&self) -> u32 {
        self.oid
    }

    fn get_instance(&self, _root_oid: &[u32], instance: &mut NodeInstance) -> SnmpResult<()> {
        self.journal.resolves.fetch_add(1, Ordering::SeqCst);
        self.journal.record("resolve");
        if let Some(err) = self.fail_with {
            return Err(err);
        }
        if instance.instance_oid.as_slice() != [0] {
            return Err(SnmpErr::NoSuchInstance);
        }
        self.fill(instance);
        Ok(())
    }

    fn get_next_instance(&self, _root_oid: &[u32], instance: &mut NodeInstance) -> SnmpResult<()> {
        self.journal.resolves.fetch_add(1, Ordering::SeqCst);
        self.journal.record("resolve-next");
        if let Some(err) = self.fail_with {
            return Err(err);
        }
        if !instance.instance_oid.is_empty() {
            return Err(SnmpErr::NoSuchInstance);
        }
        instance.instance_oid.assign(&[0])?;
        self.fill(instance);
        Ok(())
    }
}
