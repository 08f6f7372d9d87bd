// CLASSIFICATION: COMMUNITY
// Filename: threadsync_values.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-19

mod common;

use std::sync::atomic::Ordering;
use std::sync::Arc;

use common::{init_logger, oid, StubNode};
use snmp_threadsync::config::ThreadSyncConfig;
use snmp_threadsync::snmp::InstanceOps;
use snmp_threadsync::threadsync::{ProxyNode, SyncChannel, TargetThread};
use snmp_threadsync::SnmpErr;

const ROOT: [u32; 5] = [1, 3, 6, 1, 2];

struct Fixture {
    stub: Arc<StubNode>,
    channel: Arc<SyncChannel>,
    proxy: ProxyNode,
    _target: TargetThread,
}

fn fixture(stub: StubNode, label: &str) -> Fixture {
    init_logger();
    let config = ThreadSyncConfig::builtin()
        .with_label(label)
        .with_worker_name(format!("{label}-target"));
    let target = TargetThread::spawn(&config).unwrap();
    let channel = SyncChannel::with_config(config, target.dispatcher());
    let stub = Arc::new(stub);
    let proxy = ProxyNode::for_target(stub.clone(), Arc::clone(&channel));
    Fixture {
        stub,
        channel,
        proxy,
        _target: target,
    }
}

#[test]
fn set_then_get_returns_written_value() {
    let fx = fixture(StubNode::all_ops(5), "round-trip");
    let mut inst = fx.proxy.get_instance(&ROOT, &oid(&[0])).unwrap();

    assert_eq!(inst.set_test(b"sysContact"), Some(Ok(())));
    assert_eq!(inst.set_value(b"sysContact"), Some(Ok(())));
    let mut buf = [0u8; 64];
    let len = inst.get_value(&mut buf).unwrap();
    assert_eq!(&buf[..usize::from(len)], b"sysContact");

    inst.release();
    assert_eq!(fx.stub.journal.use_after_release.load(Ordering::SeqCst), 0);
}

#[test]
fn set_test_status_is_returned_unchanged() {
    let mut stub = StubNode::all_ops(5);
    stub.max_len = 4;
    let fx = fixture(stub, "set-test");
    let mut inst = fx.proxy.get_instance(&ROOT, &oid(&[0])).unwrap();

    assert_eq!(inst.set_test(b"1234"), Some(Ok(())));
    assert_eq!(inst.set_test(b"12345"), Some(Err(SnmpErr::WrongLength)));
    inst.release();
}

#[test]
fn get_value_reports_full_length_into_short_buffer() {
    let fx = fixture(StubNode::all_ops(5), "short-buffer");
    *fx.stub.store.lock().unwrap() = b"abcdefgh".to_vec();
    let mut inst = fx.proxy.get_instance(&ROOT, &oid(&[0])).unwrap();

    let mut buf = [0u8; 4];
    assert_eq!(inst.get_value(&mut buf), Some(8));
    assert_eq!(&buf, b"abcd");
    inst.release();
}

#[test]
fn real_release_completes_before_context_is_freed() {
    let fx = fixture(StubNode::all_ops(5), "release-order");
    let mut inst = fx.proxy.get_instance(&ROOT, &oid(&[0])).unwrap();
    let mut buf = [0u8; 16];
    inst.get_value(&mut buf).unwrap();
    inst.release();

    let events = fx.stub.journal.events();
    let released = events.iter().position(|e| *e == "released").unwrap();
    let freed = events.iter().position(|e| *e == "freed").unwrap();
    assert!(released < freed, "events: {:?}", events);
    assert_eq!(fx.stub.journal.releases.load(Ordering::SeqCst), 1);
    assert_eq!(fx.channel.stats().live_contexts(), 0);
}

#[test]
fn release_without_real_releaser_skips_dispatch() {
    let fx = fixture(StubNode::new(5, InstanceOps::GET_VALUE), "no-releaser");
    let inst = fx.proxy.get_instance(&ROOT, &oid(&[0])).unwrap();
    assert!(inst.ops().contains(InstanceOps::RELEASE));
    inst.release();

    let stats = fx.channel.stats();
    assert_eq!(stats.dispatched, 1);
    assert_eq!(stats.contexts_freed, 1);
    assert_eq!(fx.stub.journal.events(), ["resolve", "freed"]);
}

#[test]
fn dropping_a_handle_releases_exactly_once() {
    let fx = fixture(StubNode::all_ops(5), "drop");
    {
        let mut inst = fx.proxy.get_instance(&ROOT, &oid(&[0])).unwrap();
        assert_eq!(inst.set_value(b"x"), Some(Ok(())));
    }
    assert_eq!(fx.stub.journal.releases.load(Ordering::SeqCst), 1);
    assert_eq!(fx.channel.stats().live_contexts(), 0);
}

#[test]
fn each_handle_owns_its_own_context() {
    let fx = fixture(StubNode::all_ops(5), "two-handles");
    let first = fx.proxy.get_instance(&ROOT, &oid(&[0])).unwrap();
    let mut second = fx.proxy.get_instance(&ROOT, &oid(&[0])).unwrap();
    assert_eq!(fx.channel.stats().live_contexts(), 2);

    first.release();
    assert_eq!(fx.channel.stats().live_contexts(), 1);
    assert_eq!(second.set_value(b"still-live"), Some(Ok(())));
    second.release();

    assert_eq!(fx.stub.journal.releases.load(Ordering::SeqCst), 2);
    assert_eq!(fx.stub.journal.use_after_release.load(Ordering::SeqCst), 0);
    assert_eq!(fx.channel.stats().live_contexts(), 0);
}

#[test]
fn unbound_value_operations_return_none() {
    let fx = fixture(StubNode::new(5, InstanceOps::GET_VALUE), "unbound");
    let mut inst = fx.proxy.get_instance(&ROOT, &oid(&[0])).unwrap();
    assert_eq!(inst.set_test(b"x"), None);
    assert_eq!(inst.set_value(b"x"), None);
    inst.release();
    // Only resolve crossed the channel.
    assert_eq!(fx.channel.stats().dispatched, 1);
}
