// CLASSIFICATION: COMMUNITY
// Filename: lib.rs v0.1
// Date Modified: 2026-10-19
// Author: Lukas Bower

//! Thread-synchronized SNMP node proxies.
//!
//! An SNMP agent thread resolves and reads/writes instances of leaf nodes
//! whose data lives on another thread. [`threadsync::ProxyNode`] forwards
//! each operation over a [`threadsync::SyncChannel`] and blocks until the
//! target thread has run it.
//!
//! ```no_run
//! use std::sync::Arc;
//! use snmp_threadsync::config::ThreadSyncConfig;
//! use snmp_threadsync::snmp::{LeafNode, ObjectId};
//! use snmp_threadsync::threadsync::{ProxyNode, SyncChannel, TargetThread};
//!
//! # fn demo(node: Arc<dyn LeafNode>) -> std::io::Result<()> {
//! let config = ThreadSyncConfig::default();
//! let target = TargetThread::spawn(&config)?;
//! let channel = SyncChannel::with_config(config, target.dispatcher());
//! let proxy = ProxyNode::for_target(node, channel);
//!
//! let request = ObjectId::from_slice(&[0]).unwrap();
//! if let Ok(mut inst) = proxy.get_instance(&[1, 3, 6, 1, 2, 1, 1, 1], &request) {
//!     let mut buf = [0u8; 64];
//!     let _len = inst.get_value(&mut buf);
//!     inst.release();
//! }
//! # Ok(())
//! # }
//! ```

/// SNMP status codes.
pub mod error;

/// Environment-driven configuration.
pub mod config;

/// Object identifiers and the leaf node / node instance model.
pub mod snmp;

/// Sync channel, proxy nodes and target-thread dispatch.
pub mod threadsync;

pub use error::{SnmpErr, SnmpResult};
