// CLASSIFICATION: COMMUNITY
// Filename: mod.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-19

//! Cross-thread proxy for SNMP leaf nodes.
//!
//! Every proxied subtree shares one [`SyncChannel`]. Calls through a channel
//! are serialized: the caller blocks while the target thread runs the real
//! operation and hands the call context back.

pub mod call;
pub mod channel;
pub mod proxy;
pub mod worker;

pub use call::{Operation, SyncCall};
pub use channel::{ChannelStats, DispatchFn, SyncChannel};
pub use proxy::{ProxyInstance, ProxyNode};
pub use worker::{inline_dispatch, TargetThread};
