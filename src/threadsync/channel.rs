// CLASSIFICATION: COMMUNITY
// Filename: channel.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-19

//! Sync channel: the single serialized path from callers to a target thread.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc;
use std::sync::{Arc, Mutex, PoisonError};

use log::{trace, warn};

use super::call::{CallContext, Completion, Operation, SyncCall};
use crate::config::ThreadSyncConfig;

/// Function moving a [`SyncCall`] onto the target thread.
///
/// It must cause [`SyncCall::run`] to execute on the target thread and
/// return without waiting for it.
pub type DispatchFn = Box<dyn Fn(SyncCall) + Send + Sync>;

/// Counters kept per channel.
#[derive(Debug, Default)]
struct ChannelCounters {
    dispatched: AtomicU64,
    abandoned: AtomicU64,
    contexts_allocated: AtomicU64,
    contexts_freed: AtomicU64,
}

/// Point-in-time copy of a channel's counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChannelStats {
    /// Calls handed to the dispatch function.
    pub dispatched: u64,
    /// Calls dropped before they ran to completion.
    pub abandoned: u64,
    pub contexts_allocated: u64,
    pub contexts_freed: u64,
}

impl ChannelStats {
    /// Contexts currently owned by live instance handles.
    pub fn live_contexts(&self) -> u64 {
        self.contexts_allocated.saturating_sub(self.contexts_freed)
    }
}

/// Lock plus dispatch function shared by every proxy node of one subtree.
pub struct SyncChannel {
    lock: Mutex<()>,
    dispatch: DispatchFn,
    config: ThreadSyncConfig,
    counters: ChannelCounters,
}

impl SyncChannel {
    /// Create a channel with configuration read from the environment.
    pub fn new<F>(dispatch: F) -> Arc<Self>
    where
        F: Fn(SyncCall) + Send + Sync + 'static,
    {
        Self::with_config(ThreadSyncConfig::default(), dispatch)
    }

    /// Create a channel with explicit configuration.
    pub fn with_config<F>(config: ThreadSyncConfig, dispatch: F) -> Arc<Self>
    where
        F: Fn(SyncCall) + Send + Sync + 'static,
    {
        Arc::new(Self {
            lock: Mutex::new(()),
            dispatch: Box::new(dispatch),
            config,
            counters: ChannelCounters::default(),
        })
    }

    /// Label used in log lines.
    pub fn label(&self) -> &str {
        &self.config.label
    }

    /// Snapshot of the channel counters.
    pub fn stats(&self) -> ChannelStats {
        ChannelStats {
            dispatched: self.counters.dispatched.load(Ordering::Relaxed),
            abandoned: self.counters.abandoned.load(Ordering::Relaxed),
            contexts_allocated: self.counters.contexts_allocated.load(Ordering::Relaxed),
            contexts_freed: self.counters.contexts_freed.load(Ordering::Relaxed),
        }
    }

    /// Run `op` against `context` on the target thread and block until it
    /// completes. Calls on one channel never overlap.
    pub(crate) fn call(&self, op: Operation, context: Box<CallContext>) -> Completion {
        // The lock guards no data, a panic while held leaves nothing torn.
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let (reply_tx, reply_rx) = mpsc::sync_channel(1);
        self.counters.dispatched.fetch_add(1, Ordering::Relaxed);
        trace!("[{}] dispatch {:?}", self.config.label, op);

        (self.dispatch)(SyncCall::new(op, context, reply_tx));

        let completion = match reply_rx.recv() {
            Ok(completion) => completion,
            // SyncCall replies from Drop, so the sender never goes away silently.
            Err(_) => unreachable!("sync call dropped without replying"),
        };
        if !completion.executed {
            self.counters.abandoned.fetch_add(1, Ordering::Relaxed);
            warn!("[{}] {:?} abandoned before completion", self.config.label, op);
        } else {
            trace!("[{}] {:?} complete", self.config.label, op);
        }
        completion
    }

    pub(crate) fn context_allocated(&self) {
        self.counters
            .contexts_allocated
            .fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn context_freed(&self) {
        self.counters.contexts_freed.fetch_add(1, Ordering::Relaxed);
    }
}

impl fmt::Debug for SyncChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncChannel")
            .field("label", &self.config.label)
            .field("stats", &self.stats())
            .finish()
    }
}
