// CLASSIFICATION: COMMUNITY
// Filename: worker.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-19

//! Ready-made dispatch functions.
//!
//! [`TargetThread`] owns a thread that runs every call posted to it, the
//! way an agent posts work to the thread owning the network stack.
//! [`inline_dispatch`] runs calls on the caller's own thread.

use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle, ThreadId};

use log::{info, warn};

use super::call::SyncCall;
use crate::config::ThreadSyncConfig;

enum TargetMsg {
    Call(SyncCall),
    Stop,
}

/// Thread executing sync calls in arrival order.
pub struct TargetThread {
    name: String,
    tx: Sender<TargetMsg>,
    handle: Option<JoinHandle<()>>,
}

impl TargetThread {
    /// Spawn the target thread named by `config.worker_name`.
    pub fn spawn(config: &ThreadSyncConfig) -> io::Result<Self> {
        let (tx, rx) = mpsc::channel();
        let name = config.worker_name.clone();
        let mut builder = thread::Builder::new().name(name.clone());
        if let Some(size) = config.worker_stack_size {
            builder = builder.stack_size(size);
        }
        let thread_name = name.clone();
        let handle = builder.spawn(move || Self::run(&thread_name, rx))?;
        info!("[{}] target thread started", name);
        Ok(Self {
            name,
            tx,
            handle: Some(handle),
        })
    }

    fn run(name: &str, rx: Receiver<TargetMsg>) {
        while let Ok(msg) = rx.recv() {
            match msg {
                TargetMsg::Call(call) => {
                    let op = call.operation();
                    // An unwinding call replies as abandoned; keep serving.
                    if panic::catch_unwind(AssertUnwindSafe(|| call.run())).is_err() {
                        warn!("[{}] {:?} panicked on target thread", name, op);
                    }
                }
                TargetMsg::Stop => break,
            }
        }
        info!("[{}] target thread stopped", name);
    }

    /// Dispatch function posting calls to this thread.
    ///
    /// Calls posted after [`TargetThread::shutdown`] are dropped, which
    /// abandons them.
    pub fn dispatcher(&self) -> impl Fn(SyncCall) + Send + Sync + 'static {
        let tx = self.tx.clone();
        move |call| {
            let _ = tx.send(TargetMsg::Call(call));
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Identifier of the running thread, `None` after shutdown.
    pub fn thread_id(&self) -> Option<ThreadId> {
        self.handle.as_ref().map(|h| h.thread().id())
    }

    /// Stop the thread after the calls already queued and wait for it.
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        let Some(handle) = self.handle.take() else {
            return;
        };
        let _ = self.tx.send(TargetMsg::Stop);
        if handle.join().is_err() {
            warn!("[{}] target thread exited with a panic", self.name);
        }
    }
}

impl Drop for TargetThread {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Dispatch function running each call immediately on the calling thread.
///
/// A panicking operation is caught here, so the caller sees the call as
/// abandoned exactly as with [`TargetThread`].
pub fn inline_dispatch() -> impl Fn(SyncCall) + Send + Sync + 'static {
    |call: SyncCall| {
        let op = call.operation();
        if panic::catch_unwind(AssertUnwindSafe(|| call.run())).is_err() {
            warn!("{:?} panicked on calling thread", op);
        }
    }
}
