// CLASSIFICATION: COMMUNITY
// Filename: config.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-19

//! Runtime configuration for sync channels and target threads.

use std::env;

use log::warn;
use thiserror::Error;

/// Default label used in channel log lines.
pub const DEFAULT_LABEL: &str = "threadsync";
/// Default name of a spawned target thread.
pub const DEFAULT_WORKER_NAME: &str = "snmp-target";

/// Configuration shared by [`crate::threadsync::SyncChannel`] and
/// [`crate::threadsync::TargetThread`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ThreadSyncConfig {
    /// Label prefixed to every log line emitted for the channel.
    pub label: String,
    /// Name given to a spawned target thread.
    pub worker_name: String,
    /// Stack size of a spawned target thread, platform default when `None`.
    pub worker_stack_size: Option<usize>,
}

/// Errors produced while reading configuration from the environment.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("THREADSYNC_WORKER_STACK is not a byte count: {0:?}")]
    InvalidStackSize(String),
    #[error("THREADSYNC_WORKER_STACK must be non-zero")]
    ZeroStackSize,
}

impl Default for ThreadSyncConfig {
    /// Environment values where valid. A bad stack size is logged and left
    /// at the platform default; label and worker name still apply.
    fn default() -> Self {
        match Self::from_env() {
            Ok(config) => config,
            Err(e) => {
                warn!("{}; using the platform default stack size", e);
                Self {
                    worker_stack_size: None,
                    ..Self::names_from_env()
                }
            }
        }
    }
}

impl ThreadSyncConfig {
    /// Built-in values, ignoring the environment.
    pub fn builtin() -> Self {
        Self {
            label: DEFAULT_LABEL.into(),
            worker_name: DEFAULT_WORKER_NAME.into(),
            worker_stack_size: None,
        }
    }

    /// Read `THREADSYNC_LABEL`, `THREADSYNC_WORKER_NAME` and
    /// `THREADSYNC_WORKER_STACK`, falling back to built-in values for unset
    /// variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let worker_stack_size = match env::var("THREADSYNC_WORKER_STACK") {
            Ok(raw) => Some(parse_stack_size(&raw)?),
            Err(_) => None,
        };
        Ok(Self {
            worker_stack_size,
            ..Self::names_from_env()
        })
    }

    fn names_from_env() -> Self {
        let base = Self::builtin();
        Self {
            label: env::var("THREADSYNC_LABEL").unwrap_or(base.label),
            worker_name: env::var("THREADSYNC_WORKER_NAME").unwrap_or(base.worker_name),
            worker_stack_size: base.worker_stack_size,
        }
    }

    /// Replace the channel label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Replace the target thread name.
    pub fn with_worker_name(mut self, name: impl Into<String>) -> Self {
        self.worker_name = name.into();
        self
    }
}

fn parse_stack_size(raw: &str) -> Result<usize, ConfigError> {
    let size = raw
        .trim()
        .parse::<usize>()
        .map_err(|_| ConfigError::InvalidStackSize(raw.to_string()))?;
    if size == 0 {
        return Err(ConfigError::ZeroStackSize);
    }
    Ok(size)
}
