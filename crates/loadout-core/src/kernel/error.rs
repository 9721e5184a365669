//! # Loadout Core Kernel Errors
//!
//! Defines the top-level [`Error`] type. Each subsystem owns a typed error enum
//! ([`PluginSystemError`], [`StorageSystemError`]) and the kernel error wraps
//! them, so callers can propagate anything with `?` and still match on the
//! subsystem variant when they care.
use std::path::PathBuf;
use std::result::Result as StdResult;

use crate::plugin_system::error::PluginSystemError;
use crate::storage::error::StorageSystemError;
use thiserror::Error as ThisError;

/// Top-level error type for Loadout
#[derive(Debug, ThisError)]
pub enum Error {
    /// Specific, typed plugin system error
    #[error("Plugin system error: {0}")]
    PluginSystem(#[from] PluginSystemError),

    /// Specific, typed storage system error
    #[error("Storage system error: {0}")]
    StorageSystem(#[from] StorageSystemError),

    /// Error occurring during a specific kernel lifecycle phase.
    #[error("Kernel lifecycle error during {phase:?}: {message}")]
    KernelLifecycleError {
        phase: KernelLifecyclePhase,
        component_name: Option<String>,
        message: String,
        #[source]
        source: Option<Box<Error>>,
    },
}

/// Represents a specific phase in a component's lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum KernelLifecyclePhase {
    #[error("Initialize")]
    Initialize,
    #[error("Start")]
    Start,
}

/// Shorthand for Result with our Error type
pub type Result<T> = StdResult<T, Error>;

impl Error {
    /// Wrap an I/O failure with the operation and path it happened on.
    pub fn io(source: std::io::Error, operation: impl Into<String>, path: PathBuf) -> Self {
        Error::StorageSystem(StorageSystemError::io(source, operation, path))
    }

    /// Wrap `source` as a lifecycle failure of `component_name` in `phase`.
    pub fn lifecycle(phase: KernelLifecyclePhase, component_name: &str, source: Error) -> Self {
        Error::KernelLifecycleError {
            phase,
            component_name: Some(component_name.to_string()),
            message: source.to_string(),
            source: Some(Box::new(source)),
        }
    }
}
