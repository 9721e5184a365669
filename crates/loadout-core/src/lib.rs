//! Configuration-driven plugin registry and lifecycle manager.
//!
//! A configuration source lists logical plugin names, each bound to a plugin
//! type. [`PluginManager`] builds every named plugin through an injected
//! factory, runs an injected initializer on it, and keeps the instances that
//! made it in a queryable, load-ordered registry.
pub mod kernel;
pub mod plugin_system;
pub mod storage;

pub use kernel::error::{Error, Result};
pub use kernel::KernelComponent;
pub use plugin_system::{
    LoadReport, PluginCatalog, PluginEntry, PluginFactory, PluginInitializer, PluginManager,
    PluginSystemError, SharedPluginManager, SkipReason,
};
pub use storage::{ConfigData, ConfigFormat, ConfigManager, ConfigSource};

#[cfg(test)]
mod tests;
