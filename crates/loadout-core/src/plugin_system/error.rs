//! # Loadout Core Plugin System Errors
//!
//! [`PluginSystemError`] covers failures that end a whole load call or a
//! query. Per-name failures during loading (factory miss, initializer
//! failure) are not errors at this level; they are recorded as
//! [`SkipReason`](crate::plugin_system::SkipReason) values in the load report.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PluginSystemError {
    #[error("No plugins configured under key '{key}'")]
    ConfigurationEmpty { key: String },

    #[error("Config key '{key}' is not a list of plugin names")]
    MalformedPluginList { key: String },

    #[error("Plugin '{name}' is already registered")]
    DuplicateName { name: String },

    #[error("Plugin '{name}' is not registered")]
    UnknownPlugin { name: String },

    #[error("None of the plugins configured under '{key}' could be loaded")]
    NoPluginsLoaded { key: String },

    #[error("Plugin initialization error for '{name}': {message}")]
    InitializationError { name: String, message: String },
}

impl PluginSystemError {
    /// Shorthand for initializers rejecting a plugin instance.
    pub fn init(name: &str, message: impl Into<String>) -> Self {
        PluginSystemError::InitializationError {
            name: name.to_string(),
            message: message.into(),
        }
    }
}
