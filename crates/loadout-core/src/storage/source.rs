//! The configuration seam the plugin manager reads from.
use std::fmt::Debug;
use std::sync::{PoisonError, RwLock};

use crate::kernel::constants;
use crate::plugin_system::error::PluginSystemError;
use crate::storage::config::ConfigData;

/// A configured plugin name and the type configured for it, if any.
pub type ConfiguredPlugin = (String, Option<String>);

/// Source of plugin names and per-name plugin types.
///
/// Implementations decide how entries are parsed, stored and defaulted. The
/// plugin manager only needs an ordered list of names under a key and a type
/// string for each name (conventionally stored under `<name>.type`).
pub trait ConfigSource: Send + Sync + Debug {
    /// Announce that `key` will be read. Called once for the list key when a
    /// manager is built and once per `<name>.type` key while loading.
    fn declare(&self, _key: &str) {}

    /// Ordered plugin names under `key`. Duplicates are passed through as-is.
    ///
    /// A missing key reads as an empty list; a value that is not a list of
    /// strings is [`PluginSystemError::MalformedPluginList`].
    fn plugin_names(&self, key: &str) -> Result<Vec<String>, PluginSystemError>;

    /// Type of the plugin registered as `name`, if configured.
    fn plugin_type(&self, name: &str) -> Option<String>;

    /// Names under `key` paired with their types, read as one snapshot.
    ///
    /// The plugin manager reads configuration only through this method, once
    /// per load cycle. Sources that can change underneath a reader override it
    /// to hold one guard across all reads.
    fn plugin_entries(&self, key: &str) -> Result<Vec<ConfiguredPlugin>, PluginSystemError> {
        Ok(self
            .plugin_names(key)?
            .into_iter()
            .map(|name| {
                let plugin_type = self.plugin_type(&name);
                (name, plugin_type)
            })
            .collect())
    }
}

impl ConfigSource for ConfigData {
    fn declare(&self, key: &str) {
        ConfigData::declare(self, key);
    }

    fn plugin_names(&self, key: &str) -> Result<Vec<String>, PluginSystemError> {
        match self.get_path(key) {
            None => Ok(Vec::new()),
            Some(value) => serde_json::from_value(value.clone()).map_err(|_| {
                PluginSystemError::MalformedPluginList {
                    key: key.to_string(),
                }
            }),
        }
    }

    fn plugin_type(&self, name: &str) -> Option<String> {
        self.get::<String>(&constants::plugin_type_key(name))
    }
}

/// A source whose contents can be swapped between load cycles.
impl<C: ConfigSource> ConfigSource for RwLock<C> {
    fn declare(&self, key: &str) {
        self.read().unwrap_or_else(PoisonError::into_inner).declare(key);
    }

    fn plugin_names(&self, key: &str) -> Result<Vec<String>, PluginSystemError> {
        self.read().unwrap_or_else(PoisonError::into_inner).plugin_names(key)
    }

    fn plugin_type(&self, name: &str) -> Option<String> {
        self.read().unwrap_or_else(PoisonError::into_inner).plugin_type(name)
    }

    fn plugin_entries(&self, key: &str) -> Result<Vec<ConfiguredPlugin>, PluginSystemError> {
        self.read().unwrap_or_else(PoisonError::into_inner).plugin_entries(key)
    }
}
