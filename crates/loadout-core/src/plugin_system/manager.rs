use std::fmt;
use std::sync::Arc;

use log::{debug, error, info, warn};

use crate::kernel::constants;
use crate::plugin_system::error::PluginSystemError;
use crate::plugin_system::registry::{PluginEntry, PluginRegistry};
use crate::plugin_system::traits::{PluginFactory, PluginInitializer};
use crate::storage::ConfigSource;

/// Why a configured plugin was left out of the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// No `<name>.type` entry was configured
    MissingType,
    /// The factory produced no instance for the type
    FactoryMiss { plugin_type: String },
    /// The initializer rejected the instance
    InitFailure { plugin_type: String, message: String },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingType => write!(f, "no plugin type configured"),
            SkipReason::FactoryMiss { plugin_type } => {
                write!(f, "factory could not create a plugin of type '{}'", plugin_type)
            }
            SkipReason::InitFailure { plugin_type, message } => {
                write!(f, "initialization of type '{}' failed: {}", plugin_type, message)
            }
        }
    }
}

/// A configured name that did not make it into the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedPlugin {
    pub name: String,
    pub reason: SkipReason,
}

/// Outcome of a load call that ran to the end of the configured list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Number of names read from configuration, duplicates included
    pub configured: usize,
    /// Names admitted by this call, in admission order
    pub loaded: Vec<String>,
    /// Names skipped by this call, in configuration order
    pub skipped: Vec<SkippedPlugin>,
}

impl LoadReport {
    /// True when every configured name was admitted
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Loads configured plugins through a factory and initializer and keeps the
/// ones that made it.
///
/// The manager is generic over the plugin capability `P` (commonly a trait
/// object such as `dyn Planner`) and never looks inside an instance.
///
/// `load_plugins` and `clear_plugins` take `&mut self`; wrap the manager in a
/// [`SharedPluginManager`](crate::plugin_system::SharedPluginManager) to read
/// it from several tasks.
pub struct PluginManager<P: ?Sized> {
    config_key: String,
    factory: Box<dyn PluginFactory<P>>,
    initializer: Box<dyn PluginInitializer<P>>,
    config: Arc<dyn ConfigSource>,
    registry: PluginRegistry<P>,
}

impl<P: ?Sized> PluginManager<P> {
    /// Build a manager reading the plugin list under `config_key`.
    ///
    /// No plugin is loaded here; the list key is only declared to `config`.
    pub fn new(
        config_key: impl Into<String>,
        factory: impl PluginFactory<P> + 'static,
        initializer: impl PluginInitializer<P> + 'static,
        config: Arc<dyn ConfigSource>,
    ) -> Self {
        let config_key = config_key.into();
        config.declare(&config_key);
        Self {
            config_key,
            factory: Box::new(factory),
            initializer: Box::new(initializer),
            config,
            registry: PluginRegistry::new(),
        }
    }

    /// Key under which the plugin name list is read
    pub fn config_key(&self) -> &str {
        &self.config_key
    }

    /// Run one load cycle and report what happened.
    ///
    /// Names and types are read from configuration as one snapshot, then
    /// processed in configuration order. A name that is already
    /// registered aborts the call with [`PluginSystemError::DuplicateName`];
    /// entries admitted before the abort stay registered. A name whose type is
    /// missing, unknown to the factory, or rejected by the initializer is
    /// skipped and the loop continues.
    pub fn load(&mut self) -> Result<LoadReport, PluginSystemError> {
        let configured = self.config.plugin_entries(&self.config_key).map_err(|e| {
            error!("Cannot read plugins under '{}': {}", self.config_key, e);
            e
        })?;
        if configured.is_empty() {
            warn!("No plugins configured under '{}'", self.config_key);
            return Err(PluginSystemError::ConfigurationEmpty {
                key: self.config_key.clone(),
            });
        }

        let mut report = LoadReport {
            configured: configured.len(),
            ..LoadReport::default()
        };

        for (name, plugin_type) in configured {
            if self.registry.contains(&name) {
                error!(
                    "Plugin '{}' is already registered; aborting load of '{}'",
                    name, self.config_key
                );
                return Err(PluginSystemError::DuplicateName { name });
            }

            match self.activate(&name, plugin_type) {
                Ok((plugin_type, instance)) => {
                    self.registry.admit(&name, &plugin_type, instance);
                    info!("Loaded plugin of type '{}' as '{}'", plugin_type, name);
                    report.loaded.push(name);
                }
                Err(reason) => {
                    error!("Skipping plugin '{}': {}", name, reason);
                    report.skipped.push(SkippedPlugin { name, reason });
                }
            }
        }

        Ok(report)
    }

    /// Run one load cycle.
    ///
    /// Returns `false` when nothing is configured or a duplicate name aborted
    /// the call; otherwise returns whether the registry holds any plugin.
    /// Compare [`len`](Self::len) with the configured count, or use
    /// [`load`](Self::load), to tell partial from full success.
    pub fn load_plugins(&mut self) -> bool {
        match self.load() {
            Ok(_) if self.registry.is_empty() => {
                warn!("No plugin configured under '{}' could be loaded", self.config_key);
                false
            }
            Ok(_) => true,
            Err(_) => false,
        }
    }

    /// Clear the registry and load again from the current configuration.
    pub fn reload_plugins(&mut self) -> bool {
        self.clear_plugins();
        self.load_plugins()
    }

    /// Build and initialize the plugin configured as `name`.
    fn activate(
        &self,
        name: &str,
        plugin_type: Option<String>,
    ) -> Result<(String, Arc<P>), SkipReason> {
        self.config.declare(&constants::plugin_type_key(name));
        let plugin_type = plugin_type.ok_or(SkipReason::MissingType)?;

        let instance = self.factory.create(&plugin_type).ok_or_else(|| SkipReason::FactoryMiss {
            plugin_type: plugin_type.clone(),
        })?;

        self.initializer
            .initialize(name, &instance)
            .map_err(|e| SkipReason::InitFailure {
                plugin_type: plugin_type.clone(),
                message: e.to_string(),
            })?;

        Ok((plugin_type, instance))
    }

    /// Registered names in load order
    pub fn loaded_names(&self) -> &[String] {
        self.registry.names()
    }

    pub fn has_plugin(&self, name: &str) -> bool {
        self.registry.contains(name)
    }

    /// Type `name` was loaded from.
    ///
    /// Asking for a name that is not registered is an error rather than a
    /// silent default; check [`has_plugin`](Self::has_plugin) first if absence
    /// is expected.
    pub fn plugin_type(&self, name: &str) -> Result<&str, PluginSystemError> {
        self.registry
            .plugin_type(name)
            .ok_or_else(|| PluginSystemError::UnknownPlugin {
                name: name.to_string(),
            })
    }

    /// Instance registered as `name`, shared with the registry.
    pub fn get_plugin(&self, name: &str) -> Option<Arc<P>> {
        let plugin = self.registry.get(name);
        if plugin.is_none() {
            debug!("No plugin loaded with the name '{}'", name);
        }
        plugin
    }

    /// Registered entries in load order
    pub fn entries(&self) -> impl Iterator<Item = PluginEntry<P>> + '_ {
        self.registry.entries()
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// Drop every registered plugin, readying the manager for a fresh load.
    pub fn clear_plugins(&mut self) {
        if !self.registry.is_empty() {
            debug!("Clearing {} plugins loaded from '{}'", self.registry.len(), self.config_key);
        }
        self.registry.clear();
    }
}

impl<P: ?Sized> fmt::Debug for PluginManager<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginManager")
            .field("config_key", &self.config_key)
            .field("config", &self.config)
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}
