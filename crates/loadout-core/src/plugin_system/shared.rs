use std::fmt::{self, Debug};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::kernel::component::KernelComponent;
use crate::kernel::error::{Error, KernelLifecyclePhase, Result};
use crate::plugin_system::error::PluginSystemError;
use crate::plugin_system::manager::{LoadReport, PluginManager};
use crate::plugin_system::registry::PluginEntry;

/// A [`PluginManager`] behind a readers-writer lock.
///
/// Each method holds the lock for exactly one manager operation. Loads and
/// clears are exclusive; lookups run concurrently with each other.
pub struct SharedPluginManager<P: ?Sized> {
    name: &'static str,
    inner: Arc<RwLock<PluginManager<P>>>,
}

impl<P: ?Sized + Send + Sync + 'static> SharedPluginManager<P> {
    pub fn new(manager: PluginManager<P>) -> Self {
        Self {
            name: "SharedPluginManager",
            inner: Arc::new(RwLock::new(manager)),
        }
    }

    pub async fn load(&self) -> std::result::Result<LoadReport, PluginSystemError> {
        self.inner.write().await.load()
    }

    pub async fn load_plugins(&self) -> bool {
        self.inner.write().await.load_plugins()
    }

    pub async fn reload_plugins(&self) -> bool {
        self.inner.write().await.reload_plugins()
    }

    pub async fn clear_plugins(&self) {
        self.inner.write().await.clear_plugins();
    }

    pub async fn has_plugin(&self, name: &str) -> bool {
        self.inner.read().await.has_plugin(name)
    }

    pub async fn get_plugin(&self, name: &str) -> Option<Arc<P>> {
        self.inner.read().await.get_plugin(name)
    }

    pub async fn plugin_type(&self, name: &str) -> std::result::Result<String, PluginSystemError> {
        self.inner.read().await.plugin_type(name).map(str::to_string)
    }

    /// Snapshot of the registered names in load order
    pub async fn loaded_names(&self) -> Vec<String> {
        self.inner.read().await.loaded_names().to_vec()
    }

    /// Snapshot of the registered entries in load order
    pub async fn entries(&self) -> Vec<PluginEntry<P>> {
        self.inner.read().await.entries().collect()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }
}

impl<P: ?Sized> Clone for SharedPluginManager<P> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<P: ?Sized> Debug for SharedPluginManager<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Avoid locking in Debug
        f.debug_struct("SharedPluginManager")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl<P: ?Sized + Send + Sync + 'static> KernelComponent for SharedPluginManager<P> {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn initialize(&self) -> Result<()> {
        let mut manager = self.inner.write().await;
        match manager.load() {
            Ok(_) if manager.is_empty() => {
                let err = PluginSystemError::NoPluginsLoaded {
                    key: manager.config_key().to_string(),
                };
                Err(Error::lifecycle(KernelLifecyclePhase::Initialize, self.name, err.into()))
            }
            Ok(report) => {
                log::info!(
                    "Loaded {} of {} configured plugins from '{}'",
                    report.loaded.len(),
                    report.configured,
                    manager.config_key()
                );
                Ok(())
            }
            Err(e) => Err(Error::lifecycle(KernelLifecyclePhase::Initialize, self.name, e.into())),
        }
    }

    async fn start(&self) -> Result<()> {
        let manager = self.inner.read().await;
        if manager.is_empty() {
            let err = PluginSystemError::NoPluginsLoaded {
                key: manager.config_key().to_string(),
            };
            return Err(Error::lifecycle(KernelLifecyclePhase::Start, self.name, err.into()));
        }
        for entry in manager.entries() {
            log::info!("Plugin '{}' ({}) is active", entry.name, entry.plugin_type);
        }
        Ok(())
    }

    async fn stop(&self) -> Result<()> {
        self.inner.write().await.clear_plugins();
        Ok(())
    }
}
