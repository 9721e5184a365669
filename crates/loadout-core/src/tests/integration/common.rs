#![cfg(test)]

use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::kernel::error::Result;
use crate::plugin_system::{PluginCatalog, PluginManager, PluginSystemError};
use crate::storage::config::{ConfigFormat, ConfigManager};
use crate::storage::local::LocalStorageProvider;
use crate::storage::{ConfigSource, StorageProvider};

// ===== MOCK PLUGINS =====

/// Capability the integration tests load plugins for
pub trait Planner: Send + Sync {
    fn kind(&self) -> &'static str;
    fn label(&self) -> Option<String>;
    fn bind(&self, name: &str);
}

#[derive(Default)]
pub struct GridPlanner {
    label: Mutex<Option<String>>,
}

impl Planner for GridPlanner {
    fn kind(&self) -> &'static str {
        "grid"
    }
    fn label(&self) -> Option<String> {
        self.label.lock().unwrap().clone()
    }
    fn bind(&self, name: &str) {
        *self.label.lock().unwrap() = Some(name.to_string());
    }
}

#[derive(Default)]
pub struct LatticePlanner {
    label: Mutex<Option<String>>,
}

impl Planner for LatticePlanner {
    fn kind(&self) -> &'static str {
        "lattice"
    }
    fn label(&self) -> Option<String> {
        self.label.lock().unwrap().clone()
    }
    fn bind(&self, name: &str) {
        *self.label.lock().unwrap() = Some(name.to_string());
    }
}

// ===== HELPERS =====

/// Catalog of the planners known to the tests
pub fn planner_catalog() -> PluginCatalog<dyn Planner> {
    PluginCatalog::new()
        .with("planners/grid", || Arc::new(GridPlanner::default()) as Arc<dyn Planner>)
        .with("planners/lattice", || Arc::new(LatticePlanner::default()) as Arc<dyn Planner>)
}

/// Manager over `config` that binds each planner to its configured name and
/// refuses any name starting with `broken`.
pub fn planner_manager(config: Arc<dyn ConfigSource>) -> PluginManager<dyn Planner> {
    let initializer = |name: &str, planner: &Arc<dyn Planner>| -> Result<()> {
        if name.starts_with("broken") {
            return Err(PluginSystemError::init(name, "refusing broken planner").into());
        }
        planner.bind(name);
        Ok(())
    };
    PluginManager::new("planners", planner_catalog(), initializer, config)
}

/// Config manager reading from `<root>/config`
pub fn config_manager(root: &Path, format: ConfigFormat) -> ConfigManager {
    let provider = Arc::new(LocalStorageProvider::new(root.to_path_buf())) as Arc<dyn StorageProvider>;
    ConfigManager::new(provider, root.join("config"), format)
}

/// Write `content` as `<root>/config/<file_name>`
pub fn write_config(root: &Path, file_name: &str, content: &str) {
    let dir = root.join("config");
    std::fs::create_dir_all(&dir).expect("Failed to create config dir");
    std::fs::write(dir.join(file_name), content).expect("Failed to write config file");
}
