//! Plugins compiled into the `loadout` binary.
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use loadout_core::{PluginCatalog, PluginSystemError, Result};

/// Capability shared by the built-in plugins
pub trait BuiltinPlugin: Send + Sync {
    /// Attach the configured name to the instance
    fn bind(&self, name: &str) -> std::result::Result<(), String>;
    /// One-line description shown by `loadout list`
    fn describe(&self) -> String;
}

/// Repeats the name it was bound to
#[derive(Default)]
pub struct Echo {
    name: Mutex<Option<String>>,
}

impl BuiltinPlugin for Echo {
    fn bind(&self, name: &str) -> std::result::Result<(), String> {
        *self.name.lock().unwrap_or_else(PoisonError::into_inner) = Some(name.to_string());
        Ok(())
    }

    fn describe(&self) -> String {
        self.name
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .unwrap_or_default()
    }
}

static NEXT_COUNTER: AtomicUsize = AtomicUsize::new(1);

/// Numbers its instances in creation order
pub struct Counter {
    id: usize,
}

impl Counter {
    pub fn new() -> Self {
        Self {
            id: NEXT_COUNTER.fetch_add(1, Ordering::Relaxed),
        }
    }
}

impl BuiltinPlugin for Counter {
    fn bind(&self, _name: &str) -> std::result::Result<(), String> {
        Ok(())
    }

    fn describe(&self) -> String {
        format!("counter #{}", self.id)
    }
}

/// Never finishes initialization
pub struct Failing;

impl BuiltinPlugin for Failing {
    fn bind(&self, _name: &str) -> std::result::Result<(), String> {
        Err("failing plugins never initialize".to_string())
    }

    fn describe(&self) -> String {
        "failing".to_string()
    }
}

/// Factory over every built-in plugin type
pub fn catalog() -> PluginCatalog<dyn BuiltinPlugin> {
    PluginCatalog::new()
        .with("echo", || Arc::new(Echo::default()) as Arc<dyn BuiltinPlugin>)
        .with("counter", || Arc::new(Counter::new()) as Arc<dyn BuiltinPlugin>)
        .with("failing", || Arc::new(Failing) as Arc<dyn BuiltinPlugin>)
}

/// Binds each plugin to its configured name.
pub fn initializer(name: &str, plugin: &Arc<dyn BuiltinPlugin>) -> Result<()> {
    plugin
        .bind(name)
        .map_err(|message| PluginSystemError::init(name, message).into())
}
