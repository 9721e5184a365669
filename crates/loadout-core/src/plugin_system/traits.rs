use std::sync::Arc;

use crate::kernel::error::Result;

/// Turns a plugin type string into a fresh plugin instance.
///
/// Returning `None` means the type is unknown or could not be constructed.
/// The manager treats that as a per-name failure and moves on.
pub trait PluginFactory<P: ?Sized>: Send + Sync {
    fn create(&self, plugin_type: &str) -> Option<Arc<P>>;
}

/// Finishes setting up an instance for the name it will be registered under.
///
/// An `Err` rejects the instance; the manager skips that name and moves on.
pub trait PluginInitializer<P: ?Sized>: Send + Sync {
    fn initialize(&self, name: &str, plugin: &Arc<P>) -> Result<()>;
}

impl<P, F> PluginFactory<P> for F
where
    P: ?Sized,
    F: Fn(&str) -> Option<Arc<P>> + Send + Sync,
{
    fn create(&self, plugin_type: &str) -> Option<Arc<P>> {
        self(plugin_type)
    }
}

impl<P, F> PluginInitializer<P> for F
where
    P: ?Sized,
    F: Fn(&str, &Arc<P>) -> Result<()> + Send + Sync,
{
    fn initialize(&self, name: &str, plugin: &Arc<P>) -> Result<()> {
        self(name, plugin)
    }
}
