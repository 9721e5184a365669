//! Map-backed [`PluginFactory`] built from named constructors.
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::plugin_system::traits::PluginFactory;

type Constructor<P> = Box<dyn Fn() -> Arc<P> + Send + Sync>;

/// A factory that knows a fixed set of plugin types.
///
/// Every `create` call runs the constructor again, so two names sharing a
/// type get two distinct instances.
pub struct PluginCatalog<P: ?Sized> {
    constructors: BTreeMap<String, Constructor<P>>,
}

impl<P: ?Sized> PluginCatalog<P> {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self {
            constructors: BTreeMap::new(),
        }
    }

    /// Register `constructor` under `plugin_type`, replacing any previous one.
    pub fn register<F>(&mut self, plugin_type: impl Into<String>, constructor: F) -> &mut Self
    where
        F: Fn() -> Arc<P> + Send + Sync + 'static,
    {
        self.constructors.insert(plugin_type.into(), Box::new(constructor));
        self
    }

    /// Builder-style [`register`](Self::register).
    pub fn with<F>(mut self, plugin_type: impl Into<String>, constructor: F) -> Self
    where
        F: Fn() -> Arc<P> + Send + Sync + 'static,
    {
        self.register(plugin_type, constructor);
        self
    }

    pub fn contains(&self, plugin_type: &str) -> bool {
        self.constructors.contains_key(plugin_type)
    }

    /// Known plugin types, sorted
    pub fn types(&self) -> Vec<String> {
        self.constructors.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.constructors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constructors.is_empty()
    }
}

impl<P: ?Sized> Default for PluginCatalog<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: ?Sized> PluginFactory<P> for PluginCatalog<P> {
    fn create(&self, plugin_type: &str) -> Option<Arc<P>> {
        self.constructors.get(plugin_type).map(|constructor| constructor())
    }
}

impl<P: ?Sized> fmt::Debug for PluginCatalog<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginCatalog")
            .field("types", &self.constructors.keys().collect::<Vec<_>>())
            .finish()
    }
}
