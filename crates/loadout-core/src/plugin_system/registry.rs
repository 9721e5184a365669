use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A registered plugin: its name, the type it was built from, and the instance.
pub struct PluginEntry<P: ?Sized> {
    pub name: String,
    pub plugin_type: String,
    pub instance: Arc<P>,
}

impl<P: ?Sized> Clone for PluginEntry<P> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            plugin_type: self.plugin_type.clone(),
            instance: Arc::clone(&self.instance),
        }
    }
}

impl<P: ?Sized> fmt::Debug for PluginEntry<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginEntry")
            .field("name", &self.name)
            .field("plugin_type", &self.plugin_type)
            .finish_non_exhaustive()
    }
}

/// Registry of activated plugin instances.
///
/// Three views over one entry set: name to instance, name to type, and the
/// names in admission order. `admit` and `clear` are the only mutators, so
/// the views always share the same key set.
pub struct PluginRegistry<P: ?Sized> {
    instances: HashMap<String, Arc<P>>,
    types: HashMap<String, String>,
    order: Vec<String>,
}

impl<P: ?Sized> PluginRegistry<P> {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            instances: HashMap::new(),
            types: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Insert an entry into all three views.
    ///
    /// Returns `false` and leaves the registry untouched if `name` is taken.
    pub fn admit(&mut self, name: &str, plugin_type: &str, instance: Arc<P>) -> bool {
        if self.contains(name) {
            return false;
        }
        self.instances.insert(name.to_string(), instance);
        self.types.insert(name.to_string(), plugin_type.to_string());
        self.order.push(name.to_string());
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.instances.contains_key(name)
    }

    /// Shared handle to the instance registered as `name`
    pub fn get(&self, name: &str) -> Option<Arc<P>> {
        self.instances.get(name).cloned()
    }

    /// Type recorded for `name`
    pub fn plugin_type(&self, name: &str) -> Option<&str> {
        self.types.get(name).map(String::as_str)
    }

    /// Registered names in admission order
    pub fn names(&self) -> &[String] {
        &self.order
    }

    /// Entries in admission order
    pub fn entries(&self) -> impl Iterator<Item = PluginEntry<P>> + '_ {
        self.order.iter().filter_map(move |name| {
            let instance = self.instances.get(name)?;
            let plugin_type = self.types.get(name)?;
            Some(PluginEntry {
                name: name.clone(),
                plugin_type: plugin_type.clone(),
                instance: Arc::clone(instance),
            })
        })
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Drop every entry from all three views.
    pub fn clear(&mut self) {
        self.instances.clear();
        self.types.clear();
        self.order.clear();
    }
}

impl<P: ?Sized> Default for PluginRegistry<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: ?Sized> fmt::Debug for PluginRegistry<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginRegistry")
            .field("order", &self.order)
            .field("types", &self.types)
            .finish_non_exhaustive()
    }
}
