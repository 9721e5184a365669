/// Application name
pub const APP_NAME: &str = "Loadout";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Configuration key holding the ordered list of plugin names
pub const DEFAULT_PLUGIN_LIST_KEY: &str = "plugins";

/// Suffix of the per-plugin key naming its type (`<name>.type`)
pub const PLUGIN_TYPE_SUFFIX: &str = "type";

/// Default configuration file name (without extension)
pub const DEFAULT_CONFIG_NAME: &str = "loadout";

/// Build the configuration key that holds the type of plugin `name`.
pub fn plugin_type_key(name: &str) -> String {
    format!("{}.{}", name, PLUGIN_TYPE_SUFFIX)
}
