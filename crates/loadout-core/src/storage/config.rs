use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use serde::{Deserialize, Serialize};

use crate::kernel::error::Result;
use crate::storage::StorageProvider;
use crate::storage::error::StorageSystemError;

/// Supported configuration file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// JSON format (.json)
    Json,
    /// YAML format (.yaml, .yml) - requires "yaml-config" feature
    #[cfg(feature = "yaml-config")]
    Yaml,
    /// TOML format (.toml) - requires "toml-config" feature
    #[cfg(feature = "toml-config")]
    Toml,
}

impl ConfigFormat {
    /// Get the file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            ConfigFormat::Json => "json",
            #[cfg(feature = "yaml-config")]
            ConfigFormat::Yaml => "yaml",
            #[cfg(feature = "toml-config")]
            ConfigFormat::Toml => "toml",
        }
    }

    /// Determine format from file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| match ext.to_lowercase().as_str() {
                "json" => Some(ConfigFormat::Json),
                #[cfg(feature = "yaml-config")]
                "yaml" | "yml" => Some(ConfigFormat::Yaml),
                #[cfg(feature = "toml-config")]
                "toml" => Some(ConfigFormat::Toml),
                _ => None,
            })
    }
}

/// In-memory representation of configuration data
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ConfigData {
    /// Raw configuration values
    #[serde(flatten)]
    values: HashMap<String, serde_json::Value>,
    /// Keys a consumer announced it will read
    #[serde(skip)]
    declared: Mutex<Vec<String>>,
}

impl ConfigData {
    /// Create a new empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a configuration value
    pub fn get<T: for<'de> Deserialize<'de>>(&self, key: &str) -> Option<T> {
        self.get_path(key)
            .and_then(|value| serde_json::from_value(value.clone()).ok())
    }

    /// Get a configuration value with default
    pub fn get_or<T: for<'de> Deserialize<'de>>(&self, key: &str, default: T) -> T {
        self.get(key).unwrap_or(default)
    }

    /// Look up a dotted key.
    ///
    /// A flat entry named exactly `key` wins. Otherwise the key is split on
    /// `.` and walked through nested objects, so `p1.type` also matches
    /// `{"p1": {"type": ...}}` as produced by TOML tables or YAML maps.
    pub fn get_path(&self, key: &str) -> Option<&serde_json::Value> {
        if let Some(value) = self.values.get(key) {
            return Some(value);
        }

        let mut segments = key.split('.');
        let mut current = self.values.get(segments.next()?)?;
        for segment in segments {
            current = current.get(segment)?;
        }
        Some(current)
    }

    /// Set a configuration value
    pub fn set<T: Serialize>(&mut self, key: &str, value: T) -> Result<()> {
        let json_value = serde_json::to_value(value)
            .map_err(|e| StorageSystemError::serialization("json", e))?;
        self.values.insert(key.to_string(), json_value);
        Ok(())
    }

    /// Remove a configuration value
    pub fn remove(&mut self, key: &str) -> Option<serde_json::Value> {
        self.values.remove(key)
    }

    /// Check if key exists (flat or nested)
    pub fn contains_key(&self, key: &str) -> bool {
        self.get_path(key).is_some()
    }

    /// Get all top-level keys
    pub fn keys(&self) -> Vec<String> {
        self.values.keys().cloned().collect()
    }

    /// Merge with another config, overriding existing values
    pub fn merge(&mut self, other: &ConfigData) {
        for (key, value) in &other.values {
            self.values.insert(key.clone(), value.clone());
        }
    }

    /// Record that `key` is expected to be present.
    pub fn declare(&self, key: &str) {
        let mut declared = self.declared.lock().unwrap_or_else(PoisonError::into_inner);
        if !declared.iter().any(|k| k == key) {
            declared.push(key.to_string());
        }
    }

    /// Keys declared so far, in declaration order
    pub fn declared_keys(&self) -> Vec<String> {
        self.declared
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Serialize to string based on format
    pub fn serialize(&self, format: ConfigFormat) -> Result<String> {
        let content = match format {
            ConfigFormat::Json => serde_json::to_string_pretty(&self)
                .map_err(|e| StorageSystemError::serialization("json", e))?,
            #[cfg(feature = "yaml-config")]
            ConfigFormat::Yaml => serde_yaml::to_string(&self)
                .map_err(|e| StorageSystemError::serialization("yaml", e))?,
            #[cfg(feature = "toml-config")]
            ConfigFormat::Toml => toml::to_string_pretty(&self)
                .map_err(|e| StorageSystemError::serialization("toml", e))?,
        };
        Ok(content)
    }

    /// Deserialize from string based on format
    pub fn deserialize(data: &str, format: ConfigFormat) -> Result<Self> {
        let config = match format {
            ConfigFormat::Json => serde_json::from_str(data)
                .map_err(|e| StorageSystemError::deserialization("json", e))?,
            #[cfg(feature = "yaml-config")]
            ConfigFormat::Yaml => serde_yaml::from_str(data)
                .map_err(|e| StorageSystemError::deserialization("yaml", e))?,
            #[cfg(feature = "toml-config")]
            ConfigFormat::Toml => toml::from_str(data)
                .map_err(|e| StorageSystemError::deserialization("toml", e))?,
        };
        Ok(config)
    }
}

impl Clone for ConfigData {
    fn clone(&self) -> Self {
        Self {
            values: self.values.clone(),
            declared: Mutex::new(self.declared_keys()),
        }
    }
}

/// Configuration manager that handles loading, saving, and caching configuration files
#[derive(Debug)]
pub struct ConfigManager {
    /// Storage provider for reading/writing configs
    provider: Arc<dyn StorageProvider>,
    /// Directory configuration files live in
    config_dir: PathBuf,
    /// Default format for new configurations
    default_format: ConfigFormat,
    /// In-memory cache of loaded configurations, keyed by name
    cache: RwLock<HashMap<String, ConfigData>>,
}

impl ConfigManager {
    /// Create a new configuration manager
    pub fn new(
        provider: Arc<dyn StorageProvider>,
        config_dir: PathBuf,
        default_format: ConfigFormat,
    ) -> Self {
        Self {
            provider,
            config_dir,
            default_format,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Get the configuration directory
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Get the default format
    pub fn default_format(&self) -> ConfigFormat {
        self.default_format
    }

    /// Resolve the complete path for a configuration file
    pub fn resolve_config_path(&self, name: &str) -> PathBuf {
        let file_name = if Path::new(name).extension().is_some() {
            name.to_string()
        } else {
            format!("{}.{}", name, self.default_format.extension())
        };
        self.config_dir.join(file_name)
    }

    /// Load a named configuration, serving it from the cache when possible.
    ///
    /// A configuration file that does not exist loads as empty.
    pub fn load_config(&self, name: &str) -> Result<ConfigData> {
        {
            let cache = self.cache.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(config) = cache.get(name) {
                return Ok(config.clone());
            }
        }

        let path = self.resolve_config_path(name);
        let config = if self.provider.exists(&path) {
            self.load_file(&path)?
        } else {
            log::debug!("Config '{}' not found at {:?}, using empty configuration", name, path);
            ConfigData::new()
        };

        self.cache
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.to_string(), config.clone());

        Ok(config)
    }

    /// Read and parse a configuration file at an explicit path, bypassing the cache.
    pub fn load_file(&self, path: &Path) -> Result<ConfigData> {
        let format = ConfigFormat::from_path(path).ok_or_else(|| {
            StorageSystemError::UnsupportedConfigFormat(path.display().to_string())
        })?;
        let content = self.provider.read_to_string(path)?;
        ConfigData::deserialize(&content, format)
    }

    /// Save configuration to disk and refresh the cache entry
    pub fn save_config(&self, name: &str, config: &ConfigData) -> Result<()> {
        let path = self.resolve_config_path(name);

        if let Some(parent) = path.parent() {
            self.provider.create_dir_all(parent)?;
        }

        let format = ConfigFormat::from_path(&path).unwrap_or(self.default_format);
        let content = config.serialize(format)?;
        self.provider.write_string(&path, &content)?;

        self.cache
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.to_string(), config.clone());

        Ok(())
    }

    /// Invalidate the cache for a specific configuration
    pub fn invalidate_cache(&self, name: &str) {
        self.cache
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(name);
    }

    /// Clear the entire configuration cache
    pub fn clear_cache(&self) {
        self.cache
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// List configuration names (file stems) available in the config directory
    pub fn list_configs(&self) -> Result<Vec<String>> {
        if !self.provider.exists(&self.config_dir) {
            return Ok(vec![]);
        }

        let entries = self.provider.read_dir(&self.config_dir)?;
        let config_files = entries
            .into_iter()
            .filter(|path| self.provider.is_file(path) && ConfigFormat::from_path(path).is_some())
            .filter_map(|path| path.file_stem().and_then(|stem| stem.to_str().map(String::from)))
            .collect();

        Ok(config_files)
    }
}
