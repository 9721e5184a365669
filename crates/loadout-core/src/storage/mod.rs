//! # Loadout Core Storage
//!
//! Configuration files and the [`ConfigSource`] seam the plugin manager reads.
//!
//! - [`StorageProvider`] abstracts file access; [`LocalStorageProvider`] is the
//!   filesystem implementation.
//! - [`ConfigData`] holds parsed configuration values (JSON, YAML or TOML) and
//!   implements [`ConfigSource`].
//! - [`ConfigManager`] resolves, loads, caches and saves named config files.
pub mod provider;
pub mod local;
pub mod config;
pub mod source;
pub mod error;

pub use provider::StorageProvider;
pub use local::LocalStorageProvider;
pub use config::{ConfigData, ConfigFormat, ConfigManager};
pub use source::{ConfigSource, ConfiguredPlugin};
pub use error::StorageSystemError;
