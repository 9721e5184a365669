//! # Loadout Core Plugin System
//!
//! Turns a configured list of plugin names into a registry of live instances.
//!
//! Each configured name carries a plugin type. The [`PluginManager`] asks a
//! [`PluginFactory`] for an instance of that type, hands it to a
//! [`PluginInitializer`] together with the name, and admits it into the
//! [`PluginRegistry`] when both succeed.
//!
//! ## Key Submodules and Responsibilities:
//!
//! - **[`manager`]**: the load protocol ([`PluginManager`]) and its
//!   [`LoadReport`].
//! - **[`registry`]**: the name-keyed, load-ordered store of [`PluginEntry`]s.
//! - **[`traits`]**: the factory and initializer seams, implemented for plain
//!   closures.
//! - **[`catalog`]**: [`PluginCatalog`], a ready-made factory of named
//!   constructors.
//! - **[`shared`]**: [`SharedPluginManager`], the lock-guarded handle that also
//!   runs as a [`KernelComponent`](crate::kernel::KernelComponent).
//! - **[`error`]**: [`PluginSystemError`](error::PluginSystemError).
pub mod catalog;
pub mod error;
pub mod manager;
pub mod registry;
pub mod shared;
pub mod traits;

pub use catalog::PluginCatalog;
pub use error::PluginSystemError;
pub use manager::{LoadReport, PluginManager, SkipReason, SkippedPlugin};
pub use registry::{PluginEntry, PluginRegistry};
pub use shared::SharedPluginManager;
pub use traits::{PluginFactory, PluginInitializer};

#[cfg(test)]
mod tests;
