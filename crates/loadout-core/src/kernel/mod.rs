//! # Loadout Core Kernel
//!
//! The `kernel` module holds the pieces every other subsystem leans on.
//!
//! - **Component Lifecycle**: the [`KernelComponent`](component::KernelComponent)
//!   trait describes long-lived services with an `initialize`/`start`/`stop`
//!   lifecycle. The shared plugin manager is one such component.
//! - **Core Constants**: configuration keys and application metadata in the
//!   `constants` submodule.
//! - **Error Handling**: the top-level [`Error`](error::Error) type wrapping the
//!   subsystem errors, plus a `Result` alias, in the `error` submodule.
pub mod component;
pub mod constants;
pub mod error;

pub use component::KernelComponent;
pub use error::{Error, KernelLifecyclePhase, Result};
