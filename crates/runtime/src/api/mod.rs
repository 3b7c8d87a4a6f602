//! Public runtime API surface.
//!
//! This module gathers the types exposed to consumers of the runtime crate so
//! other layers can stay focused on orchestration, workers, or providers.

pub mod errors;
pub mod handle;
pub mod providers;

pub use errors::{ProviderError, Result, RuntimeError};
pub use handle::RuntimeHandle;
pub use providers::{FixedDetailsProvider, RealmDetailsProvider};
