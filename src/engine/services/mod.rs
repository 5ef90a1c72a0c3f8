//! Application services for the engine catalogue.

mod registry;

pub use registry::{ModelRegistry, RegistryError, RegistryResult};
