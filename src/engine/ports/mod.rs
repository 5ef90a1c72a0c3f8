//! Port contracts for the engine catalogue.
//!
//! Ports define infrastructure-agnostic interfaces used by the registry
//! service.

pub mod source;

pub use source::{CatalogEntry, CatalogSource, CatalogSourceError, CatalogSourceResult};
