//! Adapter implementations for the catalogue source port.

pub mod file;
pub mod memory;

pub use file::{CatalogFormat, FileCatalogSource, parse_catalog};
pub use memory::StaticCatalogSource;
