//! Translation engine catalogue for Honyaku.
//!
//! This module owns the model registry: the immutable mapping from a
//! user-facing engine display name (for example `OpenAI/GPT-4o-mini`) to the
//! backend that serves it and the backend's model identifier. The module
//! follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - The registry service in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
