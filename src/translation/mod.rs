//! Translation dispatch and comparison for Honyaku.
//!
//! A request is routed to the backend that serves the selected engine, and
//! may be fanned out to several engines for side-by-side comparison. Every
//! failure is returned as data so one failing engine never hides the others.
//! The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - The backend port in [`ports`]
//! - Hosted, local and in-memory backends in [`adapters`]
//! - Dispatch and comparison services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
