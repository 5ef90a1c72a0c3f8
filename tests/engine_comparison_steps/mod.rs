//! Step definitions for engine comparison scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
