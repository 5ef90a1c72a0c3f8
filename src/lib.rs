//! Honyaku: side-by-side translation with hosted and local LLM engines.
//!
//! An engine is a display name such as `OpenAI/GPT-4o-mini` mapped to a
//! backend model identifier. The namespace before the `/` decides whether the
//! engine is served by a hosted completion API or by a local inference
//! server. A request can go to one engine or be compared across several in
//! parallel.
//!
//! # Architecture
//!
//! Each bounded context follows hexagonal architecture principles:
//!
//! - **Domain**: validated values with no infrastructure dependencies
//! - **Ports**: trait seams for catalogue sources and translation backends
//! - **Adapters**: file and in-memory catalogues, HTTP and scripted backends
//! - **Services**: the model registry, engine dispatcher, and comparison
//!   aggregator
//!
//! # Modules
//!
//! - [`engine`]: model catalogue loading and engine resolution
//! - [`translation`]: requests, backends, dispatch, and comparison
//! - [`config`]: environment-driven settings
//! - [`app`]: the facade used by front ends

pub mod app;
pub mod config;
pub mod engine;
pub mod translation;
