//! Port contracts for translation backends.

pub mod backend;

pub use backend::{BackendError, BackendResult, TranslationBackend};

#[cfg(test)]
pub use backend::MockTranslationBackend;
