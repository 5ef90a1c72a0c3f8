//! Domain model for translation requests and results.

mod comparison;
mod credential;
mod error;
mod language;
mod outcome;
mod prompt;
mod request;

pub use comparison::ComparisonResult;
pub use credential::ApiKey;
pub use error::TranslationDomainError;
pub use language::{SUPPORTED_LANGUAGES, TargetLanguage};
pub use outcome::{FailureKind, TranslationFailure, TranslationOutcome, TranslationResult};
pub use prompt::PromptTemplates;
pub use request::{RequestId, TranslationRequest};
