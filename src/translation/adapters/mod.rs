//! Adapter implementations for the translation backend port.

pub(crate) mod http;

pub mod hosted;
pub mod local;
pub mod memory;

pub use hosted::{DEFAULT_HOSTED_BASE_URL, HostedApiBackend, HostedApiSettings};
pub use local::{DEFAULT_LOCAL_ENDPOINT, LocalServerBackend, LocalServerSettings};
pub use memory::{InMemoryTranslationBackend, RecordedCall, ScriptedReply};
