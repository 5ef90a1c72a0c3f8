//! Domain model for translation engine descriptors.
//!
//! Engines are identified by a namespaced display name. The namespace selects
//! the backend kind once, when the catalogue is loaded; nothing downstream
//! re-inspects the display name.

mod descriptor;
mod error;
mod kind;
mod model_id;
mod name;

pub use descriptor::EngineDescriptor;
pub use error::EngineDomainError;
pub use kind::BackendKind;
pub use model_id::ModelId;
pub use name::EngineName;
