//! Darkroom engine: remote-service IO and effect execution.
mod client;
mod engine;
mod persist;
mod preview;
mod types;

pub use client::{HttpProcessingService, ProcessingService, ServiceSettings};
pub use engine::EngineHandle;
pub use persist::{write_atomically, PersistError};
pub use preview::render_preview;
pub use types::{
    EngineEvent, FilePayload, Generation, PreviewImage, PreviewTarget, SaveError, ServiceError,
    StatusKind, UploadTicket,
};
