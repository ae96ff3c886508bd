use std::path::PathBuf;

use thiserror::Error;

use crate::persist::PersistError;

/// Submission counter mirrored from the core; events carry the generation
/// their command was issued under so the shell can route them.
pub type Generation = u64;

/// The file content handed to the engine for upload or preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePayload {
    pub name: String,
    pub media_type: String,
    pub bytes: Vec<u8>,
}

/// Successful upload response: the server-assigned task handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadTicket {
    pub task_id: String,
    pub result_path: String,
}

/// Decoded task status literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusKind {
    Processing,
    Completed,
    /// `error:<message>` on the wire; this is the message part.
    Error(String),
    /// A literal outside the service contract.
    Unrecognized(String),
}

impl StatusKind {
    /// Decodes a wire status value.
    ///
    /// An `error:` status splits on the first colon; the message is
    /// everything after it, so `error:bad: input` yields `bad: input`.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "processing" => StatusKind::Processing,
            "completed" => StatusKind::Completed,
            _ => match raw.split_once(':') {
                Some(("error", message)) => StatusKind::Error(message.to_string()),
                _ => StatusKind::Unrecognized(raw.to_string()),
            },
        }
    }
}

/// Which display slot a rendered preview belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewTarget {
    Original,
    Processed,
}

/// A displayable image: a loader URI plus the backing bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewImage {
    pub uri: String,
    pub media_type: String,
    pub bytes: Vec<u8>,
}

/// Events emitted back to the shell.
#[derive(Debug)]
pub enum EngineEvent {
    UploadFinished {
        generation: Generation,
        result: Result<UploadTicket, ServiceError>,
    },
    StatusChecked {
        generation: Generation,
        result: Result<StatusKind, ServiceError>,
    },
    PreviewRendered {
        generation: Generation,
        target: PreviewTarget,
        image: PreviewImage,
    },
    ResultFetched {
        generation: Generation,
        result: Result<PreviewImage, ServiceError>,
    },
    ResultSaved {
        generation: Generation,
        result: Result<PathBuf, SaveError>,
    },
}

/// Failures talking to the processing service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// The service rejected the request with an explicit error message.
    #[error("{0}")]
    Rejected(String),
    #[error("http status {0}")]
    HttpStatus(u16),
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    #[error("request timed out")]
    Timeout,
    #[error("network error: {0}")]
    Network(String),
    #[error("response too large (max {max_bytes} bytes)")]
    TooLarge { max_bytes: u64 },
}

/// Failures fetching or writing a processed result.
#[derive(Debug, Error)]
pub enum SaveError {
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error(transparent)]
    Persist(#[from] PersistError),
}
