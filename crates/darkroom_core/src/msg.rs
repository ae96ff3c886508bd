use std::path::PathBuf;

use crate::{CandidateFile, Generation, PreviewImage, PreviewTarget, StatusReport};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Files offered via the picker or a drop; only the first entry counts.
    FilesOffered(Vec<CandidateFile>),
    /// A chosen file could not be read from disk.
    IntakeFailed { message: String },
    /// A drag with files entered (true) or left (false) the drop target.
    DropHoverChanged(bool),
    /// A preview finished rendering for a display slot.
    PreviewReady {
        generation: Generation,
        target: PreviewTarget,
        image: PreviewImage,
    },
    /// Upload response yielded a task handle; the poll loop starts here.
    UploadAccepted {
        generation: Generation,
        task_id: String,
        result_path: String,
    },
    /// Upload was rejected (non-2xx, error body field, or transport failure).
    UploadRejected {
        generation: Generation,
        message: String,
    },
    /// A status query resolved with a decoded report.
    StatusReported {
        generation: Generation,
        report: StatusReport,
    },
    /// A status query failed at the transport level (network or parse).
    StatusCheckFailed {
        generation: Generation,
        message: String,
    },
    /// User asked to save the processed result to `destination`.
    DownloadRequested { destination: PathBuf },
    /// The processed result was written to disk.
    DownloadSaved {
        generation: Generation,
        path: PathBuf,
    },
    /// Fetching or writing the processed result failed.
    DownloadFailed {
        generation: Generation,
        message: String,
    },
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
