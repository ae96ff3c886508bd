use std::path::PathBuf;
use std::time::Duration;

use crate::{Generation, SelectedFile};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Package the file and POST it to the upload endpoint.
    SubmitUpload {
        generation: Generation,
        file: SelectedFile,
    },
    /// Render the local "original" preview; fire-and-forget relative to the
    /// upload.
    RenderPreview {
        generation: Generation,
        file: SelectedFile,
    },
    /// Query task status after `delay`. The reducer only emits this in
    /// response to the previous report, so queries stay strictly sequential.
    CheckStatus {
        generation: Generation,
        task_id: String,
        delay: Duration,
    },
    /// Fetch the processed result to populate the "processed" preview slot.
    FetchResult {
        generation: Generation,
        result_path: String,
    },
    /// Fetch the processed result and write it to `destination`.
    SaveResult {
        generation: Generation,
        result_path: String,
        destination: PathBuf,
    },
}
