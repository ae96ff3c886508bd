use std::path::PathBuf;

use crate::{Notice, PreviewImage, TaskPhase};

/// Suggested local filename for the download affordance.
pub const SUGGESTED_DOWNLOAD_NAME: &str = "processed_image.png";

/// Derived presentation state.
///
/// Always recomputed from [`AppState`](crate::AppState); never an independent
/// source of truth. `loading` spans Submitting and Processing and drops
/// exactly once, when the phase reaches a terminal value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub phase: TaskPhase,
    pub loading: bool,
    pub results_visible: bool,
    pub drop_active: bool,
    pub selected_name: Option<String>,
    pub original_preview: Option<PreviewImage>,
    pub processed_preview: Option<PreviewImage>,
    pub notice: Option<Notice>,
    pub download_available: bool,
    /// Download target once a task handle exists.
    pub result_path: Option<String>,
    pub saved_to: Option<PathBuf>,
    pub poll_attempts: u32,
    pub dirty: bool,
}
