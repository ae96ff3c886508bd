//! Darkroom core: pure state machine and view-model helpers.
mod effect;
mod intake;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use intake::{media_type_for_name, IMAGE_EXTENSIONS};
pub use msg::Msg;
pub use state::{
    AppState, CandidateFile, Generation, Notice, NoticeKind, PollPolicy, PreviewImage,
    PreviewTarget, SelectedFile, StatusReport, TaskHandle, TaskPhase, TimeoutAction,
    UnrecognizedStatusPolicy,
};
pub use update::update;
pub use view_model::{AppViewModel, SUGGESTED_DOWNLOAD_NAME};
