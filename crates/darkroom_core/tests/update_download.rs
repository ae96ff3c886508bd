use std::path::PathBuf;
use std::sync::{Arc, Once};

use darkroom_core::{
    media_type_for_name, update, AppState, CandidateFile, Effect, Msg, NoticeKind, StatusReport,
    SUGGESTED_DOWNLOAD_NAME,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(engine_logging::initialize_for_tests);
}

/// Drives a submission all the way to Completed.
fn completed_state() -> AppState {
    let file = CandidateFile {
        name: "photo.png".to_string(),
        media_type: media_type_for_name("photo.png"),
        bytes: Arc::new(vec![1, 2, 3]),
    };
    let (state, _effects) = update(AppState::new(), Msg::FilesOffered(vec![file]));
    let (state, _effects) = update(
        state,
        Msg::UploadAccepted {
            generation: 1,
            task_id: "t1".to_string(),
            result_path: "/r/1.png".to_string(),
        },
    );
    let (state, _effects) = update(
        state,
        Msg::StatusReported {
            generation: 1,
            report: StatusReport::Completed,
        },
    );
    state
}

#[test]
fn download_request_targets_the_result_path() {
    init_logging();
    let state = completed_state();
    let destination = PathBuf::from("/tmp").join(SUGGESTED_DOWNLOAD_NAME);

    let (_state, effects) = update(
        state,
        Msg::DownloadRequested {
            destination: destination.clone(),
        },
    );

    assert_eq!(
        effects,
        vec![Effect::SaveResult {
            generation: 1,
            result_path: "/r/1.png".to_string(),
            destination,
        }]
    );
}

#[test]
fn download_request_before_completion_is_ignored() {
    init_logging();
    let file = CandidateFile {
        name: "photo.png".to_string(),
        media_type: media_type_for_name("photo.png"),
        bytes: Arc::new(vec![1]),
    };
    let (state, _effects) = update(AppState::new(), Msg::FilesOffered(vec![file]));

    let (_state, effects) = update(
        state,
        Msg::DownloadRequested {
            destination: PathBuf::from("out.png"),
        },
    );

    assert!(effects.is_empty());
}

#[test]
fn saved_download_is_reported_in_the_view() {
    init_logging();
    let state = completed_state();

    let (state, effects) = update(
        state,
        Msg::DownloadSaved {
            generation: 1,
            path: PathBuf::from("/home/u/processed_image.png"),
        },
    );

    assert!(effects.is_empty());
    assert_eq!(
        state.view().saved_to,
        Some(PathBuf::from("/home/u/processed_image.png"))
    );
}

#[test]
fn failed_download_surfaces_a_notice() {
    init_logging();
    let state = completed_state();

    let (state, effects) = update(
        state,
        Msg::DownloadFailed {
            generation: 1,
            message: "disk full".to_string(),
        },
    );

    assert!(effects.is_empty());
    let notice = state.view().notice.expect("download notice");
    assert_eq!(notice.kind, NoticeKind::Download);
    assert_eq!(notice.message, "disk full");
}

#[test]
fn stale_download_outcomes_are_dropped() {
    init_logging();
    let mut state = completed_state();
    state.consume_dirty();

    let (mut state, _effects) = update(
        state,
        Msg::DownloadSaved {
            generation: 9,
            path: PathBuf::from("stale.png"),
        },
    );

    assert!(state.view().saved_to.is_none());
    assert!(!state.consume_dirty());
}
