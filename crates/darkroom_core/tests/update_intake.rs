use std::sync::{Arc, Once};

use darkroom_core::{
    media_type_for_name, update, AppState, CandidateFile, Effect, Msg, NoticeKind, SelectedFile,
    TaskPhase,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(engine_logging::initialize_for_tests);
}

fn candidate(name: &str) -> CandidateFile {
    CandidateFile {
        name: name.to_string(),
        media_type: media_type_for_name(name),
        bytes: Arc::new(vec![0xAA, 0xBB, 0xCC]),
    }
}

fn offer(state: AppState, names: &[&str]) -> (AppState, Vec<Effect>) {
    let files = names.iter().map(|name| candidate(name)).collect();
    update(state, Msg::FilesOffered(files))
}

#[test]
fn non_image_file_is_rejected_without_effects() {
    init_logging();
    let state = AppState::new();

    let (state, effects) = offer(state, &["notes.txt"]);
    let view = state.view();

    assert!(effects.is_empty());
    assert_eq!(view.phase, TaskPhase::Idle);
    assert!(!view.loading);
    let notice = view.notice.expect("validation notice");
    assert_eq!(notice.kind, NoticeKind::Validation);
    assert_eq!(notice.message, "Please upload an image file");
}

#[test]
fn image_submission_emits_exactly_one_upload() {
    init_logging();
    let state = AppState::new();

    let (state, effects) = offer(state, &["photo.png"]);
    let file = SelectedFile::from(candidate("photo.png"));

    assert_eq!(
        effects,
        vec![
            Effect::RenderPreview {
                generation: 1,
                file: file.clone(),
            },
            Effect::SubmitUpload {
                generation: 1,
                file,
            },
        ]
    );

    let view = state.view();
    assert_eq!(view.phase, TaskPhase::Submitting);
    assert!(view.loading);
    assert_eq!(view.selected_name.as_deref(), Some("photo.png"));
    assert!(view.notice.is_none());
}

#[test]
fn multi_file_drop_is_truncated_to_first_entry() {
    init_logging();
    let state = AppState::new();

    let (_state, effects) = offer(state, &["first.jpg", "second.png"]);

    let uploads: Vec<_> = effects
        .iter()
        .filter_map(|effect| match effect {
            Effect::SubmitUpload { file, .. } => Some(file.name.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(uploads, vec!["first.jpg".to_string()]);
}

#[test]
fn empty_offer_is_ignored() {
    init_logging();
    let state = AppState::new();

    let (mut state, effects) = update(state, Msg::FilesOffered(Vec::new()));

    assert!(effects.is_empty());
    assert!(!state.consume_dirty());
}

#[test]
fn drop_hover_marks_and_unmarks_the_target() {
    init_logging();
    let state = AppState::new();

    let (mut state, effects) = update(state, Msg::DropHoverChanged(true));
    assert!(effects.is_empty());
    assert!(state.view().drop_active);
    assert!(state.consume_dirty());

    // Same value again is not a render-worthy change.
    let (mut state, _effects) = update(state, Msg::DropHoverChanged(true));
    assert!(!state.consume_dirty());

    let (state, _effects) = update(state, Msg::DropHoverChanged(false));
    assert!(!state.view().drop_active);
}

#[test]
fn unreadable_file_surfaces_a_blocking_notice() {
    init_logging();
    let state = AppState::new();

    let (state, effects) = update(
        state,
        Msg::IntakeFailed {
            message: "could not read photo.png".to_string(),
        },
    );

    assert!(effects.is_empty());
    let notice = state.view().notice.expect("intake notice");
    assert_eq!(notice.kind, NoticeKind::Validation);
    assert_eq!(notice.message, "could not read photo.png");
}

#[test]
fn a_new_submission_supersedes_the_prior_task() {
    init_logging();
    let state = AppState::new();

    let (state, _effects) = offer(state, &["old.png"]);
    let (state, _effects) = update(
        state,
        Msg::UploadAccepted {
            generation: 1,
            task_id: "t1".to_string(),
            result_path: "/r/1.png".to_string(),
        },
    );
    assert_eq!(state.view().phase, TaskPhase::Processing);

    // Second submission bumps the generation and abandons the first task.
    let (state, effects) = offer(state, &["new.png"]);
    assert_eq!(effects.len(), 2);
    assert_eq!(state.view().phase, TaskPhase::Submitting);

    // A late report from the first task's poll chain is dropped.
    let (mut state, effects) = update(
        state,
        Msg::StatusReported {
            generation: 1,
            report: darkroom_core::StatusReport::Completed,
        },
    );
    assert!(effects.is_empty());
    assert_eq!(state.view().phase, TaskPhase::Submitting);
    assert!(state.consume_dirty()); // From the second submission only.
}

#[test]
fn media_types_follow_the_extension() {
    assert_eq!(media_type_for_name("a.PNG"), "image/png");
    assert_eq!(media_type_for_name("b.jpeg"), "image/jpeg");
    assert_eq!(media_type_for_name("c.webp"), "image/webp");
    assert_eq!(media_type_for_name("archive.tar.gz"), "application/octet-stream");
    assert_eq!(media_type_for_name("no_extension"), "application/octet-stream");
}
