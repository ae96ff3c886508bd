use std::time::Duration;

use crate::{
    AppState, Effect, Generation, Msg, NoticeKind, SelectedFile, StatusReport, TaskHandle,
    TaskPhase, TimeoutAction, UnrecognizedStatusPolicy,
};

/// Pure update function: applies a message to state and returns any effects.
///
/// This is the only place presentation-relevant state changes; callbacks
/// dispatch messages instead of mutating display state directly.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::FilesOffered(files) => {
            // Multi-file drops are truncated to the first entry.
            let Some(candidate) = files.into_iter().next() else {
                return (state, Vec::new());
            };
            if !candidate.media_type.starts_with("image/") {
                state.set_notice(NoticeKind::Validation, "Please upload an image file");
                return (state, Vec::new());
            }

            let file = SelectedFile::from(candidate);
            let generation = state.begin_submission(file.clone());
            vec![
                Effect::RenderPreview {
                    generation,
                    file: file.clone(),
                },
                Effect::SubmitUpload { generation, file },
            ]
        }
        Msg::IntakeFailed { message } => {
            state.set_notice(NoticeKind::Validation, message);
            Vec::new()
        }
        Msg::DropHoverChanged(active) => {
            state.set_drop_active(active);
            Vec::new()
        }
        Msg::PreviewReady {
            generation,
            target,
            image,
        } => {
            if state.is_current(generation) {
                state.set_preview(target, image);
            }
            Vec::new()
        }
        Msg::UploadAccepted {
            generation,
            task_id,
            result_path,
        } => {
            if !state.is_current(generation) || state.phase() != TaskPhase::Submitting {
                return (state, Vec::new());
            }
            state.accept_upload(TaskHandle {
                task_id: task_id.clone(),
                result_path,
            });
            // The original client checks status immediately after the upload
            // response; the interval applies between subsequent checks.
            state.record_check();
            vec![Effect::CheckStatus {
                generation,
                task_id,
                delay: Duration::ZERO,
            }]
        }
        Msg::UploadRejected {
            generation,
            message,
        } => {
            if state.is_current(generation) && state.phase() == TaskPhase::Submitting {
                state.fail(NoticeKind::Upload, message);
            }
            Vec::new()
        }
        Msg::StatusReported { generation, report } => {
            if !state.is_current(generation) || state.phase() != TaskPhase::Processing {
                return (state, Vec::new());
            }
            match report {
                StatusReport::Completed => {
                    state.complete();
                    match state.task() {
                        Some(task) => vec![Effect::FetchResult {
                            generation,
                            result_path: task.result_path.clone(),
                        }],
                        None => Vec::new(),
                    }
                }
                StatusReport::Error(message) => {
                    state.fail(NoticeKind::RemoteProcessing, message);
                    Vec::new()
                }
                StatusReport::Processing => schedule_next_check(&mut state, generation),
                StatusReport::Unrecognized(raw) => match state.policy().unrecognized {
                    UnrecognizedStatusPolicy::Retry => schedule_next_check(&mut state, generation),
                    UnrecognizedStatusPolicy::Fail => {
                        state.fail(
                            NoticeKind::RemoteProcessing,
                            format!("unexpected task status \"{raw}\""),
                        );
                        Vec::new()
                    }
                },
            }
        }
        Msg::StatusCheckFailed {
            generation,
            message,
        } => {
            if state.is_current(generation) && state.phase() == TaskPhase::Processing {
                state.fail(NoticeKind::PollTransport, message);
            }
            Vec::new()
        }
        Msg::DownloadRequested { destination } => {
            if state.phase() != TaskPhase::Completed {
                return (state, Vec::new());
            }
            match state.task() {
                Some(task) => vec![Effect::SaveResult {
                    generation: state.generation(),
                    result_path: task.result_path.clone(),
                    destination,
                }],
                None => Vec::new(),
            }
        }
        Msg::DownloadSaved { generation, path } => {
            if state.is_current(generation) {
                state.set_saved(path);
            }
            Vec::new()
        }
        Msg::DownloadFailed {
            generation,
            message,
        } => {
            if state.is_current(generation) {
                state.set_notice(NoticeKind::Download, message);
            }
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

/// Schedules the next status query, honoring the poll budget.
fn schedule_next_check(state: &mut AppState, generation: Generation) -> Vec<Effect> {
    let policy = state.policy().clone();
    if let Some(max) = policy.max_attempts {
        if state.attempts() >= max {
            match policy.on_timeout {
                TimeoutAction::Fail => state.fail(
                    NoticeKind::Timeout,
                    format!("processing did not finish after {max} status checks"),
                ),
                TimeoutAction::Reset => state.reset(),
            }
            return Vec::new();
        }
    }

    let Some(task) = state.task() else {
        return Vec::new();
    };
    let task_id = task.task_id.clone();
    state.record_check();
    vec![Effect::CheckStatus {
        generation,
        task_id,
        delay: policy.interval,
    }]
}
