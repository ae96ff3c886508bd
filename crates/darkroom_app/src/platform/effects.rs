use std::sync::mpsc;
use std::thread;

use darkroom_core::{Effect, Msg, PreviewImage, PreviewTarget, SelectedFile, StatusReport};
use darkroom_engine::{EngineEvent, EngineHandle, FilePayload, ServiceSettings, StatusKind};
use engine_logging::{engine_info, engine_warn};

/// Executes core effects against the engine and forwards engine events back
/// as messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    /// `notify` is called after each forwarded event so the shell can wake
    /// its render loop.
    pub fn new(
        settings: ServiceSettings,
        msg_tx: mpsc::Sender<Msg>,
        notify: impl Fn() + Send + 'static,
    ) -> Self {
        let (engine, events) = EngineHandle::new(settings);
        spawn_event_loop(events, msg_tx, notify);
        Self { engine }
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::SubmitUpload { generation, file } => {
                    engine_info!(
                        "SubmitUpload generation={} file={}",
                        generation,
                        file.name
                    );
                    self.engine.submit(generation, payload_from(file));
                }
                Effect::RenderPreview { generation, file } => {
                    self.engine.render_preview(generation, payload_from(file));
                }
                Effect::CheckStatus {
                    generation,
                    task_id,
                    delay,
                } => {
                    self.engine.check_status(generation, task_id, delay);
                }
                Effect::FetchResult {
                    generation,
                    result_path,
                } => {
                    self.engine.fetch_result(generation, result_path);
                }
                Effect::SaveResult {
                    generation,
                    result_path,
                    destination,
                } => {
                    engine_info!(
                        "SaveResult generation={} result_path={} destination={:?}",
                        generation,
                        result_path,
                        destination
                    );
                    self.engine.save_result(generation, result_path, destination);
                }
            }
        }
    }
}

fn spawn_event_loop(
    events: mpsc::Receiver<EngineEvent>,
    msg_tx: mpsc::Sender<Msg>,
    notify: impl Fn() + Send + 'static,
) {
    thread::spawn(move || {
        while let Ok(event) = events.recv() {
            let msg = map_event(event);
            if msg_tx.send(msg).is_err() {
                break;
            }
            notify();
        }
    });
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::UploadFinished { generation, result } => match result {
            Ok(ticket) => Msg::UploadAccepted {
                generation,
                task_id: ticket.task_id,
                result_path: ticket.result_path,
            },
            Err(err) => {
                engine_warn!("upload rejected generation={}: {}", generation, err);
                Msg::UploadRejected {
                    generation,
                    message: err.to_string(),
                }
            }
        },
        EngineEvent::StatusChecked { generation, result } => match result {
            Ok(kind) => Msg::StatusReported {
                generation,
                report: map_status(kind),
            },
            Err(err) => {
                engine_warn!("status check failed generation={}: {}", generation, err);
                Msg::StatusCheckFailed {
                    generation,
                    message: err.to_string(),
                }
            }
        },
        EngineEvent::PreviewRendered {
            generation,
            target,
            image,
        } => Msg::PreviewReady {
            generation,
            target: map_target(target),
            image: map_image(image),
        },
        EngineEvent::ResultFetched { generation, result } => match result {
            Ok(image) => Msg::PreviewReady {
                generation,
                target: PreviewTarget::Processed,
                image: map_image(image),
            },
            Err(err) => Msg::DownloadFailed {
                generation,
                message: format!("could not load the processed result: {err}"),
            },
        },
        EngineEvent::ResultSaved { generation, result } => match result {
            Ok(path) => Msg::DownloadSaved { generation, path },
            Err(err) => Msg::DownloadFailed {
                generation,
                message: err.to_string(),
            },
        },
    }
}

fn map_status(kind: StatusKind) -> StatusReport {
    match kind {
        StatusKind::Processing => StatusReport::Processing,
        StatusKind::Completed => StatusReport::Completed,
        StatusKind::Error(message) => StatusReport::Error(message),
        StatusKind::Unrecognized(raw) => StatusReport::Unrecognized(raw),
    }
}

fn map_target(target: darkroom_engine::PreviewTarget) -> PreviewTarget {
    match target {
        darkroom_engine::PreviewTarget::Original => PreviewTarget::Original,
        darkroom_engine::PreviewTarget::Processed => PreviewTarget::Processed,
    }
}

fn map_image(image: darkroom_engine::PreviewImage) -> PreviewImage {
    PreviewImage {
        uri: image.uri,
        media_type: image.media_type,
        bytes: std::sync::Arc::new(image.bytes),
    }
}

fn payload_from(file: SelectedFile) -> FilePayload {
    FilePayload {
        name: file.name,
        media_type: file.media_type,
        bytes: file.bytes.as_ref().clone(),
    }
}
