use std::path::{Path, PathBuf};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use engine_logging::{engine_info, engine_warn};

use crate::client::{HttpProcessingService, ProcessingService, ServiceSettings};
use crate::preview::{render_preview, result_media_type};
use crate::{persist, EngineEvent, FilePayload, Generation, PreviewTarget, SaveError};

enum EngineCommand {
    Submit {
        generation: Generation,
        file: FilePayload,
    },
    CheckStatus {
        generation: Generation,
        task_id: String,
        delay: Duration,
    },
    RenderPreview {
        generation: Generation,
        file: FilePayload,
    },
    FetchResult {
        generation: Generation,
        result_path: String,
    },
    SaveResult {
        generation: Generation,
        result_path: String,
        destination: PathBuf,
    },
}

/// Command side of the engine's background runtime.
///
/// Commands go in over a channel and are each handled as a spawned task;
/// events come back over the receiver returned alongside the handle, so the
/// shell can forward them from a dedicated thread while the UI keeps sending
/// commands.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn new(settings: ServiceSettings) -> (Self, mpsc::Receiver<EngineEvent>) {
        let service = Arc::new(HttpProcessingService::new(settings).expect("http client"));
        Self::with_service(service)
    }

    /// Builds a handle over any service implementation; the seam tests use.
    pub fn with_service(
        service: Arc<dyn ProcessingService>,
    ) -> (Self, mpsc::Receiver<EngineEvent>) {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            while let Ok(command) = cmd_rx.recv() {
                let service = service.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(service.as_ref(), command, &event_tx).await;
                });
            }
        });

        (Self { cmd_tx }, event_rx)
    }

    pub fn submit(&self, generation: Generation, file: FilePayload) {
        let _ = self.cmd_tx.send(EngineCommand::Submit { generation, file });
    }

    pub fn check_status(&self, generation: Generation, task_id: impl Into<String>, delay: Duration) {
        let _ = self.cmd_tx.send(EngineCommand::CheckStatus {
            generation,
            task_id: task_id.into(),
            delay,
        });
    }

    pub fn render_preview(&self, generation: Generation, file: FilePayload) {
        let _ = self
            .cmd_tx
            .send(EngineCommand::RenderPreview { generation, file });
    }

    pub fn fetch_result(&self, generation: Generation, result_path: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::FetchResult {
            generation,
            result_path: result_path.into(),
        });
    }

    pub fn save_result(
        &self,
        generation: Generation,
        result_path: impl Into<String>,
        destination: PathBuf,
    ) {
        let _ = self.cmd_tx.send(EngineCommand::SaveResult {
            generation,
            result_path: result_path.into(),
            destination,
        });
    }

}

async fn handle_command(
    service: &dyn ProcessingService,
    command: EngineCommand,
    event_tx: &mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Submit { generation, file } => {
            engine_info!(
                "upload start generation={} file={} bytes={}",
                generation,
                file.name,
                file.bytes.len()
            );
            let result = service.upload(&file).await;
            if let Err(err) = &result {
                engine_warn!("upload failed generation={}: {}", generation, err);
            }
            let _ = event_tx.send(EngineEvent::UploadFinished { generation, result });
        }
        EngineCommand::CheckStatus {
            generation,
            task_id,
            delay,
        } => {
            // The spacing between queries. Sequencing is the reducer's job:
            // it only schedules the next check after this one resolves.
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            let result = service.check_status(&task_id).await;
            let _ = event_tx.send(EngineEvent::StatusChecked { generation, result });
        }
        EngineCommand::RenderPreview { generation, file } => {
            let image = render_preview(
                generation,
                PreviewTarget::Original,
                &file.media_type,
                file.bytes,
            );
            let _ = event_tx.send(EngineEvent::PreviewRendered {
                generation,
                target: PreviewTarget::Original,
                image,
            });
        }
        EngineCommand::FetchResult {
            generation,
            result_path,
        } => {
            let result = service.fetch_result(&result_path).await.map(|bytes| {
                render_preview(
                    generation,
                    PreviewTarget::Processed,
                    result_media_type(&result_path),
                    bytes,
                )
            });
            if let Err(err) = &result {
                engine_warn!("result fetch failed generation={}: {}", generation, err);
            }
            let _ = event_tx.send(EngineEvent::ResultFetched { generation, result });
        }
        EngineCommand::SaveResult {
            generation,
            result_path,
            destination,
        } => {
            let result = save_result(service, &result_path, &destination).await;
            match &result {
                Ok(path) => engine_info!("result saved generation={} path={:?}", generation, path),
                Err(err) => engine_warn!("result save failed generation={}: {}", generation, err),
            }
            let _ = event_tx.send(EngineEvent::ResultSaved { generation, result });
        }
    }
}

async fn save_result(
    service: &dyn ProcessingService,
    result_path: &str,
    destination: &Path,
) -> Result<PathBuf, SaveError> {
    let bytes = service.fetch_result(result_path).await?;
    let path = persist::write_atomically(destination, &bytes)?;
    Ok(path)
}
