use std::io;
use std::path::PathBuf;
use std::sync::{mpsc, Arc};
use std::thread;

use engine_logging::{engine_debug, engine_warn};

use crate::{
    ClassifyRequest, EmailService, EngineEvent, FailureKind, ProcessedEmail, RequestId,
    ServiceError,
};

enum EngineCommand {
    Upload {
        request_id: RequestId,
        path: PathBuf,
        filename: String,
    },
    Classify {
        request_id: RequestId,
        request: ClassifyRequest,
    },
}

/// Runs service calls on a background tokio runtime.
///
/// Every command produces exactly one [`EngineEvent`] on the receiver
/// returned by [`EngineHandle::new`]. The runtime thread exits once every
/// handle clone has been dropped.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn new(service: Arc<dyn EmailService>) -> io::Result<(Self, mpsc::Receiver<EngineEvent>)> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?;

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let service = service.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    let event = handle_command(service.as_ref(), command).await;
                    let _ = event_tx.send(event);
                });
            }
        });

        Ok((Self { cmd_tx }, event_rx))
    }

    pub fn upload(&self, request_id: RequestId, path: impl Into<PathBuf>, filename: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::Upload {
            request_id,
            path: path.into(),
            filename: filename.into(),
        });
    }

    pub fn classify(&self, request_id: RequestId, request: ClassifyRequest) {
        let _ = self
            .cmd_tx
            .send(EngineCommand::Classify { request_id, request });
    }
}

async fn handle_command(service: &dyn EmailService, command: EngineCommand) -> EngineEvent {
    match command {
        EngineCommand::Upload {
            request_id,
            path,
            filename,
        } => {
            let result = upload_file(service, &path, &filename).await;
            if let Err(err) = &result {
                engine_warn!("Upload {} of {:?} failed: {}", request_id, path, err);
            }
            EngineEvent::UploadCompleted { request_id, result }
        }
        EngineCommand::Classify {
            request_id,
            request,
        } => {
            engine_debug!(
                "Classify {} category={:?} attachments={}",
                request_id,
                request.category_type,
                request.attachments.len()
            );
            let result = service.classify_email(&request).await;
            if let Err(err) = &result {
                engine_warn!("Classify {} failed: {}", request_id, err);
            }
            EngineEvent::ClassifyCompleted { request_id, result }
        }
    }
}

async fn upload_file(
    service: &dyn EmailService,
    path: &std::path::Path,
    filename: &str,
) -> Result<ProcessedEmail, ServiceError> {
    let contents = tokio::fs::read(path)
        .await
        .map_err(|err| ServiceError::new(FailureKind::ReadFile, err.to_string()))?;
    engine_debug!("Uploading {} ({} bytes)", filename, contents.len());
    service.process_email(filename, contents).await
}
