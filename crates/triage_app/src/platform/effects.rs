use std::io;
use std::sync::{mpsc, Arc};
use std::thread;

use engine_logging::{engine_info, engine_warn};
use triage_core::{
    Attachment, CategoryType, ClassificationReport, ClassificationRequest, Effect, EmailData,
    EmailId, Msg,
};
use triage_engine::{
    AttachmentDto, CategoryTypeDto, ClassifyRequest, EmailIdDto, EmailService, EngineEvent,
    EngineHandle, ProcessedEmail,
};

use super::app::AppEvent;

/// Executes core effects on the engine and feeds engine results back as messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(service: Arc<dyn EmailService>, app_tx: mpsc::Sender<AppEvent>) -> io::Result<Self> {
        let (engine, engine_rx) = EngineHandle::new(service)?;
        spawn_event_loop(engine_rx, app_tx);
        Ok(Self { engine })
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::UploadEmail { request_id, file } => {
                    engine_info!(
                        "UploadEmail request_id={} file={:?}",
                        request_id,
                        file.path()
                    );
                    self.engine
                        .upload(request_id, file.path(), file.filename());
                }
                Effect::ClassifyEmail {
                    request_id,
                    request,
                } => {
                    engine_info!(
                        "ClassifyEmail request_id={} category_type={}",
                        request_id,
                        request.category_type
                    );
                    self.engine.classify(request_id, to_wire_request(request));
                }
            }
        }
    }
}

fn spawn_event_loop(engine_rx: mpsc::Receiver<EngineEvent>, app_tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        while let Ok(event) = engine_rx.recv() {
            if app_tx.send(AppEvent::Core(map_event(event))).is_err() {
                break;
            }
        }
    });
}

pub(crate) fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::UploadCompleted { request_id, result } => match result {
            Ok(email) => Msg::UploadSucceeded {
                request_id,
                email: map_email(email),
            },
            Err(err) => {
                engine_warn!("Upload {} failed: {}", request_id, err);
                Msg::UploadFailed { request_id }
            }
        },
        EngineEvent::ClassifyCompleted { request_id, result } => match result {
            Ok(response) => Msg::ClassifySucceeded {
                request_id,
                report: ClassificationReport {
                    data: response.data,
                },
            },
            Err(err) => {
                engine_warn!("Classification {} failed: {}", request_id, err);
                Msg::ClassifyFailed { request_id }
            }
        },
    }
}

fn map_email(email: ProcessedEmail) -> EmailData {
    EmailData {
        id: email.email_id.map(|id| match id {
            EmailIdDto::Number(n) => EmailId::Number(n),
            EmailIdDto::Text(s) => EmailId::Text(s),
        }),
        subject: email.subject,
        from: email.from,
        to: email.to,
        body: email.body,
        attachments: email
            .attachments
            .into_iter()
            .map(|a| Attachment {
                filename: a.filename,
                extracted_text: a.extracted_text,
            })
            .collect(),
    }
}

fn to_wire_request(request: ClassificationRequest) -> ClassifyRequest {
    ClassifyRequest {
        body: request.body,
        category_type: map_category(request.category_type),
        email_id: request.email_id.map(|id| match id {
            EmailId::Number(n) => EmailIdDto::Number(n),
            EmailId::Text(s) => EmailIdDto::Text(s),
        }),
        attachments: request
            .attachments
            .into_iter()
            .map(|a| AttachmentDto {
                filename: a.filename,
                extracted_text: a.extracted_text,
            })
            .collect(),
    }
}

fn map_category(category: CategoryType) -> CategoryTypeDto {
    match category {
        CategoryType::Body => CategoryTypeDto::Body,
        CategoryType::Attachment => CategoryTypeDto::Attachment,
        CategoryType::BodyAndAttachment => CategoryTypeDto::BodyAndAttachment,
    }
}
