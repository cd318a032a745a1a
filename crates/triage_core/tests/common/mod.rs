#![allow(dead_code)]

use std::sync::Once;

use triage_core::{update, AppState, Attachment, EmailData, EmailId, Effect, Msg, RequestId};

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(engine_logging::initialize_for_tests);
}

pub fn sample_email() -> EmailData {
    EmailData {
        id: Some(EmailId::Number(42)),
        subject: "Quarterly invoice".to_string(),
        from: "billing@example.com".to_string(),
        to: "ops@example.com".to_string(),
        body: "Please find the invoice attached.".to_string(),
        attachments: vec![
            Attachment {
                filename: "invoice.pdf".to_string(),
                extracted_text: "Amount due: 100".to_string(),
            },
            Attachment {
                filename: "terms.txt".to_string(),
                extracted_text: "Net 30".to_string(),
            },
        ],
    }
}

pub fn upload_request_id(effects: &[Effect]) -> RequestId {
    effects
        .iter()
        .find_map(|effect| match effect {
            Effect::UploadEmail { request_id, .. } => Some(*request_id),
            _ => None,
        })
        .expect("upload effect")
}

pub fn classify_request_id(effects: &[Effect]) -> RequestId {
    effects
        .iter()
        .find_map(|effect| match effect {
            Effect::ClassifyEmail { request_id, .. } => Some(*request_id),
            _ => None,
        })
        .expect("classify effect")
}

/// Chooses `message.eml`, uploads it and answers with `email`.
pub fn parsed_state(email: EmailData) -> AppState {
    let (state, _) = update(AppState::new(), Msg::FileChosen("message.eml".into()));
    let (state, effects) = update(state, Msg::UploadClicked);
    let request_id = upload_request_id(&effects);
    let (state, _) = update(state, Msg::UploadSucceeded { request_id, email });
    state
}
