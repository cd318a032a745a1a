//! Triage engine: service configuration, HTTP calls and report export.
mod client;
mod config;
mod engine;
mod export;
mod types;

pub use client::{EmailService, ReqwestEmailService, EML_MIME_TYPE};
pub use config::{ConfigError, ServiceConfig, CLASSIFY_PATH, PROCESS_PATH};
pub use engine::EngineHandle;
pub use export::{build_report_document, write_report_atomically, ExportError};
pub use types::{
    AttachmentDto, CategoryTypeDto, ClassifyRequest, ClassifyResponse, EmailIdDto, EngineEvent,
    FailureKind, ProcessResponse, ProcessedEmail, RequestId, ServiceError,
};
