//! Triage core: pure workflow state machine, selection builder, view-model
//! helpers and the report markup renderer.
mod effect;
mod email;
mod msg;
mod report;
mod selection;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use email::{is_eml_filename, Attachment, EmailData, EmailId, UploadedFile};
pub use msg::Msg;
pub use report::{parse_report, render_report_html, Inline, ReportDocument, ReportSpan};
pub use selection::{CategoryType, ClassificationRequest, ParsedEmail, Selection};
pub use state::{
    AppState, ClassificationReport, Phase, RequestId, StatusKind, StatusMessage,
    MSG_CLASSIFY_FAILED, MSG_CLASSIFY_SUCCEEDED, MSG_INVALID_EXTENSION, MSG_NO_FILE,
    MSG_UPLOAD_FAILED, MSG_UPLOAD_SUCCEEDED,
};
pub use update::update;
pub use view_model::{AppViewModel, AttachmentRowView, ContentView, EmailView, ReportView};
