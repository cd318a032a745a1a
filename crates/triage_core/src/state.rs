use std::mem;
use std::path::PathBuf;

use crate::view_model::{AppViewModel, ContentView, EmailView, ReportView};
use crate::{Effect, EmailData, ParsedEmail, UploadedFile};

pub type RequestId = u64;

pub const MSG_NO_FILE: &str = "Please select a file before uploading.";
pub const MSG_INVALID_EXTENSION: &str = "Only .eml files are allowed!";
pub const MSG_UPLOAD_SUCCEEDED: &str = "Upload successful!";
pub const MSG_UPLOAD_FAILED: &str = "Upload failed. Please try again.";
pub const MSG_CLASSIFY_SUCCEEDED: &str = "Classification successful!";
pub const MSG_CLASSIFY_FAILED: &str = "Classification failed. Please try again.";

/// Markup returned by the classification endpoint. `None` renders nothing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClassificationReport {
    pub data: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Uploading,
    Parsed,
    Classifying,
    Reported,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: &'static str,
}

impl StatusMessage {
    fn success(text: &'static str) -> Self {
        Self {
            kind: StatusKind::Success,
            text,
        }
    }

    fn error(text: &'static str) -> Self {
        Self {
            kind: StatusKind::Error,
            text,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
enum Workflow {
    #[default]
    Idle,
    Uploading {
        request_id: RequestId,
        previous: Option<ParsedEmail>,
    },
    Parsed(ParsedEmail),
    Classifying {
        request_id: RequestId,
        email: ParsedEmail,
    },
    Reported(ClassificationReport),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    workflow: Workflow,
    chosen_file: Option<UploadedFile>,
    status: Option<StatusMessage>,
    last_request_id: RequestId,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        match self.workflow {
            Workflow::Idle => Phase::Idle,
            Workflow::Uploading { .. } => Phase::Uploading,
            Workflow::Parsed(_) => Phase::Parsed,
            Workflow::Classifying { .. } => Phase::Classifying,
            Workflow::Reported(_) => Phase::Reported,
        }
    }

    pub fn chosen_file(&self) -> Option<&UploadedFile> {
        self.chosen_file.as_ref()
    }

    pub fn status(&self) -> Option<StatusMessage> {
        self.status
    }

    /// Email currently on screen, including the one kept during a re-upload.
    pub fn parsed_email(&self) -> Option<&ParsedEmail> {
        match &self.workflow {
            Workflow::Parsed(email) | Workflow::Classifying { email, .. } => Some(email),
            Workflow::Uploading { previous, .. } => previous.as_ref(),
            Workflow::Idle | Workflow::Reported(_) => None,
        }
    }

    pub fn report(&self) -> Option<&ClassificationReport> {
        match &self.workflow {
            Workflow::Reported(report) => Some(report),
            _ => None,
        }
    }

    pub fn is_busy(&self) -> bool {
        matches!(
            self.workflow,
            Workflow::Uploading { .. } | Workflow::Classifying { .. }
        )
    }

    pub fn view(&self) -> AppViewModel {
        let phase = self.phase();
        let content = match &self.workflow {
            Workflow::Reported(report) => {
                ContentView::Report(ReportView::from_markup(report.data.as_deref()))
            }
            _ => match self.parsed_email() {
                Some(email) => ContentView::Email(EmailView::build(email, phase)),
                None => ContentView::Empty,
            },
        };
        AppViewModel {
            phase,
            chosen_file: self.chosen_file.as_ref().map(|f| f.filename().to_string()),
            status: self.status,
            upload_enabled: !self.is_busy() && phase != Phase::Reported,
            upload_label: if phase == Phase::Uploading {
                "Uploading..."
            } else {
                "Upload"
            },
            overlay_visible: self.is_busy(),
            content,
            dirty: self.dirty,
        }
    }

    /// Returns whether the view changed since the last call, clearing the flag.
    pub fn consume_dirty(&mut self) -> bool {
        mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    fn next_request_id(&mut self) -> RequestId {
        self.last_request_id += 1;
        self.last_request_id
    }

    pub(crate) fn choose_file(&mut self, path: PathBuf) {
        // The overlay blocks input while a request is outstanding.
        if self.is_busy() || matches!(self.workflow, Workflow::Reported(_)) {
            return;
        }
        match UploadedFile::from_path(path) {
            Some(file) => {
                self.chosen_file = Some(file);
                self.status = None;
            }
            None => {
                self.chosen_file = None;
                self.status = Some(StatusMessage::error(MSG_INVALID_EXTENSION));
            }
        }
        self.mark_dirty();
    }

    pub(crate) fn start_upload(&mut self) -> Option<Effect> {
        if !matches!(self.workflow, Workflow::Idle | Workflow::Parsed(_)) {
            return None;
        }
        let Some(file) = self.chosen_file.clone() else {
            self.status = Some(StatusMessage::error(MSG_NO_FILE));
            self.mark_dirty();
            return None;
        };
        let previous = match mem::take(&mut self.workflow) {
            Workflow::Parsed(email) => Some(email),
            _ => None,
        };
        let request_id = self.next_request_id();
        self.workflow = Workflow::Uploading {
            request_id,
            previous,
        };
        self.status = None;
        self.mark_dirty();
        Some(Effect::UploadEmail { request_id, file })
    }

    pub(crate) fn finish_upload(&mut self, request_id: RequestId, email: EmailData) {
        if !self.is_current_upload(request_id) {
            return;
        }
        let parsed = match mem::take(&mut self.workflow) {
            Workflow::Uploading {
                previous: Some(mut parsed),
                ..
            } => {
                parsed.replace_email(email);
                parsed
            }
            _ => ParsedEmail::new(email),
        };
        self.workflow = Workflow::Parsed(parsed);
        self.status = Some(StatusMessage::success(MSG_UPLOAD_SUCCEEDED));
        self.mark_dirty();
    }

    pub(crate) fn fail_upload(&mut self, request_id: RequestId) {
        if !self.is_current_upload(request_id) {
            return;
        }
        if let Workflow::Uploading { previous, .. } = mem::take(&mut self.workflow) {
            self.restore_parsed(previous);
        }
        self.status = Some(StatusMessage::error(MSG_UPLOAD_FAILED));
        self.mark_dirty();
    }

    pub(crate) fn toggle_body(&mut self) {
        if let Workflow::Parsed(email) = &mut self.workflow {
            if email.toggle_body() {
                self.dirty = true;
            }
        }
    }

    pub(crate) fn toggle_attachment(&mut self, index: usize) {
        if let Workflow::Parsed(email) = &mut self.workflow {
            if email.toggle_attachment(index) {
                self.dirty = true;
            }
        }
    }

    pub(crate) fn start_classification(&mut self) -> Option<Effect> {
        let request = match &self.workflow {
            Workflow::Parsed(email) => email.classification_request()?,
            _ => return None,
        };
        let Workflow::Parsed(email) = mem::take(&mut self.workflow) else {
            return None;
        };
        let request_id = self.next_request_id();
        self.workflow = Workflow::Classifying { request_id, email };
        self.mark_dirty();
        Some(Effect::ClassifyEmail {
            request_id,
            request,
        })
    }

    pub(crate) fn finish_classification(
        &mut self,
        request_id: RequestId,
        report: ClassificationReport,
    ) {
        if !self.is_current_classification(request_id) {
            return;
        }
        self.workflow = Workflow::Reported(report);
        self.status = Some(StatusMessage::success(MSG_CLASSIFY_SUCCEEDED));
        self.mark_dirty();
    }

    pub(crate) fn fail_classification(&mut self, request_id: RequestId) {
        if !self.is_current_classification(request_id) {
            return;
        }
        if let Workflow::Classifying { email, .. } = mem::take(&mut self.workflow) {
            self.workflow = Workflow::Parsed(email);
        }
        self.status = Some(StatusMessage::error(MSG_CLASSIFY_FAILED));
        self.mark_dirty();
    }

    fn restore_parsed(&mut self, previous: Option<ParsedEmail>) {
        self.workflow = match previous {
            Some(email) => Workflow::Parsed(email),
            None => Workflow::Idle,
        };
    }

    fn is_current_upload(&self, request_id: RequestId) -> bool {
        matches!(self.workflow, Workflow::Uploading { request_id: current, .. } if current == request_id)
    }

    fn is_current_classification(&self, request_id: RequestId) -> bool {
        matches!(self.workflow, Workflow::Classifying { request_id: current, .. } if current == request_id)
    }
}
