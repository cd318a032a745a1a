use crate::{parse_report, CategoryType, ParsedEmail, Phase, ReportDocument, StatusMessage};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub phase: Phase,
    pub chosen_file: Option<String>,
    pub status: Option<StatusMessage>,
    pub upload_enabled: bool,
    pub upload_label: &'static str,
    /// Blocking spinner; shown while either request is in flight.
    pub overlay_visible: bool,
    pub content: ContentView,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ContentView {
    #[default]
    Empty,
    Email(EmailView),
    Report(ReportView),
}

/// Parsed fields plus selection controls. Empty fields are `None` and not shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailView {
    pub subject: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub body: Option<String>,
    pub body_selected: bool,
    pub attachments: Vec<AttachmentRowView>,
    pub category_type: Option<CategoryType>,
    pub proceed_visible: bool,
    pub proceed_enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentRowView {
    pub index: usize,
    pub filename: String,
    pub extracted_text: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportView {
    pub document: ReportDocument,
    pub html: String,
}

impl EmailView {
    pub(crate) fn build(parsed: &ParsedEmail, phase: Phase) -> Self {
        let email = parsed.email();
        let selection = parsed.selection();
        let category_type = selection.category_type();
        let proceed_visible = category_type.is_some();
        Self {
            subject: non_empty(&email.subject),
            from: non_empty(&email.from),
            to: non_empty(&email.to),
            body: non_empty(&email.body),
            body_selected: selection.body_selected(),
            attachments: email
                .attachments
                .iter()
                .enumerate()
                .map(|(index, attachment)| AttachmentRowView {
                    index,
                    filename: attachment.filename.clone(),
                    extracted_text: attachment.extracted_text.clone(),
                    selected: selection.is_attachment_selected(index),
                })
                .collect(),
            category_type,
            proceed_visible,
            proceed_enabled: proceed_visible && phase == Phase::Parsed,
        }
    }
}

impl ReportView {
    pub(crate) fn from_markup(markup: Option<&str>) -> Self {
        let document = parse_report(markup.unwrap_or_default());
        let html = document.to_html();
        Self { document, html }
    }
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}
