use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User picked a local file (the "file input").
    FileChosen(PathBuf),
    /// User clicked Upload.
    UploadClicked,
    /// Parsing endpoint answered with a parsed email.
    UploadSucceeded {
        request_id: crate::RequestId,
        email: crate::EmailData,
    },
    /// Upload failed for any reason (IO, network, status, payload).
    UploadFailed { request_id: crate::RequestId },
    /// User toggled the "Select body" checkbox.
    BodyToggled,
    /// User toggled the checkbox of the attachment at `index`.
    AttachmentToggled { index: usize },
    /// User clicked "Proceed For Classification".
    ProceedClicked,
    /// Classification endpoint answered with a report.
    ClassifySucceeded {
        request_id: crate::RequestId,
        report: crate::ClassificationReport,
    },
    /// Classification failed for any reason.
    ClassifyFailed { request_id: crate::RequestId },
    /// Fallback for input that maps to nothing.
    NoOp,
}
