use crate::{ClassificationRequest, RequestId, UploadedFile};

/// Side effects requested by `update`; executed by the platform layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Send the file to the parsing endpoint.
    UploadEmail {
        request_id: RequestId,
        file: UploadedFile,
    },
    /// Send the selection to the classification endpoint.
    ClassifyEmail {
        request_id: RequestId,
        request: ClassificationRequest,
    },
}
