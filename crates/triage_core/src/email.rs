use std::fmt;
use std::path::{Path, PathBuf};

/// A local file the user picked for upload. Only constructible for `.eml` names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    path: PathBuf,
    filename: String,
}

impl UploadedFile {
    /// Returns `None` when the path has no file name or the name does not
    /// end in `.eml` (any case).
    pub fn from_path(path: impl Into<PathBuf>) -> Option<Self> {
        let path = path.into();
        let filename = path.file_name()?.to_string_lossy().into_owned();
        if !is_eml_filename(&filename) {
            return None;
        }
        Some(Self { path, filename })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }
}

pub fn is_eml_filename(name: &str) -> bool {
    name.to_ascii_lowercase().ends_with(".eml")
}

/// Identifier assigned by the parsing service, echoed back on classify.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmailId {
    Number(i64),
    Text(String),
}

impl fmt::Display for EmailId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmailId::Number(id) => write!(f, "{id}"),
            EmailId::Text(id) => f.write_str(id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Attachment {
    pub filename: String,
    pub extracted_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EmailData {
    pub id: Option<EmailId>,
    pub subject: String,
    pub from: String,
    pub to: String,
    pub body: String,
    pub attachments: Vec<Attachment>,
}
