use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("output directory missing or not writable: {0}")]
    OutputDir(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Wraps rendered report HTML in a standalone document. `title` is inserted
/// verbatim; `body_html` must already be escaped.
pub fn build_report_document(title: &str, generated_utc: &str, body_html: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<meta name=\"generated\" content=\"{generated_utc}\">\n<title>{title}</title>\n</head>\n<body>\n<h2>Report</h2>\n<div style=\"white-space: pre-wrap; text-align: justify\">{body_html}</div>\n</body>\n</html>\n"
    )
}

/// Writes `content` to `target` through a temp file in the same directory,
/// creating the directory if needed. An existing file is replaced.
pub fn write_report_atomically(target: &Path, content: &str) -> Result<PathBuf, ExportError> {
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    if dir.exists() {
        if !dir.is_dir() {
            return Err(ExportError::OutputDir(format!(
                "{} is not a directory",
                dir.display()
            )));
        }
    } else {
        fs::create_dir_all(&dir).map_err(|e| ExportError::OutputDir(e.to_string()))?;
    }

    let mut tmp = NamedTempFile::new_in(&dir)?;
    tmp.write_all(content.as_bytes())?;
    tmp.flush()?;
    tmp.as_file_mut().sync_all()?;

    tmp.persist(target).map_err(|e| ExportError::Io(e.error))?;
    Ok(target.to_path_buf())
}
