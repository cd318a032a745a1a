use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Utc;
use triage_core::{render_report_html, ClassificationReport};
use triage_engine::{build_report_document, write_report_atomically, ExportError};

use super::ui::constants::REPORT_TITLE;

/// Writes classification reports as standalone HTML files.
pub struct ReportExporter {
    generated_utc: Arc<dyn Fn() -> String + Send + Sync>,
}

impl Default for ReportExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportExporter {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(|| Utc::now().to_rfc3339()))
    }

    pub fn with_clock(generated_utc: Arc<dyn Fn() -> String + Send + Sync>) -> Self {
        Self { generated_utc }
    }

    pub fn export(
        &self,
        report: &ClassificationReport,
        target: &Path,
    ) -> Result<PathBuf, ExportError> {
        let body = render_report_html(report.data.as_deref());
        let document = build_report_document(REPORT_TITLE, &(self.generated_utc)(), &body);
        write_report_atomically(target, &document)
    }
}
