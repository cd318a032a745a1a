use std::collections::BTreeSet;
use std::fmt;

use crate::{Attachment, EmailData, EmailId};

/// Hint telling the classifier which content was submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryType {
    Body,
    Attachment,
    BodyAndAttachment,
}

impl CategoryType {
    /// Truth table over the two selection booleans; `None` when nothing is selected.
    pub fn from_selection(body: bool, any_attachment: bool) -> Option<Self> {
        match (body, any_attachment) {
            (true, false) => Some(CategoryType::Body),
            (true, true) => Some(CategoryType::BodyAndAttachment),
            (false, true) => Some(CategoryType::Attachment),
            (false, false) => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CategoryType::Body => "BODY",
            CategoryType::Attachment => "ATTACHMENT",
            CategoryType::BodyAndAttachment => "BODYANDATTACHMENT",
        }
    }
}

impl fmt::Display for CategoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which pieces of content the user opted into.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selection {
    body: bool,
    attachments: BTreeSet<usize>,
}

impl Selection {
    pub fn body_selected(&self) -> bool {
        self.body
    }

    pub fn is_attachment_selected(&self, index: usize) -> bool {
        self.attachments.contains(&index)
    }

    pub fn any_attachment_selected(&self) -> bool {
        !self.attachments.is_empty()
    }

    /// Selected indices in ascending order.
    pub fn selected_attachments(&self) -> impl Iterator<Item = usize> + '_ {
        self.attachments.iter().copied()
    }

    pub fn toggle_body(&mut self) {
        self.body = !self.body;
    }

    pub fn toggle_attachment(&mut self, index: usize) {
        if !self.attachments.remove(&index) {
            self.attachments.insert(index);
        }
    }

    pub fn category_type(&self) -> Option<CategoryType> {
        CategoryType::from_selection(self.body, self.any_attachment_selected())
    }

    /// True when the Proceed control should be offered.
    pub fn can_proceed(&self) -> bool {
        self.category_type().is_some()
    }

    /// Drops choices whose checkbox no longer exists.
    fn retain_applicable(&mut self, has_body: bool, attachment_count: usize) {
        self.body &= has_body;
        self.attachments.retain(|&index| index < attachment_count);
    }
}

/// Snapshot sent to the classification endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationRequest {
    pub body: Option<String>,
    pub category_type: CategoryType,
    pub email_id: Option<EmailId>,
    pub attachments: Vec<Attachment>,
}

/// A parsed email together with the user's selection over it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedEmail {
    email: EmailData,
    selection: Selection,
}

impl ParsedEmail {
    pub fn new(email: EmailData) -> Self {
        Self {
            email,
            selection: Selection::default(),
        }
    }

    /// Swaps in a newly parsed email and keeps the selection where it still applies.
    pub fn replace_email(&mut self, email: EmailData) {
        self.email = email;
        let has_body = self.has_body();
        self.selection
            .retain_applicable(has_body, self.email.attachments.len());
    }

    pub fn email(&self) -> &EmailData {
        &self.email
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// The body checkbox only exists for a non-empty body.
    pub fn has_body(&self) -> bool {
        !self.email.body.is_empty()
    }

    /// Returns false when the toggle was not applicable.
    pub fn toggle_body(&mut self) -> bool {
        if !self.has_body() {
            return false;
        }
        self.selection.toggle_body();
        true
    }

    /// Returns false for indices outside the attachment list.
    pub fn toggle_attachment(&mut self, index: usize) -> bool {
        if index >= self.email.attachments.len() {
            return false;
        }
        self.selection.toggle_attachment(index);
        true
    }

    pub fn classification_request(&self) -> Option<ClassificationRequest> {
        let category_type = self.selection.category_type()?;
        let body = self
            .selection
            .body_selected()
            .then(|| self.email.body.clone());
        let attachments = self
            .selection
            .selected_attachments()
            .filter_map(|index| self.email.attachments.get(index).cloned())
            .collect();
        Some(ClassificationRequest {
            body,
            category_type,
            email_id: self.email.id.clone(),
            attachments,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_email() -> EmailData {
        EmailData {
            id: Some(EmailId::Number(7)),
            subject: "Invoice".into(),
            from: "a@example.com".into(),
            to: "b@example.com".into(),
            body: "Please pay".into(),
            attachments: vec![
                Attachment {
                    filename: "a.pdf".into(),
                    extracted_text: "alpha".into(),
                },
                Attachment {
                    filename: "b.pdf".into(),
                    extracted_text: "beta".into(),
                },
                Attachment {
                    filename: "c.pdf".into(),
                    extracted_text: "gamma".into(),
                },
            ],
        }
    }

    #[test]
    fn category_truth_table() {
        assert_eq!(
            CategoryType::from_selection(true, false),
            Some(CategoryType::Body)
        );
        assert_eq!(
            CategoryType::from_selection(true, true),
            Some(CategoryType::BodyAndAttachment)
        );
        assert_eq!(
            CategoryType::from_selection(false, true),
            Some(CategoryType::Attachment)
        );
        assert_eq!(CategoryType::from_selection(false, false), None);
    }

    #[test]
    fn category_wire_names() {
        assert_eq!(CategoryType::Body.as_str(), "BODY");
        assert_eq!(CategoryType::Attachment.as_str(), "ATTACHMENT");
        assert_eq!(
            CategoryType::BodyAndAttachment.to_string(),
            "BODYANDATTACHMENT"
        );
    }

    #[test]
    fn double_toggle_unselects() {
        let mut selection = Selection::default();
        selection.toggle_attachment(2);
        assert!(selection.is_attachment_selected(2));
        selection.toggle_attachment(2);
        assert!(!selection.is_attachment_selected(2));
        assert!(!selection.can_proceed());
    }

    #[test]
    fn request_lists_attachments_in_index_order() {
        let mut parsed = ParsedEmail::new(sample_email());
        assert!(parsed.toggle_attachment(2));
        assert!(parsed.toggle_attachment(0));
        assert!(!parsed.toggle_attachment(3));

        let request = parsed.classification_request().unwrap();
        assert_eq!(request.category_type, CategoryType::Attachment);
        assert_eq!(request.body, None);
        assert_eq!(request.email_id, Some(EmailId::Number(7)));
        let names: Vec<_> = request
            .attachments
            .iter()
            .map(|a| a.filename.as_str())
            .collect();
        assert_eq!(names, vec!["a.pdf", "c.pdf"]);
    }

    #[test]
    fn replaced_email_keeps_applicable_selection() {
        let mut parsed = ParsedEmail::new(sample_email());
        assert!(parsed.toggle_body());
        assert!(parsed.toggle_attachment(0));
        assert!(parsed.toggle_attachment(2));

        let mut shorter = sample_email();
        shorter.attachments.truncate(1);
        parsed.replace_email(shorter);
        assert!(parsed.selection().body_selected());
        assert!(parsed.selection().is_attachment_selected(0));
        assert!(!parsed.selection().is_attachment_selected(2));

        let mut bodiless = sample_email();
        bodiless.body.clear();
        parsed.replace_email(bodiless);
        assert!(!parsed.selection().body_selected());
        assert_eq!(
            parsed.classification_request().unwrap().category_type,
            CategoryType::Attachment
        );
    }

    #[test]
    fn empty_body_cannot_be_selected() {
        let mut email = sample_email();
        email.body.clear();
        let mut parsed = ParsedEmail::new(email);
        assert!(!parsed.toggle_body());
        assert!(parsed.classification_request().is_none());
    }
}
