use triage_core::{
    AppViewModel, ContentView, EmailView, Inline, ReportDocument, ReportSpan, ReportView,
    StatusKind,
};

use super::constants::*;

const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Use ANSI bold for emphasis.
    pub color: bool,
}

/// Renders the whole page as terminal lines.
pub fn render(view: &AppViewModel, options: RenderOptions) -> Vec<String> {
    let mut lines = vec![format!("== {TITLE} ==")];

    let file = view.chosen_file.as_deref().unwrap_or("(no file chosen)");
    let upload = if view.upload_enabled {
        format!("[{}]", view.upload_label)
    } else {
        format!("({})", view.upload_label)
    };
    lines.push(format!("File: {file}  {upload}"));

    if let Some(status) = view.status {
        let tag = match status.kind {
            StatusKind::Success => "ok",
            StatusKind::Error => "error",
        };
        lines.push(format!("[{tag}] {}", status.text));
    }
    if view.overlay_visible {
        lines.push(OVERLAY_TEXT.to_string());
    }

    match &view.content {
        ContentView::Empty => {}
        ContentView::Email(email) => render_email(&mut lines, email),
        ContentView::Report(report) => render_report(&mut lines, report, options),
    }
    lines
}

fn render_email(lines: &mut Vec<String>, email: &EmailView) {
    for (label, value) in [
        ("Subject", &email.subject),
        ("From", &email.from),
        ("To", &email.to),
    ] {
        if let Some(value) = value {
            lines.push(format!("{label}: {value}"));
        }
    }

    if let Some(body) = &email.body {
        lines.push("Body:".to_string());
        push_indented(lines, body);
        lines.push(format!("{} Select body  (body)", checkbox(email.body_selected)));
    }

    if !email.attachments.is_empty() {
        lines.push("Attachments:".to_string());
        for row in &email.attachments {
            lines.push(format!(
                "{} {}: {}  (attach {})",
                checkbox(row.selected),
                row.index,
                row.filename,
                row.index
            ));
            push_indented(lines, &row.extracted_text);
        }
    }

    if email.proceed_visible {
        let category = email
            .category_type
            .map(|c| c.as_str())
            .unwrap_or_default();
        if email.proceed_enabled {
            lines.push(format!("[Proceed For Classification]  (proceed) as {category}"));
        } else {
            lines.push(format!("(Proceed For Classification) as {category}"));
        }
    }
}

fn render_report(lines: &mut Vec<String>, report: &ReportView, options: RenderOptions) {
    lines.push("Report".to_string());
    lines.extend(render_report_document(&report.document, options));
    lines.push(format!("(save [path] writes HTML, default {DEFAULT_REPORT_PATH})"));
}

/// List items start on their own line; line breaks end the current line.
pub fn render_report_document(document: &ReportDocument, options: RenderOptions) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for span in document.spans() {
        match span {
            ReportSpan::Inline(inline) => push_inline(&mut current, inline, options),
            ReportSpan::ListItem(inlines) => {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                let mut item = String::from("  * ");
                for inline in inlines {
                    push_inline(&mut item, inline, options);
                }
                lines.push(item);
            }
            ReportSpan::LineBreak => lines.push(std::mem::take(&mut current)),
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

fn push_inline(out: &mut String, inline: &Inline, options: RenderOptions) {
    match inline {
        Inline::Text(text) => out.push_str(text),
        Inline::Bold(text) if options.color => {
            out.push_str(BOLD);
            out.push_str(text);
            out.push_str(RESET);
        }
        Inline::Bold(text) => out.push_str(text),
    }
}

fn push_indented(lines: &mut Vec<String>, text: &str) {
    lines.extend(text.lines().map(|line| format!("    {line}")));
}

fn checkbox(checked: bool) -> &'static str {
    if checked {
        "[x]"
    } else {
        "[ ]"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use triage_core::{
        parse_report, update, AppState, Attachment, ClassificationReport, EmailData, Effect, Msg,
    };

    const PLAIN: RenderOptions = RenderOptions { color: false };

    fn parsed_state() -> AppState {
        let (state, _) = update(AppState::new(), Msg::FileChosen("mail.eml".into()));
        let (state, _) = update(state, Msg::UploadClicked);
        let (state, _) = update(
            state,
            Msg::UploadSucceeded {
                request_id: 1,
                email: EmailData {
                    id: None,
                    subject: "Invoice".to_string(),
                    from: "a@example.com".to_string(),
                    to: String::new(),
                    body: "Line one\nLine two".to_string(),
                    attachments: vec![Attachment {
                        filename: "terms.txt".to_string(),
                        extracted_text: "Net 30".to_string(),
                    }],
                },
            },
        );
        state
    }

    #[test]
    fn idle_page_shows_upload_control() {
        let lines = render(&AppState::new().view(), PLAIN);
        assert_eq!(
            lines,
            vec![
                "== Email Classification ==".to_string(),
                "File: (no file chosen)  [Upload]".to_string(),
            ]
        );
    }

    #[test]
    fn email_page_lists_fields_and_selection() {
        let (state, _) = update(parsed_state(), Msg::AttachmentToggled { index: 0 });
        let lines = render(&state.view(), PLAIN);
        assert_eq!(
            lines,
            vec![
                "== Email Classification ==",
                "File: mail.eml  [Upload]",
                "[ok] Upload successful!",
                "Subject: Invoice",
                "From: a@example.com",
                "Body:",
                "    Line one",
                "    Line two",
                "[ ] Select body  (body)",
                "Attachments:",
                "[x] 0: terms.txt  (attach 0)",
                "    Net 30",
                "[Proceed For Classification]  (proceed) as ATTACHMENT",
            ]
        );
    }

    #[test]
    fn overlay_and_disabled_controls_while_classifying() {
        let (state, _) = update(parsed_state(), Msg::BodyToggled);
        let (state, effects) = update(state, Msg::ProceedClicked);
        assert!(matches!(effects[0], Effect::ClassifyEmail { .. }));

        let lines = render(&state.view(), PLAIN);
        assert_eq!(lines[1], "File: mail.eml  (Upload)");
        assert!(lines.contains(&OVERLAY_TEXT.to_string()));
        assert_eq!(
            lines.last().map(String::as_str),
            Some("(Proceed For Classification) as BODY")
        );
    }

    #[test]
    fn report_page_replaces_email() {
        let (state, _) = update(parsed_state(), Msg::BodyToggled);
        let (state, _) = update(state, Msg::ProceedClicked);
        let (state, _) = update(
            state,
            Msg::ClassifySucceeded {
                request_id: 2,
                report: ClassificationReport {
                    data: Some("**Hi** there\n* one\n* two".to_string()),
                },
            },
        );

        let lines = render(&state.view(), PLAIN);
        assert_eq!(
            lines,
            vec![
                "== Email Classification ==",
                "File: mail.eml  (Upload)",
                "[ok] Classification successful!",
                "Report",
                "Hi there",
                "  * one",
                "  * two",
                "(save [path] writes HTML, default report.html)",
            ]
        );
    }

    #[test]
    fn bold_uses_ansi_when_enabled() {
        let doc = parse_report("a **b** c");
        assert_eq!(
            render_report_document(&doc, RenderOptions { color: true }),
            vec!["a \x1b[1mb\x1b[0m c".to_string()]
        );
    }

    #[test]
    fn blank_report_lines_are_kept() {
        let doc = parse_report("top\n\nbottom");
        assert_eq!(
            render_report_document(&doc, PLAIN),
            vec!["top".to_string(), String::new(), "bottom".to_string()]
        );
    }
}
