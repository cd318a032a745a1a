//! Report markup: `**bold**` spans, `* ` bullet lines and newlines.
//!
//! Markup is parsed line by line into a flat sequence of [`ReportSpan`]s and
//! rendered separately, so the same document can be shown as HTML or in a
//! terminal.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    Text(String),
    Bold(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportSpan {
    Inline(Inline),
    /// A `* ` line; its trailing newline is part of the item.
    ListItem(Vec<Inline>),
    LineBreak,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReportDocument {
    spans: Vec<ReportSpan>,
}

impl ReportDocument {
    pub fn spans(&self) -> &[ReportSpan] {
        &self.spans
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for span in &self.spans {
            match span {
                ReportSpan::Inline(inline) => push_inline_html(&mut out, inline),
                ReportSpan::ListItem(inlines) => {
                    out.push_str("<li>");
                    for inline in inlines {
                        push_inline_html(&mut out, inline);
                    }
                    out.push_str("</li>");
                }
                ReportSpan::LineBreak => out.push_str("<br/>"),
            }
        }
        out
    }
}

pub fn parse_report(markup: &str) -> ReportDocument {
    let mut spans = Vec::new();
    let mut lines = markup.split('\n').peekable();
    while let Some(line) = lines.next() {
        let followed_by_newline = lines.peek().is_some();
        if let Some(item) = line.strip_prefix("* ") {
            spans.push(ReportSpan::ListItem(parse_inline(item)));
            continue;
        }
        spans.extend(parse_inline(line).into_iter().map(ReportSpan::Inline));
        if followed_by_newline {
            spans.push(ReportSpan::LineBreak);
        }
    }
    ReportDocument { spans }
}

/// Renders markup to HTML; absent or empty input renders nothing.
pub fn render_report_html(markup: Option<&str>) -> String {
    match markup {
        Some(text) if !text.is_empty() => parse_report(text).to_html(),
        _ => String::new(),
    }
}

/// Bold spans close at the nearest following `**`; an unmatched `**` stays text.
fn parse_inline(line: &str) -> Vec<Inline> {
    let mut inlines = Vec::new();
    let mut rest = line;
    while let Some(open) = rest.find("**") {
        let after_open = &rest[open + 2..];
        let Some(close) = after_open.find("**") else {
            break;
        };
        if open > 0 {
            inlines.push(Inline::Text(rest[..open].to_string()));
        }
        inlines.push(Inline::Bold(after_open[..close].to_string()));
        rest = &after_open[close + 2..];
    }
    if !rest.is_empty() {
        inlines.push(Inline::Text(rest.to_string()));
    }
    inlines
}

fn push_inline_html(out: &mut String, inline: &Inline) {
    match inline {
        Inline::Text(text) => push_escaped(out, text),
        Inline::Bold(text) => {
            out.push_str("<strong>");
            push_escaped(out, text);
            out.push_str("</strong>");
        }
    }
}

fn push_escaped(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
}
