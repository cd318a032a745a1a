pub const TITLE: &str = "Email Classification";
pub const REPORT_TITLE: &str = "Email Classification Report";
pub const PROMPT: &str = "> ";
pub const OVERLAY_TEXT: &str = "[ working... please wait ]";
pub const DEFAULT_REPORT_PATH: &str = "report.html";

pub const HELP_LINES: &[&str] = &[
    "Commands:",
    "  open <path>     choose an .eml file",
    "  upload          upload the chosen file",
    "  body            toggle the email body as input",
    "  attach <index>  toggle an attachment as input",
    "  proceed         send the selection for classification",
    "  save [path]     write the report as HTML (default report.html)",
    "  show            print the current view again",
    "  help            show this help",
    "  quit            exit",
];
