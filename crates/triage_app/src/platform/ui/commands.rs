use std::path::PathBuf;

use thiserror::Error;

/// One line of user input, mapped onto the page controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserCommand {
    Open(PathBuf),
    Upload,
    ToggleBody,
    ToggleAttachment(usize),
    Proceed,
    Save(Option<PathBuf>),
    Show,
    Help,
    Quit,
}

impl UserCommand {
    /// Commands that act on the page and so wait behind the overlay.
    pub fn is_blocked_by_overlay(&self) -> bool {
        !matches!(self, UserCommand::Show | UserCommand::Help | UserCommand::Quit)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command {0:?} (type `help`)")]
    Unknown(String),
    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),
    #[error("{0:?} is not an attachment index")]
    InvalidIndex(String),
}

/// Blank lines parse to `None`.
pub fn parse_command(line: &str) -> Result<Option<UserCommand>, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (keyword, rest) = match line.split_once(char::is_whitespace) {
        Some((keyword, rest)) => (keyword, rest.trim()),
        None => (line, ""),
    };

    let command = match keyword.to_ascii_lowercase().as_str() {
        "open" => {
            if rest.is_empty() {
                return Err(CommandError::MissingArgument("open"));
            }
            UserCommand::Open(PathBuf::from(unquote(rest)))
        }
        "upload" => UserCommand::Upload,
        "body" => UserCommand::ToggleBody,
        "attach" => {
            if rest.is_empty() {
                return Err(CommandError::MissingArgument("attach"));
            }
            let index = rest
                .parse()
                .map_err(|_| CommandError::InvalidIndex(rest.to_string()))?;
            UserCommand::ToggleAttachment(index)
        }
        "proceed" => UserCommand::Proceed,
        "save" => UserCommand::Save((!rest.is_empty()).then(|| PathBuf::from(unquote(rest)))),
        "show" => UserCommand::Show,
        "help" | "?" => UserCommand::Help,
        "quit" | "exit" => UserCommand::Quit,
        _ => return Err(CommandError::Unknown(keyword.to_string())),
    };
    Ok(Some(command))
}

fn unquote(raw: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = raw
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    raw
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_command() {
        assert_eq!(
            parse_command("open /tmp/a.eml"),
            Ok(Some(UserCommand::Open("/tmp/a.eml".into())))
        );
        assert_eq!(parse_command("UPLOAD"), Ok(Some(UserCommand::Upload)));
        assert_eq!(parse_command(" body "), Ok(Some(UserCommand::ToggleBody)));
        assert_eq!(
            parse_command("attach 2"),
            Ok(Some(UserCommand::ToggleAttachment(2)))
        );
        assert_eq!(parse_command("proceed"), Ok(Some(UserCommand::Proceed)));
        assert_eq!(parse_command("save"), Ok(Some(UserCommand::Save(None))));
        assert_eq!(
            parse_command("save out/r.html"),
            Ok(Some(UserCommand::Save(Some("out/r.html".into()))))
        );
        assert_eq!(parse_command("show"), Ok(Some(UserCommand::Show)));
        assert_eq!(parse_command("?"), Ok(Some(UserCommand::Help)));
        assert_eq!(parse_command("exit"), Ok(Some(UserCommand::Quit)));
    }

    #[test]
    fn blank_lines_are_ignored() {
        assert_eq!(parse_command("   "), Ok(None));
    }

    #[test]
    fn paths_keep_spaces_and_lose_quotes() {
        assert_eq!(
            parse_command("open \"My Mail/inbox 1.eml\""),
            Ok(Some(UserCommand::Open("My Mail/inbox 1.eml".into())))
        );
        assert_eq!(
            parse_command("open  My Mail/inbox.eml "),
            Ok(Some(UserCommand::Open("My Mail/inbox.eml".into())))
        );
    }

    #[test]
    fn reports_bad_input() {
        assert_eq!(
            parse_command("classify"),
            Err(CommandError::Unknown("classify".to_string()))
        );
        assert_eq!(
            parse_command("open"),
            Err(CommandError::MissingArgument("open"))
        );
        assert_eq!(
            parse_command("attach x"),
            Err(CommandError::InvalidIndex("x".to_string()))
        );
        assert_eq!(
            parse_command("attach -1"),
            Err(CommandError::InvalidIndex("-1".to_string()))
        );
    }

    #[test]
    fn overlay_blocks_page_commands_only() {
        assert!(UserCommand::Upload.is_blocked_by_overlay());
        assert!(UserCommand::Save(None).is_blocked_by_overlay());
        assert!(!UserCommand::Quit.is_blocked_by_overlay());
        assert!(!UserCommand::Help.is_blocked_by_overlay());
    }
}
