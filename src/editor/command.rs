use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::editor::document::Mark;

/// Formatting commands exposed by the toolbar and keyboard shortcuts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FormatCommand {
    Bold,
    Italic,
    Underline,
    Strikethrough,
    InsertUnorderedList,
    CreateLink,
}

impl FormatCommand {
    pub const TOOLBAR: [FormatCommand; 6] = [
        FormatCommand::Bold,
        FormatCommand::Italic,
        FormatCommand::Underline,
        FormatCommand::Strikethrough,
        FormatCommand::InsertUnorderedList,
        FormatCommand::CreateLink,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FormatCommand::Bold => "bold",
            FormatCommand::Italic => "italic",
            FormatCommand::Underline => "underline",
            FormatCommand::Strikethrough => "strikethrough",
            FormatCommand::InsertUnorderedList => "insertUnorderedList",
            FormatCommand::CreateLink => "createLink",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FormatCommand::Bold => "Bold",
            FormatCommand::Italic => "Italic",
            FormatCommand::Underline => "Underline",
            FormatCommand::Strikethrough => "Strikethrough",
            FormatCommand::InsertUnorderedList => "Bullet List",
            FormatCommand::CreateLink => "Insert Link",
        }
    }

    /// The inline mark toggled by this command, if any.
    pub fn mark(self) -> Option<Mark> {
        match self {
            FormatCommand::Bold => Some(Mark::Bold),
            FormatCommand::Italic => Some(Mark::Italic),
            FormatCommand::Underline => Some(Mark::Underline),
            FormatCommand::Strikethrough => Some(Mark::Strikethrough),
            FormatCommand::InsertUnorderedList | FormatCommand::CreateLink => None,
        }
    }

    /// Shortcut key used with Ctrl (or Cmd).
    pub fn from_shortcut(key: char) -> Option<FormatCommand> {
        match key.to_ascii_lowercase() {
            'b' => Some(FormatCommand::Bold),
            'i' => Some(FormatCommand::Italic),
            'u' => Some(FormatCommand::Underline),
            'k' => Some(FormatCommand::CreateLink),
            _ => None,
        }
    }
}

impl fmt::Display for FormatCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown format command: {0}")]
pub struct CommandParseError(pub String);

impl FromStr for FormatCommand {
    type Err = CommandParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FormatCommand::TOOLBAR
            .into_iter()
            .find(|command| command.as_str() == s)
            .ok_or_else(|| CommandParseError(s.to_string()))
    }
}

/// Which formats are active at the current selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FormatState {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strikethrough: bool,
    pub list: bool,
    pub link: bool,
}

impl FormatState {
    pub fn is_active(&self, command: FormatCommand) -> bool {
        match command {
            FormatCommand::Bold => self.bold,
            FormatCommand::Italic => self.italic,
            FormatCommand::Underline => self.underline,
            FormatCommand::Strikethrough => self.strikethrough,
            FormatCommand::InsertUnorderedList => self.list,
            FormatCommand::CreateLink => self.link,
        }
    }
}

/// Asks the user for link details. Returning `None` cancels the command.
#[cfg_attr(test, mockall::automock)]
pub trait LinkPrompt {
    fn request_url(&mut self) -> Option<String>;

    /// Text for a link inserted at a collapsed caret.
    fn request_text(&mut self) -> Option<String>;
}

/// A prompt that always cancels.
pub struct DismissedPrompt;

impl LinkPrompt for DismissedPrompt {
    fn request_url(&mut self) -> Option<String> {
        None
    }

    fn request_text(&mut self) -> Option<String> {
        None
    }
}

pub const DEFAULT_LINK_TEXT: &str = "Link";

const LINK_SCHEMES: &[&str] = &["http", "https", "mailto", "tel"];

/// Validates a user-entered link. Scheme-less input is treated as https.
pub fn normalize_link_url(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    let parsed = match Url::parse(trimmed) {
        Ok(url) => url,
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            Url::parse(&format!("https://{trimmed}")).ok()?
        }
        Err(_) => return None,
    };

    if !LINK_SCHEMES.contains(&parsed.scheme()) {
        return None;
    }
    if matches!(parsed.scheme(), "http" | "https") && parsed.host_str().is_none_or(str::is_empty) {
        return None;
    }
    Some(parsed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_command_names() {
        assert_eq!("bold".parse(), Ok(FormatCommand::Bold));
        assert_eq!(
            "insertUnorderedList".parse(),
            Ok(FormatCommand::InsertUnorderedList)
        );
        assert_eq!("createLink".parse(), Ok(FormatCommand::CreateLink));
        assert_eq!(
            "justifyLeft".parse::<FormatCommand>(),
            Err(CommandParseError("justifyLeft".to_string()))
        );
    }

    #[test]
    fn test_shortcuts() {
        assert_eq!(FormatCommand::from_shortcut('B'), Some(FormatCommand::Bold));
        assert_eq!(FormatCommand::from_shortcut('k'), Some(FormatCommand::CreateLink));
        assert_eq!(FormatCommand::from_shortcut('s'), None);
    }

    #[test]
    fn test_normalize_link_url() {
        assert_eq!(
            normalize_link_url("https://example.com/a"),
            Some("https://example.com/a".to_string())
        );
        assert_eq!(
            normalize_link_url(" example.com "),
            Some("https://example.com/".to_string())
        );
        assert_eq!(
            normalize_link_url("mailto:jane@example.com"),
            Some("mailto:jane@example.com".to_string())
        );
        assert_eq!(normalize_link_url("javascript:alert(1)"), None);
        assert_eq!(normalize_link_url(""), None);
        assert_eq!(normalize_link_url("http://"), None);
    }

    #[test]
    fn test_format_state_lookup() {
        let state = FormatState {
            bold: true,
            list: true,
            ..FormatState::default()
        };
        assert!(state.is_active(FormatCommand::Bold));
        assert!(state.is_active(FormatCommand::InsertUnorderedList));
        assert!(!state.is_active(FormatCommand::CreateLink));
    }
}
