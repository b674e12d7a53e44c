use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    Char(char),
    Enter,
    Backspace,
    Delete,
    ArrowLeft,
    ArrowRight,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    pub key: Key,
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
}

impl KeyEvent {
    pub fn plain(key: Key) -> Self {
        Self {
            key,
            ctrl: false,
            meta: false,
            shift: false,
        }
    }

    pub fn ctrl(ch: char) -> Self {
        Self {
            ctrl: true,
            ..Self::plain(Key::Char(ch))
        }
    }

    pub fn meta(ch: char) -> Self {
        Self {
            meta: true,
            ..Self::plain(Key::Char(ch))
        }
    }

    pub fn with_shift(self) -> Self {
        Self {
            shift: true,
            ..self
        }
    }

    /// Ctrl or Cmd held, without Shift.
    pub fn is_shortcut(&self) -> bool {
        (self.ctrl || self.meta) && !self.shift
    }
}

/// Result of dispatching a key to the surface.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyOutcome {
    /// The host should suppress its own handling of the key.
    pub default_prevented: bool,
    /// Canonical value emitted by the edit, if any.
    pub value: Option<String>,
}

impl KeyOutcome {
    pub fn ignored() -> Self {
        Self::default()
    }

    pub fn handled(value: Option<String>) -> Self {
        Self {
            default_prevented: true,
            value,
        }
    }
}

/// Clipboard contents offered by a paste.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ClipboardData {
    pub plain_text: String,
    pub html: Option<String>,
}

impl ClipboardData {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            plain_text: text.into(),
            html: None,
        }
    }
}
