//! The editable surface behind each rich-text field.

pub mod command;
pub mod document;
pub mod keys;
pub mod surface;

pub use command::{CommandParseError, FormatCommand, FormatState, LinkPrompt};
pub use document::{Caret, Line, LineKind, Marks, RichDocument, Selection};
pub use keys::{ClipboardData, Key, KeyEvent, KeyOutcome};
pub use surface::{CharacterCount, EditableSurface, FocusState, SurfaceConfig, ToolbarButton};
