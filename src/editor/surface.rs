use std::ops::Range;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::editor::command::{
    DEFAULT_LINK_TEXT, FormatCommand, FormatState, LinkPrompt, normalize_link_url,
};
use crate::editor::document::{Caret, Glyph, LineKind, Mark, Marks, RichDocument, Selection};
use crate::editor::keys::{ClipboardData, Key, KeyEvent, KeyOutcome};
use crate::richtext;
use crate::suggestions::{SuggestionKind, append_skills, to_markup};

pub const DEFAULT_CHARACTER_LIMIT: usize = 600;

/// Per-field options for an editable surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SurfaceConfig {
    pub placeholder: Option<String>,
    pub character_limit: usize,
    pub show_character_count: bool,
    pub show_formatting: bool,
    pub ai_suggestion_type: Option<SuggestionKind>,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            placeholder: None,
            character_limit: DEFAULT_CHARACTER_LIMIT,
            show_character_count: false,
            show_formatting: true,
            ai_suggestion_type: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusState {
    Unfocused,
    Editing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Backward,
    Forward,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterCount {
    pub count: usize,
    pub limit: usize,
    pub over_limit: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ToolbarButton {
    pub command: FormatCommand,
    pub label: &'static str,
    pub active: bool,
}

/// Editing state for one rich-text field.
///
/// While [`FocusState::Editing`] the document is the source of truth and every
/// mutation returns the new canonical value. While unfocused the surface
/// follows the field's value through [`hydrate`](Self::hydrate).
pub struct EditableSurface {
    config: SurfaceConfig,
    document: RichDocument,
    selection: Selection,
    pending: Option<Marks>,
    format_state: FormatState,
    focus: FocusState,
    value: String,
}

impl EditableSurface {
    pub fn new(value: &str, config: SurfaceConfig) -> Self {
        let mut surface = Self {
            config,
            document: RichDocument::new(),
            selection: Selection::default(),
            pending: None,
            format_state: FormatState::default(),
            focus: FocusState::Unfocused,
            value: String::new(),
        };
        surface.load(value);
        surface
    }

    /// Replaces the content with an external value. Ignored while editing.
    pub fn hydrate(&mut self, value: &str) {
        if self.focus == FocusState::Editing {
            debug!("ignoring external value while editing");
            return;
        }
        self.load(value);
    }

    fn load(&mut self, value: &str) {
        self.value = richtext::canonicalize(value);
        self.document = RichDocument::from_html(&self.value);
        self.selection = Selection::collapsed(self.document.end_caret());
        self.pending = None;
        self.refresh_format_state();
    }

    pub fn focus(&mut self) {
        if self.focus == FocusState::Editing {
            return;
        }
        self.focus = FocusState::Editing;
        if self.document.is_blank() {
            self.document = RichDocument::new();
            self.selection = Selection::default();
        }
        self.refresh_format_state();
    }

    /// Leaves editing and returns the value to store.
    pub fn blur(&mut self) -> String {
        if self.focus == FocusState::Editing {
            self.focus = FocusState::Unfocused;
            self.emit();
            debug!(
                empty = self.value.is_empty(),
                len = self.value.len(),
                "surface blurred"
            );
        }
        self.value.clone()
    }

    fn emit(&mut self) -> String {
        self.value = richtext::canonicalize(&self.document.to_html());
        self.value.clone()
    }

    fn commit(&mut self) -> Option<String> {
        self.refresh_format_state();
        Some(self.emit())
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn document(&self) -> &RichDocument {
        &self.document
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn focus_state(&self) -> FocusState {
        self.focus
    }

    pub fn format_state(&self) -> FormatState {
        self.format_state
    }

    pub fn config(&self) -> &SurfaceConfig {
        &self.config
    }

    /// The placeholder, when it is showing.
    pub fn placeholder(&self) -> Option<&str> {
        if self.focus == FocusState::Unfocused && self.value.is_empty() {
            self.config.placeholder.as_deref()
        } else {
            None
        }
    }

    pub fn character_count(&self) -> Option<CharacterCount> {
        if !self.config.show_character_count {
            return None;
        }
        let count = self.value.chars().count();
        Some(CharacterCount {
            count,
            limit: self.config.character_limit,
            over_limit: count > self.config.character_limit,
        })
    }

    pub fn toolbar(&self) -> Vec<ToolbarButton> {
        if !self.config.show_formatting {
            return Vec::new();
        }
        FormatCommand::TOOLBAR
            .into_iter()
            .map(|command| ToolbarButton {
                command,
                label: command.label(),
                active: self.format_state.is_active(command),
            })
            .collect()
    }

    pub fn select(&mut self, selection: Selection) {
        self.selection = Selection::new(
            self.document.clamp(selection.anchor),
            self.document.clamp(selection.focus),
        );
        self.pending = None;
        self.refresh_format_state();
    }

    /// Selects a char range of the document's plain text.
    pub fn select_chars(&mut self, range: Range<usize>) {
        let anchor = self.document.caret_at_char(range.start);
        let focus = self.document.caret_at_char(range.end);
        self.select(Selection::new(anchor, focus));
    }

    pub fn select_all(&mut self) {
        let end = self.document.end_caret();
        self.select(Selection::new(Caret::default(), end));
    }

    pub fn apply_format(
        &mut self,
        command: FormatCommand,
        prompt: &mut dyn LinkPrompt,
    ) -> Option<String> {
        self.focus();
        match command {
            FormatCommand::InsertUnorderedList => self.toggle_list(),
            FormatCommand::CreateLink => self.create_link(prompt)?,
            _ => {
                if let Some(mark) = command.mark() {
                    self.toggle_mark(mark);
                }
            }
        }
        self.commit()
    }

    fn toggle_mark(&mut self, mark: Mark) {
        if self.selection.is_collapsed() {
            let caret = self.selection.focus;
            let mut pending = self
                .pending
                .take()
                .unwrap_or_else(|| self.inherited_marks(caret));
            pending.set(mark, !pending.has(mark));
            self.pending = Some(pending);
            return;
        }

        let (start, end) = (self.selection.start(), self.selection.end());
        let glyphs = self.document.glyphs_between(start, end);
        let all_marked = !glyphs.is_empty() && glyphs.iter().all(|glyph| glyph.marks.has(mark));
        self.document
            .update_marks(start, end, |marks| marks.set(mark, !all_marked));
    }

    fn toggle_list(&mut self) {
        let (first, last) = (self.selection.start().line, self.selection.end().line);
        let all_bullets =
            (first..=last).all(|line| self.document.line(line).kind == LineKind::Bullet);
        let kind = if all_bullets {
            LineKind::Bare
        } else {
            LineKind::Bullet
        };
        for line in first..=last {
            self.document.set_kind(line, kind);
        }
    }

    fn create_link(&mut self, prompt: &mut dyn LinkPrompt) -> Option<()> {
        let input = prompt.request_url()?;
        let Some(href) = normalize_link_url(&input) else {
            debug!(input = %input, "rejected link url");
            return None;
        };

        if self.selection.is_collapsed() {
            let text = prompt
                .request_text()
                .filter(|text| !text.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_LINK_TEXT.to_string());
            let caret = self.selection.focus;
            let marks = Marks {
                link: Some(href),
                ..self.pending.take().unwrap_or_else(|| self.inherited_marks(caret))
            };
            let glyphs = text.chars().map(|ch| Glyph::new(ch, marks.clone())).collect();
            let caret = self.document.insert_glyphs(caret, glyphs);
            self.selection = Selection::collapsed(caret);
        } else {
            let (start, end) = (self.selection.start(), self.selection.end());
            self.document
                .update_marks(start, end, |marks| marks.link = Some(href.clone()));
        }
        Some(())
    }

    /// Types text at the caret, replacing the selection.
    pub fn insert_text(&mut self, text: &str) -> Option<String> {
        if self.focus != FocusState::Editing {
            return None;
        }
        self.insert_plain(text);
        self.commit()
    }

    fn insert_plain(&mut self, text: &str) {
        let mut caret = self.delete_selection();
        let marks = self
            .pending
            .take()
            .unwrap_or_else(|| self.inherited_marks(caret));

        for (index, segment) in text.split('\n').enumerate() {
            if index > 0 {
                let kind = self.document.line(caret.line).kind.continuation();
                caret = self.document.split_line(caret, kind);
            }
            let glyphs = segment
                .chars()
                .filter(|ch| *ch != '\r')
                .map(|ch| Glyph::new(ch, marks.clone()))
                .collect();
            caret = self.document.insert_glyphs(caret, glyphs);
        }
        self.selection = Selection::collapsed(caret);
    }

    /// Shift+Enter: a line break inside the current line.
    pub fn insert_line_break(&mut self) -> Option<String> {
        if self.focus != FocusState::Editing {
            return None;
        }
        let caret = self.delete_selection();
        let line = self.document.line(caret.line);
        let caret = if line.kind == LineKind::Bare {
            self.document.split_line(caret, LineKind::Bare)
        } else {
            let marks = self.inherited_marks(caret);
            self.document
                .insert_glyphs(caret, vec![Glyph::new('\n', marks)])
        };
        self.selection = Selection::collapsed(caret);
        self.commit()
    }

    pub fn press_enter(&mut self) -> Option<String> {
        if self.focus != FocusState::Editing {
            return None;
        }
        let caret = self.delete_selection();
        let line = self.document.line(caret.line);

        let caret = if line.kind.is_list() && line.is_blank() {
            // an empty item ends the list
            self.document.clear_line(caret.line);
            self.document.set_kind(caret.line, LineKind::Paragraph);
            Caret::new(caret.line, 0)
        } else {
            let kind = line.kind.continuation();
            self.document.split_line(caret, kind)
        };
        self.selection = Selection::collapsed(caret);
        self.commit()
    }

    pub fn backspace(&mut self) -> Option<String> {
        if self.focus != FocusState::Editing {
            return None;
        }
        if !self.selection.is_collapsed() {
            self.delete_selection();
            return self.commit();
        }

        let caret = self.selection.focus;
        let kind = self.document.line(caret.line).kind;
        let caret = if caret.offset > 0 {
            self.document
                .delete(Caret::new(caret.line, caret.offset - 1), caret)
        } else if kind.is_list() {
            self.document.set_kind(caret.line, LineKind::Paragraph);
            caret
        } else {
            self.document.merge_with_previous(caret.line).unwrap_or(caret)
        };
        self.selection = Selection::collapsed(caret);
        self.commit()
    }

    pub fn delete_forward(&mut self) -> Option<String> {
        if self.focus != FocusState::Editing {
            return None;
        }
        if !self.selection.is_collapsed() {
            self.delete_selection();
            return self.commit();
        }

        let caret = self.selection.focus;
        if let Some(next) = self.document.caret_after(caret) {
            if next.line == caret.line {
                self.document.delete(caret, next);
            } else {
                self.document.merge_with_previous(next.line);
            }
        }
        self.selection = Selection::collapsed(caret);
        self.commit()
    }

    pub fn move_caret(&mut self, direction: Direction, extend: bool) {
        let focus = self.selection.focus;
        let target = if !extend && !self.selection.is_collapsed() {
            match direction {
                Direction::Backward => self.selection.start(),
                Direction::Forward => self.selection.end(),
            }
        } else {
            let moved = match direction {
                Direction::Backward => self.document.caret_before(focus),
                Direction::Forward => self.document.caret_after(focus),
            };
            moved.unwrap_or(focus)
        };

        let anchor = if extend { self.selection.anchor } else { target };
        self.select(Selection::new(anchor, target));
    }

    pub fn handle_key(&mut self, event: &KeyEvent, prompt: &mut dyn LinkPrompt) -> KeyOutcome {
        if self.focus != FocusState::Editing {
            return KeyOutcome::ignored();
        }

        if event.ctrl || event.meta {
            if let Key::Char(ch) = event.key
                && event.is_shortcut()
                && let Some(command) = FormatCommand::from_shortcut(ch)
            {
                return KeyOutcome::handled(self.apply_format(command, prompt));
            }
            return KeyOutcome::ignored();
        }

        match event.key {
            Key::Enter if event.shift => KeyOutcome::handled(self.insert_line_break()),
            Key::Enter => KeyOutcome::handled(self.press_enter()),
            Key::Backspace => KeyOutcome::handled(self.backspace()),
            Key::Delete => KeyOutcome::handled(self.delete_forward()),
            Key::ArrowLeft => {
                self.move_caret(Direction::Backward, event.shift);
                KeyOutcome::handled(None)
            }
            Key::ArrowRight => {
                self.move_caret(Direction::Forward, event.shift);
                KeyOutcome::handled(None)
            }
            Key::Char(ch) if !ch.is_control() => {
                KeyOutcome::handled(self.insert_text(&ch.to_string()))
            }
            _ => KeyOutcome::ignored(),
        }
    }

    /// Inserts the clipboard's plain text; its HTML flavour is never used.
    pub fn paste(&mut self, clipboard: &ClipboardData) -> Option<String> {
        if clipboard.html.is_some() {
            debug!("discarding html clipboard flavour");
        }
        self.insert_text(&clipboard.plain_text)
    }

    /// Inserts a suggestion at the caret.
    pub fn insert_suggestion(&mut self, text: &str, kind: SuggestionKind) -> Option<String> {
        if text.trim().is_empty() {
            return None;
        }
        self.focus();

        if kind == SuggestionKind::Skills {
            let existing = self.document.plain_text();
            let joined = append_skills(existing.trim(), text);
            self.document = RichDocument::from_plain_text(&joined);
            self.selection = Selection::collapsed(self.document.end_caret());
            self.pending = None;
            return self.commit();
        }

        let markup = to_markup(text);
        let mut lines = RichDocument::from_html(&markup).into_lines();
        let caret = self.delete_selection();

        let caret = if lines.len() == 1 && lines[0].kind == LineKind::Bare {
            let glyphs = lines.remove(0).glyphs;
            self.document.insert_glyphs(caret, glyphs)
        } else {
            self.document.splice_lines(caret, lines)
        };
        self.selection = Selection::collapsed(caret);
        self.pending = None;
        self.commit()
    }

    fn delete_selection(&mut self) -> Caret {
        let caret = self
            .document
            .delete(self.selection.start(), self.selection.end());
        self.selection = Selection::collapsed(caret);
        caret
    }

    /// Marks new text picks up from its neighbour. A link only continues when
    /// the caret sits inside it.
    fn inherited_marks(&self, caret: Caret) -> Marks {
        let line = self.document.line(caret.line);
        let before = caret
            .offset
            .checked_sub(1)
            .and_then(|index| line.glyphs.get(index));
        let after = line.glyphs.get(caret.offset);

        let Some(neighbour) = before.or(after) else {
            return Marks::default();
        };
        let mut marks = neighbour.marks.clone();
        let inside_link =
            before.is_some() && after.is_some_and(|glyph| glyph.marks.link == marks.link);
        if !inside_link {
            marks.link = None;
        }
        marks
    }

    fn refresh_format_state(&mut self) {
        let (start, end) = (self.selection.start(), self.selection.end());
        let list = (start.line..=end.line)
            .all(|line| self.document.line(line).kind == LineKind::Bullet);

        self.format_state = if self.selection.is_collapsed() {
            let marks = self
                .pending
                .clone()
                .unwrap_or_else(|| self.inherited_marks(start));
            FormatState {
                bold: marks.bold,
                italic: marks.italic,
                underline: marks.underline,
                strikethrough: marks.strikethrough,
                list,
                link: marks.link.is_some(),
            }
        } else {
            let glyphs = self.document.glyphs_between(start, end);
            let all = |test: fn(&Marks) -> bool| {
                !glyphs.is_empty() && glyphs.iter().all(|glyph| test(&glyph.marks))
            };
            FormatState {
                bold: all(|marks| marks.bold),
                italic: all(|marks| marks.italic),
                underline: all(|marks| marks.underline),
                strikethrough: all(|marks| marks.strikethrough),
                list,
                link: all(|marks| marks.link.is_some()),
            }
        };
    }
}
