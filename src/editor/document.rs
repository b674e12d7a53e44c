//! The editable document model.
//!
//! A [`RichDocument`] is an ordered list of [`Line`]s. Each line has a block
//! kind (bare text, paragraph, heading, list item, ...) and a sequence of
//! [`Glyph`]s: characters carrying their inline [`Marks`]. Consecutive list
//! lines of the same kind serialize into one `ul`/`ol`, and a `'\n'` glyph is a
//! `<br>` inside its line. Every edit is a transform over this model, so the
//! markup it serializes to is always well formed.

use kuchiki::NodeRef;
use serde::Serialize;

use crate::richtext::{self, dom, escape_attribute, escape_text};

/// Inline formatting toggled by the format commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mark {
    Bold,
    Italic,
    Underline,
    Strikethrough,
}

/// Inline formatting carried by a glyph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Marks {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strikethrough: bool,
    pub link: Option<String>,
}

impl Marks {
    pub fn has(&self, mark: Mark) -> bool {
        match mark {
            Mark::Bold => self.bold,
            Mark::Italic => self.italic,
            Mark::Underline => self.underline,
            Mark::Strikethrough => self.strikethrough,
        }
    }

    pub fn set(&mut self, mark: Mark, on: bool) {
        match mark {
            Mark::Bold => self.bold = on,
            Mark::Italic => self.italic = on,
            Mark::Underline => self.underline = on,
            Mark::Strikethrough => self.strikethrough = on,
        }
    }

    fn with(mut self, mark: Mark) -> Self {
        self.set(mark, true);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Glyph {
    pub ch: char,
    pub marks: Marks,
}

impl Glyph {
    pub fn new(ch: char, marks: Marks) -> Self {
        Self { ch, marks }
    }

    fn is_break(&self) -> bool {
        self.ch == '\n'
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Top-level text outside any block element.
    Bare,
    Paragraph,
    Div,
    Heading(u8),
    Blockquote,
    Pre,
    Bullet,
    Numbered,
}

impl LineKind {
    pub fn is_list(self) -> bool {
        matches!(self, LineKind::Bullet | LineKind::Numbered)
    }

    /// Kind of the line created when this one is split.
    pub fn continuation(self) -> LineKind {
        match self {
            LineKind::Heading(_) => LineKind::Paragraph,
            other => other,
        }
    }

    fn block_tag(self) -> &'static str {
        match self {
            LineKind::Paragraph => "p",
            LineKind::Div => "div",
            LineKind::Heading(1) => "h1",
            LineKind::Heading(2) => "h2",
            LineKind::Heading(3) => "h3",
            LineKind::Heading(4) => "h4",
            LineKind::Heading(5) => "h5",
            LineKind::Heading(_) => "h6",
            LineKind::Blockquote => "blockquote",
            LineKind::Pre => "pre",
            LineKind::Bullet | LineKind::Numbered => "li",
            LineKind::Bare => "",
        }
    }

    fn from_block_tag(tag: &str) -> Option<LineKind> {
        let kind = match tag {
            "p" => LineKind::Paragraph,
            "div" => LineKind::Div,
            "h1" => LineKind::Heading(1),
            "h2" => LineKind::Heading(2),
            "h3" => LineKind::Heading(3),
            "h4" => LineKind::Heading(4),
            "h5" => LineKind::Heading(5),
            "h6" => LineKind::Heading(6),
            "blockquote" => LineKind::Blockquote,
            "pre" => LineKind::Pre,
            _ => return None,
        };
        Some(kind)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub kind: LineKind,
    pub glyphs: Vec<Glyph>,
}

impl Line {
    pub fn new(kind: LineKind) -> Self {
        Self {
            kind,
            glyphs: Vec::new(),
        }
    }

    pub fn with_text(kind: LineKind, text: &str, marks: &Marks) -> Self {
        Self {
            kind,
            glyphs: text.chars().map(|ch| Glyph::new(ch, marks.clone())).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// True when the line holds nothing but whitespace (including nbsp).
    pub fn is_blank(&self) -> bool {
        self.glyphs.iter().all(|glyph| glyph.ch.is_whitespace())
    }

    pub fn text(&self) -> String {
        self.glyphs.iter().map(|glyph| glyph.ch).collect()
    }
}

/// A position between two glyphs: `offset` counts chars within `line`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Caret {
    pub line: usize,
    pub offset: usize,
}

impl Caret {
    pub fn new(line: usize, offset: usize) -> Self {
        Self { line, offset }
    }
}

/// A selection; `anchor` may come after `focus` when selecting backwards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    pub anchor: Caret,
    pub focus: Caret,
}

impl Selection {
    pub fn new(anchor: Caret, focus: Caret) -> Self {
        Self { anchor, focus }
    }

    pub fn collapsed(at: Caret) -> Self {
        Self::new(at, at)
    }

    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.focus
    }

    pub fn start(&self) -> Caret {
        self.anchor.min(self.focus)
    }

    pub fn end(&self) -> Caret {
        self.anchor.max(self.focus)
    }
}

/// Editable rich text as lines of styled glyphs.
///
/// The model is lossy for parts of the allowed dialect: inline elements
/// without a [`Mark`] (`span`, `code`, `mark`) keep their text but not the
/// element, nested lists flatten to one level, and blocks inside a list item
/// become line breaks within that item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RichDocument {
    lines: Vec<Line>,
}

impl Default for RichDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl RichDocument {
    /// An empty document: a single empty bare line.
    pub fn new() -> Self {
        Self {
            lines: vec![Line::new(LineKind::Bare)],
        }
    }

    pub fn from_lines(lines: Vec<Line>) -> Self {
        if lines.is_empty() {
            Self::new()
        } else {
            Self { lines }
        }
    }

    pub fn from_plain_text(text: &str) -> Self {
        Self::from_lines(
            text.lines()
                .map(|line| Line::with_text(LineKind::Bare, line, &Marks::default()))
                .collect(),
        )
    }

    /// Builds the model from markup, after canonicalizing it.
    pub fn from_html(html: &str) -> Self {
        let canonical = richtext::canonicalize(html);
        if canonical.is_empty() {
            return Self::new();
        }

        let fragment = dom::parse_fragment(&canonical);
        let mut builder = LineBuilder::default();
        builder.walk(&fragment, LineKind::Bare, &Marks::default());
        Self::from_lines(builder.finish())
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn line(&self, index: usize) -> &Line {
        &self.lines[index.min(self.lines.len() - 1)]
    }

    pub fn into_lines(self) -> Vec<Line> {
        self.lines
    }

    pub fn is_blank(&self) -> bool {
        self.lines.iter().all(Line::is_blank)
    }

    /// Text of every line joined by `'\n'`.
    pub fn plain_text(&self) -> String {
        self.lines
            .iter()
            .map(Line::text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn end_caret(&self) -> Caret {
        let line = self.lines.len() - 1;
        Caret::new(line, self.lines[line].len())
    }

    pub fn clamp(&self, caret: Caret) -> Caret {
        let line = caret.line.min(self.lines.len() - 1);
        Caret::new(line, caret.offset.min(self.lines[line].len()))
    }

    /// Maps a char index into [`plain_text`](Self::plain_text) to a caret.
    pub fn caret_at_char(&self, index: usize) -> Caret {
        let mut remaining = index;
        for (line, content) in self.lines.iter().enumerate() {
            if remaining <= content.len() {
                return Caret::new(line, remaining);
            }
            // one extra char for the separator between lines
            remaining -= content.len() + 1;
        }
        self.end_caret()
    }

    pub fn caret_before(&self, caret: Caret) -> Option<Caret> {
        if caret.offset > 0 {
            Some(Caret::new(caret.line, caret.offset - 1))
        } else if caret.line > 0 {
            Some(Caret::new(caret.line - 1, self.lines[caret.line - 1].len()))
        } else {
            None
        }
    }

    pub fn caret_after(&self, caret: Caret) -> Option<Caret> {
        if caret.offset < self.lines[caret.line].len() {
            Some(Caret::new(caret.line, caret.offset + 1))
        } else if caret.line + 1 < self.lines.len() {
            Some(Caret::new(caret.line + 1, 0))
        } else {
            None
        }
    }

    /// Glyphs between two carets, in order.
    pub fn glyphs_between(&self, start: Caret, end: Caret) -> Vec<&Glyph> {
        let mut glyphs = Vec::new();
        for line in start.line..=end.line.min(self.lines.len() - 1) {
            let content = &self.lines[line].glyphs;
            let from = if line == start.line { start.offset } else { 0 };
            let to = if line == end.line {
                end.offset.min(content.len())
            } else {
                content.len()
            };
            if from < to {
                glyphs.extend(&content[from..to]);
            }
        }
        glyphs
    }

    pub fn update_marks(&mut self, start: Caret, end: Caret, update: impl Fn(&mut Marks)) {
        for line in start.line..=end.line.min(self.lines.len() - 1) {
            let content = &mut self.lines[line].glyphs;
            let from = if line == start.line { start.offset } else { 0 };
            let to = if line == end.line {
                end.offset.min(content.len())
            } else {
                content.len()
            };
            for glyph in content.iter_mut().take(to).skip(from) {
                update(&mut glyph.marks);
            }
        }
    }

    pub fn set_kind(&mut self, line: usize, kind: LineKind) {
        if let Some(content) = self.lines.get_mut(line) {
            content.kind = kind;
        }
    }

    pub fn clear_line(&mut self, line: usize) {
        if let Some(content) = self.lines.get_mut(line) {
            content.glyphs.clear();
        }
    }

    /// Removes everything between the carets and returns the collapsed caret.
    pub fn delete(&mut self, start: Caret, end: Caret) -> Caret {
        let start = self.clamp(start);
        let end = self.clamp(end);
        if start >= end {
            return start;
        }

        if start.line == end.line {
            self.lines[start.line]
                .glyphs
                .drain(start.offset..end.offset);
        } else {
            let tail = self.lines[end.line].glyphs.split_off(end.offset);
            self.lines[start.line].glyphs.truncate(start.offset);
            self.lines[start.line].glyphs.extend(tail);
            self.lines.drain(start.line + 1..=end.line);
        }
        start
    }

    /// Inserts glyphs inside a line and returns the caret after them.
    pub fn insert_glyphs(&mut self, at: Caret, glyphs: Vec<Glyph>) -> Caret {
        let at = self.clamp(at);
        let count = glyphs.len();
        let content = &mut self.lines[at.line].glyphs;
        content.splice(at.offset..at.offset, glyphs);
        Caret::new(at.line, at.offset + count)
    }

    /// Splits the line at `at`; the tail moves to a new line of `kind`.
    pub fn split_line(&mut self, at: Caret, kind: LineKind) -> Caret {
        let at = self.clamp(at);
        let tail = self.lines[at.line].glyphs.split_off(at.offset);
        self.lines.insert(at.line + 1, Line { kind, glyphs: tail });
        Caret::new(at.line + 1, 0)
    }

    /// Appends `line` to the line before it; returns the caret at the seam.
    pub fn merge_with_previous(&mut self, line: usize) -> Option<Caret> {
        if line == 0 || line >= self.lines.len() {
            return None;
        }
        let removed = self.lines.remove(line);
        let previous = &mut self.lines[line - 1];
        let seam = Caret::new(line - 1, previous.len());
        previous.glyphs.extend(removed.glyphs);
        Some(seam)
    }

    /// Splices whole lines in at the caret, splitting the current line around
    /// them. Empty halves of the split line are dropped.
    pub fn splice_lines(&mut self, at: Caret, lines: Vec<Line>) -> Caret {
        let at = self.clamp(at);
        let Some(last_len) = lines.last().map(Line::len) else {
            return at;
        };
        let count = lines.len();

        let current_kind = self.lines[at.line].kind;
        let tail = self.lines[at.line].glyphs.split_off(at.offset);

        let mut insert_at = at.line + 1;
        if self.lines[at.line].is_empty() {
            self.lines.remove(at.line);
            insert_at = at.line;
        }
        self.lines.splice(insert_at..insert_at, lines);

        let last = insert_at + count - 1;
        if !tail.is_empty() {
            self.lines.insert(
                last + 1,
                Line {
                    kind: current_kind,
                    glyphs: tail,
                },
            );
        }
        Caret::new(last, last_len)
    }

    /// Serializes the model into (not yet canonical) markup.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        let mut index = 0;

        while index < self.lines.len() {
            let kind = self.lines[index].kind;
            match kind {
                LineKind::Bullet | LineKind::Numbered => {
                    let tag = if kind == LineKind::Bullet { "ul" } else { "ol" };
                    out.push_str(&format!("<{tag}>"));
                    while index < self.lines.len() && self.lines[index].kind == kind {
                        write_block(&mut out, &self.lines[index]);
                        index += 1;
                    }
                    out.push_str(&format!("</{tag}>"));
                }
                LineKind::Bare => {
                    let mut first = true;
                    while index < self.lines.len() && self.lines[index].kind == LineKind::Bare {
                        if !first {
                            out.push_str("<br>");
                        }
                        write_inline(&mut out, &self.lines[index].glyphs, false);
                        first = false;
                        index += 1;
                    }
                }
                _ => {
                    write_block(&mut out, &self.lines[index]);
                    index += 1;
                }
            }
        }
        out
    }
}

fn write_block(out: &mut String, line: &Line) {
    let tag = line.kind.block_tag();
    out.push_str(&format!("<{tag}>"));
    if line.is_empty() {
        out.push_str("<br>");
    } else {
        let preformatted = line.kind == LineKind::Pre;
        write_inline(out, &line.glyphs, preformatted);
        // a single trailing <br> collapses when rendered, so keep it visible
        if !preformatted && line.glyphs.last().is_some_and(Glyph::is_break) {
            out.push_str("<br>");
        }
    }
    out.push_str(&format!("</{tag}>"));
}

fn write_inline(out: &mut String, glyphs: &[Glyph], preformatted: bool) {
    let runs = group_runs(glyphs);
    let mut index = 0;

    while index < runs.len() {
        let link = runs[index].0.link.clone();
        if let Some(href) = &link {
            out.push_str(&format!(
                r#"<a href="{}" target="{}" rel="{}">"#,
                escape_attribute(href),
                crate::richtext::sanitizer::LINK_TARGET,
                crate::richtext::sanitizer::LINK_REL,
            ));
        }
        while index < runs.len() && runs[index].0.link == link {
            let (marks, text) = &runs[index];
            write_run(out, marks, text, preformatted);
            index += 1;
        }
        if link.is_some() {
            out.push_str("</a>");
        }
    }
}

fn write_run(out: &mut String, marks: &Marks, text: &str, preformatted: bool) {
    let tags: Vec<&str> = [
        (marks.bold, "b"),
        (marks.italic, "i"),
        (marks.underline, "u"),
        (marks.strikethrough, "s"),
    ]
    .into_iter()
    .filter_map(|(on, tag)| on.then_some(tag))
    .collect();

    for tag in &tags {
        out.push_str(&format!("<{tag}>"));
    }
    if preformatted {
        out.push_str(&escape_text(text));
    } else {
        out.push_str(&escape_text(text).replace('\n', "<br>"));
    }
    for tag in tags.iter().rev() {
        out.push_str(&format!("</{tag}>"));
    }
}

fn group_runs(glyphs: &[Glyph]) -> Vec<(Marks, String)> {
    let mut runs: Vec<(Marks, String)> = Vec::new();
    for glyph in glyphs {
        match runs.last_mut() {
            Some((marks, text)) if *marks == glyph.marks => text.push(glyph.ch),
            _ => runs.push((glyph.marks.clone(), glyph.ch.to_string())),
        }
    }
    runs
}

/// Flattens a parsed fragment into lines.
#[derive(Default)]
struct LineBuilder {
    lines: Vec<Line>,
    open: Option<Line>,
    /// Set after a block nested in a list item; the next text starts a new
    /// visual line inside the same item.
    item_break: bool,
}

impl LineBuilder {
    fn walk(&mut self, parent: &NodeRef, kind: LineKind, marks: &Marks) {
        for child in parent.children() {
            if let Some(text) = child.as_text() {
                self.push_text(&text.borrow(), kind, marks);
                continue;
            }
            let Some(element) = child.as_element() else {
                continue;
            };
            let name = element.name.local.to_string();

            if let Some(block) = LineKind::from_block_tag(&name) {
                if kind.is_list() {
                    self.item_break = true;
                    self.walk(&child, kind, marks);
                    self.item_break = true;
                    continue;
                }
                self.close();
                self.open = Some(Line::new(block));
                self.walk(&child, block, marks);
                self.close();
                continue;
            }

            match name.as_str() {
                "br" => self.line_break(kind, marks),
                "ul" | "ol" => {
                    self.close();
                    let item_kind = if name == "ul" {
                        LineKind::Bullet
                    } else {
                        LineKind::Numbered
                    };
                    self.walk_list(&child, item_kind, marks);
                }
                "li" => {
                    self.close();
                    self.open = Some(Line::new(LineKind::Bullet));
                    self.walk(&child, LineKind::Bullet, marks);
                    self.close();
                }
                _ => {
                    let inner = inline_marks(&name, &child, marks);
                    self.walk(&child, kind, &inner);
                }
            }
        }
    }

    fn walk_list(&mut self, list: &NodeRef, item_kind: LineKind, marks: &Marks) {
        for item in list.children() {
            if item.as_element().is_none() {
                continue;
            }
            self.close();
            self.open = Some(Line::new(item_kind));
            self.walk(&item, item_kind, marks);
            self.close();
        }
    }

    fn push_text(&mut self, text: &str, kind: LineKind, marks: &Marks) {
        if (self.open.is_none() || self.item_break) && text.trim().is_empty() {
            return;
        }
        self.take_item_break();
        let open = self.open.get_or_insert_with(|| Line::new(kind));
        for ch in text.chars() {
            let ch = match ch {
                '\r' => continue,
                '\n' if open.kind != LineKind::Pre => ' ',
                other => other,
            };
            open.glyphs.push(Glyph::new(ch, marks.clone()));
        }
    }

    fn line_break(&mut self, kind: LineKind, marks: &Marks) {
        if kind == LineKind::Bare {
            match self.open.take() {
                Some(line) => self.lines.push(line),
                None => self.lines.push(Line::new(LineKind::Bare)),
            }
            return;
        }
        self.open
            .get_or_insert_with(|| Line::new(kind))
            .glyphs
            .push(Glyph::new('\n', marks.clone()));
    }

    fn take_item_break(&mut self) {
        if !std::mem::take(&mut self.item_break) {
            return;
        }
        if let Some(open) = self.open.as_mut()
            && open.glyphs.last().is_some_and(|glyph| !glyph.is_break())
        {
            open.glyphs.push(Glyph::new('\n', Marks::default()));
        }
    }

    fn close(&mut self) {
        self.item_break = false;
        if let Some(mut line) = self.open.take() {
            if line.kind != LineKind::Bare && line.glyphs.last().is_some_and(Glyph::is_break) {
                line.glyphs.pop();
            }
            self.lines.push(line);
        }
    }

    fn finish(mut self) -> Vec<Line> {
        self.close();
        self.lines
    }
}

fn inline_marks(name: &str, node: &NodeRef, marks: &Marks) -> Marks {
    let marks = marks.clone();
    match name {
        "b" | "strong" => marks.with(Mark::Bold),
        "i" | "em" => marks.with(Mark::Italic),
        "u" => marks.with(Mark::Underline),
        "s" | "strike" | "del" => marks.with(Mark::Strikethrough),
        "a" => {
            let href = node
                .as_element()
                .and_then(|element| element.attributes.borrow().get("href").map(str::to_string));
            match href {
                Some(href) => Marks {
                    link: Some(href),
                    ..marks
                },
                None => marks,
            }
        }
        _ => marks,
    }
}
