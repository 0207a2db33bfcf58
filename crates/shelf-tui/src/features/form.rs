//! Single-line text fields shared by the form screens.

use std::borrow::Cow;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders};

use crate::overlays::render_utils::{InputLine, render_input_line};

/// Browser-style message for an empty required field.
pub const REQUIRED_FIELD: &str = "Please fill out this field.";

#[derive(Debug, Clone)]
pub struct TextField {
    pub label: &'static str,
    pub value: String,
    masked: bool,
}

impl TextField {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            value: String::new(),
            masked: false,
        }
    }

    /// Field whose content renders as bullets.
    pub fn masked(label: &'static str) -> Self {
        Self {
            masked: true,
            ..Self::new(label)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Applies an editing key. Returns false when the key is not an edit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Backspace => {
                self.value.pop();
                true
            }
            KeyCode::Char('u') if ctrl => {
                self.value.clear();
                true
            }
            KeyCode::Char(c) if !ctrl => {
                self.value.push(c);
                true
            }
            _ => false,
        }
    }

    /// Inserts pasted text; line breaks are dropped.
    pub fn paste(&mut self, text: &str) {
        self.value
            .extend(text.chars().filter(|c| *c != '\n' && *c != '\r'));
    }

    pub fn display(&self) -> Cow<'_, str> {
        if self.masked {
            Cow::Owned("•".repeat(self.value.chars().count()))
        } else {
            Cow::Borrowed(&self.value)
        }
    }

    /// Renders a bordered field titled with its label.
    pub fn render(&self, frame: &mut Frame, area: Rect, focused: bool) {
        let border = if focused { Color::Cyan } else { Color::DarkGray };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(format!(" {} ", self.label));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let display = self.display();
        render_input_line(
            frame,
            inner,
            &InputLine {
                value: &display,
                placeholder: None,
                prompt: "",
                prompt_color: Color::DarkGray,
                text_color: Color::White,
                placeholder_color: Color::DarkGray,
                cursor_color: if focused { Color::Cyan } else { Color::Reset },
            },
        );
    }
}

/// Tracks which of `len` fields has keyboard focus.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Focus {
    index: usize,
    len: usize,
}

impl Focus {
    pub fn new(len: usize) -> Self {
        Self { index: 0, len }
    }

    pub fn index(self) -> usize {
        self.index
    }

    pub fn set(&mut self, index: usize) {
        if index < self.len {
            self.index = index;
        }
    }

    pub fn next(&mut self) {
        if self.len > 0 {
            self.index = (self.index + 1) % self.len;
        }
    }

    pub fn prev(&mut self) {
        if self.len > 0 {
            self.index = (self.index + self.len - 1) % self.len;
        }
    }
}

/// Index of the first empty field, if any.
pub fn first_empty(fields: &[&TextField]) -> Option<usize> {
    fields.iter().position(|f| f.is_empty())
}
