//! Edit-tags modal.
//!
//! The field is prefilled with the current tag names. Saving sends the whole
//! list; the modal closes only once the backend accepted it.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use shelf_core::api::{ArticleId, SavedArticle};
use shelf_core::messages;
use shelf_core::tags::{format_tag_input, parse_tag_input};

use super::OverlayUpdate;
use crate::effects::UiEffect;
use crate::features::notice::Severity;
use crate::mutations::StateMutation;

#[derive(Debug, Clone)]
pub struct EditTagsState {
    pub article_id: ArticleId,
    pub title: String,
    pub input: String,
    /// A save is in flight.
    pub saving: bool,
}

impl EditTagsState {
    pub fn open(article: &SavedArticle) -> Self {
        Self {
            article_id: article.id.clone(),
            title: article.title.clone(),
            input: format_tag_input(&article.tag_names()),
            saving: false,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> OverlayUpdate {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Esc | KeyCode::Char('c') if key.code == KeyCode::Esc || ctrl => {
                OverlayUpdate::close()
            }
            KeyCode::Enter => {
                if self.saving {
                    return OverlayUpdate::stay();
                }
                self.saving = true;
                OverlayUpdate::stay()
                    .with_ui_effects(vec![UiEffect::ReplaceTags {
                        id: self.article_id.clone(),
                        names: parse_tag_input(&self.input),
                    }])
                    .with_mutations(vec![StateMutation::Notify {
                        severity: Severity::Info,
                        text: messages::SAVING_TAGS.to_string(),
                    }])
            }
            KeyCode::Backspace => {
                self.input.pop();
                OverlayUpdate::stay()
            }
            KeyCode::Char('u') if ctrl => {
                self.input.clear();
                OverlayUpdate::stay()
            }
            KeyCode::Char(c) if !ctrl => {
                self.input.push(c);
                OverlayUpdate::stay()
            }
            _ => OverlayUpdate::stay(),
        }
    }

    pub fn handle_paste(&mut self, text: &str) {
        self.input
            .extend(text.chars().filter(|c| *c != '\n' && *c != '\r'));
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        use super::render_utils::{
            InputHint, InputLine, OverlayConfig, render_input_line, render_overlay,
            render_separator,
        };

        let hints = [
            InputHint::new("Enter", "save"),
            InputHint::new("Esc", "cancel"),
        ];
        let layout = render_overlay(
            frame,
            area,
            &OverlayConfig {
                title: "Edit Tags",
                border_color: Color::Yellow,
                width: 64,
                height: 8,
                hints: &hints,
            },
        );

        let body = layout.body;
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                crate::common::truncate_with_ellipsis(&self.title, body.width as usize),
                Style::default().fg(Color::White),
            ))),
            Rect::new(body.x, body.y, body.width, 1),
        );

        render_input_line(
            frame,
            Rect::new(body.x, body.y + 1, body.width, 1),
            &InputLine {
                value: &self.input,
                placeholder: Some("No tags"),
                prompt: "> ",
                prompt_color: Color::DarkGray,
                text_color: Color::Yellow,
                placeholder_color: Color::DarkGray,
                cursor_color: Color::Yellow,
            },
        );

        render_separator(frame, body, 2);

        let help = if self.saving {
            Span::styled(messages::SAVING_TAGS, Style::default().fg(Color::Yellow))
        } else {
            Span::styled(
                "Comma-separated, e.g. science, history",
                Style::default().fg(Color::DarkGray),
            )
        };
        frame.render_widget(
            Paragraph::new(Line::from(help)),
            Rect::new(body.x, body.y + 3, body.width, 1),
        );
    }
}

#[cfg(test)]
mod tests {
    use shelf_core::api::Tag;

    use super::*;
    use crate::overlays::OverlayTransition;

    fn article() -> SavedArticle {
        SavedArticle {
            id: ArticleId::from(9),
            title: "Rust".to_string(),
            url: "https://en.wikipedia.org/wiki/Rust".to_string(),
            tags: vec![
                Tag {
                    id: ArticleId::from(1),
                    name: "lang".to_string(),
                },
                Tag {
                    id: ArticleId::from(2),
                    name: "systems".to_string(),
                },
            ],
        }
    }

    #[test]
    fn test_prefill_joins_with_comma_space() {
        let state = EditTagsState::open(&article());
        assert_eq!(state.input, "lang, systems");
    }

    #[test]
    fn test_enter_sends_parsed_names_and_stays_open() {
        let mut state = EditTagsState::open(&article());
        state.input = "a, b ,,c".to_string();

        let update = state.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
        assert_eq!(update.transition, OverlayTransition::Stay);
        assert_eq!(
            update.effects,
            vec![UiEffect::ReplaceTags {
                id: ArticleId::from(9),
                names: vec!["a".to_string(), "b".to_string(), "c".to_string()]
            }]
        );
        assert!(matches!(
            update.mutations.as_slice(),
            [StateMutation::Notify { severity: Severity::Info, .. }]
        ));
        assert!(state.saving);

        let again = state.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
        assert!(again.effects.is_empty());
    }

    #[test]
    fn test_escape_cancels() {
        let mut state = EditTagsState::open(&article());
        let update = state.handle_key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE));
        assert_eq!(update.transition, OverlayTransition::Close);
        assert!(update.effects.is_empty());
    }
}
