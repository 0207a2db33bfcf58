//! Delete confirmation modal.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};
use shelf_core::api::{ArticleId, SavedArticle};
use shelf_core::messages;

use super::OverlayUpdate;
use crate::effects::UiEffect;
use crate::features::notice::Severity;
use crate::mutations::StateMutation;

#[derive(Debug, Clone)]
pub struct ConfirmDeleteState {
    pub article_id: ArticleId,
    pub title: String,
    /// The delete request is in flight.
    pub deleting: bool,
}

impl ConfirmDeleteState {
    pub fn open(article: &SavedArticle) -> Self {
        Self {
            article_id: article.id.clone(),
            title: article.title.clone(),
            deleting: false,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> OverlayUpdate {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Esc | KeyCode::Char('n') => OverlayUpdate::close(),
            KeyCode::Char('c') if ctrl => OverlayUpdate::close(),
            KeyCode::Enter | KeyCode::Char('y') if !self.deleting => {
                self.deleting = true;
                OverlayUpdate::stay()
                    .with_ui_effects(vec![UiEffect::DeleteArticle {
                        id: self.article_id.clone(),
                    }])
                    .with_mutations(vec![StateMutation::Notify {
                        severity: Severity::Info,
                        text: messages::deleting(&self.title),
                    }])
            }
            _ => OverlayUpdate::stay(),
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        use super::render_utils::{InputHint, OverlayConfig, render_overlay};

        let hints = [
            InputHint::new("y", "delete"),
            InputHint::new("n/Esc", "cancel"),
        ];
        let layout = render_overlay(
            frame,
            area,
            &OverlayConfig {
                title: "Confirm Deletion",
                border_color: Color::Red,
                width: 60,
                height: 8,
                hints: &hints,
            },
        );

        let mut lines = vec![Line::from(messages::confirm_delete(&self.title))];
        if self.deleting {
            lines.push(Line::default());
            lines.push(Line::from(Span::styled(
                messages::deleting(&self.title),
                Style::default().fg(Color::Yellow),
            )));
        }
        frame.render_widget(
            Paragraph::new(lines).wrap(Wrap { trim: true }),
            layout.body,
        );
    }
}
