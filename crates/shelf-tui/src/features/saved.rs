//! Saved Articles screen: list, tag and delete bookmarks.

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use shelf_core::api::{ApiResult, ArticleId, SavedArticle};
use shelf_core::messages;

use super::notice::{NoticeArea, Severity, render_notice};
use crate::common::{LatestOnly, RequestId, truncate_with_ellipsis};
use crate::effects::UiEffect;
use crate::mutations::StateMutation;
use crate::overlays::OverlayRequest;

#[derive(Debug)]
pub struct SavedState {
    pub articles: Vec<SavedArticle>,
    pub selected: usize,
    pub error: Option<String>,
    pub notice: NoticeArea,
    request: LatestOnly,
}

impl SavedState {
    pub fn new(notice: NoticeArea) -> Self {
        Self {
            articles: Vec::new(),
            selected: 0,
            error: None,
            notice,
            request: LatestOnly::default(),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.request.has_active()
    }

    /// Clears the screen for a fresh visit. Any in-flight fetch is dropped.
    pub fn reset(&mut self) {
        self.request.cancel();
        self.articles.clear();
        self.selected = 0;
        self.error = None;
        self.notice.dismiss();
    }

    pub fn selected_article(&self) -> Option<&SavedArticle> {
        self.articles.get(self.selected)
    }

    /// Starts (or restarts) fetching the full list.
    pub fn load(&mut self) -> Vec<UiEffect> {
        self.error = None;
        let req = self.request.begin();
        vec![UiEffect::LoadSaved { req }]
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> (Vec<UiEffect>, Vec<StateMutation>) {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < self.articles.len() {
                    self.selected += 1;
                }
            }
            KeyCode::Char('r') => return (self.load(), vec![]),
            KeyCode::Char('x') => self.notice.dismiss(),
            KeyCode::Char('g') => {
                if let Some(article) = self.selected_article() {
                    let id = article.id.clone();
                    self.notice.show(Severity::Info, messages::GENERATING_TAGS, now);
                    return (vec![UiEffect::GenerateTags { id }], vec![]);
                }
            }
            KeyCode::Char('e') => {
                if let Some(article) = self.selected_article() {
                    let request = OverlayRequest::EditTags(article.clone());
                    return (vec![], vec![StateMutation::OpenOverlay(request)]);
                }
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                if let Some(article) = self.selected_article() {
                    let request = OverlayRequest::ConfirmDelete(article.clone());
                    return (vec![], vec![StateMutation::OpenOverlay(request)]);
                }
            }
            KeyCode::Char('o') | KeyCode::Enter => {
                if let Some(article) = self.selected_article() {
                    let url = article.url.clone();
                    return (vec![UiEffect::OpenBrowser { url }], vec![]);
                }
            }
            _ => {}
        }
        (vec![], vec![])
    }

    pub fn handle_loaded(&mut self, req: RequestId, result: ApiResult<Vec<SavedArticle>>) {
        if !self.request.finish_if_active(req) {
            tracing::debug!(?req, "dropping stale saved-articles result");
            return;
        }
        match result {
            Ok(articles) => {
                self.articles = articles;
                self.selected = self.selected.min(self.articles.len().saturating_sub(1));
            }
            Err(err) => {
                tracing::warn!(error = %err, "fetching saved articles failed");
                self.error = Some(messages::SAVED_FETCH_FAILED.to_string());
            }
        }
    }

    /// Replaces the entry with the same id by the backend's copy.
    fn replace(&mut self, updated: SavedArticle) {
        if let Some(slot) = self.articles.iter_mut().find(|a| a.id == updated.id) {
            *slot = updated;
        }
    }

    pub fn handle_generated(&mut self, id: &ArticleId, result: ApiResult<SavedArticle>, now: Instant) {
        match result {
            Ok(article) => {
                self.replace(article);
                self.notice.show(Severity::Success, messages::TAGS_GENERATED, now);
            }
            Err(err) => {
                tracing::warn!(error = %err, %id, "tag generation failed");
                self.notice.show(Severity::Error, messages::GENERATE_FAILED, now);
            }
        }
    }

    /// Returns true when the tags were replaced.
    pub fn handle_tags_replaced(
        &mut self,
        id: &ArticleId,
        result: ApiResult<SavedArticle>,
        now: Instant,
    ) -> bool {
        match result {
            Ok(article) => {
                self.replace(article);
                self.notice.show(Severity::Success, messages::TAGS_UPDATED, now);
                true
            }
            Err(err) => {
                tracing::warn!(error = %err, %id, "tag update failed");
                self.notice.show(Severity::Error, messages::UPDATE_TAGS_FAILED, now);
                false
            }
        }
    }

    /// Removes the entry only after the backend confirmed the delete.
    /// Returns true when it was deleted.
    pub fn handle_deleted(&mut self, id: &ArticleId, result: ApiResult<()>, now: Instant) -> bool {
        match result {
            Ok(()) => {
                self.articles.retain(|a| &a.id != id);
                self.selected = self.selected.min(self.articles.len().saturating_sub(1));
                self.notice.show(Severity::Success, messages::ARTICLE_DELETED, now);
                true
            }
            Err(err) => {
                tracing::warn!(error = %err, %id, "delete failed");
                self.notice.show(Severity::Error, messages::DELETE_FAILED, now);
                false
            }
        }
    }
}

pub fn render_saved(frame: &mut Frame, state: &SavedState, area: Rect, spinner: &str) {
    let [title, body, notice] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            "Your Saved Articles",
            Style::default().add_modifier(Modifier::BOLD),
        )))
        .centered(),
        title,
    );

    if let Some(current) = state.notice.current() {
        render_notice(frame, notice, current);
    }

    let status_line = if state.is_loading() {
        Some(Line::from(Span::styled(
            format!("{spinner} Loading..."),
            Style::default().fg(Color::Yellow),
        )))
    } else {
        state
            .error
            .as_deref()
            .map(|error| Line::from(Span::styled(error, Style::default().fg(Color::Red))))
    };

    let body = match status_line {
        Some(line) => {
            let [status, rest] =
                Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(body);
            frame.render_widget(Paragraph::new(line).centered(), status);
            rest
        }
        None => body,
    };

    if state.articles.is_empty() {
        if !state.is_loading() && state.error.is_none() {
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    messages::SAVED_EMPTY,
                    Style::default().fg(Color::DarkGray),
                )))
                .centered(),
                body,
            );
        }
        return;
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" Saved ({}) ", state.articles.len()))
        .title_bottom(
            Line::from(" g generate tags • e edit tags • d delete • o open • r refresh ")
                .centered(),
        );
    let width = block.inner(body).width.saturating_sub(2) as usize;

    let items: Vec<ListItem> = state
        .articles
        .iter()
        .map(|article| {
            let tags = if article.tags.is_empty() {
                Span::styled("no tags", Style::default().fg(Color::DarkGray))
            } else {
                Span::styled(
                    truncate_with_ellipsis(&article.tag_names().join(" · "), width),
                    Style::default().fg(Color::Magenta),
                )
            };
            ListItem::new(vec![
                Line::from(Span::styled(
                    truncate_with_ellipsis(&article.title, width),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    truncate_with_ellipsis(&article.url, width),
                    Style::default().fg(Color::Blue),
                )),
                Line::from(tags),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_symbol("▸ ")
        .highlight_style(Style::default().bg(Color::DarkGray));
    let mut list_state = ListState::default().with_selected(Some(state.selected));
    frame.render_stateful_widget(list, body, &mut list_state);
}
