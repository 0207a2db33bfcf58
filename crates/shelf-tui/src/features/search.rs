//! Search screen: query the article source and save results.

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use shelf_core::api::{ApiResult, Article, SavedArticle};
use shelf_core::messages;

use super::form::{REQUIRED_FIELD, TextField};
use crate::common::{
    Expiring, LatestOnly, RequestId, clear_expired, sanitize_for_display, truncate_with_ellipsis,
};
use crate::effects::UiEffect;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchFocus {
    #[default]
    Query,
    Results,
}

#[derive(Debug)]
pub struct SearchState {
    pub query: TextField,
    pub results: Vec<Article>,
    pub selected: usize,
    pub focus: SearchFocus,
    pub error: Option<String>,
    pub banner: Option<Expiring<String>>,
    request: LatestOnly,
}

impl Default for SearchState {
    fn default() -> Self {
        Self {
            query: TextField::new("Search Wikipedia"),
            results: Vec::new(),
            selected: 0,
            focus: SearchFocus::Query,
            error: None,
            banner: None,
            request: LatestOnly::default(),
        }
    }
}

impl SearchState {
    pub fn is_loading(&self) -> bool {
        self.request.has_active()
    }

    /// Clears the screen for a fresh visit. Any in-flight search is dropped.
    pub fn reset(&mut self) {
        self.request.cancel();
        let request = std::mem::take(&mut self.request);
        *self = Self {
            request,
            ..Self::default()
        };
    }

    pub fn selected_article(&self) -> Option<&Article> {
        self.results.get(self.selected)
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Vec<UiEffect> {
        match self.focus {
            SearchFocus::Query => self.handle_query_key(key),
            SearchFocus::Results => self.handle_results_key(key),
        }
    }

    pub fn handle_paste(&mut self, text: &str) {
        self.focus = SearchFocus::Query;
        self.query.paste(text);
    }

    fn handle_query_key(&mut self, key: KeyEvent) -> Vec<UiEffect> {
        match key.code {
            KeyCode::Enter => return self.submit(),
            KeyCode::Tab | KeyCode::Down if !self.results.is_empty() => {
                self.focus = SearchFocus::Results;
            }
            _ => {
                self.query.handle_key(key);
            }
        }
        vec![]
    }

    fn handle_results_key(&mut self, key: KeyEvent) -> Vec<UiEffect> {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                if self.selected == 0 {
                    self.focus = SearchFocus::Query;
                } else {
                    self.selected -= 1;
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < self.results.len() {
                    self.selected += 1;
                }
            }
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Char('/') => {
                self.focus = SearchFocus::Query;
            }
            KeyCode::Enter | KeyCode::Char('s') => return self.save_selected(),
            KeyCode::Char('o') => {
                if let Some(article) = self.selected_article() {
                    return vec![UiEffect::OpenBrowser {
                        url: article.url.clone(),
                    }];
                }
            }
            _ => {}
        }
        vec![]
    }

    /// Starts a search. Previous results, errors and banner are cleared first.
    pub fn submit(&mut self) -> Vec<UiEffect> {
        if self.query.is_empty() {
            self.error = Some(REQUIRED_FIELD.to_string());
            return vec![];
        }

        self.error = None;
        self.banner = None;
        self.results.clear();
        self.selected = 0;
        self.focus = SearchFocus::Query;
        let req = self.request.begin();
        vec![UiEffect::Search {
            req,
            query: self.query.value.clone(),
        }]
    }

    pub fn handle_results(&mut self, req: RequestId, result: ApiResult<Vec<Article>>) {
        if !self.request.finish_if_active(req) {
            tracing::debug!(?req, "dropping stale search result");
            return;
        }
        match result {
            Ok(results) => {
                self.results = results;
                self.selected = 0;
            }
            Err(err) => {
                tracing::warn!(error = %err, "search failed");
                self.error = Some(messages::SEARCH_FAILED.to_string());
            }
        }
    }

    fn save_selected(&mut self) -> Vec<UiEffect> {
        let Some(article) = self.selected_article() else {
            return vec![];
        };
        let effect = UiEffect::SaveArticle {
            title: article.title.clone(),
            url: article.url.clone(),
        };
        self.error = None;
        self.banner = None;
        vec![effect]
    }

    /// Applies a save result. Results stay untouched either way.
    pub fn handle_saved(
        &mut self,
        title: &str,
        result: ApiResult<SavedArticle>,
        now: Instant,
        banner_ttl: Duration,
    ) {
        match result {
            Ok(_) => {
                self.error = None;
                self.banner = Some(Expiring::new(
                    messages::saved_successfully(title),
                    now,
                    banner_ttl,
                ));
            }
            Err(err) => {
                tracing::warn!(error = %err, title, "save failed");
                self.error = Some(messages::SAVE_FAILED.to_string());
            }
        }
    }

    pub fn check_timeout(&mut self, now: Instant) {
        clear_expired(&mut self.banner, now);
    }
}

pub fn render_search(frame: &mut Frame, state: &SearchState, area: Rect, spinner: &str) {
    let [title, query, status, list] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Min(0),
    ])
    .areas(area);

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            "Search Articles",
            Style::default().add_modifier(Modifier::BOLD),
        )))
        .centered(),
        title,
    );
    state
        .query
        .render(frame, query, state.focus == SearchFocus::Query);

    let status_line = if let Some(error) = &state.error {
        Line::from(Span::styled(error.as_str(), Style::default().fg(Color::Red)))
    } else if let Some(banner) = &state.banner {
        Line::from(Span::styled(
            banner.value.as_str(),
            Style::default().fg(Color::Green),
        ))
    } else {
        Line::default()
    };
    frame.render_widget(Paragraph::new(status_line), status);

    if state.is_loading() {
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                format!("{spinner} Searching..."),
                Style::default().fg(Color::Yellow),
            )))
            .centered(),
            list,
        );
        return;
    }

    if state.results.is_empty() {
        if state.error.is_none() {
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    messages::SEARCH_EMPTY,
                    Style::default().fg(Color::DarkGray),
                )))
                .centered(),
                list,
            );
        }
        return;
    }

    render_results(frame, state, list);
}

fn render_results(frame: &mut Frame, state: &SearchState, area: Rect) {
    let focused = state.focus == SearchFocus::Results;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if focused {
            Color::Cyan
        } else {
            Color::DarkGray
        }))
        .title(format!(" Results ({}) ", state.results.len()))
        .title_bottom(Line::from(" s save • o open • / edit query ").centered());
    let width = block.inner(area).width.saturating_sub(2) as usize;

    let items: Vec<ListItem> = state
        .results
        .iter()
        .map(|article| {
            let summary = sanitize_for_display(&article.summary);
            ListItem::new(vec![
                Line::from(Span::styled(
                    truncate_with_ellipsis(&article.title, width),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    truncate_with_ellipsis(&summary, width),
                    Style::default().fg(Color::Gray),
                )),
                Line::from(Span::styled(
                    truncate_with_ellipsis(&article.url, width),
                    Style::default().fg(Color::Blue),
                )),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_symbol("▸ ")
        .highlight_style(Style::default().bg(Color::DarkGray));
    let mut list_state = ListState::default().with_selected(focused.then_some(state.selected));
    frame.render_stateful_widget(list, area, &mut list_state);
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;
    use shelf_core::ApiError;

    use super::*;

    fn article(title: &str) -> Article {
        Article {
            title: title.to_string(),
            url: format!("https://en.wikipedia.org/wiki/{title}"),
            summary: format!("About {title}."),
        }
    }

    fn saved_copy(title: &str) -> SavedArticle {
        SavedArticle {
            id: shelf_core::api::ArticleId::from(1),
            title: title.to_string(),
            url: format!("https://en.wikipedia.org/wiki/{title}"),
            tags: Vec::new(),
        }
    }

    fn searched(query: &str) -> (SearchState, RequestId) {
        let mut state = SearchState::default();
        state.query.value = query.to_string();
        let effects = state.submit();
        let [UiEffect::Search { req, .. }] = effects.as_slice() else {
            panic!("expected search effect, got {effects:?}");
        };
        (state, *req)
    }

    #[test]
    fn test_submit_clears_previous_state() {
        let (mut state, req) = searched("cats");
        state.handle_results(req, Ok(vec![article("Cat")]));
        state.error = Some("old".to_string());
        state.banner = Some(Expiring::new("old".to_string(), Instant::now(), Duration::from_secs(3)));

        state.submit();
        assert!(state.results.is_empty());
        assert!(state.error.is_none());
        assert!(state.banner.is_none());
        assert!(state.is_loading());
    }

    #[test]
    fn test_empty_query_is_rejected() {
        let mut state = SearchState::default();
        assert!(state.submit().is_empty());
        assert!(!state.is_loading());
    }

    #[test]
    fn test_stale_results_are_dropped() {
        let (mut state, first) = searched("cats");
        let effects = state.submit();
        let [UiEffect::Search { req: second, .. }] = effects.as_slice() else {
            panic!("expected search effect");
        };

        state.handle_results(first, Ok(vec![article("Stale")]));
        assert!(state.results.is_empty());
        assert!(state.is_loading());

        state.handle_results(*second, Ok(vec![article("Fresh")]));
        assert_eq!(state.results[0].title, "Fresh");
    }

    #[test]
    fn test_search_failure() {
        let (mut state, req) = searched("cats");
        state.handle_results(req, Err(ApiError::http_status(500, "")));
        assert_eq!(state.error.as_deref(), Some(messages::SEARCH_FAILED));
        assert!(!state.is_loading());
    }

    #[test]
    fn test_save_selected_result() {
        let (mut state, req) = searched("cats");
        state.handle_results(req, Ok(vec![article("Cat"), article("Lion")]));
        state.handle_key(KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE));
        state.handle_key(KeyEvent::new(KeyCode::Down, KeyModifiers::NONE));

        let effects = state.handle_key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::NONE));
        assert_eq!(
            effects,
            vec![UiEffect::SaveArticle {
                title: "Lion".to_string(),
                url: "https://en.wikipedia.org/wiki/Lion".to_string()
            }]
        );
    }

    #[test]
    fn test_duplicate_save_keeps_results() {
        let (mut state, req) = searched("cats");
        state.handle_results(req, Ok(vec![article("Cat")]));

        state.handle_saved(
            "Cat",
            Err(ApiError::http_status(400, r#"{"detail": "Article already saved"}"#)),
            Instant::now(),
            Duration::from_secs(3),
        );
        assert_eq!(state.error.as_deref(), Some(messages::SAVE_FAILED));
        assert_eq!(state.results.len(), 1);
        assert!(state.banner.is_none());
    }

    #[test]
    fn test_save_after_failed_save_shows_banner() {
        let (mut state, req) = searched("cats");
        state.handle_results(req, Ok(vec![article("Lion"), article("Tiger")]));
        let now = Instant::now();

        state.handle_saved("Lion", Err(ApiError::http_status(400, "")), now, Duration::from_secs(3));
        assert_eq!(state.error.as_deref(), Some(messages::SAVE_FAILED));

        state.handle_saved("Tiger", Ok(saved_copy("Tiger")), now, Duration::from_secs(3));
        assert!(state.error.is_none());
        assert_eq!(
            state.banner.as_ref().map(|b| b.value.as_str()),
            Some("\"Tiger\" saved successfully!")
        );
    }

    #[test]
    fn test_starting_a_save_clears_previous_save_error() {
        let (mut state, req) = searched("cats");
        state.handle_results(req, Ok(vec![article("Lion")]));
        state.handle_saved("Lion", Err(ApiError::http_status(400, "")), Instant::now(), Duration::from_secs(3));

        state.handle_key(KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE));
        let effects = state.handle_key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::NONE));
        assert_eq!(effects.len(), 1);
        assert!(state.error.is_none());
    }

    #[test]
    fn test_reset_drops_in_flight_search() {
        let (mut state, req) = searched("cats");
        state.reset();
        assert!(!state.is_loading());
        state.handle_results(req, Ok(vec![article("Late")]));
        assert!(state.results.is_empty());
        assert!(state.query.is_empty());
    }
}
