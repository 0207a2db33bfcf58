//! Login screen.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use shelf_core::Route;
use shelf_core::api::{ApiResult, TokenResponse};
use shelf_core::messages;

use super::form::{Focus, REQUIRED_FIELD, TextField, first_empty};
use crate::effects::UiEffect;
use crate::mutations::StateMutation;
use crate::overlays::render_utils::centered_column;

#[derive(Debug, Clone)]
pub struct LoginState {
    pub username: TextField,
    pub password: TextField,
    pub focus: Focus,
    pub error: Option<String>,
    pub submitting: bool,
}

impl Default for LoginState {
    fn default() -> Self {
        Self {
            username: TextField::new("Username"),
            password: TextField::masked("Password"),
            focus: Focus::new(2),
            error: None,
            submitting: false,
        }
    }
}

impl LoginState {
    fn focused_mut(&mut self) -> &mut TextField {
        match self.focus.index() {
            0 => &mut self.username,
            _ => &mut self.password,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Vec<UiEffect> {
        match key.code {
            KeyCode::Tab | KeyCode::Down => self.focus.next(),
            KeyCode::BackTab | KeyCode::Up => self.focus.prev(),
            KeyCode::Enter => return self.submit(),
            _ => {
                self.focused_mut().handle_key(key);
            }
        }
        vec![]
    }

    pub fn handle_paste(&mut self, text: &str) {
        self.focused_mut().paste(text);
    }

    fn submit(&mut self) -> Vec<UiEffect> {
        if self.submitting {
            return vec![];
        }
        if let Some(index) = first_empty(&[&self.username, &self.password]) {
            self.focus.set(index);
            self.error = Some(REQUIRED_FIELD.to_string());
            return vec![];
        }

        self.error = None;
        self.submitting = true;
        vec![UiEffect::Login {
            username: self.username.value.clone(),
            password: self.password.value.clone(),
        }]
    }

    /// Applies the `/token` response. The failure detail is logged, never shown.
    pub fn handle_result(&mut self, result: ApiResult<TokenResponse>) -> Vec<StateMutation> {
        self.submitting = false;
        match result {
            Ok(token) => vec![
                StateMutation::SignIn {
                    token: token.access_token,
                },
                StateMutation::Navigate(Route::Search),
            ],
            Err(err) => {
                tracing::warn!(error = %err, "login failed");
                self.error = Some(messages::LOGIN_FAILED.to_string());
                vec![]
            }
        }
    }
}

pub fn render_login(frame: &mut Frame, state: &LoginState, area: Rect, spinner: &str) {
    let column = centered_column(area, 50, 12);
    let [title, user, pass, status, hint] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(2),
        Constraint::Length(1),
    ])
    .areas(column);

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            "Login",
            Style::default().add_modifier(Modifier::BOLD),
        )))
        .centered(),
        title,
    );
    state.username.render(frame, user, state.focus.index() == 0);
    state.password.render(frame, pass, state.focus.index() == 1);

    let status_line = if state.submitting {
        Line::from(Span::styled(
            format!("{spinner} Logging in..."),
            Style::default().fg(Color::Yellow),
        ))
    } else if let Some(error) = &state.error {
        Line::from(Span::styled(error.as_str(), Style::default().fg(Color::Red)))
    } else {
        Line::default()
    };
    frame.render_widget(Paragraph::new(status_line), status);

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            "Enter login • Tab next field • F2 register",
            Style::default().fg(Color::DarkGray),
        ))),
        hint,
    );
}
