//! Register screen.
//!
//! A successful registration shows a confirmation and leaves for the entry
//! screen after a short delay.

use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use shelf_core::Route;
use shelf_core::api::ApiResult;
use shelf_core::messages;

use super::form::{Focus, REQUIRED_FIELD, TextField, first_empty};
use crate::effects::UiEffect;
use crate::mutations::StateMutation;
use crate::overlays::render_utils::centered_column;

#[derive(Debug, Clone)]
pub struct RegisterState {
    pub username: TextField,
    pub password: TextField,
    pub confirm: TextField,
    pub focus: Focus,
    pub error: Option<String>,
    pub success: Option<String>,
    pub submitting: bool,
    redirect_at: Option<Instant>,
}

impl Default for RegisterState {
    fn default() -> Self {
        Self {
            username: TextField::new("Username"),
            password: TextField::masked("Password"),
            confirm: TextField::masked("Confirm Password"),
            focus: Focus::new(3),
            error: None,
            success: None,
            submitting: false,
            redirect_at: None,
        }
    }
}

impl RegisterState {
    fn focused_mut(&mut self) -> &mut TextField {
        match self.focus.index() {
            0 => &mut self.username,
            1 => &mut self.password,
            _ => &mut self.confirm,
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
        if self.submitting || self.redirect_at.is_some() {
            return vec![];
        }
        if let Some(index) = first_empty(&[&self.username, &self.password, &self.confirm]) {
            self.focus.set(index);
            self.error = Some(REQUIRED_FIELD.to_string());
            return vec![];
        }

        self.error = None;
        self.success = None;
        if self.password.value != self.confirm.value {
            self.error = Some(messages::PASSWORDS_DO_NOT_MATCH.to_string());
            return vec![];
        }

        self.submitting = true;
        vec![UiEffect::Register {
            username: self.username.value.clone(),
            password: self.password.value.clone(),
        }]
    }

    pub fn handle_result(&mut self, result: ApiResult<()>, now: Instant, redirect_delay: Duration) {
        self.submitting = false;
        match result {
            Ok(()) => {
                self.success = Some(messages::REGISTER_SUCCESS.to_string());
                self.redirect_at = Some(now + redirect_delay);
            }
            Err(err) => {
                tracing::warn!(error = %err, "registration failed");
                self.error = Some(messages::register_failed(err.detail.as_deref()));
            }
        }
    }

    /// Leaves for the entry screen once the post-registration delay is over.
    pub fn check_redirect(&mut self, now: Instant) -> Vec<StateMutation> {
        match self.redirect_at {
            Some(at) if now >= at => {
                self.redirect_at = None;
                // Login resolves to the entry screen through the guard.
                vec![StateMutation::Navigate(Route::Login)]
            }
            _ => vec![],
        }
    }
}

pub fn render_register(frame: &mut Frame, state: &RegisterState, area: Rect, spinner: &str) {
    let column = centered_column(area, 50, 15);
    let [title, user, pass, confirm, status, hint] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(2),
        Constraint::Length(1),
    ])
    .areas(column);

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            "Register",
            Style::default().add_modifier(Modifier::BOLD),
        )))
        .centered(),
        title,
    );
    state.username.render(frame, user, state.focus.index() == 0);
    state.password.render(frame, pass, state.focus.index() == 1);
    state.confirm.render(frame, confirm, state.focus.index() == 2);

    let status_line = if state.submitting {
        Line::from(Span::styled(
            format!("{spinner} Registering..."),
            Style::default().fg(Color::Yellow),
        ))
    } else if let Some(error) = &state.error {
        Line::from(Span::styled(error.as_str(), Style::default().fg(Color::Red)))
    } else if let Some(success) = &state.success {
        Line::from(Span::styled(
            success.as_str(),
            Style::default().fg(Color::Green),
        ))
    } else {
        Line::default()
    };
    frame.render_widget(Paragraph::new(status_line), status);

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            "Enter register • Tab next field • F1 login",
            Style::default().fg(Color::DarkGray),
        ))),
        hint,
    );
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;
    use shelf_core::ApiError;

    use super::*;

    fn fill(state: &mut RegisterState, values: [&str; 3]) {
        for (i, value) in values.iter().enumerate() {
            state.focus.set(i);
            for c in value.chars() {
                state.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));
            }
        }
    }

    fn enter(state: &mut RegisterState) -> Vec<UiEffect> {
        state.handle_key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE))
    }

    #[test]
    fn test_password_mismatch_makes_no_call() {
        let mut state = RegisterState::default();
        fill(&mut state, ["bob", "one", "two"]);
        assert!(enter(&mut state).is_empty());
        assert_eq!(state.error.as_deref(), Some(messages::PASSWORDS_DO_NOT_MATCH));
        assert!(!state.submitting);
    }

    #[test]
    fn test_matching_passwords_register() {
        let mut state = RegisterState::default();
        fill(&mut state, ["bob", "pw", "pw"]);
        assert_eq!(
            enter(&mut state),
            vec![UiEffect::Register {
                username: "bob".to_string(),
                password: "pw".to_string()
            }]
        );
    }

    #[test]
    fn test_success_redirects_after_delay() {
        let mut state = RegisterState::default();
        fill(&mut state, ["bob", "pw", "pw"]);
        enter(&mut state);

        let t0 = Instant::now();
        state.handle_result(Ok(()), t0, Duration::from_millis(1000));
        assert_eq!(state.success.as_deref(), Some(messages::REGISTER_SUCCESS));

        assert!(state.check_redirect(t0 + Duration::from_millis(999)).is_empty());
        let mutations = state.check_redirect(t0 + Duration::from_millis(1000));
        assert!(matches!(
            mutations.as_slice(),
            [StateMutation::Navigate(Route::Login)]
        ));
        assert!(state.check_redirect(t0 + Duration::from_secs(5)).is_empty());
    }

    #[test]
    fn test_failure_shows_backend_detail() {
        let mut state = RegisterState::default();
        state.handle_result(
            Err(ApiError::http_status(400, r#"{"detail": "Username already registered"}"#)),
            Instant::now(),
            Duration::from_secs(1),
        );
        assert_eq!(state.error.as_deref(), Some("Username already registered"));
    }

    #[test]
    fn test_failure_without_detail_is_generic() {
        let mut state = RegisterState::default();
        state.handle_result(
            Err(ApiError::transport("connection refused")),
            Instant::now(),
            Duration::from_secs(1),
        );
        assert_eq!(state.error.as_deref(), Some(messages::REGISTER_FAILED));
    }
}
