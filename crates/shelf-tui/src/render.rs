//! Pure view/render functions for the TUI.
//!
//! Functions here take `&AppState`, draw to a ratatui `Frame` and never
//! mutate state or return effects.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Margin};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use shelf_core::Route;

use crate::features::login::render_login;
use crate::features::nav::render_nav;
use crate::features::register::render_register;
use crate::features::saved::render_saved;
use crate::features::search::render_search;
use crate::overlays::OverlayExt;
use crate::state::AppState;

/// Spinner frames for loading indicators.
const SPINNER_FRAMES: &[&str] = &["◐", "◓", "◑", "◒"];

/// Height of the navigation bar including its bottom border.
const NAV_HEIGHT: u16 = 2;

/// Renders the entire TUI to the frame.
pub fn render(app: &AppState, frame: &mut Frame) {
    let state = &app.tui;
    let area = frame.area();

    let [nav, body, footer] = Layout::vertical([
        Constraint::Length(NAV_HEIGHT),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    render_nav(frame, nav, state.route, state.session.is_authenticated());

    let body = body.inner(Margin::new(2, 1));
    let spinner = SPINNER_FRAMES[state.spinner_frame % SPINNER_FRAMES.len()];
    match state.route {
        Route::Login => render_login(frame, &state.login, body, spinner),
        Route::Register => render_register(frame, &state.register, body, spinner),
        Route::Search => render_search(frame, &state.search, body, spinner),
        Route::Saved => render_saved(frame, &state.saved, body, spinner),
    }

    let quit_hint = if state.session.is_authenticated() {
        " Ctrl+L logout • Esc quit"
    } else {
        " Esc quit"
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            quit_hint,
            Style::default().fg(Color::DarkGray),
        ))),
        footer,
    );

    app.overlay.render(frame, area);
}
