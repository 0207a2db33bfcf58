//! Navigation bar: app title plus the links available to the current session.

use crossterm::event::KeyCode;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use shelf_core::Route;
use shelf_core::messages::APP_TITLE;

/// What a navigation link does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    Go(Route),
    Logout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavLink {
    pub key: KeyCode,
    pub label: &'static str,
    pub action: NavAction,
}

const ANONYMOUS_LINKS: [NavLink; 2] = [
    NavLink {
        key: KeyCode::F(1),
        label: Route::Login.title(),
        action: NavAction::Go(Route::Login),
    },
    NavLink {
        key: KeyCode::F(2),
        label: Route::Register.title(),
        action: NavAction::Go(Route::Register),
    },
];

const AUTHENTICATED_LINKS: [NavLink; 3] = [
    NavLink {
        key: KeyCode::F(1),
        label: Route::Search.title(),
        action: NavAction::Go(Route::Search),
    },
    NavLink {
        key: KeyCode::F(2),
        label: Route::Saved.title(),
        action: NavAction::Go(Route::Saved),
    },
    NavLink {
        key: KeyCode::F(3),
        label: "Logout",
        action: NavAction::Logout,
    },
];

/// Links shown for the given session state.
pub fn links(authenticated: bool) -> &'static [NavLink] {
    if authenticated {
        &AUTHENTICATED_LINKS
    } else {
        &ANONYMOUS_LINKS
    }
}

/// Resolves a function key to a link action.
pub fn action_for_key(code: KeyCode, authenticated: bool) -> Option<NavAction> {
    links(authenticated)
        .iter()
        .find(|link| link.key == code)
        .map(|link| link.action)
}

fn key_label(code: KeyCode) -> String {
    match code {
        KeyCode::F(n) => format!("F{n}"),
        other => format!("{other:?}"),
    }
}

pub fn render_nav(frame: &mut Frame, area: Rect, current: Route, authenticated: bool) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [title_area, links_area] =
        Layout::horizontal([Constraint::Min(0), Constraint::Length(60)]).areas(inner);

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            format!(" {APP_TITLE}"),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ))),
        title_area,
    );

    let mut spans = Vec::new();
    for link in links(authenticated) {
        let active = link.action == NavAction::Go(current);
        let label_style = if active {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        spans.push(Span::styled(
            format!("{} ", key_label(link.key)),
            Style::default().fg(Color::DarkGray),
        ));
        spans.push(Span::styled(format!(" {} ", link.label), label_style));
        spans.push(Span::raw("  "));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)).right_aligned(), links_area);
}
