//! Notification area of the Saved Articles screen.
//!
//! Holds at most one message. A new message replaces the current one and
//! restarts its timer.

use std::time::{Duration, Instant};

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::common::{Expiring, clear_expired};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Error,
}

impl Severity {
    fn color(self) -> Color {
        match self {
            Severity::Info => Color::Cyan,
            Severity::Success => Color::Green,
            Severity::Error => Color::Red,
        }
    }

    fn icon(self) -> &'static str {
        match self {
            Severity::Info => "ℹ",
            Severity::Success => "✓",
            Severity::Error => "✗",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub severity: Severity,
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct NoticeArea {
    current: Option<Expiring<Notice>>,
    ttl: Duration,
}

impl NoticeArea {
    pub fn new(ttl: Duration) -> Self {
        Self { current: None, ttl }
    }

    pub fn show(&mut self, severity: Severity, text: impl Into<String>, now: Instant) {
        let notice = Notice {
            severity,
            text: text.into(),
        };
        self.current = Some(Expiring::new(notice, now, self.ttl));
    }

    pub fn dismiss(&mut self) {
        self.current = None;
    }

    /// Auto-hide once the display duration has passed.
    pub fn check_timeout(&mut self, now: Instant) {
        clear_expired(&mut self.current, now);
    }

    pub fn current(&self) -> Option<&Notice> {
        self.current.as_ref().map(|n| &n.value)
    }
}

pub fn render_notice(frame: &mut Frame, area: Rect, notice: &Notice) {
    let color = notice.severity.color();
    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", notice.severity.icon()),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Span::styled(notice.text.clone(), Style::default().fg(color)),
        Span::styled("  (x to dismiss)", Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_notice_replaces_and_restarts_timer() {
        let t0 = Instant::now();
        let mut area = NoticeArea::new(Duration::from_secs(6));
        area.show(Severity::Info, "Saving tags...", t0);
        area.show(Severity::Success, "Tags updated successfully!", t0 + Duration::from_secs(5));

        area.check_timeout(t0 + Duration::from_secs(7));
        assert_eq!(
            area.current().map(|n| n.severity),
            Some(Severity::Success)
        );

        area.check_timeout(t0 + Duration::from_secs(11));
        assert!(area.current().is_none());
    }

    #[test]
    fn test_dismiss() {
        let mut area = NoticeArea::new(Duration::from_secs(6));
        area.show(Severity::Error, "Failed to delete article.", Instant::now());
        area.dismiss();
        assert!(area.current().is_none());
    }
}
