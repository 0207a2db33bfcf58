//! Modal overlays for the Saved Articles screen.
//!
//! Overlays temporarily take over keyboard input. Each overlay owns its
//! state, key handler and render function.
//!
//! - `edit_tags.rs`: edit the comma-separated tag list of an article
//! - `confirm_delete.rs`: confirm deleting an article
//! - `render_utils.rs`: shared rendering helpers

pub mod confirm_delete;
pub mod edit_tags;
pub mod render_utils;

pub use confirm_delete::ConfirmDeleteState;
use crossterm::event::KeyEvent;
pub use edit_tags::EditTagsState;
use ratatui::Frame;
use ratatui::layout::Rect;
use shelf_core::api::{ArticleId, SavedArticle};

use crate::effects::UiEffect;
use crate::mutations::StateMutation;

/// Requests to open a modal.
#[derive(Debug)]
pub enum OverlayRequest {
    EditTags(SavedArticle),
    ConfirmDelete(SavedArticle),
}

/// Transition returned by overlay key handlers.
#[derive(Debug, PartialEq, Eq)]
pub enum OverlayTransition {
    Stay,
    Close,
}

/// Update returned by overlay key handlers.
#[derive(Debug)]
pub struct OverlayUpdate {
    pub transition: OverlayTransition,
    pub mutations: Vec<StateMutation>,
    pub effects: Vec<UiEffect>,
}

impl OverlayUpdate {
    fn new(transition: OverlayTransition) -> Self {
        Self {
            transition,
            mutations: Vec::new(),
            effects: Vec::new(),
        }
    }

    pub fn stay() -> Self {
        Self::new(OverlayTransition::Stay)
    }

    pub fn close() -> Self {
        Self::new(OverlayTransition::Close)
    }

    #[must_use]
    pub fn with_mutations(mut self, mutations: Vec<StateMutation>) -> Self {
        self.mutations = mutations;
        self
    }

    #[must_use]
    pub fn with_ui_effects(mut self, effects: Vec<UiEffect>) -> Self {
        self.effects = effects;
        self
    }
}

#[derive(Debug)]
pub enum Overlay {
    EditTags(EditTagsState),
    ConfirmDelete(ConfirmDeleteState),
}

impl Overlay {
    pub fn open(request: OverlayRequest) -> Self {
        match request {
            OverlayRequest::EditTags(article) => Overlay::EditTags(EditTagsState::open(&article)),
            OverlayRequest::ConfirmDelete(article) => {
                Overlay::ConfirmDelete(ConfirmDeleteState::open(&article))
            }
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        match self {
            Overlay::EditTags(s) => s.render(frame, area),
            Overlay::ConfirmDelete(s) => s.render(frame, area),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> OverlayUpdate {
        match self {
            Overlay::EditTags(s) => s.handle_key(key),
            Overlay::ConfirmDelete(s) => s.handle_key(key),
        }
    }

    pub fn handle_paste(&mut self, text: &str) {
        if let Overlay::EditTags(s) = self {
            s.handle_paste(text);
        }
    }

    /// Re-enables the overlay after its request failed.
    pub fn request_failed(&mut self) {
        match self {
            Overlay::EditTags(s) => s.saving = false,
            Overlay::ConfirmDelete(s) => s.deleting = false,
        }
    }
}

/// Extension trait for `Option<Overlay>` providing convenience helpers.
pub trait OverlayExt {
    /// Renders the overlay if one is active.
    fn render(&self, frame: &mut Frame, area: Rect);

    /// True when an edit-tags modal for `id` is open.
    fn is_editing(&self, id: &ArticleId) -> bool;

    /// True when a delete confirmation for `id` is open.
    fn is_confirming_delete(&self, id: &ArticleId) -> bool;
}

impl OverlayExt for Option<Overlay> {
    fn render(&self, frame: &mut Frame, area: Rect) {
        if let Some(overlay) = self {
            overlay.render(frame, area);
        }
    }

    fn is_editing(&self, id: &ArticleId) -> bool {
        matches!(self, Some(Overlay::EditTags(s)) if &s.article_id == id)
    }

    fn is_confirming_delete(&self, id: &ArticleId) -> bool {
        matches!(self, Some(Overlay::ConfirmDelete(s)) if &s.article_id == id)
    }
}
