//! Application state composition.
//!
//! ```text
//! AppState
//! ├── tui: TuiState
//! │   ├── session: Session      (token, single authoritative copy)
//! │   ├── route: Route          (screen currently shown)
//! │   ├── login / register      (form screens)
//! │   ├── search                (query, results, save banner)
//! │   └── saved                 (saved list, notification area)
//! └── overlay: Option<Overlay>   (edit-tags / confirm-delete modals)
//! ```
//!
//! Overlay handlers get `&mut Overlay` while the reducer keeps `&mut TuiState`,
//! so both can be mutated without borrow conflicts.

use shelf_core::config::UiConfig;
use shelf_core::{Route, Session, route};

use crate::effects::UiEffect;
use crate::features::login::LoginState;
use crate::features::notice::NoticeArea;
use crate::features::register::RegisterState;
use crate::features::saved::SavedState;
use crate::features::search::SearchState;
use crate::overlays::Overlay;

/// Combined application state for the TUI.
pub struct AppState {
    pub tui: TuiState,
    pub overlay: Option<Overlay>,
}

impl AppState {
    /// Creates the state and the effects of entering the first screen.
    pub fn new(session: Session, ui: UiConfig) -> (Self, Vec<UiEffect>) {
        let mut tui = TuiState::new(session, ui);
        let entry = route::entry(&tui.session);
        let effects = tui.enter(entry);
        (Self { tui, overlay: None }, effects)
    }
}

/// Non-overlay UI state.
pub struct TuiState {
    pub should_quit: bool,
    pub session: Session,
    pub route: Route,
    pub ui: UiConfig,
    pub login: LoginState,
    pub register: RegisterState,
    pub search: SearchState,
    pub saved: SavedState,
    /// Spinner animation frame counter.
    pub spinner_frame: usize,
}

impl TuiState {
    fn new(session: Session, ui: UiConfig) -> Self {
        let notice = NoticeArea::new(ui.notice_duration());
        Self {
            should_quit: false,
            session,
            route: Route::Login,
            ui,
            login: LoginState::default(),
            register: RegisterState::default(),
            search: SearchState::default(),
            saved: SavedState::new(notice),
            spinner_frame: 0,
        }
    }

    /// Navigates through the route guard. Staying on the current screen is a
    /// no-op; entering a screen starts it fresh.
    pub fn navigate(&mut self, requested: Route) -> Vec<UiEffect> {
        let target = route::guard(requested, &self.session);
        if target == self.route {
            return vec![];
        }
        tracing::debug!(from = ?self.route, to = ?target, "navigate");
        self.enter(target)
    }

    fn enter(&mut self, target: Route) -> Vec<UiEffect> {
        self.route = target;
        match target {
            Route::Login => {
                self.login = LoginState::default();
                vec![]
            }
            Route::Register => {
                self.register = RegisterState::default();
                vec![]
            }
            Route::Search => {
                self.search.reset();
                vec![]
            }
            Route::Saved => {
                self.saved.reset();
                self.saved.load()
            }
        }
    }
}
