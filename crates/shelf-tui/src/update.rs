//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects.

use std::time::Instant;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use shelf_core::Route;

use crate::effects::UiEffect;
use crate::events::{ApiEvent, UiEvent};
use crate::features::nav::{self, NavAction};
use crate::features::search::SearchFocus;
use crate::mutations::StateMutation;
use crate::overlays::{Overlay, OverlayExt, OverlayTransition};
use crate::state::AppState;

/// The main reducer function.
///
/// Takes the current state and an event, mutates state, and returns effects
/// for the runtime to execute.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    let now = Instant::now();
    match event {
        UiEvent::Tick => handle_tick(app, now),
        UiEvent::Terminal(term_event) => handle_terminal_event(app, term_event, now),
        UiEvent::Api(api_event) => handle_api_event(app, api_event, now),
    }
}

/// Advances animations and expires timed messages.
pub(crate) fn handle_tick(app: &mut AppState, now: Instant) -> Vec<UiEffect> {
    app.tui.spinner_frame = app.tui.spinner_frame.wrapping_add(1);
    app.tui.search.check_timeout(now);
    app.tui.saved.notice.check_timeout(now);

    if app.tui.route == Route::Register {
        let mutations = app.tui.register.check_redirect(now);
        return apply_mutations(app, mutations, now);
    }
    vec![]
}

fn handle_terminal_event(app: &mut AppState, event: Event, now: Instant) -> Vec<UiEffect> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => handle_key(app, key, now),
        Event::Paste(text) => {
            handle_paste(app, &text);
            vec![]
        }
        _ => vec![],
    }
}

fn handle_paste(app: &mut AppState, text: &str) {
    if let Some(overlay) = &mut app.overlay {
        overlay.handle_paste(text);
        return;
    }
    match app.tui.route {
        Route::Login => app.tui.login.handle_paste(text),
        Route::Register => app.tui.register.handle_paste(text),
        Route::Search => app.tui.search.handle_paste(text),
        Route::Saved => {}
    }
}

fn handle_key(app: &mut AppState, key: KeyEvent, now: Instant) -> Vec<UiEffect> {
    if let Some(overlay) = &mut app.overlay {
        let update = overlay.handle_key(key);
        if update.transition == OverlayTransition::Close {
            app.overlay = None;
        }
        let mut effects = update.effects;
        effects.extend(apply_mutations(app, update.mutations, now));
        return effects;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let authenticated = app.tui.session.is_authenticated();
    match key.code {
        KeyCode::Char('c') if ctrl => return vec![UiEffect::Quit],
        KeyCode::Esc => {
            if app.tui.route == Route::Search && app.tui.search.focus == SearchFocus::Results {
                app.tui.search.focus = SearchFocus::Query;
                return vec![];
            }
            return vec![UiEffect::Quit];
        }
        KeyCode::Char('l') if ctrl && authenticated => {
            return apply_mutations(app, vec![StateMutation::Logout], now);
        }
        KeyCode::F(_) => {
            return match nav::action_for_key(key.code, authenticated) {
                Some(NavAction::Go(route)) => app.tui.navigate(route),
                Some(NavAction::Logout) => apply_mutations(app, vec![StateMutation::Logout], now),
                None => vec![],
            };
        }
        _ => {}
    }

    match app.tui.route {
        Route::Login => app.tui.login.handle_key(key),
        Route::Register => app.tui.register.handle_key(key),
        Route::Search => app.tui.search.handle_key(key),
        Route::Saved => {
            let (mut effects, mutations) = app.tui.saved.handle_key(key, now);
            effects.extend(apply_mutations(app, mutations, now));
            effects
        }
    }
}

/// Applies cross-slice mutations in order.
fn apply_mutations(
    app: &mut AppState,
    mutations: Vec<StateMutation>,
    now: Instant,
) -> Vec<UiEffect> {
    let mut effects = Vec::new();
    for mutation in mutations {
        match mutation {
            StateMutation::Navigate(route) => effects.extend(app.tui.navigate(route)),
            StateMutation::SignIn { token } => {
                if let Err(e) = app.tui.session.sign_in(token) {
                    tracing::warn!("Failed to persist session: {e:#}");
                }
            }
            StateMutation::Logout => {
                if let Err(e) = app.tui.session.sign_out() {
                    tracing::warn!("Failed to clear session: {e:#}");
                }
                app.overlay = None;
                effects.extend(app.tui.navigate(Route::Login));
            }
            StateMutation::Notify { severity, text } => {
                app.tui.saved.notice.show(severity, text, now);
            }
            StateMutation::OpenOverlay(request) => {
                app.overlay = Some(Overlay::open(request));
            }
        }
    }
    effects
}

/// Routes a backend result to the screen that issued it.
///
/// Results for a screen that is no longer shown are dropped, except login,
/// which always completes. A 401 from a protected call additionally ends the
/// session after the screen recorded its own failure.
fn handle_api_event(app: &mut AppState, event: ApiEvent, now: Instant) -> Vec<UiEffect> {
    let expired = event.is_session_expired();
    let route = app.tui.route;
    let ui = app.tui.ui.clone();

    let mut effects = match event {
        ApiEvent::LoginFinished { result } => {
            let mutations = app.tui.login.handle_result(result);
            apply_mutations(app, mutations, now)
        }
        ApiEvent::RegisterFinished { result } => {
            if route == Route::Register {
                app.tui
                    .register
                    .handle_result(result, now, ui.register_redirect_delay());
            }
            vec![]
        }
        ApiEvent::SearchFinished { req, result } => {
            if route == Route::Search {
                app.tui.search.handle_results(req, result);
            }
            vec![]
        }
        ApiEvent::ArticleSaved { title, result } => {
            if route == Route::Search {
                app.tui
                    .search
                    .handle_saved(&title, result, now, ui.save_banner_duration());
            }
            vec![]
        }
        ApiEvent::SavedLoaded { req, result } => {
            if route == Route::Saved {
                app.tui.saved.handle_loaded(req, result);
            }
            vec![]
        }
        ApiEvent::TagsGenerated { id, result } => {
            if route == Route::Saved {
                app.tui.saved.handle_generated(&id, result, now);
            }
            vec![]
        }
        ApiEvent::TagsReplaced { id, result } => {
            if route == Route::Saved {
                let replaced = app.tui.saved.handle_tags_replaced(&id, result, now);
                let editing = app.overlay.is_editing(&id);
                settle_overlay(app, editing, replaced);
            }
            vec![]
        }
        ApiEvent::ArticleDeleted { id, result } => {
            if route == Route::Saved {
                let deleted = app.tui.saved.handle_deleted(&id, result, now);
                let confirming = app.overlay.is_confirming_delete(&id);
                settle_overlay(app, confirming, deleted);
            }
            vec![]
        }
    };

    if expired {
        effects.extend(expire_session(app));
    }
    effects
}

/// Closes the modal whose request succeeded, or re-enables it after a failure.
fn settle_overlay(app: &mut AppState, matches: bool, succeeded: bool) {
    if !matches {
        return;
    }
    if succeeded {
        app.overlay = None;
    } else if let Some(overlay) = &mut app.overlay {
        overlay.request_failed();
    }
}

fn expire_session(app: &mut AppState) -> Vec<UiEffect> {
    if !app.tui.session.is_authenticated() {
        return vec![];
    }
    tracing::warn!("Backend rejected the session token; logging out");
    if let Err(e) = app.tui.session.expire() {
        tracing::warn!("Failed to clear session: {e:#}");
    }
    app.overlay = None;
    app.tui.navigate(Route::Login)
}
