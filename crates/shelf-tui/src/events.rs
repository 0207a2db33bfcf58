//! UI event types.
//!
//! All external inputs (terminal, timers, backend results) are converted to
//! `UiEvent` before being processed by the reducer.
//!
//! ## Inbox Pattern
//!
//! Backend calls run as tokio tasks that send their result to the runtime's
//! inbox as an `ApiEvent`. The reducer matches the result against the state
//! that issued it.

use crossterm::event::Event as CrosstermEvent;
use shelf_core::api::{ApiResult, Article, ArticleId, SavedArticle, TokenResponse};

use crate::common::RequestId;

/// Completion of a backend call.
#[derive(Debug)]
pub enum ApiEvent {
    LoginFinished {
        result: ApiResult<TokenResponse>,
    },
    RegisterFinished {
        result: ApiResult<()>,
    },
    SearchFinished {
        req: RequestId,
        result: ApiResult<Vec<Article>>,
    },
    ArticleSaved {
        title: String,
        result: ApiResult<SavedArticle>,
    },
    SavedLoaded {
        req: RequestId,
        result: ApiResult<Vec<SavedArticle>>,
    },
    TagsGenerated {
        id: ArticleId,
        result: ApiResult<SavedArticle>,
    },
    TagsReplaced {
        id: ArticleId,
        result: ApiResult<SavedArticle>,
    },
    ArticleDeleted {
        id: ArticleId,
        result: ApiResult<()>,
    },
}

impl ApiEvent {
    /// True when a protected call was rejected because the session token is no
    /// longer valid. A 401 from `/token` is a bad login, not an expiry.
    pub fn is_session_expired(&self) -> bool {
        let err = match self {
            ApiEvent::LoginFinished { .. } | ApiEvent::RegisterFinished { .. } => return false,
            ApiEvent::ArticleDeleted { result, .. } => result.as_ref().err(),
            ApiEvent::SearchFinished { result, .. } => result.as_ref().err(),
            ApiEvent::SavedLoaded { result, .. } => result.as_ref().err(),
            ApiEvent::ArticleSaved { result, .. }
            | ApiEvent::TagsGenerated { result, .. }
            | ApiEvent::TagsReplaced { result, .. } => result.as_ref().err(),
        };
        err.is_some_and(shelf_core::ApiError::is_unauthorized)
    }
}

/// Unified event enum for the TUI.
#[derive(Debug)]
pub enum UiEvent {
    /// Periodic tick: animations and expiring messages.
    Tick,
    /// Raw terminal input.
    Terminal(CrosstermEvent),
    /// Backend call completed.
    Api(ApiEvent),
}
