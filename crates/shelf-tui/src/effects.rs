//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! They represent I/O only; the reducer never calls the backend itself.

use shelf_core::api::ArticleId;

use crate::common::RequestId;

/// Effects returned by the reducer for the runtime to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEffect {
    /// Quit the application.
    Quit,

    /// Open a URL in the system browser.
    OpenBrowser { url: String },

    /// `POST /token`.
    Login { username: String, password: String },

    /// `POST /register`.
    Register { username: String, password: String },

    /// `GET /search`.
    Search { req: RequestId, query: String },

    /// `POST /articles/`.
    SaveArticle { title: String, url: String },

    /// `GET /articles/`.
    LoadSaved { req: RequestId },

    /// `POST /articles/{id}/generate_tags`.
    GenerateTags { id: ArticleId },

    /// `PUT /articles/{id}/tags`.
    ReplaceTags { id: ArticleId, names: Vec<String> },

    /// `DELETE /articles/{id}`.
    DeleteArticle { id: ArticleId },
}
