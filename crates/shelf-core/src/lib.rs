//! Core library for the shelf bookmarking client.
//!
//! Holds everything both front-ends share: the backend client and wire types,
//! the session context with its route guard, configuration and logging.

pub mod api;
pub mod config;
pub mod logging;
pub mod messages;
pub mod route;
pub mod session;
pub mod tags;

pub use api::{ApiClient, ApiError, ApiResult, ArticleId};
pub use config::Config;
pub use route::Route;
pub use session::{Session, SessionStore};
