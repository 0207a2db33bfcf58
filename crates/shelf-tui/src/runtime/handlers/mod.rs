//! Effect handlers for the TUI runtime.
//!
//! Handlers are pure async functions that perform one backend call and return
//! the `UiEvent` describing its outcome. They never touch state; the runtime
//! spawns them and forwards the result to the inbox.
//!
//! ```ignore
//! // Handler: pure async, returns UiEvent
//! pub async fn list_articles(client: ApiClient, req: RequestId) -> UiEvent { ... }
//!
//! // Runtime: spawns and sends to inbox
//! self.spawn_effect(move |client| handlers::list_articles(client, req));
//! ```

pub mod articles;
pub mod auth;

pub use articles::*;
pub use auth::*;
