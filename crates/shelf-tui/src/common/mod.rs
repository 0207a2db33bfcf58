//! Shared building blocks for the TUI slices.

mod request_id;
mod text;
mod timer;

pub use request_id::{LatestOnly, RequestId};
pub use text::{sanitize_for_display, truncate_start_with_ellipsis, truncate_with_ellipsis};
pub use timer::{Expiring, clear_expired};
