//! Cross-slice state mutations.
//!
//! Screen reducers and overlays return these to request changes outside their
//! own slice. The main reducer applies them in order.

use shelf_core::Route;
use crate::features::notice::Severity;
use crate::overlays::OverlayRequest;

/// Mutations for cross-slice state changes.
#[derive(Debug)]
pub enum StateMutation {
    /// Navigate through the route guard.
    Navigate(Route),
    /// Authenticate the session with a fresh token.
    SignIn { token: String },
    /// End the session by user request.
    Logout,
    /// Show a message in the notification area.
    Notify { severity: Severity, text: String },
    /// Open a modal for the given saved article.
    OpenOverlay(OverlayRequest),
}
