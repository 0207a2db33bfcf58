//! Screens and the guard deciding which one may render.

use crate::session::Session;

/// Top-level screens of the interactive client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Register,
    Search,
    Saved,
}

impl Route {
    /// Screens that require an authenticated session.
    pub fn is_protected(self) -> bool {
        matches!(self, Route::Search | Route::Saved)
    }

    /// Name shown in navigation.
    pub const fn title(self) -> &'static str {
        match self {
            Route::Login => "Login",
            Route::Register => "Register",
            Route::Search => "Search",
            Route::Saved => "Saved Articles",
        }
    }
}

/// Screen shown at startup and after leaving Login or Register.
pub fn entry(session: &Session) -> Route {
    if session.is_authenticated() {
        Route::Search
    } else {
        Route::Login
    }
}

/// Resolves the screen to render for a requested route.
///
/// Protected screens fall back to Login when anonymous; Login redirects to the
/// entry screen when already authenticated. Register is always reachable.
pub fn guard(requested: Route, session: &Session) -> Route {
    match requested {
        Route::Search | Route::Saved if !session.is_authenticated() => Route::Login,
        Route::Login if session.is_authenticated() => entry(session),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anonymous_guard() {
        let session = Session::ephemeral(None);
        assert_eq!(entry(&session), Route::Login);
        assert_eq!(guard(Route::Search, &session), Route::Login);
        assert_eq!(guard(Route::Saved, &session), Route::Login);
        assert_eq!(guard(Route::Login, &session), Route::Login);
        assert_eq!(guard(Route::Register, &session), Route::Register);
    }

    #[test]
    fn test_authenticated_guard() {
        let session = Session::ephemeral(Some("t".to_string()));
        assert_eq!(entry(&session), Route::Search);
        assert_eq!(guard(Route::Login, &session), Route::Search);
        assert_eq!(guard(Route::Saved, &session), Route::Saved);
        assert_eq!(guard(Route::Register, &session), Route::Register);
    }

    #[test]
    fn test_protected_routes() {
        assert!(Route::Search.is_protected());
        assert!(Route::Saved.is_protected());
        assert!(!Route::Login.is_protected());
        assert!(!Route::Register.is_protected());
    }
}
