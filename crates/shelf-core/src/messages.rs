//! User-facing messages shared by the CLI and the TUI.

pub const APP_TITLE: &str = "Articles Bookmark App";

pub const LOGIN_FAILED: &str = "Login failed. Please check your credentials.";

pub const PASSWORDS_DO_NOT_MATCH: &str = "Passwords do not match.";
pub const REGISTER_SUCCESS: &str = "Registration successful! Please log in.";
pub const REGISTER_FAILED: &str = "Registration failed. Please try again.";

pub const SEARCH_FAILED: &str = "Failed to fetch search results.";
pub const SEARCH_EMPTY: &str = "Start searching for Wikipedia articles!";
pub const SAVE_FAILED: &str = "Failed to save article. It might already be saved.";

pub const SAVED_FETCH_FAILED: &str = "Failed to fetch saved articles.";
pub const SAVED_EMPTY: &str =
    "You haven't saved any articles yet. Go to the Search page to save some!";

pub const GENERATING_TAGS: &str = "Generating tags...";
pub const TAGS_GENERATED: &str = "Tags generated successfully!";
pub const GENERATE_FAILED: &str = "Failed to generate tags.";

pub const SAVING_TAGS: &str = "Saving tags...";
pub const TAGS_UPDATED: &str = "Tags updated successfully!";
pub const UPDATE_TAGS_FAILED: &str = "Failed to update tags.";

pub const ARTICLE_DELETED: &str = "Article deleted successfully!";
pub const DELETE_FAILED: &str = "Failed to delete article.";

pub const NOT_LOGGED_IN: &str = "Not logged in. Run `shelf login` first.";
pub const SESSION_EXPIRED: &str = "Session expired. Please log in again.";

/// Banner shown after a search result was saved.
pub fn saved_successfully(title: &str) -> String {
    format!("\"{title}\" saved successfully!")
}

pub fn deleting(title: &str) -> String {
    format!("Deleting \"{title}\"...")
}

pub fn confirm_delete(title: &str) -> String {
    format!("Are you sure you want to delete the article \"{title}\"? This action cannot be undone.")
}

/// Registration failure text: the backend detail verbatim when present.
pub fn register_failed(detail: Option<&str>) -> String {
    detail
        .filter(|d| !d.is_empty())
        .map_or_else(|| REGISTER_FAILED.to_string(), ToString::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formatted_messages() {
        assert_eq!(saved_successfully("Cat"), "\"Cat\" saved successfully!");
        assert_eq!(deleting("Cat"), "Deleting \"Cat\"...");
        assert!(confirm_delete("Cat").contains("the article \"Cat\"?"));
    }

    #[test]
    fn test_register_failed_prefers_detail() {
        assert_eq!(
            register_failed(Some("Username already registered")),
            "Username already registered"
        );
        assert_eq!(register_failed(None), REGISTER_FAILED);
        assert_eq!(register_failed(Some("")), REGISTER_FAILED);
    }
}
