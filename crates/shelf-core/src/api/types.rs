//! Wire types exchanged with the bookmarking backend.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Identifier of a backend record (saved article or tag).
///
/// Stored as canonical decimal text: no sign on zero and no leading zeros, so
/// `"007"` and `7` name the same record. Identifiers may exceed the range of
/// native integers, so they are never converted to one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordId(String);

pub type ArticleId = RecordId;
pub type TagId = RecordId;

impl RecordId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Error returned when text is not a decimal integer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid record id: {0:?}")]
pub struct InvalidRecordId(String);

impl FromStr for RecordId {
    type Err = InvalidRecordId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (negative, digits) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InvalidRecordId(s.to_string()));
        }
        let digits = digits.trim_start_matches('0');
        Ok(Self(match (digits.is_empty(), negative) {
            (true, _) => "0".to_string(),
            (false, true) => format!("-{digits}"),
            (false, false) => digits.to_string(),
        }))
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<u64> for RecordId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // serde_json's `arbitrary_precision` keeps the literal digits of numbers.
        let value = Value::deserialize(deserializer)?;
        let text = match value {
            Value::Number(n) => n.to_string(),
            Value::String(s) => s,
            other => {
                return Err(serde::de::Error::custom(format!(
                    "expected integer id, got {other}"
                )));
            }
        };
        text.parse().map_err(serde::de::Error::custom)
    }
}

impl Serialize for RecordId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match serde_json::Number::from_str(&self.0) {
            Ok(number) => number.serialize(serializer),
            Err(_) => serializer.serialize_str(&self.0),
        }
    }
}

/// Search result returned by `GET /search`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub summary: String,
}

/// Tag attached to a saved article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: TagId,
    pub name: String,
}

/// Persisted bookmark owned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedArticle {
    pub id: ArticleId,
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub tags: Vec<Tag>,
}

impl SavedArticle {
    /// Tag names in display order.
    pub fn tag_names(&self) -> Vec<&str> {
        self.tags.iter().map(|t| t.name.as_str()).collect()
    }
}

/// Body of `POST /articles/`.
#[derive(Debug, Clone, Serialize)]
pub struct NewArticle<'a> {
    pub title: &'a str,
    pub url: &'a str,
}

/// Form body of `POST /token`.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Response of `POST /token`.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
}
