use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{DomainError, DomainResult};

/// A discussion thread inside a forum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thread {
    pub id: i64,
    pub title: String,
    #[serde(rename = "author")]
    pub author: String,
    pub forum: String,
    pub message: String,
    #[serde(default)]
    pub votes: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    pub created: DateTime<Utc>,
}

/// Body of a thread-creation request; the forum slug comes from the path.
#[derive(Debug, Clone, Deserialize)]
pub struct ThreadCreate {
    pub title: String,
    #[serde(rename = "user")]
    pub author: String,
    pub message: String,
    #[serde(default = "Utc::now")]
    pub created: DateTime<Utc>,
    #[serde(default)]
    pub slug: Option<String>,
}

/// Partial thread update; absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ThreadUpdate {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ThreadUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.message.is_none()
    }
}

/// A vote cast on a thread. A second vote by the same author replaces
/// the first (upsert), it never accumulates.
#[derive(Debug, Clone, Deserialize)]
pub struct ThreadVote {
    pub nickname: String,
    pub voice: i32,
}

/// A thread reference as supplied by callers: either a decimal id or a
/// slug. The same resolution rule applies everywhere a combined
/// identifier is accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThreadKey {
    Id(i64),
    Slug(String),
}

impl ThreadKey {
    /// Resolve an untyped path segment into a key. Numeric parse wins;
    /// a numeric value below 1 can never name a thread, and a
    /// non-numeric string falls back to slug lookup.
    pub fn parse(raw: &str) -> DomainResult<Self> {
        match raw.parse::<i64>() {
            Ok(id) if id >= 1 => Ok(ThreadKey::Id(id)),
            Ok(_) => Err(DomainError::ThreadNotFound),
            Err(_) => Ok(ThreadKey::Slug(raw.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_string_resolves_to_id() {
        assert_eq!(ThreadKey::parse("42").unwrap(), ThreadKey::Id(42));
    }

    #[test]
    fn non_numeric_string_resolves_to_slug() {
        assert_eq!(
            ThreadKey::parse("rust-lang").unwrap(),
            ThreadKey::Slug("rust-lang".to_string())
        );
    }

    #[test]
    fn numeric_below_one_is_not_a_thread() {
        assert_eq!(ThreadKey::parse("0"), Err(DomainError::ThreadNotFound));
        assert_eq!(ThreadKey::parse("-5"), Err(DomainError::ThreadNotFound));
    }

    #[test]
    fn slug_with_digits_and_letters_stays_a_slug() {
        assert_eq!(
            ThreadKey::parse("2nd-take").unwrap(),
            ThreadKey::Slug("2nd-take".to_string())
        );
    }
}
