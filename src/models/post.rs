use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Forum, Thread, User};

/// A single post inside a thread's reply tree.
///
/// The nesting path (ancestor ids, root to self) lives only in storage;
/// it orders tree traversals but is never serialized to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    #[serde(default)]
    pub parent: i64,
    pub author: String,
    pub message: String,
    #[serde(rename = "isEdited", default)]
    pub is_edited: bool,
    pub forum: String,
    pub thread: i64,
    pub created: DateTime<Utc>,
}

/// One entry of a batch post-creation request.
#[derive(Debug, Clone, Deserialize)]
pub struct PostCreate {
    #[serde(default)]
    pub parent: i64,
    pub author: String,
    pub message: String,
}

/// Partial post update; an absent or empty message is a no-op.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostUpdate {
    #[serde(default)]
    pub message: Option<String>,
}

/// A post plus the related records the caller asked to embed.
#[derive(Debug, Clone, Serialize)]
pub struct PostDetails {
    pub post: Post,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<User>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thread: Option<Thread>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forum: Option<Forum>,
}

/// Which related entities a post-detail request wants embedded,
/// parsed from the comma-separated `related` query parameter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Related {
    pub user: bool,
    pub thread: bool,
    pub forum: bool,
}

impl Related {
    pub fn parse(raw: &str) -> Self {
        let mut related = Related::default();
        for item in raw.split(',') {
            match item.trim() {
                "user" => related.user = true,
                "thread" => related.thread = true,
                "forum" => related.forum = true,
                _ => {}
            }
        }
        related
    }
}
