use serde::{Deserialize, Serialize};

/// A forum with its denormalized post/thread counters.
///
/// The counters are maintained by storage triggers, never by use cases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Forum {
    pub title: String,
    #[serde(rename = "user")]
    pub author: String,
    pub slug: String,
    #[serde(default)]
    pub posts: i64,
    #[serde(default)]
    pub threads: i64,
}

/// Body of a forum-creation request.
#[derive(Debug, Clone, Deserialize)]
pub struct ForumCreate {
    pub title: String,
    #[serde(rename = "user")]
    pub author: String,
    pub slug: String,
}
