//! Paginators and the post tree-query planner
//!
//! Query parameters arrive untyped from the delivery layer; the parsing
//! here applies the lenient rules of the API: `limit` falls back to 100
//! when missing or non-numeric, an unparseable `since` is dropped rather
//! than rejected, and only the literal `desc=true` flips the direction.
//! The planner in [`plan`] turns a paginator into executable SQL.

pub mod plan;

use std::collections::HashMap;

use chrono::{DateTime, Utc};

/// Page size applied when the caller supplies none.
pub const DEFAULT_LIMIT: i64 = 100;

/// Traversal direction of a page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Direction {
    #[default]
    Ascending,
    Descending,
}

impl Direction {
    pub fn from_desc_flag(desc: bool) -> Self {
        if desc {
            Direction::Descending
        } else {
            Direction::Ascending
        }
    }

    /// SQL sort keyword for this direction.
    pub fn order(self) -> &'static str {
        match self {
            Direction::Ascending => "ASC",
            Direction::Descending => "DESC",
        }
    }

    /// Strict comparator: cursor rows themselves are excluded.
    pub fn strict(self) -> &'static str {
        match self {
            Direction::Ascending => ">",
            Direction::Descending => "<",
        }
    }

    /// Inclusive comparator, used where the boundary row stays in range.
    pub fn inclusive(self) -> &'static str {
        match self {
            Direction::Ascending => ">=",
            Direction::Descending => "<=",
        }
    }
}

/// Page request over a thread's posts.
///
/// `sort` stays untyped here; the planner validates it and fails with
/// `PostNotFound` on an unknown mode.
#[derive(Debug, Clone)]
pub struct PostPaginator {
    pub limit: i64,
    pub since: Option<i64>,
    pub sort: String,
    pub direction: Direction,
}

impl Default for PostPaginator {
    fn default() -> Self {
        PostPaginator {
            limit: DEFAULT_LIMIT,
            since: None,
            sort: "flat".to_string(),
            direction: Direction::Ascending,
        }
    }
}

impl PostPaginator {
    pub fn from_query(params: &HashMap<String, String>) -> Self {
        PostPaginator {
            limit: parse_limit(params),
            // A zero id can never name a post; treat it as no cursor.
            since: params
                .get("since")
                .and_then(|raw| raw.parse::<i64>().ok())
                .filter(|id| *id != 0),
            sort: params
                .get("sort")
                .filter(|raw| !raw.is_empty())
                .cloned()
                .unwrap_or_else(|| "flat".to_string()),
            direction: parse_direction(params),
        }
    }
}

/// Page request over a forum's threads, keyed by creation time.
#[derive(Debug, Clone)]
pub struct ThreadPaginator {
    pub limit: i64,
    pub since: Option<DateTime<Utc>>,
    pub direction: Direction,
}

impl Default for ThreadPaginator {
    fn default() -> Self {
        ThreadPaginator {
            limit: DEFAULT_LIMIT,
            since: None,
            direction: Direction::Ascending,
        }
    }
}

impl ThreadPaginator {
    pub fn from_query(params: &HashMap<String, String>) -> Self {
        ThreadPaginator {
            limit: parse_limit(params),
            since: params
                .get("since")
                .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
                .map(|ts| ts.with_timezone(&Utc)),
            direction: parse_direction(params),
        }
    }
}

/// Page request over a forum's users, keyed by nickname.
#[derive(Debug, Clone)]
pub struct UserPaginator {
    pub limit: i64,
    pub since: Option<String>,
    pub direction: Direction,
}

impl Default for UserPaginator {
    fn default() -> Self {
        UserPaginator {
            limit: DEFAULT_LIMIT,
            since: None,
            direction: Direction::Ascending,
        }
    }
}

impl UserPaginator {
    pub fn from_query(params: &HashMap<String, String>) -> Self {
        UserPaginator {
            limit: parse_limit(params),
            since: params
                .get("since")
                .filter(|raw| !raw.is_empty())
                .cloned(),
            direction: parse_direction(params),
        }
    }
}

fn parse_limit(params: &HashMap<String, String>) -> i64 {
    params
        .get("limit")
        .and_then(|raw| raw.parse::<i64>().ok())
        .unwrap_or(DEFAULT_LIMIT)
}

fn parse_direction(params: &HashMap<String, String>) -> Direction {
    Direction::from_desc_flag(params.get("desc").map(String::as_str) == Some("true"))
}
