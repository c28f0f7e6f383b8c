//! Query plans for cursor pagination
//!
//! Pure SQL composition for the three post sort modes plus the
//! thread/user listings. Plans are built here and executed by the
//! storage layer, so every ordering and comparator rule is testable
//! without a database.
//!
//! The post tree is encoded as a materialized nesting path: `path`
//! holds the ancestor ids from the root post down to the row itself,
//! so lexicographic order on `path` is depth-first traversal order and
//! `path[1]` is the root of a row's subtree.

use crate::errors::{DomainError, DomainResult};
use crate::pagination::{PostPaginator, ThreadPaginator, UserPaginator};

/// A composed statement. Parameter order is fixed: the scope key is
/// `$1`, the cursor (when `with_cursor`) is `$2`, and the limit is the
/// last placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSql {
    pub sql: String,
    pub with_cursor: bool,
}

const POST_COLUMNS: &str =
    "id, parent_id, author_nickname, message, is_edited, forum_slug, thread_id, created_at";

const POST_COLUMNS_QUALIFIED: &str = "p.id, p.parent_id, p.author_nickname, p.message, \
     p.is_edited, p.forum_slug, p.thread_id, p.created_at";

const THREAD_COLUMNS: &str =
    "id, slug, title, author_nickname, forum_slug, message, created_at, votes";

/// Post sort modes. Callers hand the mode over untyped; anything
/// unknown fails the whole page request with `PostNotFound`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PostSort {
    Flat,
    Tree,
    ParentTree,
}

impl PostSort {
    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "flat" => Some(PostSort::Flat),
            "tree" => Some(PostSort::Tree),
            "parent_tree" => Some(PostSort::ParentTree),
            _ => None,
        }
    }
}

/// Build the page query for a thread's posts under the requested sort.
pub fn post_page(paginator: &PostPaginator) -> DomainResult<PageSql> {
    let sort = PostSort::parse(&paginator.sort).ok_or(DomainError::PostNotFound)?;
    let with_cursor = paginator.since.is_some();
    let ord = paginator.direction.order();

    let sql = match (sort, with_cursor) {
        (PostSort::Flat, false) => format!(
            "SELECT {POST_COLUMNS} FROM posts \
             WHERE thread_id = $1 \
             ORDER BY id {ord} LIMIT $2"
        ),
        (PostSort::Flat, true) => {
            let cmp = paginator.direction.strict();
            format!(
                "SELECT {POST_COLUMNS} FROM posts \
                 WHERE thread_id = $1 AND id {cmp} $2 \
                 ORDER BY id {ord} LIMIT $3"
            )
        }
        (PostSort::Tree, false) => format!(
            "SELECT {POST_COLUMNS_QUALIFIED} FROM posts p \
             WHERE p.thread_id = $1 \
             ORDER BY p.path[1] {ord}, p.path {ord} LIMIT $2"
        ),
        // The cursor post anchors a strict lexicographic bound over the
        // full nesting path.
        (PostSort::Tree, true) => {
            let cmp = paginator.direction.strict();
            format!(
                "SELECT {POST_COLUMNS_QUALIFIED} FROM posts p \
                 JOIN posts anchor ON anchor.id = $2 \
                 WHERE p.thread_id = $1 AND p.path {cmp} anchor.path \
                 ORDER BY p.path[1] {ord}, p.path {ord} LIMIT $3"
            )
        }
        // The limit selects root posts; the page expands to every post
        // under the selected roots, subtrees always read root-down.
        (PostSort::ParentTree, false) => format!(
            "SELECT {POST_COLUMNS_QUALIFIED} FROM posts p \
             WHERE p.path[1] IN (\
                 SELECT id FROM posts \
                 WHERE thread_id = $1 AND parent_id = 0 \
                 ORDER BY id {ord} LIMIT $2) \
             ORDER BY p.path[1] {ord}, p.path"
        ),
        // The cursor bounds root selection by its own subtree root
        // (path[1]), inclusively.
        (PostSort::ParentTree, true) => {
            let cmp = paginator.direction.inclusive();
            format!(
                "SELECT {POST_COLUMNS_QUALIFIED} FROM posts p \
                 WHERE p.path[1] IN (\
                     SELECT id FROM posts \
                     WHERE thread_id = $1 AND parent_id = 0 \
                     AND path[1] {cmp} (SELECT path[1] FROM posts WHERE id = $2) \
                     ORDER BY id {ord} LIMIT $3) \
                 ORDER BY p.path[1] {ord}, p.path"
            )
        }
    };

    Ok(PageSql { sql, with_cursor })
}

/// Build the page query for a forum's threads. The `since` bound is
/// inclusive on the creation timestamp.
pub fn thread_page(paginator: &ThreadPaginator) -> PageSql {
    let ord = paginator.direction.order();
    match paginator.since {
        None => PageSql {
            sql: format!(
                "SELECT {THREAD_COLUMNS} FROM threads \
                 WHERE forum_slug = $1 \
                 ORDER BY created_at {ord} LIMIT $2"
            ),
            with_cursor: false,
        },
        Some(_) => {
            let cmp = paginator.direction.inclusive();
            PageSql {
                sql: format!(
                    "SELECT {THREAD_COLUMNS} FROM threads \
                     WHERE forum_slug = $1 AND created_at {cmp} $2 \
                     ORDER BY created_at {ord} LIMIT $3"
                ),
                with_cursor: true,
            }
        }
    }
}

/// Build the page query for a forum's users, ordered by nickname with a
/// strict cursor.
pub fn user_page(paginator: &UserPaginator) -> PageSql {
    let ord = paginator.direction.order();
    match paginator.since {
        None => PageSql {
            sql: format!(
                "SELECT u.nickname, u.fullname, u.about, u.email FROM users u \
                 JOIN forum_users fu ON fu.user_nickname = u.nickname AND fu.forum_slug = $1 \
                 ORDER BY u.nickname {ord} LIMIT $2"
            ),
            with_cursor: false,
        },
        Some(_) => {
            let cmp = paginator.direction.strict();
            PageSql {
                sql: format!(
                    "SELECT u.nickname, u.fullname, u.about, u.email FROM users u \
                     JOIN forum_users fu ON fu.user_nickname = u.nickname AND fu.forum_slug = $1 \
                     WHERE u.nickname {cmp} $2 \
                     ORDER BY u.nickname {ord} LIMIT $3"
                ),
                with_cursor: true,
            }
        }
    }
}
