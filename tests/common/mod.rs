//! In-memory stores for driving the use cases in tests.
//!
//! Each mock implements its repository trait over shared state
//! (`Arc<Mutex<_>>`), so a cloned handle observes every mutation made
//! through the use case under test. The post store reproduces the
//! materialized-path paging contract in Rust, which keeps the ordering
//! and cursor rules testable without PostgreSQL.

#![allow(dead_code)]

use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;

use agora::errors::{DomainError, DomainResult};
use agora::models::{
    Forum, ForumCreate, Post, PostCreate, PostUpdate, Thread, ThreadCreate, ThreadKey,
    ThreadUpdate, ThreadVote, User, UserUpdate,
};
use agora::pagination::{Direction, PostPaginator, ThreadPaginator, UserPaginator};
use agora::storage::{ForumStore, PostStore, ThreadStore, UserStore};

fn take_page<T>(items: Vec<T>, limit: i64) -> Vec<T> {
    items.into_iter().take(limit.max(0) as usize).collect()
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[derive(Clone, Default)]
pub struct MockUserStore {
    users: Arc<Mutex<Vec<User>>>,
}

impl MockUserStore {
    pub fn with_users(users: &[User]) -> Self {
        Self {
            users: Arc::new(Mutex::new(users.to_vec())),
        }
    }

    pub fn count(&self) -> usize {
        self.users.lock().unwrap().len()
    }

    pub fn contains(&self, nickname: &str) -> bool {
        self.users
            .lock()
            .unwrap()
            .iter()
            .any(|u| u.nickname == nickname)
    }
}

#[async_trait]
impl UserStore for MockUserStore {
    async fn insert(&self, user: &User) -> DomainResult<()> {
        let mut users = self.users.lock().unwrap();
        if users
            .iter()
            .any(|u| u.nickname == user.nickname || u.email == user.email)
        {
            return Err(DomainError::DataConflict);
        }
        users.push(user.clone());
        Ok(())
    }

    async fn select_by_nickname(&self, nickname: &str) -> DomainResult<User> {
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.nickname == nickname)
            .cloned()
            .ok_or(DomainError::UserNotFound)
    }

    async fn select_by_nickname_or_email(
        &self,
        nickname: &str,
        email: &str,
    ) -> DomainResult<Vec<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .filter(|u| u.nickname == nickname || u.email == email)
            .cloned()
            .collect())
    }

    async fn select_by_forum(
        &self,
        _forum_slug: &str,
        _page: &UserPaginator,
    ) -> DomainResult<Vec<User>> {
        // Forum membership is trigger-maintained in real storage; the
        // mock has no members.
        Ok(Vec::new())
    }

    async fn update_profile(&self, nickname: &str, update: &UserUpdate) -> DomainResult<()> {
        let mut users = self.users.lock().unwrap();
        if let Some(email) = &update.email {
            if users
                .iter()
                .any(|u| u.nickname != nickname && u.email == *email)
            {
                return Err(DomainError::DataConflict);
            }
        }
        let user = users
            .iter_mut()
            .find(|u| u.nickname == nickname)
            .ok_or(DomainError::UserNotFound)?;
        if let Some(email) = &update.email {
            user.email = email.clone();
        }
        if let Some(fullname) = &update.fullname {
            user.fullname = fullname.clone();
        }
        if let Some(about) = &update.about {
            user.about = Some(about.clone());
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Forums
// ---------------------------------------------------------------------------

#[derive(Clone, Default)]
pub struct MockForumStore {
    forums: Arc<Mutex<Vec<Forum>>>,
}

impl MockForumStore {
    pub fn with_forums(forums: &[Forum]) -> Self {
        Self {
            forums: Arc::new(Mutex::new(forums.to_vec())),
        }
    }

    pub fn count(&self) -> usize {
        self.forums.lock().unwrap().len()
    }
}

#[async_trait]
impl ForumStore for MockForumStore {
    async fn insert(&self, forum: &ForumCreate) -> DomainResult<()> {
        let mut forums = self.forums.lock().unwrap();
        if forums.iter().any(|f| f.slug == forum.slug) {
            return Err(DomainError::DataConflict);
        }
        forums.push(Forum {
            title: forum.title.clone(),
            author: forum.author.clone(),
            slug: forum.slug.clone(),
            posts: 0,
            threads: 0,
        });
        Ok(())
    }

    async fn select_by_slug(&self, slug: &str) -> DomainResult<Forum> {
        self.forums
            .lock()
            .unwrap()
            .iter()
            .find(|f| f.slug == slug)
            .cloned()
            .ok_or(DomainError::ForumNotFound)
    }
}

// ---------------------------------------------------------------------------
// Threads
// ---------------------------------------------------------------------------

#[derive(Clone, Default)]
pub struct MockThreadStore {
    threads: Arc<Mutex<Vec<Thread>>>,
    votes: Arc<Mutex<Vec<(i64, String, i32)>>>,
    next_id: Arc<AtomicI64>,
}

impl MockThreadStore {
    pub fn vote_rows(&self, thread_id: i64) -> Vec<(String, i32)> {
        self.votes
            .lock()
            .unwrap()
            .iter()
            .filter(|(id, _, _)| *id == thread_id)
            .map(|(_, nickname, vote)| (nickname.clone(), *vote))
            .collect()
    }

    pub fn count(&self) -> usize {
        self.threads.lock().unwrap().len()
    }

    fn find(&self, key: &ThreadKey) -> Option<Thread> {
        let threads = self.threads.lock().unwrap();
        match key {
            ThreadKey::Id(id) => threads.iter().find(|t| t.id == *id).cloned(),
            ThreadKey::Slug(slug) => threads
                .iter()
                .find(|t| t.slug.as_deref() == Some(slug.as_str()))
                .cloned(),
        }
    }
}

#[async_trait]
impl ThreadStore for MockThreadStore {
    async fn insert(&self, forum_slug: &str, thread: &ThreadCreate) -> DomainResult<i64> {
        let mut threads = self.threads.lock().unwrap();
        if let Some(slug) = &thread.slug {
            if threads.iter().any(|t| t.slug.as_ref() == Some(slug)) {
                return Err(DomainError::DataConflict);
            }
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        threads.push(Thread {
            id,
            title: thread.title.clone(),
            author: thread.author.clone(),
            forum: forum_slug.to_string(),
            message: thread.message.clone(),
            votes: 0,
            slug: thread.slug.clone(),
            created: thread.created,
        });
        Ok(id)
    }

    async fn select(&self, key: &ThreadKey) -> DomainResult<Thread> {
        self.find(key).ok_or(DomainError::ThreadNotFound)
    }

    async fn select_by_forum(
        &self,
        forum_slug: &str,
        page: &ThreadPaginator,
    ) -> DomainResult<Vec<Thread>> {
        let mut threads: Vec<Thread> = self
            .threads
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.forum == forum_slug)
            .filter(|t| match (&page.since, page.direction) {
                (None, _) => true,
                (Some(since), Direction::Ascending) => t.created >= *since,
                (Some(since), Direction::Descending) => t.created <= *since,
            })
            .cloned()
            .collect();
        threads.sort_by_key(|t| t.created);
        if page.direction == Direction::Descending {
            threads.reverse();
        }
        Ok(take_page(threads, page.limit))
    }

    async fn update(&self, key: &ThreadKey, update: &ThreadUpdate) -> DomainResult<Thread> {
        if update.is_empty() {
            return Err(DomainError::EmptyParameters);
        }
        let target = self.find(key).ok_or(DomainError::ThreadNotFound)?;
        let mut threads = self.threads.lock().unwrap();
        let thread = threads
            .iter_mut()
            .find(|t| t.id == target.id)
            .ok_or(DomainError::ThreadNotFound)?;
        if let Some(title) = &update.title {
            thread.title = title.clone();
        }
        if let Some(message) = &update.message {
            thread.message = message.clone();
        }
        Ok(thread.clone())
    }

    async fn upsert_vote(&self, key: &ThreadKey, vote: &ThreadVote) -> DomainResult<()> {
        let target = match key {
            // Mirrors the CTE upsert: a missing slug inserts nothing.
            ThreadKey::Slug(_) => match self.find(key) {
                Some(thread) => thread,
                None => return Ok(()),
            },
            ThreadKey::Id(_) => self.find(key).ok_or(DomainError::DataConflict)?,
        };

        let delta = {
            let mut votes = self.votes.lock().unwrap();
            match votes
                .iter_mut()
                .find(|(id, nickname, _)| *id == target.id && nickname == &vote.nickname)
            {
                Some(row) => {
                    let delta = vote.voice - row.2;
                    row.2 = vote.voice;
                    delta
                }
                None => {
                    votes.push((target.id, vote.nickname.clone(), vote.voice));
                    vote.voice
                }
            }
        };

        let mut threads = self.threads.lock().unwrap();
        if let Some(thread) = threads.iter_mut().find(|t| t.id == target.id) {
            thread.votes += i64::from(delta);
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Posts
// ---------------------------------------------------------------------------

#[derive(Clone)]
struct StoredPost {
    post: Post,
    path: Vec<i64>,
}

/// Post store with the nesting-path paging contract implemented over a
/// plain vector.
#[derive(Clone, Default)]
pub struct MockPostStore {
    posts: Arc<Mutex<Vec<StoredPost>>>,
    users: MockUserStore,
    next_id: Arc<AtomicI64>,
    insert_calls: Arc<AtomicUsize>,
}

impl MockPostStore {
    pub fn new(users: MockUserStore) -> Self {
        Self {
            users,
            ..Default::default()
        }
    }

    pub fn insert_calls(&self) -> usize {
        self.insert_calls.load(Ordering::SeqCst)
    }

    pub fn count(&self) -> usize {
        self.posts.lock().unwrap().len()
    }
}

#[async_trait]
impl PostStore for MockPostStore {
    async fn insert_batch(
        &self,
        thread_id: i64,
        forum_slug: &str,
        posts: &[PostCreate],
    ) -> DomainResult<Vec<Post>> {
        self.insert_calls.fetch_add(1, Ordering::SeqCst);

        for post in posts {
            if !self.users.contains(&post.author) {
                return Err(DomainError::UserNotFound);
            }
        }

        // One batch, one timestamp.
        let created = Utc::now();
        let mut stored = self.posts.lock().unwrap();
        let mut inserted = Vec::with_capacity(posts.len());
        for post in posts {
            let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
            let path = if post.parent == 0 {
                vec![id]
            } else {
                let parent = stored
                    .iter()
                    .find(|p| p.post.id == post.parent)
                    .ok_or(DomainError::DataConflict)?;
                let mut path = parent.path.clone();
                path.push(id);
                path
            };
            let record = Post {
                id,
                parent: post.parent,
                author: post.author.clone(),
                message: post.message.clone(),
                is_edited: false,
                forum: forum_slug.to_string(),
                thread: thread_id,
                created,
            };
            stored.push(StoredPost {
                post: record.clone(),
                path,
            });
            inserted.push(record);
        }
        Ok(inserted)
    }

    async fn select_by_id(&self, post_id: i64) -> DomainResult<Post> {
        self.posts
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.post.id == post_id)
            .map(|p| p.post.clone())
            .ok_or(DomainError::PostNotFound)
    }

    async fn select_page(
        &self,
        thread_id: i64,
        page: &PostPaginator,
    ) -> DomainResult<Vec<Post>> {
        let all = self.posts.lock().unwrap();
        let mut in_thread: Vec<StoredPost> = all
            .iter()
            .filter(|p| p.post.thread == thread_id)
            .cloned()
            .collect();

        let descending = page.direction == Direction::Descending;
        let posts = match page.sort.as_str() {
            "flat" => {
                in_thread.sort_by_key(|p| p.post.id);
                if descending {
                    in_thread.reverse();
                }
                let filtered: Vec<StoredPost> = match page.since {
                    None => in_thread,
                    Some(since) => in_thread
                        .into_iter()
                        .filter(|p| {
                            if descending {
                                p.post.id < since
                            } else {
                                p.post.id > since
                            }
                        })
                        .collect(),
                };
                take_page(filtered, page.limit)
            }
            "tree" => {
                in_thread.sort_by(|a, b| a.path.cmp(&b.path));
                if descending {
                    in_thread.reverse();
                }
                let filtered: Vec<StoredPost> = match page.since {
                    None => in_thread,
                    Some(since) => {
                        // The anchor join yields nothing for a dangling
                        // cursor id.
                        let anchor = match all.iter().find(|p| p.post.id == since) {
                            Some(anchor) => anchor.path.clone(),
                            None => return Ok(Vec::new()),
                        };
                        in_thread
                            .into_iter()
                            .filter(|p| {
                                if descending {
                                    p.path < anchor
                                } else {
                                    p.path > anchor
                                }
                            })
                            .collect()
                    }
                };
                take_page(filtered, page.limit)
            }
            "parent_tree" => {
                let mut roots: Vec<i64> = in_thread
                    .iter()
                    .filter(|p| p.post.parent == 0)
                    .map(|p| p.post.id)
                    .collect();
                roots.sort_unstable();
                if descending {
                    roots.reverse();
                }
                if let Some(since) = page.since {
                    let anchor_root = match all.iter().find(|p| p.post.id == since) {
                        Some(anchor) => anchor.path[0],
                        None => return Ok(Vec::new()),
                    };
                    // Root selection is inclusive of the cursor's own
                    // subtree root.
                    roots.retain(|root| {
                        if descending {
                            *root <= anchor_root
                        } else {
                            *root >= anchor_root
                        }
                    });
                }
                let roots = take_page(roots, page.limit);

                let mut result = Vec::new();
                for root in roots {
                    let mut subtree: Vec<StoredPost> = in_thread
                        .iter()
                        .filter(|p| p.path[0] == root)
                        .cloned()
                        .collect();
                    // Subtrees always read root-down.
                    subtree.sort_by(|a, b| a.path.cmp(&b.path));
                    result.extend(subtree);
                }
                result
            }
            _ => return Err(DomainError::PostNotFound),
        };

        Ok(posts.into_iter().map(|p| p.post).collect())
    }

    async fn update_message(&self, post_id: i64, update: &PostUpdate) -> DomainResult<()> {
        let message = match update.message.as_deref() {
            Some(message) if !message.is_empty() => message.to_string(),
            _ => return Ok(()),
        };
        let mut posts = self.posts.lock().unwrap();
        let post = posts
            .iter_mut()
            .find(|p| p.post.id == post_id)
            .ok_or(DomainError::PostNotFound)?;
        post.post.message = message;
        post.post.is_edited = true;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub fn user(nickname: &str) -> User {
    User {
        nickname: nickname.to_string(),
        fullname: format!("{nickname} fullname"),
        about: None,
        email: format!("{nickname}@example.com"),
    }
}

pub fn forum(slug: &str, author: &str) -> Forum {
    Forum {
        title: format!("{slug} forum"),
        author: author.to_string(),
        slug: slug.to_string(),
        posts: 0,
        threads: 0,
    }
}

pub fn thread_create(author: &str, slug: Option<&str>) -> ThreadCreate {
    ThreadCreate {
        title: "a thread".to_string(),
        author: author.to_string(),
        message: "first".to_string(),
        created: Utc::now(),
        slug: slug.map(str::to_string),
    }
}

pub fn post_create(author: &str, parent: i64) -> PostCreate {
    PostCreate {
        parent,
        author: author.to_string(),
        message: "a post".to_string(),
    }
}
