use crate::errors::{DomainError, DomainResult};
use crate::models::{Post, PostCreate, PostDetails, PostUpdate, Related, ThreadKey};
use crate::pagination::PostPaginator;
use crate::storage::{ForumStore, PostStore, ThreadStore, UserStore};

pub struct PostUseCase<P, T, F, U> {
    posts: P,
    threads: T,
    forums: F,
    users: U,
}

impl<P, T, F, U> PostUseCase<P, T, F, U>
where
    P: PostStore,
    T: ThreadStore,
    F: ForumStore,
    U: UserStore,
{
    pub fn new(posts: P, threads: T, forums: F, users: U) -> Self {
        Self {
            posts,
            threads,
            forums,
            users,
        }
    }

    /// Creates a batch of posts in one thread. Thread existence is
    /// checked before the empty-batch short-circuit, so an absent
    /// thread fails even for zero posts.
    pub async fn create(
        &self,
        thread_slug_or_id: &str,
        posts: Vec<PostCreate>,
    ) -> DomainResult<Vec<Post>> {
        let key = ThreadKey::parse(thread_slug_or_id)?;
        let thread = self
            .threads
            .select(&key)
            .await
            .map_err(|_| DomainError::ThreadNotFound)?;

        if posts.is_empty() {
            return Ok(Vec::new());
        }

        match self.posts.insert_batch(thread.id, &thread.forum, &posts).await {
            Ok(created) => Ok(created),
            Err(DomainError::UserNotFound) => Err(DomainError::UserNotFound),
            Err(_) => Err(DomainError::PostNotFound),
        }
    }

    pub async fn details(&self, post_id: i64, related: Related) -> DomainResult<PostDetails> {
        let post = self
            .posts
            .select_by_id(post_id)
            .await
            .map_err(|_| DomainError::PostNotFound)?;

        let mut details = PostDetails {
            post,
            author: None,
            thread: None,
            forum: None,
        };

        if related.user {
            let author = self
                .users
                .select_by_nickname(&details.post.author)
                .await
                .map_err(|_| DomainError::UserNotFound)?;
            details.author = Some(author);
        }
        if related.thread {
            let thread = self
                .threads
                .select(&ThreadKey::Id(details.post.thread))
                .await
                .map_err(|_| DomainError::ThreadNotFound)?;
            details.thread = Some(thread);
        }
        if related.forum {
            let forum = self
                .forums
                .select_by_slug(&details.post.forum)
                .await
                .map_err(|_| DomainError::ForumNotFound)?;
            details.forum = Some(forum);
        }

        Ok(details)
    }

    /// Lists one page of a thread's posts under the requested sort
    /// mode. An unknown mode propagates as `PostNotFound` from the
    /// planner; any other storage failure reads as the thread having
    /// vanished between the two round-trips.
    pub async fn by_thread(
        &self,
        thread_slug_or_id: &str,
        page: &PostPaginator,
    ) -> DomainResult<Vec<Post>> {
        let key = ThreadKey::parse(thread_slug_or_id)?;
        let thread = self
            .threads
            .select(&key)
            .await
            .map_err(|_| DomainError::ThreadNotFound)?;

        match self.posts.select_page(thread.id, page).await {
            Ok(posts) => Ok(posts),
            Err(DomainError::PostNotFound) => Err(DomainError::PostNotFound),
            Err(_) => Err(DomainError::ThreadNotFound),
        }
    }

    /// Partial message update. An absent, empty, or identical message
    /// returns the current record unchanged.
    pub async fn update(&self, post_id: i64, update: PostUpdate) -> DomainResult<Post> {
        let mut current = self
            .posts
            .select_by_id(post_id)
            .await
            .map_err(|_| DomainError::PostNotFound)?;

        let message = match update.message.as_deref() {
            Some(message) if !message.is_empty() && message != current.message => {
                message.to_string()
            }
            _ => return Ok(current),
        };

        self.posts
            .update_message(post_id, &PostUpdate {
                message: Some(message.clone()),
            })
            .await
            .map_err(|_| DomainError::PostNotFound)?;

        current.message = message;
        current.is_edited = true;
        Ok(current)
    }
}
