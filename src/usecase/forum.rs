use crate::errors::{DomainError, DomainResult};
use crate::models::{Forum, ForumCreate};
use crate::storage::{ForumStore, UserStore};
use crate::usecase::Created;

pub struct ForumUseCase<F, U> {
    forums: F,
    users: U,
}

impl<F: ForumStore, U: UserStore> ForumUseCase<F, U> {
    pub fn new(forums: F, users: U) -> Self {
        Self { forums, users }
    }

    /// Creates a forum; the author must exist and the stored casing of
    /// their nickname wins over the request's.
    pub async fn create(&self, mut forum: ForumCreate) -> DomainResult<Created<Forum>> {
        let author = self
            .users
            .select_by_nickname(&forum.author)
            .await
            .map_err(|_| DomainError::UserNotFound)?;
        forum.author = author.nickname;

        match self.forums.insert(&forum).await {
            Ok(()) => Ok(Created::New(Forum {
                title: forum.title,
                author: forum.author,
                slug: forum.slug,
                posts: 0,
                threads: 0,
            })),
            Err(DomainError::DataConflict) => {
                let existing = self
                    .forums
                    .select_by_slug(&forum.slug)
                    .await
                    .map_err(|_| DomainError::Internal)?;
                Ok(Created::Existing(existing))
            }
            Err(_) => Err(DomainError::Internal),
        }
    }

    pub async fn details(&self, slug: &str) -> DomainResult<Forum> {
        self.forums
            .select_by_slug(slug)
            .await
            .map_err(|_| DomainError::ForumNotFound)
    }
}
