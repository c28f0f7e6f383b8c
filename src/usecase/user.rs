use crate::errors::{DomainError, DomainResult};
use crate::models::{User, UserUpdate};
use crate::pagination::UserPaginator;
use crate::storage::{ForumStore, UserStore};

/// Outcome of user creation. A nickname/email collision reports every
/// colliding row (there may be two: one per key).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NewUser {
    Created(User),
    Conflict(Vec<User>),
}

pub struct UserUseCase<U, F> {
    users: U,
    forums: F,
}

impl<U: UserStore, F: ForumStore> UserUseCase<U, F> {
    pub fn new(users: U, forums: F) -> Self {
        Self { users, forums }
    }

    pub async fn create(&self, user: User) -> DomainResult<NewUser> {
        match self.users.insert(&user).await {
            Ok(()) => Ok(NewUser::Created(user)),
            Err(DomainError::DataConflict) => {
                let existing = self
                    .users
                    .select_by_nickname_or_email(&user.nickname, &user.email)
                    .await
                    .map_err(|_| DomainError::Internal)?;
                Ok(NewUser::Conflict(existing))
            }
            Err(_) => Err(DomainError::Internal),
        }
    }

    pub async fn profile(&self, nickname: &str) -> DomainResult<User> {
        self.users
            .select_by_nickname(nickname)
            .await
            .map_err(|_| DomainError::UserNotFound)
    }

    pub async fn by_forum(
        &self,
        forum_slug: &str,
        page: &UserPaginator,
    ) -> DomainResult<Vec<User>> {
        self.forums
            .select_by_slug(forum_slug)
            .await
            .map_err(|_| DomainError::ForumNotFound)?;

        match self.users.select_by_forum(forum_slug, page).await {
            Ok(users) => Ok(users),
            Err(DomainError::UserNotFound) => Err(DomainError::UserNotFound),
            Err(_) => Err(DomainError::Internal),
        }
    }

    pub async fn update_profile(
        &self,
        nickname: &str,
        update: UserUpdate,
    ) -> DomainResult<User> {
        let mut current = self
            .users
            .select_by_nickname(nickname)
            .await
            .map_err(|_| DomainError::UserNotFound)?;

        match self.users.update_profile(nickname, &update).await {
            Ok(()) => {
                if let Some(email) = update.email {
                    current.email = email;
                }
                if let Some(fullname) = update.fullname {
                    current.fullname = fullname;
                }
                if let Some(about) = update.about {
                    current.about = Some(about);
                }
                Ok(current)
            }
            Err(DomainError::UserNotFound) => Err(DomainError::UserNotFound),
            Err(DomainError::DataConflict) => Err(DomainError::AlreadyExists),
            Err(_) => Err(DomainError::Internal),
        }
    }
}
