//! User account ports and application service.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use movify_core::{AppError, AppResult, Role};
use movify_domain::{EmailAddress, NewUser, User, UserId, UserLookup, UserPatch};

use crate::Clock;

mod management;
mod retrieval;


// ---------------------------------------------------------------------------
// Ports
// ---------------------------------------------------------------------------

/// Repository port for user persistence.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Finds the user designated by `lookup`.
    async fn find(&self, lookup: &UserLookup) -> AppResult<Option<User>>;

    /// Inserts a new user. Duplicate login or email is a conflict.
    async fn insert(&self, user: &User) -> AppResult<()>;

    /// Overwrites a stored user. Duplicate login or email is a conflict.
    async fn save(&self, user: &User) -> AppResult<()>;

    /// Deletes a user and their personal list. Returns whether one existed.
    async fn delete(&self, user_id: UserId) -> AppResult<bool>;
}

// ---------------------------------------------------------------------------
// Service
// ---------------------------------------------------------------------------

/// Application service for catalog user accounts.
#[derive(Clone)]
pub struct UserService {
    repository: Arc<dyn UserRepository>,
    clock: Arc<dyn Clock>,
}

impl UserService {
    /// Creates a new user service.
    #[must_use]
    pub fn new(repository: Arc<dyn UserRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    async fn require(&self, lookup: &UserLookup) -> AppResult<User> {
        self.repository
            .find(lookup)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("user with {lookup} does not exist")))
    }

    // Checks uniqueness up front so callers get a precise message; the
    // repository still enforces it.
    async fn ensure_unique(&self, user: &User) -> AppResult<()> {
        if let Some(existing) = self
            .repository
            .find(&UserLookup::Login(user.login.clone()))
            .await?
            && existing.id != user.id
        {
            return Err(AppError::Conflict(format!(
                "login '{}' is already taken",
                user.login
            )));
        }

        let email = EmailAddress::new(user.email.as_str())?;
        if let Some(existing) = self.repository.find(&UserLookup::Email(email)).await?
            && existing.id != user.id
        {
            return Err(AppError::Conflict(format!(
                "email '{}' is already registered",
                user.email
            )));
        }

        Ok(())
    }
}
