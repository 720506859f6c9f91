//! PostgreSQL-backed user repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use movify_application::UserRepository;
use movify_core::{AppError, AppResult, Role};
use movify_domain::{User, UserId, UserLookup};

/// PostgreSQL implementation of the user repository port.
#[derive(Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: uuid::Uuid,
    login: String,
    first_name: Option<String>,
    last_name: Option<String>,
    email: String,
    password_hash: String,
    password_salt: String,
    role: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = AppError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let role = row.role.parse::<Role>().map_err(|_| {
            AppError::Internal(format!("user '{}' has unknown role '{}'", row.id, row.role))
        })?;

        Ok(Self {
            id: UserId::from_uuid(row.id),
            login: row.login,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            password_hash: row.password_hash,
            password_salt: row.password_salt,
            role,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

mod account;
mod lookup;


#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find(&self, lookup: &UserLookup) -> AppResult<Option<User>> {
        self.find_impl(lookup).await
    }

    async fn insert(&self, user: &User) -> AppResult<()> {
        self.insert_impl(user).await
    }

    async fn save(&self, user: &User) -> AppResult<()> {
        self.save_impl(user).await
    }

    async fn delete(&self, user_id: UserId) -> AppResult<bool> {
        self.delete_impl(user_id).await
    }
}

fn login_or_email_conflict_or_internal(error: sqlx::Error, operation: &str) -> AppError {
    if let sqlx::Error::Database(ref database_error) = error
        && database_error.code().as_deref() == Some("23505")
    {
        return AppError::Conflict(
            "an account with this login or email already exists".to_owned(),
        );
    }

    AppError::Internal(format!("failed to {operation}: {error}"))
}
