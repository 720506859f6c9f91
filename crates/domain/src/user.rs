//! Catalog user accounts.
//!
//! Credentials are issued by the upstream auth service; this crate only
//! stores the returned hash and salt.

use chrono::{DateTime, Utc};
use movify_core::{AppError, AppResult, Role};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ids::UserId;

/// Longest accepted login.
pub const LOGIN_MAX_LENGTH: usize = 64;

/// Validated email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Creates a validated, lowercased email address.
    ///
    /// Requires exactly one `@`, a non-empty local part and a domain with at
    /// least one `.`.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        let normalized = value.trim().to_lowercase();

        if normalized.is_empty() {
            return Err(AppError::Validation(
                "email address must not be empty".to_owned(),
            ));
        }

        let Some((local, domain)) = normalized.split_once('@') else {
            return Err(AppError::Validation(
                "email address must contain exactly one '@'".to_owned(),
            ));
        };

        if local.is_empty() {
            return Err(AppError::Validation(
                "email local part must not be empty".to_owned(),
            ));
        }

        if domain.contains('@') {
            return Err(AppError::Validation(
                "email address must contain exactly one '@'".to_owned(),
            ));
        }

        if domain.is_empty() || !domain.contains('.') {
            return Err(AppError::Validation(
                "email domain must contain at least one '.'".to_owned(),
            ));
        }

        if normalized.len() > 254 {
            return Err(AppError::Validation(
                "email address must not exceed 254 characters".to_owned(),
            ));
        }

        Ok(Self(normalized))
    }

    /// Returns the validated email string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

/// Validates and trims a login name.
pub fn validate_login(login: &str) -> AppResult<String> {
    let trimmed = login.trim();

    if trimmed.is_empty() {
        return Err(AppError::Validation("login must not be empty".to_owned()));
    }

    if trimmed.chars().count() > LOGIN_MAX_LENGTH {
        return Err(AppError::Validation(format!(
            "login must not exceed {LOGIN_MAX_LENGTH} characters"
        )));
    }

    Ok(trimmed.to_owned())
}

/// Registered catalog user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// User identifier.
    pub id: UserId,
    /// Unique login name.
    pub login: String,
    /// Given name.
    pub first_name: Option<String>,
    /// Family name.
    pub last_name: Option<String>,
    /// Unique normalized email.
    pub email: String,
    /// Password hash issued by the auth service.
    pub password_hash: String,
    /// Password salt issued by the auth service.
    pub password_salt: String,
    /// Access level.
    pub role: Role,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    /// Login name.
    pub login: String,
    /// Given name.
    pub first_name: Option<String>,
    /// Family name.
    pub last_name: Option<String>,
    /// Email address.
    pub email: String,
    /// Password hash issued by the auth service.
    pub password_hash: String,
    /// Password salt issued by the auth service.
    pub password_salt: String,
    /// Access level.
    pub role: Role,
}

/// Partial update; `None` fields keep the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    /// New login.
    pub login: Option<String>,
    /// New given name.
    pub first_name: Option<String>,
    /// New family name.
    pub last_name: Option<String>,
    /// New email.
    pub email: Option<String>,
    /// New access level.
    pub role: Option<Role>,
}

impl User {
    /// Builds a user from validated input.
    pub fn create(input: NewUser, now: DateTime<Utc>) -> AppResult<Self> {
        let login = validate_login(&input.login)?;
        let email = EmailAddress::new(input.email)?;

        Ok(Self {
            id: UserId::new(),
            login,
            first_name: input.first_name,
            last_name: input.last_name,
            email: email.into(),
            password_hash: input.password_hash,
            password_salt: input.password_salt,
            role: input.role,
            created_at: now,
            updated_at: now,
        })
    }

    /// Merges present patch fields into this user.
    pub fn apply_patch(&mut self, patch: UserPatch, now: DateTime<Utc>) -> AppResult<()> {
        let login = patch.login.as_deref().map(validate_login).transpose()?;
        let email = patch.email.map(EmailAddress::new).transpose()?;

        if let Some(login) = login {
            self.login = login;
        }
        if patch.first_name.is_some() {
            self.first_name = patch.first_name;
        }
        if patch.last_name.is_some() {
            self.last_name = patch.last_name;
        }
        if let Some(email) = email {
            self.email = email.into();
        }
        if let Some(role) = patch.role {
            self.role = role;
        }

        self.updated_at = now;
        Ok(())
    }

    /// Replaces the stored credentials.
    pub fn replace_credentials(
        &mut self,
        password_hash: String,
        password_salt: String,
        now: DateTime<Utc>,
    ) {
        self.password_hash = password_hash;
        self.password_salt = password_salt;
        self.updated_at = now;
    }
}

/// Field a user search is keyed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserSearchType {
    /// Search by identifier.
    Id,
    /// Search by login.
    Login,
    /// Search by email.
    Email,
}

/// Resolved user lookup, one variant per unique field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserLookup {
    /// Lookup by identifier.
    Id(UserId),
    /// Lookup by login.
    Login(String),
    /// Lookup by email.
    Email(EmailAddress),
}

impl UserLookup {
    /// Builds a lookup from a search type and the matching field.
    pub fn from_search(
        search_type: UserSearchType,
        user_id: Option<Uuid>,
        login: Option<String>,
        email: Option<String>,
    ) -> AppResult<Self> {
        match search_type {
            UserSearchType::Id => user_id
                .map(|value| Self::Id(UserId::from_uuid(value)))
                .ok_or_else(|| missing_search_field("user_id")),
            UserSearchType::Login => {
                let login = login.ok_or_else(|| missing_search_field("login"))?;
                Ok(Self::Login(validate_login(&login)?))
            }
            UserSearchType::Email => {
                let email = email.ok_or_else(|| missing_search_field("email"))?;
                Ok(Self::Email(EmailAddress::new(email)?))
            }
        }
    }

    /// Returns whether `user` is the one this lookup designates.
    #[must_use]
    pub fn matches(&self, user: &User) -> bool {
        match self {
            Self::Id(id) => user.id == *id,
            Self::Login(login) => user.login == *login,
            Self::Email(email) => user.email == email.as_str(),
        }
    }
}

impl std::fmt::Display for UserLookup {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Id(id) => write!(formatter, "id '{id}'"),
            Self::Login(login) => write!(formatter, "login '{login}'"),
            Self::Email(email) => write!(formatter, "email '{}'", email.as_str()),
        }
    }
}

fn missing_search_field(field: &str) -> AppError {
    AppError::Validation(format!("{field} is required for this search type"))
}
