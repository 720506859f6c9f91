use chrono::{DateTime, Utc};
use movify_core::{AppResult, Role};
use movify_domain::{NewUser, User, UserLookup, UserPatch, UserSearchType};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lookup by one of the user's unique fields.
#[derive(Debug, Deserialize)]
pub struct SearchUserRequest {
    pub search_type: UserSearchType,
    pub user_id: Option<Uuid>,
    pub login: Option<String>,
    pub email: Option<String>,
}

impl SearchUserRequest {
    pub fn into_lookup(self) -> AppResult<UserLookup> {
        UserLookup::from_search(self.search_type, self.user_id, self.login, self.email)
    }
}

/// Incoming payload for admin-created users.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub login: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: String,
    pub password_hash: String,
    pub password_salt: String,
    pub role: Role,
}

impl From<CreateUserRequest> for NewUser {
    fn from(value: CreateUserRequest) -> Self {
        Self {
            login: value.login,
            first_name: value.first_name,
            last_name: value.last_name,
            email: value.email,
            password_hash: value.password_hash,
            password_salt: value.password_salt,
            role: value.role,
        }
    }
}

/// Incoming payload for a partial user update.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateUserRequest {
    pub login: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub role: Option<Role>,
}

impl From<UpdateUserRequest> for UserPatch {
    fn from(value: UpdateUserRequest) -> Self {
        Self {
            login: value.login,
            first_name: value.first_name,
            last_name: value.last_name,
            email: value.email,
            role: value.role,
        }
    }
}

/// API representation of a user. Stored credentials are never exposed.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub login: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(value: User) -> Self {
        Self {
            id: value.id.as_uuid(),
            login: value.login,
            first_name: value.first_name,
            last_name: value.last_name,
            email: value.email,
            role: value.role,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}
