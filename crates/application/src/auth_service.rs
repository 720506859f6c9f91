//! Authentication forwarding to the upstream auth service.
//!
//! Credentials never stay in this service: the gateway checks them and
//! issues tokens. Login attempts are charged to the caller's client key
//! before the upstream call and reset only after a confirmed success.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use movify_core::{AppError, AppResult, Principal, Role};
use movify_domain::{ClientKey, EmailAddress, NewUser, UserId, UserLookup, validate_login};

use crate::{LoginAttemptGuard, UserService};

mod login;
mod registration;


/// Message returned for any failed login that is not rate limited.
pub const LOGIN_FAILED_MESSAGE: &str = "please try again";

/// Message returned once a client has exhausted its login allowance.
pub const LOGIN_BLOCKED_MESSAGE: &str = "max amount of attempts is reached";

// ---------------------------------------------------------------------------
// Ports
// ---------------------------------------------------------------------------

/// Login request forwarded to the auth service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayLoginRequest {
    /// Account email.
    pub email: String,
    /// Plaintext password supplied by the caller.
    pub password: String,
    /// Stored password hash.
    pub password_hash: String,
    /// Stored password salt.
    pub password_salt: String,
    /// Account role embedded into the token.
    pub role: Role,
}

/// Registration request forwarded to the auth service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayRegisterRequest {
    /// Account email.
    pub email: String,
    /// Plaintext password to hash.
    pub password: String,
    /// Account role embedded into the token.
    pub role: Role,
}

/// Token and credentials issued by the auth service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedCredentials {
    /// Access token.
    pub token: String,
    /// Password hash to store.
    pub password_hash: String,
    /// Password salt to store.
    pub password_salt: String,
}

/// Port for the upstream token-issuing auth service.
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Verifies credentials and returns an access token.
    async fn login_user(&self, request: GatewayLoginRequest) -> AppResult<String>;

    /// Hashes a new password and returns a token with the stored credentials.
    async fn register_user(&self, request: GatewayRegisterRequest)
    -> AppResult<IssuedCredentials>;

    /// Resolves a token into its claims.
    async fn validate_token(&self, token: &str) -> AppResult<Principal>;
}

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Parameters for a login.
#[derive(Debug, Clone)]
pub struct LoginInput {
    /// Account to log into, by login or email.
    pub lookup: UserLookup,
    /// Plaintext password.
    pub password: String,
    /// Caller's client identifier for attempt tracking.
    pub client_key: ClientKey,
}

/// Successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginResult {
    /// Logged-in user.
    pub user_id: UserId,
    /// User's login.
    pub login: String,
    /// User's email.
    pub email: String,
    /// User's role.
    pub role: Role,
    /// Issued access token.
    pub token: String,
}

/// Parameters for registration.
#[derive(Debug, Clone)]
pub struct RegisterInput {
    /// Desired login.
    pub login: String,
    /// Account email.
    pub email: String,
    /// Plaintext password.
    pub password: String,
    /// Given name.
    pub first_name: Option<String>,
    /// Family name.
    pub last_name: Option<String>,
    /// Requested role.
    pub role: Role,
}

/// Parameters for a password reset.
#[derive(Debug, Clone)]
pub struct PasswordResetInput {
    /// Account email.
    pub email: String,
    /// New plaintext password.
    pub password: String,
}

/// Successful registration or password reset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationResult {
    /// Registered user.
    pub user_id: UserId,
    /// User's login.
    pub login: String,
    /// User's email.
    pub email: String,
    /// Issued access token.
    pub token: String,
}

// ---------------------------------------------------------------------------
// Service
// ---------------------------------------------------------------------------

/// Application service forwarding authentication to the auth service.
#[derive(Clone)]
pub struct AuthService {
    gateway: Arc<dyn AuthGateway>,
    users: UserService,
    attempts: LoginAttemptGuard,
}

impl AuthService {
    /// Creates a new auth service.
    #[must_use]
    pub fn new(
        gateway: Arc<dyn AuthGateway>,
        users: UserService,
        attempts: LoginAttemptGuard,
    ) -> Self {
        Self {
            gateway,
            users,
            attempts,
        }
    }

    /// Resolves a bearer token into a principal holding at least `required`.
    pub async fn authorize(&self, token: &str, required: Role) -> AppResult<Principal> {
        let token = token.trim();
        let token = token
            .strip_prefix("Bearer")
            .filter(|rest| rest.is_empty() || rest.starts_with(' '))
            .unwrap_or(token)
            .trim();
        if token.is_empty() {
            return Err(AppError::Unauthorized("missing access token".to_owned()));
        }

        let principal = self.gateway.validate_token(token).await?;
        if !principal.role().satisfies(required) {
            warn!(role = %principal.role(), required = %required, "insufficient role");
            return Err(AppError::Forbidden(format!("{required} role is required")));
        }

        Ok(principal)
    }
}

fn validate_password(password: &str) -> AppResult<()> {
    if password.is_empty() {
        return Err(AppError::Validation("password must not be empty".to_owned()));
    }

    Ok(())
}
