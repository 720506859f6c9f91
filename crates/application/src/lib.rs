//! Application services and ports.

#![forbid(unsafe_code)]

mod auth_service;
mod clock;
mod content_service;
mod episode_service;
mod login_attempt_service;
mod personal_list_service;
mod user_service;

#[cfg(test)]
mod test_support;

pub use auth_service::{
    AuthGateway, AuthService, GatewayLoginRequest, GatewayRegisterRequest, IssuedCredentials,
    LOGIN_BLOCKED_MESSAGE, LOGIN_FAILED_MESSAGE, LoginInput, LoginResult, PasswordResetInput,
    RegisterInput, RegistrationResult,
};
pub use clock::{Clock, SystemClock};
pub use content_service::{ContentRepository, ContentService};
pub use episode_service::{EpisodeRepository, EpisodeService};
pub use login_attempt_service::{AttemptLedger, LedgerWrite, LoginAttemptGuard, MAX_WRITE_ROUNDS};
pub use personal_list_service::{PersonalListRepository, PersonalListService};
pub use user_service::{UserRepository, UserService};
