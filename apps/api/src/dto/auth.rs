use movify_application::{LoginResult, RegistrationResult};
use movify_core::{AppError, AppResult, Role};
use movify_domain::{EmailAddress, UserLookup, validate_login};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Login by login name or email.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub login: Option<String>,
    pub email: Option<String>,
    pub password: String,
}

impl LoginRequest {
    /// Resolves which account the caller names. A login wins over an email.
    pub fn lookup(&self) -> AppResult<UserLookup> {
        if let Some(login) = self.login.as_deref().filter(|value| !value.trim().is_empty()) {
            return Ok(UserLookup::Login(validate_login(login)?));
        }

        match self.email.as_deref() {
            Some(email) if !email.trim().is_empty() => {
                Ok(UserLookup::Email(EmailAddress::new(email)?))
            }
            _ => Err(AppError::Validation(
                "login or email is required".to_owned(),
            )),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user_id: Uuid,
    pub login: String,
    pub email: String,
    pub role: Role,
    pub token: String,
}

impl From<LoginResult> for LoginResponse {
    fn from(value: LoginResult) -> Self {
        Self {
            user_id: value.user_id.as_uuid(),
            login: value.login,
            email: value.email,
            role: value.role,
            token: value.token,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub login: String,
    pub email: String,
    pub password: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PasswordResetRequest {
    pub email: String,
    pub password: String,
}

/// Registration and password reset share this response shape.
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub user_id: Uuid,
    pub login: String,
    pub email: String,
    pub token: String,
}

impl From<RegistrationResult> for RegisterResponse {
    fn from(value: RegistrationResult) -> Self {
        Self {
            user_id: value.user_id.as_uuid(),
            login: value.login,
            email: value.email,
            token: value.token,
        }
    }
}

#[cfg(test)]
mod tests {
    use movify_domain::UserLookup;

    use super::LoginRequest;

    fn request(login: Option<&str>, email: Option<&str>) -> LoginRequest {
        LoginRequest {
            login: login.map(ToOwned::to_owned),
            email: email.map(ToOwned::to_owned),
            password: "pw".to_owned(),
        }
    }

    #[test]
    fn login_takes_precedence_over_email() {
        let lookup = request(Some("bucky"), Some("bucky@example.com"))
            .lookup()
            .unwrap_or_else(|_| panic!("test"));
        assert_eq!(lookup, UserLookup::Login("bucky".to_owned()));
    }

    #[test]
    fn blank_login_falls_back_to_email() {
        let lookup = request(Some("  "), Some("Bucky@Example.com"))
            .lookup()
            .unwrap_or_else(|_| panic!("test"));
        assert!(matches!(lookup, UserLookup::Email(email) if email.as_str() == "bucky@example.com"));
    }

    #[test]
    fn missing_identifier_is_rejected() {
        assert!(request(None, None).lookup().is_err());
        assert!(request(None, Some("")).lookup().is_err());
    }
}
