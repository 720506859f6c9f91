use super::*;

impl AuthService {
    /// Logs a user in through the auth service.
    ///
    /// Blocked clients are rejected before anything is charged or forwarded.
    /// Every other attempt is charged first; upstream failures are reported
    /// uniformly so callers cannot tell bad credentials from unknown accounts.
    pub async fn login(&self, input: LoginInput) -> AppResult<LoginResult> {
        let client_key = input.client_key;

        if self.attempts.is_blocked(&client_key).await? {
            return Err(AppError::RateLimited(LOGIN_BLOCKED_MESSAGE.to_owned()));
        }

        let user = self.users.find_optional(&input.lookup).await?;

        if self.attempts.register_attempt(&client_key).await? {
            return Err(AppError::RateLimited(LOGIN_BLOCKED_MESSAGE.to_owned()));
        }

        let Some(user) = user else {
            return Err(self.failed_login(&client_key).await);
        };

        let request = GatewayLoginRequest {
            email: user.email.clone(),
            password: input.password,
            password_hash: user.password_hash.clone(),
            password_salt: user.password_salt.clone(),
            role: user.role,
        };

        match self.gateway.login_user(request).await {
            Ok(token) => {
                self.attempts.reset(&client_key).await?;
                info!(user_id = %user.id, "login succeeded");

                Ok(LoginResult {
                    user_id: user.id,
                    login: user.login,
                    email: user.email,
                    role: user.role,
                    token,
                })
            }
            Err(error) => {
                warn!(user_id = %user.id, client_key = %client_key, error = %error, "upstream login rejected");
                Err(self.failed_login(&client_key).await)
            }
        }
    }

    async fn failed_login(&self, client_key: &ClientKey) -> AppError {
        match self.attempts.is_blocked(client_key).await {
            Ok(true) => AppError::RateLimited(LOGIN_BLOCKED_MESSAGE.to_owned()),
            Ok(false) => AppError::Unauthorized(LOGIN_FAILED_MESSAGE.to_owned()),
            Err(error) => error,
        }
    }
}
