use super::*;

impl AuthService {
    /// Registers a user with credentials issued by the auth service.
    pub async fn register(&self, input: RegisterInput) -> AppResult<RegistrationResult> {
        let login = validate_login(&input.login)?;
        let email = EmailAddress::new(input.email)?;
        validate_password(&input.password)?;

        if self
            .users
            .find_optional(&UserLookup::Login(login.clone()))
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(format!("login '{login}' is already taken")));
        }

        if self
            .users
            .find_optional(&UserLookup::Email(email.clone()))
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(format!(
                "email '{}' is already registered",
                email.as_str()
            )));
        }

        let issued = self
            .gateway
            .register_user(GatewayRegisterRequest {
                email: email.as_str().to_owned(),
                password: input.password,
                role: input.role,
            })
            .await?;

        let user = self
            .users
            .create(NewUser {
                login,
                first_name: input.first_name,
                last_name: input.last_name,
                email: email.into(),
                password_hash: issued.password_hash,
                password_salt: issued.password_salt,
                role: input.role,
            })
            .await?;

        Ok(RegistrationResult {
            user_id: user.id,
            login: user.login,
            email: user.email,
            token: issued.token,
        })
    }

    /// Replaces a user's password with credentials issued by the auth service.
    pub async fn reset_password(&self, input: PasswordResetInput) -> AppResult<RegistrationResult> {
        let email = EmailAddress::new(input.email)?;
        validate_password(&input.password)?;

        let user = self
            .users
            .find(&UserLookup::Email(email.clone()))
            .await?;

        let issued = self
            .gateway
            .register_user(GatewayRegisterRequest {
                email: email.as_str().to_owned(),
                password: input.password,
                role: user.role,
            })
            .await?;

        let user = self
            .users
            .update_credentials(email.as_str(), issued.password_hash, issued.password_salt)
            .await?;

        Ok(RegistrationResult {
            user_id: user.id,
            login: user.login,
            email: user.email,
            token: issued.token,
        })
    }
}
