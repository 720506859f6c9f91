use super::*;

impl UserService {
    /// Creates a user. Duplicate login or email is a conflict.
    pub async fn create(&self, input: NewUser) -> AppResult<User> {
        let user = User::create(input, self.clock.now())?;
        self.ensure_unique(&user).await?;
        self.repository.insert(&user).await?;

        info!(user_id = %user.id, role = %user.role, "user created");
        Ok(user)
    }

    /// Applies a partial update to a user.
    pub async fn update(&self, user_id: UserId, patch: UserPatch) -> AppResult<User> {
        let mut user = self.require(&UserLookup::Id(user_id)).await?;
        user.apply_patch(patch, self.clock.now())?;
        self.ensure_unique(&user).await?;
        self.repository.save(&user).await?;

        Ok(user)
    }

    /// Stores freshly issued credentials for the user registered with `email`.
    pub async fn update_credentials(
        &self,
        email: &str,
        password_hash: String,
        password_salt: String,
    ) -> AppResult<User> {
        let email = EmailAddress::new(email)?;
        let mut user = self.require(&UserLookup::Email(email)).await?;
        user.replace_credentials(password_hash, password_salt, self.clock.now());
        self.repository.save(&user).await?;

        info!(user_id = %user.id, "user credentials replaced");
        Ok(user)
    }

    /// Deletes a user.
    pub async fn delete(&self, user_id: UserId) -> AppResult<()> {
        if !self.repository.delete(user_id).await? {
            return Err(AppError::NotFound(format!("user '{user_id}' does not exist")));
        }

        info!(user_id = %user_id, "user deleted");
        Ok(())
    }

    /// Grants the admin role to a user.
    pub async fn grant_admin(&self, user_id: UserId) -> AppResult<User> {
        let mut user = self.require(&UserLookup::Id(user_id)).await?;
        if user.role == Role::Admin {
            return Ok(user);
        }

        user.apply_patch(
            UserPatch {
                role: Some(Role::Admin),
                ..UserPatch::default()
            },
            self.clock.now(),
        )?;
        self.repository.save(&user).await?;

        info!(user_id = %user.id, "admin role granted");
        Ok(user)
    }
}
