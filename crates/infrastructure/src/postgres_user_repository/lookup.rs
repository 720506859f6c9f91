use super::*;

impl PostgresUserRepository {
    pub(super) async fn find_impl(&self, lookup: &UserLookup) -> AppResult<Option<User>> {
        let query = match lookup {
            UserLookup::Id(user_id) => sqlx::query_as::<_, UserRow>(
                r#"
                SELECT id, login, first_name, last_name, email, password_hash,
                       password_salt, role, created_at, updated_at
                FROM users
                WHERE id = $1
                "#,
            )
            .bind(user_id.as_uuid()),
            UserLookup::Login(login) => sqlx::query_as::<_, UserRow>(
                r#"
                SELECT id, login, first_name, last_name, email, password_hash,
                       password_salt, role, created_at, updated_at
                FROM users
                WHERE login = $1
                "#,
            )
            .bind(login.as_str()),
            UserLookup::Email(email) => sqlx::query_as::<_, UserRow>(
                r#"
                SELECT id, login, first_name, last_name, email, password_hash,
                       password_salt, role, created_at, updated_at
                FROM users
                WHERE email = $1
                "#,
            )
            .bind(email.as_str()),
        };

        let row = query
            .fetch_optional(&self.pool)
            .await
            .map_err(|error| AppError::Internal(format!("failed to find user by {lookup}: {error}")))?;

        row.map(User::try_from).transpose()
    }
}
