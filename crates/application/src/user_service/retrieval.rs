use super::*;

impl UserService {
    /// Returns the user designated by `lookup`.
    pub async fn find(&self, lookup: &UserLookup) -> AppResult<User> {
        self.require(lookup).await
    }

    /// Returns the user designated by `lookup`, if any.
    pub async fn find_optional(&self, lookup: &UserLookup) -> AppResult<Option<User>> {
        self.repository.find(lookup).await
    }

    /// Returns the user registered with `email`, if any.
    pub async fn find_optional_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let email = EmailAddress::new(email)?;
        self.repository.find(&UserLookup::Email(email)).await
    }

    /// Returns the role of the user registered with `email`.
    pub async fn role_for_email(&self, email: &str) -> AppResult<Role> {
        let email = EmailAddress::new(email)?;
        Ok(self.require(&UserLookup::Email(email)).await?.role)
    }
}
