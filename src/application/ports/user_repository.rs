use async_trait::async_trait;

use crate::domain::users::user::User;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Returns `None` when the email is already registered.
    async fn create_user(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> anyhow::Result<Option<User>>;

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>>;
}
