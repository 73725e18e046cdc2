use argon2::{
    Argon2,
    password_hash::{PasswordHasher, SaltString},
};
use password_hash::rand_core::OsRng;

use crate::application::AppError;
use crate::application::ports::user_repository::UserRepository;
use crate::domain::users::user::User;

pub const MIN_PASSWORD_LEN: usize = 6;

pub struct Register<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

#[derive(Debug, Clone)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl<'a, R: UserRepository + ?Sized> Register<'a, R> {
    pub async fn execute(&self, req: &RegisterRequest) -> Result<User, AppError> {
        // Validation happens before any datastore access.
        if req.name.trim().is_empty() || req.email.trim().is_empty() || req.password.is_empty() {
            return Err(AppError::validation("Please fill all fields"));
        }
        // Characters, not bytes, so multibyte passwords are measured fairly.
        if req.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AppError::validation(
                "Password must be at least 6 characters",
            ));
        }

        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(req.password.as_bytes(), &salt)
            .map_err(|e| anyhow::anyhow!(e.to_string()))?
            .to_string();

        self.repo
            .create_user(&req.name, &req.email, &hash)
            .await?
            .ok_or(AppError::Conflict)
    }
}
