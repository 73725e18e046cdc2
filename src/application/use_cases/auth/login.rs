use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordVerifier},
};

use crate::application::AppError;
use crate::application::ports::user_repository::UserRepository;
use crate::domain::users::user::User;

pub struct Login<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

#[derive(Debug, Clone)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl<'a, R: UserRepository + ?Sized> Login<'a, R> {
    /// Unknown email and wrong password both come back as `AppError::Auth`
    /// so the response never confirms whether an account exists.
    pub async fn execute(&self, req: &LoginRequest) -> Result<User, AppError> {
        if req.email.trim().is_empty() || req.password.is_empty() {
            return Err(AppError::validation("Please fill all fields"));
        }

        let row = match self.repo.find_by_email(&req.email).await? {
            Some(r) => r,
            None => return Err(AppError::Auth),
        };
        let hash = row.password_hash.clone().unwrap_or_default();
        let parsed = PasswordHash::new(&hash).map_err(|_| AppError::Auth)?;
        if Argon2::default()
            .verify_password(req.password.as_bytes(), &parsed)
            .is_ok()
        {
            Ok(User {
                id: row.id,
                name: row.name,
                email: row.email,
                password_hash: None,
            })
        } else {
            Err(AppError::Auth)
        }
    }
}
