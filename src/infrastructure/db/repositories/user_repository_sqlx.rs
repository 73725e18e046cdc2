use async_trait::async_trait;
use sqlx::Row;

use crate::application::ports::user_repository::UserRepository;
use crate::domain::users::user::User;
use crate::infrastructure::db::PgPool;

pub struct SqlxUserRepository {
    pub pool: PgPool,
}

impl SqlxUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for SqlxUserRepository {
    async fn create_user(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> anyhow::Result<Option<User>> {
        let res = sqlx::query(
            r#"INSERT INTO users (name, email, password_hash) VALUES ($1, $2, $3)
               RETURNING id, name, email"#,
        )
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await;
        match res {
            Ok(row) => Ok(Some(User {
                id: row.get("id"),
                name: row.get("name"),
                email: row.get("email"),
                password_hash: None,
            })),
            // The UNIQUE constraint on email is the conflict signal.
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        let row = sqlx::query(
            r#"SELECT id, name, email, password_hash FROM users WHERE email = $1"#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(|r| User {
            id: r.get("id"),
            name: r.get("name"),
            email: r.get("email"),
            password_hash: r.try_get("password_hash").ok(),
        }))
    }
}
