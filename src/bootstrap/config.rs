use std::env;

#[derive(Clone, Debug)]
pub struct Config {
    pub app_port: u16,
    pub database_url: String,
    pub session_secret: String,
    pub session_expires_secs: i64,
    pub is_production: bool,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let app_port = env::var("APP_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(8080);
        let database_url = match env::var("DATABASE_URL") {
            Ok(url) => url,
            // Fall back to the individual connection parts
            Err(_) => {
                let host = env::var("DB_HOST").unwrap_or_else(|_| "localhost".into());
                let user = env::var("DB_USER").unwrap_or_else(|_| "itemdeck".into());
                let password = env::var("DB_PASSWORD").unwrap_or_default();
                let name = env::var("DB_NAME").unwrap_or_else(|_| "itemdeck".into());
                if password.is_empty() {
                    format!("postgres://{user}@{host}:5432/{name}")
                } else {
                    format!("postgres://{user}:{password}@{host}:5432/{name}")
                }
            }
        };
        let session_secret =
            env::var("SESSION_SECRET").unwrap_or_else(|_| "development-secret-change-me".into());
        let session_expires_secs = env::var("SESSION_EXPIRES_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(60 * 60 * 24);
        let is_production = matches!(
            env::var("RUST_ENV").ok().as_deref(),
            Some("production") | Some("prod")
        );

        if is_production
            && (session_secret == "development-secret-change-me" || session_secret.len() < 16)
        {
            anyhow::bail!("SESSION_SECRET must be set to a strong secret in production");
        }

        Ok(Self {
            app_port,
            database_url,
            session_secret,
            session_expires_secs,
            is_production,
        })
    }
}
