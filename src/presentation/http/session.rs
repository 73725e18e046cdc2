use axum::extract::FromRequestParts;
use axum::http::HeaderMap;
use axum::http::request::Parts;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::bootstrap::app_context::AppContext;
use crate::bootstrap::config::Config;
use crate::domain::users::user::User;
use crate::presentation::http::Found;

pub const SESSION_COOKIE: &str = "session";

/// Stateless session: the signed token carries the identity tuple, so no
/// server-side session table exists.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub name: String,
    pub email: String,
    pub exp: usize,
}

#[derive(Debug, Clone)]
pub struct SessionUser {
    pub id: i64,
    pub name: String,
    pub email: String,
}

pub fn mint_session_token(cfg: &Config, user: &User) -> anyhow::Result<String> {
    let now = chrono::Utc::now().timestamp() as usize;
    let claims = Claims {
        sub: user.id.to_string(),
        name: user.name.clone(),
        email: user.email.clone(),
        exp: now + (cfg.session_expires_secs as usize),
    };
    let token = jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(cfg.session_secret.as_bytes()),
    )?;
    Ok(token)
}

pub fn decode_session_token(cfg: &Config, token: &str) -> Option<SessionUser> {
    let data = jsonwebtoken::decode::<Claims>(
        token,
        &DecodingKey::from_secret(cfg.session_secret.as_bytes()),
        &Validation::default(),
    )
    .ok()?;
    let id = data.claims.sub.parse().ok()?;
    Some(SessionUser {
        id,
        name: data.claims.name,
        email: data.claims.email,
    })
}

pub fn session_from_headers(cfg: &Config, headers: &HeaderMap) -> Option<SessionUser> {
    let cookie_hdr = headers
        .get(axum::http::header::COOKIE)
        .and_then(|v| v.to_str().ok())?;
    let token = get_cookie(cookie_hdr, SESSION_COOKIE)?;
    decode_session_token(cfg, &token)
}

/// Identity extractor for guarded pages. A missing or invalid session is a
/// redirect to the login page, never an error payload.
#[axum::async_trait]
impl FromRequestParts<AppContext> for SessionUser {
    type Rejection = Found;

    async fn from_request_parts(
        parts: &mut Parts,
        ctx: &AppContext,
    ) -> Result<Self, Self::Rejection> {
        session_from_headers(&ctx.cfg, &parts.headers).ok_or(Found("/login"))
    }
}

// --- Cookie helpers ---

pub fn get_cookie(cookie_header: &str, name: &str) -> Option<String> {
    for part in cookie_header.split(';') {
        let kv = part.trim();
        if let Some((k, v)) = kv.split_once('=') {
            if k.trim() == name {
                return Some(v.trim().to_string());
            }
        }
    }
    None
}

pub fn build_session_cookie(token: &str, max_age_secs: i64, secure: bool) -> String {
    let secure_attr = if secure { "; Secure" } else { "" };
    format!(
        "{}={}; HttpOnly{}; Path=/; Max-Age={}; SameSite=Lax",
        SESSION_COOKIE,
        token,
        secure_attr,
        max_age_secs.max(0)
    )
}

pub fn clear_session_cookie(secure: bool) -> &'static str {
    if secure {
        "session=; HttpOnly; Secure; Path=/; Max-Age=0; SameSite=Lax"
    } else {
        "session=; HttpOnly; Path=/; Max-Age=0; SameSite=Lax"
    }
}
