use axum::{
    Form, Router,
    extract::State,
    http::HeaderMap,
    response::Html,
    routing::get,
};
use serde::Deserialize;

use crate::application::AppError;
use crate::application::use_cases::auth::login::{Login as LoginUc, LoginRequest as LoginDto};
use crate::application::use_cases::auth::register::{
    Register as RegisterUc, RegisterRequest as RegisterDto,
};
use crate::bootstrap::app_context::AppContext;
use crate::presentation::http::Found;
use crate::presentation::http::session::{
    build_session_cookie, clear_session_cookie, mint_session_token, session_from_headers,
};
use crate::presentation::views;

// Fields default to "" so an omitted field reaches the empty-field
// validation (400) instead of being bounced by the Form extractor.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/register", get(register_page).post(register))
        .route("/login", get(login_page).post(login))
        .route("/logout", get(logout))
        .with_state(ctx)
}

pub async fn index(State(ctx): State<AppContext>, headers: HeaderMap) -> Found {
    match session_from_headers(&ctx.cfg, &headers) {
        Some(_) => Found("/dashboard"),
        None => Found("/login"),
    }
}

pub async fn register_page() -> Html<String> {
    Html(views::register_page())
}

pub async fn register(
    State(ctx): State<AppContext>,
    Form(form): Form<RegisterForm>,
) -> Result<Found, AppError> {
    let repo = ctx.user_repo();
    let uc = RegisterUc {
        repo: repo.as_ref(),
    };
    let dto = RegisterDto {
        name: form.name,
        email: form.email,
        password: form.password,
    };
    let user = uc.execute(&dto).await?;
    tracing::info!(user_id = user.id, "account created");
    Ok(Found("/login"))
}

pub async fn login_page() -> Html<String> {
    Html(views::login_page())
}

pub async fn login(
    State(ctx): State<AppContext>,
    Form(form): Form<LoginForm>,
) -> Result<(HeaderMap, Found), AppError> {
    let repo = ctx.user_repo();
    let uc = LoginUc {
        repo: repo.as_ref(),
    };
    let dto = LoginDto {
        email: form.email,
        password: form.password,
    };
    let user = uc.execute(&dto).await?;

    let token = mint_session_token(&ctx.cfg, &user)?;
    let cookie = build_session_cookie(&token, ctx.cfg.session_expires_secs, ctx.cfg.is_production);
    let mut headers = HeaderMap::new();
    headers.insert(
        axum::http::header::SET_COOKIE,
        axum::http::HeaderValue::from_str(&cookie)
            .map_err(|e| AppError::Database(anyhow::anyhow!(e)))?,
    );
    tracing::info!(user_id = user.id, "login succeeded");
    Ok((headers, Found("/dashboard")))
}

/// Clearing the cookie is unconditional, so logout is idempotent.
pub async fn logout(State(ctx): State<AppContext>) -> (HeaderMap, Found) {
    let mut headers = HeaderMap::new();
    headers.insert(
        axum::http::header::SET_COOKIE,
        axum::http::HeaderValue::from_static(clear_session_cookie(ctx.cfg.is_production)),
    );
    (headers, Found("/login"))
}
