use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::application::AppError;

pub mod auth;
pub mod health;
pub mod items;
pub mod session;

/// 302 Found. `axum::response::Redirect` only offers 303/307/308, and all
/// post-action navigation here uses 302.
#[derive(Debug, Clone, Copy)]
pub struct Found(pub &'static str);

impl IntoResponse for Found {
    fn into_response(self) -> Response {
        (
            StatusCode::FOUND,
            [(axum::http::header::LOCATION, self.0)],
        )
            .into_response()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Validation(_) | AppError::Conflict => StatusCode::BAD_REQUEST,
            AppError::Auth => StatusCode::UNAUTHORIZED,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Database(e) => {
                // Log the cause; the client only ever sees the generic text.
                tracing::error!(error = ?e, "datastore failure");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (status, format!("Error: {self}")).into_response()
    }
}

pub async fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "Error: page not found").into_response()
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, header};
    use tower::ServiceExt;

    use super::*;
    use crate::application::ports::item_repository::ItemRepository;
    use crate::application::ports::user_repository::UserRepository;
    use crate::bootstrap::app_context::{AppContext, AppServices};
    use crate::bootstrap::config::Config;
    use crate::domain::items::item::Item;
    use crate::domain::users::user::User;

    #[test]
    fn status_mapping_follows_the_taxonomy() {
        let cases = [
            (
                AppError::validation("Please fill all fields"),
                StatusCode::BAD_REQUEST,
            ),
            (AppError::Auth, StatusCode::UNAUTHORIZED),
            (AppError::Conflict, StatusCode::BAD_REQUEST),
            (AppError::NotFound, StatusCode::NOT_FOUND),
            (
                AppError::Database(anyhow::anyhow!("connection refused: 10.0.0.3")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[test]
    fn database_errors_never_leak_their_cause() {
        let err = AppError::Database(anyhow::anyhow!("password authentication failed for role"));
        assert_eq!(err.to_string(), "Internal error");
    }

    // --- Full router flow over in-memory repositories ---

    #[derive(Default)]
    struct MemoryUsers {
        rows: Mutex<Vec<User>>,
    }

    #[async_trait]
    impl UserRepository for MemoryUsers {
        async fn create_user(
            &self,
            name: &str,
            email: &str,
            password_hash: &str,
        ) -> anyhow::Result<Option<User>> {
            let mut rows = self.rows.lock().unwrap();
            if rows.iter().any(|u| u.email == email) {
                return Ok(None);
            }
            let user = User {
                id: rows.len() as i64 + 1,
                name: name.to_string(),
                email: email.to_string(),
                password_hash: Some(password_hash.to_string()),
            };
            rows.push(user.clone());
            Ok(Some(user))
        }

        async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
            let rows = self.rows.lock().unwrap();
            Ok(rows.iter().find(|u| u.email == email).cloned())
        }
    }

    #[derive(Default)]
    struct MemoryItems {
        rows: Mutex<Vec<Item>>,
        next_id: Mutex<i64>,
    }

    #[async_trait]
    impl ItemRepository for MemoryItems {
        async fn list_for_owner(&self, owner_id: i64) -> anyhow::Result<Vec<Item>> {
            let rows = self.rows.lock().unwrap();
            let mut out: Vec<Item> = rows
                .iter()
                .filter(|i| i.owner_id == owner_id)
                .cloned()
                .collect();
            out.sort_by(|a, b| b.id.cmp(&a.id));
            Ok(out)
        }

        async fn insert(
            &self,
            owner_id: i64,
            title: &str,
            description: Option<&str>,
        ) -> anyhow::Result<Item> {
            let mut next = self.next_id.lock().unwrap();
            *next += 1;
            let item = Item {
                id: *next,
                owner_id,
                title: title.to_string(),
                description: description.map(str::to_string),
            };
            self.rows.lock().unwrap().push(item.clone());
            Ok(item)
        }

        async fn get_owned(&self, id: i64, owner_id: i64) -> anyhow::Result<Option<Item>> {
            let rows = self.rows.lock().unwrap();
            Ok(rows
                .iter()
                .find(|i| i.id == id && i.owner_id == owner_id)
                .cloned())
        }

        async fn update_owned(
            &self,
            id: i64,
            owner_id: i64,
            title: &str,
            description: Option<&str>,
        ) -> anyhow::Result<Option<Item>> {
            let mut rows = self.rows.lock().unwrap();
            for row in rows.iter_mut() {
                if row.id == id && row.owner_id == owner_id {
                    row.title = title.to_string();
                    row.description = description.map(str::to_string);
                    return Ok(Some(row.clone()));
                }
            }
            Ok(None)
        }

        async fn delete_owned(&self, id: i64, owner_id: i64) -> anyhow::Result<bool> {
            let mut rows = self.rows.lock().unwrap();
            let before = rows.len();
            rows.retain(|i| !(i.id == id && i.owner_id == owner_id));
            Ok(rows.len() < before)
        }
    }

    fn test_app() -> Router {
        let cfg = Config {
            app_port: 0,
            database_url: "postgres://localhost/test".into(),
            session_secret: "unit-test-secret".into(),
            session_expires_secs: 3600,
            is_production: false,
        };
        let ctx = AppContext::new(
            cfg,
            AppServices::new(
                Arc::new(MemoryUsers::default()),
                Arc::new(MemoryItems::default()),
            ),
        );
        Router::new()
            .merge(super::auth::routes(ctx.clone()))
            .merge(super::items::routes(ctx))
            .fallback(super::not_found)
    }

    fn form_post(uri: &str, body: &str, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(c) = cookie {
            builder = builder.header(header::COOKIE, c);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(c) = cookie {
            builder = builder.header(header::COOKIE, c);
        }
        builder.body(Body::empty()).unwrap()
    }

    fn location(res: &axum::response::Response) -> &str {
        res.headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
    }

    async fn body_text(res: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn register_login_crud_logout_flow() {
        let app = test_app();

        // Register -> 302 to login
        let res = app
            .clone()
            .oneshot(form_post(
                "/register",
                "name=Alice&email=alice%40x.com&password=secret1",
                None,
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::FOUND);
        assert_eq!(location(&res), "/login");

        // Login -> session cookie + 302 to dashboard
        let res = app
            .clone()
            .oneshot(form_post(
                "/login",
                "email=alice%40x.com&password=secret1",
                None,
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::FOUND);
        assert_eq!(location(&res), "/dashboard");
        let set_cookie = res
            .headers()
            .get(header::SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap();
        assert!(set_cookie.contains("HttpOnly"));
        let cookie = set_cookie.split(';').next().unwrap().to_string();

        // Add an item; it shows up first on the dashboard
        let res = app
            .clone()
            .oneshot(form_post(
                "/add-item",
                "title=Buy+milk&description=",
                Some(&cookie),
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::FOUND);
        let res = app
            .clone()
            .oneshot(get("/dashboard", Some(&cookie)))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let html = body_text(res).await;
        assert!(html.contains("Welcome, Alice!"));
        assert!(html.contains("Buy milk"));
        assert!(html.contains("href=\"/edit/1\""));

        // Edit the item
        let res = app
            .clone()
            .oneshot(form_post("/edit/1", "title=Buy+oat+milk", Some(&cookie)))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::FOUND);
        let html = body_text(
            app.clone()
                .oneshot(get("/dashboard", Some(&cookie)))
                .await
                .unwrap(),
        )
        .await;
        assert!(html.contains("Buy oat milk"));

        // Delete it; the list is empty again and a repeat delete still 302s
        let res = app
            .clone()
            .oneshot(get("/delete/1", Some(&cookie)))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::FOUND);
        let html = body_text(
            app.clone()
                .oneshot(get("/dashboard", Some(&cookie)))
                .await
                .unwrap(),
        )
        .await;
        assert!(!html.contains("Buy oat milk"));
        assert!(html.contains("No items yet"));
        let res = app
            .clone()
            .oneshot(get("/delete/1", Some(&cookie)))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::FOUND);

        // Logout clears the cookie; the dashboard goes back behind the guard
        let res = app.clone().oneshot(get("/logout", None)).await.unwrap();
        assert_eq!(res.status(), StatusCode::FOUND);
        assert_eq!(location(&res), "/login");
        let cleared = res
            .headers()
            .get(header::SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap();
        assert!(cleared.contains("Max-Age=0"));
        let res = app.clone().oneshot(get("/dashboard", None)).await.unwrap();
        assert_eq!(res.status(), StatusCode::FOUND);
        assert_eq!(location(&res), "/login");
    }

    #[tokio::test]
    async fn short_password_registration_is_a_400() {
        let app = test_app();
        let res = app
            .oneshot(form_post(
                "/register",
                "name=Alice&email=alice%40x.com&password=abc12",
                None,
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body = body_text(res).await;
        assert!(body.contains("at least 6 characters"));
    }

    #[tokio::test]
    async fn bad_credentials_are_a_uniform_401() {
        let app = test_app();
        app.clone()
            .oneshot(form_post(
                "/register",
                "name=Alice&email=alice%40x.com&password=secret1",
                None,
            ))
            .await
            .unwrap();

        let wrong = app
            .clone()
            .oneshot(form_post(
                "/login",
                "email=alice%40x.com&password=wrong11",
                None,
            ))
            .await
            .unwrap();
        let unknown = app
            .clone()
            .oneshot(form_post("/login", "email=bob%40x.com&password=secret1", None))
            .await
            .unwrap();
        assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_text(wrong).await, body_text(unknown).await);
    }

    #[tokio::test]
    async fn anothers_item_is_a_404_on_edit_and_a_noop_on_delete() {
        let app = test_app();
        for (name, email) in [("Alice", "alice%40x.com"), ("Bob", "bob%40x.com")] {
            app.clone()
                .oneshot(form_post(
                    "/register",
                    &format!("name={name}&email={email}&password=secret1"),
                    None,
                ))
                .await
                .unwrap();
        }
        let login = |email: &'static str| {
            let app = app.clone();
            async move {
                let res = app
                    .oneshot(form_post(
                        "/login",
                        &format!("email={email}&password=secret1"),
                        None,
                    ))
                    .await
                    .unwrap();
                res.headers()
                    .get(header::SET_COOKIE)
                    .unwrap()
                    .to_str()
                    .unwrap()
                    .split(';')
                    .next()
                    .unwrap()
                    .to_string()
            }
        };
        let alice = login("alice%40x.com").await;
        let bob = login("bob%40x.com").await;

        app.clone()
            .oneshot(form_post("/add-item", "title=Buy+milk", Some(&alice)))
            .await
            .unwrap();

        // Bob probing Alice's item id looks exactly like a missing id.
        let owned = app
            .clone()
            .oneshot(get("/edit/1", Some(&bob)))
            .await
            .unwrap();
        let missing = app
            .clone()
            .oneshot(get("/edit/999", Some(&bob)))
            .await
            .unwrap();
        assert_eq!(owned.status(), StatusCode::NOT_FOUND);
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_text(owned).await, body_text(missing).await);

        let res = app
            .clone()
            .oneshot(get("/delete/1", Some(&bob)))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::FOUND);
        let html = body_text(
            app.clone()
                .oneshot(get("/dashboard", Some(&alice)))
                .await
                .unwrap(),
        )
        .await;
        assert!(html.contains("Buy milk"));
    }

    #[tokio::test]
    async fn omitted_form_fields_are_validation_errors() {
        let app = test_app();

        // Absent password field on registration
        let res = app
            .clone()
            .oneshot(form_post(
                "/register",
                "name=Alice&email=alice%40x.com",
                None,
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert!(body_text(res).await.contains("Please fill all fields"));

        app.clone()
            .oneshot(form_post(
                "/register",
                "name=Alice&email=alice%40x.com&password=secret1",
                None,
            ))
            .await
            .unwrap();

        // Absent email field on login
        let res = app
            .clone()
            .oneshot(form_post("/login", "password=secret1", None))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert!(body_text(res).await.contains("Please fill all fields"));

        let res = app
            .clone()
            .oneshot(form_post(
                "/login",
                "email=alice%40x.com&password=secret1",
                None,
            ))
            .await
            .unwrap();
        let cookie = res
            .headers()
            .get(header::SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap()
            .split(';')
            .next()
            .unwrap()
            .to_string();

        // Absent title field on add and on edit
        let res = app
            .clone()
            .oneshot(form_post("/add-item", "description=only", Some(&cookie)))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert!(body_text(res).await.contains("Title is required"));

        app.clone()
            .oneshot(form_post("/add-item", "title=Buy+milk", Some(&cookie)))
            .await
            .unwrap();
        let res = app
            .clone()
            .oneshot(form_post("/edit/1", "description=only", Some(&cookie)))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert!(body_text(res).await.contains("Title is required"));
    }

    #[tokio::test]
    async fn unknown_routes_are_a_404() {
        let app = test_app();
        let res = app.oneshot(get("/no-such-page", None)).await.unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn index_redirects_by_session_state() {
        let app = test_app();
        let res = app.clone().oneshot(get("/", None)).await.unwrap();
        assert_eq!(res.status(), StatusCode::FOUND);
        assert_eq!(location(&res), "/login");

        app.clone()
            .oneshot(form_post(
                "/register",
                "name=Alice&email=alice%40x.com&password=secret1",
                None,
            ))
            .await
            .unwrap();
        let res = app
            .clone()
            .oneshot(form_post(
                "/login",
                "email=alice%40x.com&password=secret1",
                None,
            ))
            .await
            .unwrap();
        let cookie = res
            .headers()
            .get(header::SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap()
            .split(';')
            .next()
            .unwrap()
            .to_string();
        let res = app.clone().oneshot(get("/", Some(&cookie))).await.unwrap();
        assert_eq!(location(&res), "/dashboard");
    }
}
