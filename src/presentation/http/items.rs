use axum::{
    Form, Router,
    extract::{Path, State},
    response::Html,
    routing::get,
};
use serde::Deserialize;

use crate::application::AppError;
use crate::application::use_cases::items::add_item::AddItem;
use crate::application::use_cases::items::delete_item::DeleteItem;
use crate::application::use_cases::items::get_item_for_edit::GetItemForEdit;
use crate::application::use_cases::items::list_items::ListItems;
use crate::application::use_cases::items::update_item::UpdateItem;
use crate::bootstrap::app_context::AppContext;
use crate::presentation::http::Found;
use crate::presentation::http::session::SessionUser;
use crate::presentation::views;

// A missing title deserializes to "" and fails validation with a 400
// rather than being bounced by the Form extractor.
#[derive(Debug, Deserialize)]
pub struct ItemForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl ItemForm {
    // Empty descriptions are stored as NULL; the dashboard shows them as "-".
    fn description(&self) -> Option<&str> {
        self.description.as_deref().filter(|d| !d.is_empty())
    }
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/dashboard", get(dashboard))
        .route("/add-item", axum::routing::post(add_item))
        .route("/edit/:id", get(edit_page).post(update_item))
        .route("/delete/:id", get(delete_item))
        .with_state(ctx)
}

pub async fn dashboard(
    State(ctx): State<AppContext>,
    session: SessionUser,
) -> Result<Html<String>, AppError> {
    let repo = ctx.item_repo();
    let uc = ListItems {
        repo: repo.as_ref(),
    };
    let items = uc.execute(session.id).await?;
    Ok(Html(views::dashboard_page(&session.name, &items)))
}

pub async fn add_item(
    State(ctx): State<AppContext>,
    session: SessionUser,
    Form(form): Form<ItemForm>,
) -> Result<Found, AppError> {
    let repo = ctx.item_repo();
    let uc = AddItem {
        repo: repo.as_ref(),
    };
    uc.execute(session.id, &form.title, form.description())
        .await?;
    Ok(Found("/dashboard"))
}

pub async fn edit_page(
    State(ctx): State<AppContext>,
    session: SessionUser,
    Path(id): Path<i64>,
) -> Result<Html<String>, AppError> {
    let repo = ctx.item_repo();
    let uc = GetItemForEdit {
        repo: repo.as_ref(),
    };
    let item = uc.execute(session.id, id).await?;
    Ok(Html(views::edit_page(&item)))
}

pub async fn update_item(
    State(ctx): State<AppContext>,
    session: SessionUser,
    Path(id): Path<i64>,
    Form(form): Form<ItemForm>,
) -> Result<Found, AppError> {
    let repo = ctx.item_repo();
    let uc = UpdateItem {
        repo: repo.as_ref(),
    };
    uc.execute(session.id, id, &form.title, form.description())
        .await?;
    Ok(Found("/dashboard"))
}

pub async fn delete_item(
    State(ctx): State<AppContext>,
    session: SessionUser,
    Path(id): Path<i64>,
) -> Result<Found, AppError> {
    let repo = ctx.item_repo();
    let uc = DeleteItem {
        repo: repo.as_ref(),
    };
    uc.execute(session.id, id).await?;
    Ok(Found("/dashboard"))
}
