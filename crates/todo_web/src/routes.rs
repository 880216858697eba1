//! Route table and request handlers.
//!
//! | Route     | Method | Form fields                                   |
//! |-----------|--------|-----------------------------------------------|
//! | `/`       | GET    |                                               |
//! | `/switch` | POST   | `switchPeriod`                                |
//! | `/add`    | POST   | `newItem`, `period`                           |
//! | `/edit`   | POST   | `updatedItemId`, `updatedItemTitle`, `period` |
//! | `/delete` | POST   | `deleteItemId`, `period`                      |
//!
//! The active period lives in the `activePeriod` cookie. The optional hidden
//! `period` field overrides it for one request. Successful mutations answer
//! `302 Found` to `/` and refresh the cookie.

use crate::error::AppError;
use crate::session;
use crate::state::AppState;
use crate::view;
use axum::extract::{Request, State};
use axum::http::{header, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Form, Router};
use axum_extra::extract::cookie::CookieJar;
use log::info;
use serde::Deserialize;
use std::path::Path;
use std::time::Instant;
use todo_core::{active_period_name, ItemId};
use tower_http::services::ServeDir;

/// Builds the application router with static assets served under `/static`.
pub fn router(state: AppState, static_dir: impl AsRef<Path>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/switch", post(switch_period))
        .route("/add", post(add_item))
        .route("/edit", post(edit_item))
        .route("/delete", post(delete_item))
        .nest_service("/static", ServeDir::new(static_dir.as_ref()))
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SwitchForm {
    switch_period: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddForm {
    new_item: String,
    period: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EditForm {
    updated_item_id: ItemId,
    updated_item_title: String,
    period: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeleteForm {
    delete_item_id: ItemId,
    period: Option<String>,
}

async fn index(State(state): State<AppState>, jar: CookieJar) -> Result<Html<String>, AppError> {
    let period = session::active_period(&jar, None);
    let board = state.with_service(move |service| service.board(&period)).await?;
    Ok(Html(view::render_board(&board)?))
}

/// Switching never checks that the period exists; unknown names render empty.
async fn switch_period(jar: CookieJar, Form(form): Form<SwitchForm>) -> Response {
    let period = active_period_name(Some(&form.switch_period));
    back_to_board(jar, &period)
}

async fn add_item(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<AddForm>,
) -> Result<Response, AppError> {
    let period = session::active_period(&jar, form.period.as_deref());
    let lookup = period.clone();
    let added = state
        .with_service(move |service| service.add_item(&lookup, &form.new_item))
        .await?;

    match added {
        Some(_) => Ok(back_to_board(jar, &period)),
        None => Err(AppError::NotFound(format!("Period `{period}` does not exist."))),
    }
}

async fn edit_item(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<EditForm>,
) -> Result<Response, AppError> {
    let period = session::active_period(&jar, form.period.as_deref());
    let id = form.updated_item_id;
    let updated = state
        .with_service(move |service| service.rename_item(id, &form.updated_item_title))
        .await?;

    match updated {
        Some(_) => Ok(back_to_board(jar, &period)),
        None => Err(item_not_found(id)),
    }
}

async fn delete_item(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<DeleteForm>,
) -> Result<Response, AppError> {
    let period = session::active_period(&jar, form.period.as_deref());
    let id = form.delete_item_id;
    let deleted = state
        .with_service(move |service| service.remove_item(id))
        .await?;

    match deleted {
        Some(_) => Ok(back_to_board(jar, &period)),
        None => Err(item_not_found(id)),
    }
}

fn item_not_found(id: ItemId) -> AppError {
    AppError::NotFound(format!("Item {id} does not exist."))
}

/// Redirects to the board, remembering `period` as the active one.
fn back_to_board(jar: CookieJar, period: &str) -> Response {
    (
        StatusCode::FOUND,
        session::remember_period(jar, period),
        [(header::LOCATION, "/")],
    )
        .into_response()
}

async fn log_request(request: Request, next: Next) -> Response {
    let started_at = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let response = next.run(request).await;

    info!(
        "event=http_request module=web status={} method={} path={} duration_ms={}",
        response.status().as_u16(),
        method,
        path,
        started_at.elapsed().as_millis()
    );
    response
}
