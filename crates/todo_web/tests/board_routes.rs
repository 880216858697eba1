use axum::body::Body;
use axum::http::{header, request, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use rusqlite::Connection;
use std::path::Path;
use todo_core::db::{open_db, open_db_in_memory};
use todo_core::{ItemRepository, PeriodRepository, SqliteItemRepository, SqlitePeriodRepository};
use todo_web::{router, AppState};
use tower::ServiceExt;

fn app_with(conn: Connection, static_dir: &Path) -> Router {
    router(AppState::new(conn), static_dir)
}

fn in_memory_app() -> (Router, tempfile::TempDir) {
    let static_dir = tempfile::tempdir().unwrap();
    let app = app_with(open_db_in_memory().unwrap(), static_dir.path());
    (app, static_dir)
}

/// Drives the router like a browser: the last `Set-Cookie` is sent back on
/// every following request.
struct Browser {
    app: Router,
    cookie: Option<String>,
}

impl Browser {
    fn new(app: Router) -> Self {
        Self { app, cookie: None }
    }

    async fn get(&mut self, uri: &str) -> Response {
        self.send(Request::builder().uri(uri), Body::empty()).await
    }

    async fn post_form(&mut self, uri: &str, body: &str) -> Response {
        let builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        self.send(builder, Body::from(body.to_string())).await
    }

    async fn send(&mut self, builder: request::Builder, body: Body) -> Response {
        let builder = match &self.cookie {
            Some(cookie) => builder.header(header::COOKIE, cookie),
            None => builder,
        };
        let response = self
            .app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        if let Some(set_cookie) = response.headers().get(header::SET_COOKIE) {
            let pair = set_cookie.to_str().unwrap().split(';').next().unwrap();
            self.cookie = Some(pair.to_string());
        }
        response
    }
}

async fn body_text(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn assert_redirect_home(response: &Response) {
    assert_eq!(response.status(), StatusCode::FOUND);
    let location = response
        .headers()
        .get(header::LOCATION)
        .expect("redirect should carry a location");
    assert_eq!(location, "/");
}

#[tokio::test]
async fn index_defaults_to_today_and_lists_periods() {
    let (app, _static_dir) = in_memory_app();
    let mut browser = Browser::new(app);

    let response = browser.get("/").await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("<h1 class=\"list-title\">Today</h1>"));
    assert!(html.contains("value=\"Tomorrow\""));
    assert!(html.contains("value=\"This Week\""));
    assert!(html.contains("Nothing planned."));
}

#[tokio::test]
async fn switching_then_adding_files_the_item_under_the_new_period() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("todo.sqlite3");
    let mut browser = Browser::new(app_with(open_db(&db_path).unwrap(), dir.path()));

    // Active period Today, holding "Buy milk".
    let added = browser.post_form("/add", "newItem=Buy+milk").await;
    assert_redirect_home(&added);
    assert!(body_text(browser.get("/").await).await.contains("Buy milk"));

    let switched = browser.post_form("/switch", "switchPeriod=Tomorrow").await;
    assert_redirect_home(&switched);

    let tomorrow = body_text(browser.get("/").await).await;
    assert!(tomorrow.contains("<h1 class=\"list-title\">Tomorrow</h1>"));
    assert!(!tomorrow.contains("Buy milk"));

    let planned = browser.post_form("/add", "newItem=Plan+trip").await;
    assert_redirect_home(&planned);
    assert!(body_text(browser.get("/").await).await.contains("Plan trip"));

    let conn = open_db(&db_path).unwrap();
    let tomorrow_id = SqlitePeriodRepository::new(&conn)
        .resolve_period_id("Tomorrow")
        .unwrap()
        .expect("Tomorrow is seeded");
    let items = SqliteItemRepository::new(&conn)
        .list_items_for_period("Tomorrow")
        .unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].title, "Plan trip");
    assert_eq!(items[0].periods_id, tomorrow_id);
}

#[tokio::test]
async fn hidden_period_field_overrides_the_cookie() {
    let (app, _static_dir) = in_memory_app();
    let mut browser = Browser::new(app);
    browser.post_form("/switch", "switchPeriod=Tomorrow").await;

    let added = browser
        .post_form("/add", "newItem=Review+goals&period=This+Week")
        .await;
    assert_redirect_home(&added);

    let html = body_text(browser.get("/").await).await;
    assert!(html.contains("<h1 class=\"list-title\">This Week</h1>"));
    assert!(html.contains("Review goals"));

    browser.post_form("/switch", "switchPeriod=Tomorrow").await;
    assert!(!body_text(browser.get("/").await).await.contains("Review goals"));
}

#[tokio::test]
async fn fresh_clients_start_on_today() {
    let (app, _static_dir) = in_memory_app();
    let mut first = Browser::new(app.clone());
    first.post_form("/switch", "switchPeriod=Tomorrow").await;

    let mut second = Browser::new(app);
    let html = body_text(second.get("/").await).await;
    assert!(html.contains("<h1 class=\"list-title\">Today</h1>"));
}

#[tokio::test]
async fn switching_to_unknown_period_renders_empty_board() {
    let (app, _static_dir) = in_memory_app();
    let mut browser = Browser::new(app);
    browser.post_form("/add", "newItem=Buy+milk").await;

    let switched = browser.post_form("/switch", "switchPeriod=Someday").await;
    assert_redirect_home(&switched);
    let response = browser.get("/").await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("<h1 class=\"list-title\">Someday</h1>"));
    assert!(html.contains("Nothing planned."));
    assert!(!html.contains("Buy milk"));
}

#[tokio::test]
async fn adding_under_unknown_period_is_not_found() {
    let (app, _static_dir) = in_memory_app();
    let mut browser = Browser::new(app);
    browser.post_form("/switch", "switchPeriod=Someday").await;

    let response = browser.post_form("/add", "newItem=Lost").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let html = body_text(response).await;
    assert!(html.contains("Period `Someday` does not exist."));
    assert!(html.contains("href=\"/\""));

    assert!(!body_text(browser.get("/").await).await.contains("Lost"));
}

#[tokio::test]
async fn edit_renames_existing_item_and_rejects_missing_ids() {
    let (app, _static_dir) = in_memory_app();
    let mut browser = Browser::new(app);
    browser.post_form("/add", "newItem=Buy+milk").await;

    let edited = browser
        .post_form("/edit", "updatedItemId=1&updatedItemTitle=Buy+oat+milk")
        .await;
    assert_redirect_home(&edited);
    let html = body_text(browser.get("/").await).await;
    assert!(html.contains("Buy oat milk"));

    let response = browser
        .post_form("/edit", "updatedItemId=99&updatedItemTitle=Ghost&period=Tomorrow")
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_text(response).await.contains("Item 99 does not exist."));
}

#[tokio::test]
async fn delete_removes_item_once() {
    let (app, _static_dir) = in_memory_app();
    let mut browser = Browser::new(app);
    browser
        .post_form("/add", "newItem=Buy+milk&period=This+Week")
        .await;

    let deleted = browser
        .post_form("/delete", "deleteItemId=1&period=This+Week")
        .await;
    assert_redirect_home(&deleted);
    let html = body_text(browser.get("/").await).await;
    assert!(html.contains("<h1 class=\"list-title\">This Week</h1>"));
    assert!(!html.contains("Buy milk"));

    let response = browser.post_form("/delete", "deleteItemId=1").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_item_id_is_a_client_error() {
    let (app, _static_dir) = in_memory_app();
    let mut browser = Browser::new(app);

    let response = browser.post_form("/delete", "deleteItemId=first").await;
    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn item_titles_are_escaped_in_html() {
    let (app, _static_dir) = in_memory_app();
    let mut browser = Browser::new(app);
    browser
        .post_form("/add", "newItem=%3Cscript%3Ealert(1)%3C%2Fscript%3E")
        .await;

    let html = body_text(browser.get("/").await).await;
    assert!(html.contains("&lt;script&gt;alert(1)&lt;"));
    assert!(!html.contains("<script>"));
}

#[tokio::test]
async fn database_failure_renders_internal_error_page() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("todo.sqlite3");
    let mut browser = Browser::new(app_with(open_db(&db_path).unwrap(), dir.path()));

    let saboteur = Connection::open(&db_path).unwrap();
    saboteur.execute_batch("DROP TABLE items;").unwrap();
    drop(saboteur);

    let response = browser.get("/").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let html = body_text(response).await;
    assert!(html.contains("The to-do list is unavailable."));
    assert!(!html.contains("no such table"));
}

#[tokio::test]
async fn static_assets_are_served_from_configured_directory() {
    let static_dir = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(static_dir.path().join("styles")).unwrap();
    std::fs::write(
        static_dir.path().join("styles").join("main.css"),
        "body { margin: 0; }",
    )
    .unwrap();
    let mut browser = Browser::new(app_with(open_db_in_memory().unwrap(), static_dir.path()));

    let response = browser.get("/static/styles/main.css").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "body { margin: 0; }");

    let missing = browser.get("/static/nope.css").await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}
