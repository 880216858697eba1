//! HTML pages rendered from the askama templates under `templates/`.
//!
//! Templates escape every interpolated value, so item titles and period names
//! are always inert text in the output.

use askama::Template;
use axum::http::StatusCode;
use todo_core::{Board, Item, Period};

/// The index page for one board.
#[derive(Template)]
#[template(path = "board.html")]
pub struct BoardPage<'a> {
    pub active_period: &'a str,
    pub items: &'a [Item],
    pub periods: &'a [Period],
}

impl<'a> From<&'a Board> for BoardPage<'a> {
    fn from(board: &'a Board) -> Self {
        Self {
            active_period: &board.active_period,
            items: &board.items,
            periods: &board.periods,
        }
    }
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorPage<'a> {
    pub code: u16,
    pub reason: &'a str,
    pub message: &'a str,
}

pub fn render_board(board: &Board) -> askama::Result<String> {
    BoardPage::from(board).render()
}

/// Renders a short error page with a link back to the board.
pub fn render_error(status: StatusCode, message: &str) -> askama::Result<String> {
    ErrorPage {
        code: status.as_u16(),
        reason: status.canonical_reason().unwrap_or("Error"),
        message,
    }
    .render()
}
