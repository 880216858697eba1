//! HTTP-facing error type.
//!
//! Repository failures are logged where they happen; this layer only picks
//! the status code and renders a page without internal details.

use crate::view;
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use log::error;
use std::error::Error;
use std::fmt::{Display, Formatter};
use todo_core::RepoError;

#[derive(Debug)]
pub enum AppError {
    /// The addressed item or period does not exist.
    NotFound(String),
    Repo(RepoError),
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) | Self::Repo(RepoError::UnknownPeriod(_)) => StatusCode::NOT_FOUND,
            Self::Repo(RepoError::Db(_)) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(message) => write!(f, "{message}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::Internal(message) => write!(f, "internal error: {message}"),
        }
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::NotFound(_) | Self::Internal(_) => None,
        }
    }
}

impl From<RepoError> for AppError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<askama::Error> for AppError {
    fn from(value: askama::Error) -> Self {
        Self::Internal(format!("template rendering failed: {value}"))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            Self::NotFound(message) => message.as_str(),
            Self::Repo(RepoError::UnknownPeriod(_)) => "That period no longer exists.",
            Self::Repo(RepoError::Db(_)) => "The to-do list is unavailable.",
            Self::Internal(message) => {
                error!("event=http_error module=web status=error error={message}");
                "The to-do list is unavailable."
            }
        };

        match view::render_error(status, message) {
            Ok(page) => (status, Html(page)).into_response(),
            Err(err) => {
                error!("event=render_error_page module=web status=error error={err}");
                (
                    status,
                    [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
                    message.to_string(),
                )
                    .into_response()
            }
        }
    }
}
