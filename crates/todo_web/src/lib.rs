//! HTTP surface of the to-do board.
//!
//! # Responsibility
//! - Load configuration and hold the single database connection.
//! - Map the five form-driven routes onto `todo_core` use-cases.
//! - Remember the active period in a cookie.
//! - Render HTML pages and serve static assets.

pub mod config;
pub mod error;
pub mod routes;
pub mod session;
pub mod state;
pub mod view;

pub use config::{AppConfig, ConfigError};
pub use error::AppError;
pub use routes::router;
pub use state::AppState;
