//! Core domain logic for the to-do board.
//! This crate owns the schema, the data access functions and the use-cases;
//! the web crate only translates HTTP to these calls.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging};
pub use model::item::{Item, ItemId};
pub use model::period::{active_period_name, Period, PeriodId, DEFAULT_PERIOD_NAME};
pub use repo::item_repo::{ItemRepository, SqliteItemRepository};
pub use repo::period_repo::{PeriodRepository, SqlitePeriodRepository};
pub use repo::{RepoError, RepoResult};
pub use service::todo_service::{Board, SqliteTodoService, TodoService};
