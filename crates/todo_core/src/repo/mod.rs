//! Repository layer: the only code that touches the `items` and `periods` tables.
//!
//! # Responsibility
//! - Define data access contracts for items and periods.
//! - Keep SQL details out of the service and HTTP layers.
//!
//! # Invariants
//! - All statements are parameterized; user input never reaches SQL text.
//! - "Not found" is `Ok(None)`, failures are `Err(RepoError)`.
//! - Every failure is logged exactly once, here, before it is returned.

use crate::db::DbError;
use crate::model::period::PeriodId;
use log::error;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod item_repo;
pub mod period_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error shared by item and period persistence.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// Insert referenced a period id that does not exist.
    UnknownPeriod(PeriodId),
}

impl RepoError {
    /// Stable short code used in log lines.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Db(_) => "db_error",
            Self::UnknownPeriod(_) => "unknown_period",
        }
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::UnknownPeriod(id) => write!(f, "period not found: {id}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::UnknownPeriod(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Runs one repository operation and logs its failure, if any.
pub(crate) fn logged<T>(
    operation: &'static str,
    run: impl FnOnce() -> RepoResult<T>,
) -> RepoResult<T> {
    run().map_err(|err| {
        error!(
            "event=repo_call module=repo status=error op={operation} error_code={} error={err}",
            err.code()
        );
        err
    })
}
