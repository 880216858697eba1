//! Period repository contracts and SQLite implementation.

use crate::model::period::{Period, PeriodId};
use crate::repo::{logged, RepoResult};
use rusqlite::{Connection, OptionalExtension, Row};

/// Read-only access to the periods table.
pub trait PeriodRepository {
    /// Lists every period, ordered by ascending id.
    fn list_periods(&self) -> RepoResult<Vec<Period>>;
    /// Resolves a period name to its id.
    ///
    /// Returns the lowest matching id if several rows share the name.
    fn resolve_period_id(&self, period_name: &str) -> RepoResult<Option<PeriodId>>;
}

/// SQLite-backed period repository.
pub struct SqlitePeriodRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqlitePeriodRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl PeriodRepository for SqlitePeriodRepository<'_> {
    fn list_periods(&self) -> RepoResult<Vec<Period>> {
        logged("list_periods", || {
            let mut stmt = self
                .conn
                .prepare("SELECT id, period_name FROM periods ORDER BY id ASC;")?;
            let periods = stmt
                .query_map([], parse_period_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(periods)
        })
    }

    fn resolve_period_id(&self, period_name: &str) -> RepoResult<Option<PeriodId>> {
        logged("resolve_period_id", || {
            let id = self
                .conn
                .query_row(
                    "SELECT id FROM periods
                     WHERE period_name = ?1
                     ORDER BY id ASC
                     LIMIT 1;",
                    [period_name],
                    |row| row.get::<_, PeriodId>(0),
                )
                .optional()?;
            Ok(id)
        })
    }
}

fn parse_period_row(row: &Row<'_>) -> rusqlite::Result<Period> {
    Ok(Period {
        id: row.get("id")?,
        period_name: row.get("period_name")?,
    })
}
