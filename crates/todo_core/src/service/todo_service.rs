//! To-do board use-case service.
//!
//! # Invariants
//! - The active period is always passed in by the caller; the service keeps
//!   no state between calls.
//! - Service APIs never bypass repository persistence contracts.

use crate::model::item::{Item, ItemId};
use crate::model::period::Period;
use crate::repo::item_repo::{ItemRepository, SqliteItemRepository};
use crate::repo::period_repo::{PeriodRepository, SqlitePeriodRepository};
use crate::repo::RepoResult;
use log::{debug, info};
use rusqlite::Connection;

/// Everything the index page shows for one active period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    pub active_period: String,
    pub items: Vec<Item>,
    pub periods: Vec<Period>,
}

/// Use-case service over item and period repositories.
pub struct TodoService<I: ItemRepository, P: PeriodRepository> {
    items: I,
    periods: P,
}

/// Service flavour backed by one borrowed SQLite connection.
pub type SqliteTodoService<'conn> =
    TodoService<SqliteItemRepository<'conn>, SqlitePeriodRepository<'conn>>;

impl<'conn> SqliteTodoService<'conn> {
    pub fn sqlite(conn: &'conn Connection) -> Self {
        Self::new(
            SqliteItemRepository::new(conn),
            SqlitePeriodRepository::new(conn),
        )
    }
}

impl<I: ItemRepository, P: PeriodRepository> TodoService<I, P> {
    pub fn new(items: I, periods: P) -> Self {
        Self { items, periods }
    }

    /// Loads the items of `active_period` together with every known period.
    ///
    /// An unknown period name yields an empty item list, not an error.
    pub fn board(&self, active_period: &str) -> RepoResult<Board> {
        let items = self.items.list_items_for_period(active_period)?;
        let periods = self.periods.list_periods()?;
        debug!(
            "event=board_load module=service status=ok items={} periods={}",
            items.len(),
            periods.len()
        );
        Ok(Board {
            active_period: active_period.to_string(),
            items,
            periods,
        })
    }

    /// Adds an item under the period named `period_name`.
    ///
    /// Returns `Ok(None)` without inserting anything when the name does not
    /// resolve to a period.
    pub fn add_item(&self, period_name: &str, title: &str) -> RepoResult<Option<Item>> {
        let Some(period_id) = self.periods.resolve_period_id(period_name)? else {
            info!("event=item_add module=service status=skipped reason=unknown_period");
            return Ok(None);
        };
        let item = self.items.create_item(title, period_id)?;
        info!(
            "event=item_add module=service status=ok item_id={} period_id={}",
            item.id, item.periods_id
        );
        Ok(Some(item))
    }

    /// Replaces an item's title. `Ok(None)` when the id does not exist.
    pub fn rename_item(&self, id: ItemId, title: &str) -> RepoResult<Option<Item>> {
        let item = self.items.update_item_title(id, title)?;
        info!(
            "event=item_rename module=service status={} item_id={id}",
            found_status(item.is_some())
        );
        Ok(item)
    }

    /// Deletes an item. `Ok(None)` when the id does not exist.
    pub fn remove_item(&self, id: ItemId) -> RepoResult<Option<Item>> {
        let item = self.items.delete_item(id)?;
        info!(
            "event=item_remove module=service status={} item_id={id}",
            found_status(item.is_some())
        );
        Ok(item)
    }
}

fn found_status(found: bool) -> &'static str {
    if found {
        "ok"
    } else {
        "not_found"
    }
}
