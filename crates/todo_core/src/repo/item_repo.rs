//! Item repository contracts and SQLite implementation.
//!
//! Updates and deletes use `RETURNING` so callers get the affected row back
//! from the same statement that changed it.

use crate::db::DbError;
use crate::model::item::{Item, ItemId};
use crate::model::period::PeriodId;
use crate::repo::{logged, RepoError, RepoResult};
use rusqlite::{params, Connection, OptionalExtension, Row};

/// Data access contract for to-do items.
pub trait ItemRepository {
    /// Lists items whose period is named `period_name`, by ascending id.
    fn list_items_for_period(&self, period_name: &str) -> RepoResult<Vec<Item>>;
    fn get_item(&self, id: ItemId) -> RepoResult<Option<Item>>;
    /// Inserts a new item and returns the stored row.
    ///
    /// Fails with [`RepoError::UnknownPeriod`] when `period_id` does not exist.
    fn create_item(&self, title: &str, period_id: PeriodId) -> RepoResult<Item>;
    /// Replaces the title of one item. `None` when no row matched.
    fn update_item_title(&self, id: ItemId, title: &str) -> RepoResult<Option<Item>>;
    /// Deletes one item and returns it. `None` when no row matched.
    fn delete_item(&self, id: ItemId) -> RepoResult<Option<Item>>;
}

/// SQLite-backed item repository.
pub struct SqliteItemRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteItemRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ItemRepository for SqliteItemRepository<'_> {
    fn list_items_for_period(&self, period_name: &str) -> RepoResult<Vec<Item>> {
        logged("list_items_for_period", || {
            let mut stmt = self.conn.prepare(
                "SELECT items.id, items.periods_id, items.title
                 FROM items
                 INNER JOIN periods ON items.periods_id = periods.id
                 WHERE periods.period_name = ?1
                 ORDER BY items.id ASC;",
            )?;
            let items = stmt
                .query_map([period_name], parse_item_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(items)
        })
    }

    fn get_item(&self, id: ItemId) -> RepoResult<Option<Item>> {
        logged("get_item", || {
            let item = self
                .conn
                .query_row(
                    "SELECT id, periods_id, title FROM items WHERE id = ?1;",
                    [id],
                    parse_item_row,
                )
                .optional()?;
            Ok(item)
        })
    }

    fn create_item(&self, title: &str, period_id: PeriodId) -> RepoResult<Item> {
        logged("create_item", || {
            // Plain INSERT so the foreign key check completes before we report success.
            self.conn
                .execute(
                    "INSERT INTO items (title, periods_id) VALUES (?1, ?2);",
                    params![title, period_id],
                )
                .map_err(|err| {
                    let err = DbError::from(err);
                    if err.is_foreign_key_violation() {
                        RepoError::UnknownPeriod(period_id)
                    } else {
                        RepoError::Db(err)
                    }
                })?;

            Ok(Item {
                id: self.conn.last_insert_rowid(),
                periods_id: period_id,
                title: title.to_string(),
            })
        })
    }

    fn update_item_title(&self, id: ItemId, title: &str) -> RepoResult<Option<Item>> {
        logged("update_item_title", || {
            let item = self
                .conn
                .query_row(
                    "UPDATE items
                     SET title = ?1
                     WHERE id = ?2
                     RETURNING id, periods_id, title;",
                    params![title, id],
                    parse_item_row,
                )
                .optional()?;
            Ok(item)
        })
    }

    fn delete_item(&self, id: ItemId) -> RepoResult<Option<Item>> {
        logged("delete_item", || {
            let item = self
                .conn
                .query_row(
                    "DELETE FROM items WHERE id = ?1 RETURNING id, periods_id, title;",
                    [id],
                    parse_item_row,
                )
                .optional()?;
            Ok(item)
        })
    }
}

fn parse_item_row(row: &Row<'_>) -> rusqlite::Result<Item> {
    Ok(Item {
        id: row.get("id")?,
        periods_id: row.get("periods_id")?,
        title: row.get("title")?,
    })
}
