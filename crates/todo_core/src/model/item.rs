//! To-do item model.

use crate::model::period::PeriodId;

/// Database identifier of an item row.
pub type ItemId = i64;

/// A single to-do entry.
///
/// Field names mirror the `items` table columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub id: ItemId,
    /// Foreign key into `periods.id`.
    pub periods_id: PeriodId,
    pub title: String,
}
