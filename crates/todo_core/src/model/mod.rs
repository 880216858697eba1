//! Domain model for periods and the to-do items grouped under them.
//!
//! # Invariants
//! - Every `Item` belongs to exactly one `Period` through `periods_id`.
//! - Periods are managed out of band; the app only reads them.

pub mod item;
pub mod period;
