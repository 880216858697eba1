//! Period model.

/// Name of the period shown when a request does not pick one.
pub const DEFAULT_PERIOD_NAME: &str = "Today";

/// Database identifier of a period row.
pub type PeriodId = i64;

/// A named grouping (e.g. a day) that items belong to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Period {
    pub id: PeriodId,
    /// Unique human-readable label, e.g. `Today`.
    pub period_name: String,
}

/// Resolves the active period name from an optional, user-supplied value.
///
/// Only a missing value falls back to [`DEFAULT_PERIOD_NAME`]. A present value
/// is used exactly as sent and never checked against existing periods, so
/// unknown or blank names simply match nothing.
pub fn active_period_name(raw: Option<&str>) -> String {
    raw.map_or_else(|| DEFAULT_PERIOD_NAME.to_string(), str::to_string)
}
