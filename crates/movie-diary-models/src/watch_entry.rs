use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A raw diary row as parsed from RSS or a paginated diary page, before
/// metadata enrichment. Title is always non-empty; rows without one are
/// discarded by the parsers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WatchEntry {
    pub title: String,
    pub release_year: Option<i32>,
    pub rating: Option<f32>, // 0-5, half steps
    pub is_rewatch: bool,
    pub watched_date: Option<NaiveDate>,
}
