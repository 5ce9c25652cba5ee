use serde::{Deserialize, Serialize};

/// A raw film from a list/watchlist page, before metadata enrichment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ListEntry {
    pub title: String,
    pub release_year: Option<i32>,
    pub community_rating: Option<f32>,
    /// Zero-based position in source order, used to restore "original" sort.
    pub original_index: usize,
}

/// Parsed list header plus its entries in document order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FilmList {
    pub title: String,
    pub description: Option<String>,
    pub creator: String,
    pub entries: Vec<ListEntry>,
}
