use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One cover-art option for a film, tagged by language.
/// Candidate lists are pre-sorted preferred-language-first, then popularity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PosterCandidate {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_tag: Option<String>,
    pub is_preferred_language: bool,
}

/// A fully enriched entry in the collection: raw diary/list data joined with
/// canonical metadata from TMDB.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    pub id: u64, // session-local, assigned when absorbed into the collection
    pub tmdb_id: u64,
    pub title: String,
    pub year: Option<i32>, // None renders as "N/A"
    pub poster_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_poster_url: Option<String>, // user override, takes display precedence
    pub poster_candidates: Vec<PosterCandidate>,
    pub rating: Option<f32>, // 0-5, half steps; community average in list mode
    pub is_rewatch: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub watched_date: Option<NaiveDate>,
    pub watch_index: u32, // 1-based ordinal among watches of the same film
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_index: Option<usize>, // list mode only
}

impl Movie {
    /// The poster to show: the user's override wins over the TMDB primary.
    pub fn display_poster_url(&self) -> &str {
        self.custom_poster_url.as_deref().unwrap_or(&self.poster_url)
    }

    pub fn display_year(&self) -> String {
        self.year
            .map(|y| y.to_string())
            .unwrap_or_else(|| "N/A".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_movie() -> Movie {
        Movie {
            id: 1,
            tmdb_id: 550,
            title: "Fight Club".to_string(),
            year: Some(1999),
            poster_url: "https://image.tmdb.org/t/p/w500/a.jpg".to_string(),
            custom_poster_url: None,
            poster_candidates: Vec::new(),
            rating: Some(4.5),
            is_rewatch: false,
            watched_date: None,
            watch_index: 1,
            original_index: None,
        }
    }

    #[test]
    fn test_custom_poster_takes_precedence() {
        let mut movie = create_movie();
        assert_eq!(movie.display_poster_url(), "https://image.tmdb.org/t/p/w500/a.jpg");

        movie.custom_poster_url = Some("https://example.com/mine.jpg".to_string());
        assert_eq!(movie.display_poster_url(), "https://example.com/mine.jpg");
    }

    #[test]
    fn test_display_year_falls_back_to_na() {
        let mut movie = create_movie();
        assert_eq!(movie.display_year(), "1999");

        movie.year = None;
        assert_eq!(movie.display_year(), "N/A");
    }
}
