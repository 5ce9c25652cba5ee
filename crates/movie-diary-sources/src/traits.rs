use crate::error::SourceError;
use async_trait::async_trait;
use movie_diary_models::PosterCandidate;

/// Best match for a title search against the metadata source.
#[derive(Debug, Clone, PartialEq)]
pub struct MovieMatch {
    pub tmdb_id: u64,
    pub title: String,
    pub release_date: Option<String>, // "YYYY-MM-DD" as returned by the API
    pub poster_url: Option<String>,
}

/// The metadata capability the enricher depends on. The concrete TMDB client
/// implements this; tests substitute canned lookups.
#[async_trait]
pub trait MetadataLookup: Send + Sync {
    /// Search by title and optional release year, returning the best match
    /// or `None` when the source knows nothing about the film.
    async fn search_movie(
        &self,
        title: &str,
        year: Option<i32>,
    ) -> Result<Option<MovieMatch>, SourceError>;

    /// All poster variants for a matched film, pre-sorted preferred-language
    /// first then by popularity, truncated to a bounded count.
    async fn poster_candidates(&self, tmdb_id: u64) -> Result<Vec<PosterCandidate>, SourceError>;
}
