use crate::error::SourceError;
use crate::tmdb::api::{self, ImagesResponse, SearchResponse};
use crate::traits::{MetadataLookup, MovieMatch};
use async_trait::async_trait;
use movie_diary_config::TmdbConfig;
use movie_diary_models::PosterCandidate;
use reqwest::Client;
use tracing::debug;

/// Concrete metadata lookup backed by the TMDB v3 API.
pub struct TmdbClient {
    client: Client,
    api_key: String,
    language: String,
    base_url: String,
    image_base_url: String,
}

impl TmdbClient {
    pub fn new(config: &TmdbConfig) -> Self {
        Self {
            client: Client::new(),
            api_key: config.api_key.clone(),
            language: config.language.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            image_base_url: config.image_base_url.clone(),
        }
    }
}

#[async_trait]
impl MetadataLookup for TmdbClient {
    async fn search_movie(
        &self,
        title: &str,
        year: Option<i32>,
    ) -> Result<Option<MovieMatch>, SourceError> {
        let mut request = self
            .client
            .get(format!("{}/search/movie", self.base_url))
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("query", title),
                ("language", self.language.as_str()),
                ("page", "1"),
            ]);
        if let Some(year) = year {
            request = request.query(&[("year", year.to_string())]);
        }

        let response = request.send().await?.error_for_status()?;
        let search: SearchResponse = response.json().await?;
        let best = search.results.into_iter().next();
        debug!(title, year, found = best.is_some(), "TMDB search");

        Ok(best.map(|movie| MovieMatch {
            tmdb_id: movie.id,
            title: movie.title,
            release_date: movie.release_date.filter(|d| !d.is_empty()),
            poster_url: movie
                .poster_path
                .map(|path| api::poster_url(&self.image_base_url, &path)),
        }))
    }

    async fn poster_candidates(&self, tmdb_id: u64) -> Result<Vec<PosterCandidate>, SourceError> {
        let response = self
            .client
            .get(format!("{}/movie/{}/images", self.base_url, tmdb_id))
            .query(&[("api_key", self.api_key.as_str())])
            .send()
            .await?
            .error_for_status()?;
        let images: ImagesResponse = response.json().await?;
        debug!(tmdb_id, posters = images.posters.len(), "TMDB images");
        Ok(api::order_candidates(
            images.posters,
            &self.image_base_url,
            &self.language,
        ))
    }
}
