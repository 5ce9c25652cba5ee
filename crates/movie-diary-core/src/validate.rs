//! Poster URL validation. Custom posters are checked before being stored;
//! the batch checker probes every display poster in the collection so the
//! user can spot dead links before exporting.

use crate::error::PosterError;
use futures::future::join_all;
use movie_diary_models::Movie;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

const PROBE_TIMEOUT: Duration = Duration::from_secs(10);
const PROBE_BATCH: usize = 6;

/// A failed probe from a batch check, keyed back to the movie it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct PosterCheck {
    pub id: u64,
    pub title: String,
    pub url: String,
    pub error: PosterError,
}

/// Check that a URL is a reachable http(s) resource that serves an image.
/// The URL and scheme checks happen before any network traffic.
pub async fn validate_poster_url(client: &Client, url: &str) -> Result<(), PosterError> {
    let parsed = reqwest::Url::parse(url).map_err(|_| PosterError::InvalidUrl)?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(PosterError::InvalidUrl);
    }

    let response = tokio::time::timeout(PROBE_TIMEOUT, client.get(parsed).send())
        .await
        .map_err(|_| PosterError::Timeout)?
        .map_err(|_| PosterError::Unreachable)?;
    if !response.status().is_success() {
        return Err(PosterError::Unreachable);
    }

    let is_image = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.starts_with("image/"))
        .unwrap_or(false);
    if !is_image {
        return Err(PosterError::NotAnImage);
    }
    Ok(())
}

/// Probe the display poster of every movie, a few at a time, and collect the
/// failures. An empty result means every poster checked out.
pub async fn check_poster_urls(client: &Client, movies: &[Movie]) -> Vec<PosterCheck> {
    let mut failures = Vec::new();
    for batch in movies.chunks(PROBE_BATCH) {
        let probes = batch.iter().map(|movie| {
            let url = movie.display_poster_url().to_string();
            async move { (movie, url.clone(), validate_poster_url(client, &url).await) }
        });
        for (movie, url, result) in join_all(probes).await {
            if let Err(error) = result {
                debug!(title = movie.title.as_str(), url = url.as_str(), "poster probe failed");
                failures.push(PosterCheck {
                    id: movie.id,
                    title: movie.title.clone(),
                    url,
                    error,
                });
            }
        }
    }
    failures
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_rejects_unparseable_url() {
        let client = Client::new();
        assert_eq!(
            validate_poster_url(&client, "not a url").await,
            Err(PosterError::InvalidUrl)
        );
    }

    #[tokio::test]
    async fn test_rejects_non_http_scheme() {
        let client = Client::new();
        assert_eq!(
            validate_poster_url(&client, "ftp://example.com/poster.jpg").await,
            Err(PosterError::InvalidUrl)
        );
        assert_eq!(
            validate_poster_url(&client, "file:///tmp/poster.jpg").await,
            Err(PosterError::InvalidUrl)
        );
    }
}
