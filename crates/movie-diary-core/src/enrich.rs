//! Entry enrichment: resolve raw diary/list entries against the metadata
//! lookup, one at a time and in input order. Per-entry failures are counted,
//! never fatal; partial success is the expected common case for large months.

use chrono::Datelike;
use movie_diary_models::{dates, ListEntry, Movie, PosterCandidate, WatchEntry};
use movie_diary_sources::{MetadataLookup, ProgressSink, SourceError};
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Debug, Default)]
pub struct EnrichOutcome {
    /// Successfully resolved movies, in input order, with placeholder ids
    /// (the session assigns real ids when it absorbs them).
    pub movies: Vec<Movie>,
    pub success_count: usize,
    pub fail_count: usize,
}

/// The fields common to both entry kinds that survive into the final movie.
struct Seed {
    title: String,
    year: Option<i32>,
    rating: Option<f32>,
    is_rewatch: bool,
    watched_date: Option<chrono::NaiveDate>,
    original_index: Option<usize>,
}

impl From<&WatchEntry> for Seed {
    fn from(entry: &WatchEntry) -> Self {
        Self {
            title: entry.title.clone(),
            year: entry.release_year,
            rating: entry.rating,
            is_rewatch: entry.is_rewatch,
            watched_date: entry.watched_date,
            original_index: None,
        }
    }
}

impl From<&ListEntry> for Seed {
    fn from(entry: &ListEntry) -> Self {
        Self {
            title: entry.title.clone(),
            year: entry.release_year,
            rating: entry.community_rating,
            is_rewatch: false,
            watched_date: None,
            original_index: Some(entry.original_index),
        }
    }
}

pub async fn enrich_watch_entries(
    lookup: &dyn MetadataLookup,
    entries: &[WatchEntry],
    lookup_delay: Duration,
    progress: &dyn ProgressSink,
) -> EnrichOutcome {
    enrich(lookup, entries.iter().map(Seed::from).collect(), lookup_delay, progress).await
}

pub async fn enrich_list_entries(
    lookup: &dyn MetadataLookup,
    entries: &[ListEntry],
    lookup_delay: Duration,
    progress: &dyn ProgressSink,
) -> EnrichOutcome {
    enrich(lookup, entries.iter().map(Seed::from).collect(), lookup_delay, progress).await
}

async fn enrich(
    lookup: &dyn MetadataLookup,
    seeds: Vec<Seed>,
    lookup_delay: Duration,
    progress: &dyn ProgressSink,
) -> EnrichOutcome {
    let total = seeds.len();
    let mut outcome = EnrichOutcome::default();

    for (index, seed) in seeds.into_iter().enumerate() {
        // Enrichment owns the 40-95% band of the import.
        let percent = 40 + ((index + 1) * 55 / total.max(1)) as u8;
        progress.report(
            percent,
            &format!("Fetching \"{}\" ({}/{})", seed.title, index + 1, total),
        );

        match resolve(lookup, &seed).await {
            Ok(Some(movie)) => {
                debug!(title = movie.title.as_str(), tmdb_id = movie.tmdb_id, "entry resolved");
                outcome.movies.push(movie);
                outcome.success_count += 1;
                if !lookup_delay.is_zero() {
                    tokio::time::sleep(lookup_delay).await;
                }
            }
            Ok(None) => {
                warn!(title = seed.title.as_str(), "no match or no poster, entry skipped");
                outcome.fail_count += 1;
            }
            Err(e) => {
                warn!(title = seed.title.as_str(), error = %e, "lookup failed, entry skipped");
                outcome.fail_count += 1;
            }
        }
    }

    outcome
}

/// Resolve one seed: search, require a primary poster, fetch the candidate
/// list, and carry the raw entry's fields over. `Ok(None)` is a per-entry
/// failure (no match or no usable image).
async fn resolve(lookup: &dyn MetadataLookup, seed: &Seed) -> Result<Option<Movie>, SourceError> {
    let Some(matched) = lookup.search_movie(&seed.title, seed.year).await? else {
        return Ok(None);
    };
    let Some(poster_url) = matched.poster_url else {
        return Ok(None);
    };

    let mut poster_candidates = lookup.poster_candidates(matched.tmdb_id).await?;
    // The primary poster must appear as a candidate even when the image
    // endpoint omits it.
    if !poster_candidates.iter().any(|c| c.url == poster_url) {
        poster_candidates.insert(
            0,
            PosterCandidate {
                url: poster_url.clone(),
                language_tag: None,
                is_preferred_language: false,
            },
        );
    }

    // Canonical year prefers the metadata release date, falling back to the
    // year the raw entry carried.
    let year = matched
        .release_date
        .as_deref()
        .and_then(dates::parse_strict)
        .map(|d| d.year())
        .or(seed.year);

    Ok(Some(Movie {
        id: 0,
        tmdb_id: matched.tmdb_id,
        title: matched.title,
        year,
        poster_url,
        custom_poster_url: None,
        poster_candidates,
        rating: seed.rating,
        is_rewatch: seed.is_rewatch,
        watched_date: seed.watched_date,
        watch_index: 1,
        original_index: seed.original_index,
    }))
}
