//! End-to-end import flows: fetch raw entries, enrich them against the
//! metadata source, absorb into the session, and normalize for display.

use crate::enrich::{self, EnrichOutcome};
use crate::error::ImportError;
use crate::session::Session;
use movie_diary_models::WatchEntry;
use movie_diary_sources::letterboxd::profile;
use movie_diary_sources::{LetterboxdClient, MetadataLookup, MonotonicProgress, ProgressSink};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// What a completed import tells the user. Success and fail counts always
/// sum to the number of raw entries fetched.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ImportSummary {
    pub success_count: usize,
    pub fail_count: usize,
    pub source_title: Option<String>,
    pub source_creator: Option<String>,
}

pub struct Importer {
    letterboxd: LetterboxdClient,
    lookup: Arc<dyn MetadataLookup>,
    lookup_delay: Duration,
}

impl Importer {
    pub fn new(
        letterboxd: LetterboxdClient,
        lookup: Arc<dyn MetadataLookup>,
        lookup_delay: Duration,
    ) -> Self {
        Self {
            letterboxd,
            lookup,
            lookup_delay,
        }
    }

    /// Import one month of a profile's diary into the session.
    pub async fn import_diary(
        &self,
        session: &mut Session,
        input: &str,
        progress: &dyn ProgressSink,
    ) -> Result<ImportSummary, ImportError> {
        let username = profile::parse_profile_input(input).ok_or_else(|| {
            ImportError::Source(movie_diary_sources::SourceError::InvalidInput {
                input: input.to_string(),
            })
        })?;
        let progress = MonotonicProgress::new(progress);
        let target = session.target();

        let entries = self
            .letterboxd
            .fetch_diary(&username, &target, &progress)
            .await?;
        if entries.is_empty() {
            return Err(ImportError::NoEntries {
                month: target.to_string(),
            });
        }

        progress.report(
            40,
            &format!("Found {} diary entries. Fetching posters...", entries.len()),
        );
        let outcome =
            enrich::enrich_watch_entries(&*self.lookup, &entries, self.lookup_delay, &progress)
                .await;
        let summary = self.finish_diary(session, outcome, None, None)?;

        progress.report(100, "Complete!");
        info!(
            success = summary.success_count,
            failed = summary.fail_count,
            username,
            "diary import finished"
        );
        Ok(summary)
    }

    /// Import a public list or watchlist, replacing the current collection.
    pub async fn import_list(
        &self,
        session: &mut Session,
        input: &str,
        progress: &dyn ProgressSink,
    ) -> Result<ImportSummary, ImportError> {
        let target = profile::parse_list_input(input).ok_or_else(|| {
            ImportError::Source(movie_diary_sources::SourceError::InvalidInput {
                input: input.to_string(),
            })
        })?;
        let progress = MonotonicProgress::new(progress);

        let list = self.letterboxd.fetch_list(&target, &progress).await?;
        if list.entries.is_empty() {
            return Err(ImportError::EmptyList { url: target.url });
        }

        progress.report(
            40,
            &format!("Found {} films. Fetching posters...", list.entries.len()),
        );
        let outcome =
            enrich::enrich_list_entries(&*self.lookup, &list.entries, self.lookup_delay, &progress)
                .await;

        let summary = ImportSummary {
            success_count: outcome.success_count,
            fail_count: outcome.fail_count,
            source_title: Some(list.title.clone()),
            source_creator: Some(list.creator.clone()),
        };
        session.absorb_list(list.title, list.creator, outcome.movies);
        session.sort_for_display();

        progress.report(100, "Complete!");
        info!(
            success = summary.success_count,
            failed = summary.fail_count,
            "list import finished"
        );
        Ok(summary)
    }

    /// Resolve a single manually-entered title and add it to the collection.
    /// Returns the added movie; a failed lookup is fatal here, unlike during
    /// bulk imports.
    pub async fn add_manual(
        &self,
        session: &mut Session,
        entry: WatchEntry,
        progress: &dyn ProgressSink,
    ) -> Result<movie_diary_models::Movie, ImportError> {
        let title = entry.title.clone();
        let outcome = enrich::enrich_watch_entries(
            &*self.lookup,
            std::slice::from_ref(&entry),
            self.lookup_delay,
            progress,
        )
        .await;
        if outcome.movies.is_empty() {
            return Err(ImportError::NotFound { title });
        }

        session.absorb_diary(outcome.movies)?;
        // The freshly absorbed movie carries the highest id in the session.
        let added = session
            .movies()
            .iter()
            .max_by_key(|m| m.id)
            .cloned()
            .ok_or(ImportError::NotFound { title })?;
        session.sort_for_display();
        Ok(added)
    }

    fn finish_diary(
        &self,
        session: &mut Session,
        outcome: EnrichOutcome,
        source_title: Option<String>,
        source_creator: Option<String>,
    ) -> Result<ImportSummary, ImportError> {
        let summary = ImportSummary {
            success_count: outcome.success_count,
            fail_count: outcome.fail_count,
            source_title,
            source_creator,
        };
        session.absorb_diary(outcome.movies)?;
        session.sort_for_display();
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::CollectionMode;
    use async_trait::async_trait;
    use movie_diary_config::FetchConfig;
    use movie_diary_models::{PosterCandidate, TargetMonth};
    use movie_diary_sources::{MovieMatch, NullProgress, SourceError};

    struct FakeLookup {
        known: Vec<&'static str>,
    }

    #[async_trait]
    impl MetadataLookup for FakeLookup {
        async fn search_movie(
            &self,
            title: &str,
            _year: Option<i32>,
        ) -> Result<Option<MovieMatch>, SourceError> {
            if !self.known.contains(&title) {
                return Ok(None);
            }
            Ok(Some(MovieMatch {
                tmdb_id: 42,
                title: title.to_string(),
                release_date: Some("1995-12-15".to_string()),
                poster_url: Some("https://img.test/heat.jpg".to_string()),
            }))
        }

        async fn poster_candidates(
            &self,
            _tmdb_id: u64,
        ) -> Result<Vec<PosterCandidate>, SourceError> {
            Ok(vec![])
        }
    }

    fn create_importer(known: Vec<&'static str>) -> Importer {
        Importer::new(
            LetterboxdClient::new(&FetchConfig::default()),
            Arc::new(FakeLookup { known }),
            Duration::ZERO,
        )
    }

    fn create_entry(title: &str) -> WatchEntry {
        WatchEntry {
            title: title.to_string(),
            release_year: None,
            rating: Some(4.5),
            is_rewatch: false,
            watched_date: None,
        }
    }

    #[tokio::test]
    async fn test_add_manual_resolves_and_absorbs() {
        let importer = create_importer(vec!["Heat"]);
        let mut session = Session::new(TargetMonth::new(2026, 1).unwrap());

        let added = importer
            .add_manual(&mut session, create_entry("Heat"), &NullProgress)
            .await
            .unwrap();
        assert_eq!(added.title, "Heat");
        assert_eq!(added.year, Some(1995));
        assert_eq!(session.mode(), CollectionMode::Diary);
        assert_eq!(session.movies().len(), 1);
    }

    #[tokio::test]
    async fn test_add_manual_unknown_title_is_fatal() {
        let importer = create_importer(vec![]);
        let mut session = Session::new(TargetMonth::new(2026, 1).unwrap());

        let err = importer
            .add_manual(&mut session, create_entry("Nonexistent"), &NullProgress)
            .await
            .unwrap_err();
        assert!(matches!(err, ImportError::NotFound { title } if title == "Nonexistent"));
        assert!(session.is_empty());
    }

    #[tokio::test]
    async fn test_add_manual_into_list_mode_conflicts() {
        let importer = create_importer(vec!["Heat"]);
        let mut session = Session::new(TargetMonth::new(2026, 1).unwrap());
        session.absorb_list("Best".to_string(), "dave".to_string(), vec![]);

        let err = importer
            .add_manual(&mut session, create_entry("Heat"), &NullProgress)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ImportError::Session(crate::error::SessionError::ModeConflict)
        ));
    }

    #[tokio::test]
    async fn test_import_diary_rejects_malformed_input() {
        let importer = create_importer(vec![]);
        let mut session = Session::new(TargetMonth::new(2026, 1).unwrap());

        let err = importer
            .import_diary(&mut session, "https://example.com/not-letterboxd", &NullProgress)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ImportError::Source(SourceError::InvalidInput { .. })
        ));
    }
}
