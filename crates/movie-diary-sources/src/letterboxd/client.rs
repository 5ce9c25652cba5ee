use crate::error::SourceError;
use crate::letterboxd::profile::{self, ListTarget};
use crate::letterboxd::{diary, list, rss};
use crate::progress::{MonotonicProgress, ProgressSink};
use crate::relay::RelayChain;
use movie_diary_config::FetchConfig;
use movie_diary_models::{FilmList, TargetMonth, WatchEntry};
use reqwest::Client;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Hard ceiling on diary pages fetched for one month.
const MAX_PAGES: u32 = 10;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/143.0.0.0 Safari/537.36";

/// Fetches diary and list content from a public Letterboxd profile through
/// the relay chain. Strategy for diaries: paginated HTML first (supports
/// large months), RSS feed as the fallback when page 1 fails everywhere.
pub struct LetterboxdClient {
    client: Arc<Client>,
    relays: RelayChain,
    page_delay: Duration,
}

impl LetterboxdClient {
    pub fn new(config: &FetchConfig) -> Self {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_default();
        Self {
            client: Arc::new(client),
            relays: RelayChain::new(config.relays.clone()),
            page_delay: Duration::from_millis(config.page_delay_ms),
        }
    }

    /// Fetch one month of diary entries for a profile.
    pub async fn fetch_diary(
        &self,
        username: &str,
        target: &TargetMonth,
        progress: &dyn ProgressSink,
    ) -> Result<Vec<WatchEntry>, SourceError> {
        let progress = MonotonicProgress::new(progress);
        progress.report(10, &format!("Fetching {username}'s diary for {target}..."));

        match self.fetch_diary_paginated(username, target, &progress).await {
            Ok(entries) => {
                info!(count = entries.len(), username, "diary fetched via pagination");
                Ok(entries)
            }
            Err(e) => {
                // Page 1 failed on every relay: not a partial failure, but the
                // trigger to abandon pagination and try the feed.
                warn!(username, error = %e, "pagination failed, falling back to RSS");
                let entries = self
                    .fetch_diary_rss(username, target, &progress)
                    .await
                    .map_err(|e| {
                        warn!(username, error = %e, "RSS fallback failed");
                        SourceError::ProfileUnavailable {
                            username: username.to_string(),
                        }
                    })?;
                info!(count = entries.len(), username, "diary fetched via RSS fallback");
                Ok(entries)
            }
        }
    }

    async fn fetch_diary_paginated(
        &self,
        username: &str,
        target: &TargetMonth,
        progress: &dyn ProgressSink,
    ) -> Result<Vec<WatchEntry>, SourceError> {
        paginate(target, self.page_delay, progress, |page| {
            let url = profile::diary_page_url(username, target.year(), target.month(), page);
            async move { self.relays.fetch(&self.client, &url, diary::PAGE_MARKER).await }
        })
        .await
    }

    async fn fetch_diary_rss(
        &self,
        username: &str,
        target: &TargetMonth,
        progress: &dyn ProgressSink,
    ) -> Result<Vec<WatchEntry>, SourceError> {
        let url = profile::rss_url(username);
        progress.report(15, &format!("Fetching {username}'s RSS feed..."));
        let xml = self.relays.fetch(&self.client, &url, "<item>").await?;
        if !xml.contains("letterboxd") {
            return Err(SourceError::RelaysExhausted { url });
        }
        progress.report(38, "Parsing diary entries...");
        rss::parse_feed(&xml, target)
    }

    /// Fetch and parse a public list or watchlist page.
    pub async fn fetch_list(
        &self,
        target: &ListTarget,
        progress: &dyn ProgressSink,
    ) -> Result<FilmList, SourceError> {
        let progress = MonotonicProgress::new(progress);
        progress.report(10, &format!("Fetching list from {}...", target.creator));
        let html = self
            .relays
            .fetch(&self.client, &target.url, list::PAGE_MARKER)
            .await
            .map_err(|e| {
                warn!(url = target.url.as_str(), error = %e, "list fetch failed");
                SourceError::ListUnavailable {
                    url: target.url.clone(),
                }
            })?;
        progress.report(38, "Parsing list entries...");
        list::parse_list_page(&html, &target.creator)
    }
}

/// Pagination loop, generic over the page getter so the stop conditions are
/// testable without a network. Stops on a partial page (fewer rows than the
/// page size), a failed later page, or the page ceiling.
async fn paginate<G, Fut>(
    target: &TargetMonth,
    page_delay: Duration,
    progress: &dyn ProgressSink,
    fetch_page: G,
) -> Result<Vec<WatchEntry>, SourceError>
where
    G: Fn(u32) -> Fut,
    Fut: Future<Output = Result<String, SourceError>>,
{
    let mut entries = Vec::new();
    for page in 1..=MAX_PAGES {
        // Per-page increments capped at 35%; enrichment owns 40% onwards.
        progress.report(
            (10 + page * 5).min(35) as u8,
            &format!("Fetching diary page {page}..."),
        );

        let body = match fetch_page(page).await {
            Ok(body) => body,
            Err(e) if page == 1 => return Err(e),
            Err(e) => {
                warn!(page, error = %e, "diary page failed after retries, stopping pagination");
                break;
            }
        };

        let parsed = diary::parse_diary_page(&body, target)?;
        debug!(page, rows = parsed.row_count, "diary page fetched");
        entries.extend(parsed.entries);

        if parsed.row_count < diary::PAGE_SIZE {
            break;
        }
        // Throttle between full pages to stay under the relays' rate limits.
        if !page_delay.is_zero() {
            tokio::time::sleep(page_delay).await;
        }
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::NullProgress;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn diary_row(title: &str, day: u32) -> String {
        format!(
            "<tr class=\"diary-entry-row\">\
             <td class=\"td-calendar\"><a href=\"/u/films/diary/for/2026/01/\">cal</a></td>\
             <td class=\"td-day\"><a href=\"/x/\">{day}</a></td>\
             <td class=\"td-film-details\"><h3><a href=\"/film/x/\">{title}</a></h3></td>\
             <td class=\"td-released\">2024</td>\
             <td class=\"td-rating\"><span class=\"rating rated-6\">s</span></td>\
             <td class=\"td-rewatch icon-status-off\"></td></tr>"
        )
    }

    fn diary_page_with(rows: usize) -> String {
        let rows: String = (0..rows)
            .map(|i| diary_row(&format!("Film {i}"), 1 + (i % 28) as u32))
            .collect();
        format!("<table id=\"diary-table\"><tbody>{rows}</tbody></table>")
    }

    fn january() -> TargetMonth {
        TargetMonth::new(2026, 1).unwrap()
    }

    #[tokio::test]
    async fn test_partial_page_stops_pagination() {
        let calls = AtomicU32::new(0);
        let entries = paginate(&january(), Duration::ZERO, &NullProgress, |page| {
            calls.fetch_add(1, Ordering::SeqCst);
            async move {
                Ok(match page {
                    1 => diary_page_with(50),
                    2 => diary_page_with(12),
                    _ => panic!("page {page} should never be requested"),
                })
            }
        })
        .await
        .unwrap();

        assert_eq!(entries.len(), 62);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_first_page_failure_aborts_pagination() {
        let result = paginate(&january(), Duration::ZERO, &NullProgress, |_page| async {
            Err(SourceError::RelaysExhausted {
                url: "page".to_string(),
            })
        })
        .await;
        assert!(matches!(result, Err(SourceError::RelaysExhausted { .. })));
    }

    #[tokio::test]
    async fn test_later_page_failure_keeps_earlier_entries() {
        let entries = paginate(&january(), Duration::ZERO, &NullProgress, |page| async move {
            match page {
                1 => Ok(diary_page_with(50)),
                _ => Err(SourceError::RelaysExhausted {
                    url: "page".to_string(),
                }),
            }
        })
        .await
        .unwrap();
        assert_eq!(entries.len(), 50);
    }

    #[tokio::test]
    async fn test_page_ceiling_bounds_requests() {
        let calls = AtomicU32::new(0);
        let _ = paginate(&january(), Duration::ZERO, &NullProgress, |_page| {
            calls.fetch_add(1, Ordering::SeqCst);
            async move { Ok(diary_page_with(50)) }
        })
        .await
        .unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), MAX_PAGES);
    }
}
