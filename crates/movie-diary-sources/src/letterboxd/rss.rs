//! RSS diary parser. The feed is static XML with film data carried in
//! `letterboxd:*` extension elements, which makes it far more reliable than
//! scraped HTML. Items are filtered to the target month and deduplicated by
//! lowercased title + watched date, since the feed can repeat items.

use crate::error::SourceError;
use movie_diary_models::{dates, TargetMonth, WatchEntry};
use rss::{Channel, Item};
use std::collections::HashSet;
use tracing::{debug, warn};

/// Rating stored when `letterboxd:memberRating` is absent or unparsable.
/// This conflates "unrated" with "3 stars" but matches observed behavior.
const DEFAULT_MEMBER_RATING: f32 = 3.0;

fn ext_value<'a>(item: &'a Item, name: &str) -> Option<&'a str> {
    item.extensions()
        .get("letterboxd")?
        .get(name)?
        .first()?
        .value()
}

/// Decode one feed item; `None` for items outside the target month or with
/// no usable title (discarded silently per the try/skip discipline).
fn parse_item(item: &Item, target: &TargetMonth) -> Option<WatchEntry> {
    let watched_date = dates::parse_watched_date(ext_value(item, "watchedDate")?)?;
    if !target.contains(watched_date) {
        return None;
    }

    let title = ext_value(item, "filmTitle")?.trim().to_string();
    if title.is_empty() {
        return None;
    }

    let release_year = ext_value(item, "filmYear").and_then(|y| y.trim().parse().ok());
    let rating = ext_value(item, "memberRating")
        .and_then(|r| r.trim().parse::<f32>().ok())
        .unwrap_or(DEFAULT_MEMBER_RATING);
    let is_rewatch = ext_value(item, "rewatch") == Some("Yes");

    Some(WatchEntry {
        title,
        release_year,
        rating: Some(rating),
        is_rewatch,
        watched_date: Some(watched_date),
    })
}

/// Parse a full feed into watch entries for the target month.
pub fn parse_feed(xml: &str, target: &TargetMonth) -> Result<Vec<WatchEntry>, SourceError> {
    let channel = Channel::read_from(xml.as_bytes())?;
    debug!(items = channel.items().len(), "parsing RSS feed");

    let mut entries = Vec::new();
    let mut seen = HashSet::new();
    for item in channel.items() {
        let Some(entry) = parse_item(item, target) else {
            continue;
        };
        let key = format!(
            "{}-{}",
            entry.title.to_lowercase(),
            entry.watched_date.map(|d| d.to_string()).unwrap_or_default()
        );
        if !seen.insert(key) {
            warn!(title = entry.title.as_str(), "duplicate feed item skipped");
            continue;
        }
        entries.push(entry);
    }

    debug!(count = entries.len(), target = %target, "RSS entries matched target month");
    Ok(entries)
}
