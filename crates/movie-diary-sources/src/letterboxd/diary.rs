//! Paginated diary page parser. A diary page is a table of rows; every
//! extraction here is optional and every bad row is skipped, because the
//! upstream markup is a third-party site that changes without notice.

use crate::error::SourceError;
use movie_diary_models::{TargetMonth, WatchEntry};
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, trace};

/// Rows per full diary page; a shorter page is the last one.
pub const PAGE_SIZE: usize = 50;

/// Structural marker a relay payload must contain to count as a diary page.
pub const PAGE_MARKER: &str = "diary-table";

/// One parsed page: entries matching the target month plus the raw row count
/// (before filtering), which drives the fetcher's partial-page detection.
#[derive(Debug, Clone, PartialEq)]
pub struct DiaryPage {
    pub entries: Vec<WatchEntry>,
    pub row_count: usize,
}

fn sel(selector: &str) -> Result<Selector, SourceError> {
    Selector::parse(selector).map_err(|e| SourceError::Parse(format!("selector {selector}: {e}")))
}

fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn has_class(element: ElementRef<'_>, class: &str) -> bool {
    element.value().classes().any(|c| c == class)
}

/// Recover (year, month) from a calendar navigation href like
/// `/user/films/diary/for/2026/01/`.
fn month_year_from_href(href: &str) -> Option<(i32, u32)> {
    let mut segments = href.split_once("/for/")?.1.split('/');
    let year = segments.next()?.parse().ok()?;
    let month: u32 = segments.next()?.parse().ok()?;
    (1..=12).contains(&month).then_some((year, month))
}

/// Half-star rating decoded from a `rated-N` class (N on the 0-10 scale).
fn rating_from_classes(element: ElementRef<'_>) -> Option<f32> {
    element
        .value()
        .classes()
        .find_map(|c| c.strip_prefix("rated-"))
        .and_then(|n| n.parse::<u8>().ok())
        .filter(|n| (1..=10).contains(n))
        .map(|n| f32::from(n) / 2.0)
}

pub fn parse_diary_page(html: &str, target: &TargetMonth) -> Result<DiaryPage, SourceError> {
    let row_sel = sel("tr.diary-entry-row")?;
    let calendar_sel = sel("td.td-calendar a")?;
    let day_sel = sel("td.td-day a")?;
    let title_sel = sel("td.td-film-details h3 a")?;
    let released_sel = sel("td.td-released")?;
    let rating_sel = sel("td.td-rating .rating")?;
    let rewatch_sel = sel("td.td-rewatch")?;

    let document = Html::parse_document(html);
    let mut entries = Vec::new();
    let mut row_count = 0;
    // The calendar link appears only on the first row of a month group;
    // later rows inherit the last seen month/year.
    let mut current_month = (target.year(), target.month());

    for row in document.select(&row_sel) {
        row_count += 1;

        if let Some((year, month)) = row
            .select(&calendar_sel)
            .next()
            .and_then(|a| a.value().attr("href"))
            .and_then(month_year_from_href)
        {
            current_month = (year, month);
        }

        let Some(title) = row.select(&title_sel).next().map(text_of).filter(|t| !t.is_empty())
        else {
            trace!("diary row without a title skipped");
            continue;
        };

        let Some(date) = row
            .select(&day_sel)
            .next()
            .and_then(|a| text_of(a).parse::<u32>().ok())
            .and_then(|day| {
                chrono::NaiveDate::from_ymd_opt(current_month.0, current_month.1, day)
            })
        else {
            trace!(title = title.as_str(), "diary row without a valid date skipped");
            continue;
        };
        if !target.contains(date) {
            continue;
        }

        let release_year = row
            .select(&released_sel)
            .next()
            .and_then(|td| text_of(td).parse().ok());
        let rating = row.select(&rating_sel).next().and_then(rating_from_classes);
        let is_rewatch = row
            .select(&rewatch_sel)
            .next()
            .map(|td| !has_class(td, "icon-status-off"))
            .unwrap_or(false);

        entries.push(WatchEntry {
            title,
            release_year,
            rating,
            is_rewatch,
            watched_date: Some(date),
        });
    }

    debug!(rows = row_count, matched = entries.len(), "parsed diary page");
    Ok(DiaryPage { entries, row_count })
}
