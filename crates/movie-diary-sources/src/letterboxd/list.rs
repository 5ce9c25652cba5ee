//! List/watchlist page parser. Film data lives in `data-*` attributes on the
//! poster containers; header elements are optional and fall back to generic
//! defaults. Elements without a film name are decorative and skipped.

use crate::error::SourceError;
use movie_diary_models::{FilmList, ListEntry};
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

/// Structural marker a relay payload must contain to count as a list page.
pub const PAGE_MARKER: &str = "film-poster";

const DEFAULT_TITLE: &str = "Imported List";

fn sel(selector: &str) -> Result<Selector, SourceError> {
    Selector::parse(selector).map_err(|e| SourceError::Parse(format!("selector {selector}: {e}")))
}

fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

pub fn parse_list_page(html: &str, creator: &str) -> Result<FilmList, SourceError> {
    let title_sel = sel("h1.title-1")?;
    let description_sel = sel(".list-title-intro .body-text p")?;
    let container_sel = sel("li.poster-container")?;
    let poster_sel = sel("div.film-poster")?;
    let img_sel = sel("img")?;

    let document = Html::parse_document(html);

    let title = document
        .select(&title_sel)
        .next()
        .map(text_of)
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| DEFAULT_TITLE.to_string());
    let description = document
        .select(&description_sel)
        .next()
        .map(text_of)
        .filter(|d| !d.is_empty());

    let mut entries = Vec::new();
    for container in document.select(&container_sel) {
        let Some(poster) = container.select(&poster_sel).next() else {
            continue;
        };

        // Structured attribute first, image alt text as fallback.
        let title = poster
            .value()
            .attr("data-film-name")
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .or_else(|| {
                poster
                    .select(&img_sel)
                    .next()
                    .and_then(|img| img.value().attr("alt"))
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .map(str::to_string)
            });
        let Some(title) = title else {
            continue;
        };

        let release_year = poster
            .value()
            .attr("data-film-release-year")
            .and_then(|y| y.trim().parse().ok());
        let community_rating = container
            .value()
            .attr("data-average-rating")
            .and_then(|r| r.trim().parse().ok());

        entries.push(ListEntry {
            title,
            release_year,
            community_rating,
            original_index: entries.len(),
        });
    }

    debug!(title = title.as_str(), entries = entries.len(), "parsed list page");
    Ok(FilmList {
        title,
        description,
        creator: creator.to_string(),
        entries,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn poster_li(name: Option<&str>, alt: Option<&str>, year: Option<i32>, avg: Option<f32>) -> String {
        let name_attr = name.map(|n| format!(" data-film-name=\"{n}\"")).unwrap_or_default();
        let year_attr = year
            .map(|y| format!(" data-film-release-year=\"{y}\""))
            .unwrap_or_default();
        let avg_attr = avg
            .map(|r| format!(" data-average-rating=\"{r}\""))
            .unwrap_or_default();
        let img = alt
            .map(|a| format!("<img alt=\"{a}\" src=\"/p.jpg\"/>"))
            .unwrap_or_default();
        format!(
            "<li class=\"poster-container\"{avg_attr}>\
               <div class=\"film-poster\"{name_attr}{year_attr}>{img}</div>\
             </li>"
        )
    }

    fn list_page(header: &str, items: &[String]) -> String {
        format!(
            "<html><body>{header}<ul class=\"poster-list\">{}</ul></body></html>",
            items.join("")
        )
    }

    #[test]
    fn test_entries_preserve_document_order() {
        let html = list_page(
            "<div class=\"list-title-intro\"><h1 class=\"title-1\">Best of 2024</h1>\
             <div class=\"body-text\"><p>My favorites.</p></div></div>",
            &[
                poster_li(Some("Conclave"), None, Some(2024), Some(4.2)),
                poster_li(Some("Anora"), None, Some(2024), None),
                poster_li(Some("Nosferatu"), None, Some(2024), Some(3.9)),
            ],
        );
        let list = parse_list_page(&html, "dave").unwrap();
        assert_eq!(list.title, "Best of 2024");
        assert_eq!(list.description.as_deref(), Some("My favorites."));
        assert_eq!(list.creator, "dave");

        let titles: Vec<&str> = list.entries.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Conclave", "Anora", "Nosferatu"]);
        let indices: Vec<usize> = list.entries.iter().map(|e| e.original_index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
        assert_eq!(list.entries[0].community_rating, Some(4.2));
        assert_eq!(list.entries[1].community_rating, None);
    }

    #[test]
    fn test_title_falls_back_to_image_alt() {
        let html = list_page("", &[poster_li(None, Some("Anora"), Some(2024), None)]);
        let list = parse_list_page(&html, "dave").unwrap();
        assert_eq!(list.entries[0].title, "Anora");
    }

    #[test]
    fn test_missing_header_uses_generic_default() {
        let html = list_page("", &[poster_li(Some("Anora"), None, None, None)]);
        let list = parse_list_page(&html, "dave").unwrap();
        assert_eq!(list.title, DEFAULT_TITLE);
        assert_eq!(list.description, None);
    }

    #[test]
    fn test_decorative_elements_are_skipped_without_renumbering() {
        let html = list_page(
            "",
            &[
                poster_li(Some("Conclave"), None, None, None),
                poster_li(None, None, None, None), // no name anywhere
                poster_li(Some("Anora"), None, None, None),
            ],
        );
        let list = parse_list_page(&html, "dave").unwrap();
        assert_eq!(list.entries.len(), 2);
        assert_eq!(list.entries[1].title, "Anora");
        assert_eq!(list.entries[1].original_index, 1);
    }
}
