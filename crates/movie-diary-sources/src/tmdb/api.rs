//! TMDB response shapes and the mapping into the unified poster
//! representation.

use movie_diary_models::PosterCandidate;
use serde::Deserialize;

/// Candidate lists are truncated to this many posters.
pub const MAX_POSTER_CANDIDATES: usize = 30;

#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<SearchMovie>,
}

#[derive(Debug, Deserialize)]
pub struct SearchMovie {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ImagesResponse {
    #[serde(default)]
    pub posters: Vec<PosterImage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PosterImage {
    pub file_path: String,
    #[serde(default)]
    pub iso_639_1: Option<String>,
    #[serde(default)]
    pub vote_count: u32,
}

pub fn poster_url(image_base: &str, file_path: &str) -> String {
    let separator = if file_path.starts_with('/') { "" } else { "/" };
    format!("{}{}{}", image_base.trim_end_matches('/'), separator, file_path)
}

/// Map raw poster images into ordered candidates: preferred-language posters
/// first, then by vote count descending, capped at `MAX_POSTER_CANDIDATES`.
pub fn order_candidates(
    mut posters: Vec<PosterImage>,
    image_base: &str,
    preferred_language: &str,
) -> Vec<PosterCandidate> {
    // Two stable passes: votes first, then the language partition on top.
    posters.sort_by_key(|p| std::cmp::Reverse(p.vote_count));
    posters.sort_by_key(|p| p.iso_639_1.as_deref() != Some(preferred_language));

    posters
        .into_iter()
        .take(MAX_POSTER_CANDIDATES)
        .map(|p| PosterCandidate {
            url: poster_url(image_base, &p.file_path),
            is_preferred_language: p.iso_639_1.as_deref() == Some(preferred_language),
            language_tag: p.iso_639_1,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const IMAGE_BASE: &str = "https://image.tmdb.org/t/p/w500";

    fn poster(path: &str, language: Option<&str>, votes: u32) -> PosterImage {
        PosterImage {
            file_path: path.to_string(),
            iso_639_1: language.map(str::to_string),
            vote_count: votes,
        }
    }

    #[test]
    fn test_poster_url_joins_path() {
        assert_eq!(
            poster_url(IMAGE_BASE, "/abc.jpg"),
            "https://image.tmdb.org/t/p/w500/abc.jpg"
        );
        assert_eq!(
            poster_url("https://image.tmdb.org/t/p/w500/", "abc.jpg"),
            "https://image.tmdb.org/t/p/w500/abc.jpg"
        );
    }

    #[test]
    fn test_preferred_language_sorts_first_then_votes() {
        let candidates = order_candidates(
            vec![
                poster("/fr-popular.jpg", Some("fr"), 900),
                poster("/en-few.jpg", Some("en"), 3),
                poster("/en-many.jpg", Some("en"), 40),
                poster("/untagged.jpg", None, 500),
            ],
            IMAGE_BASE,
            "en",
        );
        let urls: Vec<&str> = candidates.iter().map(|c| c.url.as_str()).collect();
        assert_eq!(
            urls,
            vec![
                "https://image.tmdb.org/t/p/w500/en-many.jpg",
                "https://image.tmdb.org/t/p/w500/en-few.jpg",
                "https://image.tmdb.org/t/p/w500/fr-popular.jpg",
                "https://image.tmdb.org/t/p/w500/untagged.jpg",
            ]
        );
        assert!(candidates[0].is_preferred_language);
        assert!(!candidates[2].is_preferred_language);
        assert_eq!(candidates[3].language_tag, None);
    }

    #[test]
    fn test_candidates_are_truncated() {
        let posters: Vec<PosterImage> = (0..40)
            .map(|i| poster(&format!("/{i}.jpg"), Some("en"), i))
            .collect();
        let candidates = order_candidates(posters, IMAGE_BASE, "en");
        assert_eq!(candidates.len(), MAX_POSTER_CANDIDATES);
    }
}
