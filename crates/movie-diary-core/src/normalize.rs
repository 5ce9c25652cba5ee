//! Collection normalization: chronological ordering, per-film watch indices,
//! and the list-mode sort criteria. All pure functions over the collection.

use movie_diary_models::Movie;
use std::collections::HashMap;

/// Sort criteria for list-mode collections. List sorts never touch watch
/// indices; rewatch semantics only exist in diary mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListSort {
    /// Source order, restored through `original_index`.
    #[default]
    Original,
    RatingAsc,
    RatingDesc,
    YearAsc,
    YearDesc,
    Title,
}

/// Order by watched date ascending. Entries without a date sort as the epoch
/// (earliest). The sort is stable, so equal dates keep insertion order.
pub fn sort_chronologically(movies: &mut [Movie]) {
    movies.sort_by_key(|m| m.watched_date.unwrap_or_default());
}

/// Key identifying "the same film" for rewatch counting.
pub fn rewatch_key(title: &str, year: Option<i32>) -> String {
    format!(
        "{}-{}",
        title.to_lowercase(),
        year.map(|y| y.to_string()).unwrap_or_else(|| "unknown".to_string())
    )
}

/// Walk the (already sorted) collection and assign each occurrence of a film
/// an incrementing per-film counter from 1. Independent of the `is_rewatch`
/// flag, which records what the source claimed rather than what the
/// collection contains.
pub fn compute_watch_indices(movies: &mut [Movie]) {
    let mut counts: HashMap<String, u32> = HashMap::new();
    for movie in movies.iter_mut() {
        let count = counts.entry(rewatch_key(&movie.title, movie.year)).or_insert(0);
        *count += 1;
        movie.watch_index = *count;
    }
}

pub fn sort_for_list(movies: &mut [Movie], sort: ListSort) {
    match sort {
        ListSort::Original => {
            movies.sort_by_key(|m| m.original_index.unwrap_or(usize::MAX));
        }
        ListSort::RatingAsc => {
            movies.sort_by(|a, b| rating_key(a).total_cmp(&rating_key(b)));
        }
        ListSort::RatingDesc => {
            movies.sort_by(|a, b| rating_key(b).total_cmp(&rating_key(a)));
        }
        ListSort::YearAsc => {
            movies.sort_by_key(|m| m.year.unwrap_or(i32::MAX));
        }
        ListSort::YearDesc => {
            movies.sort_by_key(|m| std::cmp::Reverse(m.year.unwrap_or(i32::MIN)));
        }
        ListSort::Title => {
            movies.sort_by_key(|m| m.title.to_lowercase());
        }
    }
}

fn rating_key(movie: &Movie) -> f32 {
    movie.rating.unwrap_or(-1.0) // unrated sorts below every real rating
}
