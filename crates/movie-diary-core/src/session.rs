//! The session owns the in-memory collection and all import-mode state that
//! the original kept as globals. Components receive it by reference; nothing
//! here touches the network or disk.

use crate::error::SessionError;
use crate::normalize::{self, ListSort};
use movie_diary_models::{Movie, TargetMonth};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionMode {
    Empty,
    Diary,
    List,
}

pub struct Session {
    target: TargetMonth,
    movies: Vec<Movie>,
    mode: CollectionMode,
    list_title: Option<String>,
    list_creator: Option<String>,
    list_sort: ListSort,
    next_id: u64,
}

impl Session {
    pub fn new(target: TargetMonth) -> Self {
        Self {
            target,
            movies: Vec::new(),
            mode: CollectionMode::Empty,
            list_title: None,
            list_creator: None,
            list_sort: ListSort::default(),
            next_id: 1,
        }
    }

    pub fn target(&self) -> TargetMonth {
        self.target
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn mode(&self) -> CollectionMode {
        self.mode
    }

    pub fn list_title(&self) -> Option<&str> {
        self.list_title.as_deref()
    }

    pub fn list_creator(&self) -> Option<&str> {
        self.list_creator.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    fn alloc_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Append diary-mode movies (import or manual add). Crossing from list
    /// mode requires an explicit clear first. Absorbing nothing (every entry
    /// failed enrichment) leaves the mode untouched.
    pub fn absorb_diary(&mut self, movies: Vec<Movie>) -> Result<(), SessionError> {
        if self.mode == CollectionMode::List {
            return Err(SessionError::ModeConflict);
        }
        if movies.is_empty() {
            return Ok(());
        }
        for mut movie in movies {
            movie.id = self.alloc_id();
            self.movies.push(movie);
        }
        self.mode = CollectionMode::Diary;
        Ok(())
    }

    /// Replace the collection with an imported list. This overwrites
    /// wholesale, including any diary entries; callers are expected to warn
    /// before importing over a non-empty collection.
    pub fn absorb_list(&mut self, title: String, creator: String, movies: Vec<Movie>) {
        debug!(replaced = self.movies.len(), incoming = movies.len(), "list import replaces collection");
        self.movies.clear();
        for mut movie in movies {
            movie.id = self.alloc_id();
            self.movies.push(movie);
        }
        self.mode = CollectionMode::List;
        self.list_title = Some(title);
        self.list_creator = Some(creator);
        self.list_sort = ListSort::default();
    }

    pub fn remove(&mut self, id: u64) -> Result<Movie, SessionError> {
        let position = self
            .movies
            .iter()
            .position(|m| m.id == id)
            .ok_or(SessionError::UnknownMovie(id))?;
        Ok(self.movies.remove(position))
    }

    /// Empty the collection and reset every mode flag.
    pub fn clear(&mut self) {
        self.movies.clear();
        self.mode = CollectionMode::Empty;
        self.list_title = None;
        self.list_creator = None;
        self.list_sort = ListSort::default();
    }

    /// Set a user poster override. The URL must already be validated.
    pub fn set_custom_poster(&mut self, id: u64, url: String) -> Result<(), SessionError> {
        let movie = self.movie_mut(id)?;
        movie.custom_poster_url = Some(url);
        Ok(())
    }

    /// Select one of the fetched poster candidates as the primary poster.
    pub fn choose_poster(&mut self, id: u64, index: usize) -> Result<(), SessionError> {
        let movie = self.movie_mut(id)?;
        let candidate = movie
            .poster_candidates
            .get(index)
            .ok_or(SessionError::BadPosterIndex { id, index })?;
        movie.poster_url = candidate.url.clone();
        movie.custom_poster_url = None;
        Ok(())
    }

    pub fn list_sort(&self) -> ListSort {
        self.list_sort
    }

    pub fn set_list_sort(&mut self, sort: ListSort) {
        self.list_sort = sort;
    }

    /// Re-sort in place for the next display/export pass. Diary mode sorts
    /// chronologically and recomputes watch indices; list mode applies the
    /// current list criterion and leaves indices alone.
    pub fn sort_for_display(&mut self) {
        match self.mode {
            CollectionMode::Diary => {
                normalize::sort_chronologically(&mut self.movies);
                normalize::compute_watch_indices(&mut self.movies);
            }
            CollectionMode::List => {
                normalize::sort_for_list(&mut self.movies, self.list_sort);
            }
            CollectionMode::Empty => {}
        }
    }

    /// Flat (title, year) rows in current order; escaping is the exporter's
    /// concern.
    pub fn csv_rows(&self) -> Vec<(String, String)> {
        self.movies
            .iter()
            .map(|m| (m.title.clone(), m.display_year()))
            .collect()
    }

    fn movie_mut(&mut self, id: u64) -> Result<&mut Movie, SessionError> {
        self.movies
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or(SessionError::UnknownMovie(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use movie_diary_models::PosterCandidate;

    fn create_movie(title: &str, date: Option<&str>) -> Movie {
        Movie {
            id: 0,
            tmdb_id: 1,
            title: title.to_string(),
            year: Some(2024),
            poster_url: "https://img.test/p.jpg".to_string(),
            custom_poster_url: None,
            poster_candidates: vec![
                PosterCandidate {
                    url: "https://img.test/p.jpg".to_string(),
                    language_tag: Some("en".to_string()),
                    is_preferred_language: true,
                },
                PosterCandidate {
                    url: "https://img.test/alt.jpg".to_string(),
                    language_tag: None,
                    is_preferred_language: false,
                },
            ],
            rating: Some(4.0),
            is_rewatch: false,
            watched_date: date.and_then(movie_diary_models::dates::parse_strict),
            watch_index: 1,
            original_index: None,
        }
    }

    fn create_session() -> Session {
        Session::new(TargetMonth::new(2026, 1).unwrap())
    }

    #[test]
    fn test_absorb_assigns_unique_ids() {
        let mut session = create_session();
        session
            .absorb_diary(vec![create_movie("A", None), create_movie("B", None)])
            .unwrap();
        let ids: Vec<u64> = session.movies().iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(session.mode(), CollectionMode::Diary);
    }

    #[test]
    fn test_absorbing_nothing_leaves_the_session_empty() {
        let mut session = create_session();
        session.absorb_diary(Vec::new()).unwrap();
        assert_eq!(session.mode(), CollectionMode::Empty);
        assert!(session.is_empty());
    }

    #[test]
    fn test_diary_into_list_mode_requires_clear() {
        let mut session = create_session();
        session.absorb_list("Best".to_string(), "dave".to_string(), vec![create_movie("A", None)]);
        let result = session.absorb_diary(vec![create_movie("B", None)]);
        assert_eq!(result, Err(SessionError::ModeConflict));

        session.clear();
        assert_eq!(session.mode(), CollectionMode::Empty);
        session.absorb_diary(vec![create_movie("B", None)]).unwrap();
        assert_eq!(session.mode(), CollectionMode::Diary);
    }

    #[test]
    fn test_list_import_overwrites_diary_wholesale() {
        let mut session = create_session();
        session.absorb_diary(vec![create_movie("Old", None)]).unwrap();

        session.absorb_list(
            "Best".to_string(),
            "dave".to_string(),
            vec![create_movie("New", None)],
        );
        assert_eq!(session.movies().len(), 1);
        assert_eq!(session.movies()[0].title, "New");
        assert_eq!(session.list_title(), Some("Best"));
        assert_eq!(session.list_creator(), Some("dave"));
    }

    #[test]
    fn test_clear_resets_all_mode_state() {
        let mut session = create_session();
        session.absorb_list("Best".to_string(), "dave".to_string(), vec![create_movie("A", None)]);
        session.set_list_sort(ListSort::Title);

        session.clear();
        assert!(session.is_empty());
        assert_eq!(session.mode(), CollectionMode::Empty);
        assert_eq!(session.list_title(), None);
        assert_eq!(session.list_sort(), ListSort::Original);
    }

    #[test]
    fn test_remove_unknown_id_errors() {
        let mut session = create_session();
        session.absorb_diary(vec![create_movie("A", None)]).unwrap();
        assert_eq!(session.remove(99).unwrap_err(), SessionError::UnknownMovie(99));

        let removed = session.remove(1).unwrap();
        assert_eq!(removed.title, "A");
        assert!(session.is_empty());
    }

    #[test]
    fn test_choose_poster_switches_primary_and_drops_override() {
        let mut session = create_session();
        session.absorb_diary(vec![create_movie("A", None)]).unwrap();
        session.set_custom_poster(1, "https://mine.test/x.jpg".to_string()).unwrap();

        session.choose_poster(1, 1).unwrap();
        let movie = &session.movies()[0];
        assert_eq!(movie.poster_url, "https://img.test/alt.jpg");
        assert_eq!(movie.custom_poster_url, None);

        assert_eq!(
            session.choose_poster(1, 9).unwrap_err(),
            SessionError::BadPosterIndex { id: 1, index: 9 }
        );
    }

    #[test]
    fn test_sort_for_display_recomputes_diary_indices() {
        let mut session = create_session();
        session
            .absorb_diary(vec![
                create_movie("Heat", Some("2026-01-20")),
                create_movie("Heat", Some("2026-01-02")),
            ])
            .unwrap();
        session.sort_for_display();

        let dates: Vec<_> = session.movies().iter().map(|m| m.watched_date).collect();
        assert!(dates[0] < dates[1]);
        assert_eq!(session.movies()[0].watch_index, 1);
        assert_eq!(session.movies()[1].watch_index, 2);
    }

    #[test]
    fn test_csv_rows_follow_current_order() {
        let mut session = create_session();
        session
            .absorb_diary(vec![
                create_movie("B Film", Some("2026-01-10")),
                create_movie("A Film", Some("2026-01-02")),
            ])
            .unwrap();
        session.sort_for_display();

        let rows = session.csv_rows();
        assert_eq!(rows[0].0, "A Film");
        assert_eq!(rows[1].0, "B Film");
        assert_eq!(rows[0].1, "2024");
    }
}
