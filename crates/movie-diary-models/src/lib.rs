pub mod dates;
pub mod list_entry;
pub mod month;
pub mod movie;
pub mod rating;
pub mod watch_entry;

pub use list_entry::{FilmList, ListEntry};
pub use month::TargetMonth;
pub use movie::{Movie, PosterCandidate};
pub use rating::format_stars;
pub use watch_entry::WatchEntry;
