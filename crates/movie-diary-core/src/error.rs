use movie_diary_sources::SourceError;
use thiserror::Error;

/// Fatal import failures. Per-entry lookup failures never surface here; they
/// are aggregated into the `ImportSummary` fail count instead.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("No diary entries found for {month}. Make sure the user has logged films this month.")]
    NoEntries { month: String },

    #[error("No films found in the list at {url}.")]
    EmptyList { url: String },

    #[error("No movie found for \"{title}\"")]
    NotFound { title: String },

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Session(#[from] SessionError),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("the collection holds an imported list; clear it before adding diary entries")]
    ModeConflict,

    #[error("no movie with id {0} in the collection")]
    UnknownMovie(u64),

    #[error("poster candidate index {index} is out of range for movie {id}")]
    BadPosterIndex { id: u64, index: usize },
}

/// Custom poster URL validation failures, surfaced inline to the caller
/// without touching the collection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PosterError {
    #[error("not a valid http(s) image URL")]
    InvalidUrl,

    #[error("the URL does not serve an image")]
    NotAnImage,

    #[error("the image could not be loaded")]
    Unreachable,

    #[error("the image failed to load within the timeout")]
    Timeout,
}
