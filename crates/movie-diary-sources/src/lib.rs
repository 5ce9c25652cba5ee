pub mod error;
pub mod letterboxd;
pub mod progress;
pub mod relay;
pub mod tmdb;
pub mod traits;

pub use error::SourceError;
pub use letterboxd::LetterboxdClient;
pub use progress::{MonotonicProgress, NullProgress, ProgressSink};
pub use relay::RelayChain;
pub use tmdb::TmdbClient;
pub use traits::{MetadataLookup, MovieMatch};
