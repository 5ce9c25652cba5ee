pub mod enrich;
pub mod error;
pub mod import;
pub mod normalize;
pub mod session;
pub mod validate;

pub use enrich::{enrich_list_entries, enrich_watch_entries, EnrichOutcome};
pub use error::{ImportError, PosterError, SessionError};
pub use import::{ImportSummary, Importer};
pub use normalize::ListSort;
pub use session::{CollectionMode, Session};
pub use validate::{check_poster_urls, validate_poster_url, PosterCheck};
