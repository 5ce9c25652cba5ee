use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    /// Pagination's first page failed on every relay and the RSS fallback
    /// failed too. Fatal to the import.
    #[error("Could not fetch Letterboxd data for \"{username}\". Make sure the username is correct and the profile is public.")]
    ProfileUnavailable { username: String },

    /// No relay returned a usable payload for a list page. Fatal to the import.
    #[error("Could not fetch Letterboxd list at \"{url}\". Make sure the list is public.")]
    ListUnavailable { url: String },

    /// Every relay in the chain failed for one target URL.
    #[error("all relays exhausted fetching {url}")]
    RelaysExhausted { url: String },

    #[error("unrecognized profile or list input: \"{input}\"")]
    InvalidInput { input: String },

    #[error("metadata lookup failed: {0}")]
    Lookup(String),

    #[error("failed to parse page content: {0}")]
    Parse(String),

    #[error("failed to parse RSS feed: {0}")]
    Feed(#[from] rss::Error),

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}
