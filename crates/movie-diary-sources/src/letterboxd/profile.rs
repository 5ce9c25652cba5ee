//! Classification of user-supplied profile/list input. Accepted shapes:
//! a bare username, a profile URL, a `/films` URL, or a full list/watchlist
//! URL. Anything else is rejected before any network traffic happens.

const SITE: &str = "https://letterboxd.com";

/// A resolved list import target: the page to fetch plus the creator
/// identifier used for attribution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListTarget {
    pub url: String,
    pub creator: String,
}

fn is_valid_username(candidate: &str) -> bool {
    !candidate.is_empty()
        && candidate
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Strip scheme and host from a letterboxd.com URL, returning the path
/// segments. `None` when the input is not a letterboxd URL at all.
fn site_path_segments(raw: &str) -> Option<Vec<&str>> {
    let rest = raw
        .strip_prefix("https://")
        .or_else(|| raw.strip_prefix("http://"))
        .unwrap_or(raw);
    let rest = rest.strip_prefix("www.").unwrap_or(rest);
    let path = rest.strip_prefix("letterboxd.com")?;
    Some(
        path.split('/')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect(),
    )
}

/// Extract a username from a bare username or any profile-shaped URL
/// (`letterboxd.com/username/`, `/username/films/...`, `/username/list/...`).
pub fn parse_profile_input(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if is_valid_username(raw) {
        return Some(raw.to_string());
    }
    let segments = site_path_segments(raw)?;
    let username = segments.first()?;
    if is_valid_username(username) {
        Some(username.to_string())
    } else {
        None
    }
}

fn watchlist_target(user: &str) -> ListTarget {
    ListTarget {
        url: format!("{}/{}/watchlist/", SITE, user),
        creator: user.to_string(),
    }
}

/// Resolve list input to a fetch target. Accepted: a full list URL, a
/// watchlist or `/films` URL, the shorthand `username/list/slug`, or a bare
/// username (meaning that profile's watchlist).
pub fn parse_list_input(raw: &str) -> Option<ListTarget> {
    let raw = raw.trim();
    if is_valid_username(raw) {
        return Some(watchlist_target(raw));
    }
    let segments = site_path_segments(raw)
        .or_else(|| Some(raw.split('/').filter(|s| !s.is_empty()).collect()))?;
    match segments.as_slice() {
        [user, "list", slug, ..] if is_valid_username(user) => Some(ListTarget {
            url: format!("{}/{}/list/{}/", SITE, user, slug),
            creator: (*user).to_string(),
        }),
        [user, "watchlist", ..] | [user, "films", ..] if is_valid_username(user) => {
            Some(watchlist_target(user))
        }
        _ => None,
    }
}

/// Diary page URL for one month, one page.
pub fn diary_page_url(username: &str, year: i32, month: u32, page: u32) -> String {
    format!(
        "{}/{}/films/diary/for/{}/{:02}/page/{}/",
        SITE, username, year, month, page
    )
}

/// The profile's RSS feed, the fallback when pagination fails.
pub fn rss_url(username: &str) -> String {
    format!("{}/{}/rss/", SITE, username)
}
