pub mod client;
pub mod diary;
pub mod list;
pub mod profile;
pub mod rss;

pub use client::LetterboxdClient;
pub use profile::{parse_list_input, parse_profile_input, ListTarget};
