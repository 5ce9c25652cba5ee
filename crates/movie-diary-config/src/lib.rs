pub mod config;
pub mod paths;

pub use config::{Config, FetchConfig, TmdbConfig};
pub use paths::PathManager;
