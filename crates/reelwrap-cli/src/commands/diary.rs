use super::render;
use crate::output::Output;
use crate::progress::ImportProgress;
use chrono::Datelike;
use color_eyre::Result;
use movie_diary_config::{Config, PathManager};
use movie_diary_core::{Importer, Session};
use movie_diary_models::TargetMonth;
use movie_diary_sources::{LetterboxdClient, TmdbClient};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

pub async fn run_diary(
    profile: String,
    month: Option<u32>,
    year: Option<i32>,
    csv: Option<PathBuf>,
    check_posters: bool,
    output: &Output,
) -> Result<()> {
    tracing::debug!(profile, "diary command started");

    let config = load_validated_config()?;
    let target = resolve_target(month, year)?;

    let mut session = Session::new(target);
    let importer = create_importer(&config);

    let progress = ImportProgress::new(output.is_quiet());
    let summary = importer
        .import_diary(&mut session, &profile, &progress)
        .await;
    progress.finish();

    let summary = match summary {
        Ok(summary) => summary,
        Err(e) => {
            output.error(e.to_string());
            return Err(color_eyre::eyre::eyre!("diary import failed"));
        }
    };

    render::present(&session, Some(&summary), csv.as_deref(), check_posters, output).await
}

pub fn load_validated_config() -> Result<Config> {
    let path_manager = PathManager::new()
        .map_err(|e| color_eyre::eyre::eyre!("Could not determine config directory: {}", e))?;
    let config_file = path_manager.config_file();
    let config = Config::load_or_default(&config_file).map_err(|e| {
        color_eyre::eyre::eyre!("Failed to load config from {}: {}", config_file.display(), e)
    })?;
    config
        .validate()
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;
    Ok(config)
}

pub fn create_importer(config: &Config) -> Importer {
    Importer::new(
        LetterboxdClient::new(&config.fetch),
        Arc::new(TmdbClient::new(&config.tmdb)),
        Duration::from_millis(config.fetch.lookup_delay_ms),
    )
}

/// Partial overrides fill in from the current local month.
fn resolve_target(month: Option<u32>, year: Option<i32>) -> Result<TargetMonth> {
    let now = chrono::Local::now();
    let month = month.unwrap_or(now.month());
    let year = year.unwrap_or(now.year());
    TargetMonth::new(year, month)
        .ok_or_else(|| color_eyre::eyre::eyre!("Invalid target month: {}-{:02}", year, month))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_target_defaults_to_current_month() {
        let now = chrono::Local::now();
        let target = resolve_target(None, None).unwrap();
        assert_eq!(target.year(), now.year());
        assert_eq!(target.month(), now.month());
    }

    #[test]
    fn test_resolve_target_rejects_bad_month() {
        assert!(resolve_target(Some(13), Some(2026)).is_err());
        assert!(resolve_target(Some(0), None).is_err());
    }

    #[test]
    fn test_resolve_target_partial_override() {
        let target = resolve_target(Some(2), Some(1999)).unwrap();
        assert_eq!((target.year(), target.month()), (1999, 2));
    }
}
