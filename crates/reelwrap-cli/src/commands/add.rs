use super::diary::{create_importer, load_validated_config};
use super::render;
use crate::output::Output;
use crate::progress::ImportProgress;
use color_eyre::Result;
use movie_diary_core::Session;
use movie_diary_models::{dates, TargetMonth, WatchEntry};
use std::path::PathBuf;

pub async fn run_add(
    titles: Vec<String>,
    year: Option<i32>,
    rating: Option<f32>,
    rewatch: bool,
    date: Option<String>,
    csv: Option<PathBuf>,
    output: &Output,
) -> Result<()> {
    tracing::debug!(count = titles.len(), "add command started");

    if year.is_some() && titles.len() > 1 {
        return Err(color_eyre::eyre::eyre!(
            "--year disambiguates a single search and cannot apply to multiple titles"
        ));
    }
    if let Some(r) = rating {
        if !(0.0..=5.0).contains(&r) || (r * 2.0).fract() != 0.0 {
            return Err(color_eyre::eyre::eyre!(
                "Rating must be between 0 and 5 in half-star steps"
            ));
        }
    }
    let watched_date = match &date {
        Some(raw) => Some(
            dates::parse_strict(raw)
                .ok_or_else(|| color_eyre::eyre::eyre!("Invalid date: {} (expected YYYY-MM-DD)", raw))?,
        ),
        None => None,
    };

    let config = load_validated_config()?;
    let mut session = Session::new(TargetMonth::current());
    let importer = create_importer(&config);
    let progress = ImportProgress::new(output.is_quiet());

    let mut not_found = Vec::new();
    for title in titles {
        let entry = WatchEntry {
            title: title.clone(),
            release_year: year,
            rating,
            is_rewatch: rewatch,
            watched_date,
        };
        match importer.add_manual(&mut session, entry, &progress).await {
            Ok(added) => {
                tracing::debug!(title = added.title.as_str(), tmdb_id = added.tmdb_id, "added");
            }
            Err(e) => {
                output.warn(e.to_string());
                not_found.push(title);
            }
        }
    }
    progress.finish();

    if session.is_empty() {
        return Err(color_eyre::eyre::eyre!("No titles could be matched"));
    }

    render::present(&session, None, csv.as_deref(), false, output).await?;
    output.success(format!(
        "Imported {} movies ({} not found)",
        session.movies().len(),
        not_found.len()
    ));
    Ok(())
}
