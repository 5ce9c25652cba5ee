use super::diary::{create_importer, load_validated_config};
use super::render;
use crate::output::Output;
use crate::progress::ImportProgress;
use clap::ValueEnum;
use color_eyre::Result;
use movie_diary_core::{ListSort, Session};
use movie_diary_models::TargetMonth;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortArg {
    Original,
    #[value(name = "rating-asc")]
    RatingAsc,
    #[value(name = "rating-desc")]
    RatingDesc,
    #[value(name = "year-asc")]
    YearAsc,
    #[value(name = "year-desc")]
    YearDesc,
    Title,
}

impl From<SortArg> for ListSort {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Original => ListSort::Original,
            SortArg::RatingAsc => ListSort::RatingAsc,
            SortArg::RatingDesc => ListSort::RatingDesc,
            SortArg::YearAsc => ListSort::YearAsc,
            SortArg::YearDesc => ListSort::YearDesc,
            SortArg::Title => ListSort::Title,
        }
    }
}

pub async fn run_list(
    input: String,
    sort: SortArg,
    csv: Option<PathBuf>,
    check_posters: bool,
    output: &Output,
) -> Result<()> {
    tracing::debug!(input, "list command started");

    let config = load_validated_config()?;

    // Lists are undated; the month only matters for diary imports.
    let mut session = Session::new(TargetMonth::current());
    let importer = create_importer(&config);

    let progress = ImportProgress::new(output.is_quiet());
    let summary = importer.import_list(&mut session, &input, &progress).await;
    progress.finish();

    let summary = match summary {
        Ok(summary) => summary,
        Err(e) => {
            output.error(e.to_string());
            return Err(color_eyre::eyre::eyre!("list import failed"));
        }
    };

    session.set_list_sort(sort.into());
    session.sort_for_display();

    render::present(&session, Some(&summary), csv.as_deref(), check_posters, output).await
}
