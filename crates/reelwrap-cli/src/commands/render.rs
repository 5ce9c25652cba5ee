//! Shared presentation for the collection: the human table, the JSON
//! payload, CSV export, and the poster dead-link report.

use crate::output::{Output, OutputFormat};
use color_eyre::Result;
use comfy_table::{Cell, Table};
use movie_diary_core::{check_poster_urls, CollectionMode, ImportSummary, Session};
use movie_diary_models::{dates, rating, Movie};
use owo_colors::OwoColorize;
use serde_json::json;
use std::path::Path;

/// Print the collection plus the import summary in the selected format,
/// then run the optional CSV export and poster check.
pub async fn present(
    session: &Session,
    summary: Option<&ImportSummary>,
    csv: Option<&Path>,
    check_posters: bool,
    output: &Output,
) -> Result<()> {
    match output.format() {
        OutputFormat::Human => {
            render_table(session, output);
            if let Some(summary) = summary {
                output.success(summary_line(summary));
            }
        }
        OutputFormat::Json | OutputFormat::JsonPretty => {
            output.json(&collection_json(session, summary));
        }
    }

    if let Some(path) = csv {
        write_csv(path, session)?;
        output.success(format!("Wrote {} rows to {}", session.movies().len(), path.display()));
    }

    if check_posters {
        report_dead_posters(session, output).await;
    }

    Ok(())
}

pub fn summary_line(summary: &ImportSummary) -> String {
    format!(
        "Imported {} movies ({} not found)",
        summary.success_count, summary.fail_count
    )
}

fn render_table(session: &Session, output: &Output) {
    if output.is_quiet() {
        return;
    }

    if let (Some(title), Some(creator)) = (session.list_title(), session.list_creator()) {
        println!("\n{} {}", title.bright_cyan().bold(), format!("(by {creator})").dimmed());
    } else if session.mode() == CollectionMode::Diary {
        println!("\n{}", session.target().to_string().bright_cyan().bold());
    }

    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    table.set_header(vec![
        Cell::new("Date").add_attribute(comfy_table::Attribute::Bold),
        Cell::new("Title").add_attribute(comfy_table::Attribute::Bold),
        Cell::new("Year").add_attribute(comfy_table::Attribute::Bold),
        Cell::new("Rating").add_attribute(comfy_table::Attribute::Bold),
        Cell::new("Rewatch").add_attribute(comfy_table::Attribute::Bold),
        Cell::new("Poster").add_attribute(comfy_table::Attribute::Bold),
    ]);

    for movie in session.movies() {
        table.add_row(vec![
            Cell::new(date_badge(movie)),
            Cell::new(&movie.title),
            Cell::new(movie.display_year()),
            Cell::new(rating::format_stars(movie.rating)),
            Cell::new(rewatch_badge(movie)),
            Cell::new(movie.display_poster_url()),
        ]);
    }

    println!("{table}");
}

fn date_badge(movie: &Movie) -> String {
    movie
        .watched_date
        .map(dates::format_badge)
        .unwrap_or_default()
}

/// Ordinal within the collection for repeat watches, rewatch glyph for a
/// film logged before the imported window.
fn rewatch_badge(movie: &Movie) -> String {
    if movie.watch_index > 1 {
        format!("×{}", movie.watch_index)
    } else if movie.is_rewatch {
        "↻".to_string()
    } else {
        String::new()
    }
}

fn collection_json(session: &Session, summary: Option<&ImportSummary>) -> serde_json::Value {
    let mode = match session.mode() {
        CollectionMode::Empty => "empty",
        CollectionMode::Diary => "diary",
        CollectionMode::List => "list",
    };
    json!({
        "type": "collection",
        "month": session.target().to_string(),
        "mode": mode,
        "list_title": session.list_title(),
        "list_creator": session.list_creator(),
        "movies": session.movies(),
        "summary": summary,
    })
}

/// Flat title,year export; the writer handles quoting and escaping.
pub fn write_csv(path: &Path, session: &Session) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["title", "year"])?;
    for (title, year) in session.csv_rows() {
        writer.write_record([title.as_str(), year.as_str()])?;
    }
    writer.flush()?;
    Ok(())
}

async fn report_dead_posters(session: &Session, output: &Output) {
    let client = reqwest::Client::new();
    let failures = check_poster_urls(&client, session.movies()).await;
    if failures.is_empty() {
        output.success("All poster URLs check out");
        return;
    }
    for failure in failures {
        output.warn(format!(
            "{}: poster {} failed ({})",
            failure.title, failure.url, failure.error
        ));
    }
}
