use crate::output::Output;
use color_eyre::Result;
use comfy_table::{Cell, Table};
use movie_diary_config::{Config, PathManager};
use owo_colors::OwoColorize;
use serde_json::json;

pub async fn run_config(cmd: crate::ConfigCommands, output: &Output) -> Result<()> {
    match cmd {
        crate::ConfigCommands::Show => show_config(output),
        crate::ConfigCommands::Tmdb { api_key, language } => set_tmdb(api_key, language, output),
    }
}

fn show_config(output: &Output) -> Result<()> {
    let path_manager = PathManager::new()
        .map_err(|e| color_eyre::eyre::eyre!("Could not determine config directory: {}", e))?;
    let config_file = path_manager.config_file();

    if !config_file.exists() {
        output.warn(format!(
            "Configuration file not found at: {}",
            config_file.display()
        ));
        output.info("Run 'reelwrap config tmdb' to create it.");
        return Ok(());
    }

    let config = Config::load_from_file(&config_file).map_err(|e| {
        color_eyre::eyre::eyre!("Failed to load config from {}: {}", config_file.display(), e)
    })?;

    match output.format() {
        crate::output::OutputFormat::Human => {
            if output.is_quiet() {
                return Ok(());
            }

            println!("\n{}", "Configuration".bright_cyan().bold());

            let mut table = Table::new();
            table.load_preset(comfy_table::presets::UTF8_FULL);
            table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
            table.add_row(vec![
                Cell::new("Config File"),
                Cell::new(config_file.display().to_string()),
            ]);
            table.add_row(vec![
                Cell::new("TMDB API Key"),
                Cell::new(mask_string(&config.tmdb.api_key)),
            ]);
            table.add_row(vec![Cell::new("Language"), Cell::new(&config.tmdb.language)]);
            table.add_row(vec![Cell::new("TMDB Base URL"), Cell::new(&config.tmdb.base_url)]);
            table.add_row(vec![
                Cell::new("Image Base URL"),
                Cell::new(&config.tmdb.image_base_url),
            ]);
            table.add_row(vec![
                Cell::new("Relays"),
                Cell::new(config.fetch.relays.join("\n")),
            ]);
            table.add_row(vec![
                Cell::new("Page Delay"),
                Cell::new(format!("{} ms", config.fetch.page_delay_ms)),
            ]);
            table.add_row(vec![
                Cell::new("Lookup Delay"),
                Cell::new(format!("{} ms", config.fetch.lookup_delay_ms)),
            ]);
            println!("{table}");
        }
        crate::output::OutputFormat::Json | crate::output::OutputFormat::JsonPretty => {
            output.json(&json!({
                "type": "config",
                "config_file": config_file.display().to_string(),
                "tmdb": {
                    "api_key": mask_string(&config.tmdb.api_key),
                    "language": config.tmdb.language,
                    "base_url": config.tmdb.base_url,
                    "image_base_url": config.tmdb.image_base_url,
                },
                "fetch": {
                    "relays": config.fetch.relays,
                    "page_delay_ms": config.fetch.page_delay_ms,
                    "lookup_delay_ms": config.fetch.lookup_delay_ms,
                },
            }));
        }
    }

    Ok(())
}

fn set_tmdb(api_key: Option<String>, language: Option<String>, output: &Output) -> Result<()> {
    let path_manager = PathManager::new()
        .map_err(|e| color_eyre::eyre::eyre!("Could not determine config directory: {}", e))?;
    let config_file = path_manager.config_file();
    let mut config = Config::load_or_default(&config_file).map_err(|e| {
        color_eyre::eyre::eyre!("Failed to load config from {}: {}", config_file.display(), e)
    })?;

    let api_key = match api_key {
        Some(key) => key,
        None => dialoguer::Password::new()
            .with_prompt("TMDB API Key")
            .interact()
            .map_err(|e| color_eyre::eyre::eyre!("Failed to read API key: {}", e))?,
    };
    if api_key.trim().is_empty() {
        return Err(color_eyre::eyre::eyre!("API key cannot be empty"));
    }
    config.tmdb.api_key = api_key.trim().to_string();

    if let Some(language) = language {
        if language.trim().is_empty() {
            return Err(color_eyre::eyre::eyre!("Language cannot be empty"));
        }
        config.tmdb.language = language.trim().to_lowercase();
    }

    config.save_to_file(&config_file).map_err(|e| {
        color_eyre::eyre::eyre!("Failed to save config to {}: {}", config_file.display(), e)
    })?;

    output.success(format!("Configuration saved to {}", config_file.display()));
    Ok(())
}

fn mask_string(s: &str) -> String {
    if s.is_empty() {
        return "<not set>".to_string();
    }
    // Counted in characters, not bytes, so arbitrary input never splits a
    // UTF-8 sequence.
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..2].iter().collect();
    let tail: String = chars[chars.len() - 2..].iter().collect();
    format!("{}***{}", head, tail)
}
