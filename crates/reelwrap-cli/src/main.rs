use clap::{ArgAction, Parser, Subcommand};
use commands::{add, config, diary, list};

mod commands;
mod logging;
mod output;
mod progress;

#[derive(Parser)]
#[command(name = "reelwrap")]
#[command(about = "Reelwrap - Turn a Letterboxd diary or list into a shareable monthly recap")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import a profile's diary for one month
    #[command(long_about = "Fetch a Letterboxd profile's diary for the target month (defaults to the current month), match each film against TMDB, and print the normalized collection.")]
    Diary {
        /// Letterboxd username or profile URL
        profile: String,

        /// Target month (1-12, defaults to the current month)
        #[arg(long, value_name = "M")]
        month: Option<u32>,

        /// Target year (defaults to the current year)
        #[arg(long, value_name = "Y")]
        year: Option<i32>,

        /// Write the collection as CSV to this path
        #[arg(long, value_name = "PATH")]
        csv: Option<std::path::PathBuf>,

        /// Probe every poster URL and report dead links
        #[arg(long, action = ArgAction::SetTrue)]
        check_posters: bool,
    },
    /// Import a public list or watchlist
    #[command(long_about = "Fetch a public Letterboxd list (or a profile's /films watchlist), match each film against TMDB, and print the collection in the requested order.")]
    List {
        /// List URL, or a username for that profile's watchlist
        input: String,

        /// Sort criterion for display
        #[arg(long, value_enum, default_value = "original")]
        sort: commands::list::SortArg,

        /// Write the collection as CSV to this path
        #[arg(long, value_name = "PATH")]
        csv: Option<std::path::PathBuf>,

        /// Probe every poster URL and report dead links
        #[arg(long, action = ArgAction::SetTrue)]
        check_posters: bool,
    },
    /// Add films by title without fetching a diary
    #[command(long_about = "Look up one or more titles on TMDB and build a collection from them directly. Date, rating, and rewatch flags apply to every given title; --year requires a single title.")]
    Add {
        /// Film title(s) to look up
        #[arg(required = true)]
        titles: Vec<String>,

        /// Release year to disambiguate the search (single title only)
        #[arg(long, value_name = "Y")]
        year: Option<i32>,

        /// Star rating, 0-5 in half steps
        #[arg(long, value_name = "R")]
        rating: Option<f32>,

        /// Mark the entries as rewatches
        #[arg(long, action = ArgAction::SetTrue)]
        rewatch: bool,

        /// Watched date (YYYY-MM-DD)
        #[arg(long, value_name = "DATE")]
        date: Option<String>,

        /// Write the collection as CSV to this path
        #[arg(long, value_name = "PATH")]
        csv: Option<std::path::PathBuf>,
    },
    /// Inspect or update configuration
    #[command(long_about = "Manage the reelwrap configuration file. Use 'show' to display current settings (the API key is masked) or 'tmdb' to set TMDB credentials.")]
    Config {
        #[command(subcommand)]
        cmd: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration (masks the API key)
    Show,

    /// Configure TMDB access
    #[command(long_about = "Set the TMDB API key and preferred poster language. Without --api-key the key is prompted for with masked input. Get a key at https://www.themoviedb.org/settings/api.")]
    Tmdb {
        /// TMDB API key (if not provided, will prompt)
        #[arg(long)]
        api_key: Option<String>,

        /// Preferred poster/metadata language (ISO 639-1, e.g. "en")
        #[arg(long)]
        language: Option<String>,
    },
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    logging::init_logging(cli.verbose, cli.quiet).map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    match cli.command {
        Commands::Diary {
            profile,
            month,
            year,
            csv,
            check_posters,
        } => diary::run_diary(profile, month, year, csv, check_posters, &output).await,
        Commands::List {
            input,
            sort,
            csv,
            check_posters,
        } => list::run_list(input, sort, csv, check_posters, &output).await,
        Commands::Add {
            titles,
            year,
            rating,
            rewatch,
            date,
            csv,
        } => add::run_add(titles, year, rating, rewatch, date, csv, &output).await,
        Commands::Config { cmd } => config::run_config(cmd, &output).await,
    }
}
