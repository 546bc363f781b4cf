//! CLI entry point for the bikeshare statistics tool.
//!
//! Runs the interactive explorer by default; the `report` subcommand prints
//! the statistics for one filter without prompting.

use anyhow::Result;
use bikeshare_stats::{
    catalog::DatasetCatalog,
    filters::{Choices, City, Filter, Month, Selection},
    logging::env_filter,
    prompt::Console,
    session::{Format, Session, run_report},
};
use chrono::Weekday;
use clap::{Parser, Subcommand};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{
    Layer,
    filter::LevelFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "bikeshare_stats")]
#[command(about = "Explore US bikeshare trip data", long_about = None)]
struct Cli {
    /// Directory holding the city CSV files [default: $BIKESHARE_DATA_DIR or .]
    #[arg(short, long, global = true)]
    data_dir: Option<PathBuf>,

    /// JSON file mapping city names to dataset paths
    #[arg(short, long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Choose filters interactively, view statistics and raw rows (default)
    Explore,
    /// Print statistics for one city/month/day without prompting
    Report {
        /// chicago, new york city or washington
        #[arg(long)]
        city: City,

        /// january..june, or all
        #[arg(long, default_value = "all")]
        month: Selection<Month>,

        /// sunday..saturday, or all
        #[arg(long, default_value = "all")]
        day: Selection<Weekday>,

        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/bikeshare_stats.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("bikeshare_stats.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    // stdout carries the prompts and reports, so stderr stays quiet by default
    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(env_filter("RUST_LOG", LevelFilter::WARN));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(non_blocking_file)
        .with_filter(env_filter("RUST_LOG_JSON", LevelFilter::DEBUG));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    let data_dir = cli
        .data_dir
        .or_else(|| std::env::var_os("BIKESHARE_DATA_DIR").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("."));
    let catalog = match &cli.catalog {
        Some(path) => DatasetCatalog::load(&data_dir, path)?,
        None => DatasetCatalog::new(&data_dir),
    };
    info!(data_dir = %catalog.data_dir().display(), "Dataset catalog ready");

    match cli.command.unwrap_or(Commands::Explore) {
        Commands::Explore => {
            let session = Session::new(catalog, Choices::default());
            let mut console = Console::stdio();
            let rounds = session.run(&mut console)?;
            info!(rounds, "Session finished");
        }
        Commands::Report {
            city,
            month,
            day,
            format,
        } => {
            let filter = Filter { city, month, day };
            let stdout = std::io::stdout();
            run_report(&catalog, &filter, format, &mut stdout.lock())?;
        }
    }

    Ok(())
}
