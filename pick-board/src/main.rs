// Draft pick board entry point.
//
// Startup sequence:
// 1. Initialize tracing (log to file, not terminal)
// 2. Parse command line and load config
// 3. `scrape`: download the draft table to CSV/JSON and exit
// 4. `import`: copy the draft CSV into SQLite and exit
// 5. Otherwise spawn the roster loader task and run the TUI until quit

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio::sync::mpsc;
use tracing::{error, info};

use pick_board::app;
use pick_board::config;
use pick_board::db;
use pick_board::roster::loader::RosterSource;
use pick_board::scrape;
use pick_board::tui;

#[derive(Parser)]
#[command(name = "pick-board")]
#[command(about = "Browse a team's draft picks from a CSV roster")]
struct Cli {
    /// Roster CSV path or http(s) URL (overrides data.source)
    #[arg(short, long)]
    source: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Import a draft table CSV into the SQLite database
    Import {
        /// CSV file to import
        #[arg(long, default_value = "data/2025_nfl_draft_table.csv")]
        csv: PathBuf,

        /// Database file (defaults to database.path)
        #[arg(long)]
        db: Option<PathBuf>,

        /// Table name (defaults to database.table)
        #[arg(long)]
        table: Option<String>,
    },
    /// Download a Wikipedia table and save it as CSV (and optionally JSON)
    Scrape {
        /// Page to scrape
        #[arg(long, default_value = scrape::DEFAULT_URL)]
        url: String,

        /// Space-separated class names the table must carry
        #[arg(long = "class", default_value = scrape::DEFAULT_CLASS)]
        class: String,

        /// Which matching table to take (0-based)
        #[arg(long, default_value_t = 0)]
        table_index: usize,

        /// CSV output path
        #[arg(long, default_value = scrape::DEFAULT_OUT_CSV)]
        out_csv: PathBuf,

        /// Optional JSON output path (array of row objects)
        #[arg(long)]
        out_json: Option<PathBuf>,

        /// Print the first rows to the console
        #[arg(long)]
        preview: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing()?;
    info!("Pick board starting up");

    let cli = Cli::parse();

    let config = match cli.command {
        Some(Commands::Scrape {
            url,
            class,
            table_index,
            out_csv,
            out_json,
            preview,
        }) => {
            let out = ScrapeOutput {
                csv: out_csv,
                json: out_json,
                preview,
            };
            return run_scrape(&url, &class, table_index, &out).await;
        }
        Some(Commands::Import { csv, db, table }) => {
            let config = config::load_config().context("failed to load configuration")?;
            let db_path = db.unwrap_or_else(|| PathBuf::from(&config.database.path));
            let table = table.unwrap_or(config.database.table);
            return run_import(&csv, &db_path, &table);
        }
        None => config::load_config().context("failed to load configuration")?,
    };

    let config = match cli.source {
        Some(source) => config.with_source(source),
        None => config,
    };
    let source = RosterSource::parse(&config.data.source);
    info!("Config loaded: source={}, title={}", source, config.ui.title);

    let (ui_tx, ui_rx) = mpsc::channel(16);
    let view_state = tui::ViewState::new(config.ui.title.clone(), source.display_name());

    let loader_handle = tokio::spawn(async move {
        if let Err(e) = app::run(reqwest::Client::new(), source, ui_tx).await {
            error!("Roster loader error: {}", e);
        }
    });

    if let Err(e) = tui::run(ui_rx, view_state).await {
        error!("TUI error: {}", e);
    }

    // The loader may still be waiting on a slow URL
    loader_handle.abort();

    info!("Pick board shut down cleanly");
    Ok(())
}

struct ScrapeOutput {
    csv: PathBuf,
    json: Option<PathBuf>,
    preview: bool,
}

async fn run_scrape(
    url: &str,
    class: &str,
    table_index: usize,
    out: &ScrapeOutput,
) -> anyhow::Result<()> {
    let policy = scrape::FetchPolicy::default();
    let client = scrape::build_client(&policy)?;
    let html = scrape::fetch_html(&client, url, &policy).await?;
    let table = scrape::extract_table(&html, class, table_index)
        .with_context(|| format!("failed to extract a table from {url}"))?;
    info!(
        "Scraped {} rows x {} columns from {}",
        table.rows.len(),
        table.columns.len(),
        url
    );

    scrape::write_csv(&table, &out.csv)?;
    if let Some(path) = &out.json {
        scrape::write_json(&table, path)?;
    }
    if out.preview {
        println!("{}", scrape::preview(&table, scrape::PREVIEW_ROWS));
    }
    println!(
        "{}",
        scrape::summary_line(&table, Some(&out.csv), out.json.as_deref())
    );
    Ok(())
}

fn run_import(csv: &Path, db_path: &Path, table: &str) -> anyhow::Result<()> {
    let count = db::import_csv_to_sqlite(csv, db_path, table)
        .with_context(|| format!("failed to import {}", csv.display()))?;
    info!("Import finished: {} rows", count);
    println!(
        "Imported {} into {} as table '{}'.",
        csv.display(),
        db_path.display(),
        table
    );
    Ok(())
}

/// Initialize tracing to log to a file (not the terminal, which is used by the TUI).
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = std::env::current_dir()?.join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::File::create(log_dir.join("pick-board.log"))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("pick_board=info,warn")),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
