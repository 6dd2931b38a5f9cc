use chrono::Datelike;
use clap::{Parser, Subcommand};
use database::connection::{connect, run_migrations};
use database::repository::DbRepository;
use indicatif::{ProgressBar, ProgressStyle};
use ine_client::IneClient;
use tracing_subscriber::EnvFilter;

/// The main entry point for the Inmo Analytics application.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from the .env file, if one exists.
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // Parse command-line arguments
    let cli = Cli::parse();

    // Execute the appropriate command
    match cli.command {
        Commands::Serve(args) => handle_serve(args).await,
        Commands::Backfill(args) => {
            let db_pool = connect().await?;
            run_migrations(&db_pool).await?;
            handle_backfill(args, db_pool).await
        }
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Zone-level property price analytics and valuation service.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the valuation web server.
    Serve(ServeArgs),
    /// Download INE price-index series and load them into the store.
    Backfill(BackfillArgs),
}

#[derive(Parser)]
struct ServeArgs {
    /// Path to the configuration file.
    #[arg(long, default_value = "config.toml")]
    config: String,
}

#[derive(Parser)]
struct BackfillArgs {
    /// The INE JAXI table to download (25171 is the IPV index by region).
    #[arg(long, default_value_t = 25171)]
    table_id: u32,

    /// Keep only series whose name contains this text (e.g. "Índice").
    #[arg(long, default_value = "Índice")]
    metric_filter: String,

    /// Skip observations before this year.
    #[arg(long)]
    from_year: Option<i32>,
}

// ==============================================================================
// Command Logic
// ==============================================================================

async fn handle_serve(args: ServeArgs) -> anyhow::Result<()> {
    let config = configuration::load_config_from(&args.config)?;
    web_server::run_server(config).await
}

/// Handles the orchestration of the statistics backfill: fetch the table,
/// normalize it into index rows, and write them through the repository.
async fn handle_backfill(args: BackfillArgs, db_pool: sqlx::PgPool) -> anyhow::Result<()> {
    println!(
        "Starting backfill of INE table {} (filter: {:?})",
        args.table_id, args.metric_filter
    );

    let db_repo = DbRepository::new(db_pool);
    let ine_client = IneClient::new();
    let source_label = format!("INE:tabla {}", args.table_id);

    let series = ine_client.fetch_table(args.table_id).await?;
    let mut rows = ine_client::index_rows(&series, Some(&args.metric_filter));
    if let Some(from_year) = args.from_year {
        rows.retain(|row| row.period.year() >= from_year);
    }
    if rows.is_empty() {
        anyhow::bail!("No rows matched; check the table id and metric filter.");
    }

    // Set up the progress bar
    let progress_bar = ProgressBar::new(rows.len() as u64);
    progress_bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")?
            .progress_chars("#>-"),
    );

    for row in rows {
        progress_bar.set_message(format!("{} {}", row.zone, row.period.format("%Y-%m")));
        let zone_id = db_repo.ensure_zone(&row.zone, &source_label).await?;
        db_repo
            .save_price_index_row(zone_id, row.period, row.value, &source_label)
            .await?;
        progress_bar.inc(1);
    }

    progress_bar.finish_with_message("Backfill complete!");

    Ok(())
}
