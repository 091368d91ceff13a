mod commands;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "newsvane-cli")]
#[command(about = "newsvane command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run one ingestion pass for a single term.
    Ingest {
        #[arg(long)]
        term: String,
        #[arg(long)]
        days: Option<i64>,
        #[arg(long)]
        page_size: Option<u32>,
        /// Country context, SE or PT.
        #[arg(long)]
        country: Option<String>,
        /// Comma-separated domain allowlist.
        #[arg(long)]
        domains: Option<String>,
    },
    /// Upsert a small set of demo articles with analyses.
    Seed,
    /// Print the daily sentiment series for a term as JSON.
    Insights {
        #[arg(long)]
        term: String,
        /// Relative range such as 7d, 2w, or 1m.
        #[arg(long)]
        range: Option<String>,
        #[arg(long)]
        country: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = newsvane_core::load_app_config()?;

    let pool_config = newsvane_db::PoolConfig::from_app_config(&config);
    let pool = newsvane_db::connect_pool(&config.database_url, pool_config).await?;
    newsvane_db::run_migrations(&pool).await?;

    match cli.command {
        Commands::Ingest {
            term,
            days,
            page_size,
            country,
            domains,
        } => {
            commands::run_ingest(&pool, &config, &term, days, page_size, country.as_deref(), domains)
                .await
        }
        Commands::Seed => commands::run_seed(&pool).await,
        Commands::Insights {
            term,
            range,
            country,
        } => commands::run_insights(&pool, &term, range.as_deref(), country.as_deref()).await,
    }
}
