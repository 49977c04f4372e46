//! Export journal entries in a date range as CSV
//!
//! Usage: journal-export [--from YYYY-MM-DD] [--to YYYY-MM-DD] [--out FILE]
//!   Bounds default to the first and last day of the current month.
//!   Output goes to stdout unless --out is given.

use std::fs::File;
use std::io;

use chrono::{Local, NaiveDate};
use clap::Parser;

use habit_journal::{
    config::Config,
    db,
    models::entry::parse_date,
    services::{entries::EntryService, export},
};

#[derive(Parser)]
#[command(name = "journal-export", about = "Export habit journal entries as CSV")]
struct Args {
    /// First day to include (YYYY-MM-DD)
    #[arg(long, value_parser = parse_day)]
    from: Option<NaiveDate>,

    /// Last day to include (YYYY-MM-DD)
    #[arg(long, value_parser = parse_day)]
    to: Option<NaiveDate>,

    /// Write to this file instead of stdout
    #[arg(long)]
    out: Option<String>,
}

fn parse_day(raw: &str) -> Result<NaiveDate, String> {
    parse_date(raw).map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they never mix with CSV on stdout.
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_writer(io::stderr)
        .init();

    let _ = dotenvy::dotenv();
    let args = Args::parse();
    let config = Config::from_env()?;

    let (from, to) = export::resolve_bounds(args.from, args.to, Local::now().date_naive())?;

    let pool = db::create_pool(&config.database_url, 1).await?;
    db::ensure_schema(&pool).await?;

    let entries = {
        let mut conn = pool.acquire().await?;
        EntryService::list_by_date_range(&mut conn, from, to).await?
    };

    let written = match args.out {
        Some(path) => export::write_csv(File::create(&path)?, &entries)?,
        None => export::write_csv(io::stdout().lock(), &entries)?,
    };

    tracing::info!("Exported {} entries from {} to {}", written, from, to);
    Ok(())
}
