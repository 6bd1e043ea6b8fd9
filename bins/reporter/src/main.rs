//! Gastrofin reporter.
//!
//! Usage:
//!   reporter overview <start> <end> [as_of]    - Dashboard for every company
//!   reporter forecast <company_id> <year> <month> - Scenario projection
//!
//! Dates are `YYYY-MM-DD`; `as_of` defaults to today. Reports are printed
//! as JSON on stdout.

use std::sync::Arc;

use anyhow::{Context, bail};
use chrono::NaiveDate;
use gastrofin_core::period::DateRange;
use gastrofin_shared::AppConfig;
use gastrofin_shared::types::CompanyId;
use gastrofin_store::{DashboardService, LedgerStore, Snapshot};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const USAGE: &str = "usage: reporter overview <start> <end> [as_of] | reporter forecast <company_id> <year> <month>";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gastrofin=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = AppConfig::load().context("Failed to load configuration")?;

    let store = Arc::new(
        Snapshot::load(&config.snapshot.path)
            .await?
            .into_store()
            .await?,
    );
    info!(path = %config.snapshot.path, "Snapshot imported");

    let service = DashboardService::new(Arc::clone(&store), config.aggregation.clone());
    let args: Vec<String> = std::env::args().skip(1).collect();

    let output = match args.first().map(String::as_str) {
        Some("overview") => {
            let (Some(start), Some(end)) = (args.get(1), args.get(2)) else {
                bail!(USAGE);
            };
            let range = DateRange::new(parse_date(start)?, parse_date(end)?)?;
            let as_of = match args.get(3) {
                Some(raw) => parse_date(raw)?,
                None => chrono::Local::now().date_naive(),
            };
            let companies: Vec<CompanyId> =
                store.companies().await?.into_iter().map(|c| c.id).collect();

            let report = service.overview(&companies, range, as_of).await?;
            serde_json::to_string_pretty(&report)?
        }
        Some("forecast") => {
            let (Some(company), Some(year), Some(month)) = (args.get(1), args.get(2), args.get(3))
            else {
                bail!(USAGE);
            };
            let company: CompanyId = company
                .parse()
                .with_context(|| format!("Invalid company id: {company}"))?;
            let year: i32 = year.parse().with_context(|| format!("Invalid year: {year}"))?;
            let month: u32 = month.parse().with_context(|| format!("Invalid month: {month}"))?;

            let forecast = service.forecast(company, year, month).await?;
            serde_json::to_string_pretty(&forecast)?
        }
        _ => bail!(USAGE),
    };

    println!("{output}");
    Ok(())
}

fn parse_date(raw: &str) -> anyhow::Result<NaiveDate> {
    raw.parse()
        .with_context(|| format!("Invalid date (expected YYYY-MM-DD): {raw}"))
}
