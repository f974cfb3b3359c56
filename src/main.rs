use std::sync::Arc;

use anyhow::Context;
use chrono::{Duration, NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};
use tracing::log;
use tracing_subscriber::EnvFilter;

use sports_ingest_rs::config_handler;
use sports_ingest_rs::fetch_service::{FetchRequest, FetchService, FootballQuery};
use sports_ingest_rs::ingest_api::{IngestApi, LogSink};
use sports_ingest_rs::models::{ForwardFailurePolicy, Provider};

#[derive(Parser)]
#[command(version, about = "Fetch sports matches and forward them to the ingestion service")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch one batch from a provider and forward it
    Fetch(FetchArgs),
    /// Run the ingestion service
    Serve {
        #[arg(long)]
        port: Option<u16>,
    },
}

#[derive(Args)]
struct FetchArgs {
    #[arg(value_enum)]
    provider: Provider,

    /// Football: only matches of this competition
    #[arg(long, conflicts_with = "team")]
    competition: Option<String>,

    /// Football: only matches of this team
    #[arg(long)]
    team: Option<String>,

    /// Football: first day, defaults to today
    #[arg(long)]
    date_from: Option<NaiveDate>,

    /// Football: last day, defaults to a week after date-from
    #[arg(long)]
    date_to: Option<NaiveDate>,

    /// NFL: season year, defaults to the current year
    #[arg(long)]
    year: Option<i32>,

    /// NFL: week number, looked up from today's date when missing
    #[arg(long)]
    week: Option<i32>,

    #[arg(long, value_enum)]
    on_forward_failure: Option<ForwardFailurePolicy>,
}

impl FetchArgs {
    fn to_request(&self) -> FetchRequest {
        match self.provider {
            Provider::Football => {
                let date_from = self.date_from.unwrap_or_else(|| Utc::now().date_naive());
                let date_to = self.date_to.unwrap_or(date_from + Duration::days(7));
                let query = match (&self.competition, &self.team) {
                    (Some(id), _) => FootballQuery::Competition { id: id.clone(), date_from, date_to },
                    (None, Some(id)) => FootballQuery::Team { id: id.clone(), date_from, date_to },
                    (None, None) => FootballQuery::All,
                };
                FetchRequest::Football(query)
            },
            Provider::Nfl => FetchRequest::Nfl { year: self.year, week: self.week },
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,hyper=info"));

    // Configure a custom event formatter
    let format = tracing_subscriber::fmt::format()
        .with_level(true)
        .with_target(false)
        .with_ansi(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(false)
        .compact();
    tracing_subscriber::fmt()
        .event_format(format)
        .with_env_filter(filter)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging();

    let config = config_handler::get_config()?;

    match cli.command {
        Command::Fetch(args) => {
            let policy = args.on_forward_failure.unwrap_or(config.on_forward_failure);
            let service = FetchService::from_config(&config)?.with_policy(policy);
            let outcome = service.run(&args.to_request()).await?;
            log::info!("[MAIN] Done, {} (on forward failure: {policy:?})", outcome.batch);
        },
        Command::Serve { port } => {
            let port = port.unwrap_or(config.port);
            IngestApi::serve(port, Arc::new(LogSink)).await
                .context("Ingestion service stopped")?;
        },
    }
    Ok(())
}
