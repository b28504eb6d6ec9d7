use std::io;
use std::process::ExitCode;

use chrono::{Local, NaiveDateTime};
use clap::Parser;
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

use thsr_timetable::app::{self, AppError, CrawlRequest};
use thsr_timetable::cli::Args;
use thsr_timetable::config::CrawlerConfig;
use thsr_timetable::domain::{DepartureTime, StationSets, TravelDate};
use thsr_timetable::prompt::Prompter;
use thsr_timetable::session;
use thsr_timetable::sink::JsonFileSink;
use thsr_timetable::webdriver::WebDriverPage;

#[tokio::main]
async fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let config = args.apply(CrawlerConfig::from_env());

    match run(&args, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: &Args, config: &CrawlerConfig) -> Result<(), AppError> {
    let now = Local::now().naive_local();

    let page = WebDriverPage::connect(&config.webdriver_url, config.headless)
        .await
        .map_err(AppError::Session)?;

    let report = session::scoped(page, async |page: &WebDriverPage| {
        app::crawl(page, config, |stations| choose(args, stations, now)).await
    })
    .await?;

    let sink = JsonFileSink::new(&config.output_dir);
    match app::persist(&report, &sink, Local::now().naive_local())? {
        Some(path) => {
            println!("\nData has been successfully written to {}", path.display());
            println!("Total records: {}", report.result.len());
        }
        None => println!("No data was collected."),
    }

    let failed = report.failures().count();
    if failed > 0 {
        warn!(failed, queries = report.outcomes.len(), "some searches failed");
    }
    Ok(())
}

/// Crawl request from the flags, or from the terminal when no plan was given.
fn choose(args: &Args, stations: &StationSets, now: NaiveDateTime) -> Result<CrawlRequest, AppError> {
    let Some(plan) = args.plan() else {
        let (plan, date, time) =
            Prompter::new(io::stdin().lock(), io::stdout()).interactive_plan(stations, now)?;
        return Ok(CrawlRequest { plan, date, time });
    };

    if let Some(input) = &args.start_date
        && let Err(e) = TravelDate::parse(input)
    {
        warn!("{e}, using today");
    }
    if let Some(input) = &args.start_time
        && let Err(e) = DepartureTime::parse(input)
    {
        warn!("{e}, using the current time");
    }

    Ok(CrawlRequest {
        plan,
        date: TravelDate::parse_or_now(args.start_date.as_deref(), now),
        time: DepartureTime::parse_or_now(args.start_time.as_deref(), now),
    })
}
