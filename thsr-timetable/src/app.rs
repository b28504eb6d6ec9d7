//! One crawl run from page load to written output.

use std::io;
use std::path::PathBuf;

use chrono::NaiveDateTime;
use tracing::{error, info};

use crate::config::CrawlerConfig;
use crate::crawl::{ConfigurationError, CrawlPlan, CrawlReport, Crawler, PageSearcher};
use crate::domain::{DepartureTime, StationSets, TravelDate};
use crate::page::{AutomationError, PagePort};
use crate::sink::{RowSink, SinkError, timestamped_name};
use crate::site;

/// Errors that end a run.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The browser session couldn't be started
    #[error("failed to start browser session: {0}")]
    Session(#[source] AutomationError),

    /// The timetable page couldn't be loaded or read
    #[error("failed to load timetable page: {0}")]
    Page(#[source] AutomationError),

    /// The form offered no stations to choose from
    #[error("no stations found on the timetable page")]
    NoStations,

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// Reading the interactive answers failed
    #[error("failed to read input: {0}")]
    Input(#[from] io::Error),

    #[error(transparent)]
    Sink(#[from] SinkError),

    /// Every dispatched query failed
    #[error("all {0} queries failed")]
    AllQueriesFailed(usize),
}

/// What to search for, chosen once the stations are known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlRequest {
    pub plan: CrawlPlan,
    pub date: TravelDate,
    pub time: DepartureTime,
}

/// Open the timetable page, let `choose` pick the searches, and run them.
///
/// A configuration error is fatal and nothing is searched. Individual
/// query failures are kept in the report, unless every query failed.
pub async fn crawl<P, F>(page: &P, config: &CrawlerConfig, choose: F) -> Result<CrawlReport, AppError>
where
    P: PagePort,
    F: FnOnce(&StationSets) -> Result<CrawlRequest, AppError>,
{
    let stations = site::open(page, &config.timetable_url, &config.layout, &config.timeouts)
        .await
        .map_err(AppError::Page)?;
    if stations.is_empty() {
        return Err(AppError::NoStations);
    }

    let request = choose(&stations)?;
    info!(
        plan = ?request.plan,
        date = %request.date,
        time = %request.time,
        "starting crawl"
    );

    let crawler = Crawler::new(PageSearcher::new(page, &config.layout, &config.timeouts));
    let report = crawler
        .crawl(&request.plan, &stations, &request.date, &request.time)
        .await
        .inspect_err(|e| {
            if let ConfigurationError::UnknownStation { role, .. } = e {
                error!(available = ?stations.for_role(*role), "{e}");
            }
        })?;

    if report.all_failed() {
        return Err(AppError::AllQueriesFailed(report.outcomes.len()));
    }
    Ok(report)
}

/// Write the collected rows, if there are any.
///
/// Returns the written path, or `None` when nothing was collected.
pub fn persist(
    report: &CrawlReport,
    sink: &impl RowSink,
    now: NaiveDateTime,
) -> Result<Option<PathBuf>, AppError> {
    if report.result.is_empty() {
        return Ok(None);
    }
    let path = sink.write(report.result.rows(), &timestamped_name(now))?;
    info!(path = %path.display(), rows = report.result.len(), "results written");
    Ok(Some(path))
}
