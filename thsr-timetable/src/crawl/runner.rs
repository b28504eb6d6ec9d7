//! Sequential crawl execution with per-query fault isolation.

use std::future::Future;

use tracing::{info, warn};

use crate::config::{PageLayout, Timeouts};
use crate::domain::{DepartureTime, SearchQuery, StationPair, StationSets, TimetableRow, TravelDate};
use crate::page::PagePort;
use crate::search::search;

use super::error::{ConfigurationError, CrawlError};
use super::plan::CrawlPlan;

/// Runs one search for a query.
///
/// This abstraction lets the crawler be tested without a page.
pub trait PairSearcher {
    fn search(
        &self,
        query: &SearchQuery,
    ) -> impl Future<Output = Result<Vec<TimetableRow>, CrawlError>>;
}

/// Searches by driving the form on a live page.
#[derive(Debug)]
pub struct PageSearcher<'a, P> {
    port: &'a P,
    layout: &'a PageLayout,
    timeouts: &'a Timeouts,
}

impl<'a, P: PagePort> PageSearcher<'a, P> {
    pub fn new(port: &'a P, layout: &'a PageLayout, timeouts: &'a Timeouts) -> Self {
        Self {
            port,
            layout,
            timeouts,
        }
    }
}

impl<P: PagePort> PairSearcher for PageSearcher<'_, P> {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<TimetableRow>, CrawlError> {
        search(self.port, self.layout, self.timeouts, query).await
    }
}

/// Rows collected over a crawl, in dispatch order then discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlResult {
    rows: Vec<TimetableRow>,
}

impl CrawlResult {
    /// Append one query's rows, keeping their order.
    pub fn append(&mut self, rows: Vec<TimetableRow>) {
        self.rows.extend(rows);
    }

    pub fn rows(&self) -> &[TimetableRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// How one query ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryStatus {
    /// The search completed; its rows were appended to the result.
    Succeeded { rows: usize },
    /// The search failed; nothing was appended.
    Failed { error: CrawlError },
}

/// A dispatched query and how it ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryOutcome {
    pub query: SearchQuery,
    pub status: QueryStatus,
}

impl QueryOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self.status, QueryStatus::Succeeded { .. })
    }
}

/// Everything a crawl produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlReport {
    pub result: CrawlResult,
    pub outcomes: Vec<QueryOutcome>,
}

impl CrawlReport {
    /// Number of queries that completed.
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    /// Queries that failed, in dispatch order.
    pub fn failures(&self) -> impl Iterator<Item = &QueryOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }

    /// True when queries were dispatched and none of them completed.
    pub fn all_failed(&self) -> bool {
        !self.outcomes.is_empty() && self.succeeded() == 0
    }
}

/// Runs searches for a list of station pairs, one at a time.
#[derive(Debug)]
pub struct Crawler<S> {
    searcher: S,
}

impl<S: PairSearcher> Crawler<S> {
    pub fn new(searcher: S) -> Self {
        Self { searcher }
    }

    /// Expand `plan` against `stations` and run every resulting query.
    ///
    /// Nothing is searched when the plan names a station the form doesn't
    /// offer.
    pub async fn crawl(
        &self,
        plan: &CrawlPlan,
        stations: &StationSets,
        date: &TravelDate,
        time: &DepartureTime,
    ) -> Result<CrawlReport, ConfigurationError> {
        let pairs = plan.expand(stations)?;
        info!(queries = pairs.len(), "crawl plan expanded");
        Ok(self.run(&pairs, date, time).await)
    }

    /// Search every pair in order.
    ///
    /// A failed query is logged and recorded in the report; the crawl moves
    /// on to the next pair. Pairs naming the same station twice are recorded
    /// as failed without being searched.
    pub async fn run(
        &self,
        pairs: &[StationPair],
        date: &TravelDate,
        time: &DepartureTime,
    ) -> CrawlReport {
        let mut report = CrawlReport::default();

        for pair in pairs {
            let query = SearchQuery::new(pair.clone(), date.clone(), time.clone());

            let outcome = if pair.departure == pair.arrival {
                Err(CrawlError::from(ConfigurationError::SameStation(
                    pair.departure.clone(),
                )))
            } else {
                self.searcher.search(&query).await
            };

            let status = match outcome {
                Ok(rows) => {
                    let count = rows.len();
                    report.result.append(rows);
                    QueryStatus::Succeeded { rows: count }
                }
                Err(error) => {
                    warn!(
                        departure = %pair.departure,
                        arrival = %pair.arrival,
                        %error,
                        "search failed, skipping pair"
                    );
                    QueryStatus::Failed { error }
                }
            };
            report.outcomes.push(QueryOutcome { query, status });
        }

        info!(
            queries = report.outcomes.len(),
            failed = report.outcomes.len() - report.succeeded(),
            rows = report.result.len(),
            "crawl finished"
        );
        report
    }
}
