//! Crawl error types.

use std::time::Duration;

use crate::domain::{InvalidRow, StationRole};
use crate::page::AutomationError;

/// A crawl plan that can't be run against the discovered stations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    /// A named station isn't offered by the form
    #[error("{role} station `{name}` not found")]
    UnknownStation { role: StationRole, name: String },

    /// Departure and arrival name the same station
    #[error("departure and arrival stations cannot both be `{0}`")]
    SameStation(String),
}

/// Errors from expanding or running a crawl.
///
/// Everything except [`CrawlError::Configuration`] is scoped to a single
/// query: the orchestrator records it and moves on to the next pair.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CrawlError {
    /// The crawl plan names stations the form doesn't offer
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// The loading indicator never hid after submitting the search
    #[error("search results did not load within {waited:?}")]
    SearchTimeout { waited: Duration },

    /// The results view did not re-render after paging
    #[error("results page {page} did not load within {waited:?}")]
    PageLoadTimeout { page: usize, waited: Duration },

    /// The next-page control never hid
    #[error("pagination did not end within {limit} pages")]
    PaginationLimit { limit: usize },

    /// A row on the results page didn't have the expected cells
    #[error("malformed timetable row: {0}")]
    MalformedRow(#[from] InvalidRow),

    /// Any other failure while driving the page
    #[error("automation fault: {0}")]
    Automation(#[from] AutomationError),
}
