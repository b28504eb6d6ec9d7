//! Crawl orchestration.
//!
//! A [`CrawlPlan`] names which station pairs to search. It is expanded
//! against the stations the form offers, then a [`Crawler`] runs one search
//! per pair, in order, on the single browser page. A failed search is
//! recorded and skipped; it never ends the crawl.

mod error;
mod plan;
mod runner;

pub use error::{ConfigurationError, CrawlError};
pub use plan::CrawlPlan;
pub use runner::{
    CrawlReport, CrawlResult, Crawler, PageSearcher, PairSearcher, QueryOutcome, QueryStatus,
};
