//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

use crate::config::CrawlerConfig;
use crate::crawl::CrawlPlan;

/// Taiwan High Speed Rail timetable crawler.
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Args {
    /// Fetch timetables for every departure and arrival station
    #[arg(long)]
    pub all: bool,

    /// Departure station name
    #[arg(long)]
    pub departure: Option<String>,

    /// Arrival station name
    #[arg(long)]
    pub arrival: Option<String>,

    /// Travel date in YYYY.MM.DD format (defaults to today)
    #[arg(long = "start-date", alias = "startDate", value_name = "YYYY.MM.DD")]
    pub start_date: Option<String>,

    /// Departure time in HH:MM format (defaults to now)
    #[arg(long = "start-time", alias = "startTime", value_name = "HH:MM")]
    pub start_time: Option<String>,

    /// Directory the JSON output is written to
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// WebDriver server URL
    #[arg(long)]
    pub webdriver_url: Option<String>,

    /// Run the browser without a window
    #[arg(long)]
    pub headless: bool,
}

impl Args {
    /// The crawl plan selected by the flags, or `None` for interactive mode.
    ///
    /// `--all` wins over station names.
    pub fn plan(&self) -> Option<CrawlPlan> {
        if self.all {
            return Some(CrawlPlan::AllPairs);
        }
        match (&self.departure, &self.arrival) {
            (Some(dep), None) => Some(CrawlPlan::FixedDeparture(dep.clone())),
            (None, Some(arr)) => Some(CrawlPlan::FixedArrival(arr.clone())),
            (Some(dep), Some(arr)) => Some(CrawlPlan::SinglePair {
                departure: dep.clone(),
                arrival: arr.clone(),
            }),
            (None, None) => None,
        }
    }

    /// Apply the deployment flags on top of `config`.
    pub fn apply(&self, mut config: CrawlerConfig) -> CrawlerConfig {
        if let Some(dir) = &self.output_dir {
            config = config.with_output_dir(dir);
        }
        if let Some(url) = &self.webdriver_url {
            config = config.with_webdriver_url(url);
        }
        if self.headless {
            config = config.with_headless(true);
        }
        config
    }
}
