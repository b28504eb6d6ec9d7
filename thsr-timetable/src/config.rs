//! Crawler configuration.
//!
//! Defaults target the Taiwan High Speed Rail timetable search page.
//! Deployment settings can be overridden from the environment.

use std::path::PathBuf;
use std::time::Duration;

/// Default timetable search page.
const DEFAULT_TIMETABLE_URL: &str =
    "https://www.thsrc.com.tw/ArticleContent/a3b630bb-1066-4352-a1ef-58c7b4e8ef7c";

/// Default WebDriver endpoint (a local chromedriver).
const DEFAULT_WEBDRIVER_URL: &str = "http://localhost:9515";

/// Default directory for JSON output.
const DEFAULT_OUTPUT_DIR: &str = "output";

/// CSS selectors for every element the crawler touches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLayout {
    /// Options of the departure station select.
    pub departure_options: String,
    /// Options of the arrival station select.
    pub arrival_options: String,
    /// Travel date input.
    pub date_input: String,
    /// Departure time input.
    pub time_input: String,
    /// Button that submits the search form.
    pub search_button: String,
    /// Indicator shown while results are loading.
    pub loading_indicator: String,
    /// Departure station name in the results header.
    pub results_from: String,
    /// Arrival station name in the results header.
    pub results_to: String,
    /// Row anchors in the results view.
    pub row_anchors: String,
    /// Cells inside one row anchor.
    pub row_cells: String,
    /// Attribute carrying the row's sequence id.
    pub sequence_attribute: String,
    /// Next-page control of the results view.
    pub next_page: String,
    /// Cancel button of the promotional popup.
    pub popup_cancel: String,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self {
            departure_options: "select#select_location01 option".to_string(),
            arrival_options: "select#select_location02 option".to_string(),
            date_input: "input#Departdate03".to_string(),
            time_input: "input#outWardTime".to_string(),
            search_button: "button#start-search".to_string(),
            loading_indicator: "div#search-loading".to_string(),
            results_from: "div#ttab-01 .from".to_string(),
            results_to: "div#ttab-01 .to".to_string(),
            row_anchors: "div#ttab-01 a".to_string(),
            row_cells: "div.tr-td".to_string(),
            sequence_attribute: "data-seq".to_string(),
            next_page: "a#ttab-01_nextPage".to_string(),
            popup_cancel: "button.swal2-cancel.swal2-styled".to_string(),
        }
    }
}

/// Bounds on every wait the crawler performs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timeouts {
    /// How long to wait for the loading indicator to hide after a search.
    pub search: Duration,
    /// How long to wait for the results view to re-render after paging.
    pub page_change: Duration,
    /// How long to wait for the promotional popup to appear.
    pub popup: Duration,
    /// Delay between polls of a pending condition.
    pub poll_interval: Duration,
    /// Maximum number of result pages read for one search.
    pub max_pages: usize,
}

impl Timeouts {
    /// Set the search timeout.
    pub fn with_search(mut self, timeout: Duration) -> Self {
        self.search = timeout;
        self
    }

    /// Set the page change timeout.
    pub fn with_page_change(mut self, timeout: Duration) -> Self {
        self.page_change = timeout;
        self
    }

    /// Set the popup timeout.
    pub fn with_popup(mut self, timeout: Duration) -> Self {
        self.popup = timeout;
        self
    }

    /// Set the poll interval.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Set the page limit.
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            search: Duration::from_secs(10),
            page_change: Duration::from_secs(3),
            popup: Duration::from_secs(5),
            poll_interval: Duration::from_millis(100),
            max_pages: 200,
        }
    }
}

/// Top-level crawler configuration.
#[derive(Debug, Clone)]
pub struct CrawlerConfig {
    /// Timetable search page URL.
    pub timetable_url: String,
    /// WebDriver server URL.
    pub webdriver_url: String,
    /// Run the browser without a window.
    pub headless: bool,
    /// Directory JSON output is written to.
    pub output_dir: PathBuf,
    pub layout: PageLayout,
    pub timeouts: Timeouts,
}

impl CrawlerConfig {
    /// Load the configuration, applying environment overrides.
    ///
    /// Reads `THSR_TIMETABLE_URL`, `WEBDRIVER_URL`, `THSR_HEADLESS` and
    /// `THSR_OUTPUT_DIR`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load the configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(url) = lookup("THSR_TIMETABLE_URL").filter(|s| !s.is_empty()) {
            config.timetable_url = url;
        }
        if let Some(url) = lookup("WEBDRIVER_URL").filter(|s| !s.is_empty()) {
            config.webdriver_url = url;
        }
        if let Some(flag) = lookup("THSR_HEADLESS") {
            config.headless = parse_flag(&flag);
        }
        if let Some(dir) = lookup("THSR_OUTPUT_DIR").filter(|s| !s.is_empty()) {
            config.output_dir = PathBuf::from(dir);
        }

        config
    }

    /// Set the WebDriver server URL.
    pub fn with_webdriver_url(mut self, url: impl Into<String>) -> Self {
        self.webdriver_url = url.into();
        self
    }

    /// Set the output directory.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Set headless mode.
    pub fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Set the wait bounds.
    pub fn with_timeouts(mut self, timeouts: Timeouts) -> Self {
        self.timeouts = timeouts;
        self
    }
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            timetable_url: DEFAULT_TIMETABLE_URL.to_string(),
            webdriver_url: DEFAULT_WEBDRIVER_URL.to_string(),
            headless: false,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            layout: PageLayout::default(),
            timeouts: Timeouts::default(),
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
