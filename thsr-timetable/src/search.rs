//! Station-pair search driver.
//!
//! Fills the search form for one query, waits for the results to finish
//! loading and hands the results view to the extractor.

use tracing::{debug, info};

use crate::config::{PageLayout, Timeouts};
use crate::crawl::CrawlError;
use crate::domain::{SearchQuery, TimetableRow};
use crate::extract::extract;
use crate::page::{AutomationError, PagePort};
use crate::wait::poll_until;

/// Run one search and return every row of its results.
///
/// Station names must already be known to the form; a missing option
/// surfaces as [`AutomationError::OptionNotFound`].
pub async fn search<P: PagePort>(
    port: &P,
    layout: &PageLayout,
    timeouts: &Timeouts,
    query: &SearchQuery,
) -> Result<Vec<TimetableRow>, CrawlError> {
    info!(
        departure = query.departure(),
        arrival = query.arrival(),
        date = query.date.as_str(),
        time = query.time.as_str(),
        "searching timetable"
    );

    let date_input = port.find(&layout.date_input).await?;
    port.set_value(&date_input, query.date.as_str()).await?;
    let time_input = port.find(&layout.time_input).await?;
    port.set_value(&time_input, query.time.as_str()).await?;

    select_option(port, &layout.departure_options, query.departure()).await?;
    select_option(port, &layout.arrival_options, query.arrival()).await?;

    let button = port.find(&layout.search_button).await?;
    port.click(&button).await?;

    poll_until(timeouts.search, timeouts.poll_interval, move || async move {
        let loading = port.find(&layout.loading_indicator).await?;
        let hidden = port.visibility(&loading).await?.is_hidden();
        Ok::<_, AutomationError>(hidden.then_some(()))
    })
    .await
    .map_err(|e| CrawlError::SearchTimeout { waited: e.waited })?;
    debug!("search results loaded");

    let rows = extract(port, layout, timeouts).await?;
    info!(
        departure = query.departure(),
        arrival = query.arrival(),
        rows = rows.len(),
        "timetable extracted"
    );
    Ok(rows)
}

/// Click the option whose trimmed text is exactly `name`.
async fn select_option<P: PagePort>(
    port: &P,
    options_selector: &str,
    name: &str,
) -> Result<(), AutomationError> {
    for option in port.find_all(options_selector).await? {
        if port.text(&option).await?.trim() == name {
            return port.click(&option).await;
        }
    }
    Err(AutomationError::OptionNotFound {
        select: options_selector.to_string(),
        option: name.to_string(),
    })
}
