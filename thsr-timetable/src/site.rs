//! Opening the timetable page and reading its station lists.

use tracing::{debug, info};

use crate::config::{PageLayout, Timeouts};
use crate::domain::StationSets;
use crate::page::{AutomationError, PagePort};
use crate::wait::poll_until;

/// Load the timetable page and get it ready for searching.
///
/// Dismisses the promotional popup if one appears, then reads the station
/// names offered by the form.
pub async fn open<P: PagePort>(
    port: &P,
    url: &str,
    layout: &PageLayout,
    timeouts: &Timeouts,
) -> Result<StationSets, AutomationError> {
    info!(url, "opening timetable page");
    port.navigate(url).await?;
    dismiss_popup(port, layout, timeouts).await;

    let stations = discover_stations(port, layout).await?;
    info!(
        departures = stations.departures().len(),
        arrivals = stations.arrivals().len(),
        "stations discovered"
    );
    Ok(stations)
}

/// Close the promotional popup if it shows up within the popup timeout.
///
/// Returns whether a popup was dismissed. A missing popup is normal.
pub async fn dismiss_popup<P: PagePort>(port: &P, layout: &PageLayout, timeouts: &Timeouts) -> bool {
    let found = poll_until(timeouts.popup, timeouts.poll_interval, move || async move {
        let buttons = port.find_all(&layout.popup_cancel).await?;
        Ok::<_, AutomationError>(buttons.into_iter().next())
    })
    .await;

    let button = match found {
        Ok(button) => button,
        Err(_) => {
            info!("no popup found");
            return false;
        }
    };

    match port.click(&button).await {
        Ok(()) => {
            debug!("popup dismissed");
            true
        }
        Err(e) => {
            info!(error = %e, "popup could not be closed");
            false
        }
    }
}

/// Read the departure and arrival station names, in display order.
pub async fn discover_stations<P: PagePort>(
    port: &P,
    layout: &PageLayout,
) -> Result<StationSets, AutomationError> {
    let departures = option_texts(port, &layout.departure_options).await?;
    let arrivals = option_texts(port, &layout.arrival_options).await?;
    Ok(StationSets::new(departures, arrivals))
}

async fn option_texts<P: PagePort>(port: &P, selector: &str) -> Result<Vec<String>, AutomationError> {
    let mut names = Vec::new();
    for option in port.find_all(selector).await? {
        names.push(port.text(&option).await?.trim().to_string());
    }
    Ok(names)
}
