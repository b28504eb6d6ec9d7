//! Timetable extraction from the paginated results view.
//!
//! The results view renders one page of rows at a time and replaces the row
//! elements when the next-page control is clicked. Extraction walks the
//! pages until that control is hidden, waiting for each re-render by
//! comparing row-anchor identity with the previous page, and drops rows
//! whose sequence id was already seen.

use std::collections::HashSet;

use tracing::{debug, trace, warn};

use crate::config::{PageLayout, Timeouts};
use crate::crawl::CrawlError;
use crate::domain::TimetableRow;
use crate::page::{AutomationError, PagePort};
use crate::wait::{WaitTimeout, poll_until, wait_until_changed};

/// Rows accumulated for one station pair, in discovery order.
#[derive(Debug, Default)]
struct RowSet {
    rows: Vec<TimetableRow>,
    seen: HashSet<String>,
}

impl RowSet {
    fn contains(&self, sequence_id: &str) -> bool {
        self.seen.contains(sequence_id)
    }

    /// Add a row unless its sequence id is already present.
    fn insert(&mut self, row: TimetableRow) -> bool {
        if !self.seen.insert(row.sequence_id.clone()) {
            return false;
        }
        self.rows.push(row);
        true
    }

    fn into_rows(self) -> Vec<TimetableRow> {
        self.rows
    }
}

/// Read every timetable row from a results view showing page 1.
///
/// Returns rows in page order, then in-page order, with each sequence id
/// appearing once (first occurrence wins). A view with no rows and a hidden
/// next-page control yields an empty vec.
pub async fn extract<P: PagePort>(
    port: &P,
    layout: &PageLayout,
    timeouts: &Timeouts,
) -> Result<Vec<TimetableRow>, CrawlError> {
    let departure = header_text(port, &layout.results_from).await?;
    let arrival = header_text(port, &layout.results_to).await?;

    let mut rows = RowSet::default();
    let mut previous: Vec<P::Element> = Vec::new();
    let mut page = 1;

    loop {
        let anchors = if page == 1 {
            first_page(port, layout, timeouts).await
        } else {
            wait_until_changed(
                timeouts.page_change,
                timeouts.poll_interval,
                &previous,
                move || port.find_all(&layout.row_anchors),
            )
            .await
        }
        .map_err(|e| CrawlError::PageLoadTimeout {
            page,
            waited: e.waited,
        })?;

        let mut added = 0;
        for anchor in &anchors {
            let row = read_row(port, layout, anchor, &departure, &arrival, &rows).await?;
            if let Some(row) = row
                && rows.insert(row)
            {
                added += 1;
            }
        }
        debug!(page, anchors = anchors.len(), added, "read results page");

        let Some(next) = visible_next_page(port, layout).await? else {
            break;
        };
        if page >= timeouts.max_pages {
            return Err(CrawlError::PaginationLimit {
                limit: timeouts.max_pages,
            });
        }

        port.click(&next).await?;
        previous = anchors;
        page += 1;
    }

    debug!(%departure, %arrival, pages = page, rows = rows.rows.len(), "extraction complete");
    Ok(rows.into_rows())
}

/// Row anchors of page 1.
///
/// Page 1 counts as loaded once any row exists, or once the view shows no
/// rows and no further pages.
async fn first_page<P: PagePort>(
    port: &P,
    layout: &PageLayout,
    timeouts: &Timeouts,
) -> Result<Vec<P::Element>, WaitTimeout> {
    poll_until(timeouts.page_change, timeouts.poll_interval, move || async move {
        let anchors = port.find_all(&layout.row_anchors).await?;
        if !anchors.is_empty() {
            return Ok(Some(anchors));
        }
        let last_page = visible_next_page(port, layout).await?.is_none();
        Ok::<_, AutomationError>(last_page.then_some(anchors))
    })
    .await
}

/// The next-page control, if it is on the page and visible.
///
/// A view without the control has no further pages.
async fn visible_next_page<P: PagePort>(
    port: &P,
    layout: &PageLayout,
) -> Result<Option<P::Element>, AutomationError> {
    let Some(next) = port.find_all(&layout.next_page).await?.into_iter().next() else {
        return Ok(None);
    };
    if port.visibility(&next).await?.is_hidden() {
        return Ok(None);
    }
    Ok(Some(next))
}

async fn header_text<P: PagePort>(port: &P, selector: &str) -> Result<String, AutomationError> {
    let element = port.find(selector).await?;
    Ok(port.text(&element).await?.trim().to_string())
}

/// Parse one row anchor, or `None` when it should be skipped.
///
/// Anchors without cells aren't timetable rows. Anchors without a sequence
/// id can't be deduplicated and are dropped. Already-seen ids are skipped
/// before their cells are read.
async fn read_row<P: PagePort>(
    port: &P,
    layout: &PageLayout,
    anchor: &P::Element,
    departure: &str,
    arrival: &str,
    seen: &RowSet,
) -> Result<Option<TimetableRow>, CrawlError> {
    let cells = port.find_all_in(anchor, &layout.row_cells).await?;
    if cells.is_empty() {
        return Ok(None);
    }

    let Some(sequence_id) = port.attribute(anchor, &layout.sequence_attribute).await? else {
        warn!(departure, arrival, "skipping timetable row without a sequence id");
        return Ok(None);
    };
    if seen.contains(&sequence_id) {
        trace!(%sequence_id, "skipping duplicate row");
        return Ok(None);
    }

    let mut texts = Vec::with_capacity(cells.len());
    for cell in &cells {
        texts.push(port.text(cell).await?);
    }

    Ok(Some(TimetableRow::from_cells(
        sequence_id,
        departure,
        arrival,
        &texts,
    )?))
}
