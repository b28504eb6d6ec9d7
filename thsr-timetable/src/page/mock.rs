//! Scripted in-memory timetable page for tests.
//!
//! Mimics the parts of the live page the crawler touches: station selects,
//! date/time inputs, the search button and loading indicator, and a results
//! view whose row elements are replaced on every render.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::config::PageLayout;

use super::{AutomationError, PagePort};

/// Element handles on the mock page.
///
/// Rows and cells carry the render generation, so a re-rendered row never
/// compares equal to the one it replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum MockElement {
    DepartureOption(usize),
    ArrivalOption(usize),
    DateInput,
    TimeInput,
    SearchButton,
    Loading,
    From,
    To,
    Row { generation: u64, index: usize },
    Cell { generation: u64, row: usize, column: usize },
    NextPage,
    PopupCancel,
}

/// One row anchor in a scripted results page.
#[derive(Debug, Clone)]
pub(crate) struct MockRow {
    sequence_id: Option<String>,
    cells: Vec<String>,
}

impl MockRow {
    pub(crate) fn new(sequence_id: Option<&str>, cells: &[&str]) -> Self {
        Self {
            sequence_id: sequence_id.map(str::to_string),
            cells: cells.iter().map(|s| (*s).to_string()).collect(),
        }
    }

    /// A complete timetable row.
    pub(crate) fn train(sequence_id: &str, train_number: &str) -> Self {
        Self::new(
            Some(sequence_id),
            &["06:00", "01:30", "07:30", train_number, "", "", ""],
        )
    }

    /// A row with cells but no sequence id.
    pub(crate) fn unnumbered(train_number: &str) -> Self {
        Self::new(None, &["06:00", "01:30", "07:30", train_number, "", "", ""])
    }

    /// An anchor that isn't a timetable row.
    pub(crate) fn link() -> Self {
        Self::new(None, &[])
    }
}

/// Scripted results for one station pair.
#[derive(Debug, Clone, Default)]
pub(crate) struct MockResults {
    from: String,
    to: String,
    pages: Vec<Vec<MockRow>>,
    loading_never_hides: bool,
    next_never_hides: bool,
    freeze_pagination: bool,
    no_pager: bool,
}

impl MockResults {
    pub(crate) fn new(from: &str, to: &str) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
            ..Self::default()
        }
    }

    pub(crate) fn page(mut self, rows: Vec<MockRow>) -> Self {
        self.pages.push(rows);
        self
    }

    /// The loading indicator stays visible after searching.
    pub(crate) fn loading_never_hides(mut self) -> Self {
        self.loading_never_hides = true;
        self
    }

    /// The next-page control stays visible; paging past the end re-renders
    /// the last page.
    pub(crate) fn next_never_hides(mut self) -> Self {
        self.next_never_hides = true;
        self
    }

    /// The results view has no next-page control at all.
    pub(crate) fn without_pager(mut self) -> Self {
        self.no_pager = true;
        self
    }

    /// Clicking the next-page control doesn't re-render anything.
    pub(crate) fn freeze_pagination(mut self) -> Self {
        self.freeze_pagination = true;
        self
    }

    fn has_page_after(&self, page: usize) -> bool {
        page + 1 < self.pages.len()
    }

    fn rows(&self, page: usize) -> &[MockRow] {
        self.pages.get(page).map(Vec::as_slice).unwrap_or_default()
    }
}

/// A search submitted through the mock form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct MockSearch {
    pub departure: String,
    pub arrival: String,
    pub date: String,
    pub time: String,
}

#[derive(Debug)]
struct Rendered {
    results: MockResults,
    page: usize,
}

#[derive(Debug, Default)]
struct State {
    departures: Vec<String>,
    arrivals: Vec<String>,
    scripts: HashMap<(String, String), MockResults>,
    rendered: Option<Rendered>,
    generation: u64,
    loading_visible: bool,
    date: String,
    time: String,
    selected_departure: Option<usize>,
    selected_arrival: Option<usize>,
    searches: Vec<MockSearch>,
    navigations: Vec<String>,
    popup: bool,
    closed: bool,
}

/// In-memory page implementing [`PagePort`].
///
/// Clones share state, so a test can keep a handle after the page itself
/// has been moved into a session.
#[derive(Debug, Clone)]
pub(crate) struct MockPage {
    layout: PageLayout,
    state: Arc<Mutex<State>>,
}

impl MockPage {
    pub(crate) fn new<const D: usize, const A: usize>(
        departures: [&str; D],
        arrivals: [&str; A],
    ) -> Self {
        let state = State {
            departures: departures.iter().map(|s| (*s).to_string()).collect(),
            arrivals: arrivals.iter().map(|s| (*s).to_string()).collect(),
            ..State::default()
        };
        Self {
            layout: PageLayout::default(),
            state: Arc::new(Mutex::new(state)),
        }
    }

    /// Script the results for a station pair. Unscripted pairs show an
    /// empty results view.
    pub(crate) fn with_results(self, departure: &str, arrival: &str, results: MockResults) -> Self {
        self.lock()
            .scripts
            .insert((departure.to_string(), arrival.to_string()), results);
        self
    }

    /// Show the promotional popup until it is dismissed.
    pub(crate) fn with_popup(self) -> Self {
        self.lock().popup = true;
        self
    }

    /// Render a pair's results as if a search had just completed.
    pub(crate) fn show_results(&self, departure: &str, arrival: &str) {
        let mut state = self.lock();
        let results = state.results_for(departure, arrival);
        state.render(results);
    }

    pub(crate) fn searches(&self) -> Vec<MockSearch> {
        self.lock().searches.clone()
    }

    pub(crate) fn navigations(&self) -> Vec<String> {
        self.lock().navigations.clone()
    }

    pub(crate) fn popup_visible(&self) -> bool {
        self.lock().popup
    }

    pub(crate) fn is_closed(&self) -> bool {
        self.lock().closed
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }
}

impl State {
    fn results_for(&self, departure: &str, arrival: &str) -> MockResults {
        self.scripts
            .get(&(departure.to_string(), arrival.to_string()))
            .cloned()
            .unwrap_or_else(|| MockResults::new(departure, arrival))
    }

    fn render(&mut self, results: MockResults) {
        self.generation += 1;
        self.loading_visible = false;
        self.rendered = Some(Rendered { results, page: 0 });
    }

    fn submit_search(&mut self) -> Result<(), AutomationError> {
        let (Some(dep), Some(arr)) = (self.selected_departure, self.selected_arrival) else {
            return Err(AutomationError::Driver("no station selected".into()));
        };
        let departure = self.departures[dep].clone();
        let arrival = self.arrivals[arr].clone();
        self.searches.push(MockSearch {
            departure: departure.clone(),
            arrival: arrival.clone(),
            date: self.date.clone(),
            time: self.time.clone(),
        });

        let results = self.results_for(&departure, &arrival);
        if results.loading_never_hides {
            self.generation += 1;
            self.rendered = None;
            self.loading_visible = true;
        } else {
            self.render(results);
        }
        Ok(())
    }

    fn next_page(&mut self) {
        let Some(rendered) = self.rendered.as_mut() else {
            return;
        };
        if rendered.results.freeze_pagination {
            return;
        }
        if rendered.results.has_page_after(rendered.page) {
            rendered.page += 1;
            self.generation += 1;
        } else if rendered.results.next_never_hides {
            self.generation += 1;
        }
    }

    fn current_rows(&self) -> &[MockRow] {
        self.rendered
            .as_ref()
            .map(|r| r.results.rows(r.page))
            .unwrap_or_default()
    }

    fn row(&self, generation: u64, index: usize) -> Result<&MockRow, AutomationError> {
        if generation != self.generation {
            return Err(AutomationError::Driver("stale element reference".into()));
        }
        self.current_rows()
            .get(index)
            .ok_or_else(|| AutomationError::Driver("stale element reference".into()))
    }

    fn next_visible(&self) -> bool {
        self.rendered.as_ref().is_some_and(|r| {
            r.results.has_page_after(r.page) || r.results.next_never_hides
        })
    }
}

impl PagePort for MockPage {
    type Element = MockElement;

    async fn navigate(&self, url: &str) -> Result<(), AutomationError> {
        self.lock().navigations.push(url.to_string());
        Ok(())
    }

    async fn find_all(&self, selector: &str) -> Result<Vec<MockElement>, AutomationError> {
        let state = self.lock();
        let layout = &self.layout;
        let rendered = state.rendered.is_some();

        let found = if selector == layout.departure_options {
            (0..state.departures.len())
                .map(MockElement::DepartureOption)
                .collect()
        } else if selector == layout.arrival_options {
            (0..state.arrivals.len())
                .map(MockElement::ArrivalOption)
                .collect()
        } else if selector == layout.date_input {
            vec![MockElement::DateInput]
        } else if selector == layout.time_input {
            vec![MockElement::TimeInput]
        } else if selector == layout.search_button {
            vec![MockElement::SearchButton]
        } else if selector == layout.loading_indicator {
            vec![MockElement::Loading]
        } else if selector == layout.next_page {
            if state.rendered.as_ref().is_some_and(|r| r.results.no_pager) {
                Vec::new()
            } else {
                vec![MockElement::NextPage]
            }
        } else if selector == layout.results_from && rendered {
            vec![MockElement::From]
        } else if selector == layout.results_to && rendered {
            vec![MockElement::To]
        } else if selector == layout.row_anchors {
            (0..state.current_rows().len())
                .map(|index| MockElement::Row {
                    generation: state.generation,
                    index,
                })
                .collect()
        } else if selector == layout.popup_cancel && state.popup {
            vec![MockElement::PopupCancel]
        } else {
            Vec::new()
        };

        Ok(found)
    }

    async fn find_all_in(
        &self,
        scope: &MockElement,
        selector: &str,
    ) -> Result<Vec<MockElement>, AutomationError> {
        let state = self.lock();
        match scope {
            MockElement::Row { generation, index } if selector == self.layout.row_cells => {
                let row = state.row(*generation, *index)?;
                Ok((0..row.cells.len())
                    .map(|column| MockElement::Cell {
                        generation: *generation,
                        row: *index,
                        column,
                    })
                    .collect())
            }
            _ => Ok(Vec::new()),
        }
    }

    async fn text(&self, element: &MockElement) -> Result<String, AutomationError> {
        let state = self.lock();
        let text = match element {
            MockElement::DepartureOption(i) => state.departures[*i].clone(),
            MockElement::ArrivalOption(i) => state.arrivals[*i].clone(),
            MockElement::From | MockElement::To => {
                let rendered = state
                    .rendered
                    .as_ref()
                    .ok_or_else(|| AutomationError::Driver("stale element reference".into()))?;
                if *element == MockElement::From {
                    rendered.results.from.clone()
                } else {
                    rendered.results.to.clone()
                }
            }
            MockElement::Cell {
                generation,
                row,
                column,
            } => state.row(*generation, *row)?.cells[*column].clone(),
            _ => String::new(),
        };
        Ok(text)
    }

    async fn attribute(
        &self,
        element: &MockElement,
        name: &str,
    ) -> Result<Option<String>, AutomationError> {
        let state = self.lock();
        let value = match (element, name) {
            (MockElement::Row { generation, index }, name)
                if name == self.layout.sequence_attribute =>
            {
                state.row(*generation, *index)?.sequence_id.clone()
            }
            (MockElement::Loading, "style") => Some(if state.loading_visible {
                "display: block;".to_string()
            } else {
                "display: none;".to_string()
            }),
            (MockElement::NextPage, "style") => Some(if state.next_visible() {
                "visibility: visible;".to_string()
            } else {
                "visibility: hidden;".to_string()
            }),
            _ => None,
        };
        Ok(value)
    }

    async fn set_value(&self, element: &MockElement, value: &str) -> Result<(), AutomationError> {
        let mut state = self.lock();
        match element {
            MockElement::DateInput => state.date = value.to_string(),
            MockElement::TimeInput => state.time = value.to_string(),
            other => {
                return Err(AutomationError::Driver(format!(
                    "cannot set value of {other:?}"
                )));
            }
        }
        Ok(())
    }

    async fn click(&self, element: &MockElement) -> Result<(), AutomationError> {
        let mut state = self.lock();
        match element {
            MockElement::DepartureOption(i) => state.selected_departure = Some(*i),
            MockElement::ArrivalOption(i) => state.selected_arrival = Some(*i),
            MockElement::SearchButton => state.submit_search()?,
            MockElement::NextPage => state.next_page(),
            MockElement::PopupCancel => state.popup = false,
            _ => {}
        }
        Ok(())
    }

    async fn close(self) -> Result<(), AutomationError> {
        self.lock().closed = true;
        Ok(())
    }
}
