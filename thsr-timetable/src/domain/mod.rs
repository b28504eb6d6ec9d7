//! Core domain types for the timetable crawler.
//!
//! These types are independent of the browser layer: rows as they are
//! harvested from the results view, the station sets offered by the search
//! form, and the date/time strings the form expects.

mod query;
mod row;
mod station;

pub use query::{DepartureTime, InvalidSearchTime, SearchQuery, TravelDate};
pub use row::{InvalidRow, ROW_CELLS, TimetableRow};
pub use station::{StationPair, StationRole, StationSets};
