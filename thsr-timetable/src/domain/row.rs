//! Timetable row type.

use serde::{Deserialize, Serialize};

/// Number of cells a timetable row carries on the results page.
pub const ROW_CELLS: usize = 7;

/// Error returned when a row's cells don't match the expected layout.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("row {sequence_id} has {found} cells, expected {ROW_CELLS}")]
pub struct InvalidRow {
    pub sequence_id: String,
    pub found: usize,
}

/// One scheduled trip between two stations, as displayed on the site.
///
/// Times are kept in the site's own formatting; nothing is parsed or
/// normalised. The serialized field names match the crawler's JSON output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimetableRow {
    /// Source-provided row identifier, unique within one station pair.
    #[serde(rename = "data-seq")]
    pub sequence_id: String,

    #[serde(rename = "departureStation")]
    pub departure_station: String,

    #[serde(rename = "arrivalStation")]
    pub arrival_station: String,

    #[serde(rename = "startTime")]
    pub start_time: String,

    #[serde(rename = "travelTime")]
    pub travel_time: String,

    #[serde(rename = "arriveTime")]
    pub arrive_time: String,

    #[serde(rename = "trainNo")]
    pub train_number: String,

    #[serde(rename = "freeSeat")]
    pub free_seat: String,

    #[serde(rename = "earlyBird")]
    pub early_bird: String,

    pub remark: String,
}

impl TimetableRow {
    /// Build a row from its ordered cell texts.
    ///
    /// Cells are trimmed. Extra trailing cells are ignored; fewer than
    /// [`ROW_CELLS`] is an error.
    pub fn from_cells(
        sequence_id: impl Into<String>,
        departure_station: &str,
        arrival_station: &str,
        cells: &[String],
    ) -> Result<Self, InvalidRow> {
        let sequence_id = sequence_id.into();
        let [
            start_time,
            travel_time,
            arrive_time,
            train_number,
            free_seat,
            early_bird,
            remark,
        ] = match cells.get(..ROW_CELLS) {
            Some([a, b, c, d, e, f, g]) => [a, b, c, d, e, f, g].map(|s| s.trim().to_string()),
            _ => {
                return Err(InvalidRow {
                    sequence_id,
                    found: cells.len(),
                });
            }
        };

        Ok(Self {
            sequence_id,
            departure_station: departure_station.to_string(),
            arrival_station: arrival_station.to_string(),
            start_time,
            travel_time,
            arrive_time,
            train_number,
            free_seat,
            early_bird,
            remark,
        })
    }
}
