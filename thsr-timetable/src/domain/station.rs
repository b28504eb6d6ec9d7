//! Station name sets and pairs.

use std::fmt;

/// Which side of the search form a station name belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StationRole {
    Departure,
    Arrival,
}

impl fmt::Display for StationRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StationRole::Departure => f.write_str("departure"),
            StationRole::Arrival => f.write_str("arrival"),
        }
    }
}

/// The departure and arrival station names offered by the search form.
///
/// Names compare by exact string equality. Order is the display order of
/// the form's select controls; duplicates are dropped on construction,
/// keeping the first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StationSets {
    departures: Vec<String>,
    arrivals: Vec<String>,
}

impl StationSets {
    /// Create station sets from the names in display order.
    pub fn new<D, A>(departures: D, arrivals: A) -> Self
    where
        D: IntoIterator,
        D::Item: Into<String>,
        A: IntoIterator,
        A::Item: Into<String>,
    {
        Self {
            departures: distinct(departures),
            arrivals: distinct(arrivals),
        }
    }

    pub fn departures(&self) -> &[String] {
        &self.departures
    }

    pub fn arrivals(&self) -> &[String] {
        &self.arrivals
    }

    /// Names for the given side of the form.
    pub fn for_role(&self, role: StationRole) -> &[String] {
        match role {
            StationRole::Departure => &self.departures,
            StationRole::Arrival => &self.arrivals,
        }
    }

    /// Check whether `name` is offered on the given side of the form.
    pub fn contains(&self, role: StationRole, name: &str) -> bool {
        self.for_role(role).iter().any(|s| s == name)
    }

    /// True when either side has no stations.
    pub fn is_empty(&self) -> bool {
        self.departures.is_empty() || self.arrivals.is_empty()
    }
}

fn distinct<I>(names: I) -> Vec<String>
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    let mut out: Vec<String> = Vec::new();
    for name in names {
        let name = name.into();
        if !out.contains(&name) {
            out.push(name);
        }
    }
    out
}

/// An ordered (departure, arrival) pair to search for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StationPair {
    pub departure: String,
    pub arrival: String,
}

impl StationPair {
    pub fn new(departure: impl Into<String>, arrival: impl Into<String>) -> Self {
        Self {
            departure: departure.into(),
            arrival: arrival.into(),
        }
    }
}

impl fmt::Display for StationPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.departure, self.arrival)
    }
}
