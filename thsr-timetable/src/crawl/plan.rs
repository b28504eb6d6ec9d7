//! Crawl plans and their expansion into station pairs.

use crate::domain::{StationPair, StationRole, StationSets};

use super::error::ConfigurationError;

/// Which station pairs a crawl covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrawlPlan {
    /// Every departure to every other arrival.
    AllPairs,
    /// One departure to every other arrival.
    FixedDeparture(String),
    /// Every other departure to one arrival.
    FixedArrival(String),
    /// Exactly one pair.
    SinglePair { departure: String, arrival: String },
}

impl CrawlPlan {
    /// Expand the plan into the ordered list of pairs to search.
    ///
    /// Pairs are departure-major, following the form's display order, and
    /// never pair a station with itself. Every named station is checked
    /// against `stations` before anything is returned.
    pub fn expand(&self, stations: &StationSets) -> Result<Vec<StationPair>, ConfigurationError> {
        let pairs = match self {
            CrawlPlan::AllPairs => stations
                .departures()
                .iter()
                .flat_map(|dep| {
                    stations
                        .arrivals()
                        .iter()
                        .filter(move |arr| *arr != dep)
                        .map(move |arr| StationPair::new(dep, arr))
                })
                .collect(),
            CrawlPlan::FixedDeparture(dep) => {
                require(stations, StationRole::Departure, dep)?;
                stations
                    .arrivals()
                    .iter()
                    .filter(|arr| *arr != dep)
                    .map(|arr| StationPair::new(dep, arr))
                    .collect()
            }
            CrawlPlan::FixedArrival(arr) => {
                require(stations, StationRole::Arrival, arr)?;
                stations
                    .departures()
                    .iter()
                    .filter(|dep| *dep != arr)
                    .map(|dep| StationPair::new(dep, arr))
                    .collect()
            }
            CrawlPlan::SinglePair { departure, arrival } => {
                require(stations, StationRole::Departure, departure)?;
                require(stations, StationRole::Arrival, arrival)?;
                if departure == arrival {
                    return Err(ConfigurationError::SameStation(departure.clone()));
                }
                vec![StationPair::new(departure, arrival)]
            }
        };
        Ok(pairs)
    }
}

fn require(stations: &StationSets, role: StationRole, name: &str) -> Result<(), ConfigurationError> {
    if stations.contains(role, name) {
        Ok(())
    } else {
        Err(ConfigurationError::UnknownStation {
            role,
            name: name.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abc() -> StationSets {
        StationSets::new(["A", "B", "C"], ["A", "B", "C"])
    }

    fn pairs(list: &[(&str, &str)]) -> Vec<StationPair> {
        list.iter().map(|(d, a)| StationPair::new(*d, *a)).collect()
    }

    #[test]
    fn all_pairs_excludes_diagonal() {
        let expanded = CrawlPlan::AllPairs.expand(&abc()).unwrap();
        assert_eq!(
            expanded,
            pairs(&[
                ("A", "B"),
                ("A", "C"),
                ("B", "A"),
                ("B", "C"),
                ("C", "A"),
                ("C", "B"),
            ])
        );
    }

    #[test]
    fn fixed_departure() {
        let expanded = CrawlPlan::FixedDeparture("B".into()).expand(&abc()).unwrap();
        assert_eq!(expanded, pairs(&[("B", "A"), ("B", "C")]));
    }

    #[test]
    fn fixed_arrival() {
        let expanded = CrawlPlan::FixedArrival("A".into()).expand(&abc()).unwrap();
        assert_eq!(expanded, pairs(&[("B", "A"), ("C", "A")]));
    }

    #[test]
    fn single_pair() {
        let plan = CrawlPlan::SinglePair {
            departure: "C".into(),
            arrival: "A".into(),
        };
        assert_eq!(plan.expand(&abc()).unwrap(), pairs(&[("C", "A")]));
    }

    #[test]
    fn single_pair_rejects_same_station() {
        let plan = CrawlPlan::SinglePair {
            departure: "B".into(),
            arrival: "B".into(),
        };
        assert_eq!(
            plan.expand(&abc()).unwrap_err(),
            ConfigurationError::SameStation("B".into())
        );
    }

    #[test]
    fn unknown_stations_are_rejected() {
        let err = CrawlPlan::FixedDeparture("Z".into())
            .expand(&abc())
            .unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::UnknownStation {
                role: StationRole::Departure,
                name: "Z".into()
            }
        );

        let err = CrawlPlan::FixedArrival("Z".into()).expand(&abc()).unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::UnknownStation {
                role: StationRole::Arrival,
                name: "Z".into()
            }
        );

        let plan = CrawlPlan::SinglePair {
            departure: "A".into(),
            arrival: "Z".into(),
        };
        assert!(matches!(
            plan.expand(&abc()).unwrap_err(),
            ConfigurationError::UnknownStation {
                role: StationRole::Arrival,
                ..
            }
        ));
    }

    #[test]
    fn role_matters_for_membership() {
        let stations = StationSets::new(["A", "B"], ["B", "C"]);
        assert!(CrawlPlan::FixedDeparture("C".into()).expand(&stations).is_err());
        assert_eq!(
            CrawlPlan::FixedArrival("C".into()).expand(&stations).unwrap(),
            pairs(&[("A", "C"), ("B", "C")])
        );
    }
}
