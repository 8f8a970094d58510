use chrono::{DateTime, Local};
use phf::phf_set;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utility::id::{HasId, Id};

use crate::{example_time, station::Station, ExampleData};

/// Stations served by the airport express. On express routes only these
/// count as stops.
pub static EXPRESS_STOPS: phf::Set<&'static str> = phf_set! {
    "MRI",
    "SUDB",
    "DU",
    "RW",
    "BPR",
    "BST",
};

const EXPRESS_LINE_MARKER: &str = "BST";

/// The full run of a train, identified by its train id.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    pub train_id: Id<Route>,
    pub line: String,
    pub name: String,
    pub station_origin_id: Id<Station>,
    pub station_origin_name: String,
    pub station_destination_id: Id<Station>,
    pub station_destination_name: String,
    pub arrives_at: DateTime<Local>,
    /// Stops in the order the train calls at them.
    pub stops: Vec<RouteStop>,
    pub created_at: DateTime<Local>,
    pub updated_at: DateTime<Local>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RouteStop {
    pub id: String,
    pub station_id: Id<Station>,
    pub station_name: String,
    pub departs_at: DateTime<Local>,
    pub created_at: DateTime<Local>,
    pub updated_at: DateTime<Local>,
}

impl HasId for Route {
    type IdType = String;
}

impl Route {
    pub fn is_express(&self) -> bool {
        self.line.to_uppercase().contains(EXPRESS_LINE_MARKER)
    }

    fn position_of(&self, station: &Id<Station>) -> Option<usize> {
        self.stops.iter().position(|stop| stop.station_id == *station)
    }
}

/// Returns a copy of `route` starting at the first stop at `origin`. The route
/// is returned unchanged if it never calls at `origin`.
pub fn filter_route_stops(route: &Route, origin: &Id<Station>) -> Route {
    match route.position_of(origin) {
        Some(index) => Route {
            stops: route.stops[index..].to_vec(),
            ..route.clone()
        },
        None => route.clone(),
    }
}

/// Number of stops after the first call at `origin`, or `None` if the route
/// never calls at `origin`.
pub fn calculate_stops_count(route: &Route, origin: &Id<Station>) -> Option<usize> {
    let index = route.position_of(origin)?;
    let remaining = &route.stops[index + 1..];
    if route.is_express() {
        Some(
            remaining
                .iter()
                .filter(|stop| EXPRESS_STOPS.contains(stop.station_id.raw_ref::<str>()))
                .count(),
        )
    } else {
        Some(remaining.len())
    }
}

impl ExampleData for Route {
    fn example_data() -> Self {
        let stop = |id: &str, station: &str, name: &str, departs_at: i64| RouteStop {
            id: id.to_owned(),
            station_id: Id::from(station),
            station_name: name.to_owned(),
            departs_at: example_time(departs_at, 0),
            created_at: example_time(1_717_200_000, 0),
            updated_at: example_time(1_717_200_000, 0),
        };
        Route {
            train_id: Id::from("KA2113"),
            line: "COMMUTER LINE BST".to_owned(),
            name: "MANGGARAI-BANDARA SOEKARNO HATTA".to_owned(),
            station_origin_id: Id::from("MRI"),
            station_origin_name: "MANGGARAI".to_owned(),
            station_destination_id: Id::from("BST"),
            station_destination_name: "BANDARA SOEKARNO HATTA".to_owned(),
            arrives_at: example_time(1_718_013_300, 0),
            stops: vec![
                stop("rt_ka2113_0", "MRI", "MANGGARAI", 1_718_009_400),
                stop("rt_ka2113_1", "SUDB", "SUDIRMAN BARU", 1_718_010_000),
                stop("rt_ka2113_2", "DU", "DURI", 1_718_010_900),
                stop("rt_ka2113_3", "RW", "RAWA BUAYA", 1_718_011_800),
                stop("rt_ka2113_4", "BPR", "BATU CEPER", 1_718_012_400),
                stop("rt_ka2113_5", "BST", "BANDARA SOEKARNO HATTA", 1_718_013_300),
            ],
            created_at: example_time(1_717_200_000, 0),
            updated_at: example_time(1_717_200_000, 500),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route_via(line: &str, stations: &[&str]) -> Route {
        let mut route = Route::example_data();
        route.line = line.to_owned();
        route.stops = stations
            .iter()
            .enumerate()
            .map(|(index, station)| RouteStop {
                id: format!("stop_{index}"),
                station_id: Id::from(*station),
                station_name: station.to_string(),
                departs_at: example_time(1_718_009_400 + index as i64 * 600, 0),
                created_at: example_time(1_717_200_000, 0),
                updated_at: example_time(1_717_200_000, 0),
            })
            .collect();
        route
    }

    fn stations(route: &Route) -> Vec<String> {
        route.stops.iter().map(|stop| stop.station_id.raw()).collect()
    }

    #[test]
    fn filter_starts_at_origin() {
        let route = route_via("COMMUTER LINE BOGOR", &["A", "B", "C", "D"]);
        let filtered = filter_route_stops(&route, &Id::from("B"));
        assert_eq!(stations(&filtered), ["B", "C", "D"]);
        assert_eq!(filtered.train_id, route.train_id);
    }

    #[test]
    fn filter_keeps_route_without_origin() {
        let route = route_via("COMMUTER LINE BOGOR", &["A", "B", "C"]);
        assert_eq!(filter_route_stops(&route, &Id::from("Z")), route);
    }

    #[test]
    fn filter_uses_first_occurrence() {
        let route = route_via("COMMUTER LINE LOOP", &["A", "B", "C", "B", "E"]);
        let filtered = filter_route_stops(&route, &Id::from("B"));
        assert_eq!(stations(&filtered), ["B", "C", "B", "E"]);
    }

    #[test]
    fn count_on_regular_line() {
        let route = route_via("COMMUTER LINE BOGOR", &["A", "B", "C", "D"]);
        assert_eq!(calculate_stops_count(&route, &Id::from("A")), Some(3));
        assert_eq!(calculate_stops_count(&route, &Id::from("D")), Some(0));
        assert_eq!(calculate_stops_count(&route, &Id::from("Z")), None);
    }

    #[test]
    fn count_on_express_line_skips_unlisted_stations() {
        let route = route_via("COMMUTER LINE BST", &["SUDB", "DU", "X", "RW"]);
        assert_eq!(calculate_stops_count(&route, &Id::from("SUDB")), Some(2));
    }

    #[test]
    fn express_detection_ignores_case() {
        assert!(route_via("commuter line bst", &[]).is_express());
        assert!(!route_via("COMMUTER LINE BOGOR", &[]).is_express());
    }

    #[test]
    fn example_route_counts_express_stops() {
        let route = Route::example_data();
        assert_eq!(calculate_stops_count(&route, &Id::from("MRI")), Some(5));
    }
}
