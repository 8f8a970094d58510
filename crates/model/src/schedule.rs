use chrono::{DateTime, Local};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utility::id::{HasId, Id};

use crate::{route::Route, station::Station, example_time, ExampleData};

/// A single departure of a train at a station.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    pub id: Id<Schedule>,
    pub station_id: Id<Station>,
    pub station_origin_id: Id<Station>,
    pub station_destination_id: Id<Station>,
    pub train_id: Id<Route>,
    pub line: String,
    pub route: String,
    pub departs_at: DateTime<Local>,
    pub arrives_at: DateTime<Local>,
    /// Line color as sent by the operator, e.g. `#DD0067`.
    pub color: Option<String>,
    pub created_at: DateTime<Local>,
    pub updated_at: DateTime<Local>,
}

impl HasId for Schedule {
    type IdType = String;
}

impl ExampleData for Schedule {
    fn example_data() -> Self {
        Schedule {
            id: Id::from("sc_krl_sudb_ka2113"),
            station_id: Id::from("SUDB"),
            station_origin_id: Id::from("MRI"),
            station_destination_id: Id::from("BST"),
            train_id: Id::from("KA2113"),
            line: "COMMUTER LINE BST".to_owned(),
            route: "MANGGARAI-BANDARA SOEKARNO HATTA".to_owned(),
            departs_at: example_time(1_718_010_000, 0),
            arrives_at: example_time(1_718_013_300, 0),
            color: Some("#0084D8".to_owned()),
            created_at: example_time(1_717_200_000, 0),
            updated_at: example_time(1_718_000_000, 999_999_999),
        }
    }
}
