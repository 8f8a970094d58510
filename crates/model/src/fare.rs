use chrono::{DateTime, Local};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utility::id::{HasId, Id};

use crate::{station::Station, example_time, ExampleData};

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Fare {
    pub station_from: Id<Station>,
    pub station_to: Id<Station>,
    pub fare: u32,
    pub distance_km: f64,
    pub created_at: DateTime<Local>,
    pub updated_at: DateTime<Local>,
}

impl Fare {
    pub fn id(&self) -> Id<Fare> {
        Self::id_between(&self.station_from, &self.station_to)
    }

    pub fn id_between(from: &Id<Station>, to: &Id<Station>) -> Id<Fare> {
        Id::new((from.raw(), to.raw()))
    }
}

/// Fares are identified by their origin and destination station.
impl HasId for Fare {
    type IdType = (String, String);
}

impl ExampleData for Fare {
    fn example_data() -> Self {
        Fare {
            station_from: Id::from("SUDB"),
            station_to: Id::from("BST"),
            fare: 70_000,
            distance_km: 36.4,
            created_at: example_time(1_717_200_000, 0),
            updated_at: example_time(1_717_200_000, 0),
        }
    }
}
