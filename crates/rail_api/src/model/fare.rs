use chrono::{DateTime, Utc};
use model::fare::Fare;
use serde::{Deserialize, Serialize};
use utility::{id::Id, serde::lenient};

use super::local;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FarePayload {
    pub station_from: String,
    pub station_to: String,
    /// Sent as a number or as a numeric string.
    #[serde(default, deserialize_with = "lenient::number")]
    pub fare: u32,
    /// Kilometers, sent as a number or as a numeric string.
    #[serde(default, deserialize_with = "lenient::number")]
    pub distance: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FarePayload {
    pub fn into_model(self) -> Fare {
        Fare {
            station_from: Id::new(self.station_from),
            station_to: Id::new(self.station_to),
            fare: self.fare,
            distance_km: self.distance,
            created_at: local(self.created_at),
            updated_at: local(self.updated_at),
        }
    }
}
