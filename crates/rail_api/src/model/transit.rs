use chrono::{DateTime, Utc};
use model::transit::{Transit, TransitType};
use serde::{Deserialize, Serialize};
use utility::id::Id;

use super::{color, local, ColorMetadata};

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitPayload {
    pub id: String,
    pub station_id: String,
    /// `MRT`, `LRT`, `BRT` or `BUS`
    #[serde(rename = "type")]
    pub transit_type: Option<String>,
    pub name: String,
    pub metadata: Option<ColorMetadata>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TransitPayload {
    pub fn into_model(self) -> Transit {
        Transit {
            id: Id::new(self.id),
            station_id: Id::new(self.station_id),
            transit_type: self
                .transit_type
                .as_deref()
                .map(TransitType::from_name)
                .unwrap_or_default(),
            name: self.name,
            color: color(self.metadata),
            created_at: local(self.created_at),
            updated_at: local(self.updated_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transit_payload_is_parsed() {
        let transit = serde_json::from_str::<TransitPayload>(
            r##"{
                "id": "tr_sudb_mrt_dukuh_atas",
                "station_id": "SUDB",
                "type": "mrt",
                "name": "DUKUH ATAS BNI",
                "metadata": { "origin": { "color": "#DD0067" } },
                "created_at": "2024-06-01T00:00:00Z",
                "updated_at": "2024-06-02T03:46:40Z"
            }"##,
        )
        .unwrap()
        .into_model();
        assert_eq!(transit.transit_type, TransitType::Mrt);
        assert_eq!(transit.color.as_deref(), Some("#DD0067"));
    }

    #[test]
    fn transit_type_defaults_to_bus() {
        let transit = serde_json::from_str::<TransitPayload>(
            r#"{
                "id": "tr_thb_bus_1",
                "station_id": "THB",
                "name": "TRANSJAKARTA 1",
                "created_at": "2024-06-01T00:00:00Z",
                "updated_at": "2024-06-01T00:00:00Z"
            }"#,
        )
        .unwrap()
        .into_model();
        assert_eq!(transit.transit_type, TransitType::Bus);
        assert_eq!(transit.color, None);
    }
}
