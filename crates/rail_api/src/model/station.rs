use chrono::{DateTime, Utc};
use model::station::{Station, StationType};
use serde::{Deserialize, Serialize};
use utility::id::Id;

use super::local;

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationMetadata {
    pub active: Option<bool>,
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationPayload {
    /// station code, e.g. `SUDB`
    pub id: String,
    pub name: String,
    /// `KRL`, `MRT`, `LRT` or `LOCAL`
    #[serde(rename = "type")]
    pub station_type: Option<String>,
    pub metadata: Option<StationMetadata>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StationPayload {
    /// Remote stations are never favorites.
    pub fn into_model(self) -> Station {
        Station {
            id: Id::new(self.id),
            name: self.name,
            station_type: self
                .station_type
                .as_deref()
                .map(StationType::from_name)
                .unwrap_or_default(),
            active: self
                .metadata
                .and_then(|metadata| metadata.active)
                .unwrap_or(true),
            favorite_position: None,
            created_at: local(self.created_at),
            updated_at: local(self.updated_at),
        }
    }
}
