use chrono::{DateTime, Local};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utility::id::{HasId, Id};

use crate::{station::Station, example_time, ExampleData};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransitType {
    Mrt,
    Lrt,
    Brt,
    #[default]
    Bus,
}

impl TransitType {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Mrt => "MRT",
            Self::Lrt => "LRT",
            Self::Brt => "BRT",
            Self::Bus => "BUS",
        }
    }

    /// Case insensitive. Unknown names fall back to `TransitType::Bus`.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_uppercase().as_str() {
            "MRT" => Self::Mrt,
            "LRT" => Self::Lrt,
            "BRT" => Self::Brt,
            _ => Self::default(),
        }
    }
}

/// A connection to another mode of transport available at a station.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transit {
    pub id: Id<Transit>,
    pub station_id: Id<Station>,
    pub transit_type: TransitType,
    pub name: String,
    pub color: Option<String>,
    pub created_at: DateTime<Local>,
    pub updated_at: DateTime<Local>,
}

impl HasId for Transit {
    type IdType = String;
}

impl ExampleData for Transit {
    fn example_data() -> Self {
        Transit {
            id: Id::from("tr_sudb_mrt_dukuh_atas"),
            station_id: Id::from("SUDB"),
            transit_type: TransitType::Mrt,
            name: "DUKUH ATAS BNI".to_owned(),
            color: None,
            created_at: example_time(1_717_200_000, 0),
            updated_at: example_time(1_717_300_000, 1),
        }
    }
}
