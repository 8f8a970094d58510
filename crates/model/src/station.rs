use chrono::{DateTime, Local};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use utility::id::{HasId, Id};

use crate::{example_time, ExampleData};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum StationType {
    #[default]
    Krl,
    Mrt,
    Lrt,
    Local,
}

impl StationType {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Krl => "KRL",
            Self::Mrt => "MRT",
            Self::Lrt => "LRT",
            Self::Local => "LOCAL",
        }
    }

    /// Case insensitive. Unknown names fall back to `StationType::Krl`.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_uppercase().as_str() {
            "MRT" => Self::Mrt,
            "LRT" => Self::Lrt,
            "LOCAL" => Self::Local,
            _ => Self::default(),
        }
    }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Station {
    pub id: Id<Station>,
    pub name: String,
    pub station_type: StationType,
    pub active: bool,
    /// Position in the manually ordered favorites list, `None` if the station
    /// is not a favorite.
    pub favorite_position: Option<u32>,
    pub created_at: DateTime<Local>,
    pub updated_at: DateTime<Local>,
}

impl Station {
    pub fn is_favorite(&self) -> bool {
        self.favorite_position.is_some()
    }
}

impl HasId for Station {
    type IdType = String;
}

impl ExampleData for Station {
    fn example_data() -> Self {
        Station {
            id: Id::from("SUDB"),
            name: "SUDIRMAN BARU".to_owned(),
            station_type: StationType::Krl,
            active: true,
            favorite_position: None,
            created_at: example_time(1_717_200_000, 0),
            updated_at: example_time(1_718_000_000, 250_000_000),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn station_type_names_are_case_insensitive() {
        assert_eq!(StationType::from_name("mrt"), StationType::Mrt);
        assert_eq!(StationType::from_name(" Local "), StationType::Local);
        assert_eq!(StationType::from_name("monorail"), StationType::Krl);
        assert_eq!(StationType::from_name(""), StationType::Krl);
        for ty in [StationType::Krl, StationType::Mrt, StationType::Lrt, StationType::Local] {
            assert_eq!(StationType::from_name(ty.name()), ty);
        }
    }
}
