use chrono::{DateTime, Utc};
use model::schedule::Schedule;
use serde::{Deserialize, Serialize};
use utility::id::Id;

use super::{color, local, ColorMetadata};

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulePayload {
    pub id: String,
    pub station_id: String,
    pub station_origin_id: String,
    pub station_destination_id: String,
    pub train_id: String,
    pub line: String,
    pub route: String,
    pub departs_at: DateTime<Utc>,
    pub arrives_at: DateTime<Utc>,
    pub metadata: Option<ColorMetadata>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SchedulePayload {
    pub fn into_model(self) -> Schedule {
        Schedule {
            id: Id::new(self.id),
            station_id: Id::new(self.station_id),
            station_origin_id: Id::new(self.station_origin_id),
            station_destination_id: Id::new(self.station_destination_id),
            train_id: Id::new(self.train_id),
            line: self.line,
            route: self.route,
            departs_at: local(self.departs_at),
            arrives_at: local(self.arrives_at),
            color: color(self.metadata),
            created_at: local(self.created_at),
            updated_at: local(self.updated_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCHEDULE: &str = r##"{
        "id": "sc_krl_sudb_ka2113",
        "station_id": "SUDB",
        "station_origin_id": "MRI",
        "station_destination_id": "BST",
        "train_id": "KA2113",
        "line": "COMMUTER LINE BST",
        "route": "MANGGARAI-BANDARA SOEKARNO HATTA",
        "departs_at": "2024-06-10T09:00:00.000Z",
        "arrives_at": "2024-06-10T09:55:00.000Z",
        "metadata": { "origin": { "color": "#0084D8" } },
        "created_at": "2024-06-01T00:00:00.000Z",
        "updated_at": "2024-06-10T06:13:20.000Z"
    }"##;

    #[test]
    fn schedule_payload_is_parsed() {
        let schedule = serde_json::from_str::<SchedulePayload>(SCHEDULE)
            .unwrap()
            .into_model();
        assert_eq!(schedule.train_id, Id::from("KA2113"));
        assert_eq!(schedule.color.as_deref(), Some("#0084D8"));
        assert_eq!(
            (schedule.arrives_at - schedule.departs_at).num_minutes(),
            55
        );
    }

    #[test]
    fn schedule_without_metadata_has_no_color() {
        let mut json: serde_json::Value = serde_json::from_str(SCHEDULE).unwrap();
        json["metadata"] = serde_json::json!({ "origin": {} });
        let schedule = serde_json::from_value::<SchedulePayload>(json.clone())
            .unwrap()
            .into_model();
        assert_eq!(schedule.color, None);

        json.as_object_mut().unwrap().remove("metadata");
        let schedule = serde_json::from_value::<SchedulePayload>(json)
            .unwrap()
            .into_model();
        assert_eq!(schedule.color, None);
    }
}
