use chrono::{DateTime, Utc};
use model::route::{Route, RouteStop};
use serde::{Deserialize, Serialize};
use utility::id::Id;

use super::local;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteStopPayload {
    pub id: String,
    pub station_id: String,
    pub station_name: String,
    pub departs_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteDetailsPayload {
    pub train_id: String,
    pub line: String,
    pub route: String,
    pub station_origin_id: String,
    pub station_origin_name: String,
    pub station_destination_id: String,
    pub station_destination_name: String,
    pub arrives_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The stops of a train in order of travel plus the train itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutePayload {
    pub routes: Vec<RouteStopPayload>,
    pub details: RouteDetailsPayload,
}

impl RouteStopPayload {
    pub fn into_model(self) -> RouteStop {
        RouteStop {
            id: self.id,
            station_id: Id::new(self.station_id),
            station_name: self.station_name,
            departs_at: local(self.departs_at),
            created_at: local(self.created_at),
            updated_at: local(self.updated_at),
        }
    }
}

impl RoutePayload {
    pub fn into_model(self) -> Route {
        let details = self.details;
        Route {
            train_id: Id::new(details.train_id),
            line: details.line,
            name: details.route,
            station_origin_id: Id::new(details.station_origin_id),
            station_origin_name: details.station_origin_name,
            station_destination_id: Id::new(details.station_destination_id),
            station_destination_name: details.station_destination_name,
            arrives_at: local(details.arrives_at),
            stops: self
                .routes
                .into_iter()
                .map(RouteStopPayload::into_model)
                .collect(),
            created_at: local(details.created_at),
            updated_at: local(details.updated_at),
        }
    }
}
