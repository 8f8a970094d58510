use async_trait::async_trait;
use commuter::sync::Fetch;
use model::{schedule::Schedule, station::Station};
use utility::id::Id;

use crate::{client::RailApiClient, model::schedule::SchedulePayload, ApiError};

/// All departures at a station.
pub async fn get_schedules(
    client: &RailApiClient,
    station_id: &Id<Station>,
) -> Result<Vec<Schedule>, ApiError> {
    let schedules: Vec<SchedulePayload> = client
        .get(&["v1", "schedule", station_id.raw_ref::<str>()])
        .await?;
    Ok(schedules
        .into_iter()
        .map(SchedulePayload::into_model)
        .collect())
}

#[async_trait]
impl Fetch<Schedule> for RailApiClient {
    type Error = ApiError;

    async fn fetch(&self, key: &Id<Station>) -> Result<Vec<Schedule>, ApiError> {
        get_schedules(self, key).await
    }
}
