use async_trait::async_trait;
use commuter::sync::Fetch;
use model::station::Station;

use crate::{client::RailApiClient, model::station::StationPayload, ApiError};

pub async fn get_stations(client: &RailApiClient) -> Result<Vec<Station>, ApiError> {
    let stations: Vec<StationPayload> = client.get(&["v1", "station"]).await?;
    Ok(stations
        .into_iter()
        .map(StationPayload::into_model)
        .collect())
}

#[async_trait]
impl Fetch<Station> for RailApiClient {
    type Error = ApiError;

    async fn fetch(&self, _key: &()) -> Result<Vec<Station>, ApiError> {
        get_stations(self).await
    }
}
