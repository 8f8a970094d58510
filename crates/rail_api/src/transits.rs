use async_trait::async_trait;
use commuter::sync::Fetch;
use model::{station::Station, transit::Transit};
use utility::id::Id;

use crate::{client::RailApiClient, model::transit::TransitPayload, ApiError};

/// Connections to other modes of transport at a station.
pub async fn get_transits(
    client: &RailApiClient,
    station_id: &Id<Station>,
) -> Result<Vec<Transit>, ApiError> {
    let transits: Vec<TransitPayload> = client
        .get(&["v1", "transit", station_id.raw_ref::<str>()])
        .await?;
    Ok(transits
        .into_iter()
        .map(TransitPayload::into_model)
        .collect())
}

#[async_trait]
impl Fetch<Transit> for RailApiClient {
    type Error = ApiError;

    async fn fetch(&self, key: &Id<Station>) -> Result<Vec<Transit>, ApiError> {
        get_transits(self, key).await
    }
}
