use async_trait::async_trait;
use commuter::sync::Fetch;
use model::{fare::Fare, station::Station};
use utility::id::Id;

use crate::{client::RailApiClient, model::fare::FarePayload, ApiError};

pub async fn get_fare(
    client: &RailApiClient,
    from: &Id<Station>,
    to: &Id<Station>,
) -> Result<Fare, ApiError> {
    let fare: FarePayload = client
        .get(&["v1", "fare", from.raw_ref::<str>(), to.raw_ref::<str>()])
        .await?;
    Ok(fare.into_model())
}

#[async_trait]
impl Fetch<Fare> for RailApiClient {
    type Error = ApiError;

    async fn fetch(&self, key: &Id<Fare>) -> Result<Vec<Fare>, ApiError> {
        let (from, to) = key.raw();
        Ok(vec![get_fare(self, &Id::new(from), &Id::new(to)).await?])
    }
}
