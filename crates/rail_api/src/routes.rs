use async_trait::async_trait;
use commuter::sync::Fetch;
use model::route::Route;
use utility::id::Id;

use crate::{client::RailApiClient, model::route::RoutePayload, ApiError};

pub async fn get_route(
    client: &RailApiClient,
    train_id: &Id<Route>,
) -> Result<Route, ApiError> {
    let route: RoutePayload = client
        .get(&["v1", "route", train_id.raw_ref::<str>()])
        .await?;
    Ok(route.into_model())
}

#[async_trait]
impl Fetch<Route> for RailApiClient {
    type Error = ApiError;

    async fn fetch(&self, key: &Id<Route>) -> Result<Vec<Route>, ApiError> {
        Ok(vec![get_route(self, key).await?])
    }
}
