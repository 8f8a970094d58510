use std::sync::Arc;

use model::{
    fare::Fare, route::Route, schedule::Schedule, station::Station,
    transit::Transit,
};

use crate::{
    client::Client,
    database::Database,
    sync::{Fetch, SyncEngine},
};

/// Everything an app needs: local reads, favorites and one sync engine per
/// synchronized entity, all sharing the same database and remote.
pub struct Context<D, R>
where
    D: Database,
    R: Fetch<Station> + Fetch<Schedule> + Fetch<Route> + Fetch<Fare> + Fetch<Transit>,
{
    pub client: Client<D>,
    pub stations: SyncEngine<D, Station, R>,
    pub schedules: SyncEngine<D, Schedule, R>,
    pub routes: SyncEngine<D, Route, R>,
    pub fares: SyncEngine<D, Fare, R>,
    pub transits: SyncEngine<D, Transit, R>,
}

impl<D, R> Context<D, R>
where
    D: Database,
    R: Fetch<Station> + Fetch<Schedule> + Fetch<Route> + Fetch<Fare> + Fetch<Transit>,
{
    pub fn new(database: D, remote: R) -> Self {
        let remote = Arc::new(remote);
        Self {
            stations: SyncEngine::new(database.clone(), remote.clone()),
            schedules: SyncEngine::new(database.clone(), remote.clone()),
            routes: SyncEngine::new(database.clone(), remote.clone()),
            fares: SyncEngine::new(database.clone(), remote.clone()),
            transits: SyncEngine::new(database.clone(), remote),
            client: Client::new(database),
        }
    }

    /// Deletes all synchronized data. Favorites are lost with the stations.
    pub async fn wipe(&self) -> Result<(), crate::sync::SyncError> {
        self.schedules.wipe().await?;
        self.routes.wipe().await?;
        self.fares.wipe().await?;
        self.transits.wipe().await?;
        self.stations.wipe().await
    }
}

impl<D, R> Clone for Context<D, R>
where
    D: Database,
    R: Fetch<Station> + Fetch<Schedule> + Fetch<Route> + Fetch<Fare> + Fetch<Transit>,
{
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            stations: self.stations.clone(),
            schedules: self.schedules.clone(),
            routes: self.routes.clone(),
            fares: self.fares.clone(),
            transits: self.transits.clone(),
        }
    }
}
