use std::sync::Arc;

use model::{
    fare::Fare,
    route::{calculate_stops_count, filter_route_stops, Route},
    schedule::Schedule,
    station::Station,
    transit::Transit,
};
use tokio::sync::Mutex;
use utility::{id::Id, let_also::LetAlso};

use crate::{
    database::{
        self, Database, DatabaseTransaction, FareRepo, Repo, ScheduleRepo,
        StationRepo, Table, TransitRepo,
    },
    observe::{observe, Subscription},
    RequestError, RequestResult,
};

/// Read access to the local data and the local-only mutations (favorites).
#[derive(Clone)]
pub struct Client<D>
where
    D: Database,
{
    pub database: D,
    /// Favorite mutations read and rewrite several rows, so they are
    /// performed one at a time.
    favorites_writer: Arc<Mutex<()>>,
}

impl<D> Client<D>
where
    D: Database,
{
    pub fn new(database: D) -> Self {
        Self {
            database,
            favorites_writer: Arc::new(Mutex::new(())),
        }
    }

    pub async fn station(&self, id: &Id<Station>) -> RequestResult<Option<Station>> {
        Ok(Repo::<Station>::get(&mut self.database.auto(), id).await?)
    }

    pub async fn stations(&self) -> RequestResult<Vec<Station>> {
        Ok(Repo::<Station>::get_all(&mut self.database.auto()).await?)
    }

    pub async fn search_stations(&self, pattern: &str) -> RequestResult<Vec<Station>> {
        Ok(self.database.auto().search(pattern).await?)
    }

    pub async fn schedules(
        &self,
        station_id: &Id<Station>,
    ) -> RequestResult<Vec<Schedule>> {
        Ok(self.database.auto().schedules_by_station(station_id).await?)
    }

    pub async fn transits(
        &self,
        station_id: &Id<Station>,
    ) -> RequestResult<Vec<Transit>> {
        Ok(self.database.auto().transits_by_station(station_id).await?)
    }

    pub async fn route(&self, train_id: &Id<Route>) -> RequestResult<Option<Route>> {
        Ok(Repo::<Route>::get(&mut self.database.auto(), train_id).await?)
    }

    /// The route of a train as seen by a passenger boarding at `origin`.
    pub async fn route_from(
        &self,
        train_id: &Id<Route>,
        origin: &Id<Station>,
    ) -> RequestResult<Option<Route>> {
        self.route(train_id)
            .await?
            .map(|route| filter_route_stops(&route, origin))
            .let_owned(Ok)
    }

    /// Number of stops left after boarding at `origin`. `None` if the train
    /// is unknown or does not call at `origin`.
    pub async fn stops_count(
        &self,
        train_id: &Id<Route>,
        origin: &Id<Station>,
    ) -> RequestResult<Option<usize>> {
        self.route(train_id)
            .await?
            .and_then(|route| calculate_stops_count(&route, origin))
            .let_owned(Ok)
    }

    pub async fn fare(
        &self,
        from: &Id<Station>,
        to: &Id<Station>,
    ) -> RequestResult<Option<Fare>> {
        let id = Fare::id_between(from, to);
        Ok(Repo::<Fare>::get(&mut self.database.auto(), &id).await?)
    }

    pub async fn fares_from(&self, station_id: &Id<Station>) -> RequestResult<Vec<Fare>> {
        Ok(self.database.auto().fares_from(station_id).await?)
    }

    pub fn observe_station(&self, id: Id<Station>) -> Subscription<Option<Station>> {
        observe(self.database.clone(), Table::Stations, move |mut db| {
            let id = id.clone();
            async move { Repo::<Station>::get(&mut db, &id).await }
        })
    }
}

// Favorites

impl<D> Client<D>
where
    D: Database,
{
    /// Favorite stations in their manual order.
    pub async fn favorites(&self) -> RequestResult<Vec<Station>> {
        Ok(self.database.auto().favorites().await?)
    }

    pub fn observe_favorites(&self) -> Subscription<Vec<Station>> {
        observe(self.database.clone(), Table::Stations, |mut db| async move {
            db.favorites().await
        })
    }

    /// Appends the station to the end of the favorites. Favoriting a favorite
    /// does nothing.
    pub async fn favorite(&self, id: &Id<Station>) -> RequestResult<Station> {
        let _writer = self.favorites_writer.lock().await;
        let mut tx = self.database.transaction().await?;

        let station = Repo::<Station>::get(&mut tx, id)
            .await?
            .ok_or(RequestError::NotFound)?;
        if station.is_favorite() {
            return Ok(station);
        }

        let position = tx.favorites().await?.len() as u32;
        tx.set_favorite_position(id, Some(position)).await?;
        tx.commit().await?;

        log::debug!("favorited station {} at position {}", id, position);
        Ok(Station {
            favorite_position: Some(position),
            ..station
        })
    }

    /// Removes the station from the favorites and closes the gap it leaves.
    pub async fn unfavorite(&self, id: &Id<Station>) -> RequestResult<Station> {
        let _writer = self.favorites_writer.lock().await;
        let mut tx = self.database.transaction().await?;

        let station = Repo::<Station>::get(&mut tx, id)
            .await?
            .ok_or(RequestError::NotFound)?;
        if !station.is_favorite() {
            return Ok(station);
        }

        tx.set_favorite_position(id, None).await?;
        let remaining = tx.favorites().await?;
        renumber(&mut tx, remaining).await?;
        tx.commit().await?;

        log::debug!("unfavorited station {}", id);
        Ok(Station {
            favorite_position: None,
            ..station
        })
    }

    /// Moves a favorite to `position`, shifting the favorites in between by one.
    /// Positions past the end move the station to the end. Returns the
    /// favorites in their new order.
    pub async fn reorder_favorite(
        &self,
        id: &Id<Station>,
        position: u32,
    ) -> RequestResult<Vec<Station>> {
        let _writer = self.favorites_writer.lock().await;
        let mut tx = self.database.transaction().await?;

        if !Repo::<Station>::exists(&mut tx, id).await? {
            return Err(RequestError::NotFound);
        }
        let mut favorites = tx.favorites().await?;
        let from = favorites
            .iter()
            .position(|station| station.id == *id)
            .ok_or(RequestError::NotFavorite)?;

        let station = favorites.remove(from);
        let to = (position as usize).min(favorites.len());
        favorites.insert(to, station);

        let favorites = renumber(&mut tx, favorites).await?;
        tx.commit().await?;

        log::debug!("moved favorite {} from {} to {}", id, from, to);
        Ok(favorites)
    }
}

/// Assigns positions `0..n` in the given order, writing only what changed.
async fn renumber<T>(tx: &mut T, ordered: Vec<Station>) -> database::Result<Vec<Station>>
where
    T: StationRepo + Send,
{
    let mut result = Vec::with_capacity(ordered.len());
    for (position, mut station) in ordered.into_iter().enumerate() {
        let position = Some(position as u32);
        if station.favorite_position != position {
            tx.set_favorite_position(&station.id, position).await?;
            station.favorite_position = position;
        }
        result.push(station);
    }
    Ok(result)
}
