use async_trait::async_trait;
use commuter::database::{DatabaseTransaction, Repo, Result, RouteRepo, Table};
use model::route::{Route, RouteStop};
use sqlx::prelude::FromRow;
use utility::id::Id;

use super::{format_time, parse_time, DatabaseRow};
use crate::{
    queries::route::{count, delete_all, exists, get, get_all, put, put_all},
    SqliteDatabaseAutocommit, SqliteDatabaseTransaction,
};

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct RouteRow {
    pub train_id: String,
    pub line: String,
    pub name: String,
    pub station_origin_id: String,
    pub station_origin_name: String,
    pub station_destination_id: String,
    pub station_destination_name: String,
    pub arrives_at: String,
    pub created_at: String,
    pub updated_at: String,
}

/// One stop of a route. `position` keeps the order of the stops.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct RouteStopRow {
    pub train_id: String,
    pub position: i64,
    pub id: String,
    pub station_id: String,
    pub station_name: String,
    pub departs_at: String,
    pub created_at: String,
    pub updated_at: String,
}

impl RouteStopRow {
    fn to_model(self) -> Result<RouteStop> {
        Ok(RouteStop {
            departs_at: parse_time("departs_at", &self.departs_at)?,
            created_at: parse_time("created_at", &self.created_at)?,
            updated_at: parse_time("updated_at", &self.updated_at)?,
            id: self.id,
            station_id: Id::new(self.station_id),
            station_name: self.station_name,
        })
    }
}

/// A route is stored as one `routes` row and its `route_stops` rows.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteRecord {
    pub route: RouteRow,
    pub stops: Vec<RouteStopRow>,
}

impl DatabaseRow for RouteRecord {
    type Model = Route;

    fn to_model(self) -> Result<Self::Model> {
        let route = self.route;
        Ok(Route {
            arrives_at: parse_time("arrives_at", &route.arrives_at)?,
            created_at: parse_time("created_at", &route.created_at)?,
            updated_at: parse_time("updated_at", &route.updated_at)?,
            stops: self
                .stops
                .into_iter()
                .map(RouteStopRow::to_model)
                .collect::<Result<Vec<_>>>()?,
            train_id: Id::new(route.train_id),
            line: route.line,
            name: route.name,
            station_origin_id: Id::new(route.station_origin_id),
            station_origin_name: route.station_origin_name,
            station_destination_id: Id::new(route.station_destination_id),
            station_destination_name: route.station_destination_name,
        })
    }

    fn from_model(route: &Self::Model) -> Self {
        let train_id = route.train_id.raw();
        Self {
            stops: route
                .stops
                .iter()
                .enumerate()
                .map(|(position, stop)| RouteStopRow {
                    train_id: train_id.clone(),
                    position: position as i64,
                    id: stop.id.clone(),
                    station_id: stop.station_id.raw(),
                    station_name: stop.station_name.clone(),
                    departs_at: format_time(&stop.departs_at),
                    created_at: format_time(&stop.created_at),
                    updated_at: format_time(&stop.updated_at),
                })
                .collect(),
            route: RouteRow {
                train_id,
                line: route.line.clone(),
                name: route.name.clone(),
                station_origin_id: route.station_origin_id.raw(),
                station_origin_name: route.station_origin_name.clone(),
                station_destination_id: route.station_destination_id.raw(),
                station_destination_name: route.station_destination_name.clone(),
                arrives_at: format_time(&route.arrives_at),
                created_at: format_time(&route.created_at),
                updated_at: format_time(&route.updated_at),
            },
        }
    }
}

// Repo

#[async_trait]
impl Repo<Route> for SqliteDatabaseAutocommit {
    async fn get(&mut self, id: &Id<Route>) -> Result<Option<Route>> {
        get(&mut *self.connection().await?, id).await
    }

    async fn get_all(&mut self) -> Result<Vec<Route>> {
        get_all(&mut *self.connection().await?).await
    }

    async fn put(&mut self, element: Route) -> Result<Route> {
        let mut tx = self.begin().await?;
        let route = Repo::<Route>::put(&mut tx, element).await?;
        tx.commit().await?;
        Ok(route)
    }

    async fn put_all(&mut self, elements: Vec<Route>) -> Result<()> {
        let mut tx = self.begin().await?;
        Repo::<Route>::put_all(&mut tx, elements).await?;
        tx.commit().await
    }

    async fn exists(&mut self, id: &Id<Route>) -> Result<bool> {
        exists(&mut *self.connection().await?, id).await
    }

    async fn count(&mut self) -> Result<usize> {
        count(&mut *self.connection().await?).await
    }

    async fn delete_all(&mut self) -> Result<()> {
        let mut tx = self.begin().await?;
        Repo::<Route>::delete_all(&mut tx).await?;
        tx.commit().await
    }
}

#[async_trait]
impl Repo<Route> for SqliteDatabaseTransaction {
    async fn get(&mut self, id: &Id<Route>) -> Result<Option<Route>> {
        get(&mut *self.tx, id).await
    }

    async fn get_all(&mut self) -> Result<Vec<Route>> {
        get_all(&mut *self.tx).await
    }

    async fn put(&mut self, element: Route) -> Result<Route> {
        self.touch(Table::Routes);
        put(&mut *self.tx, element).await
    }

    async fn put_all(&mut self, elements: Vec<Route>) -> Result<()> {
        self.touch(Table::Routes);
        put_all(&mut *self.tx, elements).await
    }

    async fn exists(&mut self, id: &Id<Route>) -> Result<bool> {
        exists(&mut *self.tx, id).await
    }

    async fn count(&mut self) -> Result<usize> {
        count(&mut *self.tx).await
    }

    async fn delete_all(&mut self) -> Result<()> {
        self.touch(Table::Routes);
        delete_all(&mut *self.tx).await
    }
}

impl RouteRepo for SqliteDatabaseAutocommit {}

impl RouteRepo for SqliteDatabaseTransaction {}
