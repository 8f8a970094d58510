use async_trait::async_trait;
use commuter::database::{
    DatabaseError, DatabaseTransaction, Repo, Result, StationRepo, Table,
};
use model::station::{Station, StationType};
use sqlx::prelude::FromRow;
use utility::id::Id;

use super::{format_time, parse_time, DatabaseRow};
use crate::{
    queries::station::{
        count, delete_all, exists, favorites, get, get_all, put, put_all, search,
        set_favorite_position,
    },
    SqliteDatabaseAutocommit, SqliteDatabaseTransaction,
};

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct StationRow {
    pub id: String,
    pub name: String,
    pub station_type: String,
    pub active: bool,
    pub favorite: bool,
    pub favorite_position: Option<i64>,
    pub created_at: String,
    pub updated_at: String,
}

impl DatabaseRow for StationRow {
    type Model = Station;

    fn to_model(self) -> Result<Self::Model> {
        let favorite_position = match (self.favorite, self.favorite_position) {
            (false, None) => None,
            (true, Some(position)) => Some(u32::try_from(position).map_err(|_| {
                DatabaseError::Corrupt(format!(
                    "station {} has favorite position {}",
                    self.id, position
                ))
            })?),
            (favorite, position) => {
                return Err(DatabaseError::Corrupt(format!(
                    "station {} has favorite = {} but favorite position {:?}",
                    self.id, favorite, position
                )))
            }
        };

        Ok(Station {
            station_type: StationType::from_name(&self.station_type),
            active: self.active,
            favorite_position,
            created_at: parse_time("created_at", &self.created_at)?,
            updated_at: parse_time("updated_at", &self.updated_at)?,
            name: self.name,
            id: Id::new(self.id),
        })
    }

    fn from_model(station: &Self::Model) -> Self {
        Self {
            id: station.id.raw(),
            name: station.name.clone(),
            station_type: station.station_type.name().to_owned(),
            active: station.active,
            favorite: station.is_favorite(),
            favorite_position: station.favorite_position.map(i64::from),
            created_at: format_time(&station.created_at),
            updated_at: format_time(&station.updated_at),
        }
    }
}

// Repo

#[async_trait]
impl Repo<Station> for SqliteDatabaseAutocommit {
    async fn get(&mut self, id: &Id<Station>) -> Result<Option<Station>> {
        get(&mut *self.connection().await?, id).await
    }

    async fn get_all(&mut self) -> Result<Vec<Station>> {
        get_all(&mut *self.connection().await?).await
    }

    async fn put(&mut self, element: Station) -> Result<Station> {
        let mut tx = self.begin().await?;
        let station = Repo::<Station>::put(&mut tx, element).await?;
        tx.commit().await?;
        Ok(station)
    }

    async fn put_all(&mut self, elements: Vec<Station>) -> Result<()> {
        let mut tx = self.begin().await?;
        Repo::<Station>::put_all(&mut tx, elements).await?;
        tx.commit().await
    }

    async fn exists(&mut self, id: &Id<Station>) -> Result<bool> {
        exists(&mut *self.connection().await?, id).await
    }

    async fn count(&mut self) -> Result<usize> {
        count(&mut *self.connection().await?).await
    }

    async fn delete_all(&mut self) -> Result<()> {
        let mut tx = self.begin().await?;
        Repo::<Station>::delete_all(&mut tx).await?;
        tx.commit().await
    }
}

#[async_trait]
impl Repo<Station> for SqliteDatabaseTransaction {
    async fn get(&mut self, id: &Id<Station>) -> Result<Option<Station>> {
        get(&mut *self.tx, id).await
    }

    async fn get_all(&mut self) -> Result<Vec<Station>> {
        get_all(&mut *self.tx).await
    }

    async fn put(&mut self, element: Station) -> Result<Station> {
        self.touch(Table::Stations);
        put(&mut *self.tx, element).await
    }

    async fn put_all(&mut self, elements: Vec<Station>) -> Result<()> {
        self.touch(Table::Stations);
        put_all(&mut *self.tx, elements).await
    }

    async fn exists(&mut self, id: &Id<Station>) -> Result<bool> {
        exists(&mut *self.tx, id).await
    }

    async fn count(&mut self) -> Result<usize> {
        count(&mut *self.tx).await
    }

    async fn delete_all(&mut self) -> Result<()> {
        self.touch(Table::Stations);
        delete_all(&mut *self.tx).await
    }
}

// Station Repo

#[async_trait]
impl StationRepo for SqliteDatabaseAutocommit {
    async fn favorites(&mut self) -> Result<Vec<Station>> {
        favorites(&mut *self.connection().await?).await
    }

    async fn set_favorite_position(
        &mut self,
        id: &Id<Station>,
        position: Option<u32>,
    ) -> Result<()> {
        let mut tx = self.begin().await?;
        tx.set_favorite_position(id, position).await?;
        tx.commit().await
    }

    async fn search(&mut self, pattern: &str) -> Result<Vec<Station>> {
        search(&mut *self.connection().await?, pattern).await
    }
}

#[async_trait]
impl StationRepo for SqliteDatabaseTransaction {
    async fn favorites(&mut self) -> Result<Vec<Station>> {
        favorites(&mut *self.tx).await
    }

    async fn set_favorite_position(
        &mut self,
        id: &Id<Station>,
        position: Option<u32>,
    ) -> Result<()> {
        self.touch(Table::Stations);
        set_favorite_position(&mut *self.tx, id, position).await
    }

    async fn search(&mut self, pattern: &str) -> Result<Vec<Station>> {
        search(&mut *self.tx, pattern).await
    }
}
