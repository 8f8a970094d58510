use async_trait::async_trait;
use commuter::database::{DatabaseTransaction, Repo, Result, Table, TransitRepo};
use model::{
    station::Station,
    transit::{Transit, TransitType},
};
use sqlx::prelude::FromRow;
use utility::id::Id;

use super::{format_time, parse_time, DatabaseRow};
use crate::{
    queries::transit::{
        by_station, count, delete_all, exists, get, get_all, put, put_all,
    },
    SqliteDatabaseAutocommit, SqliteDatabaseTransaction,
};

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct TransitRow {
    pub id: String,
    pub station_id: String,
    pub transit_type: String,
    pub name: String,
    pub color: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl DatabaseRow for TransitRow {
    type Model = Transit;

    fn to_model(self) -> Result<Self::Model> {
        Ok(Transit {
            transit_type: TransitType::from_name(&self.transit_type),
            created_at: parse_time("created_at", &self.created_at)?,
            updated_at: parse_time("updated_at", &self.updated_at)?,
            id: Id::new(self.id),
            station_id: Id::new(self.station_id),
            name: self.name,
            color: self.color,
        })
    }

    fn from_model(transit: &Self::Model) -> Self {
        Self {
            id: transit.id.raw(),
            station_id: transit.station_id.raw(),
            transit_type: transit.transit_type.name().to_owned(),
            name: transit.name.clone(),
            color: transit.color.clone(),
            created_at: format_time(&transit.created_at),
            updated_at: format_time(&transit.updated_at),
        }
    }
}

// Repo

#[async_trait]
impl Repo<Transit> for SqliteDatabaseAutocommit {
    async fn get(&mut self, id: &Id<Transit>) -> Result<Option<Transit>> {
        get(&mut *self.connection().await?, id).await
    }

    async fn get_all(&mut self) -> Result<Vec<Transit>> {
        get_all(&mut *self.connection().await?).await
    }

    async fn put(&mut self, element: Transit) -> Result<Transit> {
        let mut tx = self.begin().await?;
        let transit = Repo::<Transit>::put(&mut tx, element).await?;
        tx.commit().await?;
        Ok(transit)
    }

    async fn put_all(&mut self, elements: Vec<Transit>) -> Result<()> {
        let mut tx = self.begin().await?;
        Repo::<Transit>::put_all(&mut tx, elements).await?;
        tx.commit().await
    }

    async fn exists(&mut self, id: &Id<Transit>) -> Result<bool> {
        exists(&mut *self.connection().await?, id).await
    }

    async fn count(&mut self) -> Result<usize> {
        count(&mut *self.connection().await?).await
    }

    async fn delete_all(&mut self) -> Result<()> {
        let mut tx = self.begin().await?;
        Repo::<Transit>::delete_all(&mut tx).await?;
        tx.commit().await
    }
}

#[async_trait]
impl Repo<Transit> for SqliteDatabaseTransaction {
    async fn get(&mut self, id: &Id<Transit>) -> Result<Option<Transit>> {
        get(&mut *self.tx, id).await
    }

    async fn get_all(&mut self) -> Result<Vec<Transit>> {
        get_all(&mut *self.tx).await
    }

    async fn put(&mut self, element: Transit) -> Result<Transit> {
        self.touch(Table::Transits);
        put(&mut *self.tx, element).await
    }

    async fn put_all(&mut self, elements: Vec<Transit>) -> Result<()> {
        self.touch(Table::Transits);
        put_all(&mut *self.tx, elements).await
    }

    async fn exists(&mut self, id: &Id<Transit>) -> Result<bool> {
        exists(&mut *self.tx, id).await
    }

    async fn count(&mut self) -> Result<usize> {
        count(&mut *self.tx).await
    }

    async fn delete_all(&mut self) -> Result<()> {
        self.touch(Table::Transits);
        delete_all(&mut *self.tx).await
    }
}

// Transit Repo

#[async_trait]
impl TransitRepo for SqliteDatabaseAutocommit {
    async fn transits_by_station(
        &mut self,
        station_id: &Id<Station>,
    ) -> Result<Vec<Transit>> {
        by_station(&mut *self.connection().await?, station_id).await
    }
}

#[async_trait]
impl TransitRepo for SqliteDatabaseTransaction {
    async fn transits_by_station(
        &mut self,
        station_id: &Id<Station>,
    ) -> Result<Vec<Transit>> {
        by_station(&mut *self.tx, station_id).await
    }
}

#[cfg(test)]
mod tests {
    use model::ExampleData;

    use super::*;

    #[test]
    fn transit_record_round_trip() {
        let transit = Transit::example_data();
        let row = TransitRow::from_model(&transit);
        assert_eq!(row.transit_type, "MRT");
        assert_eq!(row.to_model().unwrap(), transit);
    }

    #[test]
    fn unknown_transit_type_is_read_as_bus() {
        let mut row = TransitRow::from_model(&Transit::example_data());
        row.transit_type = "gondola".to_owned();
        assert_eq!(row.to_model().unwrap().transit_type, TransitType::Bus);
    }
}
