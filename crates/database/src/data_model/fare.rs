use async_trait::async_trait;
use commuter::database::{
    DatabaseError, DatabaseTransaction, FareRepo, Repo, Result, Table,
};
use model::{fare::Fare, station::Station};
use sqlx::prelude::FromRow;
use utility::id::Id;

use super::{format_time, parse_time, DatabaseRow};
use crate::{
    queries::fare::{count, delete_all, exists, from, get, get_all, put, put_all},
    SqliteDatabaseAutocommit, SqliteDatabaseTransaction,
};

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct FareRow {
    pub station_from: String,
    pub station_to: String,
    pub fare: i64,
    pub distance_km: f64,
    pub created_at: String,
    pub updated_at: String,
}

impl DatabaseRow for FareRow {
    type Model = Fare;

    fn to_model(self) -> Result<Self::Model> {
        let fare = u32::try_from(self.fare).map_err(|_| {
            DatabaseError::Corrupt(format!(
                "fare from {} to {} is {}",
                self.station_from, self.station_to, self.fare
            ))
        })?;
        Ok(Fare {
            fare,
            distance_km: self.distance_km,
            created_at: parse_time("created_at", &self.created_at)?,
            updated_at: parse_time("updated_at", &self.updated_at)?,
            station_from: Id::new(self.station_from),
            station_to: Id::new(self.station_to),
        })
    }

    fn from_model(fare: &Self::Model) -> Self {
        Self {
            station_from: fare.station_from.raw(),
            station_to: fare.station_to.raw(),
            fare: i64::from(fare.fare),
            distance_km: fare.distance_km,
            created_at: format_time(&fare.created_at),
            updated_at: format_time(&fare.updated_at),
        }
    }
}

// Repo

#[async_trait]
impl Repo<Fare> for SqliteDatabaseAutocommit {
    async fn get(&mut self, id: &Id<Fare>) -> Result<Option<Fare>> {
        get(&mut *self.connection().await?, id).await
    }

    async fn get_all(&mut self) -> Result<Vec<Fare>> {
        get_all(&mut *self.connection().await?).await
    }

    async fn put(&mut self, element: Fare) -> Result<Fare> {
        let mut tx = self.begin().await?;
        let fare = Repo::<Fare>::put(&mut tx, element).await?;
        tx.commit().await?;
        Ok(fare)
    }

    async fn put_all(&mut self, elements: Vec<Fare>) -> Result<()> {
        let mut tx = self.begin().await?;
        Repo::<Fare>::put_all(&mut tx, elements).await?;
        tx.commit().await
    }

    async fn exists(&mut self, id: &Id<Fare>) -> Result<bool> {
        exists(&mut *self.connection().await?, id).await
    }

    async fn count(&mut self) -> Result<usize> {
        count(&mut *self.connection().await?).await
    }

    async fn delete_all(&mut self) -> Result<()> {
        let mut tx = self.begin().await?;
        Repo::<Fare>::delete_all(&mut tx).await?;
        tx.commit().await
    }
}

#[async_trait]
impl Repo<Fare> for SqliteDatabaseTransaction {
    async fn get(&mut self, id: &Id<Fare>) -> Result<Option<Fare>> {
        get(&mut *self.tx, id).await
    }

    async fn get_all(&mut self) -> Result<Vec<Fare>> {
        get_all(&mut *self.tx).await
    }

    async fn put(&mut self, element: Fare) -> Result<Fare> {
        self.touch(Table::Fares);
        put(&mut *self.tx, element).await
    }

    async fn put_all(&mut self, elements: Vec<Fare>) -> Result<()> {
        self.touch(Table::Fares);
        put_all(&mut *self.tx, elements).await
    }

    async fn exists(&mut self, id: &Id<Fare>) -> Result<bool> {
        exists(&mut *self.tx, id).await
    }

    async fn count(&mut self) -> Result<usize> {
        count(&mut *self.tx).await
    }

    async fn delete_all(&mut self) -> Result<()> {
        self.touch(Table::Fares);
        delete_all(&mut *self.tx).await
    }
}

// Fare Repo

#[async_trait]
impl FareRepo for SqliteDatabaseAutocommit {
    async fn fares_from(&mut self, station_id: &Id<Station>) -> Result<Vec<Fare>> {
        from(&mut *self.connection().await?, station_id).await
    }
}

#[async_trait]
impl FareRepo for SqliteDatabaseTransaction {
    async fn fares_from(&mut self, station_id: &Id<Station>) -> Result<Vec<Fare>> {
        from(&mut *self.tx, station_id).await
    }
}

#[cfg(test)]
mod tests {
    use model::ExampleData;

    use super::*;

    #[test]
    fn fare_record_round_trip() {
        let fare = Fare::example_data();
        assert_eq!(FareRow::from_model(&fare).to_model().unwrap(), fare);
    }

    #[test]
    fn negative_fare_is_corrupt() {
        let mut row = FareRow::from_model(&Fare::example_data());
        row.fare = -1;
        assert!(matches!(row.to_model(), Err(DatabaseError::Corrupt(_))));
    }
}
