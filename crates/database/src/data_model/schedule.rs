use async_trait::async_trait;
use commuter::database::{DatabaseTransaction, Repo, Result, ScheduleRepo, Table};
use model::{schedule::Schedule, station::Station};
use sqlx::prelude::FromRow;
use utility::id::Id;

use super::{format_time, parse_time, DatabaseRow};
use crate::{
    queries::schedule::{
        by_station, count, delete_all, exists, get, get_all, put, put_all,
    },
    SqliteDatabaseAutocommit, SqliteDatabaseTransaction,
};

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct ScheduleRow {
    pub id: String,
    pub station_id: String,
    pub station_origin_id: String,
    pub station_destination_id: String,
    pub train_id: String,
    pub line: String,
    pub route: String,
    pub departs_at: String,
    pub arrives_at: String,
    pub color: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl DatabaseRow for ScheduleRow {
    type Model = Schedule;

    fn to_model(self) -> Result<Self::Model> {
        Ok(Schedule {
            departs_at: parse_time("departs_at", &self.departs_at)?,
            arrives_at: parse_time("arrives_at", &self.arrives_at)?,
            created_at: parse_time("created_at", &self.created_at)?,
            updated_at: parse_time("updated_at", &self.updated_at)?,
            id: Id::new(self.id),
            station_id: Id::new(self.station_id),
            station_origin_id: Id::new(self.station_origin_id),
            station_destination_id: Id::new(self.station_destination_id),
            train_id: Id::new(self.train_id),
            line: self.line,
            route: self.route,
            color: self.color,
        })
    }

    fn from_model(schedule: &Self::Model) -> Self {
        Self {
            id: schedule.id.raw(),
            station_id: schedule.station_id.raw(),
            station_origin_id: schedule.station_origin_id.raw(),
            station_destination_id: schedule.station_destination_id.raw(),
            train_id: schedule.train_id.raw(),
            line: schedule.line.clone(),
            route: schedule.route.clone(),
            departs_at: format_time(&schedule.departs_at),
            arrives_at: format_time(&schedule.arrives_at),
            color: schedule.color.clone(),
            created_at: format_time(&schedule.created_at),
            updated_at: format_time(&schedule.updated_at),
        }
    }
}

// Repo

#[async_trait]
impl Repo<Schedule> for SqliteDatabaseAutocommit {
    async fn get(&mut self, id: &Id<Schedule>) -> Result<Option<Schedule>> {
        get(&mut *self.connection().await?, id).await
    }

    async fn get_all(&mut self) -> Result<Vec<Schedule>> {
        get_all(&mut *self.connection().await?).await
    }

    async fn put(&mut self, element: Schedule) -> Result<Schedule> {
        let mut tx = self.begin().await?;
        let schedule = Repo::<Schedule>::put(&mut tx, element).await?;
        tx.commit().await?;
        Ok(schedule)
    }

    async fn put_all(&mut self, elements: Vec<Schedule>) -> Result<()> {
        let mut tx = self.begin().await?;
        Repo::<Schedule>::put_all(&mut tx, elements).await?;
        tx.commit().await
    }

    async fn exists(&mut self, id: &Id<Schedule>) -> Result<bool> {
        exists(&mut *self.connection().await?, id).await
    }

    async fn count(&mut self) -> Result<usize> {
        count(&mut *self.connection().await?).await
    }

    async fn delete_all(&mut self) -> Result<()> {
        let mut tx = self.begin().await?;
        Repo::<Schedule>::delete_all(&mut tx).await?;
        tx.commit().await
    }
}

#[async_trait]
impl Repo<Schedule> for SqliteDatabaseTransaction {
    async fn get(&mut self, id: &Id<Schedule>) -> Result<Option<Schedule>> {
        get(&mut *self.tx, id).await
    }

    async fn get_all(&mut self) -> Result<Vec<Schedule>> {
        get_all(&mut *self.tx).await
    }

    async fn put(&mut self, element: Schedule) -> Result<Schedule> {
        self.touch(Table::Schedules);
        put(&mut *self.tx, element).await
    }

    async fn put_all(&mut self, elements: Vec<Schedule>) -> Result<()> {
        self.touch(Table::Schedules);
        put_all(&mut *self.tx, elements).await
    }

    async fn exists(&mut self, id: &Id<Schedule>) -> Result<bool> {
        exists(&mut *self.tx, id).await
    }

    async fn count(&mut self) -> Result<usize> {
        count(&mut *self.tx).await
    }

    async fn delete_all(&mut self) -> Result<()> {
        self.touch(Table::Schedules);
        delete_all(&mut *self.tx).await
    }
}

// Schedule Repo

#[async_trait]
impl ScheduleRepo for SqliteDatabaseAutocommit {
    async fn schedules_by_station(
        &mut self,
        station_id: &Id<Station>,
    ) -> Result<Vec<Schedule>> {
        by_station(&mut *self.connection().await?, station_id).await
    }
}

#[async_trait]
impl ScheduleRepo for SqliteDatabaseTransaction {
    async fn schedules_by_station(
        &mut self,
        station_id: &Id<Station>,
    ) -> Result<Vec<Schedule>> {
        by_station(&mut *self.tx, station_id).await
    }
}
