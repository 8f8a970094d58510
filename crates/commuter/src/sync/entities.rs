use async_trait::async_trait;
use model::{
    fare::Fare, route::Route, schedule::Schedule, station::Station,
    transit::Transit,
};
use utility::id::Id;

use super::Synchronized;
use crate::database::{
    DatabaseOperations, Repo, Result, ScheduleRepo, Table, TransitRepo,
};

/// Stations are synced as a whole. Favorites are local state, so a stored
/// station keeps its favorite position when it is refreshed from the remote.
#[async_trait]
impl Synchronized for Station {
    type Key = ();
    type View = Vec<Station>;

    const TABLE: Table = Table::Stations;
    const NAME: &'static str = "stations";

    async fn is_present<O>(db: &mut O, _key: &()) -> Result<bool>
    where
        O: DatabaseOperations + Send,
    {
        Ok(Repo::<Station>::count(db).await? > 0)
    }

    async fn persist<O>(db: &mut O, _key: &(), fetched: Vec<Self>) -> Result<()>
    where
        O: DatabaseOperations + Send,
    {
        let mut stations = Vec::with_capacity(fetched.len());
        for mut station in fetched {
            station.favorite_position = Repo::<Station>::get(&mut *db, &station.id)
                .await?
                .and_then(|stored| stored.favorite_position);
            stations.push(station);
        }
        Repo::<Station>::put_all(db, stations).await
    }

    async fn read<O>(db: &mut O, _key: &()) -> Result<Vec<Station>>
    where
        O: DatabaseOperations + Send,
    {
        Repo::<Station>::get_all(db).await
    }

    async fn wipe<O>(db: &mut O) -> Result<()>
    where
        O: DatabaseOperations + Send,
    {
        Repo::<Station>::delete_all(db).await
    }
}

/// Schedules are synced per station.
#[async_trait]
impl Synchronized for Schedule {
    type Key = Id<Station>;
    type View = Vec<Schedule>;

    const TABLE: Table = Table::Schedules;
    const NAME: &'static str = "schedules";

    async fn is_present<O>(db: &mut O, key: &Id<Station>) -> Result<bool>
    where
        O: DatabaseOperations + Send,
    {
        Ok(!db.schedules_by_station(key).await?.is_empty())
    }

    async fn persist<O>(
        db: &mut O,
        _key: &Id<Station>,
        fetched: Vec<Self>,
    ) -> Result<()>
    where
        O: DatabaseOperations + Send,
    {
        Repo::<Schedule>::put_all(db, fetched).await
    }

    async fn read<O>(db: &mut O, key: &Id<Station>) -> Result<Vec<Schedule>>
    where
        O: DatabaseOperations + Send,
    {
        db.schedules_by_station(key).await
    }

    async fn wipe<O>(db: &mut O) -> Result<()>
    where
        O: DatabaseOperations + Send,
    {
        Repo::<Schedule>::delete_all(db).await
    }
}

#[async_trait]
impl Synchronized for Route {
    type Key = Id<Route>;
    type View = Option<Route>;

    const TABLE: Table = Table::Routes;
    const NAME: &'static str = "route";

    async fn is_present<O>(db: &mut O, key: &Id<Route>) -> Result<bool>
    where
        O: DatabaseOperations + Send,
    {
        Repo::<Route>::exists(db, key).await
    }

    async fn persist<O>(db: &mut O, _key: &Id<Route>, fetched: Vec<Self>) -> Result<()>
    where
        O: DatabaseOperations + Send,
    {
        Repo::<Route>::put_all(db, fetched).await
    }

    async fn read<O>(db: &mut O, key: &Id<Route>) -> Result<Option<Route>>
    where
        O: DatabaseOperations + Send,
    {
        Repo::<Route>::get(db, key).await
    }

    async fn wipe<O>(db: &mut O) -> Result<()>
    where
        O: DatabaseOperations + Send,
    {
        Repo::<Route>::delete_all(db).await
    }
}

/// Fares are synced per origin-destination pair.
#[async_trait]
impl Synchronized for Fare {
    type Key = Id<Fare>;
    type View = Option<Fare>;

    const TABLE: Table = Table::Fares;
    const NAME: &'static str = "fare";

    async fn is_present<O>(db: &mut O, key: &Id<Fare>) -> Result<bool>
    where
        O: DatabaseOperations + Send,
    {
        Repo::<Fare>::exists(db, key).await
    }

    async fn persist<O>(db: &mut O, _key: &Id<Fare>, fetched: Vec<Self>) -> Result<()>
    where
        O: DatabaseOperations + Send,
    {
        Repo::<Fare>::put_all(db, fetched).await
    }

    async fn read<O>(db: &mut O, key: &Id<Fare>) -> Result<Option<Fare>>
    where
        O: DatabaseOperations + Send,
    {
        Repo::<Fare>::get(db, key).await
    }

    async fn wipe<O>(db: &mut O) -> Result<()>
    where
        O: DatabaseOperations + Send,
    {
        Repo::<Fare>::delete_all(db).await
    }
}

/// Transit connections are synced per station.
#[async_trait]
impl Synchronized for Transit {
    type Key = Id<Station>;
    type View = Vec<Transit>;

    const TABLE: Table = Table::Transits;
    const NAME: &'static str = "transits";

    async fn is_present<O>(db: &mut O, key: &Id<Station>) -> Result<bool>
    where
        O: DatabaseOperations + Send,
    {
        Ok(!db.transits_by_station(key).await?.is_empty())
    }

    async fn persist<O>(
        db: &mut O,
        _key: &Id<Station>,
        fetched: Vec<Self>,
    ) -> Result<()>
    where
        O: DatabaseOperations + Send,
    {
        Repo::<Transit>::put_all(db, fetched).await
    }

    async fn read<O>(db: &mut O, key: &Id<Station>) -> Result<Vec<Transit>>
    where
        O: DatabaseOperations + Send,
    {
        db.transits_by_station(key).await
    }

    async fn wipe<O>(db: &mut O) -> Result<()>
    where
        O: DatabaseOperations + Send,
    {
        Repo::<Transit>::delete_all(db).await
    }
}
