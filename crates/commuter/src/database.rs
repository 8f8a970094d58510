use std::{error, fmt, fmt::Debug, result};

use async_trait::async_trait;
use model::{
    fare::Fare, route::Route, schedule::Schedule, station::Station,
    transit::Transit,
};
use tokio::sync::watch;
use utility::id::{HasId, Id};

#[derive(Debug)]
pub enum DatabaseError {
    NotFound,
    /// A stored record could not be mapped back to its model.
    Corrupt(String),
    Other(Box<dyn error::Error + Send + Sync>),
}

impl error::Error for DatabaseError {}

impl fmt::Display for DatabaseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DatabaseError::NotFound => write!(f, "Record not found."),
            DatabaseError::Corrupt(why) => write!(f, "Corrupt record: {}", why),
            DatabaseError::Other(why) => write!(f, "Database error: {}", why),
        }
    }
}

pub type Result<T> = result::Result<T, DatabaseError>;

/// Tables whose changes can be observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Stations,
    Schedules,
    Routes,
    Fares,
    Transits,
}

impl Table {
    pub const ALL: [Table; 5] = [
        Table::Stations,
        Table::Schedules,
        Table::Routes,
        Table::Fares,
        Table::Transits,
    ];
}

#[async_trait]
pub trait Repo<T>
where
    T: HasId + Send + Sync + 'static,
    <T as HasId>::IdType: Debug + Clone + Send + Sync,
{
    async fn get(&mut self, id: &Id<T>) -> Result<Option<T>>;
    async fn get_all(&mut self) -> Result<Vec<T>>;
    /// Inserts the element or replaces the stored record with the same key as
    /// a whole.
    async fn put(&mut self, element: T) -> Result<T>;
    /// Puts all elements atomically.
    async fn put_all(&mut self, elements: Vec<T>) -> Result<()>;
    async fn exists(&mut self, id: &Id<T>) -> Result<bool>;
    async fn count(&mut self) -> Result<usize>;
    async fn delete_all(&mut self) -> Result<()>;
}

#[async_trait]
pub trait StationRepo: Repo<Station> {
    /// All favorite stations, ordered by their favorite position.
    async fn favorites(&mut self) -> Result<Vec<Station>>;

    /// Sets or clears (`None`) the favorite position of a station without
    /// touching the other stations. Keeping positions dense is up to the caller.
    async fn set_favorite_position(
        &mut self,
        id: &Id<Station>,
        position: Option<u32>,
    ) -> Result<()>;

    /// Stations whose name contains `pattern`, ignoring case.
    async fn search(&mut self, pattern: &str) -> Result<Vec<Station>>;
}

#[async_trait]
pub trait ScheduleRepo: Repo<Schedule> {
    /// Departures at a station, ordered by departure time.
    async fn schedules_by_station(
        &mut self,
        station_id: &Id<Station>,
    ) -> Result<Vec<Schedule>>;
}

#[async_trait]
pub trait RouteRepo: Repo<Route> {}

#[async_trait]
pub trait FareRepo: Repo<Fare> {
    async fn fares_from(&mut self, station_id: &Id<Station>) -> Result<Vec<Fare>>;
}

#[async_trait]
pub trait TransitRepo: Repo<Transit> {
    async fn transits_by_station(
        &mut self,
        station_id: &Id<Station>,
    ) -> Result<Vec<Transit>>;
}

#[async_trait]
pub trait DatabaseOperations:
    StationRepo + ScheduleRepo + RouteRepo + FareRepo + TransitRepo
{
}

#[async_trait]
pub trait DatabaseTransaction: DatabaseOperations {
    /// Commits all changes and notifies observers of the changed tables.
    /// Dropping a transaction without committing rolls it back.
    async fn commit(self) -> Result<()>;
}

pub trait DatabaseAutocommit: DatabaseOperations {}

/// trait to implement a persisted store for the commuter data.
/// multiple concurrent accesses should be possible by e.g. cloning the database object.
#[async_trait]
pub trait Database: Clone + Send + Sync + Sized + 'static {
    type Transaction: DatabaseTransaction + Send;
    type Autocommit: DatabaseAutocommit + Send;

    async fn transaction(&self) -> Result<Self::Transaction>;

    fn auto(&self) -> Self::Autocommit;

    /// A receiver whose value changes after every committed write to `table`.
    fn changes(&self, table: Table) -> watch::Receiver<u64>;
}
