#![allow(dead_code)]

use std::{
    error::Error,
    fmt,
    sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Arc, Mutex,
    },
    time::Duration,
};

use async_trait::async_trait;
use commuter::{context::Context, sync::Fetch};
use database::{DatabaseConnectionInfo, SqliteDatabase};
use model::{
    fare::Fare,
    route::Route,
    schedule::Schedule,
    station::Station,
    transit::Transit,
    ExampleData,
};
use utility::id::Id;

#[derive(Debug)]
pub struct Offline;

impl Error for Offline {}

impl fmt::Display for Offline {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "remote is offline")
    }
}

#[derive(Default)]
struct RemoteState {
    stations: Mutex<Vec<Station>>,
    schedules: Mutex<Vec<Schedule>>,
    routes: Mutex<Vec<Route>>,
    fares: Mutex<Vec<Fare>>,
    transits: Mutex<Vec<Transit>>,
    calls: AtomicUsize,
    offline: AtomicBool,
}

/// An in-process remote which counts its fetches and can be switched off.
#[derive(Clone, Default)]
pub struct FakeRemote {
    state: Arc<RemoteState>,
}

impl FakeRemote {
    pub fn calls(&self) -> usize {
        self.state.calls.load(Ordering::SeqCst)
    }

    pub fn set_offline(&self, offline: bool) {
        self.state.offline.store(offline, Ordering::SeqCst);
    }

    pub fn set_stations(&self, stations: Vec<Station>) {
        *self.state.stations.lock().unwrap() = stations;
    }

    pub fn set_schedules(&self, schedules: Vec<Schedule>) {
        *self.state.schedules.lock().unwrap() = schedules;
    }

    pub fn set_routes(&self, routes: Vec<Route>) {
        *self.state.routes.lock().unwrap() = routes;
    }

    pub fn set_fares(&self, fares: Vec<Fare>) {
        *self.state.fares.lock().unwrap() = fares;
    }

    pub fn set_transits(&self, transits: Vec<Transit>) {
        *self.state.transits.lock().unwrap() = transits;
    }

    async fn respond<T, P>(&self, data: &Mutex<Vec<T>>, matches: P) -> Result<Vec<T>, Offline>
    where
        T: Clone,
        P: Fn(&T) -> bool,
    {
        self.state.calls.fetch_add(1, Ordering::SeqCst);
        // give concurrent callers a chance to interleave
        tokio::time::sleep(Duration::from_millis(20)).await;
        if self.state.offline.load(Ordering::SeqCst) {
            return Err(Offline);
        }
        Ok(data
            .lock()
            .unwrap()
            .iter()
            .filter(|element| matches(element))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl Fetch<Station> for FakeRemote {
    type Error = Offline;

    async fn fetch(&self, _key: &()) -> Result<Vec<Station>, Offline> {
        self.respond(&self.state.stations, |_| true).await
    }
}

#[async_trait]
impl Fetch<Schedule> for FakeRemote {
    type Error = Offline;

    async fn fetch(&self, key: &Id<Station>) -> Result<Vec<Schedule>, Offline> {
        self.respond(&self.state.schedules, |schedule| schedule.station_id == *key)
            .await
    }
}

#[async_trait]
impl Fetch<Route> for FakeRemote {
    type Error = Offline;

    async fn fetch(&self, key: &Id<Route>) -> Result<Vec<Route>, Offline> {
        self.respond(&self.state.routes, |route| route.train_id == *key)
            .await
    }
}

#[async_trait]
impl Fetch<Fare> for FakeRemote {
    type Error = Offline;

    async fn fetch(&self, key: &Id<Fare>) -> Result<Vec<Fare>, Offline> {
        self.respond(&self.state.fares, |fare| fare.id() == *key).await
    }
}

#[async_trait]
impl Fetch<Transit> for FakeRemote {
    type Error = Offline;

    async fn fetch(&self, key: &Id<Station>) -> Result<Vec<Transit>, Offline> {
        self.respond(&self.state.transits, |transit| transit.station_id == *key)
            .await
    }
}

pub async fn open_database() -> SqliteDatabase {
    SqliteDatabase::connect(DatabaseConnectionInfo::in_memory())
        .await
        .unwrap()
}

pub async fn context() -> (Context<SqliteDatabase, FakeRemote>, FakeRemote) {
    let remote = FakeRemote::default();
    (Context::new(open_database().await, remote.clone()), remote)
}

pub fn station(id: &str, name: &str) -> Station {
    Station {
        id: Id::from(id),
        name: name.to_owned(),
        ..Station::example_data()
    }
}

pub fn schedule(id: &str, station_id: &str, departs_in_minutes: i64) -> Schedule {
    let example = Schedule::example_data();
    Schedule {
        id: Id::from(id),
        station_id: Id::from(station_id),
        departs_at: example.departs_at + chrono::Duration::minutes(departs_in_minutes),
        ..example
    }
}
