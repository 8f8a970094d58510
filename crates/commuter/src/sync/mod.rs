use std::{
    collections::HashMap,
    error, fmt,
    fmt::Debug,
    hash::Hash,
    sync::{Arc, Mutex, PoisonError},
};

use async_trait::async_trait;
use futures::{stream, stream::BoxStream, StreamExt};

use crate::{
    database::{
        self, Database, DatabaseError, DatabaseOperations, DatabaseTransaction,
        Table,
    },
    observe::{observe, Subscription},
};

mod entities;

/// An entity which is fetched from a remote source and kept in the local
/// database.
#[async_trait]
pub trait Synchronized: Sized + Send + Sync + 'static {
    /// What a single sync call is about, e.g. all schedules of one station.
    type Key: Debug + Clone + Eq + Hash + Send + Sync + 'static;
    /// What subscribers get to see for a key: a list or an optional entity.
    type View: Debug + Clone + PartialEq + Send + Sync + 'static;

    const TABLE: Table;
    const NAME: &'static str;

    /// Whether any data is stored for `key`.
    async fn is_present<O>(db: &mut O, key: &Self::Key) -> database::Result<bool>
    where
        O: DatabaseOperations + Send;

    async fn persist<O>(
        db: &mut O,
        key: &Self::Key,
        fetched: Vec<Self>,
    ) -> database::Result<()>
    where
        O: DatabaseOperations + Send;

    async fn read<O>(db: &mut O, key: &Self::Key) -> database::Result<Self::View>
    where
        O: DatabaseOperations + Send;

    /// Deletes all stored records of this entity type.
    async fn wipe<O>(db: &mut O) -> database::Result<()>
    where
        O: DatabaseOperations + Send;
}

/// A remote source of entities of type `E`.
#[async_trait]
pub trait Fetch<E: Synchronized>: Send + Sync + 'static {
    type Error: error::Error + Send + Sync + 'static;

    /// Fetches everything the remote knows about `key`. A single attempt, no
    /// retries.
    async fn fetch(&self, key: &E::Key) -> Result<Vec<E>, Self::Error>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Synced {
    /// Data was fetched and stored. Holds the number of stored entities.
    Fetched(usize),
    /// Data for the key was already present, nothing was fetched.
    AlreadySynced,
}

#[derive(Debug)]
pub enum SyncError {
    Fetch(Box<dyn error::Error + Send + Sync>),
    Store(DatabaseError),
}

impl error::Error for SyncError {}

impl fmt::Display for SyncError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SyncError::Fetch(why) => write!(f, "Fetching failed: {}", why),
            SyncError::Store(why) => write!(f, "Storing failed: {}", why),
        }
    }
}

impl From<DatabaseError> for SyncError {
    fn from(why: DatabaseError) -> Self {
        SyncError::Store(why)
    }
}

pub type SyncResult = Result<Synced, SyncError>;

#[derive(Debug)]
pub enum SyncState {
    Loading,
    Done(SyncResult),
}

type InFlight<K> = Arc<Mutex<HashMap<K, Arc<tokio::sync::Mutex<()>>>>>;

/// Decides whether data for a key has to be fetched, fetches it and stores it.
/// Readers observe the database through `subscribe`, independent of the
/// outcome of any sync.
pub struct SyncEngine<D, E, R>
where
    D: Database,
    E: Synchronized,
    R: Fetch<E>,
{
    database: D,
    remote: Arc<R>,
    in_flight: InFlight<E::Key>,
}

impl<D, E, R> Clone for SyncEngine<D, E, R>
where
    D: Database,
    E: Synchronized,
    R: Fetch<E>,
{
    fn clone(&self) -> Self {
        Self {
            database: self.database.clone(),
            remote: self.remote.clone(),
            in_flight: self.in_flight.clone(),
        }
    }
}

impl<D, E, R> SyncEngine<D, E, R>
where
    D: Database,
    E: Synchronized,
    R: Fetch<E>,
{
    pub fn new(database: D, remote: Arc<R>) -> Self {
        Self {
            database,
            remote,
            in_flight: Default::default(),
        }
    }

    /// True iff nothing is stored for `key`. Stored data never expires.
    pub async fn should_sync(&self, key: &E::Key) -> Result<bool, SyncError> {
        let present = E::is_present(&mut self.database.auto(), key).await?;
        Ok(!present)
    }

    /// Fetches and stores the data for `key`, unless data is already present
    /// and `skip_freshness_check` is false.
    ///
    /// Concurrent calls for the same key are handled one after another, so a
    /// waiting caller usually sees `Synced::AlreadySynced`. A failed fetch or a
    /// failed store leaves the database untouched.
    pub async fn sync(&self, key: &E::Key, skip_freshness_check: bool) -> SyncResult {
        let slot = Slot::acquire(&self.in_flight, key);
        let result = {
            let _guard = slot.lock().await;
            self.sync_exclusive(key, skip_freshness_check).await
        };
        drop(slot);

        match &result {
            Ok(synced) => log::debug!("sync of {} {:?}: {:?}", E::NAME, key, synced),
            Err(why) => log::warn!("sync of {} {:?} failed: {}", E::NAME, key, why),
        }
        result
    }

    async fn sync_exclusive(
        &self,
        key: &E::Key,
        skip_freshness_check: bool,
    ) -> SyncResult {
        if !skip_freshness_check && !self.should_sync(key).await? {
            return Ok(Synced::AlreadySynced);
        }

        let fetched = Fetch::<E>::fetch(&*self.remote, key)
            .await
            .map_err(|why| SyncError::Fetch(Box::new(why)))?;
        let count = fetched.len();

        let mut tx = self.database.transaction().await?;
        E::persist(&mut tx, key, fetched).await?;
        tx.commit().await?;

        Ok(Synced::Fetched(count))
    }

    /// Live view of the stored data for `key`. Never fetches.
    pub fn subscribe(&self, key: E::Key) -> Subscription<E::View> {
        observe(self.database.clone(), E::TABLE, move |mut db| {
            let key = key.clone();
            async move { E::read(&mut db, &key).await }
        })
    }

    /// Emits `SyncState::Loading`, then the outcome of `sync(key, false)`.
    pub fn subscribe_with_sync(&self, key: E::Key) -> BoxStream<'static, SyncState> {
        let engine = self.clone();
        stream::once(async { SyncState::Loading })
            .chain(stream::once(async move {
                SyncState::Done(engine.sync(&key, false).await)
            }))
            .boxed()
    }

    /// Deletes all stored entities of this type.
    pub async fn wipe(&self) -> Result<(), SyncError> {
        let mut tx = self.database.transaction().await?;
        E::wipe(&mut tx).await?;
        tx.commit().await?;
        log::debug!("wiped all {}", E::NAME);
        Ok(())
    }
}

/// A claim on the per-key mutex of a sync. The key is forgotten once its last
/// claim is dropped, also when the sync future is cancelled.
struct Slot<'a, K: Eq + Hash + Clone> {
    in_flight: &'a InFlight<K>,
    key: K,
    mutex: Arc<tokio::sync::Mutex<()>>,
}

impl<'a, K: Eq + Hash + Clone> Slot<'a, K> {
    fn acquire(in_flight: &'a InFlight<K>, key: &K) -> Self {
        let mutex = in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(key.clone())
            .or_default()
            .clone();
        Self {
            in_flight,
            key: key.clone(),
            mutex,
        }
    }

    async fn lock(&self) -> tokio::sync::MutexGuard<'_, ()> {
        self.mutex.lock().await
    }
}

impl<K: Eq + Hash + Clone> Drop for Slot<'_, K> {
    fn drop(&mut self) {
        let mut in_flight = self
            .in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        // held by the map and by this claim only
        if matches!(in_flight.get(&self.key), Some(mutex) if Arc::strong_count(mutex) == 2)
        {
            in_flight.remove(&self.key);
        }
    }
}
