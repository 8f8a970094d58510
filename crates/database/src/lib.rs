use std::{collections::HashSet, env, error::Error, path::PathBuf, str::FromStr, sync::Arc};

use async_trait::async_trait;
use commuter::database::{
    Database, DatabaseAutocommit, DatabaseOperations, DatabaseTransaction, Result,
    Table,
};
use queries::convert_error;
use sqlx::{
    pool::PoolConnection,
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions},
    Sqlite, Transaction,
};
use tokio::sync::watch;

pub mod data_model;
pub mod queries;

pub struct DatabaseConnectionInfo {
    /// Database file, created if missing. `None` keeps everything in memory.
    pub path: Option<PathBuf>,
}

impl DatabaseConnectionInfo {
    pub fn from_env() -> Self {
        Self {
            path: env::var_os("DATABASE_PATH").map(PathBuf::from),
        }
    }

    pub fn in_memory() -> Self {
        Self { path: None }
    }

    pub(self) fn connect_options(&self) -> sqlx::Result<SqliteConnectOptions> {
        Ok(match &self.path {
            Some(path) => SqliteConnectOptions::new()
                .filename(path)
                .create_if_missing(true)
                .journal_mode(SqliteJournalMode::Wal),
            None => SqliteConnectOptions::from_str("sqlite::memory:")?,
        })
    }
}

/// One change counter per table.
struct Notifier {
    stations: watch::Sender<u64>,
    schedules: watch::Sender<u64>,
    routes: watch::Sender<u64>,
    fares: watch::Sender<u64>,
    transits: watch::Sender<u64>,
}

impl Notifier {
    fn new() -> Self {
        Self {
            stations: watch::channel(0).0,
            schedules: watch::channel(0).0,
            routes: watch::channel(0).0,
            fares: watch::channel(0).0,
            transits: watch::channel(0).0,
        }
    }

    fn sender(&self, table: Table) -> &watch::Sender<u64> {
        match table {
            Table::Stations => &self.stations,
            Table::Schedules => &self.schedules,
            Table::Routes => &self.routes,
            Table::Fares => &self.fares,
            Table::Transits => &self.transits,
        }
    }

    fn notify(&self, table: Table) {
        self.sender(table).send_modify(|version| *version += 1);
    }
}

#[derive(Clone)]
pub struct SqliteDatabase {
    connection: SqlitePool,
    notifier: Arc<Notifier>,
}

pub struct SqliteDatabaseTransaction {
    tx: Transaction<'static, Sqlite>,
    notifier: Arc<Notifier>,
    /// Tables written in this transaction, notified on commit.
    touched: HashSet<Table>,
}

impl SqliteDatabaseTransaction {
    pub(crate) fn touch(&mut self, table: Table) {
        self.touched.insert(table);
    }
}

#[async_trait]
impl DatabaseTransaction for SqliteDatabaseTransaction {
    async fn commit(self) -> Result<()> {
        self.tx.commit().await.map_err(convert_error)?;
        for table in self.touched {
            self.notifier.notify(table);
        }
        Ok(())
    }
}

/// Reads run on a pooled connection. Every write runs in its own transaction.
pub struct SqliteDatabaseAutocommit {
    pool: SqlitePool,
    notifier: Arc<Notifier>,
}

impl SqliteDatabaseAutocommit {
    pub(crate) async fn connection(&self) -> Result<PoolConnection<Sqlite>> {
        self.pool.acquire().await.map_err(convert_error)
    }

    pub(crate) async fn begin(&self) -> Result<SqliteDatabaseTransaction> {
        begin(&self.pool, &self.notifier).await
    }
}

impl DatabaseAutocommit for SqliteDatabaseAutocommit {}

impl DatabaseOperations for SqliteDatabaseAutocommit {}

impl DatabaseOperations for SqliteDatabaseTransaction {}

async fn begin(
    pool: &SqlitePool,
    notifier: &Arc<Notifier>,
) -> Result<SqliteDatabaseTransaction> {
    let tx: Transaction<'static, Sqlite> = pool.begin().await.map_err(convert_error)?;
    Ok(SqliteDatabaseTransaction {
        tx,
        notifier: notifier.clone(),
        touched: HashSet::new(),
    })
}

impl SqliteDatabase {
    pub async fn connect(
        database_connection_info: DatabaseConnectionInfo,
    ) -> std::result::Result<Self, Box<dyn Error>> {
        let options = database_connection_info.connect_options()?;
        let pool = match database_connection_info.path {
            // an in-memory database lives as long as its only connection
            None => {
                SqlitePoolOptions::new()
                    .max_connections(1)
                    .idle_timeout(None)
                    .max_lifetime(None)
                    .connect_with(options)
                    .await?
            }
            Some(ref path) => {
                log::debug!("opening database at {}", path.display());
                SqlitePoolOptions::new().connect_with(options).await?
            }
        };

        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self {
            connection: pool,
            notifier: Arc::new(Notifier::new()),
        })
    }

    /// The underlying pool. Writes through it bypass change notification.
    pub fn pool(&self) -> &SqlitePool {
        &self.connection
    }
}

#[async_trait]
impl Database for SqliteDatabase {
    type Transaction = SqliteDatabaseTransaction;
    type Autocommit = SqliteDatabaseAutocommit;

    fn auto(&self) -> Self::Autocommit {
        SqliteDatabaseAutocommit {
            pool: self.connection.clone(),
            notifier: self.notifier.clone(),
        }
    }

    async fn transaction(&self) -> Result<Self::Transaction> {
        begin(&self.connection, &self.notifier).await
    }

    fn changes(&self, table: Table) -> watch::Receiver<u64> {
        self.notifier.sender(table).subscribe()
    }
}
