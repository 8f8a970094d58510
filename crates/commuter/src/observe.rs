use std::future::Future;

use futures::{stream, stream::BoxStream, StreamExt};
use tokio::sync::watch;

use crate::database::{Database, Result, Table};

/// A live view of persisted data. Dropping the stream unsubscribes.
pub type Subscription<T> = BoxStream<'static, T>;

struct Observer<D, F, T> {
    database: D,
    changes: watch::Receiver<u64>,
    query: F,
    last: Option<T>,
    primed: bool,
}

/// Emits the result of `query` right away and again after every change of
/// `table`, skipping results equal to the previous emission.
///
/// Notifications go through a watch channel, so a burst of writes results in
/// a single re-query. A failing query is logged and retried on the next change.
/// The stream only ends if the database itself is gone.
pub fn observe<D, T, F, Fut>(database: D, table: Table, query: F) -> Subscription<T>
where
    D: Database,
    T: Clone + PartialEq + Send + Sync + 'static,
    F: Fn(D::Autocommit) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<T>> + Send + 'static,
{
    let observer = Observer {
        changes: database.changes(table),
        database,
        query,
        last: None,
        primed: false,
    };

    stream::unfold(observer, move |mut observer| async move {
        loop {
            if observer.primed {
                if observer.changes.changed().await.is_err() {
                    return None;
                }
            } else {
                observer.changes.borrow_and_update();
                observer.primed = true;
            }

            match (observer.query)(observer.database.auto()).await {
                Ok(value) if observer.last.as_ref() == Some(&value) => continue,
                Ok(value) => {
                    observer.last = Some(value.clone());
                    return Some((value, observer));
                }
                Err(why) => {
                    log::error!("observing {:?} failed: {}", table, why);
                }
            }
        }
    })
    .boxed()
}
