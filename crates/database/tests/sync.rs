mod common;

use commuter::{
    context::Context,
    database::{Database, DatabaseError, Repo},
    sync::{SyncError, SyncState, Synced},
};
use common::{context, open_database, schedule, station, FakeRemote};
use futures::StreamExt;
use model::{
    fare::Fare, route::Route, schedule::Schedule, station::Station,
    transit::Transit, ExampleData,
};
use utility::id::Id;

#[tokio::test]
async fn sync_fetches_only_missing_data() {
    let (context, remote) = context().await;
    remote.set_schedules(vec![schedule("a", "SUDB", 0), schedule("b", "SUDB", 10)]);
    let sudb = Id::from("SUDB");

    assert!(context.schedules.should_sync(&sudb).await.unwrap());
    assert_eq!(
        context.schedules.sync(&sudb, false).await.unwrap(),
        Synced::Fetched(2)
    );
    assert!(!context.schedules.should_sync(&sudb).await.unwrap());
    assert_eq!(
        context.schedules.sync(&sudb, false).await.unwrap(),
        Synced::AlreadySynced
    );
    assert_eq!(remote.calls(), 1);

    let schedules = context.client.schedules(&sudb).await.unwrap();
    let ids = schedules.iter().map(|s| s.id.raw()).collect::<Vec<_>>();
    assert_eq!(ids, vec!["a", "b"]);
}

#[tokio::test]
async fn skipping_the_freshness_check_always_fetches() {
    let (context, remote) = context().await;
    remote.set_schedules(vec![schedule("a", "SUDB", 0)]);
    let sudb = Id::from("SUDB");

    for _ in 0..2 {
        assert_eq!(
            context.schedules.sync(&sudb, true).await.unwrap(),
            Synced::Fetched(1)
        );
    }
    assert_eq!(remote.calls(), 2);
}

#[tokio::test]
async fn schedules_are_ordered_by_departure() {
    let (context, remote) = context().await;
    remote.set_schedules(vec![
        schedule("late", "SUDB", 30),
        schedule("early", "SUDB", -30),
        schedule("elsewhere", "MRI", 0),
    ]);
    let sudb = Id::from("SUDB");
    context.schedules.sync(&sudb, false).await.unwrap();

    let schedules = context.client.schedules(&sudb).await.unwrap();
    let ids = schedules.iter().map(|s| s.id.raw()).collect::<Vec<_>>();
    assert_eq!(ids, vec!["early", "late"]);
}

#[tokio::test]
async fn failed_sync_keeps_stored_data() {
    let (context, remote) = context().await;
    let sudb = Id::from("SUDB");
    remote.set_schedules(vec![schedule("a", "SUDB", 0)]);
    context.schedules.sync(&sudb, false).await.unwrap();

    remote.set_schedules(vec![schedule("b", "SUDB", 0)]);
    remote.set_offline(true);
    assert!(matches!(
        context.schedules.sync(&sudb, true).await,
        Err(SyncError::Fetch(_))
    ));

    let schedules = context.client.schedules(&sudb).await.unwrap();
    assert_eq!(schedules, vec![schedule("a", "SUDB", 0)]);
}

#[tokio::test]
async fn failed_first_sync_stores_nothing() {
    let (context, remote) = context().await;
    remote.set_offline(true);

    assert!(context.stations.sync(&(), false).await.is_err());
    assert!(context.stations.should_sync(&()).await.unwrap());
    assert!(context.client.stations().await.unwrap().is_empty());
}

#[tokio::test]
async fn subscribe_emits_stored_data_after_sync() {
    let (context, remote) = context().await;
    remote.set_schedules(vec![schedule("a", "SUDB", 0)]);
    let sudb: Id<_> = Id::from("SUDB");

    let mut subscription = context.schedules.subscribe(sudb.clone());
    assert_eq!(subscription.next().await, Some(vec![]));

    context.schedules.sync(&sudb, false).await.unwrap();
    assert_eq!(
        subscription.next().await,
        Some(vec![schedule("a", "SUDB", 0)])
    );
}

#[tokio::test]
async fn subscribe_skips_unchanged_results() {
    let (context, remote) = context().await;
    remote.set_schedules(vec![schedule("a", "SUDB", 0)]);
    let sudb: Id<_> = Id::from("SUDB");
    context.schedules.sync(&sudb, false).await.unwrap();

    let mut subscription = context.schedules.subscribe(sudb.clone());
    assert_eq!(subscription.next().await.map(|s| s.len()), Some(1));

    // same data again, then a real change
    context.schedules.sync(&sudb, true).await.unwrap();
    remote.set_schedules(vec![schedule("a", "SUDB", 0), schedule("b", "SUDB", 5)]);
    context.schedules.sync(&sudb, true).await.unwrap();

    assert_eq!(subscription.next().await.map(|s| s.len()), Some(2));
}

#[tokio::test]
async fn subscribe_with_sync_reports_loading_then_done() {
    let (context, remote) = context().await;
    remote.set_stations(vec![station("SUDB", "SUDIRMAN BARU")]);

    let states = context
        .stations
        .subscribe_with_sync(())
        .collect::<Vec<_>>()
        .await;
    assert_eq!(states.len(), 2);
    assert!(matches!(states[0], SyncState::Loading));
    assert!(matches!(states[1], SyncState::Done(Ok(Synced::Fetched(1)))));
}

#[tokio::test]
async fn subscribe_with_sync_reports_failures() {
    let (context, remote) = context().await;
    remote.set_offline(true);

    let states = context
        .stations
        .subscribe_with_sync(())
        .collect::<Vec<_>>()
        .await;
    assert!(matches!(states[..], [
        SyncState::Loading,
        SyncState::Done(Err(SyncError::Fetch(_)))
    ]));
}

#[tokio::test]
async fn concurrent_syncs_fetch_once() {
    let (context, remote) = context().await;
    remote.set_stations(vec![station("SUDB", "SUDIRMAN BARU")]);

    let (first, second) = tokio::join!(
        context.stations.sync(&(), false),
        context.stations.sync(&(), false)
    );
    let mut results = vec![first.unwrap(), second.unwrap()];
    results.sort_by_key(|synced| matches!(synced, Synced::AlreadySynced));
    assert_eq!(results, vec![Synced::Fetched(1), Synced::AlreadySynced]);
    assert_eq!(remote.calls(), 1);
}

#[tokio::test]
async fn different_keys_sync_independently() {
    let (context, remote) = context().await;
    remote.set_schedules(vec![schedule("a", "SUDB", 0), schedule("b", "MRI", 0)]);

    let sudb_id = Id::from("SUDB");
    let mri_id = Id::from("MRI");
    let (sudb, mri) = tokio::join!(
        context.schedules.sync(&sudb_id, false),
        context.schedules.sync(&mri_id, false)
    );
    assert_eq!(sudb.unwrap(), Synced::Fetched(1));
    assert_eq!(mri.unwrap(), Synced::Fetched(1));
    assert_eq!(remote.calls(), 2);
}

#[tokio::test]
async fn station_sync_keeps_favorites() {
    let (context, remote) = context().await;
    remote.set_stations(vec![
        station("MRI", "MANGGARAI"),
        station("SUDB", "SUDIRMAN BARU"),
    ]);
    context.stations.sync(&(), false).await.unwrap();
    context.client.favorite(&Id::from("SUDB")).await.unwrap();

    remote.set_stations(vec![
        station("MRI", "MANGGARAI"),
        station("SUDB", "SUDIRMAN BARU (RENAMED)"),
    ]);
    context.stations.sync(&(), true).await.unwrap();

    let sudb = context
        .client
        .station(&Id::from("SUDB"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(sudb.name, "SUDIRMAN BARU (RENAMED)");
    assert_eq!(sudb.favorite_position, Some(0));
    assert_eq!(context.client.favorites().await.unwrap(), vec![sudb]);
}

#[tokio::test]
async fn routes_are_synced_per_train() {
    let (context, remote) = context().await;
    let route = Route::example_data();
    remote.set_routes(vec![route.clone()]);

    let unknown = Id::from("KA0000");
    assert_eq!(
        context.routes.sync(&unknown, false).await.unwrap(),
        Synced::Fetched(0)
    );
    assert_eq!(context.client.route(&unknown).await.unwrap(), None);

    context.routes.sync(&route.train_id, false).await.unwrap();
    assert_eq!(
        context.client.route(&route.train_id).await.unwrap(),
        Some(route.clone())
    );

    let from_sudb = context
        .client
        .route_from(&route.train_id, &Id::from("SUDB"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(from_sudb.stops.len(), 5);
    assert_eq!(
        context
            .client
            .stops_count(&route.train_id, &Id::from("SUDB"))
            .await
            .unwrap(),
        Some(4)
    );
}

#[tokio::test]
async fn fares_are_synced_per_pair() {
    let (context, remote) = context().await;
    let fare = Fare::example_data();
    remote.set_fares(vec![fare.clone()]);

    assert!(context.fares.should_sync(&fare.id()).await.unwrap());
    context.fares.sync(&fare.id(), false).await.unwrap();
    assert!(!context.fares.should_sync(&fare.id()).await.unwrap());

    let client = &context.client;
    assert_eq!(
        client.fare(&fare.station_from, &fare.station_to).await.unwrap(),
        Some(fare.clone())
    );
    assert_eq!(
        client.fare(&fare.station_to, &fare.station_from).await.unwrap(),
        None
    );
    assert_eq!(client.fares_from(&fare.station_from).await.unwrap(), vec![fare]);
}

#[tokio::test]
async fn transits_are_synced_per_station() {
    let (context, remote) = context().await;
    let transit = Transit::example_data();
    remote.set_transits(vec![transit.clone()]);

    let mut subscription = context.transits.subscribe(transit.station_id.clone());
    assert_eq!(subscription.next().await, Some(vec![]));

    context.transits.sync(&transit.station_id, false).await.unwrap();
    assert_eq!(subscription.next().await, Some(vec![transit.clone()]));
    assert_eq!(
        context.client.transits(&transit.station_id).await.unwrap(),
        vec![transit]
    );
}

#[tokio::test]
async fn failed_store_writes_nothing() {
    let database = open_database().await;
    // favorite without a position
    sqlx::query(
        "
        INSERT INTO stations(
            id, name, station_type, active, favorite, favorite_position,
            created_at, updated_at
        )
        VALUES ('MRI', 'OLD MANGGARAI', 'KRL', TRUE, TRUE, NULL, 'then', 'then');
        ",
    )
    .execute(database.pool())
    .await
    .unwrap();

    let remote = FakeRemote::default();
    remote.set_stations(vec![
        station("DU", "DURI"),
        station("MRI", "MANGGARAI"),
        station("SUDB", "SUDIRMAN BARU"),
    ]);
    let context = Context::new(database.clone(), remote.clone());

    let result = context.stations.sync(&(), true).await;
    assert!(matches!(
        result,
        Err(SyncError::Store(DatabaseError::Corrupt(_)))
    ));
    assert_eq!(remote.calls(), 1);

    let stored: Vec<(String, String)> =
        sqlx::query_as("SELECT id, name FROM stations ORDER BY id;")
            .fetch_all(database.pool())
            .await
            .unwrap();
    assert_eq!(
        stored,
        vec![("MRI".to_owned(), "OLD MANGGARAI".to_owned())]
    );
}

#[tokio::test]
async fn wipe_forgets_everything() {
    let (context, remote) = context().await;
    remote.set_stations(vec![station("SUDB", "SUDIRMAN BARU")]);
    remote.set_schedules(vec![schedule("a", "SUDB", 0)]);
    context.stations.sync(&(), false).await.unwrap();
    context.schedules.sync(&Id::from("SUDB"), false).await.unwrap();

    context.wipe().await.unwrap();

    assert!(context.stations.should_sync(&()).await.unwrap());
    assert!(context.schedules.should_sync(&Id::from("SUDB")).await.unwrap());
    let mut db = context.client.database.auto();
    assert_eq!(Repo::<Station>::count(&mut db).await.unwrap(), 0);
    assert_eq!(Repo::<Schedule>::count(&mut db).await.unwrap(), 0);
}
