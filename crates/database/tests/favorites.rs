mod common;

use commuter::{
    client::Client,
    database::{Database, Repo},
    RequestError,
};
use common::{open_database, station};
use database::SqliteDatabase;
use futures::StreamExt;
use model::station::Station;
use utility::id::Id;

async fn client_with_stations() -> Client<SqliteDatabase> {
    let database = open_database().await;
    Repo::<Station>::put_all(
        &mut database.auto(),
        vec![
            station("MRI", "MANGGARAI"),
            station("SUDB", "SUDIRMAN BARU"),
            station("DU", "DURI"),
            station("BST", "BANDARA SOEKARNO HATTA"),
        ],
    )
    .await
    .unwrap();
    Client::new(database)
}

async fn favorite_ids(client: &Client<SqliteDatabase>) -> Vec<(String, Option<u32>)> {
    client
        .favorites()
        .await
        .unwrap()
        .into_iter()
        .map(|station| (station.id.raw(), station.favorite_position))
        .collect()
}

fn expected(ids: &[&str]) -> Vec<(String, Option<u32>)> {
    ids.iter()
        .enumerate()
        .map(|(position, id)| (id.to_string(), Some(position as u32)))
        .collect()
}

#[tokio::test]
async fn favorites_are_appended_in_order() {
    let client = client_with_stations().await;
    for id in ["DU", "MRI", "BST"] {
        client.favorite(&Id::from(id)).await.unwrap();
    }
    assert_eq!(favorite_ids(&client).await, expected(&["DU", "MRI", "BST"]));
}

#[tokio::test]
async fn favoriting_twice_changes_nothing() {
    let client = client_with_stations().await;
    client.favorite(&Id::from("DU")).await.unwrap();
    client.favorite(&Id::from("MRI")).await.unwrap();

    let station = client.favorite(&Id::from("DU")).await.unwrap();
    assert_eq!(station.favorite_position, Some(0));
    assert_eq!(favorite_ids(&client).await, expected(&["DU", "MRI"]));
}

#[tokio::test]
async fn favorite_round_trip() {
    let client = client_with_stations().await;
    let sudb = Id::from("SUDB");

    let favorite = client.favorite(&sudb).await.unwrap();
    assert!(favorite.is_favorite());
    let unfavorite = client.unfavorite(&sudb).await.unwrap();
    assert!(!unfavorite.is_favorite());

    assert!(client.favorites().await.unwrap().is_empty());
    assert_eq!(
        client.station(&sudb).await.unwrap().unwrap().favorite_position,
        None
    );
}

#[tokio::test]
async fn favorite_round_trip_keeps_other_positions() {
    let client = client_with_stations().await;
    client.favorite(&Id::from("MRI")).await.unwrap();
    client.favorite(&Id::from("DU")).await.unwrap();
    let before = favorite_ids(&client).await;

    let sudb = Id::from("SUDB");
    client.favorite(&sudb).await.unwrap();
    assert_eq!(favorite_ids(&client).await, expected(&["MRI", "DU", "SUDB"]));
    client.unfavorite(&sudb).await.unwrap();

    assert_eq!(favorite_ids(&client).await, before);
    assert_eq!(before, expected(&["MRI", "DU"]));
}

#[tokio::test]
async fn unfavorite_closes_the_gap() {
    let client = client_with_stations().await;
    for id in ["MRI", "SUDB", "DU", "BST"] {
        client.favorite(&Id::from(id)).await.unwrap();
    }
    client.unfavorite(&Id::from("SUDB")).await.unwrap();
    assert_eq!(favorite_ids(&client).await, expected(&["MRI", "DU", "BST"]));

    // not a favorite anymore
    client.unfavorite(&Id::from("SUDB")).await.unwrap();
    assert_eq!(favorite_ids(&client).await, expected(&["MRI", "DU", "BST"]));
}

#[tokio::test]
async fn reorder_moves_one_station() {
    let client = client_with_stations().await;
    for id in ["MRI", "SUDB", "DU", "BST"] {
        client.favorite(&Id::from(id)).await.unwrap();
    }

    let reordered = client.reorder_favorite(&Id::from("DU"), 0).await.unwrap();
    let ids = reordered.iter().map(|s| s.id.raw()).collect::<Vec<_>>();
    assert_eq!(ids, vec!["DU", "MRI", "SUDB", "BST"]);
    assert_eq!(favorite_ids(&client).await, expected(&["DU", "MRI", "SUDB", "BST"]));

    client.reorder_favorite(&Id::from("DU"), 2).await.unwrap();
    assert_eq!(favorite_ids(&client).await, expected(&["MRI", "SUDB", "DU", "BST"]));
}

#[tokio::test]
async fn reorder_past_the_end_moves_to_the_end() {
    let client = client_with_stations().await;
    for id in ["MRI", "SUDB", "DU"] {
        client.favorite(&Id::from(id)).await.unwrap();
    }
    client.reorder_favorite(&Id::from("MRI"), 99).await.unwrap();
    assert_eq!(favorite_ids(&client).await, expected(&["SUDB", "DU", "MRI"]));
}

#[tokio::test]
async fn reorder_requires_a_favorite() {
    let client = client_with_stations().await;
    client.favorite(&Id::from("MRI")).await.unwrap();

    assert!(matches!(
        client.reorder_favorite(&Id::from("SUDB"), 0).await,
        Err(RequestError::NotFavorite)
    ));
    assert!(matches!(
        client.reorder_favorite(&Id::from("XYZ"), 0).await,
        Err(RequestError::NotFound)
    ));
}

#[tokio::test]
async fn unknown_stations_are_not_found() {
    let client = client_with_stations().await;
    let unknown = Id::from("XYZ");

    assert!(matches!(
        client.favorite(&unknown).await,
        Err(RequestError::NotFound)
    ));
    assert!(matches!(
        client.unfavorite(&unknown).await,
        Err(RequestError::NotFound)
    ));
    assert!(client.favorites().await.unwrap().is_empty());
}

#[tokio::test]
async fn observe_favorites_follows_changes() {
    let client = client_with_stations().await;
    let mut favorites = client.observe_favorites();
    assert_eq!(favorites.next().await, Some(vec![]));

    client.favorite(&Id::from("BST")).await.unwrap();
    let emitted = favorites.next().await.unwrap();
    assert_eq!(emitted.len(), 1);
    assert_eq!(emitted[0].id, Id::from("BST"));

    client.unfavorite(&Id::from("BST")).await.unwrap();
    assert_eq!(favorites.next().await, Some(vec![]));
}

#[tokio::test]
async fn observe_station_emits_updates() {
    let client = client_with_stations().await;
    let mut station = client.observe_station(Id::from("DU"));
    assert_eq!(
        station.next().await.flatten().map(|s| s.favorite_position),
        Some(None)
    );

    client.favorite(&Id::from("DU")).await.unwrap();
    assert_eq!(
        station.next().await.flatten().map(|s| s.favorite_position),
        Some(Some(0))
    );
}

#[tokio::test]
async fn search_ignores_case() {
    let client = client_with_stations().await;
    let found = client.search_stations("sudirman").await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, Id::from("SUDB"));

    assert_eq!(client.search_stations("r").await.unwrap().len(), 4);
    assert!(client.search_stations("%").await.unwrap().is_empty());
}
