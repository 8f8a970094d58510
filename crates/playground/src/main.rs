use std::env;

use commuter::context::Context;
use database::{DatabaseConnectionInfo, SqliteDatabase};
use model::station::Station;
use rail_api::client::{ApiConfig, RailApiClient};
use utility::id::Id;

/// Syncs the station list and, given a station code, the departures and
/// transit connections of that station. A train id as second argument also
/// syncs and prints its route as seen from the station.
///
/// `playground SUDB KA2113`
#[tokio::main]
async fn main() {
    env_logger::init();

    // database
    let database = SqliteDatabase::connect(DatabaseConnectionInfo::from_env())
        .await
        .expect("could not open database.");

    // remote
    let remote =
        RailApiClient::new(&ApiConfig::env()).expect("could not build api client.");

    let context = Context::new(database, remote);

    if let Err(why) = context.stations.sync(&(), false).await {
        log::error!("could not sync stations: {}", why);
    }
    let stations = context.client.stations().await.unwrap_or_default();
    println!("{} stations stored.", stations.len());

    let mut args = env::args().skip(1);
    let Some(station_id) = args.next() else {
        return;
    };
    let station_id: Id<Station> = Id::new(station_id.to_uppercase());

    let (schedules, transits) = tokio::join!(
        context.schedules.sync(&station_id, false),
        context.transits.sync(&station_id, false)
    );
    for result in [schedules, transits] {
        if let Err(why) = result {
            log::error!("could not sync {}: {}", station_id, why);
        }
    }

    let schedules = context.client.schedules(&station_id).await.unwrap_or_default();
    let transits = context.client.transits(&station_id).await.unwrap_or_default();
    println!(
        "{}",
        serde_json::to_string_pretty(&schedules).unwrap_or_default()
    );
    println!(
        "{}",
        serde_json::to_string_pretty(&transits).unwrap_or_default()
    );

    if let Some(train_id) = args.next() {
        let train_id = Id::new(train_id.to_uppercase());
        if let Err(why) = context.routes.sync(&train_id, false).await {
            log::error!("could not sync route {}: {}", train_id, why);
        }
        match context.client.route_from(&train_id, &station_id).await {
            Ok(Some(route)) => {
                let stops = context
                    .client
                    .stops_count(&train_id, &station_id)
                    .await
                    .ok()
                    .flatten();
                println!(
                    "{} ({} stops left)",
                    serde_json::to_string_pretty(&route).unwrap_or_default(),
                    stops.map_or("?".to_owned(), |stops| stops.to_string())
                );
            }
            Ok(None) => println!("route {} not found.", train_id),
            Err(why) => log::error!("could not read route {}: {}", train_id, why),
        }
    }
}
