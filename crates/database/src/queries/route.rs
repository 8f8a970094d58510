use commuter::database::Result;
use model::route::Route;
use sqlx::SqliteConnection;
use utility::id::Id;

use crate::data_model::{
    route::{RouteRecord, RouteRow, RouteStopRow},
    DatabaseRow,
};

use super::convert_error;

async fn stops_of(conn: &mut SqliteConnection, train_id: &str) -> Result<Vec<RouteStopRow>> {
    sqlx::query_as(
        "
        SELECT
            train_id, position, id, station_id, station_name, departs_at,
            created_at, updated_at
        FROM
            route_stops
        WHERE train_id = ?
        ORDER BY position;
        ",
    )
    .bind(train_id)
    .fetch_all(&mut *conn)
    .await
    .map_err(convert_error)
}

// Repo

pub async fn get(conn: &mut SqliteConnection, id: &Id<Route>) -> Result<Option<Route>> {
    let route: Option<RouteRow> = sqlx::query_as(
        "
        SELECT
            train_id, line, name, station_origin_id, station_origin_name,
            station_destination_id, station_destination_name, arrives_at,
            created_at, updated_at
        FROM
            routes
        WHERE train_id = ?;
        ",
    )
    .bind(id.raw())
    .fetch_optional(&mut *conn)
    .await
    .map_err(convert_error)?;

    match route {
        Some(route) => {
            let stops = stops_of(&mut *conn, &route.train_id).await?;
            RouteRecord { route, stops }.to_model().map(Some)
        }
        None => Ok(None),
    }
}

pub async fn get_all(conn: &mut SqliteConnection) -> Result<Vec<Route>> {
    let routes: Vec<RouteRow> = sqlx::query_as(
        "
        SELECT
            train_id, line, name, station_origin_id, station_origin_name,
            station_destination_id, station_destination_name, arrives_at,
            created_at, updated_at
        FROM
            routes
        ORDER BY train_id;
        ",
    )
    .fetch_all(&mut *conn)
    .await
    .map_err(convert_error)?;

    let mut result = Vec::with_capacity(routes.len());
    for route in routes {
        let stops = stops_of(&mut *conn, &route.train_id).await?;
        result.push(RouteRecord { route, stops }.to_model()?);
    }
    Ok(result)
}

/// Replaces the route and all of its stops.
pub async fn put(conn: &mut SqliteConnection, route: Route) -> Result<Route> {
    let RouteRecord { route: row, stops } = RouteRecord::from_model(&route);

    sqlx::query("DELETE FROM route_stops WHERE train_id = ?;")
        .bind(row.train_id.clone())
        .execute(&mut *conn)
        .await
        .map_err(convert_error)?;

    sqlx::query(
        "
        INSERT INTO routes(
            train_id,
            line,
            name,
            station_origin_id,
            station_origin_name,
            station_destination_id,
            station_destination_name,
            arrives_at,
            created_at,
            updated_at
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        ON CONFLICT (train_id)
        DO UPDATE SET
            line = EXCLUDED.line,
            name = EXCLUDED.name,
            station_origin_id = EXCLUDED.station_origin_id,
            station_origin_name = EXCLUDED.station_origin_name,
            station_destination_id = EXCLUDED.station_destination_id,
            station_destination_name = EXCLUDED.station_destination_name,
            arrives_at = EXCLUDED.arrives_at,
            created_at = EXCLUDED.created_at,
            updated_at = EXCLUDED.updated_at;
        ",
    )
    .bind(row.train_id)
    .bind(row.line)
    .bind(row.name)
    .bind(row.station_origin_id)
    .bind(row.station_origin_name)
    .bind(row.station_destination_id)
    .bind(row.station_destination_name)
    .bind(row.arrives_at)
    .bind(row.created_at)
    .bind(row.updated_at)
    .execute(&mut *conn)
    .await
    .map_err(convert_error)?;

    for stop in stops {
        sqlx::query(
            "
            INSERT INTO route_stops(
                train_id,
                position,
                id,
                station_id,
                station_name,
                departs_at,
                created_at,
                updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?);
            ",
        )
        .bind(stop.train_id)
        .bind(stop.position)
        .bind(stop.id)
        .bind(stop.station_id)
        .bind(stop.station_name)
        .bind(stop.departs_at)
        .bind(stop.created_at)
        .bind(stop.updated_at)
        .execute(&mut *conn)
        .await
        .map_err(convert_error)?;
    }

    Ok(route)
}

pub async fn put_all(conn: &mut SqliteConnection, routes: Vec<Route>) -> Result<()> {
    for route in routes {
        put(&mut *conn, route).await?;
    }
    Ok(())
}

pub async fn exists(conn: &mut SqliteConnection, id: &Id<Route>) -> Result<bool> {
    sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM routes WHERE train_id = ?);")
        .bind(id.raw())
        .fetch_one(&mut *conn)
        .await
        .map_err(convert_error)
}

pub async fn count(conn: &mut SqliteConnection) -> Result<usize> {
    sqlx::query_scalar("SELECT COUNT(*) FROM routes;")
        .fetch_one(&mut *conn)
        .await
        .map(|count: i64| count as usize)
        .map_err(convert_error)
}

pub async fn delete_all(conn: &mut SqliteConnection) -> Result<()> {
    sqlx::query("DELETE FROM route_stops;")
        .execute(&mut *conn)
        .await
        .map_err(convert_error)?;
    sqlx::query("DELETE FROM routes;")
        .execute(&mut *conn)
        .await
        .map_err(convert_error)?;
    Ok(())
}
