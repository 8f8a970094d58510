use commuter::database::Result;
use model::{fare::Fare, station::Station};
use sqlx::SqliteConnection;
use utility::id::Id;

use crate::data_model::{fare::FareRow, to_models, DatabaseRow};

use super::convert_error;

// Repo

pub async fn get(conn: &mut SqliteConnection, id: &Id<Fare>) -> Result<Option<Fare>> {
    let (station_from, station_to) = id.raw();
    sqlx::query_as(
        "
        SELECT
            station_from, station_to, fare, distance_km, created_at, updated_at
        FROM
            fares
        WHERE station_from = ? AND station_to = ?;
        ",
    )
    .bind(station_from)
    .bind(station_to)
    .fetch_optional(&mut *conn)
    .await
    .map_err(convert_error)?
    .map(|row: FareRow| row.to_model())
    .transpose()
}

pub async fn get_all(conn: &mut SqliteConnection) -> Result<Vec<Fare>> {
    let rows: Vec<FareRow> = sqlx::query_as(
        "
        SELECT
            station_from, station_to, fare, distance_km, created_at, updated_at
        FROM
            fares
        ORDER BY station_from, station_to;
        ",
    )
    .fetch_all(&mut *conn)
    .await
    .map_err(convert_error)?;
    to_models(rows)
}

pub async fn put(conn: &mut SqliteConnection, fare: Fare) -> Result<Fare> {
    let row = FareRow::from_model(&fare);
    sqlx::query(
        "
        INSERT INTO fares(
            station_from,
            station_to,
            fare,
            distance_km,
            created_at,
            updated_at
        )
        VALUES (?, ?, ?, ?, ?, ?)
        ON CONFLICT (station_from, station_to)
        DO UPDATE SET
            fare = EXCLUDED.fare,
            distance_km = EXCLUDED.distance_km,
            created_at = EXCLUDED.created_at,
            updated_at = EXCLUDED.updated_at;
        ",
    )
    .bind(row.station_from)
    .bind(row.station_to)
    .bind(row.fare)
    .bind(row.distance_km)
    .bind(row.created_at)
    .bind(row.updated_at)
    .execute(&mut *conn)
    .await
    .map_err(convert_error)?;
    Ok(fare)
}

pub async fn put_all(conn: &mut SqliteConnection, fares: Vec<Fare>) -> Result<()> {
    for fare in fares {
        put(&mut *conn, fare).await?;
    }
    Ok(())
}

pub async fn exists(conn: &mut SqliteConnection, id: &Id<Fare>) -> Result<bool> {
    let (station_from, station_to) = id.raw();
    sqlx::query_scalar(
        "SELECT EXISTS(SELECT 1 FROM fares WHERE station_from = ? AND station_to = ?);",
    )
    .bind(station_from)
    .bind(station_to)
    .fetch_one(&mut *conn)
    .await
    .map_err(convert_error)
}

pub async fn count(conn: &mut SqliteConnection) -> Result<usize> {
    sqlx::query_scalar("SELECT COUNT(*) FROM fares;")
        .fetch_one(&mut *conn)
        .await
        .map(|count: i64| count as usize)
        .map_err(convert_error)
}

pub async fn delete_all(conn: &mut SqliteConnection) -> Result<()> {
    sqlx::query("DELETE FROM fares;")
        .execute(&mut *conn)
        .await
        .map_err(convert_error)?;
    Ok(())
}

// Fare Repo

pub async fn from(
    conn: &mut SqliteConnection,
    station_id: &Id<Station>,
) -> Result<Vec<Fare>> {
    let rows: Vec<FareRow> = sqlx::query_as(
        "
        SELECT
            station_from, station_to, fare, distance_km, created_at, updated_at
        FROM
            fares
        WHERE station_from = ?
        ORDER BY station_to;
        ",
    )
    .bind(station_id.raw())
    .fetch_all(&mut *conn)
    .await
    .map_err(convert_error)?;
    to_models(rows)
}
