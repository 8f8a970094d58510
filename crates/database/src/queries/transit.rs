use commuter::database::Result;
use model::{station::Station, transit::Transit};
use sqlx::SqliteConnection;
use utility::id::Id;

use crate::data_model::{to_models, transit::TransitRow, DatabaseRow};

use super::convert_error;

// Repo

pub async fn get(conn: &mut SqliteConnection, id: &Id<Transit>) -> Result<Option<Transit>> {
    sqlx::query_as(
        "
        SELECT
            id, station_id, transit_type, name, color, created_at, updated_at
        FROM
            transits
        WHERE id = ?;
        ",
    )
    .bind(id.raw())
    .fetch_optional(&mut *conn)
    .await
    .map_err(convert_error)?
    .map(|row: TransitRow| row.to_model())
    .transpose()
}

pub async fn get_all(conn: &mut SqliteConnection) -> Result<Vec<Transit>> {
    let rows: Vec<TransitRow> = sqlx::query_as(
        "
        SELECT
            id, station_id, transit_type, name, color, created_at, updated_at
        FROM
            transits
        ORDER BY station_id, name, id;
        ",
    )
    .fetch_all(&mut *conn)
    .await
    .map_err(convert_error)?;
    to_models(rows)
}

pub async fn put(conn: &mut SqliteConnection, transit: Transit) -> Result<Transit> {
    let row = TransitRow::from_model(&transit);
    sqlx::query(
        "
        INSERT INTO transits(
            id,
            station_id,
            transit_type,
            name,
            color,
            created_at,
            updated_at
        )
        VALUES (?, ?, ?, ?, ?, ?, ?)
        ON CONFLICT (id)
        DO UPDATE SET
            station_id = EXCLUDED.station_id,
            transit_type = EXCLUDED.transit_type,
            name = EXCLUDED.name,
            color = EXCLUDED.color,
            created_at = EXCLUDED.created_at,
            updated_at = EXCLUDED.updated_at;
        ",
    )
    .bind(row.id)
    .bind(row.station_id)
    .bind(row.transit_type)
    .bind(row.name)
    .bind(row.color)
    .bind(row.created_at)
    .bind(row.updated_at)
    .execute(&mut *conn)
    .await
    .map_err(convert_error)?;
    Ok(transit)
}

pub async fn put_all(conn: &mut SqliteConnection, transits: Vec<Transit>) -> Result<()> {
    for transit in transits {
        put(&mut *conn, transit).await?;
    }
    Ok(())
}

pub async fn exists(conn: &mut SqliteConnection, id: &Id<Transit>) -> Result<bool> {
    sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM transits WHERE id = ?);")
        .bind(id.raw())
        .fetch_one(&mut *conn)
        .await
        .map_err(convert_error)
}

pub async fn count(conn: &mut SqliteConnection) -> Result<usize> {
    sqlx::query_scalar("SELECT COUNT(*) FROM transits;")
        .fetch_one(&mut *conn)
        .await
        .map(|count: i64| count as usize)
        .map_err(convert_error)
}

pub async fn delete_all(conn: &mut SqliteConnection) -> Result<()> {
    sqlx::query("DELETE FROM transits;")
        .execute(&mut *conn)
        .await
        .map_err(convert_error)?;
    Ok(())
}

// Transit Repo

pub async fn by_station(
    conn: &mut SqliteConnection,
    station_id: &Id<Station>,
) -> Result<Vec<Transit>> {
    let rows: Vec<TransitRow> = sqlx::query_as(
        "
        SELECT
            id, station_id, transit_type, name, color, created_at, updated_at
        FROM
            transits
        WHERE station_id = ?
        ORDER BY name, id;
        ",
    )
    .bind(station_id.raw())
    .fetch_all(&mut *conn)
    .await
    .map_err(convert_error)?;
    to_models(rows)
}
