use commuter::database::{DatabaseError, Result};
use model::station::Station;
use sqlx::SqliteConnection;
use utility::id::Id;

use crate::data_model::{station::StationRow, to_models, DatabaseRow};

use super::convert_error;

// Repo

pub async fn get(conn: &mut SqliteConnection, id: &Id<Station>) -> Result<Option<Station>> {
    sqlx::query_as(
        "
        SELECT
            id, name, station_type, active, favorite, favorite_position,
            created_at, updated_at
        FROM
            stations
        WHERE id = ?;
        ",
    )
    .bind(id.raw())
    .fetch_optional(&mut *conn)
    .await
    .map_err(convert_error)?
    .map(|row: StationRow| row.to_model())
    .transpose()
}

pub async fn get_all(conn: &mut SqliteConnection) -> Result<Vec<Station>> {
    let rows: Vec<StationRow> = sqlx::query_as(
        "
        SELECT
            id, name, station_type, active, favorite, favorite_position,
            created_at, updated_at
        FROM
            stations
        ORDER BY name, id;
        ",
    )
    .fetch_all(&mut *conn)
    .await
    .map_err(convert_error)?;
    to_models(rows)
}

pub async fn put(conn: &mut SqliteConnection, station: Station) -> Result<Station> {
    let row = StationRow::from_model(&station);
    sqlx::query(
        "
        INSERT INTO stations(
            id,
            name,
            station_type,
            active,
            favorite,
            favorite_position,
            created_at,
            updated_at
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        ON CONFLICT (id)
        DO UPDATE SET
            name = EXCLUDED.name,
            station_type = EXCLUDED.station_type,
            active = EXCLUDED.active,
            favorite = EXCLUDED.favorite,
            favorite_position = EXCLUDED.favorite_position,
            created_at = EXCLUDED.created_at,
            updated_at = EXCLUDED.updated_at;
        ",
    )
    .bind(row.id)
    .bind(row.name)
    .bind(row.station_type)
    .bind(row.active)
    .bind(row.favorite)
    .bind(row.favorite_position)
    .bind(row.created_at)
    .bind(row.updated_at)
    .execute(&mut *conn)
    .await
    .map_err(convert_error)?;
    Ok(station)
}

pub async fn put_all(conn: &mut SqliteConnection, stations: Vec<Station>) -> Result<()> {
    for station in stations {
        put(&mut *conn, station).await?;
    }
    Ok(())
}

pub async fn exists(conn: &mut SqliteConnection, id: &Id<Station>) -> Result<bool> {
    sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM stations WHERE id = ?);")
        .bind(id.raw())
        .fetch_one(&mut *conn)
        .await
        .map_err(convert_error)
}

pub async fn count(conn: &mut SqliteConnection) -> Result<usize> {
    sqlx::query_scalar("SELECT COUNT(*) FROM stations;")
        .fetch_one(&mut *conn)
        .await
        .map(|count: i64| count as usize)
        .map_err(convert_error)
}

pub async fn delete_all(conn: &mut SqliteConnection) -> Result<()> {
    sqlx::query("DELETE FROM stations;")
        .execute(&mut *conn)
        .await
        .map_err(convert_error)?;
    Ok(())
}

// Station Repo

pub async fn favorites(conn: &mut SqliteConnection) -> Result<Vec<Station>> {
    let rows: Vec<StationRow> = sqlx::query_as(
        "
        SELECT
            id, name, station_type, active, favorite, favorite_position,
            created_at, updated_at
        FROM
            stations
        WHERE favorite
        ORDER BY favorite_position;
        ",
    )
    .fetch_all(&mut *conn)
    .await
    .map_err(convert_error)?;
    to_models(rows)
}

pub async fn set_favorite_position(
    conn: &mut SqliteConnection,
    id: &Id<Station>,
    position: Option<u32>,
) -> Result<()> {
    let result = sqlx::query(
        "
        UPDATE stations
        SET
            favorite = ?,
            favorite_position = ?
        WHERE id = ?;
        ",
    )
    .bind(position.is_some())
    .bind(position.map(i64::from))
    .bind(id.raw())
    .execute(&mut *conn)
    .await
    .map_err(convert_error)?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound);
    }
    Ok(())
}

pub async fn search(conn: &mut SqliteConnection, pattern: &str) -> Result<Vec<Station>> {
    // LIKE ignores case for ASCII
    let pattern = format!(
        "%{}%",
        pattern
            .replace('\\', "\\\\")
            .replace('%', "\\%")
            .replace('_', "\\_")
    );
    let rows: Vec<StationRow> = sqlx::query_as(
        "
        SELECT
            id, name, station_type, active, favorite, favorite_position,
            created_at, updated_at
        FROM
            stations
        WHERE name LIKE ? ESCAPE '\\'
        ORDER BY name, id;
        ",
    )
    .bind(pattern)
    .fetch_all(&mut *conn)
    .await
    .map_err(convert_error)?;
    to_models(rows)
}
