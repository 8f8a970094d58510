use commuter::database::Result;
use model::{schedule::Schedule, station::Station};
use sqlx::SqliteConnection;
use utility::id::Id;

use crate::data_model::{schedule::ScheduleRow, to_models, DatabaseRow};

use super::convert_error;

// Repo

pub async fn get(
    conn: &mut SqliteConnection,
    id: &Id<Schedule>,
) -> Result<Option<Schedule>> {
    sqlx::query_as(
        "
        SELECT
            id, station_id, station_origin_id, station_destination_id, train_id,
            line, route, departs_at, arrives_at, color, created_at, updated_at
        FROM
            schedules
        WHERE id = ?;
        ",
    )
    .bind(id.raw())
    .fetch_optional(&mut *conn)
    .await
    .map_err(convert_error)?
    .map(|row: ScheduleRow| row.to_model())
    .transpose()
}

pub async fn get_all(conn: &mut SqliteConnection) -> Result<Vec<Schedule>> {
    let rows: Vec<ScheduleRow> = sqlx::query_as(
        "
        SELECT
            id, station_id, station_origin_id, station_destination_id, train_id,
            line, route, departs_at, arrives_at, color, created_at, updated_at
        FROM
            schedules
        ORDER BY departs_at, id;
        ",
    )
    .fetch_all(&mut *conn)
    .await
    .map_err(convert_error)?;
    to_models(rows)
}

pub async fn put(conn: &mut SqliteConnection, schedule: Schedule) -> Result<Schedule> {
    let row = ScheduleRow::from_model(&schedule);
    sqlx::query(
        "
        INSERT INTO schedules(
            id,
            station_id,
            station_origin_id,
            station_destination_id,
            train_id,
            line,
            route,
            departs_at,
            arrives_at,
            color,
            created_at,
            updated_at
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        ON CONFLICT (id)
        DO UPDATE SET
            station_id = EXCLUDED.station_id,
            station_origin_id = EXCLUDED.station_origin_id,
            station_destination_id = EXCLUDED.station_destination_id,
            train_id = EXCLUDED.train_id,
            line = EXCLUDED.line,
            route = EXCLUDED.route,
            departs_at = EXCLUDED.departs_at,
            arrives_at = EXCLUDED.arrives_at,
            color = EXCLUDED.color,
            created_at = EXCLUDED.created_at,
            updated_at = EXCLUDED.updated_at;
        ",
    )
    .bind(row.id)
    .bind(row.station_id)
    .bind(row.station_origin_id)
    .bind(row.station_destination_id)
    .bind(row.train_id)
    .bind(row.line)
    .bind(row.route)
    .bind(row.departs_at)
    .bind(row.arrives_at)
    .bind(row.color)
    .bind(row.created_at)
    .bind(row.updated_at)
    .execute(&mut *conn)
    .await
    .map_err(convert_error)?;
    Ok(schedule)
}

pub async fn put_all(conn: &mut SqliteConnection, schedules: Vec<Schedule>) -> Result<()> {
    for schedule in schedules {
        put(&mut *conn, schedule).await?;
    }
    Ok(())
}

pub async fn exists(conn: &mut SqliteConnection, id: &Id<Schedule>) -> Result<bool> {
    sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM schedules WHERE id = ?);")
        .bind(id.raw())
        .fetch_one(&mut *conn)
        .await
        .map_err(convert_error)
}

pub async fn count(conn: &mut SqliteConnection) -> Result<usize> {
    sqlx::query_scalar("SELECT COUNT(*) FROM schedules;")
        .fetch_one(&mut *conn)
        .await
        .map(|count: i64| count as usize)
        .map_err(convert_error)
}

pub async fn delete_all(conn: &mut SqliteConnection) -> Result<()> {
    sqlx::query("DELETE FROM schedules;")
        .execute(&mut *conn)
        .await
        .map_err(convert_error)?;
    Ok(())
}

// Schedule Repo

pub async fn by_station(
    conn: &mut SqliteConnection,
    station_id: &Id<Station>,
) -> Result<Vec<Schedule>> {
    let rows: Vec<ScheduleRow> = sqlx::query_as(
        "
        SELECT
            id, station_id, station_origin_id, station_destination_id, train_id,
            line, route, departs_at, arrives_at, color, created_at, updated_at
        FROM
            schedules
        WHERE station_id = ?
        ORDER BY departs_at, id;
        ",
    )
    .bind(station_id.raw())
    .fetch_all(&mut *conn)
    .await
    .map_err(convert_error)?;
    to_models(rows)
}
