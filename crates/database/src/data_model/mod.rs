use chrono::{DateTime, Local};
use commuter::database::{DatabaseError, Result};
use utility::serde::record_time;

pub mod fare;
pub mod route;
pub mod schedule;
pub mod station;
pub mod transit;

/// Mapping between a stored record and its model.
pub trait DatabaseRow: Sized {
    type Model;

    /// Fails with `DatabaseError::Corrupt` for records this crate would never
    /// write.
    fn to_model(self) -> Result<Self::Model>;
    fn from_model(model: &Self::Model) -> Self;
}

pub fn to_models<R: DatabaseRow>(rows: Vec<R>) -> Result<Vec<R::Model>> {
    rows.into_iter().map(DatabaseRow::to_model).collect()
}

pub(crate) fn parse_time(column: &str, text: &str) -> Result<DateTime<Local>> {
    record_time::parse(text).map_err(|why| {
        DatabaseError::Corrupt(format!("invalid {} '{}': {}", column, text, why))
    })
}

pub(crate) fn format_time(date: &DateTime<Local>) -> String {
    record_time::format(date)
}
