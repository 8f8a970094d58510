use commuter::database::DatabaseError;

pub mod fare;
pub mod route;
pub mod schedule;
pub mod station;
pub mod transit;

pub(crate) fn convert_error(why: sqlx::Error) -> DatabaseError {
    match why {
        sqlx::Error::RowNotFound => DatabaseError::NotFound,
        _ => DatabaseError::Other(Box::new(why)),
    }
}
