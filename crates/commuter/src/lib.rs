use std::{error::Error, fmt};

pub mod client;
pub mod context;
pub mod database;
pub mod observe;
pub mod sync;

#[derive(Debug)]
pub enum RequestError {
    NotFound,
    /// The station has to be a favorite for this operation.
    NotFavorite,
    Other(Box<dyn Error + Send + Sync>),
}

impl RequestError {
    pub fn other<T: Error + Send + Sync + 'static>(why: T) -> Self {
        Self::Other(Box::new(why))
    }
}

impl Error for RequestError {}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RequestError::NotFound => write!(f, "Not found."),
            RequestError::NotFavorite => write!(f, "Station is not a favorite."),
            RequestError::Other(why) => write!(f, "{}", why),
        }
    }
}

impl From<database::DatabaseError> for RequestError {
    fn from(value: database::DatabaseError) -> Self {
        match value {
            database::DatabaseError::NotFound => Self::NotFound,
            other => Self::other(other),
        }
    }
}

pub type RequestResult<O> = Result<O, RequestError>;
