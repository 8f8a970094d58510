use std::{error, fmt, sync::Arc};

pub mod client;
pub mod fares;
pub mod model;
pub mod routes;
pub mod schedules;
pub mod stations;
pub mod transits;

#[derive(Debug, Clone)]
pub enum ApiError {
    RequestError(Arc<reqwest::Error>),
    JsonError(Arc<serde_json::Error>),
    InvalidResponse {
        status_code: reqwest::StatusCode,
        url: String,
        response: Option<String>,
    },
    /// The envelope reported `success: false`.
    Unsuccessful {
        url: String,
        message: Option<String>,
    },
    /// The envelope reported success but carried no data.
    MissingData(String),
    /// The configured base URL cannot carry endpoint paths.
    InvalidUrl(String),
}

impl error::Error for ApiError {}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ApiError::RequestError(e) => write!(f, "HTTP request error: {}", e),
            ApiError::JsonError(e) => write!(f, "JSON parse error: {}", e),
            ApiError::InvalidResponse {
                status_code,
                url,
                response,
            } => match response {
                Some(text) => {
                    write!(f, "Invalid Response ({}) {}: {}", status_code, text, url)
                }
                None => write!(f, "Invalid Response({}) {}", status_code, url),
            },
            ApiError::Unsuccessful { url, message } => match message {
                Some(message) => write!(f, "Request to {} failed: {}", url, message),
                None => write!(f, "Request to {} failed.", url),
            },
            ApiError::MissingData(url) => write!(f, "No data in response: {}", url),
            ApiError::InvalidUrl(url) => write!(f, "Invalid API base URL: {}", url),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        ApiError::RequestError(Arc::new(e))
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::JsonError(Arc::new(e))
    }
}
