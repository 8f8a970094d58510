use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

pub mod fare;
pub mod route;
pub mod schedule;
pub mod station;
pub mod transit;

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metadata {
    pub success: bool,
    pub message: Option<String>,
}

/// Every response of the api is wrapped like this.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Response<T> {
    pub metadata: Metadata,
    pub data: Option<T>,
}

/// `metadata.origin.color` of schedules and transits.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ColorMetadata {
    pub origin: Option<OriginColor>,
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OriginColor {
    pub color: Option<String>,
}

pub(crate) fn color(metadata: Option<ColorMetadata>) -> Option<String> {
    metadata
        .and_then(|metadata| metadata.origin)
        .and_then(|origin| origin.color)
}

pub(crate) fn local(date: DateTime<Utc>) -> DateTime<Local> {
    date.with_timezone(&Local)
}
