pub mod fare;
pub mod route;
pub mod schedule;
pub mod station;
pub mod transit;

pub use serde_with;

/// Realistic sample values, used by documentation and tests.
pub trait ExampleData {
    fn example_data() -> Self;
}

pub(crate) fn example_time(secs: i64, nanos: u32) -> chrono::DateTime<chrono::Local> {
    chrono::DateTime::from_timestamp(secs, nanos)
        .unwrap_or_default()
        .with_timezone(&chrono::Local)
}
