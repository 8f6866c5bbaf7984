//! Custom scalar types

use async_graphql::dynamic::Scalar;
use async_graphql::Value;
use chrono::DateTime as ChronoDateTime;

/// Name of the DateTime scalar referenced by derived fields.
pub const DATE_TIME: &str = "DateTime";

/// DateTime scalar accepting RFC 3339 strings.
pub fn date_time() -> Scalar {
    Scalar::new(DATE_TIME)
        .description("An RFC 3339 encoded date and time")
        .validator(valid_date_time)
}

fn valid_date_time(value: &Value) -> bool {
    match value {
        Value::String(s) => ChronoDateTime::parse_from_rfc3339(s).is_ok(),
        _ => false,
    }
}
