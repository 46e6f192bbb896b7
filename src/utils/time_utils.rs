use chrono::{DateTime, Utc};
use mongodb::bson;

/// BSON 시간 → chrono UTC (응답 JSON에서 RFC 3339로 직렬화됨)
pub fn to_utc(value: bson::DateTime) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp_millis(value.timestamp_millis()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_utc_keeps_millis() {
        let value = bson::DateTime::from_millis(1_700_000_000_123);
        let converted = to_utc(value);

        assert_eq!(converted.timestamp_millis(), 1_700_000_000_123);
        assert_eq!(converted.to_rfc3339(), "2023-11-14T22:13:20.123+00:00");
    }
}
