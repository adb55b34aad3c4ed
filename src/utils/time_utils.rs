//! API 응답용 시각 포맷

use chrono::{DateTime, Utc};
use mongodb::bson;

/// 응답 DTO의 `createdAt`/`updatedAt` 형식 (UTC)
pub const API_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn to_chrono(value: bson::DateTime) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp_millis(value.timestamp_millis()).unwrap_or_default()
}

/// `2024-03-01 09:30:00`
pub fn format_api_datetime(value: bson::DateTime) -> String {
    to_chrono(value).format(API_DATETIME_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_without_timezone_suffix() {
        // 2024-03-01T09:30:15Z
        let value = bson::DateTime::from_millis(1_709_285_415_000);
        assert_eq!(format_api_datetime(value), "2024-03-01 09:30:15");
    }
}
