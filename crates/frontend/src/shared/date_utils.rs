/// Utilities for date and time formatting
use chrono::{DateTime, Utc};

/// Format an order timestamp like "Mar 5, 2025, 02:30 PM" (UTC)
pub fn format_timestamp(dt: DateTime<Utc>) -> String {
    dt.format("%b %-d, %Y, %I:%M %p").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_timestamp() {
        let dt = Utc.with_ymd_and_hms(2025, 3, 5, 14, 30, 59).unwrap();
        assert_eq!(format_timestamp(dt), "Mar 5, 2025, 02:30 PM");
    }

    #[test]
    fn test_format_timestamp_morning() {
        let dt = Utc.with_ymd_and_hms(2024, 12, 31, 9, 5, 0).unwrap();
        assert_eq!(format_timestamp(dt), "Dec 31, 2024, 09:05 AM");
        let midnight = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(format_timestamp(midnight), "Jan 1, 2024, 12:00 AM");
    }
}
