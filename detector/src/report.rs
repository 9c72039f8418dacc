use std::io::Write;

use chrono::DateTime;
use models::{AnomalyRecord, Direction};

/// Formats an RFC 3339 timestamp as e.g. `May 01, 2024 at 3:15 PM`, keeping
/// the reading's own offset. Other input is returned unchanged.
pub fn format_timestamp(timestamp: &str) -> String {
    match DateTime::parse_from_rfc3339(timestamp) {
        Ok(dt) => dt.format("%B %d, %Y at %-I:%M %p").to_string(),
        Err(e) => {
            log::debug!("Keeping timestamp `{}` as is: {}", timestamp, e);
            timestamp.to_string()
        }
    }
}

/// Renders a value with at least one decimal place, as `12.0` rather than
/// `12`, for values printed in plain decimal form.
fn format_reading(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e16 => format!("{:.1}", v),
        Some(v) => v.to_string(),
        None => String::new(),
    }
}

pub fn format_anomaly(anomaly: &AnomalyRecord) -> String {
    let label = if anomaly.direction == Direction::Rising.to_string() {
        "JUMP"
    } else {
        "DROP"
    };
    format!(
        "{} in levels found at site {} (site id {}) on {}: {} -> {}",
        label,
        anomaly.site_name,
        anomaly.site_id,
        format_timestamp(&anomaly.timestamp),
        format_reading(anomaly.prev_value),
        format_reading(anomaly.curr_value)
    )
}

pub fn write_report(out: &mut impl Write, anomalies: &[AnomalyRecord]) -> std::io::Result<()> {
    writeln!(out, "ANOMALIES FOUND: {}", anomalies.len())?;
    writeln!(out, "{}", "-".repeat(18))?;
    for anomaly in anomalies {
        writeln!(out, "{}\n", format_anomaly(anomaly))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anomaly(direction: Direction, timestamp: &str) -> AnomalyRecord {
        AnomalyRecord {
            site_id: "08158000".to_string(),
            site_name: "COLORADO RV AT AUSTIN, TX".to_string(),
            direction: direction.to_string(),
            timestamp: timestamp.to_string(),
            prev_value: Some(4.5),
            curr_value: Some(12.0),
        }
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(
            format_timestamp("2024-05-01T15:15:00.000-05:00"),
            "May 01, 2024 at 3:15 PM"
        );
        assert_eq!(
            format_timestamp("2024-12-31T00:05:00Z"),
            "December 31, 2024 at 12:05 AM"
        );
        assert_eq!(format_timestamp("yesterday"), "yesterday");
    }

    #[test]
    fn test_format_anomaly() {
        assert_eq!(
            format_anomaly(&anomaly(Direction::Rising, "2024-05-01T09:00:00.000-05:00")),
            "JUMP in levels found at site COLORADO RV AT AUSTIN, TX (site id 08158000) on May 01, 2024 at 9:00 AM: 4.5 -> 12.0"
        );
        assert!(format_anomaly(&anomaly(Direction::Falling, "t")).starts_with("DROP in levels"));
    }

    #[test]
    fn test_format_reading_keeps_a_decimal_place() {
        assert_eq!(format_reading(Some(12.0)), "12.0");
        assert_eq!(format_reading(Some(-3.0)), "-3.0");
        assert_eq!(format_reading(Some(4.56)), "4.56");
        assert_eq!(format_reading(None), "");
    }

    #[test]
    fn test_write_report() {
        // Arrange
        let anomalies = vec![anomaly(Direction::Falling, "t1")];
        let mut out = Vec::new();

        // Act
        write_report(&mut out, &anomalies).expect("to write");

        // Assert
        let text = String::from_utf8(out).expect("to be utf8");
        assert_eq!(
            text,
            "ANOMALIES FOUND: 1\n\
             ------------------\n\
             DROP in levels found at site COLORADO RV AT AUSTIN, TX (site id 08158000) on t1: 4.5 -> 12.0\n\n"
        );
    }

    #[test]
    fn test_write_empty_report() {
        let mut out = Vec::new();

        write_report(&mut out, &[]).expect("to write");

        assert_eq!(
            String::from_utf8(out).expect("to be utf8"),
            "ANOMALIES FOUND: 0\n------------------\n"
        );
    }
}
