//! Temporal features: sine/cosine encodings of hour-of-day and
//! day-of-week, evaluated at snapshot time. The cyclic encoding avoids
//! the discontinuity a raw integer would introduce at midnight / Sunday.

use chrono::{DateTime, Datelike, Timelike, Utc};
use std::f64::consts::PI;

pub fn feature_names() -> Vec<String> {
    vec![
        "hour_sin".to_string(),
        "hour_cos".to_string(),
        "dow_sin".to_string(),
        "dow_cos".to_string(),
    ]
}

pub fn extract(snapshot_time: DateTime<Utc>) -> Vec<f64> {
    let hour = snapshot_time.hour() as f64;
    let dow = snapshot_time.weekday().num_days_from_monday() as f64;

    let hour_angle = 2.0 * PI * hour / 24.0;
    let dow_angle = 2.0 * PI * dow / 7.0;

    vec![
        hour_angle.sin(),
        hour_angle.cos(),
        dow_angle.sin(),
        dow_angle.cos(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn midnight_monday_has_zero_angle_identity() {
        let t = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(); // a Monday
        let values = extract(t);
        assert!((values[0] - 0.0).abs() < 1e-9); // hour_sin
        assert!((values[1] - 1.0).abs() < 1e-9); // hour_cos
        assert!((values[2] - 0.0).abs() < 1e-9); // dow_sin
        assert!((values[3] - 1.0).abs() < 1e-9); // dow_cos
    }

    #[test]
    fn values_stay_within_unit_circle() {
        let t = Utc.with_ymd_and_hms(2024, 6, 15, 13, 0, 0).unwrap();
        for v in extract(t) {
            assert!((-1.0..=1.0).contains(&v));
        }
    }
}
