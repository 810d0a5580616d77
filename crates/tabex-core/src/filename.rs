//! Timestamped export filenames

use chrono::{Local, NaiveDateTime};

/// Timestamp layout: `YYYYMMDD_HHmm`
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M";

/// Source of the current local time
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// Wall clock in the local time zone
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

impl Clock for LocalClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Clock pinned to a single instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// Build `{prefix}_{YYYYMMDD_HHmm}.{extension}` for a given instant
pub fn generate_filename_at(prefix: &str, extension: &str, at: NaiveDateTime) -> String {
    format!("{}_{}.{}", prefix, at.format(TIMESTAMP_FORMAT), extension)
}

/// Build a filename stamped with the current local time
pub fn generate_filename(prefix: &str, extension: &str) -> String {
    generate_filename_at(prefix, extension, LocalClock.now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn instant() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 7)
            .unwrap()
            .and_hms_opt(9, 5, 42)
            .unwrap()
    }

    #[test]
    fn test_generate_filename_at_zero_pads() {
        assert_eq!(
            generate_filename_at("report", "csv", instant()),
            "report_20240307_0905.csv"
        );
    }

    #[test]
    fn test_fixed_clock() {
        let clock = FixedClock(instant());
        assert_eq!(clock.now(), instant());
    }

    #[test]
    fn test_generate_filename_shape() {
        let name = generate_filename("report", "csv");
        let stamp = name
            .strip_prefix("report_")
            .and_then(|rest| rest.strip_suffix(".csv"))
            .expect("prefix and extension");

        let (date, time) = stamp.split_once('_').expect("date_time");
        assert_eq!(date.len(), 8);
        assert_eq!(time.len(), 4);
        assert!(date.chars().chain(time.chars()).all(|c| c.is_ascii_digit()));
    }
}
