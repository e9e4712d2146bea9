/// Day keys: YYYYMMDD calendar day identifiers
///
/// A day key identifies one calendar day of activity. The ledger keys
/// snapshots by the integer value of the same eight digits (no epoch
/// conversion), so the conversion is exact and collision-free for all
/// valid calendar dates.
use crate::error::{ApiError, ApiResult};
use chrono::{Datelike, FixedOffset, NaiveDate, Offset, Utc};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DayKey(NaiveDate);

impl DayKey {
    /// Parse a `YYYYMMDD` string, rejecting non-digits and impossible dates
    pub fn parse(s: &str) -> ApiResult<Self> {
        if s.len() != 8 || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ApiError::Validation(format!(
                "Invalid date key: {} (expected YYYYMMDD)",
                s
            )));
        }

        // All-digit input, so the slices parse infallibly; the date
        // itself may still be impossible (month 13, Feb 30).
        let year: i32 = s[0..4].parse().unwrap_or(0);
        let month: u32 = s[4..6].parse().unwrap_or(0);
        let day: u32 = s[6..8].parse().unwrap_or(0);

        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or_else(|| ApiError::Validation(format!("Invalid calendar date: {}", s)))
    }

    /// Today's day key in the service's configured UTC offset
    pub fn today(utc_offset_hours: i32) -> Self {
        let offset =
            FixedOffset::east_opt(utc_offset_hours * 3600).unwrap_or_else(|| Utc.fix());
        Self(Utc::now().with_timezone(&offset).date_naive())
    }

    /// The ledger's primary key for this day: the YYYYMMDD digits as an integer
    pub fn ledger_id(&self) -> u64 {
        self.0.year() as u64 * 10_000 + self.0.month() as u64 * 100 + self.0.day() as u64
    }

    /// Recover a day key from a ledger day identifier
    pub fn from_ledger_id(id: u64) -> Option<Self> {
        let year = (id / 10_000) as i32;
        let month = ((id / 100) % 100) as u32;
        let day = (id % 100) as u32;
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }
}

impl From<NaiveDate> for DayKey {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}{:02}{:02}",
            self.0.year(),
            self.0.month(),
            self.0.day()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display_round_trip() {
        let day = DayKey::parse("20250615").unwrap();
        assert_eq!(day.to_string(), "20250615");
    }

    #[test]
    fn test_ledger_id_round_trip() {
        let day = DayKey::parse("20250615").unwrap();
        assert_eq!(day.ledger_id(), 20_250_615);
        assert_eq!(DayKey::from_ledger_id(20_250_615), Some(day));
    }

    #[test]
    fn test_ledger_ids_are_collision_free() {
        // Every day over a multi-year range maps to a distinct,
        // strictly increasing ledger id.
        let mut date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2026, 12, 31).unwrap();
        let mut previous = 0u64;

        while date <= end {
            let id = DayKey::from(date).ledger_id();
            assert!(id > previous, "{} did not increase past {}", id, previous);
            previous = id;
            date = date.succ_opt().unwrap();
        }
    }

    #[test]
    fn test_parse_rejects_malformed_keys() {
        assert!(DayKey::parse("2025-06-15").is_err());
        assert!(DayKey::parse("202506").is_err());
        assert!(DayKey::parse("2025061x").is_err());
        assert!(DayKey::parse("").is_err());
    }

    #[test]
    fn test_parse_rejects_impossible_dates() {
        assert!(DayKey::parse("20251332").is_err());
        assert!(DayKey::parse("20250230").is_err());
        // Leap day only on leap years
        assert!(DayKey::parse("20240229").is_ok());
        assert!(DayKey::parse("20250229").is_err());
    }

    #[test]
    fn test_from_ledger_id_rejects_impossible_dates() {
        assert_eq!(DayKey::from_ledger_id(20_251_332), None);
        assert_eq!(DayKey::from_ledger_id(0), None);
    }

    #[test]
    fn test_today_respects_offset() {
        // Offsets 14 hours apart can only ever differ by at most one day
        let west = DayKey::today(-12);
        let east = DayKey::today(2);
        assert!(east >= west);
    }
}
