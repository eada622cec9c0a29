//! Due-date helpers.

use chrono::{DateTime, Days, NaiveTime, TimeZone, Utc};

/// Tomorrow at 00:00:00 UTC, the default due instant for a filed tab stash.
pub fn next_day_at_midnight() -> DateTime<Utc> {
    next_day_at_midnight_from(Utc::now())
}

/// The start of the day after `now`, in UTC.
pub fn next_day_at_midnight_from(now: DateTime<Utc>) -> DateTime<Utc> {
    let tomorrow = now.date_naive() + Days::new(1);
    let midnight = tomorrow.and_time(NaiveTime::MIN);
    Utc.from_utc_datetime(&midnight)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_midnight_normalization() {
        let now = Utc.with_ymd_and_hms(2026, 8, 30, 15, 42, 7).unwrap();
        let due = next_day_at_midnight_from(now);
        assert_eq!(due, Utc.with_ymd_and_hms(2026, 8, 31, 0, 0, 0).unwrap());
        assert_eq!(due.hour(), 0);
    }

    #[test]
    fn test_rolls_over_month_boundary() {
        let now = Utc.with_ymd_and_hms(2026, 1, 31, 23, 59, 59).unwrap();
        let due = next_day_at_midnight_from(now);
        assert_eq!(due, Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_is_in_the_future() {
        assert!(next_day_at_midnight() > Utc::now());
    }
}
