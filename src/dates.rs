//! Calendar helpers for week boundaries and reminder eligibility.
//!
//! Week boundaries are computed in the household's configured time zone;
//! reminder eligibility uses wall-clock elapsed hours between UTC instants.
//! The split is intentional.

use chrono::{DateTime, Datelike, Duration, LocalResult, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Midnight on the Sunday of the week containing `now`, evaluated in `tz`
/// and returned as a UTC instant.
pub fn week_start(now: DateTime<Utc>, tz: Tz) -> DateTime<Utc> {
    let local = now.with_timezone(&tz);
    let days_from_sunday = local.weekday().num_days_from_sunday() as i64;
    let sunday = local.date_naive() - Duration::days(days_from_sunday);
    let midnight = sunday.and_time(NaiveTime::MIN);

    let local_midnight = match tz.from_local_datetime(&midnight) {
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => dt,
        // Midnight falls in a DST gap in this zone; read the naive time as
        // UTC so the result stays deterministic.
        LocalResult::None => tz.from_utc_datetime(&midnight),
    };

    local_midnight.with_timezone(&Utc)
}

/// True once at least `hours` wall-clock hours have passed since `since`.
pub fn hours_elapsed(since: DateTime<Utc>, hours: u32) -> bool {
    Utc::now().signed_duration_since(since) >= Duration::hours(i64::from(hours))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn week_start_finds_the_preceding_sunday() {
        let tz: Tz = "America/Los_Angeles".parse().unwrap();
        // Wednesday 2026-02-04 18:00 UTC is Wednesday afternoon in LA.
        let now = Utc.with_ymd_and_hms(2026, 2, 4, 18, 0, 0).unwrap();
        let start = week_start(now, tz);

        // Sunday 2026-02-01 00:00 PST == 08:00 UTC.
        assert_eq!(start, Utc.with_ymd_and_hms(2026, 2, 1, 8, 0, 0).unwrap());
    }

    #[test]
    fn week_start_is_idempotent_within_a_week() {
        let tz: Tz = "America/Los_Angeles".parse().unwrap();
        let monday = Utc.with_ymd_and_hms(2026, 2, 2, 12, 0, 0).unwrap();
        let saturday = Utc.with_ymd_and_hms(2026, 2, 7, 12, 0, 0).unwrap();

        assert_eq!(week_start(monday, tz), week_start(saturday, tz));
    }

    #[test]
    fn week_start_respects_the_zone_not_utc() {
        let tz: Tz = "America/Los_Angeles".parse().unwrap();
        // Sunday 2026-02-01 02:00 UTC is still Saturday evening in LA, so the
        // week starts on the previous Sunday.
        let now = Utc.with_ymd_and_hms(2026, 2, 1, 2, 0, 0).unwrap();
        let start = week_start(now, tz);

        assert_eq!(start, Utc.with_ymd_and_hms(2026, 1, 25, 8, 0, 0).unwrap());
    }

    #[test]
    fn hours_elapsed_checks_the_threshold() {
        let now = Utc::now();
        assert!(hours_elapsed(now - Duration::hours(25), 24));
        assert!(!hours_elapsed(now - Duration::hours(12), 24));
        assert!(hours_elapsed(now - Duration::hours(24), 24));
    }
}
