//! Consecutive-day streak over car-free journey days.

use std::collections::HashSet;

use chrono::{DateTime, Local, NaiveDate, Utc};

/// Calendar day of a stored timestamp on the server's local clock.
pub fn local_day(ts: DateTime<Utc>) -> NaiveDate {
    ts.with_timezone(&Local).date_naive()
}

/// Count consecutive days ending at `today` that contain at least one
/// qualifying journey. A gap at `today` itself means the streak is 0.
/// Duplicate days collapse; input order is irrelevant.
pub fn current_streak<I>(days: I, today: NaiveDate) -> u32
where
    I: IntoIterator<Item = NaiveDate>,
{
    let days: HashSet<NaiveDate> = days.into_iter().collect();
    let mut streak = 0;
    let mut cursor = today;
    while days.contains(&cursor) {
        streak += 1;
        match cursor.pred_opt() {
            Some(previous) => cursor = previous,
            None => break,
        }
    }
    streak
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn empty_set_is_zero() {
        assert_eq!(current_streak([], day("2026-08-06")), 0);
    }

    #[test]
    fn three_consecutive_days() {
        let today = day("2026-08-06");
        let days = [day("2026-08-06"), day("2026-08-05"), day("2026-08-04")];
        assert_eq!(current_streak(days, today), 3);
    }

    #[test]
    fn gap_at_yesterday_stops_at_one() {
        let today = day("2026-08-06");
        let days = [day("2026-08-06"), day("2026-08-04")];
        assert_eq!(current_streak(days, today), 1);
    }

    #[test]
    fn nothing_today_is_zero_even_with_history() {
        let today = day("2026-08-06");
        let days = [day("2026-08-05"), day("2026-08-04"), day("2026-08-03")];
        assert_eq!(current_streak(days, today), 0);
    }

    #[test]
    fn duplicate_days_count_once() {
        let today = day("2026-08-06");
        let days = [
            day("2026-08-06"),
            day("2026-08-06"),
            day("2026-08-06"),
            day("2026-08-05"),
        ];
        assert_eq!(current_streak(days, today), 2);
    }
}
