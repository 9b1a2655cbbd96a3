//! Schedule-date generation for recurring cadences.
//!
//! Pure functions computing which calendar dates of a month a cadence falls
//! on. Deterministic and stateless; safe to call repeatedly.

use chrono::{Datelike, Duration, NaiveDate};

use crate::months::MonthId;
use crate::recurring::{Cadence, DayRule};

/// Dates within `month` that `cadence` lands on, in ascending order.
///
/// Weekly and biweekly cadences step forward from `anchor` in 7/14-day
/// intervals; the anchor may lie in an earlier month. Semimonthly is fixed at
/// the 15th and the last calendar day regardless of anchor. Monthly uses
/// `day_rule` (clamped to the month's length) and falls back to the anchor's
/// day-of-month when no rule is given.
///
/// A cadence that cannot be phased (interval cadence without an anchor,
/// monthly without rule or anchor) yields an empty schedule; callers treat
/// that as a recovered data inconsistency.
pub fn schedule_dates(
    month: MonthId,
    cadence: Cadence,
    anchor: Option<NaiveDate>,
    day_rule: Option<DayRule>,
) -> Vec<NaiveDate> {
    let first = month.first_day();
    let last = month.last_day();

    match cadence {
        Cadence::Weekly => interval_dates(first, last, anchor, 7),
        Cadence::Biweekly => interval_dates(first, last, anchor, 14),
        Cadence::Semimonthly => {
            let fifteenth = first.with_day(15).unwrap_or(last);
            vec![fifteenth, last]
        }
        Cadence::Monthly => {
            let day = match day_rule {
                Some(DayRule::Day(day)) => day,
                Some(DayRule::Last) => return vec![last],
                None => match anchor {
                    Some(anchor) => anchor.day(),
                    None => return Vec::new(),
                },
            };
            let clamped = day.clamp(1, month.days_in_month());
            first.with_day(clamped).map(|d| vec![d]).unwrap_or_default()
        }
    }
}

/// Steps from `anchor` in `step_days` increments, collecting every date in
/// `[first, last]`. An anchor past the end of the month produces nothing.
fn interval_dates(
    first: NaiveDate,
    last: NaiveDate,
    anchor: Option<NaiveDate>,
    step_days: i64,
) -> Vec<NaiveDate> {
    let Some(anchor) = anchor else {
        return Vec::new();
    };

    let mut current = anchor;
    if current < first {
        let behind = (first - current).num_days();
        let steps = behind / step_days + i64::from(behind % step_days != 0);
        current += Duration::days(steps * step_days);
    }

    let mut dates = Vec::new();
    while current <= last {
        dates.push(current);
        current += Duration::days(step_days);
    }
    dates
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn month(s: &str) -> MonthId {
        s.parse().unwrap()
    }

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_semimonthly_is_fifteenth_and_last() {
        let dates = schedule_dates(
            month("2024-02"),
            Cadence::Semimonthly,
            Some(date("2023-06-09")),
            None,
        );
        assert_eq!(dates, vec![date("2024-02-15"), date("2024-02-29")]);

        // Anchor is ignored entirely
        let dates = schedule_dates(month("2024-04"), Cadence::Semimonthly, None, None);
        assert_eq!(dates, vec![date("2024-04-15"), date("2024-04-30")]);
    }

    #[test]
    fn test_monthly_day_rule_clamps_to_month_length() {
        let dates = schedule_dates(
            month("2023-02"),
            Cadence::Monthly,
            None,
            Some(DayRule::Day(31)),
        );
        assert_eq!(dates, vec![date("2023-02-28")]);
    }

    #[test]
    fn test_monthly_last_rule() {
        let dates = schedule_dates(month("2024-02"), Cadence::Monthly, None, Some(DayRule::Last));
        assert_eq!(dates, vec![date("2024-02-29")]);
    }

    #[test]
    fn test_monthly_falls_back_to_anchor_day() {
        let dates = schedule_dates(
            month("2024-03"),
            Cadence::Monthly,
            Some(date("2024-01-09")),
            None,
        );
        assert_eq!(dates, vec![date("2024-03-09")]);
    }

    #[test]
    fn test_monthly_without_rule_or_anchor_is_empty() {
        assert!(schedule_dates(month("2024-03"), Cadence::Monthly, None, None).is_empty());
    }

    #[test]
    fn test_biweekly_from_past_anchor() {
        // Anchor Friday 2024-01-05; 14-day steps land on 2024-03-01, -15, -29
        let dates = schedule_dates(
            month("2024-03"),
            Cadence::Biweekly,
            Some(date("2024-01-05")),
            None,
        );
        assert_eq!(
            dates,
            vec![date("2024-03-01"), date("2024-03-15"), date("2024-03-29")]
        );
    }

    #[test]
    fn test_weekly_anchor_inside_month() {
        let dates = schedule_dates(
            month("2024-03"),
            Cadence::Weekly,
            Some(date("2024-03-20")),
            None,
        );
        assert_eq!(dates, vec![date("2024-03-20"), date("2024-03-27")]);
    }

    #[test]
    fn test_interval_anchor_after_month_is_empty() {
        let dates = schedule_dates(
            month("2024-03"),
            Cadence::Biweekly,
            Some(date("2024-04-02")),
            None,
        );
        assert!(dates.is_empty());
    }

    #[test]
    fn test_interval_without_anchor_is_empty() {
        assert!(schedule_dates(month("2024-03"), Cadence::Weekly, None, None).is_empty());
    }

    proptest! {
        #[test]
        fn prop_semimonthly_always_two_dates(
            year in 2000i32..2100,
            mon in 1u32..=12,
            anchor_offset in 0i64..1000,
        ) {
            let month = MonthId::new(year, mon).unwrap();
            let anchor = NaiveDate::from_ymd_opt(1999, 1, 1).unwrap()
                + Duration::days(anchor_offset);
            let dates = schedule_dates(month, Cadence::Semimonthly, Some(anchor), None);
            prop_assert_eq!(dates.len(), 2);
            prop_assert_eq!(dates[0].day(), 15);
            prop_assert_eq!(dates[1], month.last_day());
        }

        #[test]
        fn prop_monthly_day_rule_never_overflows_month(
            year in 2000i32..2100,
            mon in 1u32..=12,
            day in 1u32..=31,
        ) {
            let month = MonthId::new(year, mon).unwrap();
            let dates = schedule_dates(month, Cadence::Monthly, None, Some(DayRule::Day(day)));
            prop_assert_eq!(dates.len(), 1);
            prop_assert!(month.contains(dates[0]));
            prop_assert_eq!(dates[0].day(), day.min(month.days_in_month()));
        }

        #[test]
        fn prop_interval_dates_in_range_and_phased(
            year in 2020i32..2030,
            mon in 1u32..=12,
            anchor_offset in 0i64..2000,
        ) {
            let month = MonthId::new(year, mon).unwrap();
            let anchor = NaiveDate::from_ymd_opt(2019, 1, 1).unwrap()
                + Duration::days(anchor_offset);
            let dates = schedule_dates(month, Cadence::Biweekly, Some(anchor), None);
            for d in &dates {
                prop_assert!(month.contains(*d));
                prop_assert_eq!((*d - anchor).num_days() % 14, 0);
            }
        }
    }
}
