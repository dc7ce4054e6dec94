use crate::config::RebalanceCadence;
use chrono::{Datelike, NaiveDate};

//true when the target strategy should re-size on `current`
//the first observation always rebalances
pub fn is_rebalance_due(
    cadence: RebalanceCadence,
    current: NaiveDate,
    previous: Option<NaiveDate>,
) -> bool {
    let previous = match previous {
        Some(previous) => previous,
        None => return true,
    };

    match cadence {
        RebalanceCadence::Daily => true,
        RebalanceCadence::Weekly => is_new_week(current, previous),
        RebalanceCadence::Monthly => is_new_month(current, previous),
    }
}

//only the iso week number is compared, so a gap landing on the same number does not count
pub fn is_new_week(current: NaiveDate, previous: NaiveDate) -> bool {
    current.iso_week().week() != previous.iso_week().week()
}

//month number only, the year is ignored
pub fn is_new_month(current: NaiveDate, previous: NaiveDate) -> bool {
    current.month() != previous.month()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_first_step_always_due() {
        for cadence in [
            RebalanceCadence::Daily,
            RebalanceCadence::Weekly,
            RebalanceCadence::Monthly,
        ] {
            assert!(is_rebalance_due(cadence, d(2024, 1, 3), None));
        }
    }

    #[test]
    fn test_daily_always_due() {
        assert!(is_rebalance_due(
            RebalanceCadence::Daily,
            d(2024, 1, 3),
            Some(d(2024, 1, 2))
        ));
    }

    #[test]
    fn test_weekly_boundary() {
        //2024-01-05 is a friday, 2024-01-08 the following monday
        assert!(!is_rebalance_due(
            RebalanceCadence::Weekly,
            d(2024, 1, 5),
            Some(d(2024, 1, 4))
        ));
        assert!(is_rebalance_due(
            RebalanceCadence::Weekly,
            d(2024, 1, 8),
            Some(d(2024, 1, 5))
        ));
    }

    #[test]
    fn test_weekly_across_year_end() {
        //2024-12-30 and 2025-01-02 share iso week 1 of 2025
        assert!(!is_new_week(d(2025, 1, 2), d(2024, 12, 30)));
        assert!(is_new_week(d(2024, 12, 30), d(2024, 12, 27)));
    }

    #[test]
    fn test_monthly_boundary() {
        assert!(!is_rebalance_due(
            RebalanceCadence::Monthly,
            d(2024, 1, 31),
            Some(d(2024, 1, 2))
        ));
        assert!(is_rebalance_due(
            RebalanceCadence::Monthly,
            d(2024, 2, 1),
            Some(d(2024, 1, 31))
        ));
    }

    #[test]
    fn test_gap_with_same_week_number_is_not_new_week() {
        //both fall in iso week 10
        assert_eq!(d(2024, 3, 6).iso_week().week(), 10);
        assert_eq!(d(2023, 3, 8).iso_week().week(), 10);
        assert!(!is_new_week(d(2024, 3, 6), d(2023, 3, 8)));
        assert!(!is_rebalance_due(
            RebalanceCadence::Weekly,
            d(2024, 3, 6),
            Some(d(2023, 3, 8))
        ));
    }

    #[test]
    fn test_gap_with_same_month_number_is_not_new_month() {
        assert!(!is_new_month(d(2025, 1, 15), d(2024, 1, 15)));
        assert!(!is_rebalance_due(
            RebalanceCadence::Monthly,
            d(2025, 1, 15),
            Some(d(2024, 1, 20))
        ));
    }
}
