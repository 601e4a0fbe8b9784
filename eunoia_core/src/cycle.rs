//! Cycle date arithmetic.
//!
//! Every operation here is a pure function of a [`CycleConfig`], an optional
//! [`CyclePolicy`] and a query date. Nothing is cached or persisted; callers
//! recompute facts whenever they need them.
//!
//! Day indices are 1-based: `last_period_start` is day 1, and indices wrap
//! every `cycle_length` days in both directions, so historical dates work.

use crate::{CycleConfig, CyclePolicy, Error, Result};
use chrono::NaiveDate;

/// Derived facts for one query date
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CycleFacts {
    pub day_of_cycle: i64,
    pub is_period_day: bool,
    pub is_fertile_day: bool,
    pub days_until_next_period: i64,
}

fn validate(config: &CycleConfig) -> Result<()> {
    if config.cycle_length <= 0 {
        return Err(Error::InvalidConfig(format!(
            "cycle_length must be positive, got {}",
            config.cycle_length
        )));
    }
    Ok(())
}

/// Which day of the cycle a date falls on
///
/// Returns a 1-based index in `[1, cycle_length]`. The query date may be
/// before `last_period_start`; the Euclidean remainder keeps the index in
/// range for negative day differences too.
pub fn day_of_cycle(config: &CycleConfig, query_date: NaiveDate) -> Result<i64> {
    validate(config)?;
    let diff_days = query_date
        .signed_duration_since(config.last_period_start)
        .num_days();
    Ok(diff_days.rem_euclid(config.cycle_length) + 1)
}

/// Whether a date falls inside the menstrual window
///
/// Days 1 through `period_duration` count as period days.
pub fn is_period_day(config: &CycleConfig, query_date: NaiveDate) -> Result<bool> {
    let day = day_of_cycle(config, query_date)?;
    Ok(day <= config.period_duration)
}

/// The fertile window as inclusive day-of-cycle bounds
///
/// Ovulation is estimated at `cycle_length - luteal_phase_days`. The window
/// spans `fertile_days_before` days before that through `fertile_days_after`
/// days after, intersected with `[1, cycle_length]`. Cycles too short for the
/// luteal estimate have no window at all; the window never wraps into the
/// previous cycle.
pub fn fertile_window(config: &CycleConfig, policy: &CyclePolicy) -> Result<Option<(i64, i64)>> {
    validate(config)?;

    let ovulation_day = config.cycle_length - policy.luteal_phase_days;
    if ovulation_day <= 0 {
        tracing::debug!(
            "Cycle length {} too short for a {}-day luteal phase, no fertile window",
            config.cycle_length,
            policy.luteal_phase_days
        );
        return Ok(None);
    }

    let lo = (ovulation_day - policy.fertile_days_before).max(1);
    let hi = (ovulation_day + policy.fertile_days_after).min(config.cycle_length);
    if lo > hi {
        return Ok(None);
    }

    Ok(Some((lo, hi)))
}

/// Whether a date falls inside the fertile window
pub fn is_fertile_day(
    config: &CycleConfig,
    policy: &CyclePolicy,
    query_date: NaiveDate,
) -> Result<bool> {
    let day = day_of_cycle(config, query_date)?;
    Ok(match fertile_window(config, policy)? {
        Some((lo, hi)) => day >= lo && day <= hi,
        None => false,
    })
}

/// Days remaining until the next period starts
///
/// Always in `[1, cycle_length]`, never 0: on day 1 the next period is a
/// full cycle away.
pub fn days_until_next_period(config: &CycleConfig, reference_date: NaiveDate) -> Result<i64> {
    let day = day_of_cycle(config, reference_date)?;
    let mut remaining = config.cycle_length - day + 1;
    if remaining > config.cycle_length {
        remaining -= config.cycle_length;
    }
    Ok(remaining)
}

/// Compute all facts for one date
pub fn facts_for(
    config: &CycleConfig,
    policy: &CyclePolicy,
    query_date: NaiveDate,
) -> Result<CycleFacts> {
    let day = day_of_cycle(config, query_date)?;
    let facts = CycleFacts {
        day_of_cycle: day,
        is_period_day: is_period_day(config, query_date)?,
        is_fertile_day: is_fertile_day(config, policy, query_date)?,
        days_until_next_period: days_until_next_period(config, query_date)?,
    };
    tracing::debug!(
        "Facts for {}: day {}/{}, period={}, fertile={}",
        query_date,
        facts.day_of_cycle,
        config.cycle_length,
        facts.is_period_day,
        facts.is_fertile_day
    );
    Ok(facts)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn config_28_5() -> CycleConfig {
        CycleConfig {
            last_period_start: date(2024, 1, 1),
            cycle_length: 28,
            period_duration: 5,
        }
    }

    #[test]
    fn test_day_one_on_last_period_start() {
        let config = config_28_5();
        assert_eq!(day_of_cycle(&config, date(2024, 1, 1)).unwrap(), 1);
    }

    #[test]
    fn test_day_of_cycle_wraps_after_full_cycle() {
        let config = config_28_5();
        assert_eq!(day_of_cycle(&config, date(2024, 1, 29)).unwrap(), 1);
        assert_eq!(day_of_cycle(&config, date(2024, 2, 26)).unwrap(), 1);
    }

    #[test]
    fn test_day_of_cycle_in_range_for_dates_before_start() {
        let config = config_28_5();

        // Day before the recorded start lands on the last day of the
        // previous cycle, not on 0 or a negative index
        assert_eq!(day_of_cycle(&config, date(2023, 12, 31)).unwrap(), 28);

        for offset in 1..60 {
            let q = date(2024, 1, 1) - chrono::Duration::days(offset);
            let day = day_of_cycle(&config, q).unwrap();
            assert!((1..=28).contains(&day), "day {} out of range for -{}", day, offset);
        }
    }

    #[test]
    fn test_day_of_cycle_in_range_for_future_dates() {
        let config = config_28_5();
        for offset in 0..90 {
            let q = date(2024, 1, 1) + chrono::Duration::days(offset);
            let day = day_of_cycle(&config, q).unwrap();
            assert!((1..=28).contains(&day));
        }
    }

    #[test]
    fn test_period_days_are_exactly_the_first_duration_days() {
        let config = config_28_5();
        for offset in 0..28 {
            let q = date(2024, 1, 1) + chrono::Duration::days(offset);
            let expected = offset < 5;
            assert_eq!(
                is_period_day(&config, q).unwrap(),
                expected,
                "offset {} (day {})",
                offset,
                offset + 1
            );
        }
    }

    #[test]
    fn test_days_until_next_period_bounds() {
        let config = config_28_5();
        for offset in 0..56 {
            let q = date(2024, 1, 1) + chrono::Duration::days(offset);
            let remaining = days_until_next_period(&config, q).unwrap();
            assert!(
                (1..=28).contains(&remaining),
                "remaining {} out of range at offset {}",
                remaining,
                offset
            );
        }

        // Day 1 means the next period is a full cycle away, never 0
        assert_eq!(days_until_next_period(&config, date(2024, 1, 1)).unwrap(), 28);
        // Last day of the cycle means tomorrow
        assert_eq!(days_until_next_period(&config, date(2024, 1, 28)).unwrap(), 1);
    }

    #[test]
    fn test_worked_example() {
        let config = config_28_5();
        let policy = CyclePolicy::default();

        let jan1 = facts_for(&config, &policy, date(2024, 1, 1)).unwrap();
        assert_eq!(jan1.day_of_cycle, 1);
        assert!(jan1.is_period_day);
        assert_eq!(jan1.days_until_next_period, 28);

        let jan6 = facts_for(&config, &policy, date(2024, 1, 6)).unwrap();
        assert_eq!(jan6.day_of_cycle, 6);
        assert!(!jan6.is_period_day);

        // Ovulation estimate is day 14, window days 9 through 15
        assert_eq!(fertile_window(&config, &policy).unwrap(), Some((9, 15)));
        let jan14 = facts_for(&config, &policy, date(2024, 1, 14)).unwrap();
        assert!(jan14.is_fertile_day);

        let jan29 = facts_for(&config, &policy, date(2024, 1, 29)).unwrap();
        assert_eq!(jan29.day_of_cycle, 1);
    }

    #[test]
    fn test_fertile_window_clamps_to_cycle_bounds() {
        let policy = CyclePolicy::default();

        // Ovulation on day 2: window start clamps to day 1
        let config = CycleConfig {
            last_period_start: date(2024, 1, 1),
            cycle_length: 16,
            period_duration: 4,
        };
        assert_eq!(fertile_window(&config, &policy).unwrap(), Some((1, 3)));
    }

    #[test]
    fn test_short_cycle_has_no_fertile_window() {
        let policy = CyclePolicy::default();
        let config = CycleConfig {
            last_period_start: date(2024, 1, 1),
            cycle_length: 13,
            period_duration: 4,
        };

        assert_eq!(fertile_window(&config, &policy).unwrap(), None);
        for offset in 0..13 {
            let q = date(2024, 1, 1) + chrono::Duration::days(offset);
            assert!(!is_fertile_day(&config, &policy, q).unwrap());
        }
    }

    #[test]
    fn test_zero_cycle_length_rejected_everywhere() {
        let policy = CyclePolicy::default();
        let config = CycleConfig {
            last_period_start: date(2024, 1, 1),
            cycle_length: 0,
            period_duration: 5,
        };
        let q = date(2024, 1, 10);

        assert!(matches!(day_of_cycle(&config, q), Err(Error::InvalidConfig(_))));
        assert!(matches!(is_period_day(&config, q), Err(Error::InvalidConfig(_))));
        assert!(matches!(
            fertile_window(&config, &policy),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            is_fertile_day(&config, &policy, q),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            days_until_next_period(&config, q),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            facts_for(&config, &policy, q),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_negative_cycle_length_rejected() {
        let config = CycleConfig {
            last_period_start: date(2024, 1, 1),
            cycle_length: -1,
            period_duration: 5,
        };
        assert!(matches!(
            day_of_cycle(&config, date(2024, 1, 10)),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_far_dates_compute_without_overflow() {
        let config = config_28_5();
        let ancient = day_of_cycle(&config, date(1, 1, 1)).unwrap();
        let distant = day_of_cycle(&config, date(9999, 12, 31)).unwrap();
        assert!((1..=28).contains(&ancient));
        assert!((1..=28).contains(&distant));
    }

    #[test]
    fn test_assumed_config_puts_today_just_past_the_period() {
        let today = date(2024, 3, 10);
        let config = CycleConfig::assumed_from(today, 28, 5);

        assert_eq!(config.last_period_start, date(2024, 3, 5));
        assert_eq!(day_of_cycle(&config, today).unwrap(), 6);
        assert!(!is_period_day(&config, today).unwrap());
    }

    #[test]
    fn test_custom_policy_moves_the_window() {
        let config = config_28_5();
        let policy = CyclePolicy {
            luteal_phase_days: 12,
            fertile_days_before: 3,
            fertile_days_after: 2,
        };

        // Ovulation estimate day 16, window days 13 through 18
        assert_eq!(fertile_window(&config, &policy).unwrap(), Some((13, 18)));
    }
}
