//! Next-occurrence computation
//!
//! Given the current instant and a candidate alarm time, computes when
//! the alarm should next fire under its repeat policy. All functions are
//! pure over their inputs so wall-clock-dependent behavior stays testable.

use chrono::{Datelike, Days, NaiveDateTime};

use crate::schedule::repeat::{is_weekend, RepeatPolicy};

/// Upper bound on the forward day walk for the Weekdays policy.
/// A qualifying weekday always exists within this window (worst case is
/// Friday with the time already passed, which lands on Monday), so the
/// bound only guards the loop.
const WEEKDAY_SCAN_DAYS: u32 = 7;

/// Compute the next instant at or after `now` that satisfies `policy`.
///
/// For repeat policies the result is strictly after `now`; an occurrence
/// equal to `now` never counts. The `None` policy returns `candidate`
/// unchanged, even if it lies in the past — the caller decides how to
/// correct a one-shot alarm that has already elapsed.
pub fn next_occurrence(
    now: NaiveDateTime,
    candidate: NaiveDateTime,
    policy: RepeatPolicy,
) -> NaiveDateTime {
    match policy {
        RepeatPolicy::None => candidate,
        RepeatPolicy::Daily => {
            let today = now.date().and_time(candidate.time());
            if today <= now {
                today + Days::new(1)
            } else {
                today
            }
        }
        RepeatPolicy::Weekdays => {
            let mut next = now.date().and_time(candidate.time());
            for _ in 0..WEEKDAY_SCAN_DAYS {
                if next > now && !is_weekend(next.weekday()) {
                    return next;
                }
                next = next + Days::new(1);
            }
            next
        }
        RepeatPolicy::Weekly(target) => {
            let start = now.date().and_time(candidate.time());
            let mut days_ahead = (i64::from(target.num_days_from_monday())
                - i64::from(start.weekday().num_days_from_monday()))
            .rem_euclid(7) as u64;
            // Today's slot already passed rolls to next week, never same-day-in-past
            if days_ahead == 0 && start <= now {
                days_ahead = 7;
            }
            start + Days::new(days_ahead)
        }
    }
}

/// Re-arm a repeating alarm that just fired.
///
/// Runs the general computation with the fired instant as the candidate;
/// if clock drift leaves the result at or before `now`, applies the
/// minimal corrective advance for the policy instead of re-running the
/// full algorithm.
pub fn advance_after_fire(
    fired: NaiveDateTime,
    now: NaiveDateTime,
    policy: RepeatPolicy,
) -> NaiveDateTime {
    let mut next = next_occurrence(now, fired, policy);
    if next <= now {
        match policy {
            RepeatPolicy::None => {}
            RepeatPolicy::Daily => next = next + Days::new(1),
            RepeatPolicy::Weekdays => {
                next = next + Days::new(1);
                while is_weekend(next.weekday()) {
                    next = next + Days::new(1);
                }
            }
            RepeatPolicy::Weekly(_) => next = next + Days::new(7),
        }
    }
    next
}
