//! Due-date arithmetic and urgency tiers.
//!
//! # Responsibility
//! - Advance a due date by business days or calendar months.
//! - Derive the urgency tier from the whole-day distance to the due date.
//!
//! # Invariants
//! - Functions here are pure: the clock is always an explicit argument.
//! - The business-day branch never returns a Saturday or Sunday.
//! - The months branch applies NO weekend adjustment. The two branches are
//!   intentionally asymmetric and must stay that way.

use crate::model::client::{IntervalSpec, IntervalUnit};
use chrono::{DateTime, Datelike, Duration, Months, Utc, Weekday};

/// Ordered urgency tier for a maintenance due date.
///
/// Ordering runs from most to least urgent, so `Expired < Critical` holds
/// and tier comparisons follow due-date proximity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum UrgencyTier {
    /// Due today or overdue.
    Expired,
    /// Due within 7 days.
    Critical,
    /// Due within 8 to 14 days.
    Warning,
    /// Due in 15 days or more.
    Normal,
}

/// Per-tier record counts for a roster overview.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UrgencyCounts {
    pub expired: usize,
    pub critical: usize,
    pub warning: usize,
    pub normal: usize,
}

/// Computes the next due date for `interval`, starting from `now`.
///
/// # Contract
/// - `IntervalUnit::Days` counts business days: the date advances one
///   calendar day at a time and only Monday..Friday landings count toward
///   `interval.value`. The result is therefore always a weekday.
/// - `IntervalUnit::Months` uses calendar-month addition. When the target
///   month is too short the day is clamped to its last day (Jan 31 + 1
///   month = Feb 29 in a leap year). Weekends are not skipped here.
/// - Assumes `interval.value >= 1`, which `IntervalSpec::new` enforces.
pub fn compute_next_date(interval: &IntervalSpec, now: DateTime<Utc>) -> DateTime<Utc> {
    match interval.unit {
        IntervalUnit::Days => {
            let mut date = now;
            let mut counted = 0;
            while counted < interval.value {
                date += Duration::days(1);
                if is_business_day(date) {
                    counted += 1;
                }
            }
            date
        }
        IntervalUnit::Months => now
            .checked_add_months(Months::new(interval.value))
            // Only reachable within months of chrono's representable maximum;
            // saturate instead of failing a call that promises a result.
            .unwrap_or(DateTime::<Utc>::MAX_UTC),
    }
}

/// Classifies a due date into an urgency tier relative to `now`.
///
/// Uses `days_until_due` (integer ceiling, no floating point) so ties at
/// tier boundaries are deterministic:
/// `<= 0` expired, `1..=7` critical, `8..=14` warning, `>= 15` normal.
pub fn classify_urgency(due: DateTime<Utc>, now: DateTime<Utc>) -> UrgencyTier {
    let diff_days = days_until_due(due, now);
    if diff_days <= 0 {
        UrgencyTier::Expired
    } else if diff_days <= 7 {
        UrgencyTier::Critical
    } else if diff_days <= 14 {
        UrgencyTier::Warning
    } else {
        UrgencyTier::Normal
    }
}

/// Whole days from `now` until `due`, rounded up.
///
/// The ceiling is taken on the full duration down to its sub-second
/// component: a due date even 1 ms in the future counts as 1 day out,
/// while a due date at or before `now` yields zero or a negative count.
pub fn days_until_due(due: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let diff = due - now;
    // num_days truncates toward zero; bump by one whenever any remainder,
    // however small, points further into the future.
    let whole = diff.num_days();
    whole + i64::from(diff > Duration::days(whole))
}

/// Tallies urgency tiers across a set of due dates.
///
/// Feeds the roster overview badges (expired/critical/warning counters).
pub fn urgency_counts<I>(due_dates: I, now: DateTime<Utc>) -> UrgencyCounts
where
    I: IntoIterator<Item = DateTime<Utc>>,
{
    let mut counts = UrgencyCounts::default();
    for due in due_dates {
        match classify_urgency(due, now) {
            UrgencyTier::Expired => counts.expired += 1,
            UrgencyTier::Critical => counts.critical += 1,
            UrgencyTier::Warning => counts.warning += 1,
            UrgencyTier::Normal => counts.normal += 1,
        }
    }
    counts
}

fn is_business_day(date: DateTime<Utc>) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}
