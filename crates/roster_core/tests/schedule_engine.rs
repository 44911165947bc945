use chrono::{DateTime, Datelike, Duration, Utc, Weekday};
use roster_core::{
    classify_urgency, compute_next_date, days_until_due, urgency_counts, IntervalSpec,
    IntervalUnit, UrgencyTier,
};

fn at(rfc3339: &str) -> DateTime<Utc> {
    rfc3339.parse().unwrap()
}

fn days(value: u32) -> IntervalSpec {
    IntervalSpec::new(value, IntervalUnit::Days).unwrap()
}

fn months(value: u32) -> IntervalSpec {
    IntervalSpec::new(value, IntervalUnit::Months).unwrap()
}

fn is_weekend(date: DateTime<Utc>) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

fn weekdays_between_exclusive_inclusive(from: DateTime<Utc>, to: DateTime<Utc>) -> u32 {
    let mut cursor = from;
    let mut count = 0;
    while cursor < to {
        cursor += Duration::days(1);
        if !is_weekend(cursor) {
            count += 1;
        }
    }
    count
}

#[test]
fn days_branch_never_lands_on_weekend() {
    // Sweep every start weekday and a range of magnitudes.
    let monday = at("2024-06-03T09:30:00Z");
    for start_offset in 0..7 {
        let now = monday + Duration::days(start_offset);
        for value in 1..=30 {
            let due = compute_next_date(&days(value), now);
            assert!(
                !is_weekend(due),
                "value={value} from {now} landed on {}",
                due.weekday()
            );
        }
    }
}

#[test]
fn days_branch_counts_exactly_the_requested_business_days() {
    let monday = at("2024-06-03T09:30:00Z");
    for start_offset in 0..7 {
        let now = monday + Duration::days(start_offset);
        for value in 1..=30 {
            let due = compute_next_date(&days(value), now);
            assert_eq!(weekdays_between_exclusive_inclusive(now, due), value);
        }
    }
}

#[test]
fn five_business_days_from_friday_is_next_friday() {
    let friday = at("2024-06-07T08:00:00Z");
    let due = compute_next_date(&days(5), friday);
    assert_eq!(due, at("2024-06-14T08:00:00Z"));
    assert_eq!(due.weekday(), Weekday::Fri);
}

#[test]
fn days_branch_skips_an_intervening_weekend() {
    // Wednesday + 3 business days: Thu, Fri, then Monday.
    let wednesday = at("2024-06-05T10:00:00Z");
    let due = compute_next_date(&days(3), wednesday);
    assert_eq!(due, at("2024-06-10T10:00:00Z"));
    assert_eq!(due.weekday(), Weekday::Mon);
}

#[test]
fn six_months_from_late_january_lands_in_late_july() {
    // Calendar-month addition: July has 31 days, so no clamping applies
    // and the day of month carries over unchanged.
    let due = compute_next_date(&months(6), at("2024-01-31T12:00:00Z"));
    assert_eq!(due, at("2024-07-31T12:00:00Z"));
}

#[test]
fn months_branch_clamps_to_short_target_months() {
    // chrono's Months addition clamps to the last day of a short month,
    // the behavior this crate standardizes on.
    let due_leap = compute_next_date(&months(1), at("2024-01-31T12:00:00Z"));
    assert_eq!(due_leap, at("2024-02-29T12:00:00Z"));

    let due_non_leap = compute_next_date(&months(1), at("2023-01-31T12:00:00Z"));
    assert_eq!(due_non_leap, at("2023-02-28T12:00:00Z"));
}

#[test]
fn months_branch_applies_no_weekend_adjustment() {
    // 2024-04-04 + 1 month = 2024-05-04, a Saturday, and stays one.
    let due = compute_next_date(&months(1), at("2024-04-04T12:00:00Z"));
    assert_eq!(due, at("2024-05-04T12:00:00Z"));
    assert_eq!(due.weekday(), Weekday::Sat);
}

#[test]
fn urgency_boundaries_are_exact() {
    let now = at("2024-06-03T12:00:00Z");
    let cases = [
        (-1, UrgencyTier::Expired),
        (0, UrgencyTier::Expired),
        (1, UrgencyTier::Critical),
        (7, UrgencyTier::Critical),
        (8, UrgencyTier::Warning),
        (14, UrgencyTier::Warning),
        (15, UrgencyTier::Normal),
        (60, UrgencyTier::Normal),
    ];
    for (offset_days, expected) in cases {
        let due = now + Duration::days(offset_days);
        assert_eq!(days_until_due(due, now), offset_days);
        assert_eq!(
            classify_urgency(due, now),
            expected,
            "offset {offset_days} days"
        );
    }
}

#[test]
fn partial_days_round_up_before_classification() {
    let now = at("2024-06-03T12:00:00Z");

    // 6 days and 1 second out ceils to 7 -> still critical.
    let due = now + Duration::days(6) + Duration::seconds(1);
    assert_eq!(classify_urgency(due, now), UrgencyTier::Critical);

    // 7 days and 1 second out ceils to 8 -> warning.
    let due = now + Duration::days(7) + Duration::seconds(1);
    assert_eq!(classify_urgency(due, now), UrgencyTier::Warning);

    // One second overdue -> expired.
    let due = now - Duration::seconds(1);
    assert_eq!(classify_urgency(due, now), UrgencyTier::Expired);
}

#[test]
fn sub_second_remainders_still_round_up() {
    // Real timestamps carry sub-second precision; the ceiling must honor
    // it rather than truncate at whole seconds.
    let now = at("2024-06-03T12:00:00Z");

    let due = now + Duration::days(7) + Duration::milliseconds(1);
    assert_eq!(days_until_due(due, now), 8);
    assert_eq!(classify_urgency(due, now), UrgencyTier::Warning);

    let due = now + Duration::days(14) + Duration::milliseconds(1);
    assert_eq!(days_until_due(due, now), 15);
    assert_eq!(classify_urgency(due, now), UrgencyTier::Normal);

    // One millisecond in the future is still a day away, not expired.
    let due = now + Duration::milliseconds(1);
    assert_eq!(days_until_due(due, now), 1);
    assert_eq!(classify_urgency(due, now), UrgencyTier::Critical);

    // Exactly on the boundary stays in the nearer tier.
    assert_eq!(
        classify_urgency(now + Duration::days(7), now),
        UrgencyTier::Critical
    );
    assert_eq!(classify_urgency(now, now), UrgencyTier::Expired);
}

#[test]
fn urgency_is_monotonic_in_due_date_proximity() {
    let now = at("2024-06-03T12:00:00Z");
    let mut previous = UrgencyTier::Normal;
    // Walk the due date toward (and past) now in 6-hour steps; the tier
    // may only move toward Expired, never back.
    for step in 0..200 {
        let due = now + Duration::days(25) - Duration::hours(6 * step);
        let tier = classify_urgency(due, now);
        assert!(
            tier <= previous,
            "tier regressed from {previous:?} to {tier:?} at step {step}"
        );
        previous = tier;
    }
    assert_eq!(previous, UrgencyTier::Expired);
}

#[test]
fn urgency_counts_tally_each_tier() {
    let now = at("2024-06-03T12:00:00Z");
    let due_dates = vec![
        now - Duration::days(3),  // expired
        now,                      // expired
        now + Duration::days(2),  // critical
        now + Duration::days(10), // warning
        now + Duration::days(30), // normal
        now + Duration::days(40), // normal
    ];

    let counts = urgency_counts(due_dates, now);
    assert_eq!(counts.expired, 2);
    assert_eq!(counts.critical, 1);
    assert_eq!(counts.warning, 1);
    assert_eq!(counts.normal, 2);
}
