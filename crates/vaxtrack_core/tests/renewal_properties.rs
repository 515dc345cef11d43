use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;
use vaxtrack_core::{compute_renewal_date, days_until, decompose_interval, RenewalInterval};

fn base_date() -> impl Strategy<Value = DateTime<Utc>> {
    // 1970-01-01 .. 2100-01-01, second resolution.
    (0i64..4_102_444_800).prop_map(|secs| Utc.timestamp_opt(secs, 0).unwrap())
}

proptest! {
    #[test]
    fn decompose_inverts_compute(base in base_date(), years in 0u32..=50, months in 0u32..=11) {
        let renewal = compute_renewal_date(base, years, months);
        prop_assert_eq!(decompose_interval(base, renewal), (years, months));
    }

    #[test]
    fn interval_between_matches_apply(base in base_date(), years in 0u32..=50, months in 0u32..=11) {
        let interval = RenewalInterval::new(years, months);
        prop_assert_eq!(RenewalInterval::between(base, interval.apply(base)), interval);
    }

    #[test]
    fn days_until_decreases_as_now_advances(date in base_date(), now in base_date(), step in 1i64..400) {
        let later = now + Duration::days(step);
        prop_assert!(days_until(date, later) < days_until(date, now));
        prop_assert_eq!(days_until(date, now) - days_until(date, later), step);
    }

    #[test]
    fn days_until_self_is_zero(date in base_date()) {
        prop_assert_eq!(days_until(date, date), 0);
    }

    #[test]
    fn renewal_never_precedes_base(base in base_date(), years in 0u32..=50, months in 0u32..=11) {
        prop_assert!(compute_renewal_date(base, years, months) >= base);
    }
}
