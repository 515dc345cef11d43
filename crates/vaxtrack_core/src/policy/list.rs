//! Main-list filtering and ordering.
//!
//! # Responsibility
//! - Decide which vaccines a filter mode keeps.
//! - Define the total order used to render the list.
//!
//! # Invariants
//! - The visible sequence is recomputed from the full collection on every
//!   call; no incremental state.
//! - `compare` is a strict total order: antisymmetric, transitive, and only
//!   `Equal` for records with the same id and content.
//! - The `Expiring` filter and priority rank 1 use `0 < days <= 30`; a
//!   renewal due today is excluded even though its attention level is
//!   `Warning`.

use crate::model::status::WARNING_WINDOW_DAYS;
use crate::model::vaccine::Vaccine;
use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Filter modes offered by the list view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum VaccineFilter {
    #[default]
    All,
    Overdue,
    Expiring,
    NoRenewal,
}

const ALL_FILTERS: &[VaccineFilter] = &[
    VaccineFilter::All,
    VaccineFilter::Overdue,
    VaccineFilter::Expiring,
    VaccineFilter::NoRenewal,
];

impl VaccineFilter {
    /// Every filter mode in menu order.
    pub fn all() -> &'static [VaccineFilter] {
        ALL_FILTERS
    }

    /// Stable key used on the command line and in logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Overdue => "overdue",
            Self::Expiring => "expiring",
            Self::NoRenewal => "no-renewal",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Overdue => "Expired",
            Self::Expiring => "Expiring soon",
            Self::NoRenewal => "No renewal",
        }
    }

    pub fn icon_name(self) -> &'static str {
        match self {
            Self::All => "list.bullet",
            Self::Overdue => "xmark.circle.fill",
            Self::Expiring => "clock.fill",
            Self::NoRenewal => "checkmark.circle",
        }
    }

    /// Whether `vaccine` belongs to this filter at `now`.
    pub fn matches(self, vaccine: &Vaccine, now: DateTime<Utc>) -> bool {
        match self {
            Self::All => true,
            Self::Overdue => vaccine.is_expired(now),
            Self::Expiring => is_expiring_soon(vaccine, now),
            Self::NoRenewal => !vaccine.has_renewal(),
        }
    }
}

/// Unknown filter key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownFilterError(pub String);

impl Display for UnknownFilterError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown filter `{}`; expected all|overdue|expiring|no-renewal",
            self.0
        )
    }
}

impl Error for UnknownFilterError {}

impl FromStr for VaccineFilter {
    type Err = UnknownFilterError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase().replace('_', "-");
        ALL_FILTERS
            .iter()
            .copied()
            .find(|filter| filter.as_str() == normalized)
            .ok_or_else(|| UnknownFilterError(value.to_string()))
    }
}

fn is_expiring_soon(vaccine: &Vaccine, now: DateTime<Utc>) -> bool {
    vaccine
        .days_until_renewal(now)
        .is_some_and(|days| days > 0 && days <= WARNING_WINDOW_DAYS)
}

/// Sort priority: 0 expired, 1 expiring soon, 2 everything else.
pub fn priority_rank(vaccine: &Vaccine, now: DateTime<Utc>) -> u8 {
    if vaccine.is_expired(now) {
        0
    } else if is_expiring_soon(vaccine, now) {
        1
    } else {
        2
    }
}

/// Total order for the visible list at `now`.
///
/// 1. priority rank ascending
/// 2. records with a renewal date first, earlier renewal date first
/// 3. more recent vaccination date first
/// 4. case-insensitive name ascending
///
/// Raw name and id break any remaining tie so the order stays total.
pub fn compare(a: &Vaccine, b: &Vaccine, now: DateTime<Utc>) -> Ordering {
    priority_rank(a, now)
        .cmp(&priority_rank(b, now))
        .then_with(|| compare_renewal_dates(a, b))
        .then_with(|| b.date.cmp(&a.date))
        .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        .then_with(|| a.name.cmp(&b.name))
        .then_with(|| a.id().cmp(&b.id()))
}

fn compare_renewal_dates(a: &Vaccine, b: &Vaccine) -> Ordering {
    match (a.renewal_date(), b.renewal_date()) {
        (Some(left), Some(right)) => left.cmp(&right),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Filters then sorts the stored collection into the visible sequence.
pub fn visible_vaccines(
    vaccines: &[Vaccine],
    filter: VaccineFilter,
    now: DateTime<Utc>,
) -> Vec<Vaccine> {
    let mut visible: Vec<Vaccine> = vaccines
        .iter()
        .filter(|vaccine| filter.matches(vaccine, now))
        .cloned()
        .collect();
    visible.sort_by(|a, b| compare(a, b, now));
    visible
}

#[cfg(test)]
mod tests {
    use super::{compare, priority_rank, VaccineFilter};
    use crate::model::vaccine::{Renewal, Vaccine};
    use chrono::{Duration, TimeZone, Utc};
    use std::cmp::Ordering;

    #[test]
    fn filter_keys_parse_and_round_trip() {
        for filter in VaccineFilter::all() {
            assert_eq!(filter.as_str().parse::<VaccineFilter>().unwrap(), *filter);
        }
        assert_eq!(
            "No_Renewal".parse::<VaccineFilter>().unwrap(),
            VaccineFilter::NoRenewal
        );
        assert!("soon".parse::<VaccineFilter>().is_err());
    }

    #[test]
    fn due_today_is_rank_two_unless_already_passed() {
        let now = Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, 0).unwrap();
        let date = now - Duration::days(100);
        let later_today = Vaccine::new("a", date, Renewal::RenewalOn(now + Duration::hours(2)));
        let earlier_today = Vaccine::new("b", date, Renewal::RenewalOn(now - Duration::hours(2)));

        assert_eq!(priority_rank(&later_today, now), 2);
        assert_eq!(priority_rank(&earlier_today, now), 0);
    }

    #[test]
    fn name_tiebreak_is_case_insensitive() {
        let now = Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, 0).unwrap();
        let date = now - Duration::days(10);
        let lower = Vaccine::new("alpha", date, Renewal::NoRenewal);
        let upper = Vaccine::new("Beta", date, Renewal::NoRenewal);
        assert_eq!(compare(&lower, &upper, now), Ordering::Less);
        assert_eq!(compare(&upper, &lower, now), Ordering::Greater);
    }

    #[test]
    fn identical_content_is_ordered_by_id() {
        let now = Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, 0).unwrap();
        let a = Vaccine::new("same", now, Renewal::NoRenewal);
        let b = Vaccine::new("same", now, Renewal::NoRenewal);
        assert_ne!(compare(&a, &b, now), Ordering::Equal);
        assert_eq!(compare(&a, &a, now), Ordering::Equal);
    }
}
