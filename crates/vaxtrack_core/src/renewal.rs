//! Renewal interval arithmetic.
//!
//! # Responsibility
//! - Turn a vaccination date plus a `(years, months)` interval into an
//!   absolute renewal date.
//! - Recover the editable interval from a stored renewal date.
//! - Count civil days between two instants.
//!
//! # Invariants
//! - Month arithmetic is calendar-aware; day-of-month is clamped to the end
//!   of the target month (Jan 31 + 1 month = Feb 28/29).
//! - `decompose_interval(d, compute_renewal_date(d, y, m)) == (y, m)` for
//!   every base date and every non-negative interval.
//! - Calendar fields are evaluated in UTC.

use chrono::{DateTime, Months, Utc};

/// Largest year value offered by the interval picker.
pub const MAX_RENEWAL_YEARS: u32 = 50;
/// Largest month value offered by the interval picker.
pub const MAX_RENEWAL_MONTHS: u32 = 11;

/// Editable renewal interval, as chosen in the form pickers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct RenewalInterval {
    pub years: u32,
    pub months: u32,
}

impl RenewalInterval {
    pub fn new(years: u32, months: u32) -> Self {
        Self { years, months }
    }

    /// A fully-zero interval is never a valid renewal setting.
    pub fn is_empty(self) -> bool {
        self.years == 0 && self.months == 0
    }

    /// Whether both fields are inside picker bounds.
    pub fn is_within_picker_bounds(self) -> bool {
        self.years <= MAX_RENEWAL_YEARS && self.months <= MAX_RENEWAL_MONTHS
    }

    /// Total interval length in calendar months.
    pub fn total_months(self) -> u32 {
        self.years.saturating_mul(12).saturating_add(self.months)
    }

    /// Applies this interval to `base`.
    pub fn apply(self, base: DateTime<Utc>) -> DateTime<Utc> {
        compute_renewal_date(base, self.years, self.months)
    }

    /// Recovers the interval that separates `base` from `renewal_date`.
    pub fn between(base: DateTime<Utc>, renewal_date: DateTime<Utc>) -> Self {
        let (years, months) = decompose_interval(base, renewal_date);
        Self { years, months }
    }

    /// Short human summary used next to the interval picker.
    ///
    /// Empty string for an empty interval.
    pub fn summary(self) -> String {
        match (self.years, self.months) {
            (0, 0) => String::new(),
            (0, months) => format!("{months} {}", plural(months, "month", "months")),
            (years, 0) => format!("{years} {}", plural(years, "year", "years")),
            (years, months) => format!(
                "{years} {} and {months} {}",
                plural(years, "year", "years"),
                plural(months, "month", "months")
            ),
        }
    }
}

/// Adds `years` years and `months` months to `base`.
///
/// Saturates at chrono's representable range instead of failing.
pub fn compute_renewal_date(base: DateTime<Utc>, years: u32, months: u32) -> DateTime<Utc> {
    let total = years.saturating_mul(12).saturating_add(months);
    base.checked_add_months(Months::new(total))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// Whole civil days from `now` to `date`; negative when `date` is in the past.
pub fn days_until(date: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (date.date_naive() - now.date_naive()).num_days()
}

/// Splits the calendar distance between `base` and `renewal_date` into
/// `(years, months)`.
///
/// Counts the largest number of whole months `n` such that adding `n` months
/// to `base` does not pass `renewal_date`. Returns `(0, 0)` when
/// `renewal_date` precedes `base`.
pub fn decompose_interval(base: DateTime<Utc>, renewal_date: DateTime<Utc>) -> (u32, u32) {
    if renewal_date <= base {
        return (0, 0);
    }

    let base_index = month_index(base);
    let renewal_index = month_index(renewal_date);
    let mut total = u32::try_from(renewal_index - base_index).unwrap_or(0);

    while total > 0 {
        match base.checked_add_months(Months::new(total)) {
            Some(candidate) if candidate <= renewal_date => break,
            _ => total -= 1,
        }
    }

    (total / 12, total % 12)
}

fn month_index(value: DateTime<Utc>) -> i64 {
    use chrono::Datelike;
    i64::from(value.year()) * 12 + i64::from(value.month0())
}

fn plural<'a>(count: u32, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 {
        one
    } else {
        many
    }
}
