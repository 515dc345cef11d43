//! Vaccine domain model.
//!
//! # Responsibility
//! - Define the canonical vaccination record.
//! - Expose derived status properties evaluated against an explicit `now`.
//!
//! # Invariants
//! - `id` is assigned once and never changes for the record lifetime.
//! - Derived properties are never stored; they are recomputed on every read.
//! - The optional renewal date is modelled as `Renewal`, not as a bare
//!   `Option`, so every derived view goes through `derive_status`.

use super::status::{derive_status, AttentionLevel, StatusProjection, VaccineCategory};
use crate::renewal::days_until;
use chrono::{DateTime, Locale, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a vaccine record, also used as reminder key.
pub type VaccineId = Uuid;

/// Renewal tracking state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Renewal {
    #[default]
    NoRenewal,
    RenewalOn(DateTime<Utc>),
}

impl Renewal {
    pub fn from_option(date: Option<DateTime<Utc>>) -> Self {
        date.map_or(Self::NoRenewal, Self::RenewalOn)
    }

    pub fn date(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::NoRenewal => None,
            Self::RenewalOn(date) => Some(*date),
        }
    }
}

/// Follow-up the detail view offers for an entry needing attention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestedAction {
    /// Renewal date has passed.
    FixRenewal,
    /// Renewal date is within the warning window.
    UpdateRenewal,
}

impl SuggestedAction {
    pub fn label(self) -> &'static str {
        match self {
            Self::FixRenewal => "Fix renewal",
            Self::UpdateRenewal => "Update renewal",
        }
    }
}

/// One recorded vaccination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "VaccineRecord", into = "VaccineRecord")]
pub struct Vaccine {
    id: VaccineId,
    pub name: String,
    /// Vaccination date.
    pub date: DateTime<Utc>,
    pub renewal: Renewal,
}

/// Serialized shape: `{id, name, date, renewalDate?}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VaccineRecord {
    id: Uuid,
    name: String,
    date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    renewal_date: Option<DateTime<Utc>>,
}

impl From<VaccineRecord> for Vaccine {
    fn from(value: VaccineRecord) -> Self {
        Self {
            id: value.id,
            name: value.name,
            date: value.date,
            renewal: Renewal::from_option(value.renewal_date),
        }
    }
}

impl From<Vaccine> for VaccineRecord {
    fn from(value: Vaccine) -> Self {
        Self {
            id: value.id,
            renewal_date: value.renewal.date(),
            name: value.name,
            date: value.date,
        }
    }
}

impl Vaccine {
    /// Creates a record with a freshly generated id.
    pub fn new(name: impl Into<String>, date: DateTime<Utc>, renewal: Renewal) -> Self {
        Self::with_id(Uuid::new_v4(), name, date, renewal)
    }

    /// Creates a record with a caller-provided id.
    ///
    /// Used by the edit flow, where the replacement must keep the identity of
    /// the record it replaces.
    pub fn with_id(
        id: VaccineId,
        name: impl Into<String>,
        date: DateTime<Utc>,
        renewal: Renewal,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            date,
            renewal,
        }
    }

    pub fn id(&self) -> VaccineId {
        self.id
    }

    pub fn renewal_date(&self) -> Option<DateTime<Utc>> {
        self.renewal.date()
    }

    pub fn has_renewal(&self) -> bool {
        matches!(self.renewal, Renewal::RenewalOn(_))
    }

    pub fn days_until_renewal(&self, now: DateTime<Utc>) -> Option<i64> {
        self.renewal_date().map(|date| days_until(date, now))
    }

    /// True iff a renewal date exists and lies strictly before `now`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.renewal_date().is_some_and(|date| date < now)
    }

    pub fn status(&self, now: DateTime<Utc>) -> StatusProjection {
        derive_status(&self.renewal, now)
    }

    pub fn attention_level(&self, now: DateTime<Utc>) -> AttentionLevel {
        self.status(now).attention
    }

    pub fn category(&self) -> VaccineCategory {
        VaccineCategory::from_name(&self.name)
    }

    pub fn icon_name(&self) -> &'static str {
        self.category().icon_name()
    }

    pub fn color(&self) -> &'static str {
        self.category().color()
    }

    /// Renewal month and year, e.g. `March 2027`, in the given display locale.
    pub fn renewal_month_year_text(&self, locale: Locale) -> Option<String> {
        self.renewal_date()
            .map(|date| date.format_localized("%B %Y", locale).to_string())
    }

    /// One-line renewal summary for list rows and the detail header.
    pub fn renewal_subtitle(&self, now: DateTime<Utc>, locale: Locale) -> String {
        let (Some(days), Some(month_year)) = (
            self.days_until_renewal(now),
            self.renewal_month_year_text(locale),
        ) else {
            return "—".to_string();
        };

        match AttentionLevel::from_days(Some(days)) {
            AttentionLevel::Overdue => format!("Expired {month_year}"),
            AttentionLevel::Warning => format!("{days} days left"),
            AttentionLevel::None => format!("Renews {month_year}"),
        }
    }

    pub fn suggested_action(&self, now: DateTime<Utc>) -> Option<SuggestedAction> {
        if !self.has_renewal() {
            return None;
        }
        if self.is_expired(now) {
            return Some(SuggestedAction::FixRenewal);
        }
        match self.attention_level(now) {
            AttentionLevel::Warning => Some(SuggestedAction::UpdateRenewal),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Renewal, SuggestedAction, Vaccine};
    use chrono::{Duration, Locale, TimeZone, Utc};

    #[test]
    fn new_assigns_distinct_ids() {
        let date = Utc.with_ymd_and_hms(2024, 4, 2, 8, 0, 0).unwrap();
        let a = Vaccine::new("TBE", date, Renewal::NoRenewal);
        let b = Vaccine::new("TBE", date, Renewal::NoRenewal);
        assert_ne!(a.id(), b.id());
        assert!(!a.id().is_nil());
    }

    #[test]
    fn expired_is_strict_instant_comparison() {
        let now = Utc.with_ymd_and_hms(2025, 2, 1, 12, 0, 0).unwrap();
        let date = now - Duration::days(400);
        let later_today = Vaccine::new("x", date, Renewal::RenewalOn(now + Duration::hours(1)));
        let exactly_now = Vaccine::new("x", date, Renewal::RenewalOn(now));
        let earlier = Vaccine::new("x", date, Renewal::RenewalOn(now - Duration::seconds(1)));

        assert!(!later_today.is_expired(now));
        assert!(!exactly_now.is_expired(now));
        assert!(earlier.is_expired(now));
        assert!(!Vaccine::new("x", date, Renewal::NoRenewal).is_expired(now));
    }

    #[test]
    fn subtitle_and_action_follow_attention() {
        let now = Utc.with_ymd_and_hms(2025, 2, 1, 12, 0, 0).unwrap();
        let date = now - Duration::days(400);

        let overdue = Vaccine::new("x", date, Renewal::RenewalOn(now - Duration::days(3)));
        assert_eq!(overdue.renewal_subtitle(now, Locale::en_US), "Expired January 2025");
        assert_eq!(overdue.suggested_action(now), Some(SuggestedAction::FixRenewal));

        let soon = Vaccine::new("x", date, Renewal::RenewalOn(now + Duration::days(12)));
        assert_eq!(soon.renewal_subtitle(now, Locale::en_US), "12 days left");
        assert_eq!(soon.suggested_action(now), Some(SuggestedAction::UpdateRenewal));

        let later = Vaccine::new("x", date, Renewal::RenewalOn(now + Duration::days(120)));
        assert_eq!(later.renewal_subtitle(now, Locale::en_US), "Renews June 2025");
        assert_eq!(later.suggested_action(now), None);

        let none = Vaccine::new("x", date, Renewal::NoRenewal);
        assert_eq!(none.renewal_subtitle(now, Locale::en_US), "—");
        assert_eq!(none.suggested_action(now), None);
    }

    #[test]
    fn month_year_text_passes_locale_through() {
        let date = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let renewal = Utc.with_ymd_and_hms(2026, 3, 10, 0, 0, 0).unwrap();
        let vaccine = Vaccine::new("x", date, Renewal::RenewalOn(renewal));
        assert_eq!(
            vaccine.renewal_month_year_text(Locale::en_US).as_deref(),
            Some("March 2026")
        );
        assert_eq!(
            vaccine.renewal_month_year_text(Locale::sv_SE).as_deref(),
            Some("mars 2026")
        );
    }
}
