//! Status and presentation projections derived from a vaccine.
//!
//! # Responsibility
//! - Classify renewal urgency into an attention level.
//! - Map that classification onto stable status/icon/color identifiers that
//!   the presentation layer can render however it likes.
//!
//! # Invariants
//! - One derivation function (`derive_status`) owns every threshold; callers
//!   never re-check the optional renewal date themselves.
//! - Day 0 is `Warning`, never `Overdue`.

use super::vaccine::Renewal;
use crate::renewal::days_until;
use chrono::{DateTime, Utc};

/// Renewals due within this many days (inclusive) need attention.
pub const WARNING_WINDOW_DAYS: i64 = 30;

/// Tri-state urgency classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttentionLevel {
    None,
    Warning,
    Overdue,
}

impl AttentionLevel {
    /// Classifies a signed day count; `None` input means no renewal tracked.
    pub fn from_days(days_until_renewal: Option<i64>) -> Self {
        match days_until_renewal {
            None => Self::None,
            Some(days) if days < 0 => Self::Overdue,
            Some(days) if days <= WARNING_WINDOW_DAYS => Self::Warning,
            Some(_) => Self::None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Warning => "warning",
            Self::Overdue => "overdue",
        }
    }
}

/// Row status shown next to a vaccine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VaccineStatus {
    /// No renewal is tracked; the vaccination is considered valid.
    ValidNoRenewal,
    Valid,
    RenewsSoon,
    Overdue,
}

impl VaccineStatus {
    /// Stable identifier for scripting and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ValidNoRenewal => "valid_no_renewal",
            Self::Valid => "valid",
            Self::RenewsSoon => "renews_soon",
            Self::Overdue => "overdue",
        }
    }

    /// User-facing status text.
    pub fn label(self) -> &'static str {
        match self {
            Self::ValidNoRenewal => "Valid (no renewal)",
            Self::Valid => "Valid",
            Self::RenewsSoon => "Renews soon",
            Self::Overdue => "Overdue",
        }
    }

    pub fn icon(self) -> StatusIcon {
        match self {
            Self::ValidNoRenewal | Self::Valid => StatusIcon::Ok,
            Self::RenewsSoon => StatusIcon::Clock,
            Self::Overdue => StatusIcon::Overdue,
        }
    }

    pub fn color(self) -> StatusColor {
        match self {
            Self::ValidNoRenewal | Self::Valid => StatusColor::NeutralPositive,
            Self::RenewsSoon => StatusColor::Caution,
            Self::Overdue => StatusColor::Danger,
        }
    }
}

/// Status glyph identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusIcon {
    Ok,
    Clock,
    Overdue,
}

impl StatusIcon {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Clock => "clock",
            Self::Overdue => "overdue",
        }
    }
}

/// Semantic color role; the UI picks the concrete palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusColor {
    NeutralPositive,
    Caution,
    Danger,
}

impl StatusColor {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NeutralPositive => "neutral_positive",
            Self::Caution => "caution",
            Self::Danger => "danger",
        }
    }
}

/// Everything a row needs to render its status, derived in one place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusProjection {
    pub status: VaccineStatus,
    pub icon: StatusIcon,
    pub color: StatusColor,
    pub attention: AttentionLevel,
    pub days_until_renewal: Option<i64>,
}

/// Maps a renewal setting to its status projection at `now`.
pub fn derive_status(renewal: &Renewal, now: DateTime<Utc>) -> StatusProjection {
    let days = match renewal {
        Renewal::NoRenewal => None,
        Renewal::RenewalOn(date) => Some(days_until(*date, now)),
    };
    let attention = AttentionLevel::from_days(days);
    let status = match (days, attention) {
        (None, _) => VaccineStatus::ValidNoRenewal,
        (Some(_), AttentionLevel::Overdue) => VaccineStatus::Overdue,
        (Some(_), AttentionLevel::Warning) => VaccineStatus::RenewsSoon,
        (Some(_), AttentionLevel::None) => VaccineStatus::Valid,
    };

    StatusProjection {
        status,
        icon: status.icon(),
        color: status.color(),
        attention,
        days_until_renewal: days,
    }
}

/// Presentation category inferred from the vaccine name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VaccineCategory {
    Covid,
    Tbe,
    Influenza,
    Other,
}

const CATEGORY_KEYWORDS: &[(&str, VaccineCategory)] = &[
    ("covid", VaccineCategory::Covid),
    ("tbe", VaccineCategory::Tbe),
    ("influensa", VaccineCategory::Influenza),
];

impl VaccineCategory {
    /// Case-insensitive keyword match; first keyword in table order wins.
    pub fn from_name(name: &str) -> Self {
        let lowered = name.to_lowercase();
        CATEGORY_KEYWORDS
            .iter()
            .find(|(keyword, _)| lowered.contains(keyword))
            .map_or(Self::Other, |(_, category)| *category)
    }

    pub fn icon_name(self) -> &'static str {
        match self {
            Self::Covid => "allergens",
            Self::Tbe => "ant",
            Self::Influenza => "thermometer",
            Self::Other => "syringe",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Self::Covid => "purple",
            Self::Tbe => "green",
            Self::Influenza => "orange",
            Self::Other => "blue",
        }
    }
}
