//! Categorical labels derived from ward socioeconomic fields.
//!
//! Each enum is a closed vocabulary whose `Display` form is the exact label
//! the API has always reported ("Very High", "Low Density", "No Data", ...).
//! The threshold logic that produces these labels lives on
//! [`crate::Ward`].

use strum_macros::{AsRefStr, Display};

/// Level label shared by the poverty, youth unemployment, and slum housing
/// indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr)]
pub enum IndicatorLevel {
    /// Source field absent (or zero, treated as absent).
    Unknown,
    Low,
    Medium,
    High,
    #[strum(serialize = "Very High")]
    VeryHigh,
}

/// Population density category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr)]
pub enum DensityCategory {
    /// Source field absent (or zero, treated as absent).
    Unknown,
    #[strum(serialize = "Low Density")]
    Low,
    #[strum(serialize = "Medium Density")]
    Medium,
    #[strum(serialize = "High Density")]
    High,
    #[strum(serialize = "Very High Density")]
    VeryHigh,
}

/// Average-education level category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr)]
pub enum EducationLevel {
    /// Source field absent (or zero, treated as absent).
    Unknown,
    #[strum(serialize = "Very Low")]
    VeryLow,
    Low,
    Medium,
    High,
}

/// Protest density level.
///
/// Unlike the other indicators, a stored value of exactly zero is
/// meaningful here and maps to [`Self::None`]; only an absent field maps to
/// [`Self::NoData`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr)]
pub enum ProtestDensityLevel {
    #[strum(serialize = "No Data")]
    NoData,
    None,
    Low,
    Medium,
    High,
    #[strum(serialize = "Very High")]
    VeryHigh,
}

impl ProtestDensityLevel {
    /// Returns all variants in reporting order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::None,
            Self::Low,
            Self::Medium,
            Self::High,
            Self::VeryHigh,
            Self::NoData,
        ]
    }
}

/// Composite risk assessment label for a ward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr)]
pub enum RiskLevel {
    /// No contributing factor had a usable value.
    Unknown,
    #[strum(serialize = "Low Risk")]
    Low,
    #[strum(serialize = "Medium Risk")]
    Medium,
    #[strum(serialize = "High Risk")]
    High,
    #[strum(serialize = "Critical Risk")]
    Critical,
}

impl RiskLevel {
    /// Returns all variants in reporting order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Low,
            Self::Medium,
            Self::High,
            Self::Critical,
            Self::Unknown,
        ]
    }
}
