//! Recognized insurance carriers

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the six carriers the eligibility engine can verify against
///
/// Matching is by exact display name; anything else is an unrecognized
/// carrier.
///
/// # Examples
///
/// ```
/// use eligo::domain::InsuranceCarrier;
///
/// assert_eq!(InsuranceCarrier::recognize("Cigna"), Some(InsuranceCarrier::Cigna));
/// assert_eq!(InsuranceCarrier::recognize("cigna"), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InsuranceCarrier {
    #[serde(rename = "UnitedHealthCare")]
    UnitedHealthCare,
    #[serde(rename = "Elevance Health")]
    ElevanceHealth,
    #[serde(rename = "Kaiser Permanente")]
    KaiserPermanente,
    #[serde(rename = "Cigna")]
    Cigna,
    #[serde(rename = "Molina Healthcare")]
    MolinaHealthcare,
    #[serde(rename = "BlueCross BlueShield")]
    BlueCrossBlueShield,
}

impl InsuranceCarrier {
    /// All recognized carriers
    pub const ALL: [InsuranceCarrier; 6] = [
        InsuranceCarrier::UnitedHealthCare,
        InsuranceCarrier::ElevanceHealth,
        InsuranceCarrier::KaiserPermanente,
        InsuranceCarrier::Cigna,
        InsuranceCarrier::MolinaHealthcare,
        InsuranceCarrier::BlueCrossBlueShield,
    ];

    /// Display name used in requests and stored records
    pub fn name(&self) -> &'static str {
        match self {
            InsuranceCarrier::UnitedHealthCare => "UnitedHealthCare",
            InsuranceCarrier::ElevanceHealth => "Elevance Health",
            InsuranceCarrier::KaiserPermanente => "Kaiser Permanente",
            InsuranceCarrier::Cigna => "Cigna",
            InsuranceCarrier::MolinaHealthcare => "Molina Healthcare",
            InsuranceCarrier::BlueCrossBlueShield => "BlueCross BlueShield",
        }
    }

    /// Looks up a carrier by exact display name
    pub fn recognize(company: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|carrier| carrier.name() == company)
    }
}

impl fmt::Display for InsuranceCarrier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for InsuranceCarrier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::recognize(s).ok_or_else(|| format!("Unrecognized insurance company: {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_carriers_round_trip_by_name() {
        for carrier in InsuranceCarrier::ALL {
            assert_eq!(InsuranceCarrier::recognize(carrier.name()), Some(carrier));
        }
    }

    #[test]
    fn test_unrecognized_names() {
        assert!(InsuranceCarrier::recognize("HealthPlan USA").is_none());
        assert!(InsuranceCarrier::recognize("").is_none());
        assert!(InsuranceCarrier::recognize(" Cigna").is_none());
        assert!("Aetna".parse::<InsuranceCarrier>().is_err());
    }

    #[test]
    fn test_serde_uses_display_name() {
        let json = serde_json::to_string(&InsuranceCarrier::BlueCrossBlueShield).unwrap();
        assert_eq!(json, "\"BlueCross BlueShield\"");
    }
}
