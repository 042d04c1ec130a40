//! Clinical reference values used to interpret body composition results

use crate::body_composition::Gender;
use serde::{Deserialize, Serialize};

/// Fat percentage bands for one gender
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FatPercentageBands {
    /// Values below this are "very low"
    pub low: f64,
    /// Inclusive normal band
    pub normal: (f64, f64),
    /// Values above this are "very high"
    pub high: f64,
}

/// Fat percentage bands per gender
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FatPercentageReference {
    pub male: FatPercentageBands,
    pub female: FatPercentageBands,
}

impl FatPercentageReference {
    pub fn for_gender(&self, gender: Gender) -> &FatPercentageBands {
        match gender {
            Gender::Male => &self.male,
            Gender::Female => &self.female,
        }
    }
}

/// A ratio with an inclusive normal band
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatioReference {
    pub normal: (f64, f64),
}

/// Visceral fat rating reference
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VisceralFatReference {
    pub normal: (f64, f64),
    pub high: f64,
}

/// The full reference table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReferenceValues {
    pub fat_percentage: FatPercentageReference,
    /// Tissue hydration
    pub tbw_ffm_ratio: RatioReference,
    /// Hydration status; elevated values suggest oedema or inflammation
    pub ecw_icw_ratio: RatioReference,
    pub visceral_fat: VisceralFatReference,
}

/// Standard adult reference values
pub const STANDARD_REFERENCE_VALUES: ReferenceValues = ReferenceValues {
    fat_percentage: FatPercentageReference {
        male: FatPercentageBands {
            low: 10.0,
            normal: (10.0, 20.0),
            high: 25.0,
        },
        female: FatPercentageBands {
            low: 16.0,
            normal: (16.0, 30.0),
            high: 35.0,
        },
    },
    tbw_ffm_ratio: RatioReference {
        normal: (0.70, 0.75),
    },
    ecw_icw_ratio: RatioReference {
        normal: (0.60, 0.70),
    },
    visceral_fat: VisceralFatReference {
        normal: (1.0, 9.0),
        high: 10.0,
    },
};

impl ReferenceValues {
    pub fn standard() -> &'static ReferenceValues {
        &STANDARD_REFERENCE_VALUES
    }
}

impl Default for ReferenceValues {
    fn default() -> Self {
        STANDARD_REFERENCE_VALUES
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bands_by_gender() {
        let reference = ReferenceValues::standard();
        let male = reference.fat_percentage.for_gender(Gender::Male);
        let female = reference.fat_percentage.for_gender(Gender::Female);
        assert_eq!(male.normal, (10.0, 20.0));
        assert_eq!(female.high, 35.0);
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(ReferenceValues::standard()).unwrap();
        assert_eq!(json["fat_percentage"]["male"]["low"], 10.0);
        assert_eq!(json["ecw_icw_ratio"]["normal"][1], 0.70);
        assert_eq!(json["visceral_fat"]["high"], 10.0);
    }
}
