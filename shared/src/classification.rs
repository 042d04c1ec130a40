//! Classification of body composition metrics
//!
//! Maps a metric to a category with a human-readable label and a severity
//! that front-ends use as a display hint. Every classifier is total: any
//! real number is accepted, including physiologically implausible ones.

use crate::body_composition::Gender;
use crate::reference_values::{FatPercentageBands, RatioReference, ReferenceValues};
use serde::{Deserialize, Serialize};

/// How concerning a category is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Normal,
    Warning,
    Danger,
}

impl Severity {
    /// Display colour for this severity
    pub fn color(&self) -> &'static str {
        match self {
            Severity::Info => "blue",
            Severity::Normal => "green",
            Severity::Warning => "yellow",
            Severity::Danger => "red",
        }
    }
}

/// Label and severity for a classified metric
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub label: String,
    pub severity: Severity,
}

impl Classification {
    fn new(label: &str, severity: Severity) -> Self {
        Self {
            label: label.to_string(),
            severity,
        }
    }
}

// ============================================================================
// BMI
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    /// Half-open BMI range for this category
    pub fn range(&self) -> (f64, f64) {
        match self {
            BmiCategory::Underweight => (0.0, 18.5),
            BmiCategory::Normal => (18.5, 25.0),
            BmiCategory::Overweight => (25.0, 30.0),
            BmiCategory::Obese => (30.0, f64::INFINITY),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            BmiCategory::Underweight => Severity::Info,
            BmiCategory::Normal => Severity::Normal,
            BmiCategory::Overweight => Severity::Warning,
            BmiCategory::Obese => Severity::Danger,
        }
    }
}

impl From<BmiCategory> for Classification {
    fn from(category: BmiCategory) -> Self {
        Classification::new(category.label(), category.severity())
    }
}

/// Classify BMI into category
pub fn classify_bmi(bmi: f64) -> BmiCategory {
    if bmi < 18.5 {
        BmiCategory::Underweight
    } else if bmi < 25.0 {
        BmiCategory::Normal
    } else if bmi < 30.0 {
        BmiCategory::Overweight
    } else {
        BmiCategory::Obese
    }
}

// ============================================================================
// Fat Percentage
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FatPercentageCategory {
    VeryLow,
    Normal,
    High,
    VeryHigh,
}

impl FatPercentageCategory {
    pub fn label(&self) -> &'static str {
        match self {
            FatPercentageCategory::VeryLow => "Very Low",
            FatPercentageCategory::Normal => "Normal",
            FatPercentageCategory::High => "High",
            FatPercentageCategory::VeryHigh => "Very High",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            FatPercentageCategory::VeryLow => Severity::Info,
            FatPercentageCategory::Normal => Severity::Normal,
            FatPercentageCategory::High => Severity::Warning,
            FatPercentageCategory::VeryHigh => Severity::Danger,
        }
    }
}

impl From<FatPercentageCategory> for Classification {
    fn from(category: FatPercentageCategory) -> Self {
        Classification::new(category.label(), category.severity())
    }
}

impl FatPercentageBands {
    /// Classify against these bands
    ///
    /// Checks run in a fixed order: very low, normal, very high, then high
    /// for whatever remains. With overlapping bands the earlier check wins.
    pub fn classify(&self, fat_percentage: f64) -> FatPercentageCategory {
        let (normal_min, normal_max) = self.normal;
        if fat_percentage < self.low {
            FatPercentageCategory::VeryLow
        } else if fat_percentage >= normal_min && fat_percentage <= normal_max {
            FatPercentageCategory::Normal
        } else if fat_percentage > self.high {
            FatPercentageCategory::VeryHigh
        } else {
            FatPercentageCategory::High
        }
    }
}

/// Classify fat percentage with the standard bands for `gender`
pub fn classify_fat_percentage(fat_percentage: f64, gender: Gender) -> FatPercentageCategory {
    ReferenceValues::standard()
        .fat_percentage
        .for_gender(gender)
        .classify(fat_percentage)
}

// ============================================================================
// Diagnostic Ratios
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatioStatus {
    Low,
    Normal,
    Elevated,
}

impl RatioStatus {
    pub fn label(&self) -> &'static str {
        match self {
            RatioStatus::Low => "Low",
            RatioStatus::Normal => "Normal",
            RatioStatus::Elevated => "Elevated",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            RatioStatus::Low => Severity::Info,
            RatioStatus::Normal => Severity::Normal,
            RatioStatus::Elevated => Severity::Danger,
        }
    }
}

impl From<RatioStatus> for Classification {
    fn from(status: RatioStatus) -> Self {
        Classification::new(status.label(), status.severity())
    }
}

impl RatioReference {
    pub fn classify(&self, ratio: f64) -> RatioStatus {
        let (min, max) = self.normal;
        if ratio >= min && ratio <= max {
            RatioStatus::Normal
        } else if ratio > max {
            RatioStatus::Elevated
        } else {
            RatioStatus::Low
        }
    }
}

/// Classify the ECW/ICW ratio (hydration status)
pub fn classify_ecw_icw_ratio(ratio: f64) -> RatioStatus {
    ReferenceValues::standard().ecw_icw_ratio.classify(ratio)
}

/// Classify the TBW/FFM ratio (tissue hydration)
pub fn classify_tbw_ffm_ratio(ratio: f64) -> RatioStatus {
    ReferenceValues::standard().tbw_ffm_ratio.classify(ratio)
}
