//! Body composition engine
//!
//! Derives fat-free mass, body water compartments, cell mass, basal
//! metabolic rate, BMI and diagnostic ratios from body weight and fat
//! percentage (optionally height and gender).
//!
//! # Design Principles
//!
//! 1. **Pure Functions**: No state, no I/O, identical input gives identical output
//! 2. **Round Last**: Every quantity is derived from unrounded values, rounding happens once
//! 3. **Absent, Not Zero**: Quantities that cannot be computed are `None`

use crate::errors::CompositionError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fraction of total body water that is intracellular
pub const ICW_FRACTION: f64 = 0.60;

/// Fraction of fat-free mass that is body cell mass
pub const BCM_FRACTION: f64 = 0.75;

/// Cunningham-style BMR intercept (kcal/day)
pub const BMR_INTERCEPT_KCAL: f64 = 500.0;

/// Cunningham-style BMR slope (kcal/day per kg of FFM)
pub const BMR_KCAL_PER_KG_FFM: f64 = 22.0;

// ============================================================================
// Input Types
// ============================================================================

/// Gender used for physiological reference values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Fraction of fat-free mass that is water for this gender
    pub fn water_fraction(&self) -> f64 {
        match self {
            Gender::Male => 0.74,
            Gender::Female => 0.72,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" => Ok(Gender::Male),
            "female" | "f" => Ok(Gender::Female),
            _ => Err(format!("Unknown gender: {}", s)),
        }
    }
}

/// Water fraction of FFM, falling back to the mean when gender is unknown
pub fn water_fraction(gender: Option<Gender>) -> f64 {
    gender.map_or(0.73, |g| g.water_fraction())
}

/// Anthropometric input to the engine
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompositionInput {
    /// Body weight in kg
    pub body_weight_kg: f64,
    /// Fat mass as a percentage of body weight
    pub fat_percentage: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height_cm: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    /// Carried through for callers; no formula uses it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<f64>,
}

impl CompositionInput {
    pub fn new(body_weight_kg: f64, fat_percentage: f64) -> Self {
        Self {
            body_weight_kg,
            fat_percentage,
            height_cm: None,
            gender: None,
            age: None,
        }
    }

    pub fn with_height_cm(mut self, height_cm: f64) -> Self {
        self.height_cm = Some(height_cm);
        self
    }

    pub fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = Some(gender);
        self
    }

    pub fn with_age(mut self, age: f64) -> Self {
        self.age = Some(age);
        self
    }

    /// Check the preconditions of [`calculate`]
    pub fn validate(&self) -> Result<(), CompositionError> {
        if !self.body_weight_kg.is_finite() {
            return Err(CompositionError::invalid(
                "body_weight_kg",
                "must be a finite number",
            ));
        }
        if self.body_weight_kg <= 0.0 {
            return Err(CompositionError::invalid(
                "body_weight_kg",
                "must be greater than 0",
            ));
        }
        if !self.fat_percentage.is_finite() {
            return Err(CompositionError::invalid(
                "fat_percentage",
                "must be a finite number",
            ));
        }
        if !(0.0..=100.0).contains(&self.fat_percentage) {
            return Err(CompositionError::invalid(
                "fat_percentage",
                "must be between 0 and 100",
            ));
        }
        Ok(())
    }
}

// ============================================================================
// Result Types
// ============================================================================

/// Unrounded engine output
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawComposition {
    pub ffm: f64,
    pub tbw: f64,
    pub icw: f64,
    pub ecw: f64,
    pub bcm: f64,
    pub ecm: f64,
    pub bmr: f64,
    pub bmi: Option<f64>,
    pub ecw_icw_ratio: Option<f64>,
    pub tbw_ffm_ratio: Option<f64>,
}

/// Derived body composition, rounded for display
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompositionResult {
    /// Fat-free mass (kg)
    pub ffm: f64,
    /// Total body water (L)
    pub tbw: f64,
    /// Intracellular water (L)
    pub icw: f64,
    /// Extracellular water (L)
    pub ecw: f64,
    /// Body cell mass (kg)
    pub bcm: f64,
    /// Extracellular mass (kg)
    pub ecm: f64,
    /// Basal metabolic rate (kcal/day), whole kilocalories
    pub bmr: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bmi: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ecw_icw_ratio: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tbw_ffm_ratio: Option<f64>,
}

impl From<RawComposition> for CompositionResult {
    fn from(raw: RawComposition) -> Self {
        Self {
            ffm: round_to(raw.ffm, 1),
            tbw: round_to(raw.tbw, 1),
            icw: round_to(raw.icw, 1),
            ecw: round_to(raw.ecw, 1),
            bcm: round_to(raw.bcm, 1),
            ecm: round_to(raw.ecm, 1),
            bmr: round_half_up(raw.bmr),
            bmi: raw.bmi.map(|v| round_to(v, 1)),
            ecw_icw_ratio: raw.ecw_icw_ratio.map(|v| round_to(v, 2)),
            tbw_ffm_ratio: raw.tbw_ffm_ratio.map(|v| round_to(v, 2)),
        }
    }
}

// ============================================================================
// Calculations
// ============================================================================

/// Round half up to the nearest integer
///
/// Compares the fractional part directly, so values just below one half
/// round down.
pub fn round_half_up(value: f64) -> f64 {
    let floor = value.floor();
    if value - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

/// Round half up to `decimals` decimal places
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    round_half_up(value * scale) / scale
}

/// Calculate BMI from weight (kg) and height (cm)
///
/// Formula: BMI = weight(kg) / height(m)²
pub fn calculate_bmi(weight_kg: f64, height_cm: f64) -> f64 {
    let height_m = height_cm / 100.0;
    weight_kg / (height_m * height_m)
}

/// Run the engine without rounding
///
/// Ratios are `None` when fat-free mass is zero (100% fat), since both
/// denominators vanish.
pub fn calculate_raw(input: &CompositionInput) -> Result<RawComposition, CompositionError> {
    input.validate()?;

    let weight = input.body_weight_kg;
    let ffm = weight - weight * (input.fat_percentage / 100.0);

    let tbw = water_fraction(input.gender) * ffm;
    let icw = ICW_FRACTION * tbw;
    let ecw = tbw - icw;

    let bcm = BCM_FRACTION * ffm;
    let ecm = ffm - bcm;

    let bmr = BMR_INTERCEPT_KCAL + BMR_KCAL_PER_KG_FFM * ffm;

    let bmi = input
        .height_cm
        .filter(|h| h.is_finite() && *h > 0.0)
        .map(|h| calculate_bmi(weight, h));

    let (ecw_icw_ratio, tbw_ffm_ratio) = if ffm > 0.0 {
        (Some(ecw / icw), Some(tbw / ffm))
    } else {
        (None, None)
    };

    Ok(RawComposition {
        ffm,
        tbw,
        icw,
        ecw,
        bcm,
        ecm,
        bmr,
        bmi,
        ecw_icw_ratio,
        tbw_ffm_ratio,
    })
}

/// Calculate body composition from anthropometric input
pub fn calculate(input: &CompositionInput) -> Result<CompositionResult, CompositionError> {
    calculate_raw(input).map(CompositionResult::from)
}
