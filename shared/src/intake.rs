//! Patient intake form model
//!
//! The practitioner's form keeps every numeric field as free text, exactly
//! as typed. This module turns that text into engine input and keeps the
//! derived body composition in step with it.

use crate::body_composition::{calculate, CompositionInput, CompositionResult, Gender};
use crate::progress::ProgressEntry;
use crate::validation::{
    parse_optional_number, validate_age, validate_body_weight, validate_circumference_cm,
    validate_fat_percentage, validate_height_cm, ValidationError,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

// ============================================================================
// Anthropometric Measurements
// ============================================================================

/// Body circumferences as typed into the form (cm)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnthropometricMeasurements {
    pub arm: String,
    pub wrist: String,
    pub chest: String,
    pub shoulders: String,
    pub waist: String,
    pub hips: String,
    pub upper_thigh: String,
    pub mid_thigh: String,
    pub knee: String,
    pub ankle: String,
}

/// Parsed body circumferences (cm)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MeasurementValues {
    pub arm: Option<f64>,
    pub wrist: Option<f64>,
    pub chest: Option<f64>,
    pub shoulders: Option<f64>,
    pub waist: Option<f64>,
    pub hips: Option<f64>,
    pub upper_thigh: Option<f64>,
    pub mid_thigh: Option<f64>,
    pub knee: Option<f64>,
    pub ankle: Option<f64>,
}

impl AnthropometricMeasurements {
    fn fields(&self) -> [(&'static str, &str); 10] {
        [
            ("arm", self.arm.as_str()),
            ("wrist", self.wrist.as_str()),
            ("chest", self.chest.as_str()),
            ("shoulders", self.shoulders.as_str()),
            ("waist", self.waist.as_str()),
            ("hips", self.hips.as_str()),
            ("upper_thigh", self.upper_thigh.as_str()),
            ("mid_thigh", self.mid_thigh.as_str()),
            ("knee", self.knee.as_str()),
            ("ankle", self.ankle.as_str()),
        ]
    }

    /// Parse every circumference, collecting all field errors
    pub fn parse(&self) -> Result<MeasurementValues, Vec<ValidationError>> {
        let mut errors = Vec::new();
        let mut parsed = [None; 10];

        for (slot, (field, raw)) in parsed.iter_mut().zip(self.fields()) {
            match parse_optional_number(field, raw) {
                Ok(Some(value)) => match validate_circumference_cm(value) {
                    Ok(()) => *slot = Some(value),
                    Err(message) => errors.push(ValidationError::new(field, &message)),
                },
                Ok(None) => {}
                Err(err) => errors.push(err),
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        let [arm, wrist, chest, shoulders, waist, hips, upper_thigh, mid_thigh, knee, ankle] =
            parsed;
        Ok(MeasurementValues {
            arm,
            wrist,
            chest,
            shoulders,
            waist,
            hips,
            upper_thigh,
            mid_thigh,
            knee,
            ankle,
        })
    }
}

// ============================================================================
// Patient Intake
// ============================================================================

/// Patient intake form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct PatientIntake {
    #[validate(length(min = 1, message = "is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "is required"))]
    pub surname: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    #[validate(email(message = "is not a valid email address"))]
    pub email: Option<String>,
    #[serde(default)]
    pub body_weight: String,
    #[serde(default)]
    pub height: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub age: String,
    #[serde(default)]
    pub fat_percentage: String,
    #[serde(default)]
    pub measurements: AnthropometricMeasurements,
}

fn blank_to_none(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Parse a field, treating both blank and malformed text as absent
fn lenient_number(field: &str, raw: &str) -> Option<f64> {
    parse_optional_number(field, raw).ok().flatten()
}

impl PatientIntake {
    /// Copy with names trimmed and blank contact details removed
    pub fn normalized(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            surname: self.surname.trim().to_string(),
            phone: blank_to_none(&self.phone),
            email: blank_to_none(&self.email),
            ..self.clone()
        }
    }

    /// Check name, surname and email
    ///
    /// Name and surname must be non-blank; a present email must be well formed.
    pub fn validate_identity(&self) -> Result<(), Vec<ValidationError>> {
        let Err(errors) = self.normalized().validate() else {
            return Ok(());
        };

        let mut collected: Vec<ValidationError> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, field_errors)| {
                let field: &str = field.as_ref();
                field_errors
                    .iter()
                    .map(|e| {
                        let message = e
                            .message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| e.code.to_string());
                        ValidationError::new(field, &message)
                    })
                    .collect::<Vec<_>>()
            })
            .collect();
        collected.sort_by(|a, b| a.field.cmp(&b.field));
        Err(collected)
    }

    /// Display name, "Surname Name"
    pub fn full_name(&self) -> String {
        format!("{} {}", self.surname.trim(), self.name.trim())
    }

    pub fn parsed_gender(&self) -> Option<Gender> {
        self.gender.parse().ok()
    }

    /// Engine input, if the form holds enough valid data
    ///
    /// Requires weight and fat percentage to be present, numeric and within
    /// the engine's preconditions. Optional fields that do not parse are
    /// left out rather than blocking the calculation.
    pub fn composition_input(&self) -> Option<CompositionInput> {
        let weight = lenient_number("body_weight", &self.body_weight)?;
        let fat = lenient_number("fat_percentage", &self.fat_percentage)?;

        let input = CompositionInput {
            body_weight_kg: weight,
            fat_percentage: fat,
            height_cm: lenient_number("height", &self.height),
            gender: self.parsed_gender(),
            age: lenient_number("age", &self.age),
        };
        input.validate().ok()?;
        Some(input)
    }

    /// Problems with the numeric fields, for display next to the form
    ///
    /// Blank fields are not reported.
    pub fn field_warnings(&self) -> Vec<ValidationError> {
        let checks: [(&str, &str, fn(f64) -> Result<(), String>); 4] = [
            ("body_weight", self.body_weight.as_str(), validate_body_weight),
            ("fat_percentage", self.fat_percentage.as_str(), validate_fat_percentage),
            ("height", self.height.as_str(), validate_height_cm),
            ("age", self.age.as_str(), validate_age),
        ];

        let mut warnings = Vec::new();
        for (field, raw, check) in checks {
            match parse_optional_number(field, raw) {
                Ok(Some(value)) => {
                    if let Err(message) = check(value) {
                        warnings.push(ValidationError::new(field, &message));
                    }
                }
                Ok(None) => {}
                Err(err) => warnings.push(err),
            }
        }

        if !self.gender.trim().is_empty() && self.parsed_gender().is_none() {
            warnings.push(ValidationError::new("gender", "must be male or female"));
        }

        if let Err(errors) = self.measurements.parse() {
            warnings.extend(errors);
        }
        warnings
    }
}

// ============================================================================
// Intake Session
// ============================================================================

/// A form being edited, with the derived composition kept in step
///
/// When the form stops holding valid engine input, the last derived
/// snapshot is kept as it was.
#[derive(Debug, Clone, Default)]
pub struct IntakeSession {
    intake: PatientIntake,
    derived: Option<CompositionResult>,
}

impl IntakeSession {
    pub fn new(intake: PatientIntake) -> Self {
        let mut session = Self {
            intake,
            derived: None,
        };
        session.refresh();
        session
    }

    pub fn intake(&self) -> &PatientIntake {
        &self.intake
    }

    pub fn derived(&self) -> Option<&CompositionResult> {
        self.derived.as_ref()
    }

    /// Edit the form and recompute
    ///
    /// Returns whether the derived snapshot was replaced.
    pub fn update(&mut self, edit: impl FnOnce(&mut PatientIntake)) -> bool {
        edit(&mut self.intake);
        self.refresh()
    }

    /// Recompute the derived snapshot from the current form
    pub fn refresh(&mut self) -> bool {
        match self
            .intake
            .composition_input()
            .and_then(|input| calculate(&input).ok())
        {
            Some(result) => {
                self.derived = Some(result);
                true
            }
            None => false,
        }
    }

    /// The progress row this visit would record
    pub fn progress_entry(&self, measurement_date: NaiveDate) -> ProgressEntry {
        let mut entry = ProgressEntry::new(measurement_date).with_body(
            lenient_number("body_weight", &self.intake.body_weight),
            lenient_number("fat_percentage", &self.intake.fat_percentage),
        );
        if let Some(result) = &self.derived {
            entry = entry.with_composition(result);
        }
        if let Ok(measurements) = self.intake.measurements.parse() {
            entry = entry.with_measurements(&measurements);
        }
        entry
    }
}
