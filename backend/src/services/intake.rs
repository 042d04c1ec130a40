//! Patient intake preview service

use crate::error::ApiError;
use crate::services::composition::{Assessment, CompositionService};
use chrono::NaiveDate;
use nutrition_tracker_shared::validation::ValidationError;
use nutrition_tracker_shared::{
    IntakeSession, MeasurementValues, PatientIntake, ProgressEntry, ReferenceValues,
};
use serde::Serialize;
use tracing::{debug, info, warn};

/// What saving this intake would record
#[derive(Debug, Clone, Serialize)]
pub struct IntakePreview {
    pub patient: String,
    /// Absent until weight and fat percentage are present and valid
    pub composition: Option<Assessment>,
    pub measurements: Option<MeasurementValues>,
    pub warnings: Vec<ValidationError>,
    pub progress_entry: ProgressEntry,
}

/// Intake service
pub struct IntakeService;

impl IntakeService {
    /// Validate an intake and derive everything a visit would store
    ///
    /// Fails only on identity problems (name, surname, email). Numeric
    /// problems are reported as warnings and leave the affected values out.
    pub fn preview(
        reference: &ReferenceValues,
        intake: PatientIntake,
        measurement_date: NaiveDate,
    ) -> Result<IntakePreview, ApiError> {
        if let Err(errors) = intake.validate_identity() {
            let field = errors.first().map(|e| e.field.clone());
            let message = errors
                .iter()
                .map(ValidationError::user_message)
                .collect::<Vec<_>>()
                .join("; ");
            return Err(match field {
                Some(field) => ApiError::validation_field(field, message),
                None => ApiError::validation(message),
            });
        }

        let intake = intake.normalized();
        let warnings = intake.field_warnings();
        if !warnings.is_empty() {
            let fields: Vec<&str> = warnings.iter().map(|w| w.field.as_str()).collect();
            warn!(?fields, "Intake has fields that cannot be used");
        }
        let measurements = intake.measurements.parse().ok();
        let fat_percentage = intake.composition_input().map(|i| i.fat_percentage);
        let gender = intake.parsed_gender();

        let session = IntakeSession::new(intake);
        let composition = match (session.derived(), fat_percentage) {
            (Some(result), Some(fat)) => {
                Some(CompositionService::classify(reference, *result, fat, gender))
            }
            _ => {
                debug!("Intake lacks valid weight or fat percentage; composition skipped");
                None
            }
        };

        let progress_entry = session.progress_entry(measurement_date);
        info!(
            warnings = warnings.len(),
            has_composition = composition.is_some(),
            "Intake preview prepared"
        );

        Ok(IntakePreview {
            patient: session.intake().full_name(),
            composition,
            measurements,
            warnings,
            progress_entry,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nutrition_tracker_shared::AnthropometricMeasurements;

    fn intake() -> PatientIntake {
        PatientIntake {
            name: " Anna ".to_string(),
            surname: "Bianchi".to_string(),
            body_weight: "60".to_string(),
            fat_percentage: "25".to_string(),
            gender: "female".to_string(),
            measurements: AnthropometricMeasurements {
                waist: "72".to_string(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 10).unwrap()
    }

    #[test]
    fn test_preview_with_composition() {
        let preview = IntakeService::preview(ReferenceValues::standard(), intake(), today()).unwrap();
        assert_eq!(preview.patient, "Bianchi Anna");
        let assessment = preview.composition.unwrap();
        assert_eq!(assessment.composition.ffm, 45.0);
        assert_eq!(
            assessment.classifications.fat_percentage.unwrap().label,
            "Normal"
        );
        assert_eq!(preview.progress_entry.waist, Some(72.0));
        assert_eq!(preview.progress_entry.measurement_date, today());
        assert!(preview.warnings.is_empty());
    }

    #[test]
    fn test_preview_without_fat_percentage() {
        let form = PatientIntake {
            fat_percentage: String::new(),
            ..intake()
        };
        let preview = IntakeService::preview(ReferenceValues::standard(), form, today()).unwrap();
        assert!(preview.composition.is_none());
        assert_eq!(preview.progress_entry.body_weight, Some(60.0));
        assert_eq!(preview.progress_entry.ffm, None);
    }

    #[test]
    fn test_preview_rejects_missing_surname() {
        let form = PatientIntake {
            surname: "   ".to_string(),
            ..intake()
        };
        let err = IntakeService::preview(ReferenceValues::standard(), form, today()).unwrap_err();
        match err {
            ApiError::Validation { field, message } => {
                assert_eq!(field.as_deref(), Some("surname"));
                assert_eq!(message, "Surname: is required");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
