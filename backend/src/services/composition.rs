//! Body composition assessment service
//!
//! Runs the engine and annotates the result with the categories a
//! practitioner reads next to each number.

use crate::error::ApiError;
use nutrition_tracker_shared::{
    calculate, classify_bmi, Classification, CompositionInput, CompositionResult, Gender,
    ReferenceValues,
};
use serde::Serialize;
use tracing::debug;

/// Classifications for a computed result
///
/// A field is absent when its metric is absent, or for fat percentage,
/// when no gender was given.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classifications {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bmi: Option<Classification>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fat_percentage: Option<Classification>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ecw_icw_ratio: Option<Classification>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tbw_ffm_ratio: Option<Classification>,
}

/// Engine result plus classifications
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assessment {
    pub composition: CompositionResult,
    pub classifications: Classifications,
}

/// Body composition service
pub struct CompositionService;

impl CompositionService {
    /// Calculate and classify
    pub fn assess(
        reference: &ReferenceValues,
        input: &CompositionInput,
    ) -> Result<Assessment, ApiError> {
        let composition = calculate(input)?;
        debug!(
            ffm = composition.ffm,
            bmr = composition.bmr,
            has_bmi = composition.bmi.is_some(),
            "Body composition calculated"
        );
        Ok(Self::classify(
            reference,
            composition,
            input.fat_percentage,
            input.gender,
        ))
    }

    /// Classify an already computed result
    pub fn classify(
        reference: &ReferenceValues,
        composition: CompositionResult,
        fat_percentage: f64,
        gender: Option<Gender>,
    ) -> Assessment {
        let classifications = Classifications {
            bmi: composition.bmi.map(|bmi| classify_bmi(bmi).into()),
            fat_percentage: gender.map(|g| {
                reference
                    .fat_percentage
                    .for_gender(g)
                    .classify(fat_percentage)
                    .into()
            }),
            ecw_icw_ratio: composition
                .ecw_icw_ratio
                .map(|r| reference.ecw_icw_ratio.classify(r).into()),
            tbw_ffm_ratio: composition
                .tbw_ffm_ratio
                .map(|r| reference.tbw_ffm_ratio.classify(r).into()),
        };

        Assessment {
            composition,
            classifications,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nutrition_tracker_shared::Severity;
    use proptest::prelude::*;

    #[test]
    fn test_assess_full_input() {
        let input = CompositionInput::new(70.0, 20.0)
            .with_gender(Gender::Male)
            .with_height_cm(175.0);
        let assessment = CompositionService::assess(ReferenceValues::standard(), &input).unwrap();

        assert_eq!(assessment.composition.ffm, 56.0);
        let c = &assessment.classifications;
        assert_eq!(c.bmi.as_ref().unwrap().label, "Normal");
        assert_eq!(c.fat_percentage.as_ref().unwrap().label, "Normal");
        // 0.67 sits inside the 0.60-0.70 band
        assert_eq!(c.ecw_icw_ratio.as_ref().unwrap().severity, Severity::Normal);
        assert_eq!(c.tbw_ffm_ratio.as_ref().unwrap().label, "Normal");
    }

    #[test]
    fn test_assess_minimal_input() {
        let input = CompositionInput::new(90.0, 30.0);
        let assessment = CompositionService::assess(ReferenceValues::standard(), &input).unwrap();
        assert!(assessment.classifications.bmi.is_none());
        assert!(assessment.classifications.fat_percentage.is_none());
    }

    #[test]
    fn test_assess_invalid_input() {
        let input = CompositionInput::new(-5.0, 30.0);
        let err = CompositionService::assess(ReferenceValues::standard(), &input).unwrap_err();
        assert!(matches!(err, ApiError::Validation { .. }));
    }

    fn gender_strategy() -> impl Strategy<Value = Option<Gender>> {
        prop::option::of(prop_oneof![Just(Gender::Male), Just(Gender::Female)])
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_classification_follows_metric_presence(
            weight in 1.0f64..400.0,
            fat in 0.0f64..=100.0,
            gender in gender_strategy(),
            height in prop::option::of(100.0f64..250.0),
        ) {
            let mut input = CompositionInput::new(weight, fat);
            input.gender = gender;
            input.height_cm = height;
            let assessment = CompositionService::assess(ReferenceValues::standard(), &input).unwrap();
            let composition = &assessment.composition;
            let c = &assessment.classifications;

            prop_assert_eq!(c.bmi.is_some(), composition.bmi.is_some());
            prop_assert_eq!(c.fat_percentage.is_some(), gender.is_some());
            prop_assert_eq!(c.ecw_icw_ratio.is_some(), composition.ecw_icw_ratio.is_some());
            prop_assert_eq!(c.tbw_ffm_ratio.is_some(), composition.tbw_ffm_ratio.is_some());
        }

        #[test]
        fn prop_water_ratios_always_normal(
            weight in 1.0f64..400.0,
            fat in 0.0f64..90.0,
            gender in gender_strategy(),
        ) {
            // Both ratios are fixed by the model constants (0.67 and 0.72-0.74)
            let mut input = CompositionInput::new(weight, fat);
            input.gender = gender;
            let c = CompositionService::assess(ReferenceValues::standard(), &input)
                .unwrap()
                .classifications;

            prop_assert_eq!(c.ecw_icw_ratio.unwrap().severity, Severity::Normal);
            prop_assert_eq!(c.tbw_ffm_ratio.unwrap().severity, Severity::Normal);
        }
    }
}
