//! Input validation functions
//!
//! Field-level validators for the patient intake form. The body composition
//! engine performs its own checks; these exist to give the practitioner
//! precise, labelled feedback on what they typed.

/// Validate body weight (in kg)
pub fn validate_body_weight(weight_kg: f64) -> Result<(), String> {
    if weight_kg.is_nan() || weight_kg.is_infinite() {
        return Err("Weight must be a valid number".to_string());
    }
    if weight_kg <= 0.0 {
        return Err("Weight must be greater than 0 kg".to_string());
    }
    if weight_kg > 500.0 {
        return Err("Weight must be at most 500 kg".to_string());
    }
    Ok(())
}

/// Validate fat percentage (0-100)
pub fn validate_fat_percentage(value: f64) -> Result<(), String> {
    if value.is_nan() || value.is_infinite() {
        return Err("Fat percentage must be a valid number".to_string());
    }
    if !(0.0..=100.0).contains(&value) {
        return Err("Fat percentage must be between 0 and 100".to_string());
    }
    Ok(())
}

/// Validate height value (in cm)
/// Valid range: 50-300 cm
pub fn validate_height_cm(height_cm: f64) -> Result<(), String> {
    if height_cm.is_nan() || height_cm.is_infinite() {
        return Err("Height must be a valid number".to_string());
    }
    if height_cm < 50.0 {
        return Err("Height must be at least 50 cm".to_string());
    }
    if height_cm > 300.0 {
        return Err("Height must be at most 300 cm".to_string());
    }
    Ok(())
}

/// Validate age in years
pub fn validate_age(age: f64) -> Result<(), String> {
    if age.is_nan() || age.is_infinite() {
        return Err("Age must be a valid number".to_string());
    }
    if age <= 0.0 {
        return Err("Age must be greater than 0".to_string());
    }
    if age > 150.0 {
        return Err("Age cannot exceed 150 years".to_string());
    }
    Ok(())
}

/// Validate a body circumference (in cm)
pub fn validate_circumference_cm(value: f64) -> Result<(), String> {
    if value.is_nan() || value.is_infinite() {
        return Err("Measurement must be a valid number".to_string());
    }
    if value <= 0.0 {
        return Err("Measurement must be greater than 0 cm".to_string());
    }
    if value > 300.0 {
        return Err("Measurement must be at most 300 cm".to_string());
    }
    Ok(())
}

/// Parse a free-text numeric form field
///
/// Blank input means "not provided" and yields `Ok(None)`.
pub fn parse_optional_number(field: &str, raw: &str) -> Result<Option<f64>, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<f64>()
        .map(Some)
        .map_err(|_| ValidationError::new(field, "must be a number"))
}

// ============================================================================
// User-Friendly Field Labels
// ============================================================================

/// Map intake field names to display labels
pub fn get_field_display_label(field_name: &str) -> &str {
    match field_name {
        "name" => "Name",
        "surname" => "Surname",
        "phone" => "Phone",
        "email" => "Email",
        "body_weight" | "body_weight_kg" => "Body Weight",
        "height" | "height_cm" => "Height",
        "gender" => "Gender",
        "age" => "Age",
        "fat_percentage" => "Fat Percentage",
        "arm" => "Arm",
        "wrist" => "Wrist",
        "chest" => "Chest",
        "shoulders" => "Shoulders",
        "waist" => "Waist",
        "hips" => "Hips",
        "upper_thigh" => "Upper Thigh",
        "mid_thigh" => "Mid Thigh",
        "knee" => "Knee",
        "ankle" => "Ankle",
        _ => field_name,
    }
}

/// Validation error with field context
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
    pub display_label: String,
}

impl ValidationError {
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
            display_label: get_field_display_label(field).to_string(),
        }
    }

    /// Format as user-friendly error message
    pub fn user_message(&self) -> String {
        format!("{}: {}", self.display_label, self.message)
    }
}
