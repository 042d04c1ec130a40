//! Nutrition Tracker Shared Library
//!
//! This crate contains the body composition engine and the domain types
//! used across the backend and WASM modules.

pub mod body_composition;
pub mod classification;
pub mod errors;
pub mod intake;
pub mod progress;
pub mod reference_values;
pub mod validation;

// Re-export commonly used items
pub use body_composition::{calculate, CompositionInput, CompositionResult, Gender};
pub use classification::*;
pub use errors::*;
pub use intake::{AnthropometricMeasurements, IntakeSession, MeasurementValues, PatientIntake};
pub use progress::{ProgressEntry, ProgressHistory, ProgressMetric};
pub use reference_values::ReferenceValues;
