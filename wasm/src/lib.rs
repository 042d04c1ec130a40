//! Nutrition Tracker WASM Module
//!
//! WebAssembly bindings so the browser form can run the body composition
//! engine and classifiers locally. Values cross the boundary as JSON.

use nutrition_tracker_shared as shared;
use serde::Serialize;
use shared::{
    Classification, CompositionInput, Gender, ProgressEntry, ProgressHistory, ProgressMetric,
    ReferenceValues,
};
use wasm_bindgen::prelude::*;

/// A chart point for a progress metric
#[derive(Debug, Serialize)]
struct SeriesPoint {
    date: String,
    value: f64,
}

/// Latest visit and overall change for a progress metric
#[derive(Debug, Serialize)]
struct ProgressSummary {
    latest_date: Option<String>,
    latest_value: Option<f64>,
    change: Option<f64>,
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| e.to_string())
}

fn composition_json(input_json: &str) -> Result<String, String> {
    let input: CompositionInput =
        serde_json::from_str(input_json).map_err(|e| format!("Invalid input JSON: {}", e))?;
    let result = shared::calculate(&input).map_err(|e| e.to_string())?;
    to_json(&result)
}

fn fat_percentage_json(value: f64, gender: &str) -> Result<String, String> {
    let gender: Gender = gender.parse()?;
    to_json(&Classification::from(shared::classify_fat_percentage(value, gender)))
}

fn parse_history(entries_json: &str) -> Result<ProgressHistory, String> {
    let entries: Vec<ProgressEntry> =
        serde_json::from_str(entries_json).map_err(|e| format!("Invalid entries JSON: {}", e))?;
    Ok(ProgressHistory::from_entries(entries))
}

fn progress_series_json(entries_json: &str, metric: &str) -> Result<String, String> {
    let metric: ProgressMetric = metric.parse()?;
    let points: Vec<SeriesPoint> = parse_history(entries_json)?
        .series(metric)
        .into_iter()
        .map(|(date, value)| SeriesPoint {
            date: date.to_string(),
            value,
        })
        .collect();
    to_json(&points)
}

fn record_entry_json(entries_json: &str, entry_json: &str) -> Result<String, String> {
    let mut history = parse_history(entries_json)?;
    let entry: ProgressEntry =
        serde_json::from_str(entry_json).map_err(|e| format!("Invalid entry JSON: {}", e))?;
    history.insert(entry);
    to_json(&history.entries())
}

fn progress_summary_json(entries_json: &str, metric: &str) -> Result<String, String> {
    let metric: ProgressMetric = metric.parse()?;
    let history = parse_history(entries_json)?;
    let latest = history.latest();
    to_json(&ProgressSummary {
        latest_date: latest.map(|e| e.measurement_date.to_string()),
        latest_value: latest.and_then(|e| metric.value(e)),
        change: history.change(metric),
    })
}

fn js_result(result: Result<String, String>) -> Result<String, JsError> {
    result.map_err(|e| JsError::new(&e))
}

/// Calculate body composition from a JSON `CompositionInput`
#[wasm_bindgen]
pub fn calculate_body_composition(input_json: &str) -> Result<String, JsError> {
    js_result(composition_json(input_json))
}

/// Classify a BMI value
#[wasm_bindgen]
pub fn classify_bmi(bmi: f64) -> Result<String, JsError> {
    js_result(to_json(&Classification::from(shared::classify_bmi(bmi))))
}

/// Classify a fat percentage for "male" or "female"
#[wasm_bindgen]
pub fn classify_fat_percentage(value: f64, gender: &str) -> Result<String, JsError> {
    js_result(fat_percentage_json(value, gender))
}

#[wasm_bindgen]
pub fn classify_ecw_icw_ratio(ratio: f64) -> Result<String, JsError> {
    js_result(to_json(&Classification::from(shared::classify_ecw_icw_ratio(ratio))))
}

#[wasm_bindgen]
pub fn classify_tbw_ffm_ratio(ratio: f64) -> Result<String, JsError> {
    js_result(to_json(&Classification::from(shared::classify_tbw_ffm_ratio(ratio))))
}

/// The reference value table shown next to results
#[wasm_bindgen]
pub fn reference_values() -> Result<String, JsError> {
    js_result(to_json(ReferenceValues::standard()))
}

/// Chart points for one metric from a JSON array of progress entries
#[wasm_bindgen]
pub fn progress_series(entries_json: &str, metric: &str) -> Result<String, JsError> {
    js_result(progress_series_json(entries_json, metric))
}

/// Add a visit to a JSON array of entries, returning the array in date order
#[wasm_bindgen]
pub fn record_progress_entry(entries_json: &str, entry_json: &str) -> Result<String, JsError> {
    js_result(record_entry_json(entries_json, entry_json))
}

/// Latest visit and first-to-last change of one metric
#[wasm_bindgen]
pub fn progress_summary(entries_json: &str, metric: &str) -> Result<String, JsError> {
    js_result(progress_summary_json(entries_json, metric))
}
