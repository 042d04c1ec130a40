//! Body composition API routes

use crate::error::{ApiError, ApiResult};
use crate::services::composition::{Assessment, CompositionService};
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use nutrition_tracker_shared::{Classification, CompositionInput, Gender};
use serde::Deserialize;

/// Create body composition routes
pub fn body_composition_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(calculate_composition))
        .route("/classify/bmi", get(classify_bmi))
        .route("/classify/fat-percentage", get(classify_fat_percentage))
        .route("/classify/ecw-icw-ratio", get(classify_ecw_icw_ratio))
        .route("/classify/tbw-ffm-ratio", get(classify_tbw_ffm_ratio))
}

#[derive(Debug, Deserialize)]
struct ValueQuery {
    value: f64,
}

#[derive(Debug, Deserialize)]
struct FatPercentageQuery {
    value: f64,
    gender: Gender,
}

fn finite(value: f64) -> ApiResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ApiError::BadRequest("value must be a finite number".to_string()))
    }
}

/// POST /api/v1/body-composition - Calculate and classify body composition
async fn calculate_composition(
    State(state): State<AppState>,
    Json(input): Json<CompositionInput>,
) -> ApiResult<Json<Assessment>> {
    let assessment = CompositionService::assess(state.reference(), &input)?;
    Ok(Json(assessment))
}

/// GET /api/v1/body-composition/classify/bmi?value=
async fn classify_bmi(Query(query): Query<ValueQuery>) -> ApiResult<Json<Classification>> {
    let bmi = finite(query.value)?;
    Ok(Json(nutrition_tracker_shared::classify_bmi(bmi).into()))
}

/// GET /api/v1/body-composition/classify/fat-percentage?value=&gender=
async fn classify_fat_percentage(
    State(state): State<AppState>,
    Query(query): Query<FatPercentageQuery>,
) -> ApiResult<Json<Classification>> {
    let category = state
        .reference()
        .fat_percentage
        .for_gender(query.gender)
        .classify(finite(query.value)?);
    Ok(Json(category.into()))
}

/// GET /api/v1/body-composition/classify/ecw-icw-ratio?value=
async fn classify_ecw_icw_ratio(
    State(state): State<AppState>,
    Query(query): Query<ValueQuery>,
) -> ApiResult<Json<Classification>> {
    let ratio = finite(query.value)?;
    Ok(Json(state.reference().ecw_icw_ratio.classify(ratio).into()))
}

/// GET /api/v1/body-composition/classify/tbw-ffm-ratio?value=
async fn classify_tbw_ffm_ratio(
    State(state): State<AppState>,
    Query(query): Query<ValueQuery>,
) -> ApiResult<Json<Classification>> {
    let ratio = finite(query.value)?;
    Ok(Json(state.reference().tbw_ffm_ratio.classify(ratio).into()))
}
