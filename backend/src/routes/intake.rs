//! Patient intake API routes

use crate::error::ApiResult;
use crate::services::intake::{IntakePreview, IntakeService};
use crate::state::AppState;
use axum::{extract::State, routing::post, Json, Router};
use chrono::Utc;
use nutrition_tracker_shared::PatientIntake;

/// Create intake routes
pub fn intake_routes() -> Router<AppState> {
    Router::new().route("/preview", post(preview_intake))
}

/// POST /api/v1/intake/preview - Validate a form and show what a visit records
///
/// The progress entry is dated today (UTC).
async fn preview_intake(
    State(state): State<AppState>,
    Json(intake): Json<PatientIntake>,
) -> ApiResult<Json<IntakePreview>> {
    let today = Utc::now().date_naive();
    let preview = IntakeService::preview(state.reference(), intake, today)?;
    Ok(Json(preview))
}
