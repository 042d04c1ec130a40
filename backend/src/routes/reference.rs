//! Reference values route

use crate::state::AppState;
use axum::{extract::State, Json};
use nutrition_tracker_shared::ReferenceValues;

/// GET /api/v1/reference-values - The table results are interpreted against
pub async fn get_reference_values(State(state): State<AppState>) -> Json<ReferenceValues> {
    Json(*state.reference())
}
