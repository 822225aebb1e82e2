//! Intake endpoint used by the order bot.

use axum::{extract::State, Json};
use kuzka_models::{Lead, LeadSubmission};
use tracing::info;

use crate::error::{ApiError, Result};
use crate::state::AppState;
use crate::types::OrderAcceptedResponse;

/// Rejects submissions lacking a required field.
pub(crate) fn check_required(submission: &LeadSubmission) -> Result<()> {
    match submission.missing_field() {
        Some(field) => Err(ApiError::BadRequest(format!("missing field: {}", field.key()))),
        None => Ok(()),
    }
}

/// POST /api/add_order - Store a confirmed order as a new lead.
pub async fn add_order(
    State(state): State<AppState>,
    Json(submission): Json<LeadSubmission>,
) -> Result<Json<OrderAcceptedResponse>> {
    check_required(&submission)?;

    let lead = Lead::from_submission(submission);
    state.store.save(&lead)?;
    info!(lead_id = %lead.id, service = %lead.service, "Order received");

    Ok(Json(OrderAcceptedResponse {
        ok: true,
        id: lead.id.to_string(),
    }))
}
