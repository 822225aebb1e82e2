//! Lead administration handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use kuzka_models::{Lead, LeadField, LeadId, LeadSubmission, LeadUpdate};
use tracing::info;

use crate::error::{ApiError, Result};
use crate::handlers::orders::check_required;
use crate::state::AppState;
use crate::types::{
    CreatedResponse, FieldInfo, LeadListQuery, LeadListResponse, SuccessResponse,
};

/// GET /api/leads - List leads, newest first.
pub async fn list_leads(
    State(state): State<AppState>,
    Query(query): Query<LeadListQuery>,
) -> Result<Json<LeadListResponse>> {
    let mut leads = state.store.list()?;
    if let Some(status) = query.status {
        leads.retain(|lead| lead.status == status);
    }
    let total = leads.len();
    if let Some(limit) = query.limit {
        leads.truncate(limit);
    }

    Ok(Json(LeadListResponse { leads, total }))
}

/// POST /api/leads - Create a lead by hand.
pub async fn create_lead(
    State(state): State<AppState>,
    Json(submission): Json<LeadSubmission>,
) -> Result<(StatusCode, Json<CreatedResponse>)> {
    check_required(&submission)?;

    let lead = Lead::from_submission(submission);
    state.store.save(&lead)?;
    info!(lead_id = %lead.id, "Lead created by admin");

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            id: lead.id.to_string(),
            message: "lead created".to_string(),
        }),
    ))
}

/// GET /api/leads/:id - Get a lead by ID.
pub async fn get_lead(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Lead>> {
    let lead = state.store.load(&LeadId::from_string(id))?;
    Ok(Json(lead))
}

/// PUT /api/leads/:id - Edit a lead.
pub async fn update_lead(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(update): Json<LeadUpdate>,
) -> Result<Json<Lead>> {
    let required = [
        (LeadField::Inn, &update.inn),
        (LeadField::Email, &update.email),
        (LeadField::Phone, &update.phone),
    ];
    for (field, value) in required {
        if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
            return Err(ApiError::BadRequest(format!("{} cannot be empty", field.key())));
        }
    }

    let mut lead = state.store.load(&LeadId::from_string(id))?;
    lead.apply(update);
    state.store.save(&lead)?;
    info!(lead_id = %lead.id, status = %lead.status, "Lead updated");

    Ok(Json(lead))
}

/// DELETE /api/leads/:id - Delete a lead.
pub async fn delete_lead(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>> {
    let id = LeadId::from_string(id);
    state.store.delete(&id)?;
    info!(lead_id = %id, "Lead deleted");

    Ok(Json(SuccessResponse {
        message: "lead deleted".to_string(),
    }))
}

/// GET /api/leads/fields - Column labels for the admin table.
pub async fn lead_fields() -> Json<Vec<FieldInfo>> {
    Json(LeadField::ALL.into_iter().map(FieldInfo::from).collect())
}
