//! Response DTOs for the API.

use kuzka_models::{Lead, LeadField};
use serde::Serialize;

/// Health check response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service version.
    pub version: String,
    /// Uptime in seconds.
    pub uptime_seconds: u64,
}

/// Reply to the bot's intake call.
#[derive(Debug, Clone, Serialize)]
pub struct OrderAcceptedResponse {
    pub ok: bool,
    /// ID of the stored lead.
    pub id: String,
}

/// Lead list response.
#[derive(Debug, Clone, Serialize)]
pub struct LeadListResponse {
    /// Leads, newest first.
    pub leads: Vec<Lead>,
    /// Number of leads matching the query before `limit`.
    pub total: usize,
}

/// Created resource response.
#[derive(Debug, Clone, Serialize)]
pub struct CreatedResponse {
    /// ID of the created resource.
    pub id: String,
    /// Success message.
    pub message: String,
}

/// Generic success response.
#[derive(Debug, Clone, Serialize)]
pub struct SuccessResponse {
    /// Success message.
    pub message: String,
}

/// Column key with its display label.
#[derive(Debug, Clone, Serialize)]
pub struct FieldInfo {
    pub key: &'static str,
    pub label: &'static str,
}

impl From<LeadField> for FieldInfo {
    fn from(field: LeadField) -> Self {
        Self {
            key: field.key(),
            label: field.label(),
        }
    }
}
