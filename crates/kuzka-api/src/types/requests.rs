//! Request DTOs for the API.
//!
//! Lead bodies reuse [`kuzka_models::LeadSubmission`] and
//! [`kuzka_models::LeadUpdate`] directly.

use kuzka_models::LeadStatus;
use serde::Deserialize;

/// Lead list query parameters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LeadListQuery {
    /// Filter by status.
    pub status: Option<LeadStatus>,
    /// Maximum number of leads to return.
    pub limit: Option<usize>,
}
