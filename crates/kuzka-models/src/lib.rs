//! Core data models for the Kuzkabuh lead pipeline.
//!
//! A [`LeadSubmission`] is what the order bot sends once a customer has
//! confirmed the form; a [`Lead`] is the stored record the admin API serves.

pub mod ids;
pub mod lead;

pub use ids::LeadId;
pub use lead::{Lead, LeadField, LeadStatus, LeadSubmission, LeadUpdate};
