//! Lead types.
//!
//! Leads are created from a confirmed order form and afterwards only edited
//! through the admin API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ids::LeadId;

/// Processing status of a stored lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LeadStatus {
    /// Lead has just arrived and nobody picked it up yet.
    #[default]
    New,
    /// A manager is working on the lead.
    InProgress,
    /// Lead has been handled.
    Done,
    /// Lead was rejected (spam, duplicate, out of scope).
    Rejected,
}

impl fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LeadStatus::New => "new",
            LeadStatus::InProgress => "in_progress",
            LeadStatus::Done => "done",
            LeadStatus::Rejected => "rejected",
        };
        f.write_str(s)
    }
}

/// A field of a lead as shown to administrators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadField {
    Inn,
    Email,
    Name,
    Phone,
    ContactTime,
    Service,
    Urgency,
    Status,
    CreatedAt,
}

impl LeadField {
    /// All fields in display order.
    pub const ALL: [LeadField; 9] = [
        LeadField::Inn,
        LeadField::Email,
        LeadField::Name,
        LeadField::Phone,
        LeadField::ContactTime,
        LeadField::Service,
        LeadField::Urgency,
        LeadField::Status,
        LeadField::CreatedAt,
    ];

    /// JSON key of the field.
    pub fn key(self) -> &'static str {
        match self {
            LeadField::Inn => "inn",
            LeadField::Email => "email",
            LeadField::Name => "name",
            LeadField::Phone => "phone",
            LeadField::ContactTime => "contact_time",
            LeadField::Service => "service",
            LeadField::Urgency => "urgency",
            LeadField::Status => "status",
            LeadField::CreatedAt => "created_at",
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            LeadField::Inn => "ИНН",
            LeadField::Email => "Email",
            LeadField::Name => "Имя",
            LeadField::Phone => "Телефон",
            LeadField::ContactTime => "Время связи",
            LeadField::Service => "Услуга",
            LeadField::Urgency => "Срочность",
            LeadField::Status => "Статус",
            LeadField::CreatedAt => "Дата",
        }
    }
}

/// Payload sent by the order bot when a customer confirms the form.
///
/// Every field defaults so a payload with missing keys still parses and
/// [`LeadSubmission::missing_field`] can name what is absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadSubmission {
    #[serde(default)]
    pub inn: String,
    #[serde(default)]
    pub email: String,
    /// Only collected when the bot runs with the name step enabled.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub contact_time: String,
    #[serde(default)]
    pub service: String,
    #[serde(default)]
    pub urgency: String,
}

impl LeadSubmission {
    /// Returns the first required field that is empty, if any.
    pub fn missing_field(&self) -> Option<LeadField> {
        [
            (LeadField::Inn, &self.inn),
            (LeadField::Email, &self.email),
            (LeadField::Phone, &self.phone),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
    }
}

/// A stored lead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lead {
    pub id: LeadId,
    pub inn: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub phone: String,
    pub contact_time: String,
    pub service: String,
    pub urgency: String,
    #[serde(default)]
    pub status: LeadStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Lead {
    /// Creates a new lead from a confirmed submission.
    pub fn from_submission(submission: LeadSubmission) -> Self {
        let now = Utc::now();
        Self {
            id: LeadId::new(),
            inn: submission.inn,
            email: submission.email,
            name: submission.name.filter(|n| !n.trim().is_empty()),
            phone: submission.phone,
            contact_time: submission.contact_time,
            service: submission.service,
            urgency: submission.urgency,
            status: LeadStatus::New,
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies an admin edit. Fields left as `None` are kept.
    pub fn apply(&mut self, update: LeadUpdate) {
        if let Some(inn) = update.inn {
            self.inn = inn;
        }
        if let Some(email) = update.email {
            self.email = email;
        }
        if let Some(name) = update.name {
            self.name = if name.trim().is_empty() { None } else { Some(name) };
        }
        if let Some(phone) = update.phone {
            self.phone = phone;
        }
        if let Some(contact_time) = update.contact_time {
            self.contact_time = contact_time;
        }
        if let Some(service) = update.service {
            self.service = service;
        }
        if let Some(urgency) = update.urgency {
            self.urgency = urgency;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        self.updated_at = Utc::now();
    }
}

/// Partial edit of a lead.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LeadUpdate {
    pub inn: Option<String>,
    pub email: Option<String>,
    /// An empty string clears the name.
    pub name: Option<String>,
    pub phone: Option<String>,
    pub contact_time: Option<String>,
    pub service: Option<String>,
    pub urgency: Option<String>,
    pub status: Option<LeadStatus>,
}
