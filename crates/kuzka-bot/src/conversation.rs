//! Per-customer conversation state.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};

/// Identity of a conversation (the Telegram chat the customer writes from).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConversationId(pub i64);

impl fmt::Display for ConversationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A step of the order form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    /// No order in progress.
    Idle,
    AwaitingTaxId,
    AwaitingEmail,
    /// Only present when the bot collects a contact name.
    AwaitingName,
    AwaitingPhone,
    AwaitingContactWindow,
    AwaitingService,
    AwaitingUrgency,
    /// Summary shown, waiting for confirm/back/cancel.
    Confirming,
}

/// A value collected by the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    TaxId,
    Email,
    Name,
    Phone,
    ContactWindow,
    Service,
    Urgency,
}

impl Field {
    /// Label used in summaries.
    pub fn label(self) -> &'static str {
        match self {
            Field::TaxId => "ИНН",
            Field::Email => "Email",
            Field::Name => "Имя",
            Field::Phone => "Телефон",
            Field::ContactWindow => "Время связи",
            Field::Service => "Услуга",
            Field::Urgency => "Срочность",
        }
    }
}

/// An order form being filled in by one customer.
#[derive(Debug, Clone)]
pub struct Conversation {
    /// Current step.
    pub step: Step,
    /// Answers collected so far. Going back keeps them.
    fields: BTreeMap<Field, String>,
    /// When the form was opened.
    pub created_at: DateTime<Utc>,
    /// When the form last changed.
    pub updated_at: DateTime<Utc>,
}

impl Conversation {
    /// Opens an empty form at the given step.
    pub fn new(step: Step) -> Self {
        let now = Utc::now();
        Self {
            step,
            fields: BTreeMap::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns a collected value.
    pub fn get(&self, field: Field) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }

    /// Stores a value, replacing any earlier answer.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        self.fields.insert(field, value.into());
        self.updated_at = Utc::now();
    }

    /// Moves to another step.
    pub fn move_to(&mut self, step: Step) {
        self.step = step;
        self.updated_at = Utc::now();
    }

    /// Number of collected values.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether nothing has been collected yet.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
