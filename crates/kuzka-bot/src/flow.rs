//! The order form as a transition table.
//!
//! Every step declares how it consumes input ([`StepKind`]); the [`Flow`]
//! fixes the order of steps for the product variant in use.

use kuzka_models::LeadSubmission;

use crate::catalog::{ChoiceOption, CONTACT_WINDOWS, SERVICES, URGENCIES};
use crate::conversation::{Conversation, Field, Step};
use crate::validators::{
    validate_email, validate_name, validate_phone, validate_tax_id, ValidationError,
};

/// Checks a free-text answer and returns the value to store.
pub type Validator = fn(&str) -> Result<String, ValidationError>;

/// How a step consumes input.
#[derive(Clone, Copy)]
pub enum StepKind {
    /// Outside the form.
    Idle,
    /// Free-text answer checked by a validator.
    Text { field: Field, validate: Validator },
    /// One button out of a closed option set.
    Choice {
        field: Field,
        options: &'static [ChoiceOption],
    },
    /// Summary awaiting confirmation.
    Confirm,
}

impl Step {
    /// Input handling for this step.
    pub fn kind(self) -> StepKind {
        match self {
            Step::Idle => StepKind::Idle,
            Step::AwaitingTaxId => StepKind::Text {
                field: Field::TaxId,
                validate: validate_tax_id,
            },
            Step::AwaitingEmail => StepKind::Text {
                field: Field::Email,
                validate: validate_email,
            },
            Step::AwaitingName => StepKind::Text {
                field: Field::Name,
                validate: validate_name,
            },
            Step::AwaitingPhone => StepKind::Text {
                field: Field::Phone,
                validate: validate_phone,
            },
            Step::AwaitingContactWindow => StepKind::Choice {
                field: Field::ContactWindow,
                options: CONTACT_WINDOWS,
            },
            Step::AwaitingService => StepKind::Choice {
                field: Field::Service,
                options: SERVICES,
            },
            Step::AwaitingUrgency => StepKind::Choice {
                field: Field::Urgency,
                options: URGENCIES,
            },
            Step::Confirming => StepKind::Confirm,
        }
    }

    /// The field this step collects, if any.
    pub fn field(self) -> Option<Field> {
        match self.kind() {
            StepKind::Text { field, .. } | StepKind::Choice { field, .. } => Some(field),
            StepKind::Idle | StepKind::Confirm => None,
        }
    }
}

/// Ordered steps of the form, ending with [`Step::Confirming`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flow {
    steps: Vec<Step>,
}

impl Flow {
    /// Builds the flow. `collect_name` adds the name step after email.
    pub fn new(collect_name: bool) -> Self {
        let mut steps = vec![Step::AwaitingTaxId, Step::AwaitingEmail];
        if collect_name {
            steps.push(Step::AwaitingName);
        }
        steps.extend([
            Step::AwaitingPhone,
            Step::AwaitingContactWindow,
            Step::AwaitingService,
            Step::AwaitingUrgency,
            Step::Confirming,
        ]);
        Self { steps }
    }

    /// All steps in order.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// First collection step.
    pub fn first(&self) -> Step {
        self.steps[0]
    }

    fn position(&self, step: Step) -> Option<usize> {
        self.steps.iter().position(|s| *s == step)
    }

    /// Step after `step`. Past the end (or outside the flow) is `Idle`.
    pub fn next(&self, step: Step) -> Step {
        self.position(step)
            .and_then(|i| self.steps.get(i + 1).copied())
            .unwrap_or(Step::Idle)
    }

    /// Step before `step`; `None` for the first step and for `Idle`.
    pub fn previous(&self, step: Step) -> Option<Step> {
        match self.position(step) {
            Some(i) if i > 0 => Some(self.steps[i - 1]),
            _ => None,
        }
    }

    /// Whether `step` is the first collection step.
    pub fn is_first(&self, step: Step) -> bool {
        self.position(step) == Some(0)
    }

    /// Whether the name step is part of the form.
    pub fn collects_name(&self) -> bool {
        self.position(Step::AwaitingName).is_some()
    }

    /// Fields collected by this flow, in order.
    pub fn fields(&self) -> Vec<Field> {
        self.steps.iter().filter_map(|s| s.field()).collect()
    }

    /// Builds the submission once every field of the flow is filled in.
    pub fn submission(&self, conversation: &Conversation) -> Option<LeadSubmission> {
        if self.fields().iter().any(|f| conversation.get(*f).is_none()) {
            return None;
        }
        let value = |field| conversation.get(field).unwrap_or_default().to_string();

        Some(LeadSubmission {
            inn: value(Field::TaxId),
            email: value(Field::Email),
            name: self.collects_name().then(|| value(Field::Name)),
            phone: value(Field::Phone),
            contact_time: value(Field::ContactWindow),
            service: value(Field::Service),
            urgency: value(Field::Urgency),
        })
    }
}
