//! The order wizard: turns customer actions into state changes and replies.
//!
//! The wizard knows nothing about Telegram. Handlers translate updates into
//! [`Action`]s and render the resulting [`Outcome`].

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::catalog::{self, prompt, welcome, Reply, USE_BUTTONS};
use crate::conversation::{ConversationId, Step};
use crate::flow::{Flow, StepKind};
use crate::gateway::SubmissionGateway;
use crate::notifier::Notifier;
use crate::store::ConversationStore;

/// Something the customer did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// `/start`: show the welcome and drop any unfinished form.
    Welcome,
    /// "Leave a request" button or `/order`.
    Start,
    /// A plain text message.
    Text(String),
    /// An option button.
    Choice(String),
    Back,
    Cancel,
    Confirm,
}

impl Action {
    /// Maps inline-button data to an action.
    pub fn from_callback(data: &str) -> Self {
        match data {
            catalog::NEW_ORDER => Action::Start,
            catalog::BACK => Action::Back,
            catalog::CANCEL => Action::Cancel,
            catalog::CONFIRM => Action::Confirm,
            other => Action::Choice(other.to_string()),
        }
    }
}

/// Result of handling an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Send this to the customer.
    Reply(Reply),
    /// The button does not apply to the current step; nothing changed.
    Stale,
}

impl Outcome {
    pub fn reply(&self) -> Option<&Reply> {
        match self {
            Outcome::Reply(reply) => Some(reply),
            Outcome::Stale => None,
        }
    }

    pub fn is_stale(&self) -> bool {
        matches!(self, Outcome::Stale)
    }
}

/// Drives conversations through the order form.
pub struct Wizard {
    flow: Flow,
    store: ConversationStore,
    gateway: Arc<dyn SubmissionGateway>,
    notifier: Arc<dyn Notifier>,
}

impl Wizard {
    pub fn new(
        flow: Flow,
        gateway: Arc<dyn SubmissionGateway>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            flow,
            store: ConversationStore::new(),
            gateway,
            notifier,
        }
    }

    pub fn flow(&self) -> &Flow {
        &self.flow
    }

    pub fn store(&self) -> &ConversationStore {
        &self.store
    }

    /// Current step of a conversation.
    pub async fn step(&self, id: ConversationId) -> Step {
        self.store.step(id).await
    }

    /// Handles one action for one conversation.
    pub async fn handle(&self, id: ConversationId, action: Action) -> Outcome {
        debug!(conversation = %id, action = ?action, "Handling action");
        match action {
            Action::Welcome => {
                self.store.remove(id).await;
                Outcome::Reply(welcome())
            }
            Action::Start => {
                let conversation = self.store.begin(id, self.flow.first()).await;
                info!(conversation = %id, "Order started");
                Outcome::Reply(prompt(&self.flow, &conversation))
            }
            Action::Cancel => {
                if self.store.remove(id).await.is_some() {
                    info!(conversation = %id, "Order cancelled");
                }
                Outcome::Reply(Reply::text(catalog::CANCELLED))
            }
            Action::Back => self.back(id).await,
            Action::Text(text) => self.text(id, &text).await,
            Action::Choice(code) => self.choice(id, &code).await,
            Action::Confirm => self.confirm(id).await,
        }
    }

    async fn back(&self, id: ConversationId) -> Outcome {
        let flow = &self.flow;
        let reply = self
            .store
            .update(id, |conversation| {
                let previous = flow.previous(conversation.step)?;
                conversation.move_to(previous);
                Some(prompt(flow, conversation))
            })
            .await
            .flatten();

        match reply {
            Some(reply) => Outcome::Reply(reply),
            None => Outcome::Stale,
        }
    }

    async fn text(&self, id: ConversationId, text: &str) -> Outcome {
        let flow = &self.flow;
        let reply = self
            .store
            .update(id, |conversation| match conversation.step.kind() {
                StepKind::Text { field, validate } => match validate(text) {
                    Ok(value) => {
                        conversation.set(field, value);
                        conversation.move_to(flow.next(conversation.step));
                        prompt(flow, conversation)
                    }
                    Err(e) => {
                        debug!(conversation = %id, field = ?field, "Rejected answer");
                        prompt(flow, conversation).annotated(&e.to_string())
                    }
                },
                StepKind::Choice { .. } | StepKind::Confirm => {
                    prompt(flow, conversation).annotated(USE_BUTTONS)
                }
                StepKind::Idle => welcome(),
            })
            .await;

        // No open form: greet instead of guessing what the text was for
        Outcome::Reply(reply.unwrap_or_else(welcome))
    }

    async fn choice(&self, id: ConversationId, code: &str) -> Outcome {
        let flow = &self.flow;
        let reply = self
            .store
            .update(id, |conversation| {
                let StepKind::Choice { field, options } = conversation.step.kind() else {
                    return None;
                };
                let option = options.iter().find(|o| o.code == code)?;
                conversation.set(field, option.label);
                conversation.move_to(flow.next(conversation.step));
                Some(prompt(flow, conversation))
            })
            .await
            .flatten();

        match reply {
            Some(reply) => Outcome::Reply(reply),
            None => {
                debug!(conversation = %id, code, "Ignoring stale button");
                Outcome::Stale
            }
        }
    }

    async fn confirm(&self, id: ConversationId) -> Outcome {
        // Taking the form out first makes a second confirm a no-op
        let Some(conversation) = self.store.take_at(id, Step::Confirming).await else {
            return Outcome::Stale;
        };

        let Some(submission) = self.flow.submission(&conversation) else {
            error!(conversation = %id, "Confirmed form is incomplete");
            return Outcome::Reply(Reply::text(catalog::SUBMISSION_FAILED));
        };

        match self.gateway.submit(&submission).await {
            Ok(()) => {
                info!(conversation = %id, "Order submitted");
                if let Err(e) = self.notifier.notify(&submission).await {
                    warn!(conversation = %id, error = %e, "Failed to notify admin");
                }
                Outcome::Reply(Reply::text(catalog::SUBMITTED))
            }
            Err(e) => {
                error!(conversation = %id, error = %e, "Order submission failed");
                Outcome::Reply(Reply::text(catalog::SUBMISSION_FAILED))
            }
        }
    }
}
