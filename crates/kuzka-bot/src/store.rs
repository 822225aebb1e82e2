//! In-memory conversation store.
//!
//! A conversation exists only while an order is in progress. Removing the
//! entry is how a conversation returns to [`Step::Idle`], so nothing from a
//! cancelled or submitted order can leak into the next one.

use std::collections::HashMap;

use tokio::sync::RwLock;

use crate::conversation::{Conversation, ConversationId, Step};

/// Active conversations keyed by chat.
#[derive(Debug, Default)]
pub struct ConversationStore {
    conversations: RwLock<HashMap<ConversationId, Conversation>>,
}

impl ConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current step of a conversation; `Idle` when none is open.
    pub async fn step(&self, id: ConversationId) -> Step {
        self.conversations
            .read()
            .await
            .get(&id)
            .map(|c| c.step)
            .unwrap_or(Step::Idle)
    }

    /// Snapshot of a conversation.
    pub async fn get(&self, id: ConversationId) -> Option<Conversation> {
        self.conversations.read().await.get(&id).cloned()
    }

    /// Opens a fresh conversation at `step`, discarding any previous one.
    pub async fn begin(&self, id: ConversationId, step: Step) -> Conversation {
        let conversation = Conversation::new(step);
        self.conversations
            .write()
            .await
            .insert(id, conversation.clone());
        conversation
    }

    /// Runs `f` on an open conversation under the write lock.
    ///
    /// Returns `None` without calling `f` when the conversation is idle.
    pub async fn update<R>(
        &self,
        id: ConversationId,
        f: impl FnOnce(&mut Conversation) -> R,
    ) -> Option<R> {
        self.conversations.write().await.get_mut(&id).map(f)
    }

    /// Removes a conversation, returning it to idle.
    pub async fn remove(&self, id: ConversationId) -> Option<Conversation> {
        self.conversations.write().await.remove(&id)
    }

    /// Removes a conversation only if it is at `step`.
    pub async fn take_at(&self, id: ConversationId, step: Step) -> Option<Conversation> {
        let mut conversations = self.conversations.write().await;
        if conversations.get(&id).map(|c| c.step) == Some(step) {
            conversations.remove(&id)
        } else {
            None
        }
    }

    /// Number of open conversations.
    pub async fn len(&self) -> usize {
        self.conversations.read().await.len()
    }

    /// Whether no conversation is open.
    pub async fn is_empty(&self) -> bool {
        self.conversations.read().await.is_empty()
    }
}
