//! DI "Interfaces"

use crate::core::dialog::{ConversationKey, Input, ParticipantId, Reply};
use async_trait::async_trait;

/// Maps a participant to the phone number they logged in with.
///
/// Entries are only ever written, a later login replacing an earlier one.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Phone number of the current session, if the participant ever logged in.
    async fn get(&self, participant: ParticipantId) -> Option<String>;

    /// Records a successful login, overwriting any previous session.
    async fn set(&self, participant: ParticipantId, phone: String);

    async fn is_authenticated(&self, participant: ParticipantId) -> bool {
        self.get(participant).await.is_some()
    }
}

#[async_trait]
pub trait ConversationService: Send + Sync {
    /// Handles one routed input and returns the replies to send, in order.
    ///
    /// Store failures never surface as `Err`; they are reported to the
    /// participant and end the conversation.
    async fn handle(&self, key: ConversationKey, input: Input) -> Vec<Reply>;

    /// Whether a login or booking conversation is waiting for input.
    async fn has_open_dialog(&self, key: ConversationKey) -> bool;
}
