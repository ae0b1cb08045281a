//! Process-local session registry.

use crate::core::dialog::ParticipantId;
use crate::core::traits::SessionStore;
use async_trait::async_trait;
use di::{inject, injectable};
use log::debug;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Sessions held in memory only; a restart logs everybody out.
#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<ParticipantId, String>>,
}

#[injectable(SessionStore)]
impl InMemorySessionStore {
    #[inject]
    pub fn new() -> InMemorySessionStore {
        InMemorySessionStore::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, participant: ParticipantId) -> Option<String> {
        self.sessions.read().await.get(&participant).cloned()
    }

    async fn set(&self, participant: ParticipantId, phone: String) {
        let previous = self.sessions.write().await.insert(participant, phone);
        if previous.is_some() {
            debug!("session replaced for participant {}", participant.0);
        }
    }
}
