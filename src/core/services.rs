//! Implementations for the service the app needs.
//!

use crate::core::dialog::{
    BookingDraft, CANCELLED, ConversationKey, Dialog, Effect, HELP_TEXT, Input, LIST_HEADER,
    LIST_LIMIT, LOGIN_FAILED, LOGIN_REQUIRED, LOGIN_SUCCEEDED, NO_RECORDS, ParticipantId, Reply,
    Transition, WELCOME_TEXT,
};
use crate::core::traits::{ConversationService, SessionStore};
use crate::infrastructure::entities::{Booking, NewBooking};
use crate::infrastructure::password::{is_password_digest, password_digest};
use crate::infrastructure::traits::{BookingRepository, CredentialRepository};
use async_trait::async_trait;
use chrono::{Local, NaiveDate};
use di::{Ref, inject, injectable};
use log::{debug, info, warn};
use std::collections::HashMap;
use std::fmt::Write;
use tokio::sync::Mutex;

pub struct BookingConversationService {
    sessions: Ref<dyn SessionStore>,
    credentials: Ref<dyn CredentialRepository>,
    bookings: Ref<dyn BookingRepository>,
    dialogs: Mutex<HashMap<ConversationKey, Dialog>>,
    today: fn() -> NaiveDate,
}

#[injectable(ConversationService)]
impl BookingConversationService {
    #[inject]
    pub fn new(
        sessions: Ref<dyn SessionStore>,
        credentials: Ref<dyn CredentialRepository>,
        bookings: Ref<dyn BookingRepository>,
    ) -> BookingConversationService {
        Self {
            sessions,
            credentials,
            bookings,
            dialogs: Mutex::new(HashMap::new()),
            today: local_today,
        }
    }
}

impl BookingConversationService {
    /// Replaces the local calendar used for the offered appointment dates.
    pub fn with_clock(mut self, today: fn() -> NaiveDate) -> Self {
        self.today = today;
        self
    }

    /// Stores the follow-up state and carries out the step's effects.
    async fn settle(&self, key: ConversationKey, transition: Transition) -> Vec<Reply> {
        {
            let mut dialogs = self.dialogs.lock().await;
            match transition.next {
                Some(next) => dialogs.insert(key, next),
                None => dialogs.remove(&key),
            };
        }

        let mut replies = Vec::new();
        for effect in transition.effects {
            match effect {
                Effect::Reply(reply) => replies.push(reply),
                Effect::Authenticate { phone, password } => {
                    replies.extend(self.authenticate(key.participant, phone, &password).await)
                }
                Effect::RecordBooking(draft) => replies.push(self.record_booking(draft).await),
            }
        }
        replies
    }

    async fn authenticate(
        &self,
        participant: ParticipantId,
        phone: String,
        password: &str,
    ) -> Vec<Reply> {
        match self
            .credentials
            .find_user_id(&phone, &password_digest(password))
            .await
        {
            Ok(Some(user_id)) => {
                info!("participant {} logged in as user {user_id}", participant.0);
                self.sessions.set(participant, phone).await;
                vec![Reply::text(LOGIN_SUCCEEDED), Reply::text(HELP_TEXT)]
            }
            Ok(None) => {
                self.explain_failed_login(&phone).await;
                vec![Reply::text(LOGIN_FAILED)]
            }
            Err(e) => vec![Reply::text(format!("Login error: {e:#}"))],
        }
    }

    async fn explain_failed_login(&self, phone: &str) {
        match self.credentials.stored_password_hash(phone).await {
            Ok(Some(hash)) if !is_password_digest(&hash) => warn!(
                "failed login for phone {phone}: stored password hash is not SHA-256, \
                 the CRM has probably rehashed it"
            ),
            Ok(_) => warn!("failed login for phone {phone}"),
            Err(e) => {
                debug!("could not inspect the stored hash for {phone}: {e:#}");
                warn!("failed login for phone {phone}");
            }
        }
    }

    async fn record_booking(&self, draft: BookingDraft) -> Reply {
        let booking = NewBooking::pending(draft.name.clone(), draft.phone.clone(), draft.datetime());

        match self.bookings.create_booking(booking).await {
            Ok(id) => {
                info!("booking {id} created for {}", draft.datetime());
                Reply::removing_keyboard(draft.confirmation())
            }
            Err(e) => Reply::removing_keyboard(format!("❌ Booking failed: {e:#}")),
        }
    }

    async fn list_bookings(&self, participant: ParticipantId) -> Reply {
        if !self.sessions.is_authenticated(participant).await {
            return Reply::text(LOGIN_REQUIRED);
        }

        match self.bookings.list_recent_bookings(LIST_LIMIT).await {
            Ok(bookings) if bookings.is_empty() => Reply::text(NO_RECORDS),
            Ok(bookings) => Reply::text(render_bookings(&bookings)),
            Err(e) => Reply::text(format!("Failed to fetch bookings: {e:#}")),
        }
    }
}

#[async_trait]
impl ConversationService for BookingConversationService {
    async fn handle(&self, key: ConversationKey, input: Input) -> Vec<Reply> {
        match input {
            Input::Start => vec![Reply::text(WELCOME_TEXT)],
            Input::Help => vec![Reply::text(HELP_TEXT)],
            Input::Login => self.settle(key, Dialog::begin_login()).await,
            Input::NewBooking => {
                if !self.sessions.is_authenticated(key.participant).await {
                    return vec![Reply::text(LOGIN_REQUIRED)];
                }
                self.settle(key, Dialog::begin_booking((self.today)())).await
            }
            Input::ListBookings => vec![self.list_bookings(key.participant).await],
            Input::Cancel => {
                if self.dialogs.lock().await.remove(&key).is_some() {
                    info!("conversation cancelled in chat {}", key.chat_id);
                }
                vec![Reply::removing_keyboard(CANCELLED)]
            }
            Input::Text(text) => {
                let Some(dialog) = self.dialogs.lock().await.remove(&key) else {
                    return Vec::new();
                };
                self.settle(key, dialog.step(&text)).await
            }
        }
    }

    async fn has_open_dialog(&self, key: ConversationKey) -> bool {
        self.dialogs.lock().await.contains_key(&key)
    }
}

fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Numbered `name | phone | date | status` lines under a header.
pub fn render_bookings(bookings: &[Booking]) -> String {
    let mut text = format!("{LIST_HEADER}\n\n");
    for (i, booking) in bookings.iter().enumerate() {
        let _ = writeln!(
            text,
            "{}. {} | {} | {} | {}",
            i + 1,
            booking.name,
            booking.phone,
            booking.date,
            booking.status
        );
    }
    text
}
