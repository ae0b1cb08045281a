//! Telegram transport: command parsing, routing and reply rendering.

pub mod handlers;

use crate::core::dialog::{ConversationKey, Input, Keyboard, ParticipantId};
use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;
use teloxide::types::{KeyboardButton, KeyboardMarkup, KeyboardRemove, ReplyMarkup};
use teloxide::utils::command::BotCommands;

#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Available commands:")]
pub enum Command {
    #[command(description = "show the welcome message")]
    Start,
    #[command(description = "show the command list")]
    Help,
    #[command(description = "log in with phone and password")]
    Login,
    #[command(description = "register a client appointment")]
    New,
    #[command(description = "show the latest bookings")]
    List,
    #[command(description = "cancel the current input")]
    Cancel,
}

impl From<Command> for Input {
    fn from(command: Command) -> Self {
        match command {
            Command::Start => Input::Start,
            Command::Help => Input::Help,
            Command::Login => Input::Login,
            Command::New => Input::NewBooking,
            Command::List => Input::ListBookings,
            Command::Cancel => Input::Cancel,
        }
    }
}

/// Commands first; everything else falls through to the conversation handler.
pub fn schema() -> UpdateHandler<anyhow::Error> {
    dptree::entry()
        .branch(
            Update::filter_message()
                .filter_command::<Command>()
                .endpoint(handlers::command_handler),
        )
        .branch(Update::filter_message().endpoint(handlers::message_handler))
}

/// Conversations are per user and per chat; anonymous senders have none.
pub fn conversation_key(msg: &Message) -> Option<ConversationKey> {
    let user = msg.from.as_ref()?;
    Some(ConversationKey {
        chat_id: msg.chat.id.0,
        participant: ParticipantId(user.id.0),
    })
}

/// Renders suggested replies as a one-time keyboard with one option per row.
pub fn reply_markup(keyboard: &Keyboard) -> Option<ReplyMarkup> {
    match keyboard {
        Keyboard::Unchanged => None,
        Keyboard::Options(options) => {
            let rows = options
                .iter()
                .map(|option| vec![KeyboardButton::new(option.clone())]);
            Some(
                KeyboardMarkup::new(rows)
                    .one_time_keyboard()
                    .resize_keyboard()
                    .into(),
            )
        }
        Keyboard::Remove => Some(KeyboardRemove::new().into()),
    }
}
