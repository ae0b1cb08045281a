//! Dispatcher endpoints

use crate::core::dialog::{Input, Reply};
use crate::core::traits::ConversationService;
use crate::telegram::{Command, conversation_key, reply_markup};
use di::Ref;
use log::debug;
use teloxide::prelude::*;

pub async fn command_handler(
    bot: Bot,
    msg: Message,
    cmd: Command,
    conversation_service: Ref<dyn ConversationService>,
) -> anyhow::Result<()> {
    let Some(key) = conversation_key(&msg) else {
        return Ok(());
    };

    debug!("command {cmd:?} in chat {}", msg.chat.id);
    let replies = conversation_service.handle(key, cmd.into()).await;
    send_replies(&bot, msg.chat.id, replies).await
}

/// Plain text feeds the open conversation, if any.
pub async fn message_handler(
    bot: Bot,
    msg: Message,
    conversation_service: Ref<dyn ConversationService>,
) -> anyhow::Result<()> {
    let (Some(key), Some(text)) = (conversation_key(&msg), msg.text()) else {
        return Ok(());
    };

    // Unknown commands are not answers to a prompt.
    if text.starts_with('/') {
        return Ok(());
    }

    let replies = conversation_service
        .handle(key, Input::Text(text.to_owned()))
        .await;
    send_replies(&bot, msg.chat.id, replies).await
}

async fn send_replies(bot: &Bot, chat_id: ChatId, replies: Vec<Reply>) -> anyhow::Result<()> {
    for reply in replies {
        let request = bot.send_message(chat_id, reply.text);
        match reply_markup(&reply.keyboard) {
            Some(markup) => request.reply_markup(markup).await?,
            None => request.await?,
        };
    }
    Ok(())
}
