use tracing::{debug, warn};

use crate::error::CompletionError;
use crate::model::{ChatMessage, ChatSession, Message};

/// A chat completion backend that streams its answer.
pub trait CompletionService {
    /// Completes `history`, reporting the cumulative text so far through `on_text` as it arrives.
    fn complete(
        &mut self,
        history: &[ChatMessage],
        on_text: &mut dyn FnMut(&str),
    ) -> Result<ChatMessage, CompletionError>;
}

/// An assistant reply being streamed into a session.
///
/// The reply is a regular message of the transcript from the start. Its text is rewritten in
/// place while the service streams, so it keeps one identity (and one ledger entry) throughout.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StreamingReply {
    id: String,
}

impl StreamingReply {
    /// Appends `user` and an empty assistant placeholder with identity `reply_id`.
    pub fn begin(session: &mut ChatSession, user: Message, reply_id: impl Into<String>) -> Self {
        let id = reply_id.into();
        session.messages.push(user);
        session.messages.push(Message::ai(id.clone(), String::new()));
        Self { id }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// The transcript to send: everything except the placeholder.
    pub fn history(&self, session: &ChatSession) -> Vec<ChatMessage> {
        session
            .messages
            .iter()
            .filter(|m| m.id != self.id)
            .map(ChatMessage::from)
            .collect()
    }

    /// Replaces the placeholder's text. Returns `false` if nothing changed.
    pub fn update(&self, session: &mut ChatSession, text: &str) -> bool {
        match session.messages.iter_mut().find(|m| m.id == self.id) {
            Some(message) if message.text != text => {
                message.text.clear();
                message.text.push_str(text);
                true
            }
            _ => false,
        }
    }

    pub fn finish(self, session: &mut ChatSession, reply: ChatMessage) {
        self.update(session, &reply.content);
    }

    /// Removes the placeholder again.
    pub fn abort(self, session: &mut ChatSession) -> Option<Message> {
        let pos = session.messages.iter().position(|m| m.id == self.id)?;
        Some(session.messages.remove(pos))
    }
}

/// Sends `user` to `service` and streams the answer into `session`.
///
/// `on_update` runs whenever the transcript changed, so the host can resync its list and
/// re-render. On failure the placeholder is removed (the user message stays) and the error is
/// returned. A blank `user` message is rejected with [`CompletionError::BlankPrompt`] before
/// the transcript is touched.
pub fn stream_reply<S: CompletionService + ?Sized>(
    service: &mut S,
    session: &mut ChatSession,
    user: Message,
    reply_id: impl Into<String>,
    mut on_update: impl FnMut(&ChatSession),
) -> Result<(), CompletionError> {
    if user.text.trim().is_empty() {
        debug!("ignoring blank message");
        return Err(CompletionError::BlankPrompt);
    }
    let reply = StreamingReply::begin(session, user, reply_id);
    on_update(session);

    let history = reply.history(session);
    debug!(messages = history.len(), reply = reply.id(), "requesting completion");
    let result = service.complete(&history, &mut |text: &str| {
        if reply.update(session, text) {
            on_update(session);
        }
    });

    match result {
        Ok(answer) => {
            reply.finish(session, answer);
            on_update(session);
            Ok(())
        }
        Err(err) => {
            warn!(%err, reply = reply.id(), "completion failed");
            reply.abort(session);
            on_update(session);
            Err(err)
        }
    }
}
