//! Chat transcript collaborators for `vlist`.
//!
//! The list engine only knows identities and heights. This crate supplies the rest of a chat
//! screen's data flow: the message model, persistence of the session list, and streaming an
//! assistant reply into a transcript so the list can follow it.
//!
//! ```
//! use vlist::ListOptions;
//! use vlist_adapter::{Controller, ControllerOptions};
//! use vlist_chat::{
//!     ChatMessage, ChatSession, CompletionError, CompletionService, KvSessionStore, MemoryKv,
//!     Message, SessionStore, stream_reply,
//! };
//!
//! struct Echo;
//!
//! impl CompletionService for Echo {
//!     fn complete(
//!         &mut self,
//!         history: &[ChatMessage],
//!         on_text: &mut dyn FnMut(&str),
//!     ) -> Result<ChatMessage, CompletionError> {
//!         let last = history.last().map(|m| m.content.clone()).unwrap_or_default();
//!         on_text(&last);
//!         Ok(ChatMessage::assistant(last))
//!     }
//! }
//!
//! let mut list = Controller::new(ListOptions::new(48.0, 3), ControllerOptions::default())?;
//! list.mount(600.0);
//!
//! let mut chat = ChatSession::new("chat-1", "First chat");
//! stream_reply(&mut Echo, &mut chat, Message::user("m1", "hello"), "m2", |s| {
//!     list.sync_items(&s.messages);
//! })?;
//! assert_eq!(list.list().len(), 2);
//!
//! let mut store = KvSessionStore::new(MemoryKv::new());
//! assert!(store.save(std::slice::from_ref(&chat))?);
//! assert_eq!(store.load()?, Some(vec![chat]));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
#![forbid(unsafe_code)]

mod completion;
mod error;
mod model;
mod store;


pub use completion::{CompletionService, StreamingReply, stream_reply};
pub use error::{CompletionError, StoreError};
pub use model::{ChatMessage, ChatSession, Message, Role, Sender};
pub use store::{KeyValue, KvSessionStore, MemoryKv, SESSIONS_KEY, SessionStore};
