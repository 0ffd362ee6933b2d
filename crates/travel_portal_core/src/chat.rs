//! crates/travel_portal_core/src/chat.rs
//!
//! State machine behind the support chat page.
//!
//! The page shows either the conversation list or a single active conversation.
//! Message history is always fetched in full when a conversation is selected.
//! Sends are not optimistic: only the server's echo is appended.

use crate::domain::{ChatMessage, Conversation};
use crate::listing::{LoadState, Notification};
use crate::ports::{PortError, PortResult};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum ChatView {
    ConversationList,
    ActiveConversation { room_id: String },
}

/// A message ready to be posted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMessage {
    pub room_id: String,
    pub content: String,
}

#[derive(Debug, Clone)]
pub struct ChatController {
    view: ChatView,
    conversations: Vec<Conversation>,
    messages: Vec<ChatMessage>,
    draft: String,
    state: LoadState,
    sending: bool,
    notification: Option<Notification>,
}

impl Default for ChatController {
    fn default() -> Self {
        Self {
            view: ChatView::ConversationList,
            conversations: Vec::new(),
            messages: Vec::new(),
            draft: String::new(),
            state: LoadState::Idle,
            sending: false,
            notification: None,
        }
    }
}

impl ChatController {
    pub fn new() -> Self {
        Self::default()
    }

    // --- Conversation list ---

    pub fn begin_conversations(&mut self) {
        self.state = LoadState::Loading;
    }

    pub fn finish_conversations(
        &mut self,
        result: PortResult<Vec<Conversation>>,
    ) -> Result<(), PortError> {
        match result {
            Ok(conversations) => {
                self.conversations = conversations;
                self.state = LoadState::Success;
                Ok(())
            }
            Err(err) => {
                self.state = LoadState::Error;
                self.notification = Some(Notification::failure("Gagal memuat percakapan", &err));
                Err(err)
            }
        }
    }

    /// Returns to the conversation list. The message list is dropped.
    pub fn back(&mut self) {
        self.view = ChatView::ConversationList;
        self.messages.clear();
        self.draft.clear();
    }

    // --- Active conversation ---

    /// Switches to a conversation and enters `Loading` for its history.
    pub fn select(&mut self, room_id: impl Into<String>) {
        let room_id = room_id.into();
        if self.active_room() != Some(room_id.as_str()) {
            self.draft.clear();
        }
        self.view = ChatView::ActiveConversation { room_id };
        self.state = LoadState::Loading;
    }

    /// Replaces the message list with the fetched history.
    ///
    /// On failure the view stays on the selected conversation and whatever was
    /// shown before is kept.
    pub fn finish_messages(&mut self, result: PortResult<Vec<ChatMessage>>) -> Result<(), PortError> {
        match result {
            Ok(messages) => {
                self.messages = messages;
                self.state = LoadState::Success;
                Ok(())
            }
            Err(err) => {
                self.state = LoadState::Error;
                self.notification = Some(Notification::failure("Gagal memuat pesan", &err));
                Err(err)
            }
        }
    }

    /// Validates a send request and records it as the draft.
    ///
    /// Returns `None` (with a notification queued) if no conversation is active
    /// or the content is blank.
    pub fn prepare_send(&mut self, content: &str) -> Option<OutgoingMessage> {
        self.draft = content.to_string();
        let Some(room_id) = self.active_room().map(str::to_string) else {
            self.notification = Some(Notification::info("Pilih percakapan terlebih dahulu"));
            return None;
        };
        let trimmed = content.trim();
        if trimmed.is_empty() {
            self.notification = Some(Notification::info("Pesan tidak boleh kosong"));
            return None;
        }
        self.sending = true;
        Some(OutgoingMessage {
            room_id,
            content: trimmed.to_string(),
        })
    }

    /// Applies the outcome of a send. Only the echoed message is appended; on
    /// failure the draft is kept so the user can retry.
    pub fn finish_send(&mut self, result: PortResult<ChatMessage>) -> Result<(), PortError> {
        self.sending = false;
        match result {
            Ok(echo) => {
                self.messages.push(echo);
                self.draft.clear();
                Ok(())
            }
            Err(err) => {
                self.notification = Some(Notification::failure("Gagal mengirim pesan", &err));
                Err(err)
            }
        }
    }

    pub fn take_notification(&mut self) -> Option<Notification> {
        self.notification.take()
    }

    pub fn active_room(&self) -> Option<&str> {
        match &self.view {
            ChatView::ActiveConversation { room_id } => Some(room_id.as_str()),
            ChatView::ConversationList => None,
        }
    }

    pub fn view(&self) -> &ChatView {
        &self.view
    }

    pub fn conversations(&self) -> &[Conversation] {
        &self.conversations
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn is_sending(&self) -> bool {
        self.sending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(id: &str, content: &str) -> ChatMessage {
        ChatMessage {
            id: id.to_string(),
            room_id: Some("room-1".into()),
            sender_id: None,
            sender_name: None,
            content: content.to_string(),
            created_at: None,
        }
    }

    #[test]
    fn selecting_replaces_message_history() {
        let mut chat = ChatController::new();
        chat.select("room-1");
        chat.finish_messages(Ok(vec![message("1", "salam")])).unwrap();
        chat.select("room-2");
        assert_eq!(chat.state(), LoadState::Loading);
        chat.finish_messages(Ok(vec![message("9", "halo"), message("10", "ok")]))
            .unwrap();
        assert_eq!(chat.messages().len(), 2);
        assert_eq!(chat.active_room(), Some("room-2"));
    }

    #[test]
    fn send_appends_only_the_echo() {
        let mut chat = ChatController::new();
        chat.select("room-1");
        chat.finish_messages(Ok(vec![message("1", "salam")])).unwrap();

        let out = chat.prepare_send("  kapan berangkat?  ").unwrap();
        assert_eq!(out.room_id, "room-1");
        assert_eq!(out.content, "kapan berangkat?");
        assert_eq!(chat.messages().len(), 1);
        assert!(chat.is_sending());

        chat.finish_send(Ok(message("2", "kapan berangkat? (server)"))).unwrap();
        assert_eq!(chat.messages().len(), 2);
        assert_eq!(chat.messages()[1].content, "kapan berangkat? (server)");
        assert_eq!(chat.draft(), "");
        assert!(!chat.is_sending());
    }

    #[test]
    fn failed_send_keeps_draft_and_notifies() {
        let mut chat = ChatController::new();
        chat.select("room-1");
        chat.finish_messages(Ok(vec![])).unwrap();

        chat.prepare_send("halo").unwrap();
        assert!(chat.finish_send(Err(PortError::server("down"))).is_err());
        assert!(chat.messages().is_empty());
        assert_eq!(chat.draft(), "halo");
        assert!(chat.take_notification().is_some());
        assert!(chat.take_notification().is_none());
    }

    #[test]
    fn blank_or_roomless_sends_are_rejected_locally() {
        let mut chat = ChatController::new();
        assert!(chat.prepare_send("halo").is_none());
        assert!(chat.take_notification().is_some());

        chat.select("room-1");
        assert!(chat.prepare_send("   ").is_none());
        assert!(!chat.is_sending());
        assert!(chat.take_notification().is_some());
    }

    #[test]
    fn back_returns_to_list_and_drops_messages() {
        let mut chat = ChatController::new();
        chat.select("room-1");
        chat.finish_messages(Ok(vec![message("1", "salam")])).unwrap();
        chat.back();
        assert_eq!(chat.view(), &ChatView::ConversationList);
        assert!(chat.messages().is_empty());
    }
}
