//! services/dashboard/src/adapters/chat.rs
//!
//! Adapter for the support chat. Polling only; there is no push channel.

use crate::adapters::http::BackendClient;
use async_trait::async_trait;
use serde::Serialize;
use travel_portal_core::domain::{ChatMessage, Conversation};
use travel_portal_core::ports::{ChatService, PortResult};

#[derive(Serialize)]
struct SendBody<'a> {
    content: &'a str,
}

#[derive(Clone)]
pub struct ChatAdapter {
    client: BackendClient,
}

impl ChatAdapter {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ChatService for ChatAdapter {
    async fn conversations(&self, token: Option<&str>) -> PortResult<Vec<Conversation>> {
        self.client.get(token, &["chat", "conversations"], &[]).await
    }

    async fn messages(&self, token: Option<&str>, room_id: &str) -> PortResult<Vec<ChatMessage>> {
        self.client
            .get(token, &["chat", "messages", room_id], &[])
            .await
    }

    async fn send_message(
        &self,
        token: Option<&str>,
        room_id: &str,
        content: &str,
    ) -> PortResult<ChatMessage> {
        self.client
            .post_json(token, &["chat", "messages", room_id], &SendBody { content })
            .await
    }
}
