//! services/dashboard/src/adapters/auth.rs
//!
//! Adapter for the backend's authentication endpoints. It implements the
//! `AuthService` port from the `core` crate.

use crate::adapters::http::BackendClient;
use async_trait::async_trait;
use serde::Deserialize;
use tracing::info;
use travel_portal_core::domain::{Session, UserProfile};
use travel_portal_core::ports::{AuthService, PortResult};
use travel_portal_core::validation::{LoginForm, RegisterForm};

/// The `data` payload of a successful login.
#[derive(Deserialize)]
struct LoginData {
    token: String,
    user: UserProfile,
}

#[derive(Clone)]
pub struct AuthAdapter {
    client: BackendClient,
}

impl AuthAdapter {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AuthService for AuthAdapter {
    async fn login(&self, form: &LoginForm) -> PortResult<Session> {
        let data: LoginData = self
            .client
            .post_public_json(&["auth", "login"], form)
            .await?;
        info!("Backend accepted login for user {}", data.user.id);
        Ok(Session::new(data.token, data.user))
    }

    async fn register(&self, form: &RegisterForm) -> PortResult<UserProfile> {
        self.client
            .post_public_json(&["auth", "register"], form)
            .await
    }

    async fn current_user(&self, token: Option<&str>) -> PortResult<UserProfile> {
        self.client.get(token, &["auth", "users", "me"], &[]).await
    }
}
