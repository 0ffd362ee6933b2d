//! services/dashboard/src/adapters/users.rs
//!
//! Adapter for account listing and profile updates (`/auth/users`).

use crate::adapters::http::BackendClient;
use async_trait::async_trait;
use travel_portal_core::domain::{Paginated, Role, UserProfile};
use travel_portal_core::listing::ListQuery;
use travel_portal_core::ports::{PortResult, UserService};
use travel_portal_core::validation::ProfileUpdateForm;

#[derive(Clone)]
pub struct UserAdapter {
    client: BackendClient,
}

impl UserAdapter {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl UserService for UserAdapter {
    async fn list_users(
        &self,
        token: Option<&str>,
        query: &ListQuery,
        role: Option<Role>,
    ) -> PortResult<Paginated<UserProfile>> {
        let mut pairs = query.to_pairs();
        if let Some(role) = role {
            pairs.push(("role", role.as_str().to_string()));
        }
        self.client.get(token, &["auth", "users"], &pairs).await
    }

    async fn update_profile(
        &self,
        token: Option<&str>,
        user_id: &str,
        form: &ProfileUpdateForm,
    ) -> PortResult<UserProfile> {
        self.client
            .put_json(token, &["auth", "users", user_id], form)
            .await
    }
}
