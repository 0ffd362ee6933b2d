//! services/dashboard/src/adapters/registrations.rs
//!
//! Adapter for package registrations.

use crate::adapters::http::BackendClient;
use async_trait::async_trait;
use travel_portal_core::domain::{Paginated, Registration};
use travel_portal_core::listing::ListQuery;
use travel_portal_core::ports::{PortResult, RegistrationService};
use travel_portal_core::validation::StartRegistrationForm;

#[derive(Clone)]
pub struct RegistrationAdapter {
    client: BackendClient,
}

impl RegistrationAdapter {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RegistrationService for RegistrationAdapter {
    async fn start_registration(
        &self,
        token: Option<&str>,
        form: &StartRegistrationForm,
    ) -> PortResult<Registration> {
        self.client
            .post_json(token, &["registrations", "start"], form)
            .await
    }

    async fn my_registrations(
        &self,
        token: Option<&str>,
        query: &ListQuery,
    ) -> PortResult<Paginated<Registration>> {
        self.client
            .get(token, &["registrations", "my-registrations"], &query.to_pairs())
            .await
    }
}
