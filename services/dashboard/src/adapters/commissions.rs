//! services/dashboard/src/adapters/commissions.rs
//!
//! Adapter for agent commissions and referral codes.

use crate::adapters::http::BackendClient;
use async_trait::async_trait;
use serde_json::json;
use travel_portal_core::domain::{CommissionListing, ReferralCode};
use travel_portal_core::listing::ListQuery;
use travel_portal_core::ports::{CommissionService, PortResult};

#[derive(Clone)]
pub struct CommissionAdapter {
    client: BackendClient,
}

impl CommissionAdapter {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CommissionService for CommissionAdapter {
    async fn my_commissions(
        &self,
        token: Option<&str>,
        query: &ListQuery,
    ) -> PortResult<CommissionListing> {
        self.client
            .get(token, &["commission", "my-commissions"], &query.to_pairs())
            .await
    }

    async fn generate_referral(&self, token: Option<&str>) -> PortResult<ReferralCode> {
        self.client
            .post_json(token, &["commission", "generate-referral"], &json!({}))
            .await
    }
}
