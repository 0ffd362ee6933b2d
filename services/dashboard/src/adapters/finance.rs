//! services/dashboard/src/adapters/finance.rs

use crate::adapters::http::BackendClient;
use async_trait::async_trait;
use travel_portal_core::domain::FinanceSummary;
use travel_portal_core::ports::{FinanceService, PortResult};

#[derive(Clone)]
pub struct FinanceAdapter {
    client: BackendClient,
}

impl FinanceAdapter {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl FinanceService for FinanceAdapter {
    async fn summary(&self, token: Option<&str>) -> PortResult<FinanceSummary> {
        self.client.get(token, &["finance", "summary"], &[]).await
    }
}
