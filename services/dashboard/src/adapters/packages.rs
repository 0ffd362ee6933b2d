//! services/dashboard/src/adapters/packages.rs
//!
//! Adapter for the travel package catalogue.

use crate::adapters::http::BackendClient;
use async_trait::async_trait;
use travel_portal_core::domain::{Package, Paginated};
use travel_portal_core::listing::ListQuery;
use travel_portal_core::ports::{PackageService, PortResult};
use travel_portal_core::validation::PackageForm;

#[derive(Clone)]
pub struct PackageAdapter {
    client: BackendClient,
}

impl PackageAdapter {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PackageService for PackageAdapter {
    async fn list_packages(
        &self,
        token: Option<&str>,
        query: &ListQuery,
    ) -> PortResult<Paginated<Package>> {
        self.client
            .get(token, &["packages"], &query.to_pairs())
            .await
    }

    async fn get_package(&self, token: Option<&str>, package_id: &str) -> PortResult<Package> {
        self.client.get(token, &["packages", package_id], &[]).await
    }

    async fn create_package(&self, token: Option<&str>, form: &PackageForm) -> PortResult<Package> {
        self.client.post_json(token, &["packages"], form).await
    }
}
