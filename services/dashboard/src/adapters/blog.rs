//! services/dashboard/src/adapters/blog.rs

use crate::adapters::http::BackendClient;
use async_trait::async_trait;
use travel_portal_core::domain::{BlogPost, Paginated};
use travel_portal_core::listing::ListQuery;
use travel_portal_core::ports::{BlogService, PortResult};
use travel_portal_core::validation::BlogPostForm;

#[derive(Clone)]
pub struct BlogAdapter {
    client: BackendClient,
}

impl BlogAdapter {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl BlogService for BlogAdapter {
    async fn list_posts(
        &self,
        token: Option<&str>,
        query: &ListQuery,
    ) -> PortResult<Paginated<BlogPost>> {
        self.client
            .get(token, &["blog", "posts"], &query.to_pairs())
            .await
    }

    async fn create_post(&self, token: Option<&str>, form: &BlogPostForm) -> PortResult<BlogPost> {
        self.client.post_json(token, &["blog", "posts"], form).await
    }
}
