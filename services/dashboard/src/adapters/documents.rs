//! services/dashboard/src/adapters/documents.rs
//!
//! Adapter for jamaah travel documents (KTP, passport, vaccine card, ...).

use crate::adapters::http::{file_part, BackendClient};
use async_trait::async_trait;
use reqwest::multipart::Form;
use travel_portal_core::domain::{Document, Paginated};
use travel_portal_core::listing::ListQuery;
use travel_portal_core::ports::{DocumentService, PortError, PortResult};
use travel_portal_core::validation::DocumentUploadForm;

#[derive(Clone)]
pub struct DocumentAdapter {
    client: BackendClient,
}

impl DocumentAdapter {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl DocumentService for DocumentAdapter {
    async fn list_documents(
        &self,
        token: Option<&str>,
        query: &ListQuery,
    ) -> PortResult<Paginated<Document>> {
        self.client
            .get(token, &["documents"], &query.to_pairs())
            .await
    }

    async fn upload_document(
        &self,
        token: Option<&str>,
        form: &DocumentUploadForm,
    ) -> PortResult<Document> {
        if token.is_none() {
            return Err(PortError::unauthenticated());
        }
        let file = form
            .file
            .as_ref()
            .ok_or_else(|| PortError::validation("File wajib diunggah"))?;
        let multipart = Form::new()
            .text("documentType", form.document_type.clone())
            .part("file", file_part(file)?);
        self.client
            .post_multipart(token, &["documents"], multipart)
            .await
    }
}
