//! services/dashboard/src/adapters/gallery.rs

use crate::adapters::http::{file_part, BackendClient};
use async_trait::async_trait;
use reqwest::multipart::Form;
use travel_portal_core::domain::{GalleryItem, Paginated};
use travel_portal_core::listing::ListQuery;
use travel_portal_core::ports::{GalleryService, PortError, PortResult};
use travel_portal_core::validation::GalleryUploadForm;

#[derive(Clone)]
pub struct GalleryAdapter {
    client: BackendClient,
}

impl GalleryAdapter {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl GalleryService for GalleryAdapter {
    async fn list_items(
        &self,
        token: Option<&str>,
        query: &ListQuery,
    ) -> PortResult<Paginated<GalleryItem>> {
        self.client.get(token, &["gallery"], &query.to_pairs()).await
    }

    async fn upload_item(
        &self,
        token: Option<&str>,
        form: &GalleryUploadForm,
    ) -> PortResult<GalleryItem> {
        if token.is_none() {
            return Err(PortError::unauthenticated());
        }
        let image = form
            .image
            .as_ref()
            .ok_or_else(|| PortError::validation("Gambar wajib diunggah"))?;
        let mut multipart = Form::new().text("title", form.title.clone());
        if let Some(description) = &form.description {
            multipart = multipart.text("description", description.clone());
        }
        let multipart = multipart.part("image", file_part(image)?);
        self.client.post_multipart(token, &["gallery"], multipart).await
    }
}
