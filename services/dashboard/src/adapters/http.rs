//! services/dashboard/src/adapters/http.rs
//!
//! The authenticated request client shared by every backend adapter.
//!
//! Each call reads the caller's token first and fails with `Unauthenticated`
//! before touching the network when it is missing. Responses are decoded from
//! the backend's `{ status, message, data }` envelope; failures are mapped onto
//! the unified `PortError` using the HTTP status and the server's message.

use reqwest::{multipart, Method, RequestBuilder, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, warn};
use travel_portal_core::domain::Upload;
use travel_portal_core::ports::{ErrorKind, PortError, PortResult};
use url::Url;

//=========================================================================================
// Wire Envelope
//=========================================================================================

/// The status/message part of every backend body, decoded before `data`.
#[derive(Deserialize)]
struct EnvelopeHead {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Deserialize)]
struct Envelope<T> {
    data: Option<T>,
}

/// Maps a non-success HTTP status onto an error kind.
pub fn kind_for_status(status: StatusCode) -> ErrorKind {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ErrorKind::Unauthorized,
        StatusCode::NOT_FOUND => ErrorKind::NotFound,
        StatusCode::BAD_REQUEST | StatusCode::CONFLICT | StatusCode::UNPROCESSABLE_ENTITY => {
            ErrorKind::Validation
        }
        _ => ErrorKind::Server,
    }
}

//=========================================================================================
// The Client
//=========================================================================================

#[derive(Clone, Debug)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: Url,
}

impl BackendClient {
    /// Creates a client for the given backend origin.
    pub fn new(base_url: Url, timeout: Option<Duration>) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self::with_client(builder.build()?, base_url))
    }

    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolves path segments under the base URL, percent-encoding each one.
    pub fn endpoint(&self, segments: &[&str]) -> PortResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| PortError::server("Alamat backend tidak valid"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    // --- Authenticated calls ---

    pub async fn get<T: DeserializeOwned>(
        &self,
        token: Option<&str>,
        segments: &[&str],
        query: &[(&str, String)],
    ) -> PortResult<T> {
        let request = self.authorized(Method::GET, token, segments)?.query(query);
        self.send(request).await
    }

    pub async fn post_json<B, T>(&self, token: Option<&str>, segments: &[&str], body: &B) -> PortResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.authorized(Method::POST, token, segments)?.json(body);
        self.send(request).await
    }

    pub async fn put_json<B, T>(&self, token: Option<&str>, segments: &[&str], body: &B) -> PortResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.authorized(Method::PUT, token, segments)?.json(body);
        self.send(request).await
    }

    pub async fn patch_json<B, T>(&self, token: Option<&str>, segments: &[&str], body: &B) -> PortResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.authorized(Method::PATCH, token, segments)?.json(body);
        self.send(request).await
    }

    /// Sends a file-bearing submission. The content type (with its boundary) is
    /// left for the transport to set.
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        token: Option<&str>,
        segments: &[&str],
        form: multipart::Form,
    ) -> PortResult<T> {
        let request = self.authorized(Method::POST, token, segments)?.multipart(form);
        self.send(request).await
    }

    // --- Public calls ---

    /// A JSON POST that carries no bearer token (login, account registration).
    pub async fn post_public_json<B, T>(&self, segments: &[&str], body: &B) -> PortResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(segments)?;
        let request = self.http.post(url).json(body);
        self.send(request).await
    }

    // --- Internals ---

    fn authorized(
        &self,
        method: Method,
        token: Option<&str>,
        segments: &[&str],
    ) -> PortResult<RequestBuilder> {
        let token = token
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(PortError::unauthenticated)?;
        let url = self.endpoint(segments)?;
        Ok(self.http.request(method, url).bearer_auth(token))
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> PortResult<T> {
        let request = request
            .build()
            .map_err(|e| PortError::server(format!("Permintaan tidak valid: {}", e)))?;
        let endpoint = format!("{} {}", request.method(), request.url().path());
        debug!("Calling backend: {}", endpoint);

        let response = self.http.execute(request).await.map_err(|e| {
            error!("Backend unreachable for {}: {}", endpoint, e);
            PortError::server("Tidak dapat terhubung ke server")
        })?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| {
            error!("Failed to read backend response for {}: {}", endpoint, e);
            PortError::server("Gagal membaca respon server")
        })?;

        let head = serde_json::from_slice::<EnvelopeHead>(&body).ok();

        if !status.is_success() {
            let kind = kind_for_status(status);
            warn!("Backend rejected {} with {}", endpoint, status);
            return Err(PortError::from_server_message(kind, head.and_then(|h| h.message)));
        }

        if let Some(head) = &head {
            if head.status.as_deref() == Some("error") {
                warn!("Backend reported an error envelope for {}", endpoint);
                return Err(PortError::from_server_message(
                    ErrorKind::Server,
                    head.message.clone(),
                ));
            }
        }

        let envelope: Envelope<T> = serde_json::from_slice(&body).map_err(|e| {
            error!("Unexpected response shape from {}: {}", endpoint, e);
            PortError::server("Format respon server tidak dikenali")
        })?;

        envelope
            .data
            .ok_or_else(|| PortError::server("Respon server kosong"))
    }
}

//=========================================================================================
// Multipart Helpers
//=========================================================================================

/// Builds a multipart file part from an upload.
pub fn file_part(upload: &Upload) -> PortResult<multipart::Part> {
    multipart::Part::bytes(upload.bytes.to_vec())
        .file_name(upload.file_name.clone())
        .mime_str(&upload.content_type)
        .map_err(|_| PortError::validation("Tipe file tidak dikenali"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> BackendClient {
        let base = Url::parse("http://backend.test/api/").unwrap();
        BackendClient::with_client(reqwest::Client::new(), base)
    }

    #[test]
    fn endpoints_join_under_the_base_path() {
        let url = client().endpoint(&["payments", "12", "verify"]).unwrap();
        assert_eq!(url.as_str(), "http://backend.test/api/payments/12/verify");
    }

    #[test]
    fn path_segments_are_percent_encoded() {
        let url = client().endpoint(&["chat", "messages", "room/1 a"]).unwrap();
        assert_eq!(url.as_str(), "http://backend.test/api/chat/messages/room%2F1%20a");
    }

    #[test]
    fn status_codes_map_to_error_kinds() {
        assert_eq!(kind_for_status(StatusCode::UNAUTHORIZED), ErrorKind::Unauthorized);
        assert_eq!(kind_for_status(StatusCode::FORBIDDEN), ErrorKind::Unauthorized);
        assert_eq!(kind_for_status(StatusCode::NOT_FOUND), ErrorKind::NotFound);
        assert_eq!(kind_for_status(StatusCode::UNPROCESSABLE_ENTITY), ErrorKind::Validation);
        assert_eq!(kind_for_status(StatusCode::BAD_GATEWAY), ErrorKind::Server);
    }

    #[tokio::test]
    async fn missing_token_fails_before_any_request() {
        // The base URL points nowhere; reaching the network would yield a Server error.
        let err = client()
            .get::<serde_json::Value>(None, &["packages"], &[])
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthenticated);

        let err = client()
            .post_json::<_, serde_json::Value>(Some(""), &["packages"], &serde_json::json!({}))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthenticated);
    }
}
