//! crates/travel_portal_core/src/ports.rs
//!
//! Defines the service contracts (traits) the dashboard uses to reach the travel
//! backend. The traits form the boundary between the page controllers and the
//! HTTP adapters, so controllers and handlers can be exercised without a network.
//!
//! Every authenticated operation takes the caller's token as `Option<&str>`.
//! Implementations must fail with [`ErrorKind::Unauthenticated`] before doing
//! any I/O when the token is `None`.

use crate::domain::{
    BlogPost, ChatMessage, CommissionListing, Conversation, Document, FinanceSummary,
    GalleryItem, Package, Paginated, Payment, ReferralCode, Registration, Role, Session,
    UserProfile,
};
use crate::listing::ListQuery;
use crate::validation::{
    BlogPostForm, DocumentUploadForm, GalleryUploadForm, LoginForm, PackageForm, PaymentForm,
    PaymentVerification, ProfileUpdateForm, RegisterForm, StartRegistrationForm,
};
use async_trait::async_trait;
use serde::Serialize;
use std::fmt;

//=========================================================================================
// Unified Error and Result Types
//=========================================================================================

/// The client-observable failure categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// No token was available when the call was made.
    Unauthenticated,
    /// The backend rejected the bearer token (401/403).
    Unauthorized,
    NotFound,
    /// Local form validation or a backend payload rejection.
    Validation,
    /// Anything else, including transport and decoding failures.
    Server,
}

impl ErrorKind {
    /// Message used when the backend does not supply one.
    pub fn fallback_message(&self) -> &'static str {
        match self {
            ErrorKind::Unauthenticated => "Sesi tidak ditemukan, silakan login kembali",
            ErrorKind::Unauthorized => "Akses ditolak, silakan login kembali",
            ErrorKind::NotFound => "Data tidak ditemukan",
            ErrorKind::Validation => "Data yang dikirim tidak valid",
            ErrorKind::Server => "Terjadi kesalahan pada server",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Unauthenticated => "unauthenticated",
            ErrorKind::Unauthorized => "unauthorized",
            ErrorKind::NotFound => "not found",
            ErrorKind::Validation => "validation failed",
            ErrorKind::Server => "server error",
        };
        f.write_str(name)
    }
}

/// A single error type for all port operations, tagged with its [`ErrorKind`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct PortError {
    pub kind: ErrorKind,
    pub message: String,
}

impl PortError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Builds an error from an optional server message, using the kind's fallback.
    pub fn from_server_message(kind: ErrorKind, message: Option<String>) -> Self {
        let message = message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| kind.fallback_message().to_string());
        Self { kind, message }
    }

    pub fn unauthenticated() -> Self {
        Self::new(
            ErrorKind::Unauthenticated,
            ErrorKind::Unauthenticated.fallback_message(),
        )
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unauthorized, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    pub fn server(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Server, message)
    }

    /// Whether this failure means the current session can no longer be used.
    pub fn invalidates_session(&self) -> bool {
        matches!(self.kind, ErrorKind::Unauthenticated | ErrorKind::Unauthorized)
    }
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait AuthService: Send + Sync {
    /// Exchanges credentials for a session. Does not require a token.
    async fn login(&self, form: &LoginForm) -> PortResult<Session>;

    /// Creates a new jamaah account. Does not require a token.
    async fn register(&self, form: &RegisterForm) -> PortResult<UserProfile>;

    /// Re-validates a token by fetching the profile it belongs to.
    async fn current_user(&self, token: Option<&str>) -> PortResult<UserProfile>;
}

#[async_trait]
pub trait UserService: Send + Sync {
    async fn list_users(
        &self,
        token: Option<&str>,
        query: &ListQuery,
        role: Option<Role>,
    ) -> PortResult<Paginated<UserProfile>>;

    async fn update_profile(
        &self,
        token: Option<&str>,
        user_id: &str,
        form: &ProfileUpdateForm,
    ) -> PortResult<UserProfile>;
}

#[async_trait]
pub trait PackageService: Send + Sync {
    async fn list_packages(
        &self,
        token: Option<&str>,
        query: &ListQuery,
    ) -> PortResult<Paginated<Package>>;

    async fn get_package(&self, token: Option<&str>, package_id: &str) -> PortResult<Package>;

    async fn create_package(&self, token: Option<&str>, form: &PackageForm) -> PortResult<Package>;
}

#[async_trait]
pub trait RegistrationService: Send + Sync {
    async fn start_registration(
        &self,
        token: Option<&str>,
        form: &StartRegistrationForm,
    ) -> PortResult<Registration>;

    async fn my_registrations(
        &self,
        token: Option<&str>,
        query: &ListQuery,
    ) -> PortResult<Paginated<Registration>>;
}

#[async_trait]
pub trait PaymentService: Send + Sync {
    /// Submits a payment with its proof of transfer as a multipart body.
    async fn create_payment(&self, token: Option<&str>, form: &PaymentForm) -> PortResult<Payment>;

    async fn my_payments(
        &self,
        token: Option<&str>,
        query: &ListQuery,
    ) -> PortResult<Paginated<Payment>>;

    async fn verify_payment(
        &self,
        token: Option<&str>,
        payment_id: &str,
        verification: &PaymentVerification,
    ) -> PortResult<Payment>;
}

#[async_trait]
pub trait DocumentService: Send + Sync {
    async fn list_documents(
        &self,
        token: Option<&str>,
        query: &ListQuery,
    ) -> PortResult<Paginated<Document>>;

    async fn upload_document(
        &self,
        token: Option<&str>,
        form: &DocumentUploadForm,
    ) -> PortResult<Document>;
}

#[async_trait]
pub trait CommissionService: Send + Sync {
    async fn my_commissions(
        &self,
        token: Option<&str>,
        query: &ListQuery,
    ) -> PortResult<CommissionListing>;

    async fn generate_referral(&self, token: Option<&str>) -> PortResult<ReferralCode>;
}

#[async_trait]
pub trait ChatService: Send + Sync {
    async fn conversations(&self, token: Option<&str>) -> PortResult<Vec<Conversation>>;

    /// Fetches the full history of a room. There is no incremental fetch.
    async fn messages(&self, token: Option<&str>, room_id: &str) -> PortResult<Vec<ChatMessage>>;

    /// Posts a message and returns the server's echo of it.
    async fn send_message(
        &self,
        token: Option<&str>,
        room_id: &str,
        content: &str,
    ) -> PortResult<ChatMessage>;
}

#[async_trait]
pub trait BlogService: Send + Sync {
    async fn list_posts(
        &self,
        token: Option<&str>,
        query: &ListQuery,
    ) -> PortResult<Paginated<BlogPost>>;

    async fn create_post(&self, token: Option<&str>, form: &BlogPostForm) -> PortResult<BlogPost>;
}

#[async_trait]
pub trait GalleryService: Send + Sync {
    async fn list_items(
        &self,
        token: Option<&str>,
        query: &ListQuery,
    ) -> PortResult<Paginated<GalleryItem>>;

    async fn upload_item(
        &self,
        token: Option<&str>,
        form: &GalleryUploadForm,
    ) -> PortResult<GalleryItem>;
}

#[async_trait]
pub trait FinanceService: Send + Sync {
    async fn summary(&self, token: Option<&str>) -> PortResult<FinanceSummary>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_server_message_falls_back_per_kind() {
        let err = PortError::from_server_message(ErrorKind::NotFound, None);
        assert_eq!(err.message, "Data tidak ditemukan");

        let err = PortError::from_server_message(ErrorKind::Validation, Some("  ".into()));
        assert_eq!(err.message, ErrorKind::Validation.fallback_message());

        let err = PortError::from_server_message(ErrorKind::Server, Some("Kuota habis".into()));
        assert_eq!(err.message, "Kuota habis");
    }

    #[test]
    fn only_auth_failures_invalidate_the_session() {
        assert!(PortError::unauthenticated().invalidates_session());
        assert!(PortError::unauthorized("expired").invalidates_session());
        assert!(!PortError::not_found("x").invalidates_session());
        assert!(!PortError::server("boom").invalidates_session());
    }
}
