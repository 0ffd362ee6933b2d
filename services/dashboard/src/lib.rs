//! The dashboard web service: backend adapters, configuration and the axum
//! page routes. The binaries in `src/bin` are thin wrappers around this crate.

pub mod adapters;
pub mod config;
pub mod error;
pub mod web;

use adapters::{
    AuthAdapter, BackendClient, BlogAdapter, ChatAdapter, CommissionAdapter, DocumentAdapter,
    FinanceAdapter, GalleryAdapter, PackageAdapter, PaymentAdapter, RegistrationAdapter,
    UserAdapter,
};
use config::Config;
use std::sync::Arc;
use web::{AppState, SessionStore, ViewStore};

/// Wires every port to its HTTP adapter over one shared backend client.
pub fn app_state(config: Arc<Config>, client: BackendClient) -> Arc<AppState> {
    Arc::new(AppState {
        auth: Arc::new(AuthAdapter::new(client.clone())),
        users: Arc::new(UserAdapter::new(client.clone())),
        packages: Arc::new(PackageAdapter::new(client.clone())),
        registrations: Arc::new(RegistrationAdapter::new(client.clone())),
        payments: Arc::new(PaymentAdapter::new(client.clone())),
        documents: Arc::new(DocumentAdapter::new(client.clone())),
        commissions: Arc::new(CommissionAdapter::new(client.clone())),
        chat: Arc::new(ChatAdapter::new(client.clone())),
        blog: Arc::new(BlogAdapter::new(client.clone())),
        gallery: Arc::new(GalleryAdapter::new(client.clone())),
        finance: Arc::new(FinanceAdapter::new(client)),
        sessions: Arc::new(SessionStore::new()),
        views: Arc::new(ViewStore::new()),
        config,
    })
}
