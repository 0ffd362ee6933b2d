//! services/dashboard/src/error.rs
//!
//! Defines the primary error type for the dashboard service.

use crate::config::ConfigError;
use travel_portal_core::ports::PortError;

/// The primary error type for the `dashboard` service.
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    /// Represents an error that occurred during configuration loading.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Represents an error that propagated up from one of the backend ports.
    #[error("Service Port Error: {0}")]
    Port(#[from] PortError),

    /// Represents a failure while building the backend HTTP client.
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Represents a standard Input/Output error (e.g., binding to a network socket).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
