//! services/dashboard/src/web/responses.rs
//!
//! Shared response builders for the page handlers: error bodies, the
//! session-expired redirect, and the mapping from `PortError` to a status.

use crate::web::cookies::{attach, cleared_cookies};
use crate::web::state::AppState;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use serde::Serialize;
use tracing::{info, warn};
use travel_portal_core::guard::LOGIN_PATH;
use travel_portal_core::ports::{ErrorKind, PortError};
use travel_portal_core::validation::ValidationErrors;
use utoipa::ToSchema;

//=========================================================================================
// Error Bodies
//=========================================================================================

#[derive(Debug, Serialize, ToSchema)]
pub struct FieldMessage {
    pub field: String,
    pub message: String,
}

/// The JSON body returned with every non-redirect failure.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// A localized headline for the failed action.
    pub message: String,
    /// The server's own message, when there is one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldMessage>,
}

impl ErrorBody {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            detail: None,
            fields: Vec::new(),
        }
    }

    pub fn failure(headline: impl Into<String>, err: &PortError) -> Self {
        Self {
            message: headline.into(),
            detail: Some(err.message.clone()),
            fields: Vec::new(),
        }
    }
}

pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::Unauthenticated | ErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Validation => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorKind::Server => StatusCode::BAD_GATEWAY,
    }
}

//=========================================================================================
// Builders
//=========================================================================================

/// 422 with one message per invalid field. Nothing was sent to the backend.
pub fn invalid_form(errors: ValidationErrors) -> Response {
    let body = ErrorBody {
        message: "Periksa kembali isian formulir".to_string(),
        detail: None,
        fields: errors
            .errors
            .into_iter()
            .map(|e| FieldMessage {
                field: e.field.to_string(),
                message: e.message,
            })
            .collect(),
    };
    (StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response()
}

pub fn forbidden() -> Response {
    (
        StatusCode::FORBIDDEN,
        Json(ErrorBody::message("Anda tidak memiliki akses ke halaman ini")),
    )
        .into_response()
}

pub fn bad_request(message: impl Into<String>) -> Response {
    (StatusCode::BAD_REQUEST, Json(ErrorBody::message(message))).into_response()
}

/// A 303 to the login page that also clears both session cookies.
pub fn redirect_to_login(cookie_secure: bool) -> Response {
    attach(
        Redirect::to(LOGIN_PATH).into_response(),
        cleared_cookies(cookie_secure),
    )
}

/// Ends the session behind `token` and sends the browser back to login.
pub async fn session_expired(state: &AppState, token: &str) -> Response {
    if let Some(session) = state.end_session(token).await {
        info!("Session for user {} invalidated", session.user.id);
    }
    redirect_to_login(state.config.cookie_secure)
}

/// Turns a failed backend call into a response.
///
/// Authentication failures end the session; everything else is reported with
/// a status matching the error kind.
pub async fn port_failure(
    state: &AppState,
    token: &str,
    headline: &str,
    err: PortError,
) -> Response {
    if err.invalidates_session() {
        return session_expired(state, token).await;
    }
    warn!("{}: {}", headline, err);
    (status_for(err.kind), Json(ErrorBody::failure(headline, &err))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_kinds_map_to_statuses() {
        assert_eq!(status_for(ErrorKind::NotFound), StatusCode::NOT_FOUND);
        assert_eq!(status_for(ErrorKind::Validation), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(status_for(ErrorKind::Server), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn login_redirect_clears_both_cookies() {
        let response = redirect_to_login(false);
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let cookies: Vec<_> = response
            .headers()
            .get_all(axum::http::header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .collect();
        assert_eq!(cookies.len(), 2);
        assert!(cookies.iter().all(|c| c.contains("Max-Age=0")));
    }
}
