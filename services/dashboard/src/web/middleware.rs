//! services/dashboard/src/web/middleware.rs
//!
//! Route guarding and session resolution for the page routes.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use std::sync::Arc;
use tracing::{debug, info, warn};
use travel_portal_core::domain::Session;
use travel_portal_core::guard::{self, GuardDecision};

use crate::web::cookies::session_token;
use crate::web::responses::redirect_to_login;
use crate::web::state::AppState;

/// Applies the access rules to every request before routing.
///
/// Only the presence of the `token` cookie is considered here.
pub async fn route_guard(req: Request, next: Next) -> Response {
    let path = req.uri().path();
    match guard::evaluate(path, session_token(req.headers())) {
        GuardDecision::Allow => next.run(req).await,
        GuardDecision::Redirect(to) => {
            debug!("Guard redirecting {} to {}", path, to);
            Redirect::to(to).into_response()
        }
    }
}

/// Resolves the token cookie to the stored `Session` and inserts it into the
/// request extensions for handlers to use.
///
/// A token the store does not know (e.g. after a restart, or once its entry
/// has outlived the cookies) is re-validated against the backend once. Page
/// state left over for it starts fresh. If that fails, both cookies are
/// cleared and the browser is sent to login.
pub async fn require_session(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Response {
    let secure = state.config.cookie_secure;

    // 1. Extract the token cookie
    let Some(token) = session_token(req.headers()).map(str::to_string) else {
        return redirect_to_login(secure);
    };

    // 2. Look up the session, restoring it from the backend if needed
    let session = match state.sessions.get(&token).await {
        Some(session) => session,
        None => {
            state.views.remove(&token).await;
            match state.auth.current_user(Some(&token)).await {
                Ok(user) => {
                    let session = Session::new(token, user);
                    info!("Restored session for user {}", session.user.id);
                    state.open_session(session.clone()).await;
                    session
                }
                Err(e) => {
                    warn!("Rejecting unknown session token: {}", e);
                    return redirect_to_login(secure);
                }
            }
        }
    };

    // 3. Insert the session into request extensions and continue
    req.extensions_mut().insert(session);
    next.run(req).await
}
