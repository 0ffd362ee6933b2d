//! services/dashboard/src/web/auth.rs
//!
//! Public authentication routes: login, account registration and logout.

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Redirect, Response},
    Json,
};
use std::sync::Arc;
use tracing::{info, warn};
use travel_portal_core::guard::{LOGIN_PATH, PROTECTED_AREA, REGISTER_PATH};
use travel_portal_core::validation::{LoginForm, RegisterForm};

use crate::web::cookies::{attach, session_cookies, session_token};
use crate::web::responses::{invalid_form, redirect_to_login, status_for, ErrorBody};
use crate::web::state::AppState;
use crate::web::views::{AuthPage, Mutation};

//=========================================================================================
// Pages
//=========================================================================================

/// GET /login - Describe the login form
#[utoipa::path(
    get,
    path = "/login",
    responses(
        (status = 200, description = "Login page", body = AuthPage),
        (status = 303, description = "Already signed in; redirected to /dashboard")
    )
)]
pub async fn login_page() -> Json<AuthPage> {
    Json(AuthPage {
        page: "login",
        action: LOGIN_PATH,
        alternate: REGISTER_PATH,
    })
}

/// GET /register - Describe the account registration form
#[utoipa::path(
    get,
    path = "/register",
    responses(
        (status = 200, description = "Registration page", body = AuthPage),
        (status = 303, description = "Already signed in; redirected to /dashboard")
    )
)]
pub async fn register_page() -> Json<AuthPage> {
    Json(AuthPage {
        page: "register",
        action: REGISTER_PATH,
        alternate: LOGIN_PATH,
    })
}

//=========================================================================================
// Handlers
//=========================================================================================

/// POST /login - Sign in and start a session
#[utoipa::path(
    post,
    path = "/login",
    request_body(content_type = "application/json", description = "`{ email, password }`"),
    responses(
        (status = 303, description = "Signed in; token and role cookies set, redirected to /dashboard"),
        (status = 401, description = "Invalid credentials", body = ErrorBody),
        (status = 422, description = "Invalid form", body = ErrorBody),
        (status = 502, description = "Backend unavailable", body = ErrorBody)
    )
)]
pub async fn login_handler(
    State(state): State<Arc<AppState>>,
    Json(form): Json<LoginForm>,
) -> Response {
    // 1. Validate locally; nothing is sent on failure
    if let Err(errors) = form.validate() {
        return invalid_form(errors);
    }

    // 2. Authenticate against the backend
    let session = match state.auth.login(&form).await {
        Ok(session) => session,
        Err(err) => {
            warn!("Login failed: {}", err);
            return (status_for(err.kind), Json(ErrorBody::failure("Login gagal", &err)))
                .into_response();
        }
    };

    // 3. Store the session and mirror it into cookies
    info!("User {} signed in as {}", session.user.id, session.role);
    let cookies = session_cookies(&session, state.config.cookie_secure);
    state.open_session(session).await;

    attach(Redirect::to(PROTECTED_AREA).into_response(), cookies)
}

/// POST /register - Create a jamaah account
#[utoipa::path(
    post,
    path = "/register",
    request_body(
        content_type = "application/json",
        description = "`{ name, email, phone, password, confirmPassword, referralCode? }`"
    ),
    responses(
        (status = 201, description = "Account created; sign in next"),
        (status = 422, description = "Invalid form or rejected by the backend", body = ErrorBody),
        (status = 502, description = "Backend unavailable", body = ErrorBody)
    )
)]
pub async fn register_handler(
    State(state): State<Arc<AppState>>,
    Json(form): Json<RegisterForm>,
) -> Response {
    if let Err(errors) = form.validate() {
        return invalid_form(errors);
    }

    match state.auth.register(&form).await {
        Ok(user) => {
            info!("Registered new account {}", user.id);
            (
                StatusCode::CREATED,
                Json(Mutation::new(user, "Registrasi berhasil, silakan masuk")),
            )
                .into_response()
        }
        Err(err) => {
            warn!("Registration failed: {}", err);
            (status_for(err.kind), Json(ErrorBody::failure("Registrasi gagal", &err)))
                .into_response()
        }
    }
}

/// POST /logout - End the session
///
/// Always clears both cookies, even if the session was already gone.
#[utoipa::path(
    post,
    path = "/logout",
    responses(
        (status = 303, description = "Session cleared; redirected to /login")
    )
)]
pub async fn logout_handler(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    if let Some(token) = session_token(&headers) {
        if let Some(session) = state.end_session(token).await {
            info!("User {} signed out", session.user.id);
        }
    }
    redirect_to_login(state.config.cookie_secure)
}
