//! services/dashboard/src/web/support.rs
//!
//! The support chat page. The conversation list and the active conversation
//! share one `ChatController` per session.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, warn};
use travel_portal_core::domain::Session;
use travel_portal_core::ports::PortError;
use utoipa::ToSchema;

use crate::web::responses::{session_expired, ErrorBody};
use crate::web::state::AppState;
use crate::web::views::SupportView;

#[derive(Debug, Deserialize, ToSchema)]
pub struct SendMessageRequest {
    pub content: String,
}

async fn render(state: &AppState, token: &str, status: StatusCode) -> Response {
    let view = state
        .views
        .with(token, |v| SupportView::render(&mut v.support))
        .await;
    (status, Json(view)).into_response()
}

/// Applies the session rule to a chat outcome, then renders.
async fn settle(state: &AppState, token: &str, outcome: Result<(), PortError>) -> Response {
    if let Err(err) = outcome {
        if err.invalidates_session() {
            return session_expired(state, token).await;
        }
        warn!("Support chat call failed: {}", err);
    }
    render(state, token, StatusCode::OK).await
}

/// GET /dashboard/support - The conversation list
#[utoipa::path(
    get,
    path = "/dashboard/support",
    responses((status = 200, description = "Conversation list"))
)]
pub async fn conversations_page(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
) -> Response {
    let token = session.token.as_str();
    state
        .views
        .with(token, |v| {
            v.support.back();
            v.support.begin_conversations();
        })
        .await;
    let result = state.chat.conversations(Some(token)).await;
    let outcome = state
        .views
        .with(token, |v| v.support.finish_conversations(result))
        .await;
    settle(&state, token, outcome).await
}

/// GET /dashboard/support/{room_id} - Open a conversation
///
/// Always fetches the full history; there is no push channel, so this is
/// also how new replies are picked up.
#[utoipa::path(
    get,
    path = "/dashboard/support/{room_id}",
    params(("room_id" = String, Path, description = "Conversation room id")),
    responses((status = 200, description = "Active conversation with its messages"))
)]
pub async fn conversation_page(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
    Path(room_id): Path<String>,
) -> Response {
    let token = session.token.as_str();
    state
        .views
        .with(token, |v| v.support.select(room_id.as_str()))
        .await;
    let result = state.chat.messages(Some(token), &room_id).await;
    let outcome = state
        .views
        .with(token, |v| v.support.finish_messages(result))
        .await;
    settle(&state, token, outcome).await
}

/// POST /dashboard/support/{room_id}/messages - Send a message
///
/// Only the message echoed back by the server is appended. A failed send
/// keeps the draft.
#[utoipa::path(
    post,
    path = "/dashboard/support/{room_id}/messages",
    params(("room_id" = String, Path, description = "Conversation room id")),
    request_body = SendMessageRequest,
    responses(
        (status = 200, description = "Conversation after the send attempt"),
        (status = 409, description = "The room is not the open conversation", body = ErrorBody),
        (status = 422, description = "Blank message; nothing was sent")
    )
)]
pub async fn send_message(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
    Path(room_id): Path<String>,
    Json(req): Json<SendMessageRequest>,
) -> Response {
    let token = session.token.as_str();

    // 1. Check the target room and prepare the outgoing message
    let prepared = state
        .views
        .with(token, |v| {
            if v.support.active_room() != Some(room_id.as_str()) {
                return Err(());
            }
            Ok(v.support.prepare_send(&req.content))
        })
        .await;

    let outgoing = match prepared {
        Err(()) => {
            return (
                StatusCode::CONFLICT,
                Json(ErrorBody::message("Buka percakapan ini terlebih dahulu")),
            )
                .into_response();
        }
        Ok(None) => return render(&state, token, StatusCode::UNPROCESSABLE_ENTITY).await,
        Ok(Some(outgoing)) => outgoing,
    };

    // 2. Post it and append the echo
    debug!("Sending support message to room {}", outgoing.room_id);
    let result = state
        .chat
        .send_message(Some(token), &outgoing.room_id, &outgoing.content)
        .await;
    let outcome = state
        .views
        .with(token, |v| v.support.finish_send(result))
        .await;
    settle(&state, token, outcome).await
}
