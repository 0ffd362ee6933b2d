//! services/dashboard/src/web/pages.rs
//!
//! Read-only page routes under `/dashboard`. Every handler here runs behind
//! `require_session`, so the `Session` extension is always present.

use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    Extension, Json,
};
use std::sync::Arc;
use tracing::warn;
use travel_portal_core::domain::{Role, Session};
use travel_portal_core::listing::Notification;

use crate::web::cookies::{attach, session_cookies};
use crate::web::lists::{list_page, ListParams};
use crate::web::responses::{forbidden, port_failure, session_expired, ErrorBody};
use crate::web::state::AppState;
use crate::web::views::{menu_for, CommissionPage, DashboardHome, ListView};

fn is_staff(role: Role) -> bool {
    role.is_admin() || role.is_agent()
}

//=========================================================================================
// Overview
//=========================================================================================

/// GET /dashboard - Overview for the signed-in user
///
/// Re-validates the token against the backend and refreshes the stored
/// profile. The role cookie is rewritten from the refreshed session.
#[utoipa::path(
    get,
    path = "/dashboard",
    responses(
        (status = 200, description = "Profile, role and the role's menu"),
        (status = 303, description = "No session; redirected to /login")
    )
)]
pub async fn dashboard_home(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
) -> Response {
    let result = state.auth.current_user(Some(&session.token)).await;
    match result {
        Ok(user) => {
            let session = Session::new(session.token, user);
            let cookies = session_cookies(&session, state.config.cookie_secure);
            state.open_session(session.clone()).await;
            let home = DashboardHome {
                menu: menu_for(session.role),
                role: session.role,
                user: session.user,
                notification: None,
            };
            attach(Json(home).into_response(), cookies)
        }
        Err(err) if err.invalidates_session() => session_expired(&state, &session.token).await,
        Err(err) => {
            warn!("Profile refresh failed: {}", err);
            Json(DashboardHome {
                menu: menu_for(session.role),
                role: session.role,
                user: session.user,
                notification: Some(Notification::failure("Gagal memuat profil", &err)),
            })
            .into_response()
        }
    }
}

//=========================================================================================
// Lists
//=========================================================================================

/// GET /dashboard/packages - Travel packages
#[utoipa::path(
    get,
    path = "/dashboard/packages",
    params(ListParams),
    responses((status = 200, description = "Paged package list"))
)]
pub async fn packages_page(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
    Query(params): Query<ListParams>,
) -> Response {
    let (state, token) = (&*state, session.token.as_str());
    list_page(state, token, &params, |v| &mut v.packages, "Gagal memuat paket", |q| async move {
        state.packages.list_packages(Some(token), &q).await
    })
    .await
}

/// GET /dashboard/packages/{id} - One package
#[utoipa::path(
    get,
    path = "/dashboard/packages/{id}",
    params(("id" = String, Path, description = "Package id")),
    responses(
        (status = 200, description = "Package detail"),
        (status = 404, description = "No such package", body = ErrorBody)
    )
)]
pub async fn package_detail(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
    Path(id): Path<String>,
) -> Response {
    match state.packages.get_package(Some(&session.token), &id).await {
        Ok(package) => Json(package).into_response(),
        Err(err) => port_failure(&state, &session.token, "Gagal memuat paket", err).await,
    }
}

/// GET /dashboard/registrations - The user's registrations
#[utoipa::path(
    get,
    path = "/dashboard/registrations",
    params(ListParams),
    responses((status = 200, description = "Paged registration list"))
)]
pub async fn registrations_page(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
    Query(params): Query<ListParams>,
) -> Response {
    let (state, token) = (&*state, session.token.as_str());
    list_page(
        state,
        token,
        &params,
        |v| &mut v.registrations,
        "Gagal memuat pendaftaran",
        |q| async move { state.registrations.my_registrations(Some(token), &q).await },
    )
    .await
}

/// GET /dashboard/payments - The user's payments
#[utoipa::path(
    get,
    path = "/dashboard/payments",
    params(ListParams),
    responses((status = 200, description = "Paged payment list"))
)]
pub async fn payments_page(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
    Query(params): Query<ListParams>,
) -> Response {
    let (state, token) = (&*state, session.token.as_str());
    list_page(state, token, &params, |v| &mut v.payments, "Gagal memuat pembayaran", |q| async move {
        state.payments.my_payments(Some(token), &q).await
    })
    .await
}

/// GET /dashboard/documents - Uploaded travel documents
#[utoipa::path(
    get,
    path = "/dashboard/documents",
    params(ListParams),
    responses((status = 200, description = "Paged document list"))
)]
pub async fn documents_page(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
    Query(params): Query<ListParams>,
) -> Response {
    let (state, token) = (&*state, session.token.as_str());
    list_page(state, token, &params, |v| &mut v.documents, "Gagal memuat dokumen", |q| async move {
        state.documents.list_documents(Some(token), &q).await
    })
    .await
}

/// GET /dashboard/jamaah - Pilgrims (admin and agents)
#[utoipa::path(
    get,
    path = "/dashboard/jamaah",
    params(ListParams),
    responses(
        (status = 200, description = "Paged jamaah list"),
        (status = 403, description = "Role not allowed", body = ErrorBody)
    )
)]
pub async fn jamaah_page(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
    Query(params): Query<ListParams>,
) -> Response {
    if !is_staff(session.role) {
        return forbidden();
    }
    let (state, token) = (&*state, session.token.as_str());
    list_page(state, token, &params, |v| &mut v.jamaah, "Gagal memuat data jamaah", |q| async move {
        state.users.list_users(Some(token), &q, Some(Role::Jamaah)).await
    })
    .await
}

/// GET /dashboard/users - All accounts (admin)
#[utoipa::path(
    get,
    path = "/dashboard/users",
    params(ListParams),
    responses(
        (status = 200, description = "Paged user list"),
        (status = 403, description = "Role not allowed", body = ErrorBody)
    )
)]
pub async fn users_page(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
    Query(params): Query<ListParams>,
) -> Response {
    if !session.role.is_admin() {
        return forbidden();
    }
    let (state, token) = (&*state, session.token.as_str());
    list_page(state, token, &params, |v| &mut v.users, "Gagal memuat pengguna", |q| async move {
        state.users.list_users(Some(token), &q, None).await
    })
    .await
}

/// GET /dashboard/blog - Blog posts
#[utoipa::path(
    get,
    path = "/dashboard/blog",
    params(ListParams),
    responses((status = 200, description = "Paged blog post list"))
)]
pub async fn blog_page(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
    Query(params): Query<ListParams>,
) -> Response {
    let (state, token) = (&*state, session.token.as_str());
    list_page(state, token, &params, |v| &mut v.blog, "Gagal memuat artikel", |q| async move {
        state.blog.list_posts(Some(token), &q).await
    })
    .await
}

/// GET /dashboard/gallery - Gallery images
#[utoipa::path(
    get,
    path = "/dashboard/gallery",
    params(ListParams),
    responses((status = 200, description = "Paged gallery list"))
)]
pub async fn gallery_page(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
    Query(params): Query<ListParams>,
) -> Response {
    let (state, token) = (&*state, session.token.as_str());
    list_page(state, token, &params, |v| &mut v.gallery, "Gagal memuat galeri", |q| async move {
        state.gallery.list_items(Some(token), &q).await
    })
    .await
}

/// GET /dashboard/commissions - The agent's commissions and totals
#[utoipa::path(
    get,
    path = "/dashboard/commissions",
    params(ListParams),
    responses(
        (status = 200, description = "Paged commission list with summary"),
        (status = 403, description = "Role not allowed", body = ErrorBody)
    )
)]
pub async fn commissions_page(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
    Query(params): Query<ListParams>,
) -> Response {
    if !session.role.is_agent() {
        return forbidden();
    }
    let token = session.token.as_str();

    let query = state
        .views
        .with(token, |v| params.start(&mut v.commissions.list))
        .await;

    if let Some(query) = query {
        let result = state.commissions.my_commissions(Some(token), &query).await;
        let outcome = state
            .views
            .with(token, |v| {
                let view = &mut v.commissions;
                match result {
                    Ok(listing) => {
                        if listing.summary.is_some() {
                            view.summary = listing.summary;
                        }
                        view.list.finish(Ok(listing.page), "Gagal memuat komisi")
                    }
                    Err(err) => view.list.finish(Err(err), "Gagal memuat komisi"),
                }
            })
            .await;
        if let Err(err) = outcome {
            if err.invalidates_session() {
                return session_expired(&state, token).await;
            }
            warn!("Commission load failed: {}", err);
        }
    }

    let page = state
        .views
        .with(token, |v| CommissionPage {
            list: ListView::render(&mut v.commissions.list),
            summary: v.commissions.summary.clone(),
        })
        .await;
    Json(page).into_response()
}

//=========================================================================================
// Finance
//=========================================================================================

/// GET /dashboard/finance - Revenue and outstanding totals (admin)
#[utoipa::path(
    get,
    path = "/dashboard/finance",
    responses(
        (status = 200, description = "Finance summary"),
        (status = 403, description = "Role not allowed", body = ErrorBody)
    )
)]
pub async fn finance_page(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
) -> Response {
    if !session.role.is_admin() {
        return forbidden();
    }
    match state.finance.summary(Some(&session.token)).await {
        Ok(summary) => Json(summary).into_response(),
        Err(err) => port_failure(&state, &session.token, "Gagal memuat ringkasan keuangan", err).await,
    }
}
