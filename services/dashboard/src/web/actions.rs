//! services/dashboard/src/web/actions.rs
//!
//! Create/update routes under `/dashboard`. Forms are validated before any
//! backend call; role checks happen before validation.

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use std::sync::Arc;
use tracing::info;
use travel_portal_core::domain::Session;
use travel_portal_core::normalize::parse_decimal;
use travel_portal_core::validation::{
    BlogPostForm, DocumentUploadForm, GalleryUploadForm, PackageForm, PaymentForm,
    PaymentVerification, ProfileUpdateForm, StartRegistrationForm,
};

use crate::web::cookies::{attach, session_cookies};
use crate::web::responses::{bad_request, forbidden, invalid_form, port_failure, ErrorBody};
use crate::web::state::AppState;
use crate::web::uploads::MultipartFields;
use crate::web::views::Mutation;

fn created<T: serde::Serialize>(data: T, message: &str) -> Response {
    (StatusCode::CREATED, Json(Mutation::new(data, message))).into_response()
}

fn updated<T: serde::Serialize>(data: T, message: &str) -> Response {
    Json(Mutation::new(data, message)).into_response()
}

//=========================================================================================
// Packages and Registrations
//=========================================================================================

/// POST /dashboard/packages - Create a package (admin)
#[utoipa::path(
    post,
    path = "/dashboard/packages",
    request_body(content_type = "application/json", description = "Package fields"),
    responses(
        (status = 201, description = "Package created"),
        (status = 403, description = "Role not allowed", body = ErrorBody),
        (status = 422, description = "Invalid form", body = ErrorBody)
    )
)]
pub async fn create_package(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
    Json(form): Json<PackageForm>,
) -> Response {
    if !session.role.is_admin() {
        return forbidden();
    }
    let form = form.normalized();
    if let Err(errors) = form.validate() {
        return invalid_form(errors);
    }
    match state.packages.create_package(Some(&session.token), &form).await {
        Ok(package) => {
            info!("Package {} created by {}", package.id, session.user.id);
            created(package, "Paket berhasil dibuat")
        }
        Err(err) => port_failure(&state, &session.token, "Gagal membuat paket", err).await,
    }
}

/// POST /dashboard/registrations - Register for a package
#[utoipa::path(
    post,
    path = "/dashboard/registrations",
    request_body(
        content_type = "application/json",
        description = "`{ packageId, departureDate?, roomType?, referralCode?, notes? }`"
    ),
    responses(
        (status = 201, description = "Registration started"),
        (status = 422, description = "Invalid form", body = ErrorBody)
    )
)]
pub async fn start_registration(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
    Json(form): Json<StartRegistrationForm>,
) -> Response {
    let form = form.normalized();
    if let Err(errors) = form.validate() {
        return invalid_form(errors);
    }
    match state
        .registrations
        .start_registration(Some(&session.token), &form)
        .await
    {
        Ok(registration) => created(registration, "Pendaftaran berhasil dibuat"),
        Err(err) => port_failure(&state, &session.token, "Gagal membuat pendaftaran", err).await,
    }
}

//=========================================================================================
// Payments
//=========================================================================================

/// POST /dashboard/payments - Submit a payment with proof of transfer
#[utoipa::path(
    post,
    path = "/dashboard/payments",
    request_body(
        content_type = "multipart/form-data",
        description = "Fields `registrationId`, `amount`, `method`, `notes?` and the `proof` file."
    ),
    responses(
        (status = 201, description = "Payment submitted"),
        (status = 400, description = "Unreadable multipart body", body = ErrorBody),
        (status = 422, description = "Invalid form", body = ErrorBody)
    )
)]
pub async fn submit_payment(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
    multipart: Multipart,
) -> Response {
    let mut fields = match MultipartFields::collect(multipart).await {
        Ok(fields) => fields,
        Err(message) => return bad_request(message),
    };
    let form = PaymentForm {
        registration_id: fields.text("registrationId").unwrap_or_default(),
        amount: fields
            .text("amount")
            .and_then(|raw| parse_decimal(&raw).ok().flatten())
            .unwrap_or_default(),
        method: fields.text("method").unwrap_or_default(),
        notes: fields.text("notes"),
        proof: fields.take_file("proof"),
    };
    if let Err(errors) = form.validate() {
        return invalid_form(errors);
    }
    match state.payments.create_payment(Some(&session.token), &form).await {
        Ok(payment) => created(payment, "Pembayaran berhasil dikirim"),
        Err(err) => port_failure(&state, &session.token, "Gagal mengirim pembayaran", err).await,
    }
}

/// PATCH /dashboard/payments/{id}/verify - Approve or reject a payment (admin)
#[utoipa::path(
    patch,
    path = "/dashboard/payments/{id}/verify",
    params(("id" = String, Path, description = "Payment id")),
    request_body(content_type = "application/json", description = "`{ approved, notes? }`"),
    responses(
        (status = 200, description = "Payment verified or rejected"),
        (status = 403, description = "Role not allowed", body = ErrorBody),
        (status = 422, description = "Rejection without a reason", body = ErrorBody)
    )
)]
pub async fn verify_payment(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
    Path(id): Path<String>,
    Json(verification): Json<PaymentVerification>,
) -> Response {
    if !session.role.is_admin() {
        return forbidden();
    }
    if let Err(errors) = verification.validate() {
        return invalid_form(errors);
    }
    match state
        .payments
        .verify_payment(Some(&session.token), &id, &verification)
        .await
    {
        Ok(payment) => {
            info!("Payment {} marked {} by {}", id, verification.status(), session.user.id);
            let message = if verification.approved {
                "Pembayaran diverifikasi"
            } else {
                "Pembayaran ditolak"
            };
            updated(payment, message)
        }
        Err(err) => port_failure(&state, &session.token, "Gagal memverifikasi pembayaran", err).await,
    }
}

//=========================================================================================
// Documents
//=========================================================================================

/// POST /dashboard/documents - Upload a travel document
#[utoipa::path(
    post,
    path = "/dashboard/documents",
    request_body(
        content_type = "multipart/form-data",
        description = "Field `documentType` and the `file` part."
    ),
    responses(
        (status = 201, description = "Document uploaded"),
        (status = 422, description = "Invalid form", body = ErrorBody)
    )
)]
pub async fn upload_document(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
    multipart: Multipart,
) -> Response {
    let mut fields = match MultipartFields::collect(multipart).await {
        Ok(fields) => fields,
        Err(message) => return bad_request(message),
    };
    let form = DocumentUploadForm {
        document_type: fields.text("documentType").unwrap_or_default(),
        file: fields.take_file("file"),
    };
    if let Err(errors) = form.validate() {
        return invalid_form(errors);
    }
    match state.documents.upload_document(Some(&session.token), &form).await {
        Ok(document) => created(document, "Dokumen berhasil diunggah"),
        Err(err) => port_failure(&state, &session.token, "Gagal mengunggah dokumen", err).await,
    }
}

//=========================================================================================
// Commissions
//=========================================================================================

/// POST /dashboard/commissions/referral - Generate a referral code (agent)
#[utoipa::path(
    post,
    path = "/dashboard/commissions/referral",
    responses(
        (status = 201, description = "Referral code generated"),
        (status = 403, description = "Role not allowed", body = ErrorBody)
    )
)]
pub async fn generate_referral(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
) -> Response {
    if !session.role.is_agent() {
        return forbidden();
    }
    match state.commissions.generate_referral(Some(&session.token)).await {
        Ok(referral) => created(referral, "Kode referral berhasil dibuat"),
        Err(err) => port_failure(&state, &session.token, "Gagal membuat kode referral", err).await,
    }
}

//=========================================================================================
// Profile
//=========================================================================================

/// PUT /dashboard/profile - Update the signed-in user's profile
///
/// The stored session takes the updated profile, and the cookies are written
/// again from it.
#[utoipa::path(
    put,
    path = "/dashboard/profile",
    request_body(content_type = "application/json", description = "`{ name?, email?, phone? }`"),
    responses(
        (status = 200, description = "Profile updated"),
        (status = 422, description = "Invalid form", body = ErrorBody)
    )
)]
pub async fn update_profile(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
    Json(form): Json<ProfileUpdateForm>,
) -> Response {
    if let Err(errors) = form.validate() {
        return invalid_form(errors);
    }
    let result = state
        .users
        .update_profile(Some(&session.token), &session.user.id, &form)
        .await;
    match result {
        Ok(user) => {
            let refreshed = Session::new(session.token, user);
            let cookies = session_cookies(&refreshed, state.config.cookie_secure);
            state.open_session(refreshed.clone()).await;
            attach(updated(refreshed.user, "Profil berhasil diperbarui"), cookies)
        }
        Err(err) => port_failure(&state, &session.token, "Gagal memperbarui profil", err).await,
    }
}

//=========================================================================================
// Blog and Gallery
//=========================================================================================

/// POST /dashboard/blog - Publish a post (admin)
#[utoipa::path(
    post,
    path = "/dashboard/blog",
    request_body(content_type = "application/json", description = "`{ title, content, excerpt?, coverImageUrl? }`"),
    responses(
        (status = 201, description = "Post published"),
        (status = 403, description = "Role not allowed", body = ErrorBody),
        (status = 422, description = "Invalid form", body = ErrorBody)
    )
)]
pub async fn create_post(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
    Json(form): Json<BlogPostForm>,
) -> Response {
    if !session.role.is_admin() {
        return forbidden();
    }
    if let Err(errors) = form.validate() {
        return invalid_form(errors);
    }
    match state.blog.create_post(Some(&session.token), &form).await {
        Ok(post) => created(post, "Artikel berhasil diterbitkan"),
        Err(err) => port_failure(&state, &session.token, "Gagal menerbitkan artikel", err).await,
    }
}

/// POST /dashboard/gallery - Upload a gallery image (admin)
#[utoipa::path(
    post,
    path = "/dashboard/gallery",
    request_body(
        content_type = "multipart/form-data",
        description = "Fields `title`, `description?` and the `image` part."
    ),
    responses(
        (status = 201, description = "Image uploaded"),
        (status = 403, description = "Role not allowed", body = ErrorBody),
        (status = 422, description = "Invalid form", body = ErrorBody)
    )
)]
pub async fn upload_gallery_item(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<Session>,
    multipart: Multipart,
) -> Response {
    if !session.role.is_admin() {
        return forbidden();
    }
    let mut fields = match MultipartFields::collect(multipart).await {
        Ok(fields) => fields,
        Err(message) => return bad_request(message),
    };
    let form = GalleryUploadForm {
        title: fields.text("title").unwrap_or_default(),
        description: fields.text("description"),
        image: fields.take_file("image"),
    };
    if let Err(errors) = form.validate() {
        return invalid_form(errors);
    }
    match state.gallery.upload_item(Some(&session.token), &form).await {
        Ok(item) => created(item, "Gambar berhasil diunggah"),
        Err(err) => port_failure(&state, &session.token, "Gagal mengunggah gambar", err).await,
    }
}
