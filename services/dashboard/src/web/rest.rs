//! services/dashboard/src/web/rest.rs
//!
//! The master definition for the OpenAPI description of the page routes.

use crate::web::{actions, auth, lists, pages, responses, support, views};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        auth::login_page,
        auth::login_handler,
        auth::register_page,
        auth::register_handler,
        auth::logout_handler,
        pages::dashboard_home,
        pages::packages_page,
        pages::package_detail,
        pages::registrations_page,
        pages::payments_page,
        pages::documents_page,
        pages::jamaah_page,
        pages::users_page,
        pages::blog_page,
        pages::gallery_page,
        pages::commissions_page,
        pages::finance_page,
        actions::create_package,
        actions::start_registration,
        actions::submit_payment,
        actions::verify_payment,
        actions::upload_document,
        actions::generate_referral,
        actions::update_profile,
        actions::create_post,
        actions::upload_gallery_item,
        support::conversations_page,
        support::conversation_page,
        support::send_message,
    ),
    components(
        schemas(
            responses::ErrorBody,
            responses::FieldMessage,
            views::AuthPage,
            views::MenuEntry,
            lists::Nav,
            support::SendMessageRequest,
        )
    ),
    tags(
        (name = "Travel Dashboard", description = "Page routes of the Hajj/Umrah travel dashboard.")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_page_route_is_documented() {
        let doc = ApiDoc::openapi();
        for path in [
            "/login",
            "/logout",
            "/dashboard",
            "/dashboard/packages/{id}",
            "/dashboard/payments/{id}/verify",
            "/dashboard/support/{room_id}/messages",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
    }
}
