//! services/dashboard/src/web/views.rs
//!
//! The JSON views rendered by the page routes.
//!
//! Rendering a view drains the controller's pending notification, so a
//! notification is delivered with exactly one response.

use serde::Serialize;
use travel_portal_core::chat::{ChatController, ChatView};
use travel_portal_core::domain::{
    ChatMessage, Commission, CommissionSummary, Conversation, Role, UserProfile,
};
use travel_portal_core::listing::{ListController, LoadState, Notification, Pagination};
use utoipa::ToSchema;

#[derive(Debug, Serialize)]
pub struct ListView<T> {
    pub items: Vec<T>,
    pub pagination: Pagination,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    pub state: LoadState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification: Option<Notification>,
}

impl<T: Clone> ListView<T> {
    pub fn render(controller: &mut ListController<T>) -> Self {
        Self {
            items: controller.items().to_vec(),
            pagination: controller.pagination(),
            search: controller.search().map(str::to_string),
            state: controller.state(),
            notification: controller.take_notification(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CommissionPage {
    #[serde(flatten)]
    pub list: ListView<Commission>,
    pub summary: Option<CommissionSummary>,
}

#[derive(Debug, Serialize)]
pub struct SupportView {
    #[serde(flatten)]
    pub view: ChatView,
    pub conversations: Vec<Conversation>,
    pub messages: Vec<ChatMessage>,
    pub draft: String,
    pub state: LoadState,
    pub sending: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification: Option<Notification>,
}

impl SupportView {
    pub fn render(chat: &mut ChatController) -> Self {
        Self {
            view: chat.view().clone(),
            conversations: chat.conversations().to_vec(),
            messages: chat.messages().to_vec(),
            draft: chat.draft().to_string(),
            state: chat.state(),
            sending: chat.is_sending(),
            notification: chat.take_notification(),
        }
    }
}

/// The result of a successful create/update action.
#[derive(Debug, Serialize)]
pub struct Mutation<T> {
    pub data: T,
    pub notification: Notification,
}

impl<T> Mutation<T> {
    pub fn new(data: T, message: &str) -> Self {
        Self {
            data,
            notification: Notification::success(message),
        }
    }
}

//=========================================================================================
// Dashboard Home
//=========================================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct MenuEntry {
    pub label: &'static str,
    pub path: &'static str,
}

const fn entry(label: &'static str, path: &'static str) -> MenuEntry {
    MenuEntry { label, path }
}

/// The sidebar for a role. Every role starts with the overview.
pub fn menu_for(role: Role) -> Vec<MenuEntry> {
    let mut menu = vec![entry("Beranda", "/dashboard"), entry("Paket", "/dashboard/packages")];
    if role.is_admin() {
        menu.extend([
            entry("Pengguna", "/dashboard/users"),
            entry("Jamaah", "/dashboard/jamaah"),
            entry("Pembayaran", "/dashboard/payments"),
            entry("Keuangan", "/dashboard/finance"),
            entry("Blog", "/dashboard/blog"),
            entry("Galeri", "/dashboard/gallery"),
        ]);
    } else if role.is_agent() {
        menu.extend([
            entry("Jamaah", "/dashboard/jamaah"),
            entry("Komisi", "/dashboard/commissions"),
        ]);
    } else {
        menu.extend([
            entry("Pendaftaran Saya", "/dashboard/registrations"),
            entry("Pembayaran", "/dashboard/payments"),
            entry("Dokumen", "/dashboard/documents"),
        ]);
    }
    menu.push(entry("Bantuan", "/dashboard/support"));
    menu
}

#[derive(Debug, Serialize)]
pub struct DashboardHome {
    pub user: UserProfile,
    pub role: Role,
    pub menu: Vec<MenuEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification: Option<Notification>,
}

/// The body of `GET /login` and `GET /register`.
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthPage {
    pub page: &'static str,
    pub action: &'static str,
    pub alternate: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menus_follow_the_role() {
        let admin = menu_for(Role::Superadmin);
        assert!(admin.iter().any(|m| m.path == "/dashboard/finance"));
        assert!(!admin.iter().any(|m| m.path == "/dashboard/commissions"));

        let agent = menu_for(Role::Marketing);
        assert!(agent.iter().any(|m| m.path == "/dashboard/commissions"));
        assert!(!agent.iter().any(|m| m.path == "/dashboard/finance"));

        let jamaah = menu_for(Role::Jamaah);
        assert!(jamaah.iter().any(|m| m.path == "/dashboard/documents"));
        assert_eq!(jamaah.first().map(|m| m.path), Some("/dashboard"));
        assert_eq!(jamaah.last().map(|m| m.path), Some("/dashboard/support"));
    }

    #[test]
    fn rendering_drains_the_notification() {
        let mut ctl = ListController::<String>::new();
        ctl.notify(Notification::info("halo"));
        assert!(ListView::render(&mut ctl).notification.is_some());
        assert!(ListView::render(&mut ctl).notification.is_none());
    }
}
