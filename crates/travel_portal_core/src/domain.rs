//! crates/travel_portal_core/src/domain.rs
//!
//! Defines the data structures exchanged with the travel backend.
//!
//! Apart from [`Session`], these are plain data-transfer records: they are
//! fetched, rendered and occasionally submitted back, but no logic in this
//! workspace owns their lifecycle. Field names follow the backend's camelCase
//! JSON, and loosely-typed numeric fields go through [`crate::normalize`].

use crate::normalize;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

//=========================================================================================
// Session and Users
//=========================================================================================

/// The roles a portal account can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Superadmin,
    Admin,
    Agen,
    Marketing,
    Jamaah,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Superadmin => "SUPERADMIN",
            Role::Admin => "ADMIN",
            Role::Agen => "AGEN",
            Role::Marketing => "MARKETING",
            Role::Jamaah => "JAMAAH",
        }
    }

    /// Back-office staff allowed to see every jamaah and verify payments.
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Superadmin | Role::Admin)
    }

    /// Referral partners that earn commission.
    pub fn is_agent(&self) -> bool {
        matches!(self, Role::Agen | Role::Marketing)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(deserialize_with = "normalize::id")]
    pub id: String,
    #[serde(default, alias = "fullName")]
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub role: Role,
    #[serde(default)]
    pub referral_code: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// An authenticated portal session.
///
/// The role is copied out of the profile at construction so routing and page
/// handlers never have to reach into the nested user record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Session {
    pub token: String,
    pub role: Role,
    pub user: UserProfile,
}

impl Session {
    pub fn new(token: impl Into<String>, user: UserProfile) -> Self {
        Self {
            token: token.into(),
            role: user.role,
            user,
        }
    }
}

//=========================================================================================
// Pagination
//=========================================================================================

/// Pagination metadata as reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    #[serde(default = "first_page", deserialize_with = "normalize::count")]
    pub page: u32,
    #[serde(default, deserialize_with = "normalize::count")]
    pub limit: u32,
    #[serde(default, deserialize_with = "normalize::total")]
    pub total: u64,
    #[serde(default, deserialize_with = "normalize::count")]
    pub total_pages: u32,
}

fn first_page() -> u32 {
    1
}

/// One page of a backend list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paginated<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    pub pagination: PaginationMeta,
}

//=========================================================================================
// Packages and Registrations
//=========================================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    #[serde(deserialize_with = "normalize::id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// `HAJJ` or `UMRAH`.
    #[serde(default, alias = "type")]
    pub package_type: Option<String>,
    #[serde(default, deserialize_with = "normalize::money")]
    pub price: f64,
    #[serde(default, deserialize_with = "normalize::optional_money")]
    pub dp_percentage: Option<f64>,
    #[serde(default, deserialize_with = "normalize::count")]
    pub quota: u32,
    #[serde(default, deserialize_with = "normalize::count")]
    pub remaining_quota: u32,
    #[serde(default)]
    pub departure_date: Option<String>,
    #[serde(default)]
    pub duration_days: Option<u32>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl Package {
    /// Down payment amount implied by the package's DP percentage.
    pub fn down_payment(&self) -> Option<f64> {
        self.dp_percentage.map(|pct| self.price * pct / 100.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RegistrationStatus {
    Pending,
    WaitingPayment,
    DpPaid,
    Paid,
    Confirmed,
    Cancelled,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    #[serde(deserialize_with = "normalize::id")]
    pub id: String,
    #[serde(deserialize_with = "normalize::id")]
    pub package_id: String,
    #[serde(default)]
    pub package_name: Option<String>,
    #[serde(default, deserialize_with = "normalize::optional_id")]
    pub user_id: Option<String>,
    pub status: RegistrationStatus,
    #[serde(default, deserialize_with = "normalize::money")]
    pub total_price: f64,
    #[serde(default, deserialize_with = "normalize::money")]
    pub paid_amount: f64,
    #[serde(default)]
    pub room_type: Option<String>,
    #[serde(default)]
    pub referral_code: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

//=========================================================================================
// Payments
//=========================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Pending,
    Verified,
    Rejected,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    #[serde(deserialize_with = "normalize::id")]
    pub id: String,
    #[serde(deserialize_with = "normalize::id")]
    pub registration_id: String,
    #[serde(default, deserialize_with = "normalize::money")]
    pub amount: f64,
    #[serde(default)]
    pub method: Option<String>,
    pub status: PaymentStatus,
    #[serde(default)]
    pub proof_url: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

//=========================================================================================
// Commissions
//=========================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CommissionStatus {
    Pending,
    Approved,
    Paid,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Commission {
    #[serde(deserialize_with = "normalize::id")]
    pub id: String,
    #[serde(default, deserialize_with = "normalize::optional_id")]
    pub registration_id: Option<String>,
    #[serde(default)]
    pub jamaah_name: Option<String>,
    #[serde(default, deserialize_with = "normalize::money")]
    pub amount: f64,
    #[serde(default, deserialize_with = "normalize::optional_money")]
    pub rate: Option<f64>,
    #[serde(default)]
    pub tier: Option<String>,
    pub status: CommissionStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommissionSummary {
    #[serde(default, deserialize_with = "normalize::money")]
    pub total_earned: f64,
    #[serde(default, deserialize_with = "normalize::money")]
    pub total_pending: f64,
    #[serde(default, deserialize_with = "normalize::money")]
    pub total_paid: f64,
    #[serde(default, deserialize_with = "normalize::count")]
    pub referral_count: u32,
    #[serde(default)]
    pub tier: Option<String>,
}

/// The `my-commissions` payload: a page of commissions plus the agent's totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommissionListing {
    #[serde(flatten)]
    pub page: Paginated<Commission>,
    #[serde(default)]
    pub summary: Option<CommissionSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferralCode {
    #[serde(alias = "referralCode")]
    pub code: String,
    #[serde(default, alias = "referralLink")]
    pub link: Option<String>,
}

//=========================================================================================
// Documents
//=========================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentStatus {
    Pending,
    Approved,
    Rejected,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(deserialize_with = "normalize::id")]
    pub id: String,
    #[serde(alias = "type")]
    pub document_type: String,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub file_url: Option<String>,
    pub status: DocumentStatus,
    #[serde(default)]
    pub uploaded_at: Option<DateTime<Utc>>,
}

//=========================================================================================
// Chat
//=========================================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    #[serde(alias = "id", deserialize_with = "normalize::id")]
    pub room_id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub participant_name: Option<String>,
    #[serde(default)]
    pub last_message: Option<String>,
    #[serde(default, deserialize_with = "normalize::count")]
    pub unread_count: u32,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    #[serde(deserialize_with = "normalize::id")]
    pub id: String,
    #[serde(default, deserialize_with = "normalize::optional_id")]
    pub room_id: Option<String>,
    #[serde(default, deserialize_with = "normalize::optional_id")]
    pub sender_id: Option<String>,
    #[serde(default)]
    pub sender_name: Option<String>,
    #[serde(alias = "message")]
    pub content: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

//=========================================================================================
// Content and Finance
//=========================================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryItem {
    #[serde(deserialize_with = "normalize::id")]
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    pub image_url: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    #[serde(deserialize_with = "normalize::id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub cover_image_url: Option<String>,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinanceSummary {
    #[serde(default, deserialize_with = "normalize::money")]
    pub total_revenue: f64,
    #[serde(default, deserialize_with = "normalize::money")]
    pub total_paid: f64,
    #[serde(default, deserialize_with = "normalize::money")]
    pub total_outstanding: f64,
    #[serde(default, deserialize_with = "normalize::money")]
    pub total_commission: f64,
    #[serde(default, deserialize_with = "normalize::count")]
    pub pending_verifications: u32,
}

//=========================================================================================
// Uploads
//=========================================================================================

/// A file attached to a submission, forwarded to the backend as a multipart part.
#[derive(Clone, PartialEq)]
pub struct Upload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Bytes,
}

impl Upload {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl fmt::Debug for Upload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Upload")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn session_takes_role_from_profile() {
        let user: UserProfile = serde_json::from_value(json!({
            "id": 7,
            "fullName": "Siti Aminah",
            "email": "siti@example.com",
            "role": "JAMAAH"
        }))
        .unwrap();
        let session = Session::new("T", user);
        assert_eq!(session.role, Role::Jamaah);
        assert_eq!(session.user.id, "7");
        assert_eq!(session.user.name, "Siti Aminah");
    }

    #[test]
    fn package_price_strings_are_normalized() {
        let package: Package = serde_json::from_value(json!({
            "id": "umrah-9",
            "name": "Umrah Reguler 9 Hari",
            "type": "UMRAH",
            "price": "32500000.00",
            "dpPercentage": "20",
            "quota": 45,
            "remainingQuota": "12"
        }))
        .unwrap();
        assert_eq!(package.price, 32_500_000.0);
        assert_eq!(package.down_payment(), Some(6_500_000.0));
        assert_eq!(package.remaining_quota, 12);
        assert_eq!(package.package_type.as_deref(), Some("UMRAH"));
    }

    #[test]
    fn unknown_statuses_do_not_fail_decoding() {
        let payment: Payment = serde_json::from_value(json!({
            "id": 1,
            "registrationId": 3,
            "amount": "500000",
            "status": "ON_HOLD"
        }))
        .unwrap();
        assert_eq!(payment.status, PaymentStatus::Unknown);
        assert_eq!(payment.amount, 500_000.0);
    }

    #[test]
    fn commission_listing_carries_summary() {
        let listing: CommissionListing = serde_json::from_value(json!({
            "items": [{ "id": 1, "amount": "150000", "status": "PAID" }],
            "pagination": { "page": 1, "limit": 10, "total": 1, "totalPages": 1 },
            "summary": { "totalEarned": "150000", "referralCount": 1, "tier": "SILVER" }
        }))
        .unwrap();
        assert_eq!(listing.page.items.len(), 1);
        let summary = listing.summary.unwrap();
        assert_eq!(summary.total_earned, 150_000.0);
        assert_eq!(summary.tier.as_deref(), Some("SILVER"));
    }

    #[test]
    fn roles_group_into_admins_and_agents() {
        let role: Role = serde_json::from_value(json!("AGEN")).unwrap();
        assert_eq!(role, Role::Agen);
        assert!(serde_json::from_value::<Role>(json!("GUEST")).is_err());
        assert!(Role::Superadmin.is_admin());
        assert!(Role::Marketing.is_agent());
        assert!(!Role::Jamaah.is_admin());
    }
}
