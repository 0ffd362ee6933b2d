//! crates/travel_portal_core/src/validation.rs
//!
//! Dashboard forms and their client-side validation.
//!
//! Every form is validated before its adapter is called; a failing form never
//! reaches the network. Field messages are user-facing and localized.

use crate::domain::Upload;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// Largest file accepted for any upload (5 MiB).
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

pub const DOCUMENT_CONTENT_TYPES: [&str; 3] = ["image/jpeg", "image/png", "application/pdf"];
pub const IMAGE_CONTENT_TYPES: [&str; 2] = ["image/jpeg", "image/png"];

pub const DOCUMENT_TYPES: [&str; 6] = ["KTP", "KK", "PASSPORT", "PHOTO", "VACCINE", "OTHER"];
pub const PAYMENT_METHODS: [&str; 3] = ["TRANSFER", "CASH", "VIRTUAL_ACCOUNT"];
pub const ROOM_TYPES: [&str; 3] = ["QUAD", "TRIPLE", "DOUBLE"];

const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";
const PHONE_PATTERN: &str = r"^\+?[0-9]{10,15}$";

/// Matches `value` against a pattern compiled once per process. A pattern
/// that failed to compile matches nothing, so the field is reported invalid.
fn pattern_matches(cell: &'static OnceLock<Option<Regex>>, pattern: &str, value: &str) -> bool {
    cell.get_or_init(|| Regex::new(pattern).ok())
        .as_ref()
        .is_some_and(|re| re.is_match(value))
}

fn is_email(value: &str) -> bool {
    static EMAIL: OnceLock<Option<Regex>> = OnceLock::new();
    pattern_matches(&EMAIL, EMAIL_PATTERN, value)
}

fn is_phone(value: &str) -> bool {
    static PHONE: OnceLock<Option<Regex>> = OnceLock::new();
    pattern_matches(&PHONE, PHONE_PATTERN, value)
}

//=========================================================================================
// Validation Errors
//=========================================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// All field errors collected from one form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

impl ValidationErrors {
    fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == name)
            .map(|e| e.message.as_str())
    }

    fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .errors
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        f.write_str(&joined)
    }
}

impl std::error::Error for ValidationErrors {}

//=========================================================================================
// Shared Field Checks
//=========================================================================================

fn require(errors: &mut ValidationErrors, field: &'static str, value: &str, label: &str) -> bool {
    if value.trim().is_empty() {
        errors.push(field, format!("{} wajib diisi", label));
        false
    } else {
        true
    }
}

fn check_email(errors: &mut ValidationErrors, email: &str) {
    if require(errors, "email", email, "Email") && !is_email(email.trim()) {
        errors.push("email", "Format email tidak valid");
    }
}

fn check_one_of(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: &str,
    allowed: &[&str],
    label: &str,
) {
    if !allowed.contains(&value) {
        errors.push(
            field,
            format!("{} harus salah satu dari: {}", label, allowed.join(", ")),
        );
    }
}

fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn check_upload(
    errors: &mut ValidationErrors,
    field: &'static str,
    upload: Option<&Upload>,
    allowed: &[&str],
) {
    let Some(upload) = upload else {
        errors.push(field, "File wajib diunggah");
        return;
    };
    if upload.is_empty() {
        errors.push(field, "File kosong");
    } else if upload.len() > MAX_UPLOAD_BYTES {
        errors.push(field, "Ukuran file maksimal 5 MB");
    }
    if !allowed.contains(&upload.content_type.as_str()) {
        errors.push(field, format!("Tipe file harus {}", allowed.join(", ")));
    }
}

//=========================================================================================
// Authentication Forms
//=========================================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        check_email(&mut errors, &self.email);
        require(&mut errors, "password", &self.password, "Password");
        errors.into_result()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    #[serde(skip_serializing)]
    pub confirm_password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referral_code: Option<String>,
}

impl RegisterForm {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        require(&mut errors, "name", &self.name, "Nama");
        check_email(&mut errors, &self.email);
        let phone: String = self
            .phone
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-')
            .collect();
        if require(&mut errors, "phone", &phone, "Nomor telepon") && !is_phone(&phone)
        {
            errors.push("phone", "Nomor telepon harus 10-15 digit");
        }
        if self.password.chars().count() < 8 {
            errors.push("password", "Password minimal 8 karakter");
        }
        if self.password != self.confirm_password {
            errors.push("confirmPassword", "Konfirmasi password tidak cocok");
        }
        errors.into_result()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdateForm {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl ProfileUpdateForm {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        if self.name.is_none() && self.email.is_none() && self.phone.is_none() {
            errors.push("name", "Tidak ada perubahan untuk disimpan");
        }
        if let Some(name) = &self.name {
            require(&mut errors, "name", name, "Nama");
        }
        if let Some(email) = &self.email {
            check_email(&mut errors, email);
        }
        errors.into_result()
    }
}

//=========================================================================================
// Registration and Payment Forms
//=========================================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartRegistrationForm {
    pub package_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub departure_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referral_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl StartRegistrationForm {
    /// Trims every field and drops the ones left empty, so the values that
    /// get validated are the ones sent.
    pub fn normalized(self) -> Self {
        Self {
            package_id: self.package_id.trim().to_string(),
            departure_date: trimmed(self.departure_date),
            room_type: trimmed(self.room_type),
            referral_code: trimmed(self.referral_code),
            notes: trimmed(self.notes),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        require(&mut errors, "packageId", &self.package_id, "Paket");
        if let Some(room) = &self.room_type {
            check_one_of(&mut errors, "roomType", room, &ROOM_TYPES, "Tipe kamar");
        }
        errors.into_result()
    }
}

/// A payment submission. The proof of transfer travels as a multipart file part.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentForm {
    pub registration_id: String,
    pub amount: f64,
    pub method: String,
    pub notes: Option<String>,
    pub proof: Option<Upload>,
}

impl PaymentForm {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        require(&mut errors, "registrationId", &self.registration_id, "Pendaftaran");
        if !(self.amount.is_finite() && self.amount > 0.0) {
            errors.push("amount", "Nominal pembayaran harus lebih dari 0");
        }
        check_one_of(&mut errors, "method", &self.method, &PAYMENT_METHODS, "Metode pembayaran");
        check_upload(&mut errors, "proof", self.proof.as_ref(), &DOCUMENT_CONTENT_TYPES);
        errors.into_result()
    }
}

/// An admin's decision on a submitted payment.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PaymentVerification {
    pub approved: bool,
    #[serde(default)]
    pub notes: Option<String>,
}

impl PaymentVerification {
    pub fn status(&self) -> &'static str {
        if self.approved {
            "VERIFIED"
        } else {
            "REJECTED"
        }
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        let has_notes = self.notes.as_deref().is_some_and(|n| !n.trim().is_empty());
        if !self.approved && !has_notes {
            errors.push("notes", "Alasan penolakan wajib diisi");
        }
        errors.into_result()
    }
}

//=========================================================================================
// Document and Content Forms
//=========================================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct DocumentUploadForm {
    pub document_type: String,
    pub file: Option<Upload>,
}

impl DocumentUploadForm {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        check_one_of(&mut errors, "documentType", &self.document_type, &DOCUMENT_TYPES, "Jenis dokumen");
        check_upload(&mut errors, "file", self.file.as_ref(), &DOCUMENT_CONTENT_TYPES);
        errors.into_result()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageForm {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub package_type: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dp_percentage: Option<f64>,
    pub quota: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub departure_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_days: Option<u32>,
}

impl PackageForm {
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            description: trimmed(self.description),
            package_type: self.package_type.trim().to_string(),
            departure_date: trimmed(self.departure_date),
            ..self
        }
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        require(&mut errors, "name", &self.name, "Nama paket");
        check_one_of(&mut errors, "packageType", &self.package_type, &["HAJJ", "UMRAH"], "Jenis paket");
        if !(self.price.is_finite() && self.price > 0.0) {
            errors.push("price", "Harga harus lebih dari 0");
        }
        if let Some(dp) = self.dp_percentage {
            if !(0.0..=100.0).contains(&dp) {
                errors.push("dpPercentage", "Persentase DP harus antara 0 dan 100");
            }
        }
        if self.quota == 0 {
            errors.push("quota", "Kuota harus lebih dari 0");
        }
        errors.into_result()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPostForm {
    pub title: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image_url: Option<String>,
}

impl BlogPostForm {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        require(&mut errors, "title", &self.title, "Judul");
        require(&mut errors, "content", &self.content, "Konten");
        errors.into_result()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GalleryUploadForm {
    pub title: String,
    pub description: Option<String>,
    pub image: Option<Upload>,
}

impl GalleryUploadForm {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        require(&mut errors, "title", &self.title, "Judul");
        check_upload(&mut errors, "image", self.image.as_ref(), &IMAGE_CONTENT_TYPES);
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    fn pdf(len: usize) -> Upload {
        Upload {
            file_name: "bukti.pdf".into(),
            content_type: "application/pdf".into(),
            bytes: Bytes::from(vec![0u8; len]),
        }
    }

    #[test]
    fn login_requires_well_formed_email_and_password() {
        let ok = LoginForm { email: "a@b.com".into(), password: "secret".into() };
        assert!(ok.validate().is_ok());

        let bad = LoginForm { email: "not-an-email".into(), password: " ".into() };
        let errors = bad.validate().unwrap_err();
        assert_eq!(errors.field("email"), Some("Format email tidak valid"));
        assert_eq!(errors.field("password"), Some("Password wajib diisi"));
    }

    #[test]
    fn register_checks_phone_and_password_confirmation() {
        let mut form = RegisterForm {
            name: "Ahmad".into(),
            email: "ahmad@example.com".into(),
            phone: "0812-3456-7890".into(),
            password: "rahasia123".into(),
            confirm_password: "rahasia123".into(),
            referral_code: None,
        };
        assert!(form.validate().is_ok());

        form.phone = "12345".into();
        form.confirm_password = "beda".into();
        let errors = form.validate().unwrap_err();
        assert!(errors.field("phone").is_some());
        assert!(errors.field("confirmPassword").is_some());
    }

    #[test]
    fn register_form_never_sends_confirmation() {
        let form = RegisterForm {
            name: "Ahmad".into(),
            email: "ahmad@example.com".into(),
            phone: "081234567890".into(),
            password: "rahasia123".into(),
            confirm_password: "rahasia123".into(),
            referral_code: Some("AGEN01".into()),
        };
        let body = serde_json::to_value(&form).unwrap();
        assert!(body.get("confirmPassword").is_none());
        assert_eq!(body["referralCode"], "AGEN01");
    }

    #[test]
    fn payment_requires_proof_within_limits() {
        let mut form = PaymentForm {
            registration_id: "12".into(),
            amount: 5_000_000.0,
            method: "TRANSFER".into(),
            notes: None,
            proof: Some(pdf(1024)),
        };
        assert!(form.validate().is_ok());

        form.proof = Some(pdf(MAX_UPLOAD_BYTES + 1));
        assert_eq!(form.validate().unwrap_err().field("proof"), Some("Ukuran file maksimal 5 MB"));

        form.proof = None;
        form.amount = 0.0;
        let errors = form.validate().unwrap_err();
        assert!(errors.field("proof").is_some());
        assert!(errors.field("amount").is_some());
    }

    #[test]
    fn gallery_rejects_non_images() {
        let form = GalleryUploadForm {
            title: "Manasik 2025".into(),
            description: None,
            image: Some(pdf(10)),
        };
        assert!(form.validate().unwrap_err().field("image").is_some());
    }

    #[test]
    fn package_dp_must_be_a_percentage() {
        let form = PackageForm {
            name: "Haji Plus".into(),
            description: None,
            package_type: "HAJJ".into(),
            price: 150_000_000.0,
            dp_percentage: Some(120.0),
            quota: 40,
            departure_date: None,
            duration_days: Some(25),
        };
        assert!(form.validate().unwrap_err().field("dpPercentage").is_some());
    }

    #[test]
    fn rejection_needs_a_reason() {
        let reject = PaymentVerification { approved: false, notes: None };
        assert!(reject.validate().is_err());
        let approve = PaymentVerification { approved: true, notes: None };
        assert!(approve.validate().is_ok());
        assert_eq!(approve.status(), "VERIFIED");
    }

    #[test]
    fn patterns_compile_and_match() {
        assert!(is_email("siti@example.co.id"));
        assert!(!is_email("siti@example"));
        assert!(is_phone("+6281234567890"));
        assert!(!is_phone("0812"));
    }

    #[test]
    fn registration_choices_are_trimmed_before_checking() {
        let raw = StartRegistrationForm {
            package_id: " 9 ".into(),
            departure_date: Some("  ".into()),
            room_type: Some(" QUAD ".into()),
            referral_code: None,
            notes: None,
        };
        let errors = raw.validate().unwrap_err();
        assert!(errors.field("roomType").is_some());

        let form = raw.normalized();
        assert!(form.validate().is_ok());
        assert_eq!(form.package_id, "9");
        assert_eq!(form.room_type.as_deref(), Some("QUAD"));
        assert_eq!(form.departure_date, None);
    }

    #[test]
    fn package_type_is_trimmed_before_checking() {
        let form = PackageForm {
            name: " Umrah Plus ".into(),
            description: None,
            package_type: "UMRAH ".into(),
            price: 35_000_000.0,
            dp_percentage: None,
            quota: 30,
            departure_date: None,
            duration_days: None,
        }
        .normalized();
        assert!(form.validate().is_ok());
        assert_eq!(form.name, "Umrah Plus");
        assert_eq!(form.package_type, "UMRAH");
    }
}
