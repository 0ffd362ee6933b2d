//! services/dashboard/src/adapters/payments.rs
//!
//! Adapter for payment submission, history and admin verification.
//! Payment submissions carry the proof of transfer, so they go out as multipart.

use crate::adapters::http::{file_part, BackendClient};
use async_trait::async_trait;
use reqwest::multipart::Form;
use serde::Serialize;
use travel_portal_core::domain::{Paginated, Payment};
use travel_portal_core::listing::ListQuery;
use travel_portal_core::ports::{PaymentService, PortError, PortResult};
use travel_portal_core::validation::{PaymentForm, PaymentVerification};

#[derive(Serialize)]
struct VerifyBody<'a> {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    notes: Option<&'a str>,
}

#[derive(Clone)]
pub struct PaymentAdapter {
    client: BackendClient,
}

impl PaymentAdapter {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }
}

fn payment_form(form: &PaymentForm) -> PortResult<Form> {
    let proof = form
        .proof
        .as_ref()
        .ok_or_else(|| PortError::validation("Bukti pembayaran wajib diunggah"))?;
    let mut multipart = Form::new()
        .text("registrationId", form.registration_id.clone())
        .text("amount", form.amount.to_string())
        .text("method", form.method.clone());
    if let Some(notes) = &form.notes {
        multipart = multipart.text("notes", notes.clone());
    }
    Ok(multipart.part("proof", file_part(proof)?))
}

#[async_trait]
impl PaymentService for PaymentAdapter {
    async fn create_payment(&self, token: Option<&str>, form: &PaymentForm) -> PortResult<Payment> {
        if token.is_none() {
            return Err(PortError::unauthenticated());
        }
        let multipart = payment_form(form)?;
        self.client
            .post_multipart(token, &["payments", "create"], multipart)
            .await
    }

    async fn my_payments(
        &self,
        token: Option<&str>,
        query: &ListQuery,
    ) -> PortResult<Paginated<Payment>> {
        self.client
            .get(token, &["payments", "my-payments"], &query.to_pairs())
            .await
    }

    async fn verify_payment(
        &self,
        token: Option<&str>,
        payment_id: &str,
        verification: &PaymentVerification,
    ) -> PortResult<Payment> {
        let body = VerifyBody {
            status: verification.status(),
            notes: verification.notes.as_deref(),
        };
        self.client
            .patch_json(token, &["payments", payment_id, "verify"], &body)
            .await
    }
}
