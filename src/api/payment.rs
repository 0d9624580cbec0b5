//! Payment endpoints (`/payment/*`).
//!
//! Pure forwarding; gateway internals live server-side.

use serde_json::json;

use crate::client::NumeraClient;
use crate::error::Result;
use crate::models::request::ApiRequest;
use crate::storage::ANONYMOUS;

/// Facade for the payment endpoint group.
pub struct PaymentApi<'a> {
    client: &'a NumeraClient,
}

impl<'a> PaymentApi<'a> {
    pub(crate) fn new(client: &'a NumeraClient) -> Self {
        Self { client }
    }

    /// `GET /payment/plans` — public plan catalog.
    pub async fn plans(&self) -> Result<serde_json::Value> {
        let request = ApiRequest::get("/payment/plans")?;
        self.client.execute(&request, ANONYMOUS).await
    }

    /// `POST /payment/intent`
    pub async fn create_intent(&self, principal: &str, plan_id: &str) -> Result<serde_json::Value> {
        let request = ApiRequest::post("/payment/intent")?
            .with_payload(json!({ "plan_id": plan_id }))
            .authenticated();
        self.client.execute(&request, principal).await
    }

    /// `POST /payment/confirm`
    pub async fn confirm(&self, principal: &str, payment_intent_id: &str) -> Result<serde_json::Value> {
        let request = ApiRequest::post("/payment/confirm")?
            .with_payload(json!({ "payment_intent_id": payment_intent_id }))
            .authenticated();
        self.client.execute(&request, principal).await
    }

    /// `GET /payment/history`
    pub async fn history(&self, principal: &str) -> Result<serde_json::Value> {
        let request = ApiRequest::get("/payment/history")?.authenticated();
        self.client.execute(&request, principal).await
    }
}
