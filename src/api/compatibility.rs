//! Compatibility endpoints (`/compatibility/*`).

use serde_json::json;

use crate::client::NumeraClient;
use crate::error::Result;
use crate::models::request::ApiRequest;
use crate::storage::ANONYMOUS;

/// Facade for the compatibility endpoint group.
pub struct CompatibilityApi<'a> {
    client: &'a NumeraClient,
}

impl<'a> CompatibilityApi<'a> {
    pub(crate) fn new(client: &'a NumeraClient) -> Self {
        Self { client }
    }

    /// `POST /compatibility/calculate` — full report for the logged-in user.
    pub async fn calculate(
        &self,
        principal: &str,
        profiles: serde_json::Value,
    ) -> Result<serde_json::Value> {
        let request = ApiRequest::post("/compatibility/calculate")?
            .with_payload(profiles)
            .authenticated();
        self.client.execute(&request, principal).await
    }

    /// `POST /compatibility/quick` — teaser calculation, no account needed.
    pub async fn quick(&self, profiles: serde_json::Value) -> Result<serde_json::Value> {
        let request = ApiRequest::post("/compatibility/quick")?.with_payload(profiles);
        self.client.execute(&request, ANONYMOUS).await
    }

    /// `GET /compatibility/history`
    pub async fn history(
        &self,
        principal: &str,
        page: Option<u32>,
        per_page: Option<u32>,
    ) -> Result<serde_json::Value> {
        let mut request = ApiRequest::get("/compatibility/history")?.authenticated();
        let mut query = serde_json::Map::new();
        if let Some(page) = page {
            query.insert("page".into(), json!(page));
        }
        if let Some(per_page) = per_page {
            query.insert("per_page".into(), json!(per_page));
        }
        if !query.is_empty() {
            request = request.with_payload(serde_json::Value::Object(query));
        }
        self.client.execute(&request, principal).await
    }

    /// `GET /compatibility/history/{id}`
    pub async fn history_entry(&self, principal: &str, id: u64) -> Result<serde_json::Value> {
        let request = ApiRequest::get(format!("/compatibility/history/{}", id))?.authenticated();
        self.client.execute(&request, principal).await
    }

    /// `DELETE /compatibility/history/{id}`
    pub async fn delete_history_entry(&self, principal: &str, id: u64) -> Result<serde_json::Value> {
        let request = ApiRequest::delete(format!("/compatibility/history/{}", id))?.authenticated();
        self.client.execute(&request, principal).await
    }

    /// `GET /compatibility/history/{id}/pdf` — PDF export descriptor
    /// (generation happens server-side; the body carries the download).
    pub async fn history_pdf(&self, principal: &str, id: u64) -> Result<serde_json::Value> {
        let request =
            ApiRequest::get(format!("/compatibility/history/{}/pdf", id))?.authenticated();
        self.client.execute(&request, principal).await
    }

    /// `GET /compatibility/levels` — public level descriptions.
    pub async fn levels(&self) -> Result<serde_json::Value> {
        let request = ApiRequest::get("/compatibility/levels")?;
        self.client.execute(&request, ANONYMOUS).await
    }

    /// `GET /compatibility/stats`
    pub async fn stats(&self, principal: &str) -> Result<serde_json::Value> {
        let request = ApiRequest::get("/compatibility/stats")?.authenticated();
        self.client.execute(&request, principal).await
    }
}
