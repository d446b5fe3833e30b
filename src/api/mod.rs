mod transport;

pub use transport::{HttpRequest, HttpResponse, Method, Transport, UreqTransport};

use crate::errors::{AppError, AppResult};
use crate::models::{
    Appraisal, CandidateLetter, Employee, Holiday, LeaveRequest, LeaveStatus, ListResponse,
    NewHoliday, NewLeaveRequest, NewStockTransaction, NewUsageRequest, ProvisionAdminPayload,
    SaveAppraisalPayload, SaveLetterPayload, SaveStationeryItemPayload, StationeryItem,
    StockTransaction, Termination, UsageRequest,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

// Guard against a backend whose `next` links cycle.
const MAX_FETCH_PAGES: usize = 200;

pub struct ApiClient<T: Transport> {
    transport: T,
    base_url: String,
    auth_token: Option<String>,
    csrf_token: Option<String>,
}

impl<T: Transport> ApiClient<T> {
    pub fn new(transport: T, base_url: impl Into<String>) -> Self {
        Self {
            transport,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            auth_token: None,
            csrf_token: None,
        }
    }

    pub fn set_auth_token(&mut self, token: Option<String>) {
        self.auth_token = token;
    }

    pub fn set_csrf_token(&mut self, token: Option<String>) {
        self.csrf_token = token;
    }

    pub fn transport_ref(&self) -> &T {
        &self.transport
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn headers(&self, method: Method, has_body: bool) -> Vec<(String, String)> {
        let mut headers = vec![("Accept".to_string(), "application/json".to_string())];
        if has_body {
            headers.push(("Content-Type".to_string(), "application/json".to_string()));
        }
        if let Some(token) = &self.auth_token {
            headers.push(("Authorization".to_string(), format!("Token {token}")));
        }
        if method.is_mutating() {
            if let Some(csrf) = &self.csrf_token {
                headers.push(("X-CSRFToken".to_string(), csrf.clone()));
            }
        }
        headers
    }

    async fn send(&self, method: Method, url: String, body: Option<String>) -> AppResult<HttpResponse> {
        let request_id = Uuid::new_v4();
        tracing::debug!(%request_id, method = method.as_str(), %url, "rest request");

        let request = HttpRequest {
            method,
            headers: self.headers(method, body.is_some()),
            url,
            body,
        };
        let response = self.transport.send(request).await?;
        tracing::debug!(%request_id, status = response.status, "rest response");

        if response.is_success() {
            return Ok(response);
        }
        if response.status == 404 {
            return Err(AppError::NotFound(detail_message(&response.body)));
        }
        Err(AppError::http(response.status, detail_message(&response.body)))
    }

    async fn get_json<R: DeserializeOwned>(&self, path: &str) -> AppResult<R> {
        let response = self.send(Method::Get, self.url(path), None).await?;
        Ok(serde_json::from_str(&response.body)?)
    }

    async fn post_json<B: Serialize, R: DeserializeOwned>(&self, path: &str, body: &B) -> AppResult<R> {
        let payload = serde_json::to_string(body)?;
        let response = self.send(Method::Post, self.url(path), Some(payload)).await?;
        Ok(serde_json::from_str(&response.body)?)
    }

    async fn put_json<B: Serialize, R: DeserializeOwned>(&self, path: &str, body: &B) -> AppResult<R> {
        let payload = serde_json::to_string(body)?;
        let response = self.send(Method::Put, self.url(path), Some(payload)).await?;
        Ok(serde_json::from_str(&response.body)?)
    }

    async fn delete(&self, path: &str) -> AppResult<()> {
        self.send(Method::Delete, self.url(path), None).await?;
        Ok(())
    }

    /// Assemble the full collection for a list endpoint, following the
    /// envelope's `next` URL when the backend paginates server-side. Screens
    /// layer their own client-side pagination on top of the result.
    pub async fn fetch_all<R: DeserializeOwned>(&self, path: &str) -> AppResult<Vec<R>> {
        let mut url = self.url(path);
        let mut collected = Vec::new();
        for _ in 0..MAX_FETCH_PAGES {
            let response = self.send(Method::Get, url, None).await?;
            let batch: ListResponse<R> = serde_json::from_str(&response.body)?;
            match batch {
                ListResponse::Plain(items) => {
                    collected.extend(items);
                    return Ok(collected);
                }
                ListResponse::Paginated(envelope) => {
                    collected.extend(envelope.results);
                    match envelope.next {
                        Some(next) => url = next,
                        None => return Ok(collected),
                    }
                }
            }
        }
        Err(AppError::Internal(format!(
            "list endpoint exceeded {MAX_FETCH_PAGES} pages; aborting fetch"
        )))
    }

    // Employees

    pub async fn list_employees(&self) -> AppResult<Vec<Employee>> {
        self.fetch_all("/employees/").await
    }

    pub async fn get_employee(&self, id: i64) -> AppResult<Employee> {
        self.get_json(&format!("/employees/{id}/")).await
    }

    // Leave

    pub async fn list_leave_requests(&self) -> AppResult<Vec<LeaveRequest>> {
        self.fetch_all("/leave_requests/").await
    }

    pub async fn create_leave_request(&self, payload: &NewLeaveRequest) -> AppResult<LeaveRequest> {
        self.post_json("/leave_requests/", payload).await
    }

    pub async fn set_leave_status(&self, id: i64, status: LeaveStatus) -> AppResult<LeaveRequest> {
        self.post_json(
            &format!("/leave_requests/{id}/set_status/"),
            &serde_json::json!({ "status": status }),
        )
        .await
    }

    // Appraisals

    pub async fn list_appraisals(&self) -> AppResult<Vec<Appraisal>> {
        self.fetch_all("/appraisals/").await
    }

    pub async fn create_appraisal(&self, payload: &SaveAppraisalPayload) -> AppResult<Appraisal> {
        self.post_json("/appraisals/", payload).await
    }

    pub async fn update_appraisal(&self, id: i64, payload: &SaveAppraisalPayload) -> AppResult<Appraisal> {
        self.put_json(&format!("/appraisals/{id}/"), payload).await
    }

    pub async fn delete_appraisal(&self, id: i64) -> AppResult<()> {
        self.delete(&format!("/appraisals/{id}/")).await
    }

    // Terminations

    pub async fn list_terminations(&self) -> AppResult<Vec<Termination>> {
        self.fetch_all("/terminations/").await
    }

    // Candidate letters

    pub async fn list_letters(&self) -> AppResult<Vec<CandidateLetter>> {
        self.fetch_all("/letters/").await
    }

    pub async fn create_letter(&self, payload: &SaveLetterPayload) -> AppResult<CandidateLetter> {
        self.post_json("/letters/", payload).await
    }

    pub async fn delete_letter(&self, id: i64) -> AppResult<()> {
        self.delete(&format!("/letters/{id}/")).await
    }

    // Holidays

    pub async fn list_holidays(&self) -> AppResult<Vec<Holiday>> {
        self.fetch_all("/holidays/").await
    }

    pub async fn create_holiday(&self, payload: &NewHoliday) -> AppResult<Holiday> {
        self.post_json("/holidays/", payload).await
    }

    pub async fn delete_holiday(&self, id: i64) -> AppResult<()> {
        self.delete(&format!("/holidays/{id}/")).await
    }

    // Admin provisioning

    pub async fn provision_admin(&self, payload: &ProvisionAdminPayload) -> AppResult<serde_json::Value> {
        self.post_json("/admins/", payload).await
    }

    // Stationery items

    pub async fn list_stationery_items(&self) -> AppResult<Vec<StationeryItem>> {
        self.fetch_all("/stationery_items/").await
    }

    pub async fn create_stationery_item(
        &self,
        payload: &SaveStationeryItemPayload,
    ) -> AppResult<StationeryItem> {
        self.post_json("/stationery_items/", payload).await
    }

    pub async fn update_stationery_item(
        &self,
        id: i64,
        payload: &SaveStationeryItemPayload,
    ) -> AppResult<StationeryItem> {
        self.put_json(&format!("/stationery_items/{id}/"), payload).await
    }

    pub async fn delete_stationery_item(&self, id: i64) -> AppResult<()> {
        self.delete(&format!("/stationery_items/{id}/")).await
    }

    // Stationery usage, including the status-transition action endpoints. The
    // backend enforces the transitions; these calls only request them.

    pub async fn list_usage_requests(&self) -> AppResult<Vec<UsageRequest>> {
        self.fetch_all("/stationery_usage/").await
    }

    pub async fn create_usage_request(&self, payload: &NewUsageRequest) -> AppResult<UsageRequest> {
        self.post_json("/stationery_usage/", payload).await
    }

    pub async fn approve_usage_request(&self, id: i64) -> AppResult<UsageRequest> {
        self.post_json(
            &format!("/stationery_usage/{id}/approve_request/"),
            &serde_json::json!({}),
        )
        .await
    }

    pub async fn reject_usage_request(&self, id: i64) -> AppResult<UsageRequest> {
        self.post_json(
            &format!("/stationery_usage/{id}/reject_request/"),
            &serde_json::json!({}),
        )
        .await
    }

    pub async fn issue_usage_item(&self, id: i64) -> AppResult<UsageRequest> {
        self.post_json(
            &format!("/stationery_usage/{id}/issue_item/"),
            &serde_json::json!({}),
        )
        .await
    }

    // Stock transactions

    pub async fn list_stock_transactions(&self) -> AppResult<Vec<StockTransaction>> {
        self.fetch_all("/stock_transactions/").await
    }

    pub async fn create_stock_transaction(
        &self,
        payload: &NewStockTransaction,
    ) -> AppResult<StockTransaction> {
        self.post_json("/stock_transactions/", payload).await
    }
}

fn detail_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(detail) = value.get("detail").and_then(|detail| detail.as_str()) {
            return detail.to_string();
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "request failed".to_string()
    } else {
        trimmed.chars().take(200).collect()
    }
}
