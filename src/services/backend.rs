// src/services/backend.rs

use crate::{
    config::Config,
    errors::{AppError, AppResult},
    models::{
        Catalog, Customer, Invoice, InvoiceStats, InvoiceStatus, ListResponse, Page, Product,
        Settings,
    },
    services::http::{TENANT_HEADER, error_for},
};
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::json;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Client for the tenant-scoped billing backend. Requests carry the bearer
/// token and, when configured, the tenant-identifying header. List endpoints
/// answer in either of two shapes; both are normalized to `Page<T>` here so
/// nothing downstream sees the ambiguity.
#[derive(Clone)]
pub struct BackendClient {
    client: Client,
    config: Arc<Config>,
}

impl BackendClient {
    pub fn new(config: Arc<Config>) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.config.api_base_url, path);
        let mut request = self.client.request(method, url);
        if let Some(token) = &self.config.auth_token {
            request = request.bearer_auth(token);
        }
        if let Some(tenant) = &self.config.tenant_id {
            request = request.header(TENANT_HEADER, tenant);
        }
        request
    }

    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> AppResult<T> {
        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(error_for(response).await);
        }
        response
            .json::<T>()
            .await
            .map_err(|e| AppError::Decode(e.to_string()))
    }

    async fn fetch_list<T: DeserializeOwned>(&self, path: &str) -> AppResult<Page<T>> {
        let list: ListResponse<T> = self.fetch(self.request(Method::GET, path)).await?;
        Ok(list.into_page())
    }

    pub async fn list_customers(&self) -> AppResult<Page<Customer>> {
        self.fetch_list("/customers").await
    }

    pub async fn list_products(&self) -> AppResult<Page<Product>> {
        self.fetch_list("/products").await
    }

    /// Fetch the product list once and freeze it as the editing-session
    /// catalog snapshot.
    pub async fn fetch_catalog(&self) -> AppResult<Catalog> {
        let page = self.list_products().await?;
        Ok(Catalog::new(page.items))
    }

    pub async fn get_settings(&self) -> AppResult<Settings> {
        self.fetch(self.request(Method::GET, "/settings")).await
    }

    pub async fn create_invoice(&self, invoice: &Invoice) -> AppResult<Invoice> {
        let created: Invoice = self
            .fetch(self.request(Method::POST, "/invoices").json(invoice))
            .await?;
        info!(
            "Invoice created: customer {} total {}",
            created.customer_id, created.total
        );
        Ok(created)
    }

    pub async fn list_invoices(&self) -> AppResult<Page<Invoice>> {
        self.fetch_list("/invoices").await
    }

    pub async fn update_invoice_status(
        &self,
        id: Uuid,
        status: InvoiceStatus,
    ) -> AppResult<Invoice> {
        let path = format!("/invoices/{}/status", id);
        self.fetch(
            self.request(Method::PATCH, &path)
                .json(&json!({ "status": status })),
        )
        .await
    }

    pub async fn invoice_stats(&self) -> AppResult<InvoiceStats> {
        self.fetch(self.request(Method::GET, "/invoices/stats"))
            .await
    }

    /// CSV export. The bytes are handed to the caller untouched; the UI
    /// offers them as a file download.
    pub async fn export_invoices_csv(&self) -> AppResult<Vec<u8>> {
        let response = self.request(Method::GET, "/invoices/export").send().await?;
        if !response.status().is_success() {
            return Err(error_for(response).await);
        }
        let bytes = response.bytes().await?;
        Ok(bytes.to_vec())
    }
}
