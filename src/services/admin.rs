// src/services/admin.rs

use crate::{
    config::Config,
    errors::{AppError, AppResult},
    models::{
        BranchDashboard, CreateOrganizationRequest, CreateTenantRequest, EntityStatus,
        ListResponse, Organization, OrganizationStats, Page, Tenant, UpdateOrganizationRequest,
    },
    services::http::{ADMIN_KEY_HEADER, error_for},
};
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::json;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Client for the super-admin provisioning API. Every request carries the
/// header-borne admin key. Organization and tenant deletion is soft by
/// default; the permanent variants are terminal.
#[derive(Clone)]
pub struct AdminClient {
    client: Client,
    config: Arc<Config>,
}

impl AdminClient {
    pub fn new(config: Arc<Config>) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.config.api_base_url, path);
        self.client
            .request(method, url)
            .header(ADMIN_KEY_HEADER, &self.config.admin_api_key)
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

    /// Fire a request where only success matters (deletes, restores).
    async fn execute(&self, request: RequestBuilder) -> AppResult<()> {
        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(error_for(response).await);
        }
        Ok(())
    }

    // ─── Organizations ────────────────────────────────────────────────────

    pub async fn list_organizations(&self) -> AppResult<Page<Organization>> {
        let list: ListResponse<Organization> = self
            .fetch(self.request(Method::GET, "/super-admin/organizations"))
            .await?;
        Ok(list.into_page())
    }

    pub async fn create_organization(
        &self,
        req: &CreateOrganizationRequest,
    ) -> AppResult<Organization> {
        let org: Organization = self
            .fetch(
                self.request(Method::POST, "/super-admin/organizations")
                    .json(req),
            )
            .await?;
        info!("Organization '{}' created ({})", org.name, org.id);
        Ok(org)
    }

    pub async fn update_organization(
        &self,
        id: Uuid,
        req: &UpdateOrganizationRequest,
    ) -> AppResult<Organization> {
        let path = format!("/super-admin/organizations/{}", id);
        self.fetch(self.request(Method::PATCH, &path).json(req)).await
    }

    pub async fn set_organization_status(
        &self,
        id: Uuid,
        status: EntityStatus,
    ) -> AppResult<Organization> {
        let path = format!("/super-admin/organizations/{}/status", id);
        self.fetch(
            self.request(Method::PATCH, &path)
                .json(&json!({ "status": status })),
        )
        .await
    }

    /// Soft delete; the organization stays restorable.
    pub async fn delete_organization(&self, id: Uuid) -> AppResult<()> {
        let path = format!("/super-admin/organizations/{}", id);
        self.execute(self.request(Method::DELETE, &path)).await
    }

    pub async fn restore_organization(&self, id: Uuid) -> AppResult<Organization> {
        let path = format!("/super-admin/organizations/{}/restore", id);
        self.fetch(self.request(Method::POST, &path)).await
    }

    /// Permanent removal. There is no undo on this path.
    pub async fn hard_delete_organization(&self, id: Uuid) -> AppResult<()> {
        let path = format!("/super-admin/organizations/{}/permanent", id);
        self.execute(self.request(Method::DELETE, &path)).await
    }

    pub async fn organization_stats(&self, id: Uuid) -> AppResult<OrganizationStats> {
        let path = format!("/super-admin/organizations/{}/aggregated-stats", id);
        self.fetch(self.request(Method::GET, &path)).await
    }

    pub async fn branch_dashboard(
        &self,
        organization_id: Uuid,
        slug: &str,
    ) -> AppResult<BranchDashboard> {
        let path = format!(
            "/super-admin/organizations/{}/branches/{}/dashboard",
            organization_id, slug
        );
        self.fetch(self.request(Method::GET, &path)).await
    }

    // ─── Tenants ──────────────────────────────────────────────────────────

    pub async fn list_tenants(&self, organization_id: Option<Uuid>) -> AppResult<Page<Tenant>> {
        let mut request = self.request(Method::GET, "/super-admin/tenants");
        if let Some(org) = organization_id {
            request = request.query(&[("organizationId", org.to_string())]);
        }
        let list: ListResponse<Tenant> = self.fetch(request).await?;
        Ok(list.into_page())
    }

    /// Provision a tenant. The server creates the initial admin user and the
    /// isolated per-tenant data store; slug collisions come back as API
    /// errors and are surfaced verbatim.
    pub async fn create_tenant(&self, req: &CreateTenantRequest) -> AppResult<Tenant> {
        let tenant: Tenant = self
            .fetch(self.request(Method::POST, "/super-admin/tenants").json(req))
            .await?;
        info!("Tenant '{}' provisioned (slug {})", tenant.name, tenant.slug);
        Ok(tenant)
    }

    pub async fn set_tenant_status(&self, id: Uuid, status: EntityStatus) -> AppResult<Tenant> {
        let path = format!("/super-admin/tenants/{}/status", id);
        self.fetch(
            self.request(Method::PATCH, &path)
                .json(&json!({ "status": status })),
        )
        .await
    }

    pub async fn delete_tenant(&self, id: Uuid) -> AppResult<()> {
        let path = format!("/super-admin/tenants/{}", id);
        self.execute(self.request(Method::DELETE, &path)).await
    }

    pub async fn restore_tenant(&self, id: Uuid) -> AppResult<Tenant> {
        let path = format!("/super-admin/tenants/{}/restore", id);
        self.fetch(self.request(Method::POST, &path)).await
    }
}
