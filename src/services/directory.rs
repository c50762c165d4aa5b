// src/services/directory.rs

use crate::{
    errors::{AppError, AppResult},
    models::{
        CreateOrganizationRequest, CreateTenantRequest, EntityStatus, Organization, Tenant,
        UpdateOrganizationRequest,
    },
    services::admin::AdminClient,
};
use tracing::warn;
use uuid::Uuid;

/// Admin-console state: the organization and tenant lists as of the last
/// successful fetch. Every mutation is a single remote call followed by a
/// full re-fetch, with no optimistic merging. A failed mutation leaves the
/// snapshot untouched; a failed re-fetch after a successful mutation is
/// logged and tolerated, since the primary operation already succeeded.
pub struct Directory {
    client: AdminClient,
    organizations: Vec<Organization>,
    tenants: Vec<Tenant>,
}

impl Directory {
    pub fn new(client: AdminClient) -> Self {
        Self {
            client,
            organizations: Vec::new(),
            tenants: Vec::new(),
        }
    }

    /// Re-fetch both lists. The snapshot is only replaced when both succeed.
    pub async fn refresh(&mut self) -> AppResult<()> {
        let organizations = self.client.list_organizations().await?;
        let tenants = self.client.list_tenants(None).await?;
        self.organizations = organizations.items;
        self.tenants = tenants.items;
        Ok(())
    }

    async fn refetch_after(&mut self, operation: &str) {
        if let Err(e) = self.refresh().await {
            warn!("Snapshot refresh after {} failed: {}", operation, e);
        }
    }

    // ─── Snapshot accessors ───────────────────────────────────────────────

    pub fn organizations(&self) -> &[Organization] {
        &self.organizations
    }

    pub fn tenants(&self) -> &[Tenant] {
        &self.tenants
    }

    pub fn organization(&self, id: Uuid) -> Option<&Organization> {
        self.organizations.iter().find(|o| o.id == id)
    }

    pub fn tenant(&self, id: Uuid) -> Option<&Tenant> {
        self.tenants.iter().find(|t| t.id == id)
    }

    pub fn tenants_of(&self, organization_id: Uuid) -> Vec<&Tenant> {
        self.tenants
            .iter()
            .filter(|t| t.organization_id == organization_id)
            .collect()
    }

    /// Tenants whose owning organization is no longer in the snapshot.
    /// Deleting an organization does not cascade, so these need explicit
    /// handling by an operator.
    pub fn orphaned_tenants(&self) -> Vec<&Tenant> {
        self.tenants
            .iter()
            .filter(|t| self.organization(t.organization_id).is_none())
            .collect()
    }

    // ─── Organization mutations ───────────────────────────────────────────

    pub async fn create_organization(
        &mut self,
        req: CreateOrganizationRequest,
    ) -> AppResult<Organization> {
        let org = self.client.create_organization(&req).await?;
        self.refetch_after("organization create").await;
        Ok(org)
    }

    pub async fn update_organization(
        &mut self,
        id: Uuid,
        req: UpdateOrganizationRequest,
    ) -> AppResult<Organization> {
        let org = self.client.update_organization(id, &req).await?;
        self.refetch_after("organization update").await;
        Ok(org)
    }

    pub async fn set_organization_status(
        &mut self,
        id: Uuid,
        status: EntityStatus,
    ) -> AppResult<Organization> {
        let org = self.client.set_organization_status(id, status).await?;
        self.refetch_after("organization status change").await;
        Ok(org)
    }

    /// Flip active ⇄ inactive based on the snapshot's current view.
    pub async fn toggle_organization_status(&mut self, id: Uuid) -> AppResult<Organization> {
        let current = self
            .organization(id)
            .map(|o| o.status)
            .ok_or_else(|| AppError::Validation("Organization not in snapshot".to_string()))?;
        self.set_organization_status(id, current.toggled()).await
    }

    pub async fn soft_delete_organization(&mut self, id: Uuid) -> AppResult<()> {
        self.client.delete_organization(id).await?;
        self.refetch_after("organization delete").await;
        Ok(())
    }

    pub async fn restore_organization(&mut self, id: Uuid) -> AppResult<Organization> {
        let org = self.client.restore_organization(id).await?;
        self.refetch_after("organization restore").await;
        Ok(org)
    }

    pub async fn hard_delete_organization(&mut self, id: Uuid) -> AppResult<()> {
        self.client.hard_delete_organization(id).await?;
        self.refetch_after("organization hard delete").await;
        Ok(())
    }

    // ─── Tenant mutations ─────────────────────────────────────────────────

    pub async fn create_tenant(&mut self, req: CreateTenantRequest) -> AppResult<Tenant> {
        let tenant = self.client.create_tenant(&req).await?;
        self.refetch_after("tenant provisioning").await;
        Ok(tenant)
    }

    pub async fn set_tenant_status(
        &mut self,
        id: Uuid,
        status: EntityStatus,
    ) -> AppResult<Tenant> {
        let tenant = self.client.set_tenant_status(id, status).await?;
        self.refetch_after("tenant status change").await;
        Ok(tenant)
    }

    pub async fn toggle_tenant_status(&mut self, id: Uuid) -> AppResult<Tenant> {
        let current = self
            .tenant(id)
            .map(|t| t.status)
            .ok_or_else(|| AppError::Validation("Tenant not in snapshot".to_string()))?;
        self.set_tenant_status(id, current.toggled()).await
    }

    pub async fn soft_delete_tenant(&mut self, id: Uuid) -> AppResult<()> {
        self.client.delete_tenant(id).await?;
        self.refetch_after("tenant delete").await;
        Ok(())
    }

    pub async fn restore_tenant(&mut self, id: Uuid) -> AppResult<Tenant> {
        let tenant = self.client.restore_tenant(id).await?;
        self.refetch_after("tenant restore").await;
        Ok(tenant)
    }
}
