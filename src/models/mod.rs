// src/models/mod.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default GST rate applied to a freshly added line item.
pub const DEFAULT_TAX_RATE: Decimal = dec!(18);

// ─── Products & Catalog ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub hsn_code: String,
    /// Net selling price per unit.
    pub price: Decimal,
    /// List price before discount.
    pub mrp: Decimal,
    #[serde(default)]
    pub tax_rate_percent: Decimal,
    #[serde(default)]
    pub stock: i64,
}

impl Product {
    /// Discount implied by the catalog price relative to MRP, as a percentage.
    pub fn implied_discount_percent(&self) -> Decimal {
        if self.mrp > Decimal::ZERO && self.price < self.mrp {
            (self.mrp - self.price) / self.mrp * dec!(100)
        } else {
            Decimal::ZERO
        }
    }
}

/// Read-mostly snapshot of the product list, fetched once per editing
/// session. Stock numbers here are advisory; the backend re-checks on save.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    pub fn get(&self, id: Uuid) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }
}

// ─── Customers ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    /// State code used to decide intra- vs inter-state GST.
    #[serde(default)]
    pub state_code: Option<String>,
}

// ─── Line Items ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Catalog product backing this row; None until one is chosen.
    pub product_id: Option<Uuid>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub hsn_code: String,
    pub quantity: i64,
    pub mrp: Decimal,
    pub discount_percent: Decimal,
    /// Net unit price after discount.
    pub price: Decimal,
    #[serde(default)]
    pub tax_rate_percent: Decimal,
}

impl LineItem {
    /// A fresh editable row: quantity 1, no product, default tax rate.
    pub fn blank() -> Self {
        Self {
            product_id: None,
            description: String::new(),
            hsn_code: String::new(),
            quantity: 1,
            mrp: Decimal::ZERO,
            discount_percent: Decimal::ZERO,
            price: Decimal::ZERO,
            tax_rate_percent: DEFAULT_TAX_RATE,
        }
    }

    /// A row seeded from a catalog product.
    pub fn from_product(product: &Product) -> Self {
        Self {
            product_id: Some(product.id),
            description: product.description.clone(),
            hsn_code: product.hsn_code.clone(),
            quantity: 1,
            mrp: product.mrp,
            discount_percent: product.implied_discount_percent(),
            price: product.price,
            tax_rate_percent: product.tax_rate_percent,
        }
    }
}

// ─── Tax Details ──────────────────────────────────────────────────────────────

/// Whether a sale is taxed intra-state (CGST + SGST) or inter-state (IGST).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxType {
    CgstSgst,
    Igst,
}

impl TaxType {
    /// Inter-state when both state codes are known and differ.
    pub fn for_sale(company_state: Option<&str>, customer_state: Option<&str>) -> Self {
        match (company_state, customer_state) {
            (Some(a), Some(b)) if !a.eq_ignore_ascii_case(b) => TaxType::Igst,
            _ => TaxType::CgstSgst,
        }
    }
}

/// One bucket of the per-rate tax breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateBucket {
    pub rate: Decimal,
    pub taxable: Decimal,
    pub tax: Decimal,
}

/// GST split of the total tax. Exactly one side is populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxDetails {
    pub tax_type: TaxType,
    pub cgst_amount: Decimal,
    pub sgst_amount: Decimal,
    pub igst_amount: Decimal,
}

// ─── Invoices ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    Draft,
    Pending,
    Paid,
    Overdue,
    Cancelled,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Draft => "draft",
            InvoiceStatus::Pending => "pending",
            InvoiceStatus::Paid => "paid",
            InvoiceStatus::Overdue => "overdue",
            InvoiceStatus::Cancelled => "cancelled",
        }
    }

    pub fn from_string(s: &str) -> Self {
        match s {
            "draft" => InvoiceStatus::Draft,
            "paid" => InvoiceStatus::Paid,
            "overdue" => InvoiceStatus::Overdue,
            "cancelled" => InvoiceStatus::Cancelled,
            _ => InvoiceStatus::Pending,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentType {
    Cash,
    Card,
    Upi,
    BankTransfer,
    Credit,
}

/// The assembled invoice payload. Built once by the submission validator and
/// never mutated item-by-item afterwards; status changes go through the
/// dedicated status-update call.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    /// Present on invoices fetched from the backend, absent on new payloads.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub customer_id: Uuid,
    pub items: Vec<LineItem>,
    pub subtotal: Decimal,
    pub breakdown: Vec<RateBucket>,
    pub tax_details: TaxDetails,
    pub total_tax: Decimal,
    pub total: Decimal,
    #[serde(default)]
    pub notes: Option<String>,
    pub payment_type: PaymentType,
    pub status: InvoiceStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub created_by: Option<String>,
}

/// Dashboard aggregates from `/invoices/stats`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceStats {
    #[serde(default)]
    pub total_invoices: i64,
    #[serde(default)]
    pub paid_count: i64,
    #[serde(default)]
    pub pending_count: i64,
    #[serde(default)]
    pub overdue_count: i64,
    #[serde(default)]
    pub total_revenue: Decimal,
    #[serde(default)]
    pub outstanding_amount: Decimal,
}

// ─── Settings ─────────────────────────────────────────────────────────────────

/// Company/payment configuration served by `/settings`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default)]
    pub company_name: String,
    /// Seller's state code; compared against the customer's for the GST split.
    #[serde(default)]
    pub state_code: Option<String>,
    #[serde(default = "default_currency")]
    pub currency_code: String,
    #[serde(default)]
    pub payment_note: Option<String>,
}

fn default_currency() -> String {
    "INR".to_string()
}

// ─── Organizations ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanType {
    #[serde(rename = "self")]
    SelfServe,
    Organization,
}

/// Shared active/inactive lifecycle for organizations and tenants. The only
/// transitions are manual toggles; soft-delete is tracked separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityStatus {
    Active,
    Inactive,
}

impl EntityStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityStatus::Active => "active",
            EntityStatus::Inactive => "inactive",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            EntityStatus::Active => EntityStatus::Inactive,
            EntityStatus::Inactive => EntityStatus::Active,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub id: Uuid,
    pub name: String,
    pub owner_email: String,
    pub plan_type: PlanType,
    pub status: EntityStatus,
    #[serde(default)]
    pub deleted: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrganizationRequest {
    pub name: String,
    pub owner_email: String,
    pub plan_type: PlanType,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrganizationRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan_type: Option<PlanType>,
}

/// Aggregated numbers for one organization across all of its branches.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationStats {
    pub organization_id: Uuid,
    #[serde(default)]
    pub tenant_count: i64,
    #[serde(default)]
    pub active_tenant_count: i64,
    #[serde(default)]
    pub total_invoices: i64,
    #[serde(default)]
    pub total_revenue: Decimal,
}

// ─── Tenants (Branches) ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tenant {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub name: String,
    /// URL-safe identifier, unique across all tenants of all organizations.
    pub slug: String,
    pub status: EntityStatus,
    #[serde(default)]
    pub deleted: bool,
    pub created_at: DateTime<Utc>,
}

/// Provisioning request. The server also creates the initial admin user and
/// the isolated per-tenant data store from these credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTenantRequest {
    pub organization_id: Uuid,
    pub name: String,
    pub slug: String,
    pub admin_email: String,
    pub admin_password: String,
}

/// Per-branch dashboard numbers from `/super-admin/.../branches/:slug/dashboard`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchDashboard {
    pub slug: String,
    #[serde(default)]
    pub invoice_count: i64,
    #[serde(default)]
    pub customer_count: i64,
    #[serde(default)]
    pub revenue: Decimal,
    #[serde(default)]
    pub low_stock_products: i64,
}

// ─── List Envelope ────────────────────────────────────────────────────────────

/// List endpoints answer with either a bare array or a pagination envelope.
/// Decoded once at the client boundary; everything past it sees `Page<T>`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ListResponse<T> {
    Paginated {
        items: Vec<T>,
        #[serde(default, rename = "totalPages")]
        total_pages: i64,
        #[serde(default)]
        page: i64,
        #[serde(default)]
        total: i64,
    },
    Bare(Vec<T>),
}

#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_pages: i64,
    pub page: i64,
    pub total: i64,
}

impl<T> ListResponse<T> {
    pub fn into_page(self) -> Page<T> {
        match self {
            ListResponse::Paginated {
                items,
                total_pages,
                page,
                total,
            } => {
                let total = if total == 0 { items.len() as i64 } else { total };
                Page {
                    items,
                    total_pages: total_pages.max(1),
                    page: page.max(1),
                    total,
                }
            }
            ListResponse::Bare(items) => {
                let total = items.len() as i64;
                Page {
                    items,
                    total_pages: 1,
                    page: 1,
                    total,
                }
            }
        }
    }
}
