// src/services/editor.rs

use crate::{
    errors::{AppError, AppResult},
    models::{Catalog, LineItem, Product},
    services::totals::round_money,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::fmt;
use tracing::warn;
use uuid::Uuid;

/// Non-fatal stock advisory surfaced to the user. Stock numbers come from the
/// catalog snapshot, so these are best-effort only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StockWarning {
    OutOfStock { product: String },
    LowStock { product: String, available: i64 },
}

impl fmt::Display for StockWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StockWarning::OutOfStock { product } => {
                write!(f, "'{}' is out of stock", product)
            }
            StockWarning::LowStock { product, available } => {
                write!(f, "'{}' is running low on stock ({} left)", product, available)
            }
        }
    }
}

/// Ordered, mutable sequence of invoice line items with derived-field
/// recomputation. Holds the catalog snapshot for product lookups; the
/// low-stock threshold comes from config rather than an ambient global.
pub struct LineItemEditor {
    items: Vec<LineItem>,
    catalog: Catalog,
    low_stock_threshold: i64,
}

impl LineItemEditor {
    pub fn new(catalog: Catalog, low_stock_threshold: i64) -> Self {
        Self {
            items: Vec::new(),
            catalog,
            low_stock_threshold,
        }
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn into_items(self) -> Vec<LineItem> {
        self.items
    }

    /// Append an empty row for manual entry.
    pub fn add_blank_item(&mut self) {
        self.items.push(LineItem::blank());
    }

    /// Quick-add from the catalog. An existing row for the product gets its
    /// quantity bumped by one, capped at available stock; exceeding the cap
    /// rejects the whole operation. A successful add of a product under the
    /// low-stock threshold returns an advisory warning.
    pub fn add_from_catalog(&mut self, product_id: Uuid) -> AppResult<Option<StockWarning>> {
        let product = self
            .catalog
            .get(product_id)
            .cloned()
            .ok_or_else(|| AppError::Validation("Product not found in catalog".to_string()))?;

        if let Some(existing) = self
            .items
            .iter_mut()
            .find(|i| i.product_id == Some(product_id))
        {
            if existing.quantity + 1 > product.stock {
                return Err(AppError::StockConflict(format!(
                    "Only {} units of '{}' in stock",
                    product.stock, product.name
                )));
            }
            existing.quantity += 1;
            return Ok(None);
        }

        if product.stock <= 0 {
            return Err(AppError::StockConflict(format!(
                "'{}' is out of stock",
                product.name
            )));
        }

        self.items.push(LineItem::from_product(&product));
        Ok(self.low_stock_warning(&product))
    }

    /// Remove the row at `index`; out-of-range indices are a no-op.
    pub fn remove_item(&mut self, index: usize) {
        if index < self.items.len() {
            self.items.remove(index);
        }
    }

    pub fn set_quantity(&mut self, index: usize, quantity: i64) {
        if let Some(item) = self.items.get_mut(index) {
            item.quantity = quantity.max(0);
        }
    }

    pub fn set_mrp(&mut self, index: usize, mrp: Decimal) {
        if let Some(item) = self.items.get_mut(index) {
            item.mrp = mrp.max(Decimal::ZERO);
            reprice(item);
        }
    }

    /// Negative discounts clamp to 0; the upper bound is not enforced, but
    /// the derived price is floored at zero.
    pub fn set_discount_percent(&mut self, index: usize, percent: Decimal) {
        if let Some(item) = self.items.get_mut(index) {
            item.discount_percent = percent.max(Decimal::ZERO);
            reprice(item);
        }
    }

    /// Editing the price directly back-derives the discount while the price
    /// stays at or below MRP. Above MRP the discount resets to 0; markups
    /// are not expressed as negative discounts.
    pub fn set_price(&mut self, index: usize, price: Decimal) {
        if let Some(item) = self.items.get_mut(index) {
            let price = price.max(Decimal::ZERO);
            item.price = price;
            item.discount_percent = if price <= item.mrp && item.mrp > Decimal::ZERO {
                (item.mrp - price) / item.mrp * dec!(100)
            } else {
                Decimal::ZERO
            };
        }
    }

    /// Re-seed the row from a catalog product: description, HSN, price, MRP,
    /// and tax rate are copied over, the discount resets to 0, and the
    /// quantity is kept. Stock shortfalls never block here; the returned
    /// warning is advisory.
    pub fn set_product(&mut self, index: usize, product_id: Uuid) -> Option<StockWarning> {
        let Some(product) = self.catalog.get(product_id).cloned() else {
            warn!("set_product: product {} not in catalog snapshot", product_id);
            return None;
        };
        let item = self.items.get_mut(index)?;

        item.product_id = Some(product.id);
        item.description = product.description.clone();
        item.hsn_code = product.hsn_code.clone();
        item.price = product.price;
        item.mrp = product.mrp;
        item.tax_rate_percent = product.tax_rate_percent;
        item.discount_percent = Decimal::ZERO;

        self.low_stock_warning(&product)
    }

    pub fn set_description(&mut self, index: usize, description: impl Into<String>) {
        if let Some(item) = self.items.get_mut(index) {
            item.description = description.into();
        }
    }

    pub fn set_hsn_code(&mut self, index: usize, hsn_code: impl Into<String>) {
        if let Some(item) = self.items.get_mut(index) {
            item.hsn_code = hsn_code.into();
        }
    }

    fn low_stock_warning(&self, product: &Product) -> Option<StockWarning> {
        if product.stock <= 0 {
            Some(StockWarning::OutOfStock {
                product: product.name.clone(),
            })
        } else if product.stock < self.low_stock_threshold {
            Some(StockWarning::LowStock {
                product: product.name.clone(),
                available: product.stock,
            })
        } else {
            None
        }
    }
}

/// price = mrp × (1 − discount/100), rounded to currency precision,
/// floored at zero.
fn reprice(item: &mut LineItem) {
    let derived = item.mrp * (dec!(1) - item.discount_percent / dec!(100));
    item.price = round_money(derived).max(Decimal::ZERO);
}

// ==================== Tests ====================
