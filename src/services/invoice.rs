// src/services/invoice.rs

use crate::{
    models::{Catalog, Customer, Invoice, InvoiceStatus, LineItem, PaymentType, TaxType},
    services::totals::InvoiceCalculator,
};
use chrono::Utc;
use rust_decimal::Decimal;
use std::fmt;

/// A single pre-submission failure. All failures are collected before the
/// result is returned, so the user fixes them in one pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub message: String,
    /// Index of the offending line item, when the failure is item-scoped.
    pub item_index: Option<usize>,
}

impl ValidationError {
    fn invoice(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            item_index: None,
        }
    }

    fn item(index: usize, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            item_index: Some(index),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Creation-time choices that ride along with the validated payload.
#[derive(Debug, Clone)]
pub struct InvoiceOptions {
    pub notes: Option<String>,
    pub payment_type: PaymentType,
    pub status: InvoiceStatus,
    pub tax_type: TaxType,
    pub created_by: Option<String>,
}

impl Default for InvoiceOptions {
    fn default() -> Self {
        Self {
            notes: None,
            payment_type: PaymentType::Cash,
            status: InvoiceStatus::Pending,
            tax_type: TaxType::CgstSgst,
            created_by: None,
        }
    }
}

pub struct InvoiceService;

impl InvoiceService {
    /// Validate the editing state and assemble the final invoice payload.
    ///
    /// The stock check runs against the catalog snapshot taken when editing
    /// began, so it is advisory. The backend re-validates atomically on save
    /// and remains the system of record for stock.
    pub fn validate_and_build(
        items: &[LineItem],
        customer: Option<&Customer>,
        catalog: &Catalog,
        opts: InvoiceOptions,
    ) -> Result<Invoice, Vec<ValidationError>> {
        let mut errors = Vec::new();

        let customer_id = customer.map(|c| c.id);
        if customer_id.is_none() {
            errors.push(ValidationError::invoice("No customer selected"));
        }
        if items.is_empty() {
            errors.push(ValidationError::invoice(
                "Invoice must contain at least one item",
            ));
        }

        for (index, item) in items.iter().enumerate() {
            let row = index + 1;
            if item.product_id.is_none() {
                errors.push(ValidationError::item(
                    index,
                    format!("Item {}: no product selected", row),
                ));
            }
            if item.quantity < 1 {
                errors.push(ValidationError::item(
                    index,
                    format!("Item {}: quantity must be at least 1", row),
                ));
            }
            if item.price <= Decimal::ZERO {
                errors.push(ValidationError::item(
                    index,
                    format!("Item {}: price is missing", row),
                ));
            }
            if let Some(product) = item.product_id.and_then(|id| catalog.get(id)) {
                if item.quantity > product.stock {
                    errors.push(ValidationError::item(
                        index,
                        format!(
                            "Item {}: only {} units of '{}' in stock",
                            row, product.stock, product.name
                        ),
                    ));
                }
            }
        }

        let Some(customer_id) = customer_id else {
            return Err(errors);
        };
        if !errors.is_empty() {
            return Err(errors);
        }

        let totals = InvoiceCalculator::compute_totals(items);
        let tax_details = InvoiceCalculator::tax_details(totals.total_tax, opts.tax_type);

        Ok(Invoice {
            id: None,
            customer_id,
            items: items.to_vec(),
            subtotal: totals.subtotal,
            breakdown: totals.breakdown,
            tax_details,
            total_tax: totals.total_tax,
            total: totals.total,
            notes: opts.notes,
            payment_type: opts.payment_type,
            status: opts.status,
            created_at: Utc::now(),
            created_by: opts.created_by,
        })
    }
}

// ==================== Tests ====================
