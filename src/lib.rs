//! Client-side core of a multi-tenant billing/invoicing system: the invoice
//! totals engine, the line-item editing state machine, pre-submission
//! validation, and the admin-console directory of organizations and tenant
//! branches, together with typed clients for the REST backend they consume.

pub mod config;
pub mod errors;
pub mod models;
pub mod services;

pub use config::Config;
pub use errors::{AppError, AppResult};
pub use services::admin::AdminClient;
pub use services::backend::BackendClient;
pub use services::directory::Directory;
pub use services::editor::{LineItemEditor, StockWarning};
pub use services::invoice::{InvoiceOptions, InvoiceService, ValidationError};
pub use services::totals::{InvoiceCalculator, InvoiceTotals};
